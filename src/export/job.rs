//! Background export jobs
//!
//! Exports run on a worker thread so the UI keeps painting while Chrome
//! composes the document. At most one export is in flight; the UI polls the
//! controller every frame for the outcome.

use log::{debug, error, warn};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use super::delivery::{deliver, Delivery};
use super::options::{DeliveryMode, ExportFormat, PageOptions};
use super::pdf::PdfEngine;
use crate::error::{Error, Result};
use crate::preview::StyledDocument;

/// Everything a worker needs to produce and deliver one export.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub document: StyledDocument,
    pub format: ExportFormat,
    pub page: PageOptions,
    pub delivery: Delivery,
    /// Open the delivered file with the system handler
    pub open_when_done: bool,
}

/// Result of a finished export.
#[derive(Debug)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub mode: DeliveryMode,
    pub result: Result<PathBuf>,
}

struct InFlight {
    format: ExportFormat,
    mode: DeliveryMode,
    receiver: Receiver<ExportOutcome>,
}

/// Single-flight export runner.
#[derive(Default)]
pub struct ExportController {
    in_flight: Option<InFlight>,
}

impl ExportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an export is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Format of the running export, if any.
    pub fn busy_format(&self) -> Option<ExportFormat> {
        self.in_flight.as_ref().map(|f| f.format)
    }

    /// Start an export on a worker thread.
    ///
    /// Returns [`Error::ExportBusy`] without touching the running export
    /// when one is already in flight.
    pub fn request(&mut self, engine: Arc<dyn PdfEngine>, job: ExportJob) -> Result<()> {
        if self.is_busy() {
            return Err(Error::ExportBusy);
        }

        let format = job.format;
        let mode = job.delivery.mode();
        let (tx, rx) = channel();

        thread::Builder::new()
            .name("markpress-export".to_string())
            .spawn(move || {
                let result = run_job(engine.as_ref(), &job);
                // The receiver is gone only if the app is shutting down
                let _ = tx.send(ExportOutcome {
                    format,
                    mode,
                    result,
                });
            })?;

        debug!("Started {} export", format.label());
        self.in_flight = Some(InFlight {
            format,
            mode,
            receiver: rx,
        });
        Ok(())
    }

    /// Collect the outcome of the running export if it has finished.
    ///
    /// The controller is idle again once this returns `Some`.
    pub fn poll(&mut self) -> Option<ExportOutcome> {
        let in_flight = self.in_flight.as_ref()?;

        let outcome = match in_flight.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                error!("Export worker stopped without reporting a result");
                ExportOutcome {
                    format: in_flight.format,
                    mode: in_flight.mode,
                    result: Err(Error::Export(
                        "The export worker stopped unexpectedly".to_string(),
                    )),
                }
            }
        };

        self.in_flight = None;
        Some(outcome)
    }

    /// Block until the running export finishes.
    #[cfg(test)]
    pub fn wait(&mut self) -> Option<ExportOutcome> {
        let in_flight = self.in_flight.take()?;
        let outcome = match in_flight
            .receiver
            .recv_timeout(std::time::Duration::from_secs(10))
        {
            Ok(outcome) => outcome,
            Err(e) => ExportOutcome {
                format: in_flight.format,
                mode: in_flight.mode,
                result: Err(Error::Export(e.to_string())),
            },
        };
        Some(outcome)
    }
}

/// Compose and deliver one export.
fn run_job(engine: &dyn PdfEngine, job: &ExportJob) -> Result<PathBuf> {
    let bytes = engine.render(&job.document, job.format, &job.page)?;
    let path = deliver(&bytes, &job.delivery)?;

    if job.open_when_done {
        if let Err(e) = open::that(&path) {
            warn!("Failed to open {}: {}", path.display(), e);
        }
    }

    Ok(path)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
