//! Document Export Module for Markpress
//!
//! This module turns the styled document into a PDF or a JPEG snapshot and
//! delivers it to disk, and copies the styled page to the clipboard.
//!
//! # Architecture
//!
//! - `options.rs` - Export formats, delivery modes, and page geometry
//! - `pdf.rs` - Document capture through headless Chrome
//! - `paginate.rs` - Slicing the capture onto PDF pages
//! - `delivery.rs` - Atomic file delivery
//! - `job.rs` - Single-flight background export runner
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
mod delivery;
mod job;
pub mod options;
mod paginate;
mod pdf;

pub use clipboard::{copy_document_to_clipboard, copy_text_to_clipboard};
pub use delivery::{downloads_dir, Delivery};
pub use job::{ExportController, ExportJob};
pub use options::{DeliveryMode, ExportFormat, ExportSettings};
pub use pdf::{ChromeEngine, PdfEngine};

#[cfg(test)]
pub(crate) use job::tests as job_tests;
