//! Delivery of exported bytes
//!
//! Files are written to a temporary sibling of the target and renamed into
//! place, so a failed export never leaves a partial file behind. Saves
//! replace the chosen file; downloads never replace an existing one and pick
//! a numbered name instead, the way browsers do.

use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::options::DeliveryMode;
use crate::error::{Error, Result};

/// Numbered names tried before a download gives up.
const MAX_DOWNLOAD_COPIES: u32 = 1000;

/// Where an export should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// A path the user picked in the save dialog
    Save(PathBuf),
    /// A fixed file name inside the downloads folder
    Download { directory: PathBuf, file_name: String },
}

impl Delivery {
    /// Download into the user's downloads folder.
    pub fn download(file_name: impl Into<String>) -> Self {
        Delivery::Download {
            directory: downloads_dir(),
            file_name: file_name.into(),
        }
    }

    pub fn mode(&self) -> DeliveryMode {
        match self {
            Delivery::Save(_) => DeliveryMode::Save,
            Delivery::Download { .. } => DeliveryMode::Download,
        }
    }

    /// Preferred path of the delivered file. Downloads may get a numbered name.
    pub fn target(&self) -> PathBuf {
        match self {
            Delivery::Save(path) => path.clone(),
            Delivery::Download {
                directory,
                file_name,
            } => directory.join(file_name),
        }
    }
}

/// The user's downloads folder, or the temp directory when there is none.
pub fn downloads_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(std::env::temp_dir)
}

/// Write `bytes` to the delivery target and return the final path.
pub fn deliver(bytes: &[u8], delivery: &Delivery) -> Result<PathBuf> {
    let target = delivery.target();
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let write_err = |source: std::io::Error| Error::FileWrite {
        path: target.clone(),
        source,
    };

    let mut staged = NamedTempFile::new_in(parent).map_err(write_err)?;
    staged.write_all(bytes).map_err(write_err)?;
    staged.flush().map_err(write_err)?;

    let path = match delivery {
        Delivery::Save(_) => {
            staged.persist(&target).map_err(|e| write_err(e.error))?;
            target.clone()
        }
        Delivery::Download { .. } => persist_unique(staged, &target)?,
    };

    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// `name.pdf` for `n == 0`, otherwise `name (n).pdf`.
fn numbered_name(target: &Path, n: u32) -> PathBuf {
    if n == 0 {
        return target.to_path_buf();
    }

    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match target.extension() {
        Some(ext) => format!("{} ({}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{} ({})", stem, n),
    };
    target.with_file_name(name)
}

/// Persist under the first free numbered name.
fn persist_unique(mut staged: NamedTempFile, target: &Path) -> Result<PathBuf> {
    for n in 0..MAX_DOWNLOAD_COPIES {
        let candidate = numbered_name(target, n);
        match staged.persist_noclobber(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => staged = e.file,
            Err(e) => {
                return Err(Error::FileWrite {
                    path: candidate,
                    source: e.error,
                })
            }
        }
    }

    Err(Error::FileWrite {
        path: target.to_path_buf(),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "no free file name"),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_deliver_save() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("report.pdf");

        let path = deliver(b"%PDF-1.4", &Delivery::Save(target.clone())).unwrap();

        assert_eq!(path, target);
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_deliver_download_uses_fixed_name() {
        let dir = TempDir::new().unwrap();
        let delivery = Delivery::Download {
            directory: dir.path().to_path_buf(),
            file_name: "markdown-document.pdf".to_string(),
        };

        let path = deliver(b"pdf", &delivery).unwrap();

        assert_eq!(path, dir.path().join("markdown-document.pdf"));
        assert!(path.exists());
    }

    #[test]
    fn test_download_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("markdown-document.pdf");
        fs::write(&existing, "old").unwrap();
        let delivery = Delivery::Download {
            directory: dir.path().to_path_buf(),
            file_name: "markdown-document.pdf".to_string(),
        };

        let first = deliver(b"new", &delivery).unwrap();
        let second = deliver(b"newer", &delivery).unwrap();

        assert_eq!(fs::read_to_string(&existing).unwrap(), "old");
        assert_eq!(first, dir.path().join("markdown-document (1).pdf"));
        assert_eq!(second, dir.path().join("markdown-document (2).pdf"));
        assert_eq!(fs::read_to_string(&second).unwrap(), "newer");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_numbered_name() {
        let target = Path::new("/downloads/markdown-document.pdf");
        assert_eq!(numbered_name(target, 0), target);
        assert_eq!(
            numbered_name(target, 3),
            PathBuf::from("/downloads/markdown-document (3).pdf")
        );
        assert_eq!(
            numbered_name(Path::new("/d/notes"), 1),
            PathBuf::from("/d/notes (1)")
        );
    }

    #[test]
    fn test_deliver_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.pdf");
        fs::write(&target, "old").unwrap();

        deliver(b"new", &Delivery::Save(target.clone())).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_deliver_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        deliver(b"x", &Delivery::Save(dir.path().join("a.pdf"))).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_deliver_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("a.pdf");

        let result = deliver(b"x", &Delivery::Save(target.clone()));

        assert!(matches!(result, Err(Error::FileWrite { .. })));
        assert!(!target.exists());
    }

    #[test]
    fn test_delivery_target() {
        let save = Delivery::Save(PathBuf::from("/tmp/a.pdf"));
        assert_eq!(save.target(), PathBuf::from("/tmp/a.pdf"));

        let download = Delivery::Download {
            directory: PathBuf::from("/downloads"),
            file_name: "b.pdf".to_string(),
        };
        assert_eq!(download.target(), PathBuf::from("/downloads/b.pdf"));
        assert_eq!(download.mode(), DeliveryMode::Download);
        assert_eq!(save.mode(), DeliveryMode::Save);
    }

    #[test]
    fn test_downloads_dir_exists_or_temp() {
        let dir = downloads_dir();
        assert!(!dir.as_os_str().is_empty());
    }
}
