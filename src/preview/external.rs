//! One-shot preview in the system browser
//!
//! Writes the styled document to a temporary HTML file and hands it to the
//! default browser. Works on hosts without Chrome.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::document::StyledDocument;
use crate::error::{Error, Result};

/// File name used for the temporary preview page.
const PREVIEW_FILE_NAME: &str = "markpress-preview.html";

/// Write the preview page into `dir`, replacing any previous one.
pub fn write_preview_file(document: &StyledDocument, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(PREVIEW_FILE_NAME);
    fs::write(&path, document.to_html("Markpress Preview")).map_err(|e| Error::FileWrite {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

/// Write the preview page to the temp directory and open it.
pub fn open_in_browser(document: &StyledDocument) -> Result<PathBuf> {
    let path = write_preview_file(document, &std::env::temp_dir())?;
    open::that(&path)?;
    info!("Opened preview in browser: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_preview_file() {
        let dir = TempDir::new().unwrap();
        let doc = StyledDocument::new("<p class=\"markdown-paragraph\">x</p>", "p{}");

        let path = write_preview_file(&doc, dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), PREVIEW_FILE_NAME);
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("markdown-paragraph"));
    }

    #[test]
    fn test_write_preview_overwrites() {
        let dir = TempDir::new().unwrap();
        write_preview_file(&StyledDocument::new("first", ""), dir.path()).unwrap();
        let path = write_preview_file(&StyledDocument::new("second", ""), dir.path()).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("second"));
        assert!(!contents.contains("first"));
    }

    #[test]
    fn test_write_preview_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let result = write_preview_file(&StyledDocument::new("", ""), &missing);
        assert!(matches!(result, Err(Error::FileWrite { .. })));
    }
}
