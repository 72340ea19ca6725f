//! Native file dialog integration using the rfd crate

use rfd::FileDialog;
use std::path::PathBuf;

use crate::export::{downloads_dir, ExportFormat};

/// Opens a native save dialog for an export.
///
/// Starts in the downloads folder with `default_name` filled in. Returns
/// `None` if cancelled.
pub fn save_export_dialog(format: ExportFormat, default_name: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(format!("Save {}", format.label()))
        .add_filter(format.filter_name(), &[format.extension()])
        .set_directory(downloads_dir())
        .set_file_name(default_name)
        .save_file()
        .map(|path| with_extension(path, format))
}

/// Append the format's extension if the user left it off.
pub fn with_extension(path: PathBuf, format: ExportFormat) -> PathBuf {
    let has_extension = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case(format.extension()))
        .unwrap_or(false);

    if has_extension {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".");
        name.push(format.extension());
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_extension_appends() {
        let path = with_extension(PathBuf::from("/tmp/report"), ExportFormat::Pdf);
        assert_eq!(path, PathBuf::from("/tmp/report.pdf"));
    }

    #[test]
    fn test_with_extension_keeps_existing() {
        let path = with_extension(PathBuf::from("/tmp/report.PDF"), ExportFormat::Pdf);
        assert_eq!(path, PathBuf::from("/tmp/report.PDF"));
    }

    #[test]
    fn test_with_extension_other_extension() {
        let path = with_extension(PathBuf::from("/tmp/notes.v2"), ExportFormat::Jpeg);
        assert_eq!(path, PathBuf::from("/tmp/notes.v2.jpg"));
    }
}
