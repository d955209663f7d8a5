// xltemplates - core/mime.rs
//
// Content-Type selection for downloads, by file extension.

use crate::util::constants;
use std::path::Path;

/// MIME type for `file_name`, chosen by its lower-cased extension.
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("xlsx") => constants::MIME_XLSX,
        Some("xls") => constants::MIME_XLS,
        _ => constants::MIME_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workbook_types() {
        assert_eq!(
            mime_for("budget.xlsx"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(mime_for("BUDGET.XLS"), "application/vnd.ms-excel");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(mime_for("notes.txt"), "application/octet-stream");
        assert_eq!(mime_for("no_extension"), "application/octet-stream");
    }
}
