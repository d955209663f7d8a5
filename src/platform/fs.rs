// xltemplates - platform/fs.rs
//
// Filesystem and desktop helpers: template root bootstrap, opening files
// for download, per-file metadata, and opening the UI in a browser.

use crate::util::error::{BootstrapError, DownloadError};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io;
use std::path::Path;

/// What `ensure_directory` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    /// The directory was already there.
    Existing,
    /// The directory (and any missing parents) was created just now.
    Created,
}

/// Make sure `path` is a directory, creating it and its parents if absent.
///
/// A path that exists as a regular file is an error; it is never replaced.
pub fn ensure_directory(path: &Path) -> Result<DirectoryStatus, BootstrapError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(DirectoryStatus::Existing),
        Ok(_) => Err(BootstrapError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(_) => {
            tracing::warn!(path = %path.display(), "Template directory not found; creating it");
            std::fs::create_dir_all(path).map_err(|source| BootstrapError::Create {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Template directory created");
            Ok(DirectoryStatus::Created)
        }
    }
}

/// Open `path` for binary reading.
///
/// A missing file maps to `DownloadError::NotFound`; every other failure to
/// `DownloadError::Io`.
pub fn open_file(path: &Path) -> Result<File, DownloadError> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DownloadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DownloadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Size and last-modified time shown next to each template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDetails {
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Read size and mtime for `path`. Follows symlinks.
pub fn file_details(path: &Path) -> io::Result<FileDetails> {
    let meta = std::fs::metadata(path)?;
    Ok(FileDetails {
        size: meta.len(),
        modified: meta.modified().ok().map(DateTime::<Local>::from),
    })
}

/// Open `url` in the system browser.
///
/// Platform behaviour:
/// - **Windows**: `explorer "<url>"`
/// - **macOS**: `open "<url>"`
/// - **Linux**: `xdg-open "<url>"`
///
/// The subprocess is spawned detached; any launch failure is logged at WARN
/// level but never propagated so the server keeps running.
pub fn open_in_browser(url: &str) {
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let program = "xdg-open";

    match std::process::Command::new(program).arg(url).spawn() {
        Ok(_) => tracing::debug!(url, program, "Opened UI in browser"),
        Err(e) => tracing::warn!(url, program, error = %e, "Failed to open browser"),
    }
}
