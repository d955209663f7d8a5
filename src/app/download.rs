// xltemplates - app/download.rs
//
// Resolves a (category, filename) pair from a download request to a file
// under the template root and reads it for the response.
//
// Names arrive from the network, so they are checked before any path is
// built: each must be a single path component and must name an allowed
// template type. A file that vanished since the page was rendered is a
// per-file NotFound, never a server failure.

use crate::core::mime;
use crate::core::model::Category;
use crate::core::scan::has_allowed_extension;
use crate::platform::fs as platform_fs;
use crate::util::error::DownloadError;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use url::form_urlencoded;

/// An opened template, ready to stream.
///
/// Owns the file handle; it is closed when this value (or the
/// `DownloadedFile` produced from it) is dropped, on success or failure.
#[derive(Debug)]
pub struct Download {
    /// Name offered to the browser (no directory part).
    pub file_name: String,
    /// Content-Type for the response.
    pub mime: &'static str,
    /// Full path on disk.
    pub path: PathBuf,
    file: File,
}

/// A template read fully into memory.
#[derive(Debug)]
pub struct DownloadedFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Read the whole file and release the handle.
    pub fn read_all(mut self) -> Result<DownloadedFile, DownloadError> {
        let mut bytes = Vec::new();
        if let Err(source) = self.file.read_to_end(&mut bytes) {
            return Err(DownloadError::Io {
                path: self.path,
                source,
            });
        }
        Ok(DownloadedFile {
            file_name: self.file_name,
            mime: self.mime,
            bytes,
        })
    }
}

/// Open `file_name` in `category` under `root` for download.
pub fn open_for_download(
    root: &Path,
    category: &Category,
    file_name: &str,
) -> Result<Download, DownloadError> {
    if let Some(dir) = category.dir_name() {
        validate_component(dir)?;
    }
    validate_component(file_name)?;
    if !has_allowed_extension(Path::new(file_name)) {
        return Err(DownloadError::InvalidName {
            value: file_name.to_string(),
        });
    }

    let path = category.file_path(root, file_name);
    let file = platform_fs::open_file(&path).map_err(|e| relative_error(e, category, file_name))?;

    tracing::debug!(path = %path.display(), "Opened template for download");

    Ok(Download {
        file_name: file_name.to_string(),
        mime: mime::mime_for(file_name),
        path,
        file,
    })
}

/// Link for the download route: `/download?category=<dir>&file=<name>`.
/// The root category is expressed by leaving `category` out.
pub fn download_href(category: &Category, file_name: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(dir) = category.dir_name() {
        query.append_pair("category", dir);
    }
    query.append_pair("file", file_name);
    format!("/download?{}", query.finish())
}

/// A name is acceptable if it is exactly one normal path component.
/// Separators are the host's: a backslash is an ordinary character on Unix.
fn validate_component(value: &str) -> Result<(), DownloadError> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(std::path::is_separator)
        || value.contains('\0');
    if invalid {
        tracing::warn!(value, "Rejected download request name");
        return Err(DownloadError::InvalidName {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Report paths relative to the template root so messages do not leak the
/// server's directory layout.
fn relative_error(err: DownloadError, category: &Category, file_name: &str) -> DownloadError {
    let path = category.relative_path(file_name);
    match err {
        DownloadError::NotFound { .. } => DownloadError::NotFound { path },
        DownloadError::Io { source, .. } => DownloadError::Io { path, source },
        other => other,
    }
}
