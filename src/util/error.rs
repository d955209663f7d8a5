// xltemplates - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps the path or
// value it failed on and the underlying cause.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Top-level error type for all xltemplates operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum XlTemplatesError {
    /// Template root could not be established.
    Bootstrap(BootstrapError),

    /// A file could not be prepared for download.
    Download(DownloadError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// The launcher could not run the UI server.
    Launch(LaunchError),

    /// The UI server failed to bind, run, or render.
    Server(ServerError),
}

impl fmt::Display for XlTemplatesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bootstrap(e) => write!(f, "Template directory error: {e}"),
            Self::Download(e) => write!(f, "Download error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Launch(e) => write!(f, "Launch error: {e}"),
            Self::Server(e) => write!(f, "Server error: {e}"),
        }
    }
}

impl std::error::Error for XlTemplatesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bootstrap(e) => Some(e),
            Self::Download(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Launch(e) => Some(e),
            Self::Server(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Problems hit while listing the template tree.
///
/// These never abort a scan. The scanner downgrades each one to a warning
/// string and carries on with the rest of the tree.
#[derive(Debug)]
pub enum ScanError {
    /// A directory (root or category folder) could not be listed at all.
    ListDirectory {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A single entry inside a listing could not be inspected.
    Entry {
        path: Option<PathBuf>,
        source: walkdir::Error,
    },

    /// A file or folder name is not valid UTF-8 and cannot be offered in the UI.
    NonUtf8Name { path: PathBuf },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListDirectory { path, source } => {
                write!(f, "Could not list files in directory '{}': {source}", path.display())
            }
            Self::Entry { path, source } => match path {
                Some(p) => write!(f, "Cannot access '{}': {source}", p.display()),
                None => write!(f, "Cannot access directory entry: {source}"),
            },
            Self::NonUtf8Name { path } => {
                write!(f, "Skipping '{}': non-UTF-8 name", path.display())
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ListDirectory { source, .. } => Some(source),
            Self::Entry { source, .. } => Some(source),
            Self::NonUtf8Name { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Bootstrap errors
// ---------------------------------------------------------------------------

/// Errors establishing the template root directory. Fatal for a render cycle.
#[derive(Debug)]
pub enum BootstrapError {
    /// The path exists but is a file, not a directory.
    NotADirectory { path: PathBuf },

    /// The directory (or one of its parents) could not be created.
    Create { path: PathBuf, source: io::Error },
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory { path } => {
                write!(f, "'{}' exists but is not a directory", path.display())
            }
            Self::Create { path, source } => {
                write!(f, "Failed to create directory '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotADirectory { .. } => None,
            Self::Create { source, .. } => Some(source),
        }
    }
}

impl From<BootstrapError> for XlTemplatesError {
    fn from(e: BootstrapError) -> Self {
        Self::Bootstrap(e)
    }
}

// ---------------------------------------------------------------------------
// Download errors
// ---------------------------------------------------------------------------

/// Per-file download failures. Never affect other files.
#[derive(Debug)]
pub enum DownloadError {
    /// The requested category or filename is empty, `.`/`..`, or contains a
    /// path separator.
    InvalidName { value: String },

    /// The file is gone (usually deleted between listing and download).
    NotFound { path: PathBuf },

    /// Any other failure opening or reading the file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { value } => write!(f, "Invalid file or category name '{value}'"),
            Self::NotFound { path } => write!(f, "File '{}' not found", path.display()),
            Self::Io { path, source } => write!(
                f,
                "An error occurred while preparing '{}' for download: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DownloadError> for XlTemplatesError {
    fn from(e: DownloadError) -> Self {
        Self::Download(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for XlTemplatesError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Launch errors
// ---------------------------------------------------------------------------

/// Why the launcher could not keep the UI server running.
///
/// Both variants collapse to process exit code 1 for the caller.
#[derive(Debug)]
pub enum LaunchError {
    /// The server process could not be started at all.
    Spawn { program: PathBuf, source: io::Error },

    /// The server process started but exited unsuccessfully.
    Exited { program: PathBuf, status: ExitStatus },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => {
                write!(f, "Failed to start '{}': {source}", program.display())
            }
            Self::Exited { program, status } => {
                write!(f, "'{}' exited unsuccessfully ({status})", program.display())
            }
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Exited { .. } => None,
        }
    }
}

impl From<LaunchError> for XlTemplatesError {
    fn from(e: LaunchError) -> Self {
        Self::Launch(e)
    }
}

// ---------------------------------------------------------------------------
// Server errors
// ---------------------------------------------------------------------------

/// Errors from the HTTP layer.
#[derive(Debug)]
pub enum ServerError {
    /// The listening socket could not be bound.
    Bind { addr: String, source: io::Error },

    /// The server stopped with an I/O error after binding.
    Run { addr: String, source: io::Error },

    /// An HTML template failed to render.
    Render { source: askama::Error },
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { addr, source } => write!(f, "Cannot bind to {addr}: {source}"),
            Self::Run { addr, source } => write!(f, "Server on {addr} stopped: {source}"),
            Self::Render { source } => write!(f, "Failed to render page: {source}"),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Run { source, .. } => Some(source),
            Self::Render { source } => Some(source),
        }
    }
}

impl From<ServerError> for XlTemplatesError {
    fn from(e: ServerError) -> Self {
        Self::Server(e)
    }
}

/// Convenience type alias for xltemplates results.
pub type Result<T> = std::result::Result<T, XlTemplatesError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_download_not_found_mentions_path() {
        let e = DownloadError::NotFound {
            path: PathBuf::from("Sales/q1.xlsx"),
        };
        let msg = e.to_string();
        assert!(msg.contains("Sales/q1.xlsx"), "got: {msg}");
        assert!(msg.contains("not found"), "got: {msg}");
    }

    #[test]
    fn test_top_level_error_keeps_source_chain() {
        let inner = BootstrapError::Create {
            path: PathBuf::from("/readonly/Excel_templates"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let top: XlTemplatesError = inner.into();
        let bootstrap = top.source().expect("bootstrap source");
        let io_err = bootstrap.source().expect("io source");
        assert!(io_err.to_string().contains("denied"));
    }

    #[test]
    fn test_spawn_error_names_program() {
        let e = LaunchError::Spawn {
            program: PathBuf::from("/opt/xltemplates/bin/xltemplates"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/opt/xltemplates/bin/xltemplates"));
        assert!(e.source().is_some());
    }
}
