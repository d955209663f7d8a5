// xltemplates - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "xltemplates";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "xltemplates";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the UI server executable (without platform suffix).
/// The launcher looks for it next to its own executable.
pub const SERVER_BIN_NAME: &str = "xltemplates";

// =============================================================================
// Template discovery
// =============================================================================

/// Name of the template folder created next to the server executable.
pub const TEMPLATES_DIR_NAME: &str = "Excel_templates";

/// File extensions (lower-case, without the dot) that are listed for download.
pub const ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Display label for files that live directly in the template root.
pub const ROOT_CATEGORY_LABEL: &str = "Files in Root Directory";

// =============================================================================
// MIME types
// =============================================================================

/// MIME type for Office Open XML workbooks (`.xlsx`).
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// MIME type for legacy binary workbooks (`.xls`).
pub const MIME_XLS: &str = "application/vnd.ms-excel";

/// Fallback MIME type for anything else.
pub const MIME_FALLBACK: &str = "application/octet-stream";

// =============================================================================
// Server defaults
// =============================================================================

/// Default TCP port for the UI server and the launcher.
pub const DEFAULT_PORT: u16 = 8501;

/// Default bind address for the server when started directly.
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1";

/// Bind address the launcher passes to the server (all interfaces).
pub const LAUNCH_ADDRESS: &str = "0.0.0.0";

/// Number of actix worker threads. One worker means one render cycle at a time.
pub const SERVER_WORKERS: usize = 1;

// =============================================================================
// Page defaults
// =============================================================================

/// Browser tab title.
pub const DEFAULT_PAGE_TITLE: &str = "Excel Template Downloader";

/// Page heading.
pub const DEFAULT_PAGE_HEADING: &str = "Excel Template Selector & Downloader";

/// Line shown above the category list.
pub const DEFAULT_PAGE_INTRO: &str = "Browse and download files by category:";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
