// xltemplates - app/page.rs
//
// One render cycle: establish the template root, scan it fresh, and turn
// the result into a presentation-ready view model. Nothing is cached
// between cycles; every page request rescans the filesystem.
//
// Only a root that cannot be established aborts the cycle. Scan warnings
// and per-file metadata failures become inline notices and row errors.

use crate::app::download::download_href;
use crate::core::model::{CategoryFiles, ScanResult};
use crate::core::scan::scan_directory;
use crate::platform::fs::{self as platform_fs, DirectoryStatus};
use crate::util::constants;
use crate::util::error::{BootstrapError, DownloadError};
use serde::Serialize;
use std::io;
use std::path::Path;

/// Page-level settings, passed into every render instead of living in
/// global UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    /// Browser tab title.
    pub title: String,
    /// Main heading.
    pub heading: String,
    /// Line shown above the categories.
    pub intro: String,
    /// Whether category sections start expanded.
    pub expand_sections: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: constants::DEFAULT_PAGE_TITLE.to_string(),
            heading: constants::DEFAULT_PAGE_HEADING.to_string(),
            intro: constants::DEFAULT_PAGE_INTRO.to_string(),
            expand_sections: false,
        }
    }
}

/// Severity of an inline page message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// CSS class used by the page template.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// One template row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub name: String,
    pub href: String,
    /// Human-readable size, e.g. "12.3 KB". Empty when `error` is set.
    pub size: String,
    /// Local modification time, or empty if unknown.
    pub modified: String,
    /// Inline error replacing the download action for this file only.
    pub error: Option<String>,
}

/// One collapsible category section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub label: String,
    pub file_count: usize,
    pub expanded: bool,
    pub rows: Vec<FileRow>,
}

/// Everything the page template needs for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub heading: String,
    pub intro: String,
    pub notices: Vec<Notice>,
    pub sections: Vec<SectionView>,
    pub total_files: usize,
}

impl PageView {
    /// Page shown when a render cycle has to stop: the error and nothing else.
    pub fn failed(config: &PageConfig, message: impl Into<String>) -> Self {
        Self {
            title: config.title.clone(),
            heading: config.heading.clone(),
            intro: String::new(),
            notices: vec![Notice::new(NoticeLevel::Error, message)],
            sections: Vec::new(),
            total_files: 0,
        }
    }
}

/// Run one render cycle against `root`.
///
/// # Errors
/// Returns `Err` only when `root` is missing and cannot be created (or is a
/// file). The caller must not render the listing in that case.
pub fn build_page(config: &PageConfig, root: &Path) -> Result<PageView, BootstrapError> {
    let mut notices = Vec::new();

    if platform_fs::ensure_directory(root)? == DirectoryStatus::Created {
        notices.push(Notice::new(
            NoticeLevel::Warning,
            format!("Directory '{}' not found. Creating it for you.", root.display()),
        ));
        notices.push(Notice::new(
            NoticeLevel::Success,
            format!(
                "Directory '{}' created. Please add your Excel files there.",
                root.display()
            ),
        ));
    }

    let scan = scan_directory(root);
    notices.extend(
        scan.warnings
            .iter()
            .map(|w| Notice::new(NoticeLevel::Warning, w.clone())),
    );

    if scan.is_empty() {
        notices.push(Notice::new(
            NoticeLevel::Info,
            "No Excel templates found yet. Add .xlsx or .xls files to the template folder.",
        ));
    }

    let sections = scan
        .sorted()
        .into_iter()
        .map(|bucket| section_view(root, bucket, config.expand_sections))
        .collect();

    Ok(PageView {
        title: config.title.clone(),
        heading: config.heading.clone(),
        intro: config.intro.clone(),
        notices,
        sections,
        total_files: scan.total_files(),
    })
}

/// JSON shape served by the listing API.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing<'a> {
    #[serde(flatten)]
    pub files: &'a CategoryFiles,
    pub label: &'a str,
}

/// Establish `root` and scan it, for callers that want the raw result.
pub fn scan_root(root: &Path) -> Result<ScanResult, BootstrapError> {
    platform_fs::ensure_directory(root)?;
    Ok(scan_directory(root))
}

/// The scan result in presentation order, for the JSON API.
pub fn listing(scan: &ScanResult) -> Vec<CategoryListing<'_>> {
    scan.sorted()
        .into_iter()
        .map(|files| CategoryListing {
            files,
            label: files.category.label(),
        })
        .collect()
}

fn section_view(root: &Path, bucket: &CategoryFiles, expanded: bool) -> SectionView {
    let rows = bucket
        .files
        .iter()
        .map(|name| {
            let path = bucket.category.file_path(root, name);
            let href = download_href(&bucket.category, name);
            match platform_fs::file_details(&path) {
                Ok(details) => FileRow {
                    name: name.clone(),
                    href,
                    size: format_size(details.size),
                    modified: details
                        .modified
                        .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default(),
                    error: None,
                },
                Err(source) => {
                    let relative = bucket.category.relative_path(name);
                    let err = match source.kind() {
                        io::ErrorKind::NotFound => DownloadError::NotFound { path: relative },
                        _ => DownloadError::Io {
                            path: relative,
                            source,
                        },
                    };
                    tracing::warn!(file = %path.display(), error = %err, "Template unavailable");
                    FileRow {
                        name: name.clone(),
                        href,
                        size: String::new(),
                        modified: String::new(),
                        error: Some(format!("Error: {err}.")),
                    }
                }
            }
        })
        .collect();

    SectionView {
        label: bucket.category.label().to_string(),
        file_count: bucket.files.len(),
        expanded,
        rows,
    }
}

/// Format a byte count with binary units, one decimal above bytes.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
