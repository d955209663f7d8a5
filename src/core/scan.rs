// xltemplates - core/scan.rs
//
// Two-level template discovery: files directly in the template root, plus
// files directly inside each immediate subdirectory. Nothing deeper is
// ever visited.
//
// Uses `walkdir` with depth pinned to 1 for every listing so the same
// entry/error handling applies to the root and to each category folder.
// Reads names and file types only, never contents.
//
// Error policy:
//   - Root missing or not a directory: empty result, no warning.
//   - Root cannot be listed: empty result plus one warning.
//   - A category folder cannot be listed: that folder is left out, warning.
//   - A single unreadable entry: that entry is skipped, warning.

use crate::core::model::{Category, CategoryFiles, ScanResult};
use crate::util::constants;
use crate::util::error::ScanError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Scan `root` and group qualifying files by category.
///
/// The root bucket (if non-empty) comes first, followed by one bucket per
/// subdirectory in listing order. Empty buckets are omitted. Files keep the
/// order the filesystem listed them in.
pub fn scan_directory(root: &Path) -> ScanResult {
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "Template root is not a directory; nothing to scan");
        return ScanResult::default();
    }
    scan_listed_root(root)
}

/// Scan a root already known to be a directory. A root that then fails to
/// list yields an empty result and one warning.
fn scan_listed_root(root: &Path) -> ScanResult {
    let mut result = ScanResult::default();

    let Some(entries) = list_dir(root, &mut result.warnings) else {
        return result;
    };

    let mut root_files: Vec<String> = Vec::new();
    let mut subdirs: Vec<(String, PathBuf)> = Vec::new();

    for entry in entries {
        let file_type = entry.file_type();
        if file_type.is_file() {
            if let Some(name) = qualifying_name(&entry, &mut result.warnings) {
                root_files.push(name);
            }
        } else if file_type.is_dir() {
            match entry.file_name().to_str() {
                Some(name) => subdirs.push((name.to_string(), entry.path().to_path_buf())),
                None => push_warning(
                    &mut result.warnings,
                    ScanError::NonUtf8Name {
                        path: entry.path().to_path_buf(),
                    },
                ),
            }
        }
    }

    if !root_files.is_empty() {
        result.categories.push(CategoryFiles {
            category: Category::Root,
            files: root_files,
        });
    }

    for (name, path) in subdirs {
        let Some(sub_entries) = list_dir(&path, &mut result.warnings) else {
            continue;
        };

        let files: Vec<String> = sub_entries
            .iter()
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| qualifying_name(e, &mut result.warnings))
            .collect();

        if files.is_empty() {
            tracing::trace!(dir = %path.display(), "No templates in folder; omitted");
            continue;
        }

        result.categories.push(CategoryFiles {
            category: Category::Named(name),
            files,
        });
    }

    tracing::debug!(
        root = %root.display(),
        categories = result.categories.len(),
        files = result.total_files(),
        warnings = result.warnings.len(),
        "Scan complete"
    );

    result
}

/// True if `path` has an allowed extension, compared case-insensitively.
/// Names without an extension (including dotfiles like `.xlsx`) never qualify.
pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            constants::ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// List the immediate children of `dir`.
///
/// Returns `None` if the directory itself cannot be read. Entries that fail
/// individually are skipped and reported.
fn list_dir(dir: &Path, warnings: &mut Vec<String>) -> Option<Vec<DirEntry>> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    let mut entries = Vec::new();
    for entry_result in walker {
        match entry_result {
            Ok(entry) => entries.push(entry),
            // Depth 0 means the failure belongs to `dir` itself.
            Err(e) if e.depth() == 0 => {
                push_warning(
                    warnings,
                    ScanError::ListDirectory {
                        path: dir.to_path_buf(),
                        source: e,
                    },
                );
                return None;
            }
            Err(e) => {
                let path = e.path().map(Path::to_path_buf);
                push_warning(warnings, ScanError::Entry { path, source: e });
            }
        }
    }
    Some(entries)
}

/// The entry's file name if it is an allowed template, else `None`.
fn qualifying_name(entry: &DirEntry, warnings: &mut Vec<String>) -> Option<String> {
    if !has_allowed_extension(entry.path()) {
        return None;
    }
    match entry.file_name().to_str() {
        Some(name) => Some(name.to_string()),
        None => {
            push_warning(
                warnings,
                ScanError::NonUtf8Name {
                    path: entry.path().to_path_buf(),
                },
            );
            None
        }
    }
}

fn push_warning(warnings: &mut Vec<String>, error: ScanError) {
    let msg = error.to_string();
    tracing::warn!(warning = %msg, "Scan warning");
    warnings.push(msg);
}

// =============================================================================
// Tests
// =============================================================================
