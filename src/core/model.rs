// xltemplates - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.

use crate::util::constants;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// Category
// =============================================================================

/// Grouping key for template files.
///
/// `Root` is the template directory itself. `Named` is one of its immediate
/// subdirectories. A folder that happens to be called "Root" is
/// `Named("Root")`; the two never merge.
///
/// The derived `Ord` is the presentation order: `Root` first, then folder
/// names in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Root,
    Named(String),
}

impl Category {
    /// Human-readable section label.
    pub fn label(&self) -> &str {
        match self {
            Self::Root => constants::ROOT_CATEGORY_LABEL,
            Self::Named(name) => name,
        }
    }

    /// Folder name as it appears in download requests; `None` for the root.
    pub fn dir_name(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Named(name) => Some(name),
        }
    }

    /// Build from an optional request parameter (absent means root).
    pub fn from_dir_name(name: Option<&str>) -> Self {
        match name {
            None => Self::Root,
            Some(n) => Self::Named(n.to_string()),
        }
    }

    /// Full path of `file_name` inside this category under `root`.
    pub fn file_path(&self, root: &Path, file_name: &str) -> PathBuf {
        match self {
            Self::Root => root.join(file_name),
            Self::Named(dir) => root.join(dir).join(file_name),
        }
    }

    /// Path of `file_name` relative to the template root, for messages.
    pub fn relative_path(&self, file_name: &str) -> PathBuf {
        match self {
            Self::Root => PathBuf::from(file_name),
            Self::Named(dir) => Path::new(dir).join(file_name),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    /// Serialised as the folder name, or `null` for the root.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.dir_name(), serializer)
    }
}

// =============================================================================
// Scan result
// =============================================================================

/// Files of one category, in filesystem listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFiles {
    pub category: Category,
    pub files: Vec<String>,
}

/// Output of one scan of the template tree.
///
/// Categories appear in the order they were found (root first, then
/// subdirectories in listing order). Every category holds at least one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub categories: Vec<CategoryFiles>,

    /// Non-fatal problems met while scanning, in the order they occurred.
    pub warnings: Vec<String>,
}

impl ScanResult {
    /// Files for `category`, if it has any.
    pub fn get(&self, category: &Category) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| &c.category == category)
            .map(|c| c.files.as_slice())
    }

    /// True when no qualifying file was found anywhere.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of files across all categories.
    pub fn total_files(&self) -> usize {
        self.categories.iter().map(|c| c.files.len()).sum()
    }

    /// Categories in presentation order: root first, then alphabetical.
    /// Files keep their listing order.
    pub fn sorted(&self) -> Vec<&CategoryFiles> {
        let mut sorted: Vec<&CategoryFiles> = self.categories.iter().collect();
        sorted.sort_by(|a, b| a.category.cmp(&b.category));
        sorted
    }
}
