//! # Calculation Catalog
//!
//! Discovers the calculations available under a calculation root:
//!
//! ```text
//! calculations/
//!   hydraulic_calculations/         category
//!     liquid_height/                calculation
//!       calculation.json            {"module": "liquid_height"}
//!       ui_config.json              optional, title/description/input_form
//!       constants.json              optional
//!       formulas.json               optional
//! ```
//!
//! A calculation directory is listed only if its entry point parses and
//! names a module the registry knows. Everything else (stray files,
//! non-UTF-8 names, unreadable directories, malformed entry points) is
//! skipped, so one broken directory never hides the rest of the tree.
//! Scanning is deterministic: both levels are sorted by directory name.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculations::CalculationRegistry;
use crate::data::{read_entry_point, read_ui_config};

/// One discoverable calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationEntry {
    /// Directory name, unique within its category
    pub id: String,
    pub title: String,
    pub description: String,
    /// `<category>/<calculation>`, always `/`-separated
    pub path: String,
}

/// One category and its calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    pub title: String,
    pub calculations: Vec<CalculationEntry>,
}

/// Ordered list of categories
pub type Catalog = Vec<CategoryEntry>;

/// Display title derived from a directory name (`liquid_height` -> `liquid height`).
pub fn default_title(dir_name: &str) -> String {
    dir_name.replace('_', " ")
}

/// Sorted UTF-8 names of the subdirectories of `dir`.
///
/// Unreadable directories yield an empty list and a warning.
fn subdirectories(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if dir.exists() {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            }
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| match entry.file_name().into_string() {
            Ok(name) => Some(name),
            Err(raw) => {
                tracing::warn!(name = ?raw, "skipping directory with non UTF-8 name");
                None
            }
        })
        .collect();
    names.sort();
    names
}

fn calculation_entry(
    dir: &Path,
    category: &str,
    calculation: &str,
    registry: &CalculationRegistry,
) -> Option<CalculationEntry> {
    let entry_point = match read_entry_point(dir) {
        Ok(Some(entry_point)) => entry_point,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "skipping calculation with unreadable entry point");
            return None;
        }
    };
    if !registry.contains(&entry_point.module) {
        tracing::warn!(
            path = %dir.display(),
            module = %entry_point.module,
            "skipping calculation with unregistered module"
        );
        return None;
    }

    let mut entry = CalculationEntry {
        id: calculation.to_string(),
        title: default_title(calculation),
        description: String::new(),
        path: format!("{}/{}", category, calculation),
    };

    match read_ui_config(dir) {
        Ok(Some(Value::Object(config))) => {
            if let Some(Value::String(title)) = config.get("title") {
                entry.title = title.clone();
            }
            if let Some(Value::String(description)) = config.get("description") {
                entry.description = description.clone();
            }
        }
        Ok(Some(_)) => {
            tracing::warn!(path = %dir.display(), "ui_config.json is not an object, using defaults");
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "malformed ui_config.json, using defaults");
        }
    }

    Some(entry)
}

/// Scan `root` into a catalog. A missing root yields an empty catalog.
pub fn scan_calculations(root: &Path, registry: &CalculationRegistry) -> Catalog {
    subdirectories(root)
        .into_iter()
        .map(|category| {
            let category_dir = root.join(&category);
            let calculations = subdirectories(&category_dir)
                .into_iter()
                .filter_map(|calculation| {
                    calculation_entry(&category_dir.join(&calculation), &category, &calculation, registry)
                })
                .collect();
            CategoryEntry {
                title: default_title(&category),
                id: category,
                calculations,
            }
        })
        .collect()
}
