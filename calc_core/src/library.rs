//! # Calculation Library
//!
//! A calculation root directory together with the registry of modules that
//! can run the calculations found under it. This is the surface the HTTP
//! layer talks to: list the catalog, fetch a UI configuration, resolve a
//! `category`/`calculation` pair to a ready calculator.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::library::Library;
//! use serde_json::json;
//!
//! let library = Library::new("calculations");
//! for category in library.catalog() {
//!     println!("{}: {} calculations", category.title, category.calculations.len());
//! }
//!
//! let calc = library.resolve("hydraulic_calculations", "liquid_height").unwrap();
//! let inputs = json!({"flow_rate_m3_per_h": 50, "hole_diameter_mm": 10,
//!                     "hole_count": 20, "discharge_coefficient": 0.62});
//! let result = calc.calculate(inputs.as_object().unwrap());
//! assert!(result.is_success());
//! ```

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::calculations::{CalculationRegistry, Calculator};
use crate::catalog::{scan_calculations, Catalog};
use crate::data::{calculation_dir, read_entry_point, read_ui_config};
use crate::errors::{CalcError, CalcResult};

/// Whether `id` names exactly one ordinary path component.
///
/// Rejects empty names, `.`/`..`, anything containing a separator, and
/// absolute or prefixed paths, so an identifier can never leave the
/// calculation root.
pub fn is_valid_identifier(id: &str) -> bool {
    if id.is_empty() || id.contains('/') || id.contains('\\') {
        return false;
    }
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[derive(Debug)]
pub struct Library {
    root: PathBuf,
    registry: CalculationRegistry,
}

impl Library {
    /// Library over `root` with the built-in modules.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_registry(root, CalculationRegistry::builtin())
    }

    pub fn with_registry(root: impl Into<PathBuf>, registry: CalculationRegistry) -> Self {
        Library {
            root: root.into(),
            registry,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &CalculationRegistry {
        &self.registry
    }

    /// Current catalog, rescanned on every call.
    pub fn catalog(&self) -> Catalog {
        scan_calculations(&self.root, &self.registry)
    }

    /// The calculation's `ui_config.json`, verbatim.
    ///
    /// `Ok(None)` for invalid identifiers or a missing file; a file that
    /// exists but does not parse is a `DataFile` error.
    pub fn ui_config(&self, category: &str, calculation: &str) -> CalcResult<Option<Value>> {
        if !is_valid_identifier(category) || !is_valid_identifier(calculation) {
            return Ok(None);
        }
        read_ui_config(&calculation_dir(&self.root, category, calculation))
    }

    /// Resolve a pair of identifiers to its calculator.
    ///
    /// Unknown or invalid identifiers, a missing or unreadable entry point
    /// and an unregistered module are all `CalculationNotFound`. Malformed
    /// `constants.json`/`formulas.json` surface as `DataFile` errors.
    pub fn resolve(&self, category: &str, calculation: &str) -> CalcResult<Arc<dyn Calculator>> {
        let not_found = || CalcError::calculation_not_found(category, calculation);

        if !is_valid_identifier(category) || !is_valid_identifier(calculation) {
            return Err(not_found());
        }
        let dir = calculation_dir(&self.root, category, calculation);

        let entry_point = match read_entry_point(&dir) {
            Ok(Some(entry_point)) => entry_point,
            Ok(None) => return Err(not_found()),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "unreadable entry point");
                return Err(not_found());
            }
        };
        if !self.registry.contains(&entry_point.module) {
            return Err(not_found());
        }

        self.registry.load(&entry_point.module, &dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_validation() {
        assert!(is_valid_identifier("liquid_height"));
        assert!(is_valid_identifier("with.dot"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("."));
        assert!(!is_valid_identifier(".."));
        assert!(!is_valid_identifier("a/b"));
        assert!(!is_valid_identifier("a\\b"));
        assert!(!is_valid_identifier("/etc"));
    }

    #[test]
    fn test_traversal_is_not_found() {
        let library = Library::new("calculations");
        let err = library.resolve("..", "secrets").err().unwrap();
        assert_eq!(err.error_code(), "CALCULATION_NOT_FOUND");
        assert_eq!(library.ui_config("../..", "etc").unwrap(), None);
    }
}
