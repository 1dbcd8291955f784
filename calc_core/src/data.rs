//! # Calculation Data Files
//!
//! Reads the JSON files that live next to each calculation:
//!
//! ```text
//! calculations/<category>/<calculation>/
//! ├── calculation.json   entry point: {"module": "<registered id>"}
//! ├── ui_config.json     optional display metadata (returned verbatim)
//! ├── constants.json     optional constants and material tables
//! ├── formulas.json      optional formula text shown with results
//! └── test_cases.json    optional cases for the test harness
//! ```
//!
//! Data is read once per module instance and handed to the module's
//! constructor as a [`ModuleData`]; modules never touch the filesystem.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::data::ConstantsTable;
//!
//! let table: ConstantsTable = serde_json::from_str(
//!     r#"{"constants": {"g_m_per_s2": 9.81}, "materials": {"Copper": {"density_kg_per_m3": 8960}}}"#,
//! ).unwrap();
//!
//! assert_eq!(table.constant_or("g_m_per_s2", 9.80665), 9.81);
//! assert_eq!(table.constant_or("pi", std::f64::consts::PI), std::f64::consts::PI);
//! assert!(table.has_table("materials"));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CalcError, CalcResult};

/// Entry-point file that marks a directory as an invocable calculation
pub const ENTRY_POINT_FILE: &str = "calculation.json";
/// Optional UI metadata file
pub const UI_CONFIG_FILE: &str = "ui_config.json";
/// Optional constants/material data file
pub const CONSTANTS_FILE: &str = "constants.json";
/// Optional formula text file
pub const FORMULAS_FILE: &str = "formulas.json";
/// Optional test case file (test harness only)
pub const TEST_CASES_FILE: &str = "test_cases.json";

/// Formula name to human-readable formula text.
pub type FormulasTable = BTreeMap<String, String>;

/// Contents of `calculation.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Identifier of a module registered in the calculation registry
    pub module: String,
}

/// Named constants plus arbitrary named tables from `constants.json`.
///
/// The `constants` object holds plain numbers; every other top-level key is
/// a table the owning module deserializes into its own record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantsTable {
    #[serde(default)]
    pub constants: BTreeMap<String, f64>,

    #[serde(flatten)]
    pub tables: BTreeMap<String, Value>,
}

impl ConstantsTable {
    /// Look up a named constant, falling back to `default`.
    pub fn constant_or(&self, name: &str, default: f64) -> f64 {
        self.constants.get(name).copied().unwrap_or(default)
    }

    /// Whether a named table is present.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Deserialize a named table into `T`, or `None` if absent.
    pub fn table<T: DeserializeOwned>(&self, name: &str) -> CalcResult<Option<T>> {
        match self.tables.get(name) {
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|e| CalcError::data_file("parse table", name, e.to_string())),
            None => Ok(None),
        }
    }
}

/// Everything a module constructor receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleData {
    pub constants: ConstantsTable,
    /// `None` when the directory carries no `formulas.json`
    pub formulas: Option<FormulasTable>,
}

impl ModuleData {
    /// Read `constants.json` and `formulas.json` from a calculation directory.
    pub fn load(dir: &Path) -> CalcResult<Self> {
        let constants = read_json_optional(&dir.join(CONSTANTS_FILE))?.unwrap_or_default();
        let formulas = read_json_optional(&dir.join(FORMULAS_FILE))?;
        Ok(ModuleData { constants, formulas })
    }

    /// The directory's formulas, or the module's built-in table.
    pub fn formulas_or(&self, builtin: impl FnOnce() -> FormulasTable) -> FormulasTable {
        self.formulas.clone().unwrap_or_else(builtin)
    }
}

/// Read and parse a JSON file, returning `None` if it does not exist.
pub fn read_json_optional<T: DeserializeOwned>(path: &Path) -> CalcResult<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CalcError::data_file("read", path.display().to_string(), e.to_string()));
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| CalcError::data_file("parse", path.display().to_string(), e.to_string()))
}

/// Read a calculation's entry point, `None` if the file is absent.
pub fn read_entry_point(dir: &Path) -> CalcResult<Option<EntryPoint>> {
    read_json_optional(&dir.join(ENTRY_POINT_FILE))
}

/// Read a calculation's UI configuration verbatim, `None` if absent.
pub fn read_ui_config(dir: &Path) -> CalcResult<Option<Value>> {
    read_json_optional(&dir.join(UI_CONFIG_FILE))
}

/// Path of a calculation directory under the calculation root.
pub fn calculation_dir(root: &Path, category: &str, calculation: &str) -> PathBuf {
    root.join(category).join(calculation)
}
