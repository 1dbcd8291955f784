//! # calc_core - Engineering Formula Calculation Engine
//!
//! `calc_core` holds the engineering calculators behind the formula server:
//! hydraulic, technological, stress and thermal formulas, each validating a
//! JSON map of named inputs and returning a JSON-serializable result.
//!
//! ## Design Philosophy
//!
//! - **Data-driven**: Constants, material tables and formula text live in
//!   each calculation directory and are injected into the calculator
//! - **JSON-First**: Inputs, results and catalog types serialize directly
//! - **Rich Errors**: Structured error types, rendered into one message per
//!   failed calculation
//! - **Explicit registry**: Every module id maps to a constructor in one
//!   static table
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::pipe_mass::PipeMass;
//! use calc_core::calculations::Calculator;
//! use calc_core::data::ModuleData;
//! use serde_json::json;
//!
//! let calc = PipeMass::from_data(&ModuleData::default()).unwrap();
//! let inputs = json!({
//!     "outer_diameter": 273,
//!     "wall_thickness": 10,
//!     "length": 6,
//!     "quantity": 100,
//!     "material": "Carbon Steel"
//! });
//!
//! let result = calc.calculate(inputs.as_object().unwrap());
//! assert_eq!(result.outputs().unwrap()["inner_diameter_mm"], 253.0);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Calculators, result types and the module registry
//! - [`catalog`] - Discovery of the calculation directory tree
//! - [`library`] - Calculation root plus registry, the server-facing API
//! - [`data`] - Per-directory data files (`constants.json`, `formulas.json`, ...)
//! - [`equations`] - Shared closed-form formulas
//! - [`materials`] - Built-in material and property tables
//! - [`inputs`] - Typed access to raw JSON inputs
//! - [`units`] - Type-safe unit wrappers
//! - [`numeric`] - Rounding policy
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod data;
pub mod equations;
pub mod errors;
pub mod inputs;
pub mod library;
pub mod materials;
pub mod numeric;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationRegistry, CalculationResult, Calculator};
pub use catalog::{CalculationEntry, Catalog, CategoryEntry};
pub use errors::{CalcError, CalcResult};
pub use library::Library;
