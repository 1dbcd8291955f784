//! # Error Types
//!
//! Structured error types for calc_core. A calculation never panics on bad
//! input; every failure is one of these variants, and its `Display` text is
//! what ends up in the `error` field of a failed calculation result.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_flow(flow_m3_per_h: f64) -> CalcResult<()> {
//!     if flow_m3_per_h <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "flow_rate_m3_per_h",
//!             flow_m3_per_h.to_string(),
//!             "Flow rate must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_flow(-1.0).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Invalid input for 'flow_rate_m3_per_h': -1 - Flow rate must be positive"
//! );
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material (or grade) not present in the module's tables
    #[error("Material not found: '{material_name}' - Material must be one of: {valid}")]
    MaterialNotFound { material_name: String, valid: String },

    /// Calculation failed (non-physical result, division by zero, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// No calculation module resolves for a category/calculation pair
    #[error("Calculation not found: {category}/{calculation}")]
    CalculationNotFound {
        category: String,
        calculation: String,
    },

    /// A calculation data file exists but could not be read or parsed
    #[error("Data file error: {operation} on '{path}' - {reason}")]
    DataFile {
        operation: String,
        path: String,
        reason: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error listing the valid names in sorted order
    pub fn material_not_found<I, S>(material_name: impl Into<String>, valid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = valid.into_iter().map(|s| s.as_ref().to_string()).collect();
        names.sort();
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
            valid: names.join(", "),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a CalculationNotFound error
    pub fn calculation_not_found(category: impl Into<String>, calculation: impl Into<String>) -> Self {
        CalcError::CalculationNotFound {
            category: category.into(),
            calculation: calculation.into(),
        }
    }

    /// Create a DataFile error
    pub fn data_file(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DataFile {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::CalculationNotFound { .. } => "CALCULATION_NOT_FOUND",
            CalcError::DataFile { .. } => "DATA_FILE_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
