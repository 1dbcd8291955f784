//! # Formula Calculations
//!
//! Each calculator follows the same pattern:
//!
//! - `*Input` - validated, typed inputs
//! - a struct holding the constants injected from the calculation directory,
//!   built by `from_data(&ModuleData)`
//! - an implementation of [`Calculation`]: `validate` the raw input map into
//!   `*Input`, then `compute` the rounded outputs and notes
//!
//! The blanket [`Calculator`] impl turns any [`Calculation`] into the
//! `calculate(inputs) -> CalculationResult` contract the dispatch layer uses.
//!
//! ## Available Calculations
//!
//! - [`liquid_height`] - Liquid head over a perforated plate
//! - [`pipe_mass`] - Mass of a batch of pipes
//! - [`pipe_flow_resistance`] - Darcy-Weisbach pressure drop
//! - [`wall_thickness`] - Shell thickness under internal pressure
//! - [`pipe_velocity`] - Velocity across standard nominal diameters
//! - [`gas_calorific_value`] - Heating value of a natural gas mixture

pub mod gas_calorific_value;
pub mod liquid_height;
pub mod pipe_flow_resistance;
pub mod pipe_mass;
pub mod pipe_velocity;
pub mod registry;
pub mod wall_thickness;

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::FormulasTable;
use crate::errors::CalcResult;
use crate::inputs::Inputs;
use crate::numeric::{ensure_finite, round_to};

pub use registry::CalculationRegistry;

/// Named numeric outputs
pub type Outputs = BTreeMap<String, f64>;

/// Outputs and notes produced by a `compute` step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Computed {
    pub outputs: Outputs,
    pub notes: Vec<String>,
}

impl Computed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an output rounded to `decimals` places.
    pub fn output(mut self, name: impl Into<String>, value: f64, decimals: u32) -> Self {
        self.outputs.insert(name.into(), round_to(value, decimals));
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Validation and computation for one formula.
pub trait Calculation: Send + Sync {
    /// Validated, typed inputs
    type Input;

    /// Display name used in calculation failure messages
    fn name(&self) -> &'static str;

    /// Check required fields, convert types, apply range checks.
    /// Stops at the first violation.
    fn validate(&self, inputs: &Inputs<'_>) -> CalcResult<Self::Input>;

    /// Apply the formulas to validated inputs.
    fn compute(&self, input: &Self::Input) -> CalcResult<Computed>;

    /// Formula text returned with every successful result
    fn formulas(&self) -> &FormulasTable;
}

/// Object-safe entry point the registry hands to the dispatch layer.
pub trait Calculator: Send + Sync {
    fn calculate(&self, inputs: &Map<String, Value>) -> CalculationResult;
}

impl<C: Calculation> Calculator for C {
    fn calculate(&self, inputs: &Map<String, Value>) -> CalculationResult {
        let view = Inputs::new(inputs);
        let computed = self.validate(&view).and_then(|input| self.compute(&input)).and_then(|computed| {
            for (name, value) in &computed.outputs {
                ensure_finite(*value, self.name(), name)?;
            }
            Ok(computed)
        });

        match computed {
            Ok(computed) => CalculationResult::Success(CalculationSuccess {
                inputs: inputs.clone(),
                outputs: computed.outputs,
                formulas: self.formulas().clone(),
                notes: computed.notes,
            }),
            Err(e) => CalculationResult::failure(e.to_string()),
        }
    }
}

/// Payload of a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSuccess {
    /// The request's input map, echoed unmodified
    pub inputs: Map<String, Value>,
    pub outputs: Outputs,
    pub formulas: FormulasTable,
    pub notes: Vec<String>,
}

/// Outcome of one invocation.
///
/// ## JSON
///
/// ```json
/// {"success": true, "inputs": {...}, "outputs": {...}, "formulas": {...}, "notes": [...]}
/// {"success": false, "error": "Missing required field: length"}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationResult {
    Success(CalculationSuccess),
    Failure { error: String },
}

impl CalculationResult {
    pub fn failure(error: impl Into<String>) -> Self {
        CalculationResult::Failure { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success(_))
    }

    pub fn outputs(&self) -> Option<&Outputs> {
        match self {
            CalculationResult::Success(s) => Some(&s.outputs),
            CalculationResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CalculationResult::Success(_) => None,
            CalculationResult::Failure { error } => Some(error),
        }
    }
}

impl Serialize for CalculationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CalculationResult::Success(s) => {
                let mut map = serializer.serialize_map(Some(5))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("inputs", &s.inputs)?;
                map.serialize_entry("outputs", &s.outputs)?;
                map.serialize_entry("formulas", &s.formulas)?;
                map.serialize_entry("notes", &s.notes)?;
                map.end()
            }
            CalculationResult::Failure { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for CalculationResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let success = map
            .remove("success")
            .and_then(|v| v.as_bool())
            .ok_or_else(|| de::Error::missing_field("success"))?;

        if success {
            CalculationSuccess::deserialize(Value::Object(map))
                .map(CalculationResult::Success)
                .map_err(de::Error::custom)
        } else {
            let error = map
                .remove("error")
                .and_then(|v| v.as_str().map(str::to_string))
                .ok_or_else(|| de::Error::missing_field("error"))?;
            Ok(CalculationResult::Failure { error })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use serde_json::json;

    struct Doubler {
        formulas: FormulasTable,
    }

    impl Calculation for Doubler {
        type Input = f64;

        fn name(&self) -> &'static str {
            "Doubler"
        }

        fn validate(&self, inputs: &Inputs<'_>) -> CalcResult<f64> {
            let x = inputs.number("x", "X")?;
            if x < 0.0 {
                return Err(CalcError::invalid_input("x", x.to_string(), "X must not be negative"));
            }
            Ok(x)
        }

        fn compute(&self, x: &f64) -> CalcResult<Computed> {
            Ok(Computed::new()
                .output("double", x * 2.0, 2)
                .output("inverse", 1.0 / x, 3)
                .note("doubled"))
        }

        fn formulas(&self) -> &FormulasTable {
            &self.formulas
        }
    }

    fn doubler() -> Doubler {
        Doubler {
            formulas: FormulasTable::from([("double".to_string(), "y = 2x".to_string())]),
        }
    }

    #[test]
    fn test_success_shape() {
        let inputs = json!({"x": 1.234, "extra": "kept"});
        let result = doubler().calculate(inputs.as_object().unwrap());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["inputs"], inputs);
        assert_eq!(json["outputs"]["double"], 2.47);
        assert_eq!(json["formulas"]["double"], "y = 2x");
        assert_eq!(json["notes"][0], "doubled");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_shape() {
        let inputs = json!({"x": -1});
        let result = doubler().calculate(inputs.as_object().unwrap());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({"success": false, "error": "Invalid input for 'x': -1 - X must not be negative"})
        );
    }

    #[test]
    fn test_non_finite_outputs_become_failures() {
        let inputs = json!({"x": 0});
        let result = doubler().calculate(inputs.as_object().unwrap());
        assert!(!result.is_success());
        assert!(result.error().unwrap().contains("inverse is not a finite number"));
    }

    #[test]
    fn test_result_roundtrip() {
        let inputs = json!({"x": 3});
        let result = doubler().calculate(inputs.as_object().unwrap());
        let text = serde_json::to_string(&result).unwrap();
        let back: CalculationResult = serde_json::from_str(&text).unwrap();
        assert_eq!(result, back);

        let failure: CalculationResult =
            serde_json::from_str(r#"{"success": false, "error": "boom"}"#).unwrap();
        assert_eq!(failure.error(), Some("boom"));
        assert!(serde_json::from_str::<CalculationResult>(r#"{"error": "boom"}"#).is_err());
    }
}
