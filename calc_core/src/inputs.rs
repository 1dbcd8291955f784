//! # Calculation Inputs
//!
//! Typed access to the loosely-typed JSON input map a client submits. Every
//! accessor returns a [`CalcResult`], so a calculator's `validate` step reads
//! as a straight sequence of `?`-propagated lookups and stops at the first
//! problem.
//!
//! ## Conversion Rules
//!
//! - Absent fields and JSON `null` are treated as missing.
//! - Numbers accept JSON numbers or strings containing a number.
//! - Whole numbers (counts) reject values with a fractional part.
//! - Text accepts JSON strings, and numbers rendered as text.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::inputs::Inputs;
//! use serde_json::json;
//!
//! let raw = json!({"hole_count": 20, "flow_rate_m3_per_h": "50"});
//! let inputs = Inputs::new(raw.as_object().unwrap());
//!
//! assert_eq!(inputs.number("flow_rate_m3_per_h", "Flow rate").unwrap(), 50.0);
//! assert_eq!(inputs.whole_number("hole_count", "Number of holes").unwrap(), 20);
//! assert!(inputs.number("length", "Length").is_err());
//! ```

use serde_json::{Map, Value};

use crate::errors::{CalcError, CalcResult};

/// Borrowed view over a request's `inputs` object.
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Inputs<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Inputs { map }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        match self.map.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn require(&self, field: &str) -> CalcResult<&'a Value> {
        self.present(field).ok_or_else(|| CalcError::missing_field(field))
    }

    /// Check that every field in `fields` is present, in order, before any
    /// conversion happens.
    pub fn require_all(&self, fields: &[&str]) -> CalcResult<()> {
        for field in fields {
            self.require(field)?;
        }
        Ok(())
    }

    /// Required floating-point field.
    pub fn number(&self, field: &str, label: &str) -> CalcResult<f64> {
        let value = self.require(field)?;
        to_number(field, label, value)
    }

    /// Optional floating-point field, `default` when missing.
    pub fn number_or(&self, field: &str, label: &str, default: f64) -> CalcResult<f64> {
        match self.present(field) {
            Some(value) => to_number(field, label, value),
            None => Ok(default),
        }
    }

    /// Required non-negative integer field (counts, quantities of items).
    pub fn whole_number(&self, field: &str, label: &str) -> CalcResult<u64> {
        let value = self.require(field)?;
        let number = to_number(field, label, value)?;
        if number.fract() != 0.0 || number < 0.0 || number > u32::MAX as f64 {
            return Err(CalcError::invalid_input(
                field,
                render(value),
                format!("{} must be a whole number", label),
            ));
        }
        Ok(number as u64)
    }

    /// Required text field (material names, fluid names, grades).
    pub fn text(&self, field: &str, label: &str) -> CalcResult<String> {
        let value = self.require(field)?;
        to_text(field, label, value)
    }

    /// Optional text field, `default` when missing.
    pub fn text_or(&self, field: &str, label: &str, default: &str) -> CalcResult<String> {
        match self.present(field) {
            Some(value) => to_text(field, label, value),
            None => Ok(default.to_string()),
        }
    }
}

fn to_number(field: &str, label: &str, value: &Value) -> CalcResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(CalcError::invalid_input(
            field,
            render(value),
            format!("{} must be a number", label),
        )),
    }
}

fn to_text(field: &str, label: &str, value: &Value) -> CalcResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(CalcError::invalid_input(
            field,
            render(other),
            format!("{} must be text", label),
        )),
    }
}

/// Render a JSON value for an error message without quoting plain strings.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_and_null_fields() {
        let raw = map(json!({"length": null}));
        let inputs = Inputs::new(&raw);
        assert_eq!(
            inputs.number("length", "Length").unwrap_err(),
            CalcError::missing_field("length")
        );
        assert_eq!(
            inputs.number("quantity", "Quantity").unwrap_err(),
            CalcError::missing_field("quantity")
        );
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let raw = map(json!({"d": " 12.5 ", "n": "3"}));
        let inputs = Inputs::new(&raw);
        assert_eq!(inputs.number("d", "Diameter").unwrap(), 12.5);
        assert_eq!(inputs.whole_number("n", "Count").unwrap(), 3);
    }

    #[test]
    fn test_non_numeric_values_fail_validation() {
        let raw = map(json!({"d": "abc", "b": true, "nan": "NaN"}));
        let inputs = Inputs::new(&raw);
        let err = inputs.number("d", "Diameter").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input for 'd': abc - Diameter must be a number");
        assert!(inputs.number("b", "Flag").is_err());
        assert!(inputs.number("nan", "Value").is_err());
    }

    #[test]
    fn test_whole_number_rejects_fractions() {
        let raw = map(json!({"n": 2.5, "neg": -1}));
        let inputs = Inputs::new(&raw);
        let err = inputs.whole_number("n", "Number of holes").unwrap_err();
        assert!(err.to_string().contains("Number of holes must be a whole number"));
        assert!(inputs.whole_number("neg", "Number of holes").is_err());
    }

    #[test]
    fn test_defaults() {
        let raw = map(json!({}));
        let inputs = Inputs::new(&raw);
        assert_eq!(inputs.number_or("c", "Corrosion allowance", 0.0).unwrap(), 0.0);
        assert_eq!(inputs.text_or("fluid", "Fluid", "water").unwrap(), "water");
    }

    #[test]
    fn test_text_accepts_numbers() {
        let raw = map(json!({"grade": 60, "list": [1]}));
        let inputs = Inputs::new(&raw);
        assert_eq!(inputs.text("grade", "Grade").unwrap(), "60");
        assert!(inputs.text("list", "Grade").is_err());
    }
}
