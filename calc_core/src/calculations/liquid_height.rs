//! # Liquid Height Calculation
//!
//! Liquid head that builds up over a perforated plate (or a distributor with
//! n identical holes) for a given flow rate.
//!
//! ## Assumptions
//!
//! - Free discharge through sharp-edged holes
//! - Uniform distribution of flow across all holes
//! - Standard Earth gravity unless `g_m_per_s2` is overridden
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::liquid_height::LiquidHeight;
//! use calc_core::calculations::Calculator;
//! use calc_core::data::ModuleData;
//! use serde_json::json;
//!
//! let calc = LiquidHeight::from_data(&ModuleData::default()).unwrap();
//! let inputs = json!({
//!     "flow_rate_m3_per_h": 50,
//!     "hole_diameter_mm": 10,
//!     "hole_count": 20,
//!     "discharge_coefficient": 0.62
//! });
//! let result = calc.calculate(inputs.as_object().unwrap());
//! let outputs = result.outputs().unwrap();
//! assert_eq!(outputs["velocity_m_per_s"], 8.8419);
//! assert_eq!(outputs["liquid_height_m"], 10.366);
//! ```

use crate::data::{FormulasTable, ModuleData};
use crate::equations::registry::{formulas_table, Equation};
use crate::equations::{circle_area, mean_velocity, orifice_head};
use crate::errors::{CalcError, CalcResult};
use crate::inputs::Inputs;
use crate::numeric::round_to;
use crate::units::{CubicMetersPerHour, CubicMetersPerSecond, Meters, Millimeters};

use super::{Calculation, Computed};

/// Largest hole diameter accepted (mm)
pub const MAX_HOLE_DIAMETER_MM: f64 = 1000.0;

/// Standard gravity used when no constant is supplied (m/s²)
pub const DEFAULT_GRAVITY: f64 = 9.81;

/// Validated inputs for the liquid height calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidHeightInput {
    pub flow_rate: CubicMetersPerHour,
    pub hole_diameter: Millimeters,
    pub hole_count: u64,
    /// Discharge coefficient μ, 0 < μ ≤ 1
    pub discharge_coefficient: f64,
}

/// Liquid height calculator with its injected constants.
#[derive(Debug, Clone)]
pub struct LiquidHeight {
    pi: f64,
    g_m_per_s2: f64,
    formulas: FormulasTable,
}

impl LiquidHeight {
    pub fn from_data(data: &ModuleData) -> CalcResult<Self> {
        Ok(LiquidHeight {
            pi: data.constants.constant_or("pi", std::f64::consts::PI),
            g_m_per_s2: data.constants.constant_or("g_m_per_s2", DEFAULT_GRAVITY),
            formulas: data.formulas_or(builtin_formulas),
        })
    }
}

fn builtin_formulas() -> FormulasTable {
    formulas_table(&[
        Equation::FlowConversion,
        Equation::HoleArea,
        Equation::OrificeVelocity,
        Equation::OrificeHead,
    ])
}

impl Calculation for LiquidHeight {
    type Input = LiquidHeightInput;

    fn name(&self) -> &'static str {
        "Liquid Height"
    }

    fn validate(&self, inputs: &Inputs<'_>) -> CalcResult<LiquidHeightInput> {
        inputs.require_all(&[
            "flow_rate_m3_per_h",
            "hole_diameter_mm",
            "hole_count",
            "discharge_coefficient",
        ])?;

        let flow = inputs.number("flow_rate_m3_per_h", "Flow rate")?;
        let diameter = inputs.number("hole_diameter_mm", "Hole diameter")?;
        let count = inputs.whole_number("hole_count", "Number of holes")?;
        let mu = inputs.number("discharge_coefficient", "Discharge coefficient")?;

        if flow <= 0.0 {
            return Err(CalcError::invalid_input(
                "flow_rate_m3_per_h",
                flow.to_string(),
                "Flow rate must be positive",
            ));
        }
        if diameter <= 0.0 || diameter >= MAX_HOLE_DIAMETER_MM {
            return Err(CalcError::invalid_input(
                "hole_diameter_mm",
                diameter.to_string(),
                "Hole diameter must be between 0 and 1000 mm",
            ));
        }
        if count == 0 {
            return Err(CalcError::invalid_input(
                "hole_count",
                count.to_string(),
                "Number of holes must be positive",
            ));
        }
        if mu <= 0.0 || mu > 1.0 {
            return Err(CalcError::invalid_input(
                "discharge_coefficient",
                mu.to_string(),
                "Discharge coefficient must be between 0 and 1",
            ));
        }

        Ok(LiquidHeightInput {
            flow_rate: CubicMetersPerHour(flow),
            hole_diameter: Millimeters(diameter),
            hole_count: count,
            discharge_coefficient: mu,
        })
    }

    fn compute(&self, input: &LiquidHeightInput) -> CalcResult<Computed> {
        let flow: CubicMetersPerSecond = input.flow_rate.into();
        let hole: Meters = input.hole_diameter.into();

        let total_area = circle_area(self.pi, hole.0) * input.hole_count as f64;
        let velocity = mean_velocity(flow.0, total_area);
        let head = orifice_head(velocity, input.discharge_coefficient, self.g_m_per_s2);
        let head_mm: Millimeters = Meters(head).into();

        Ok(Computed::new()
            .output("velocity_m_per_s", velocity, 4)
            .output("liquid_height_m", head, 4)
            .output("liquid_height_mm", head_mm.0, 2)
            .note(format!("Total discharge area: {} m²", round_to(total_area, 6)))
            .note(format!(
                "Gravity constant assumes standard Earth gravity ({} m/s²)",
                self.g_m_per_s2
            )))
    }

    fn formulas(&self) -> &FormulasTable {
        &self.formulas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::Calculator;
    use serde_json::{json, Value};

    fn calc() -> LiquidHeight {
        LiquidHeight::from_data(&ModuleData::default()).unwrap()
    }

    fn sample() -> Value {
        json!({
            "flow_rate_m3_per_h": 50,
            "hole_diameter_mm": 10,
            "hole_count": 20,
            "discharge_coefficient": 0.62
        })
    }

    fn run(inputs: Value) -> crate::calculations::CalculationResult {
        calc().calculate(inputs.as_object().unwrap())
    }

    #[test]
    fn test_sample_matches_closed_form() {
        let area = std::f64::consts::PI * 0.01_f64.powi(2) / 4.0 * 20.0;
        let velocity = (50.0 / 3600.0) / area;
        let head = (velocity / 0.62).powi(2) / (2.0 * 9.81);

        let result = run(sample());
        let outputs = result.outputs().unwrap();
        assert!((outputs["velocity_m_per_s"] - velocity).abs() < 1e-4);
        assert!((outputs["liquid_height_m"] - head).abs() < 1e-4);
        assert!((outputs["liquid_height_mm"] - head * 1000.0).abs() < 0.01);
    }

    #[test]
    fn test_notes_report_area() {
        let result = run(sample());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["notes"][0], "Total discharge area: 0.001571 m²");
    }

    #[test]
    fn test_discharge_coefficient_out_of_range() {
        let mut inputs = sample();
        inputs["discharge_coefficient"] = json!(1.5);
        let result = run(inputs);
        assert!(!result.is_success());
        assert!(result.error().unwrap().contains("Discharge coefficient must be between 0 and 1"));
    }

    #[test]
    fn test_missing_field_reported_before_type_errors() {
        let inputs = json!({
            "flow_rate_m3_per_h": "lots",
            "hole_diameter_mm": 10,
            "hole_count": 20
        });
        let result = run(inputs);
        assert_eq!(result.error(), Some("Missing required field: discharge_coefficient"));
    }

    #[test]
    fn test_non_numeric_flow() {
        let mut inputs = sample();
        inputs["flow_rate_m3_per_h"] = json!("fifty");
        let result = run(inputs);
        assert!(result.error().unwrap().contains("Flow rate must be a number"));
    }

    #[test]
    fn test_zero_holes() {
        let mut inputs = sample();
        inputs["hole_count"] = json!(0);
        let result = run(inputs);
        assert!(result.error().unwrap().contains("Number of holes must be positive"));
    }

    #[test]
    fn test_constants_are_injected() {
        let data = ModuleData {
            constants: serde_json::from_value(json!({"constants": {"g_m_per_s2": 9.81 * 2.0}})).unwrap(),
            formulas: None,
        };
        let doubled_g = LiquidHeight::from_data(&data).unwrap();
        let normal = run(sample());
        let halved = doubled_g.calculate(sample().as_object().unwrap());
        let h1 = normal.outputs().unwrap()["liquid_height_m"];
        let h2 = halved.outputs().unwrap()["liquid_height_m"];
        assert!((h1 / 2.0 - h2).abs() < 1e-3);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn in_range_inputs_always_succeed(
                flow in 0.01f64..5000.0,
                diameter in 0.5f64..999.0,
                count in 1u32..5000,
                mu in 0.05f64..=1.0,
            ) {
                let inputs = json!({
                    "flow_rate_m3_per_h": flow,
                    "hole_diameter_mm": diameter,
                    "hole_count": count,
                    "discharge_coefficient": mu
                });
                let result = run(inputs);
                let outputs = result.outputs().expect("in-range inputs should succeed");
                for key in ["velocity_m_per_s", "liquid_height_m", "liquid_height_mm"] {
                    prop_assert!(outputs.contains_key(key));
                    prop_assert!(outputs[key].is_finite());
                }
            }

            #[test]
            fn discharge_coefficient_above_one_always_fails(mu in 1.0001f64..100.0) {
                let mut inputs = sample();
                inputs["discharge_coefficient"] = json!(mu);
                let result = run(inputs);
                prop_assert!(result.error().unwrap().contains("Discharge coefficient"));
            }
        }
    }
}
