//! # Wall Thickness Under Internal Pressure
//!
//! Required wall thickness of a cylindrical shell from its inside diameter,
//! design pressure and the allowable stress of the selected material grade
//! at design temperature.
//!
//! ## Design Checks
//!
//! - Allowable stress is interpolated linearly in the grade's table; design
//!   temperatures outside the table are rejected, not extrapolated
//! - The thin-wall formula requires 2·σ·φ > p
//! - Corrosion allowance is added on top of the calculated thickness
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "diameter_mm": 1000,
//!   "pressure_mpa": 1.0,
//!   "material": "Carbon Steel",
//!   "grade": "SA-516 Gr.60",
//!   "temperature_c": 20,
//!   "weld_coefficient": 1.0,
//!   "corrosion_allowance_mm": 3
//! }
//! ```

use crate::data::{FormulasTable, ModuleData, CONSTANTS_FILE};
use crate::equations::registry::{formulas_table, Equation};
use crate::equations::{allowable_pressure, required_thickness};
use crate::errors::{CalcError, CalcResult};
use crate::inputs::Inputs;
use crate::materials::{default_allowable_stress, AllowableStressTable, StressCurve};
use crate::units::{Celsius, Millimeters};

use super::{Calculation, Computed};

pub const MAX_DIAMETER_MM: f64 = 5000.0;
pub const MAX_PRESSURE_MPA: f64 = 100.0;

/// Validated inputs with the selected stress curve resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct WallThicknessInput {
    /// Inside diameter
    pub diameter: Millimeters,
    /// Design pressure (MPa)
    pub pressure_mpa: f64,
    pub material: String,
    pub grade: String,
    pub temperature: Celsius,
    pub weld_coefficient: f64,
    pub corrosion_allowance: Millimeters,
    /// Allowable stress at design temperature (MPa)
    pub allowable_stress_mpa: f64,
}

#[derive(Debug, Clone)]
pub struct WallThickness {
    stress: AllowableStressTable,
    formulas: FormulasTable,
}

impl WallThickness {
    pub fn from_data(data: &ModuleData) -> CalcResult<Self> {
        let stress = data
            .constants
            .table::<AllowableStressTable>("allowable_stress")?
            .unwrap_or_else(default_allowable_stress);

        for (material, grades) in &stress {
            for (grade, curve) in grades {
                if !curve.is_well_formed() {
                    return Err(CalcError::data_file(
                        "parse",
                        CONSTANTS_FILE,
                        format!("allowable stress curve for {} {} is malformed", material, grade),
                    ));
                }
            }
        }

        Ok(WallThickness {
            stress,
            formulas: data.formulas_or(|| {
                formulas_table(&[
                    Equation::AllowableStress,
                    Equation::RequiredThickness,
                    Equation::TotalThickness,
                    Equation::AllowablePressure,
                ])
            }),
        })
    }

    fn curve(&self, material: &str, grade: &str) -> CalcResult<&StressCurve> {
        let grades = self
            .stress
            .get(material)
            .ok_or_else(|| CalcError::material_not_found(material, self.stress.keys()))?;
        grades.get(grade).ok_or_else(|| {
            let valid: Vec<&str> = grades.keys().map(String::as_str).collect();
            CalcError::invalid_input(
                "grade",
                grade,
                format!("Grade must be one of: {}", valid.join(", ")),
            )
        })
    }
}

impl Calculation for WallThickness {
    type Input = WallThicknessInput;

    fn name(&self) -> &'static str {
        "Wall Thickness"
    }

    fn validate(&self, inputs: &Inputs<'_>) -> CalcResult<WallThicknessInput> {
        inputs.require_all(&[
            "diameter_mm",
            "pressure_mpa",
            "material",
            "grade",
            "temperature_c",
            "weld_coefficient",
        ])?;

        let diameter = inputs.number("diameter_mm", "Diameter")?;
        let pressure = inputs.number("pressure_mpa", "Pressure")?;
        let material = inputs.text("material", "Material")?;
        let grade = inputs.text("grade", "Grade")?;
        let temperature = inputs.number("temperature_c", "Temperature")?;
        let phi = inputs.number("weld_coefficient", "Weld coefficient")?;
        let corrosion = inputs.number_or("corrosion_allowance_mm", "Corrosion allowance", 0.0)?;

        if diameter <= 0.0 || diameter > MAX_DIAMETER_MM {
            return Err(CalcError::invalid_input(
                "diameter_mm",
                diameter.to_string(),
                "Diameter must be between 0 and 5000 mm",
            ));
        }
        if pressure <= 0.0 || pressure > MAX_PRESSURE_MPA {
            return Err(CalcError::invalid_input(
                "pressure_mpa",
                pressure.to_string(),
                "Pressure must be between 0 and 100 MPa",
            ));
        }

        let curve = self.curve(&material, &grade)?;
        let sigma = curve.stress_at(temperature).ok_or_else(|| {
            let (low, high) = curve.range_c().unwrap_or((0.0, 0.0));
            CalcError::invalid_input(
                "temperature_c",
                temperature.to_string(),
                format!("Temperature must be between {} and {} °C for {}", low, high, grade),
            )
        })?;

        if phi <= 0.0 || phi > 1.0 {
            return Err(CalcError::invalid_input(
                "weld_coefficient",
                phi.to_string(),
                "Weld coefficient must be between 0 and 1",
            ));
        }
        if corrosion < 0.0 {
            return Err(CalcError::invalid_input(
                "corrosion_allowance_mm",
                corrosion.to_string(),
                "Corrosion allowance must not be negative",
            ));
        }

        Ok(WallThicknessInput {
            diameter: Millimeters(diameter),
            pressure_mpa: pressure,
            material,
            grade,
            temperature: Celsius(temperature),
            weld_coefficient: phi,
            corrosion_allowance: Millimeters(corrosion),
            allowable_stress_mpa: sigma,
        })
    }

    fn compute(&self, input: &WallThicknessInput) -> CalcResult<Computed> {
        let sigma = input.allowable_stress_mpa;
        let phi = input.weld_coefficient;
        let p = input.pressure_mpa;
        let d = input.diameter.0;

        if 2.0 * sigma * phi <= p {
            return Err(CalcError::calculation_failed(
                self.name(),
                format!(
                    "design pressure {} MPa exceeds the capacity 2·σ·φ = {} MPa of {} at {} °C",
                    p,
                    2.0 * sigma * phi,
                    input.grade,
                    input.temperature.0
                ),
            ));
        }

        let t = required_thickness(p, d, sigma, phi);
        let total = Millimeters(t) + input.corrosion_allowance;
        let outer = input.diameter + total * 2.0;
        let p_allow = allowable_pressure(t, d, sigma, phi);
        let margin = (total.0 - t) / t * 100.0;

        let mut computed = Computed::new()
            .output("allowable_stress_mpa", sigma, 2)
            .output("thickness_mm", t, 3)
            .output("total_thickness_mm", total.0, 3)
            .output("outer_diameter_mm", outer.0, 3)
            .output("allowable_pressure_mpa", p_allow, 4)
            .output("safety_margin_percent", margin, 2)
            .note(format!(
                "Allowable stress for {} {} at {} °C",
                input.material, input.grade, input.temperature.0
            ));
        if input.corrosion_allowance.0 == 0.0 {
            computed = computed.note("No corrosion allowance applied");
        }
        Ok(computed)
    }

    fn formulas(&self) -> &FormulasTable {
        &self.formulas
    }
}
