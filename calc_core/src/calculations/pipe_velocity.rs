//! # Velocity in Pipelines
//!
//! Mean velocity for one flow rate across a list of nominal pipe
//! diameters, each classified against the recommended velocity bands for
//! liquid and gas service. Used for a first pick of a line size.
//!
//! Tables read from `constants.json`:
//!
//! ```json
//! {
//!   "nominal_diameters_mm": [20, 25, 32, 40, 50],
//!   "velocity_bands": {
//!     "liquid": {"min_m_per_s": 0.8, "max_m_per_s": 1.5},
//!     "gas": {"min_m_per_s": 10, "max_m_per_s": 15}
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::data::{FormulasTable, ModuleData, CONSTANTS_FILE};
use crate::equations::registry::{formulas_table, Equation};
use crate::equations::{circle_area, mean_velocity};
use crate::errors::{CalcError, CalcResult};
use crate::inputs::Inputs;
use crate::numeric::round_to;
use crate::units::{CubicMetersPerHour, CubicMetersPerSecond, Meters, Millimeters};

use super::{Calculation, Computed};

/// Standard nominal diameters DN20 to DN1000 (mm)
pub const DEFAULT_NOMINAL_DIAMETERS_MM: [f64; 20] = [
    20.0, 25.0, 32.0, 40.0, 50.0, 65.0, 80.0, 100.0, 150.0, 200.0, 250.0, 300.0, 350.0, 400.0, 500.0,
    600.0, 700.0, 800.0, 900.0, 1000.0,
];

/// Recommended velocity range (m/s, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityBand {
    pub min_m_per_s: f64,
    pub max_m_per_s: f64,
}

impl VelocityBand {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min_m_per_s && v <= self.max_m_per_s
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityBands {
    pub liquid: VelocityBand,
    pub gas: VelocityBand,
}

impl Default for VelocityBands {
    fn default() -> Self {
        VelocityBands {
            liquid: VelocityBand {
                min_m_per_s: 0.8,
                max_m_per_s: 1.5,
            },
            gas: VelocityBand {
                min_m_per_s: 10.0,
                max_m_per_s: 15.0,
            },
        }
    }
}

/// Band a velocity falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Liquid,
    Gas,
    Neither,
}

impl VelocityBands {
    pub fn classify(&self, v: f64) -> Service {
        if self.liquid.contains(v) {
            Service::Liquid
        } else if self.gas.contains(v) {
            Service::Gas
        } else {
            Service::Neither
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeVelocityInput {
    pub flow_rate: CubicMetersPerHour,
}

#[derive(Debug, Clone)]
pub struct PipeVelocity {
    pi: f64,
    diameters_mm: Vec<f64>,
    bands: VelocityBands,
    formulas: FormulasTable,
}

impl PipeVelocity {
    pub fn from_data(data: &ModuleData) -> CalcResult<Self> {
        let diameters_mm = data
            .constants
            .table::<Vec<f64>>("nominal_diameters_mm")?
            .unwrap_or_else(|| DEFAULT_NOMINAL_DIAMETERS_MM.to_vec());
        if diameters_mm.is_empty() || diameters_mm.iter().any(|d| !(*d > 0.0)) {
            return Err(CalcError::data_file(
                "parse",
                CONSTANTS_FILE,
                "nominal_diameters_mm must be a non-empty list of positive diameters",
            ));
        }
        let bands = data
            .constants
            .table::<VelocityBands>("velocity_bands")?
            .unwrap_or_default();

        Ok(PipeVelocity {
            pi: data.constants.constant_or("pi", std::f64::consts::PI),
            diameters_mm,
            bands,
            formulas: data.formulas_or(|| formulas_table(&[Equation::FlowConversion, Equation::PipeVelocity])),
        })
    }
}

/// Output key for one nominal size, e.g. `velocity_dn100_m_per_s`
pub fn output_key(diameter_mm: f64) -> String {
    format!("velocity_dn{}_m_per_s", diameter_mm)
}

impl Calculation for PipeVelocity {
    type Input = PipeVelocityInput;

    fn name(&self) -> &'static str {
        "Velocity in Pipelines"
    }

    fn validate(&self, inputs: &Inputs<'_>) -> CalcResult<PipeVelocityInput> {
        let flow = inputs.number("flow_rate_m3_per_h", "Flow rate")?;
        if flow <= 0.0 {
            return Err(CalcError::invalid_input(
                "flow_rate_m3_per_h",
                flow.to_string(),
                "Flow rate must be positive",
            ));
        }
        Ok(PipeVelocityInput {
            flow_rate: CubicMetersPerHour(flow),
        })
    }

    fn compute(&self, input: &PipeVelocityInput) -> CalcResult<Computed> {
        let flow: CubicMetersPerSecond = input.flow_rate.into();
        let bands = &self.bands;

        let mut computed = Computed::new();
        for &dn in &self.diameters_mm {
            let d: Meters = Millimeters(dn).into();
            let velocity = mean_velocity(flow.0, circle_area(self.pi, d.0));
            let band = match bands.classify(velocity) {
                Service::Liquid => format!(
                    "within liquid range ({}-{} m/s)",
                    bands.liquid.min_m_per_s, bands.liquid.max_m_per_s
                ),
                Service::Gas => format!(
                    "within gas range ({}-{} m/s)",
                    bands.gas.min_m_per_s, bands.gas.max_m_per_s
                ),
                Service::Neither => "outside recommended ranges".to_string(),
            };
            computed = computed
                .output(output_key(dn), velocity, 3)
                .note(format!("DN{}: {} m/s - {}", dn, round_to(velocity, 3), band));
        }
        Ok(computed)
    }

    fn formulas(&self) -> &FormulasTable {
        &self.formulas
    }
}
