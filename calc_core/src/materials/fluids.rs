//! Fluid property correlations.
//!
//! Density and dynamic viscosity for the fluids the pipe resistance
//! calculator supports, as closed-form functions of temperature (and of
//! pressure for air).
//!
//! ## Correlations
//!
//! - **Water**: Tanaka et al. density fit; Vogel viscosity equation
//! - **Air**: ideal gas (R = 287.05 J/kg·K); Sutherland viscosity law
//! - **Diesel**: linear thermal expansion from 830 kg/m³ at 15 °C;
//!   viscosity falling 10 % per 10 °C from 3.5 mPa·s at 20 °C

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::units::{Celsius, Kelvin, Kilopascals, Pascals};

/// Specific gas constant for dry air (J/kg·K)
pub const AIR_GAS_CONSTANT: f64 = 287.05;

/// Supported fluids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fluid {
    Water,
    Air,
    Diesel,
}

/// Density and viscosity at a given state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidProperties {
    pub density_kg_per_m3: f64,
    pub viscosity_pa_s: f64,
}

impl Fluid {
    pub const ALL: [Fluid; 3] = [Fluid::Water, Fluid::Air, Fluid::Diesel];

    /// Name used in calculator inputs
    pub fn code(&self) -> &'static str {
        match self {
            Fluid::Water => "water",
            Fluid::Air => "air",
            Fluid::Diesel => "diesel",
        }
    }

    /// Temperature range (°C, inclusive) over which the correlation is used
    pub fn temperature_range_c(&self) -> (f64, f64) {
        match self {
            Fluid::Water => (0.0, 100.0),
            Fluid::Air | Fluid::Diesel => (-50.0, 300.0),
        }
    }

    /// Evaluate the property correlations.
    pub fn properties(&self, temperature: Celsius, pressure: Kilopascals) -> FluidProperties {
        let t = temperature.0;
        match self {
            Fluid::Water => {
                let density = 1000.0
                    * (1.0 - (t + 288.9414) * (t - 3.9863).powi(2) / (508_929.2 * (t + 68.12963)));
                let viscosity = 2.414e-5 * 10f64.powf(247.8 / (t + 133.15));
                FluidProperties {
                    density_kg_per_m3: density,
                    viscosity_pa_s: viscosity,
                }
            }
            Fluid::Air => {
                let kelvin: Kelvin = temperature.into();
                let pascals: Pascals = pressure.into();
                let density = pascals.0 / (AIR_GAS_CONSTANT * kelvin.0);
                let viscosity = 1.716e-5 * (kelvin.0 / 273.15).powf(1.5) * (273.15 + 110.4)
                    / (kelvin.0 + 110.4);
                FluidProperties {
                    density_kg_per_m3: density,
                    viscosity_pa_s: viscosity,
                }
            }
            Fluid::Diesel => FluidProperties {
                density_kg_per_m3: 830.0 * (1.0 - 0.0008 * (t - 15.0)),
                viscosity_pa_s: 3.5e-3 * 0.9f64.powf((t - 20.0) / 10.0),
            },
        }
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Fluid {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "water" => Ok(Fluid::Water),
            "air" => Ok(Fluid::Air),
            "diesel" => Ok(Fluid::Diesel),
            _ => Err(()),
        }
    }
}
