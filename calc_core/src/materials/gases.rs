//! Natural gas component properties.
//!
//! Volumetric gross heating value at normal conditions and molar mass for
//! the components the calorific value calculator accepts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Molar volume of an ideal gas at 0 °C, 101.325 kPa (m³/kmol)
pub const NORMAL_MOLAR_VOLUME: f64 = 22.414;

/// Properties of one gas component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasComponent {
    /// Heating value (MJ/m³)
    pub heating_value_mj_per_m3: f64,
    /// Molar mass (kg/kmol)
    pub molar_mass_kg_per_kmol: f64,
}

/// Component formula to properties
pub type ComponentTable = BTreeMap<String, GasComponent>;

/// Components in input order: (formula, heating value MJ/m³, molar mass kg/kmol)
pub const DEFAULT_COMPONENTS: [(&str, f64, f64); 5] = [
    ("CH4", 35.8, 16.043),
    ("C2H6", 65.0, 30.07),
    ("C3H8", 93.0, 44.097),
    ("N2", 0.0, 28.014),
    ("CO2", 0.0, 44.01),
];

/// Build the default component table.
pub fn default_components() -> ComponentTable {
    DEFAULT_COMPONENTS
        .iter()
        .map(|(name, hv, m)| {
            (
                name.to_string(),
                GasComponent {
                    heating_value_mj_per_m3: *hv,
                    molar_mass_kg_per_kmol: *m,
                },
            )
        })
        .collect()
}
