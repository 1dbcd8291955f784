//! Pipe material densities.
//!
//! Default table used by the pipe mass calculator when its directory does
//! not supply a `materials` table in `constants.json`. Densities are typical
//! handbook values at room temperature.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entry of the `materials` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeMaterial {
    /// Density in kg/m³
    pub density_kg_per_m3: f64,
}

/// Material name to properties
pub type MaterialTable = BTreeMap<String, PipeMaterial>;

/// Built-in material densities (kg/m³)
pub const DEFAULT_DENSITIES: [(&str, f64); 10] = [
    ("Alloy Steel", 7850.0),
    ("Aluminum", 2700.0),
    ("Brass", 8500.0),
    ("Carbon Steel", 7850.0),
    ("Cast Iron", 7200.0),
    ("Copper", 8960.0),
    ("HDPE", 950.0),
    ("PVC", 1400.0),
    ("Stainless Steel", 7900.0),
    ("Titanium", 4500.0),
];

/// Build the default material table.
pub fn default_materials() -> MaterialTable {
    DEFAULT_DENSITIES
        .iter()
        .map(|(name, density)| {
            (
                name.to_string(),
                PipeMaterial {
                    density_kg_per_m3: *density,
                },
            )
        })
        .collect()
}
