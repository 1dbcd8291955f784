//! Allowable stress tables for pressure-retaining plate.
//!
//! Allowable stress versus temperature per material and grade, in the shape
//! stored under `allowable_stress` in `constants.json`:
//!
//! ```json
//! {
//!   "Carbon Steel": {
//!     "SA-516 Gr.60": {
//!       "temperatures_c": [-29, 20, 50],
//!       "allowable_stress_mpa": [117, 117, 117]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::equations::pressure::interpolate;

/// Allowable stress curve for one grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressCurve {
    /// Tabulated temperatures (°C), strictly increasing
    pub temperatures_c: Vec<f64>,
    /// Allowable stress at each temperature (MPa)
    pub allowable_stress_mpa: Vec<f64>,
}

impl StressCurve {
    pub fn new(temperatures_c: &[f64], allowable_stress_mpa: &[f64]) -> Self {
        StressCurve {
            temperatures_c: temperatures_c.to_vec(),
            allowable_stress_mpa: allowable_stress_mpa.to_vec(),
        }
    }

    /// Tabulated temperature range (°C), `None` for an empty curve
    pub fn range_c(&self) -> Option<(f64, f64)> {
        Some((*self.temperatures_c.first()?, *self.temperatures_c.last()?))
    }

    /// Allowable stress at `temperature_c`, `None` outside the table
    pub fn stress_at(&self, temperature_c: f64) -> Option<f64> {
        interpolate(&self.temperatures_c, &self.allowable_stress_mpa, temperature_c)
    }

    /// Whether the curve is usable: equal lengths, increasing temperatures,
    /// positive stresses
    pub fn is_well_formed(&self) -> bool {
        !self.temperatures_c.is_empty()
            && self.temperatures_c.len() == self.allowable_stress_mpa.len()
            && self.temperatures_c.windows(2).all(|w| w[0] < w[1])
            && self.allowable_stress_mpa.iter().all(|s| *s > 0.0)
    }
}

/// Grade name to curve
pub type GradeTable = BTreeMap<String, StressCurve>;
/// Material name to its grades
pub type AllowableStressTable = BTreeMap<String, GradeTable>;

/// Built-in allowable stress data.
pub fn default_allowable_stress() -> AllowableStressTable {
    let mut carbon = GradeTable::new();
    carbon.insert(
        "SA-516 Gr.60".to_string(),
        StressCurve::new(
            &[-29.0, 20.0, 50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 350.0, 400.0],
            &[117.0, 117.0, 117.0, 117.0, 115.0, 108.0, 98.0, 86.0, 71.0, 54.0],
        ),
    );
    carbon.insert(
        "SA-516 Gr.70".to_string(),
        StressCurve::new(
            &[-29.0, 20.0, 50.0, 100.0, 150.0, 200.0, 250.0, 300.0],
            &[138.0, 138.0, 138.0, 138.0, 136.0, 129.0, 118.0, 105.0],
        ),
    );

    let mut stainless = GradeTable::new();
    stainless.insert(
        "SA-240 TP304".to_string(),
        StressCurve::new(
            &[-200.0, 20.0, 100.0, 200.0, 300.0, 400.0, 500.0],
            &[138.0, 138.0, 114.0, 103.0, 95.0, 89.0, 83.0],
        ),
    );
    stainless.insert(
        "SA-240 TP316".to_string(),
        StressCurve::new(
            &[-196.0, 20.0, 100.0, 200.0, 300.0, 400.0, 500.0],
            &[146.0, 146.0, 122.0, 111.0, 103.0, 97.0, 92.0],
        ),
    );

    let mut table = AllowableStressTable::new();
    table.insert("Carbon Steel".to_string(), carbon);
    table.insert("Stainless Steel".to_string(), stainless);
    table
}
