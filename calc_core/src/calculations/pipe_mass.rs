//! # Pipe Mass Calculation
//!
//! Mass of a batch of identical straight pipes from outside diameter, wall
//! thickness, length, quantity and material density.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "outer_diameter": 273,
//!   "wall_thickness": 10,
//!   "length": 6,
//!   "quantity": 100,
//!   "material": "Carbon Steel"
//! }
//! ```

use crate::data::{FormulasTable, ModuleData};
use crate::equations::annulus_area;
use crate::equations::registry::{formulas_table, Equation};
use crate::errors::{CalcError, CalcResult};
use crate::inputs::Inputs;
use crate::materials::{default_materials, MaterialTable, PipeMaterial};
use crate::numeric::round_to;
use crate::units::{Meters, Millimeters};

use super::{Calculation, Computed};

/// Largest outside diameter accepted (mm)
pub const MAX_OUTER_DIAMETER_MM: f64 = 3000.0;

/// Validated pipe mass inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeMassInput {
    pub outer_diameter: Millimeters,
    pub wall_thickness: Millimeters,
    /// Length of one pipe
    pub length: Meters,
    /// Number of pipes (may be fractional, e.g. a part length)
    pub quantity: f64,
    pub material_name: String,
    pub material: PipeMaterial,
}

impl PipeMassInput {
    /// Inside diameter d = D - 2s
    pub fn inner_diameter(&self) -> Millimeters {
        self.outer_diameter - self.wall_thickness * 2.0
    }
}

/// Pipe mass calculator with its material table.
#[derive(Debug, Clone)]
pub struct PipeMass {
    pi: f64,
    materials: MaterialTable,
    formulas: FormulasTable,
}

impl PipeMass {
    pub fn from_data(data: &ModuleData) -> CalcResult<Self> {
        let materials = data
            .constants
            .table::<MaterialTable>("materials")?
            .unwrap_or_else(default_materials);
        Ok(PipeMass {
            pi: data.constants.constant_or("pi", std::f64::consts::PI),
            materials,
            formulas: data.formulas_or(|| {
                formulas_table(&[
                    Equation::InnerDiameter,
                    Equation::AnnulusArea,
                    Equation::MassPerMeter,
                    Equation::TotalMass,
                ])
            }),
        })
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }
}

impl Calculation for PipeMass {
    type Input = PipeMassInput;

    fn name(&self) -> &'static str {
        "Pipe Mass"
    }

    fn validate(&self, inputs: &Inputs<'_>) -> CalcResult<PipeMassInput> {
        inputs.require_all(&["outer_diameter", "wall_thickness", "length", "quantity", "material"])?;

        let outer = inputs.number("outer_diameter", "Outer diameter")?;
        let wall = inputs.number("wall_thickness", "Wall thickness")?;
        let length = inputs.number("length", "Length")?;
        let quantity = inputs.number("quantity", "Quantity")?;

        if outer <= 0.0 || outer > MAX_OUTER_DIAMETER_MM {
            return Err(CalcError::invalid_input(
                "outer_diameter",
                outer.to_string(),
                "Outer diameter must be between 0 and 3000 mm",
            ));
        }
        if wall <= 0.0 || wall >= outer / 2.0 {
            return Err(CalcError::invalid_input(
                "wall_thickness",
                wall.to_string(),
                "Wall thickness must be positive and less than half of the outer diameter",
            ));
        }
        if length <= 0.0 {
            return Err(CalcError::invalid_input("length", length.to_string(), "Length must be positive"));
        }
        if quantity <= 0.0 {
            return Err(CalcError::invalid_input(
                "quantity",
                quantity.to_string(),
                "Quantity must be positive",
            ));
        }

        let material_name = inputs.text("material", "Material")?;
        let material = *self
            .materials
            .get(&material_name)
            .ok_or_else(|| CalcError::material_not_found(&material_name, self.materials.keys()))?;

        Ok(PipeMassInput {
            outer_diameter: Millimeters(outer),
            wall_thickness: Millimeters(wall),
            length: Meters(length),
            quantity,
            material_name,
            material,
        })
    }

    fn compute(&self, input: &PipeMassInput) -> CalcResult<Computed> {
        let inner_mm = input.inner_diameter();
        let outer_m: Meters = input.outer_diameter.into();
        let inner_m: Meters = inner_mm.into();

        let area = annulus_area(self.pi, outer_m.0, inner_m.0);
        let density = input.material.density_kg_per_m3;
        let mass_per_meter = area * density;
        let total_length = input.length.0 * input.quantity;
        let total_mass = mass_per_meter * total_length;

        Ok(Computed::new()
            .output("inner_diameter_mm", inner_mm.0, 3)
            .output("mass_per_meter_kg_per_m", mass_per_meter, 3)
            .output("total_mass_kg", total_mass, 3)
            .note(format!("Material density: {} kg/m³ ({})", density, input.material_name))
            .note(format!("Total pipe length: {} m", round_to(total_length, 3))))
    }

    fn formulas(&self) -> &FormulasTable {
        &self.formulas
    }
}
