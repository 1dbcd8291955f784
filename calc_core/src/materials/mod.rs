//! # Materials Database
//!
//! Built-in property data for the calculators. Each table here is the
//! default a calculator falls back to when its directory's `constants.json`
//! does not carry the corresponding table.
//!
//! ## Tables
//!
//! - [`pipe_materials`] - Pipe material densities (`materials`)
//! - [`fluids`] - Water, air and diesel property correlations
//! - [`allowable_stress`] - Allowable stress curves by material and grade
//!   (`allowable_stress`)
//! - [`gases`] - Natural gas component heating values and molar masses
//!   (`components`)

pub mod allowable_stress;
pub mod fluids;
pub mod gases;
pub mod pipe_materials;

pub use allowable_stress::{default_allowable_stress, AllowableStressTable, GradeTable, StressCurve};
pub use fluids::{Fluid, FluidProperties};
pub use gases::{default_components, ComponentTable, GasComponent, NORMAL_MOLAR_VOLUME};
pub use pipe_materials::{default_materials, MaterialTable, PipeMaterial};
