//! # Engineering Equations
//!
//! Fundamental formulas used by the calculators, kept in one place so each
//! can be checked against its reference and reused across modules.
//!
//! ## Modules
//!
//! - [`hydraulics`] - Areas, orifice discharge, pipe friction
//! - [`pressure`] - Shell thickness under internal pressure, table interpolation
//! - [`registry`] - Equation names and display text for result `formulas`

pub mod hydraulics;
pub mod pressure;
pub mod registry;

pub use hydraulics::{
    annulus_area,
    circle_area,
    darcy_friction_factor,
    darcy_weisbach_pressure_drop,
    mean_velocity,
    orifice_head,
    reynolds_number,
    LAMINAR_REYNOLDS_LIMIT,
};

pub use pressure::{allowable_pressure, interpolate, required_thickness};

pub use registry::{formulas_table, Equation, EquationCategory, EquationMetadata};
