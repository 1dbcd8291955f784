//! # Equation Registry
//!
//! Every formula a calculator applies is named here with its display text.
//! Calculators build their default [`FormulasTable`] from the equations they
//! use, so a calculation directory without a `formulas.json` still returns
//! meaningful formula text with each result.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::{formulas_table, Equation};
//!
//! let table = formulas_table(&[Equation::OrificeVelocity, Equation::OrificeHead]);
//! assert_eq!(table["velocity"], "v = Q / A");
//! assert_eq!(Equation::OrificeHead.metadata().key, "liquid_height");
//! ```

use serde::{Deserialize, Serialize};

use crate::data::FormulasTable;

/// Grouping used when listing equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Unit conversions applied to raw inputs
    Conversions,
    /// Areas and diameters
    Geometry,
    /// Orifice and pipe flow relations
    Hydraulics,
    /// Shell thickness under pressure
    Strength,
    /// Mass and mixture property sums
    Properties,
}

/// Identifier for every formula applied by a calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    FlowConversion,
    HoleArea,
    OrificeVelocity,
    OrificeHead,
    InnerDiameter,
    AnnulusArea,
    MassPerMeter,
    TotalMass,
    PipeVelocity,
    ReynoldsNumber,
    FrictionFactor,
    PressureDrop,
    AllowableStress,
    RequiredThickness,
    TotalThickness,
    AllowablePressure,
    MixtureHeatingValue,
    MixtureDensity,
    MassHeatingValue,
}

/// Display metadata for one equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquationMetadata {
    /// Key under which the formula appears in a result's `formulas` map
    pub key: &'static str,
    /// Formula text
    pub formula: &'static str,
    /// One-line description
    pub description: &'static str,
    pub category: EquationCategory,
}

impl Equation {
    pub fn metadata(&self) -> EquationMetadata {
        use EquationCategory::*;
        let (key, formula, description, category) = match self {
            Equation::FlowConversion => (
                "flow_conversion",
                "Q = Q_h / 3600",
                "Flow rate converted from m³/h to m³/s",
                Conversions,
            ),
            Equation::HoleArea => (
                "discharge_area",
                "A = n · π · d² / 4",
                "Combined area of n holes of diameter d",
                Geometry,
            ),
            Equation::OrificeVelocity => (
                "velocity",
                "v = Q / A",
                "Mean velocity through the discharge area",
                Hydraulics,
            ),
            Equation::OrificeHead => (
                "liquid_height",
                "H = (v / μ)² / (2 · g)",
                "Liquid head required to pass the flow through the holes",
                Hydraulics,
            ),
            Equation::InnerDiameter => (
                "inner_diameter",
                "d = D − 2 · s",
                "Inside diameter from outside diameter and wall thickness",
                Geometry,
            ),
            Equation::AnnulusArea => (
                "cross_section_area",
                "A = π / 4 · (D² − d²)",
                "Metal cross-section of the pipe wall",
                Geometry,
            ),
            Equation::MassPerMeter => (
                "mass_per_meter",
                "m' = A · ρ",
                "Linear mass from cross-section and material density",
                Properties,
            ),
            Equation::TotalMass => (
                "total_mass",
                "M = m' · L · N",
                "Mass of N pipes of length L",
                Properties,
            ),
            Equation::PipeVelocity => (
                "velocity",
                "v = 4 · Q / (π · D²)",
                "Mean velocity in a full circular pipe",
                Hydraulics,
            ),
            Equation::ReynoldsNumber => (
                "reynolds_number",
                "Re = ρ · v · D / μ",
                "Ratio of inertial to viscous forces",
                Hydraulics,
            ),
            Equation::FrictionFactor => (
                "friction_factor",
                "λ = 64 / Re (Re < 2300);  λ = 0.25 / [log₁₀(ε/3.7 + 5.74 / Re⁰·⁹)]²",
                "Darcy friction factor, laminar or Swamee-Jain",
                Hydraulics,
            ),
            Equation::PressureDrop => (
                "pressure_drop",
                "Δp = λ · (L / D) · ρ · v² / 2",
                "Darcy-Weisbach friction pressure loss",
                Hydraulics,
            ),
            Equation::AllowableStress => (
                "allowable_stress",
                "[σ] = interpolate(T, [σ](T) table)",
                "Allowable stress at design temperature",
                Strength,
            ),
            Equation::RequiredThickness => (
                "thickness",
                "s = p · D / (2 · [σ] · φ − p)",
                "Calculated wall thickness under internal pressure",
                Strength,
            ),
            Equation::TotalThickness => (
                "total_thickness",
                "s_total = s + c",
                "Wall thickness including corrosion allowance",
                Strength,
            ),
            Equation::AllowablePressure => (
                "allowable_pressure",
                "[p] = 2 · [σ] · φ · s / (D + s)",
                "Pressure the calculated wall can carry",
                Strength,
            ),
            Equation::MixtureHeatingValue => (
                "heating_value",
                "Q = Σ xᵢ · Qᵢ",
                "Volumetric heating value of the mixture",
                Properties,
            ),
            Equation::MixtureDensity => (
                "density",
                "ρ = Σ xᵢ · Mᵢ / V_m",
                "Density at normal conditions from molar masses",
                Properties,
            ),
            Equation::MassHeatingValue => (
                "mass_heating_value",
                "Q_m = Q / ρ",
                "Heating value per kilogram",
                Properties,
            ),
        };
        EquationMetadata {
            key,
            formula,
            description,
            category,
        }
    }
}

/// Build a formulas table keyed by each equation's `key`.
pub fn formulas_table(equations: &[Equation]) -> FormulasTable {
    equations
        .iter()
        .map(|eq| {
            let meta = eq.metadata();
            (meta.key.to_string(), meta.formula.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formulas_table_keys() {
        let table = formulas_table(&[
            Equation::InnerDiameter,
            Equation::AnnulusArea,
            Equation::MassPerMeter,
            Equation::TotalMass,
        ]);
        assert_eq!(table.len(), 4);
        assert_eq!(table["inner_diameter"], "d = D − 2 · s");
        assert!(table.contains_key("total_mass"));
    }

    #[test]
    fn test_metadata_is_populated() {
        for eq in [Equation::FrictionFactor, Equation::AllowablePressure, Equation::MixtureDensity] {
            let meta = eq.metadata();
            assert!(!meta.key.is_empty());
            assert!(!meta.formula.is_empty());
            assert!(!meta.description.is_empty());
        }
    }
}
