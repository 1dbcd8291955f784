//! # Gas Calorific Value
//!
//! Heating value and normal density of a natural gas mixture from its
//! volumetric composition.
//!
//! Each component in the `components` table is read from an optional input
//! field `<formula lowercase>_percent` (for example `ch4_percent`). The
//! percentages are normalized by their sum, so a composition that does not
//! add up to exactly 100 % is scaled rather than rejected.

use crate::data::{FormulasTable, ModuleData};
use crate::equations::registry::{formulas_table, Equation};
use crate::errors::{CalcError, CalcResult};
use crate::inputs::Inputs;
use crate::materials::{default_components, ComponentTable, GasComponent, NORMAL_MOLAR_VOLUME};

use super::{Calculation, Computed};

/// MJ per kWh
pub const MJ_PER_KWH: f64 = 3.6;

/// One component share as entered.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentShare {
    pub formula: String,
    pub percent: f64,
    pub properties: GasComponent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GasMixtureInput {
    pub shares: Vec<ComponentShare>,
}

impl GasMixtureInput {
    pub fn total_percent(&self) -> f64 {
        self.shares.iter().map(|s| s.percent).sum()
    }
}

#[derive(Debug, Clone)]
pub struct GasCalorificValue {
    molar_volume: f64,
    components: ComponentTable,
    formulas: FormulasTable,
}

/// Input field for a component formula
pub fn percent_field(formula: &str) -> String {
    format!("{}_percent", formula.to_lowercase())
}

impl GasCalorificValue {
    pub fn from_data(data: &ModuleData) -> CalcResult<Self> {
        let components = data
            .constants
            .table::<ComponentTable>("components")?
            .unwrap_or_else(default_components);
        Ok(GasCalorificValue {
            molar_volume: data
                .constants
                .constant_or("molar_volume_m3_per_kmol", NORMAL_MOLAR_VOLUME),
            components,
            formulas: data.formulas_or(|| {
                formulas_table(&[
                    Equation::MixtureHeatingValue,
                    Equation::MixtureDensity,
                    Equation::MassHeatingValue,
                ])
            }),
        })
    }
}

impl Calculation for GasCalorificValue {
    type Input = GasMixtureInput;

    fn name(&self) -> &'static str {
        "Gas Calorific Value"
    }

    fn validate(&self, inputs: &Inputs<'_>) -> CalcResult<GasMixtureInput> {
        let mut shares = Vec::with_capacity(self.components.len());
        for (formula, properties) in &self.components {
            let field = percent_field(formula);
            let label = format!("{} content", formula);
            let percent = inputs.number_or(&field, &label, 0.0)?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(CalcError::invalid_input(
                    field,
                    percent.to_string(),
                    format!("{} must be between 0 and 100 %", label),
                ));
            }
            shares.push(ComponentShare {
                formula: formula.clone(),
                percent,
                properties: *properties,
            });
        }

        let input = GasMixtureInput { shares };
        if input.total_percent() <= 0.0 {
            return Err(CalcError::calculation_failed(
                self.name(),
                "Provide at least one gas component",
            ));
        }
        Ok(input)
    }

    fn compute(&self, input: &GasMixtureInput) -> CalcResult<Computed> {
        let total = input.total_percent();

        let mut heating_value = 0.0;
        let mut molar_mass = 0.0;
        for share in &input.shares {
            let fraction = share.percent / total;
            heating_value += fraction * share.properties.heating_value_mj_per_m3;
            molar_mass += fraction * share.properties.molar_mass_kg_per_kmol;
        }
        let density = molar_mass / self.molar_volume;

        let mut computed = Computed::new()
            .output("heating_value_mj_per_m3", heating_value, 3)
            .output("heating_value_kwh_per_m3", heating_value / MJ_PER_KWH, 3)
            .output("density_kg_per_m3", density, 4)
            .output("heating_value_mj_per_kg", heating_value / density, 3)
            .note(format!(
                "Normal conditions: 0 °C, 101.325 kPa (molar volume {} m³/kmol)",
                self.molar_volume
            ));
        if (total - 100.0).abs() > 1e-9 {
            computed = computed.note(format!("Composition normalized from a total of {} %", total));
        }
        Ok(computed)
    }

    fn formulas(&self) -> &FormulasTable {
        &self.formulas
    }
}
