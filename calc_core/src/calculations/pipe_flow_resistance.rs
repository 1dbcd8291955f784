//! # Pipe Flow Resistance Calculation
//!
//! Friction pressure drop along a straight circular pipe by Darcy-Weisbach.
//! Fluid density and viscosity come from the correlations in
//! [`crate::materials::fluids`] at the given temperature and pressure.
//!
//! ## Flow Regime
//!
//! | Reynolds number | Friction factor |
//! |-----------------|-----------------|
//! | Re < 2300       | λ = 64 / Re     |
//! | Re ≥ 2300       | Swamee-Jain     |
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "flow_rate_m3_per_h": 100,
//!   "diameter_m": 0.1,
//!   "length_m": 100,
//!   "fluid": "water",
//!   "temperature_c": 20
//! }
//! ```

use crate::data::{FormulasTable, ModuleData};
use crate::equations::registry::{formulas_table, Equation};
use crate::equations::{
    circle_area, darcy_friction_factor, darcy_weisbach_pressure_drop, mean_velocity, reynolds_number,
    LAMINAR_REYNOLDS_LIMIT,
};
use crate::errors::{CalcError, CalcResult};
use crate::inputs::Inputs;
use crate::materials::Fluid;
use crate::numeric::round_to;
use crate::units::{Celsius, CubicMetersPerHour, CubicMetersPerSecond, Kilopascals, Meters, Pascals};

use super::{Calculation, Computed};

pub const MAX_DIAMETER_M: f64 = 5.0;
pub const MAX_RELATIVE_ROUGHNESS: f64 = 0.05;

pub const DEFAULT_TEMPERATURE_C: f64 = 20.0;
pub const DEFAULT_PRESSURE_KPA: f64 = 101.325;
pub const DEFAULT_RELATIVE_ROUGHNESS: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeFlowResistanceInput {
    pub flow_rate: CubicMetersPerHour,
    pub diameter: Meters,
    pub length: Meters,
    pub fluid: Fluid,
    pub temperature: Celsius,
    pub pressure: Kilopascals,
    pub relative_roughness: f64,
}

#[derive(Debug, Clone)]
pub struct PipeFlowResistance {
    pi: f64,
    formulas: FormulasTable,
}

impl PipeFlowResistance {
    pub fn from_data(data: &ModuleData) -> CalcResult<Self> {
        Ok(PipeFlowResistance {
            pi: data.constants.constant_or("pi", std::f64::consts::PI),
            formulas: data.formulas_or(|| {
                formulas_table(&[
                    Equation::FlowConversion,
                    Equation::PipeVelocity,
                    Equation::ReynoldsNumber,
                    Equation::FrictionFactor,
                    Equation::PressureDrop,
                ])
            }),
        })
    }
}

fn parse_fluid(inputs: &Inputs<'_>) -> CalcResult<Fluid> {
    let name = inputs.text_or("fluid", "Fluid", Fluid::Water.code())?;
    name.parse::<Fluid>().map_err(|_| {
        let valid: Vec<&str> = Fluid::ALL.iter().map(Fluid::code).collect();
        CalcError::invalid_input(
            "fluid",
            name.as_str(),
            format!("Fluid must be one of: {}", valid.join(", ")),
        )
    })
}

impl Calculation for PipeFlowResistance {
    type Input = PipeFlowResistanceInput;

    fn name(&self) -> &'static str {
        "Pipe Flow Resistance"
    }

    fn validate(&self, inputs: &Inputs<'_>) -> CalcResult<PipeFlowResistanceInput> {
        inputs.require_all(&["flow_rate_m3_per_h", "diameter_m", "length_m"])?;

        let flow = inputs.number("flow_rate_m3_per_h", "Flow rate")?;
        let diameter = inputs.number("diameter_m", "Diameter")?;
        let length = inputs.number("length_m", "Length")?;

        if flow <= 0.0 {
            return Err(CalcError::invalid_input(
                "flow_rate_m3_per_h",
                flow.to_string(),
                "Flow rate must be positive",
            ));
        }
        if diameter <= 0.0 || diameter > MAX_DIAMETER_M {
            return Err(CalcError::invalid_input(
                "diameter_m",
                diameter.to_string(),
                "Diameter must be between 0 and 5 m",
            ));
        }
        if length <= 0.0 {
            return Err(CalcError::invalid_input("length_m", length.to_string(), "Length must be positive"));
        }

        let fluid = parse_fluid(inputs)?;

        let temperature = inputs.number_or("temperature_c", "Temperature", DEFAULT_TEMPERATURE_C)?;
        let (t_min, t_max) = fluid.temperature_range_c();
        if temperature < t_min || temperature > t_max {
            return Err(CalcError::invalid_input(
                "temperature_c",
                temperature.to_string(),
                format!("Temperature for {} must be between {} and {} °C", fluid, t_min, t_max),
            ));
        }

        let pressure = inputs.number_or("pressure_kpa", "Pressure", DEFAULT_PRESSURE_KPA)?;
        if pressure <= 0.0 {
            return Err(CalcError::invalid_input(
                "pressure_kpa",
                pressure.to_string(),
                "Pressure must be positive",
            ));
        }

        let roughness = inputs.number_or("relative_roughness", "Relative roughness", DEFAULT_RELATIVE_ROUGHNESS)?;
        if !(0.0..MAX_RELATIVE_ROUGHNESS).contains(&roughness) {
            return Err(CalcError::invalid_input(
                "relative_roughness",
                roughness.to_string(),
                "Relative roughness must be between 0 and 0.05",
            ));
        }

        Ok(PipeFlowResistanceInput {
            flow_rate: CubicMetersPerHour(flow),
            diameter: Meters(diameter),
            length: Meters(length),
            fluid,
            temperature: Celsius(temperature),
            pressure: Kilopascals(pressure),
            relative_roughness: roughness,
        })
    }

    fn compute(&self, input: &PipeFlowResistanceInput) -> CalcResult<Computed> {
        let props = input.fluid.properties(input.temperature, input.pressure);
        if props.density_kg_per_m3 <= 0.0 || props.viscosity_pa_s <= 0.0 {
            return Err(CalcError::calculation_failed(
                self.name(),
                format!("fluid properties of {} are not physical at {} °C", input.fluid, input.temperature.0),
            ));
        }

        let flow: CubicMetersPerSecond = input.flow_rate.into();
        let d = input.diameter.0;
        let velocity = mean_velocity(flow.0, circle_area(self.pi, d));
        let re = reynolds_number(props.density_kg_per_m3, velocity, d, props.viscosity_pa_s);
        let f = darcy_friction_factor(re, input.relative_roughness);
        let drop = Pascals(darcy_weisbach_pressure_drop(
            f,
            input.length.0,
            d,
            props.density_kg_per_m3,
            velocity,
        ));
        let drop_kpa: Kilopascals = drop.into();

        let regime = if re < LAMINAR_REYNOLDS_LIMIT {
            format!("Laminar flow (Re = {} < 2300), λ = 64 / Re", round_to(re, 0))
        } else {
            format!("Turbulent flow (Re = {} ≥ 2300), Swamee-Jain friction factor", round_to(re, 0))
        };

        Ok(Computed::new()
            .output("density_kg_per_m3", props.density_kg_per_m3, 3)
            .output("viscosity_mpa_s", props.viscosity_pa_s * 1000.0, 4)
            .output("velocity_m_per_s", velocity, 4)
            .output("reynolds_number", re, 0)
            .output("friction_factor", f, 6)
            .output("pressure_drop_pa", drop.0, 2)
            .output("pressure_drop_kpa", drop_kpa.0, 4)
            .note(regime)
            .note(format!("Fluid: {} at {} °C", input.fluid, input.temperature.0)))
    }

    fn formulas(&self) -> &FormulasTable {
        &self.formulas
    }
}
