//! # Calculation Registry
//!
//! Maps the module id named in a directory's `calculation.json` to the
//! constructor of its calculator, and keeps one constructed instance per
//! module id and calculation directory.
//!
//! Instances are built lazily on first use from that directory's
//! `constants.json` and `formulas.json`. The map of directories is guarded
//! by a mutex that is only held to look up or insert a directory's cell;
//! file reads happen inside [`OnceCell::get_or_try_init`], so concurrent
//! first requests for one directory construct it once and requests for
//! other directories are not blocked. A failed construction leaves the cell
//! empty and is retried on the next request.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::CalculationRegistry;
//!
//! let registry = CalculationRegistry::builtin();
//! assert!(registry.contains("liquid_height"));
//! assert!(!registry.contains("beam_deflection"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;

use crate::data::ModuleData;
use crate::errors::{CalcError, CalcResult};

use super::gas_calorific_value::GasCalorificValue;
use super::liquid_height::LiquidHeight;
use super::pipe_flow_resistance::PipeFlowResistance;
use super::pipe_mass::PipeMass;
use super::pipe_velocity::PipeVelocity;
use super::wall_thickness::WallThickness;
use super::Calculator;

/// Builds a calculator from a directory's data files
pub type CalculatorFactory = fn(&ModuleData) -> CalcResult<Box<dyn Calculator>>;

type InstanceCell = Arc<OnceCell<Arc<dyn Calculator>>>;

/// Module id and directory an instance was built for
type InstanceKey = (String, PathBuf);

fn liquid_height(data: &ModuleData) -> CalcResult<Box<dyn Calculator>> {
    Ok(Box::new(LiquidHeight::from_data(data)?))
}

fn pipe_flow_resistance(data: &ModuleData) -> CalcResult<Box<dyn Calculator>> {
    Ok(Box::new(PipeFlowResistance::from_data(data)?))
}

fn pipe_mass(data: &ModuleData) -> CalcResult<Box<dyn Calculator>> {
    Ok(Box::new(PipeMass::from_data(data)?))
}

fn velocity_in_pipelines(data: &ModuleData) -> CalcResult<Box<dyn Calculator>> {
    Ok(Box::new(PipeVelocity::from_data(data)?))
}

fn wall_thickness(data: &ModuleData) -> CalcResult<Box<dyn Calculator>> {
    Ok(Box::new(WallThickness::from_data(data)?))
}

fn gas_calorific_value(data: &ModuleData) -> CalcResult<Box<dyn Calculator>> {
    Ok(Box::new(GasCalorificValue::from_data(data)?))
}

/// Module ids and constructors of the built-in calculators
pub const BUILTIN_MODULES: [(&str, CalculatorFactory); 6] = [
    ("liquid_height", liquid_height),
    ("pipe_flow_resistance", pipe_flow_resistance),
    ("pipe_mass", pipe_mass),
    ("velocity_in_pipelines", velocity_in_pipelines),
    ("wall_thickness_internal_pressure", wall_thickness),
    ("gas_calorific_value", gas_calorific_value),
];

#[derive(Default)]
pub struct CalculationRegistry {
    factories: BTreeMap<String, CalculatorFactory>,
    instances: Mutex<HashMap<InstanceKey, InstanceCell>>,
}

impl fmt::Debug for CalculationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculationRegistry")
            .field("modules", &self.module_ids())
            .finish()
    }
}

impl CalculationRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in calculator
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (id, factory) in BUILTIN_MODULES {
            registry.register(id, factory);
        }
        registry
    }

    pub fn register(&mut self, module_id: impl Into<String>, factory: CalculatorFactory) {
        self.factories.insert(module_id.into(), factory);
    }

    pub fn contains(&self, module_id: &str) -> bool {
        self.factories.contains_key(module_id)
    }

    /// Registered module ids, sorted
    pub fn module_ids(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// The calculator for `dir`, constructing it on first use.
    ///
    /// `module_id` and `dir` together identify the instance: the same module
    /// used from two directories yields two instances with their own
    /// constants, and a directory whose `calculation.json` is switched to
    /// another module gets that module.
    pub fn load(&self, module_id: &str, dir: &Path) -> CalcResult<Arc<dyn Calculator>> {
        let factory = *self.factories.get(module_id).ok_or_else(|| CalcError::Internal {
            message: format!("module '{}' is not registered", module_id),
        })?;

        let cell = {
            let mut instances = self
                .instances
                .lock()
                .map_err(|_| CalcError::Internal {
                    message: "calculation registry lock poisoned".to_string(),
                })?;
            Arc::clone(
                instances
                    .entry((module_id.to_string(), dir.to_path_buf()))
                    .or_default(),
            )
        };

        let calc = cell.get_or_try_init(|| {
            tracing::debug!(module = module_id, dir = %dir.display(), "constructing calculation module");
            let data = ModuleData::load(dir)?;
            factory(&data).map(Arc::from)
        })?;
        Ok(Arc::clone(calc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{Calculation, Computed};
    use crate::data::FormulasTable;
    use crate::inputs::Inputs;
    use serde_json::json;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builtin_module_ids() {
        let registry = CalculationRegistry::builtin();
        assert_eq!(
            registry.module_ids(),
            vec![
                "gas_calorific_value",
                "liquid_height",
                "pipe_flow_resistance",
                "pipe_mass",
                "velocity_in_pipelines",
                "wall_thickness_internal_pressure",
            ]
        );
    }

    #[test]
    fn test_unregistered_module() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CalculationRegistry::builtin();
        let err = registry.load("nope", dir.path()).err().unwrap();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_constants_injected_per_directory() {
        let root = tempfile::tempdir().unwrap();
        let earth = root.path().join("earth");
        let moon = root.path().join("moon");
        fs::create_dir_all(&earth).unwrap();
        fs::create_dir_all(&moon).unwrap();
        fs::write(moon.join("constants.json"), r#"{"constants": {"g_m_per_s2": 1.62}}"#).unwrap();

        let registry = CalculationRegistry::builtin();
        let inputs = json!({
            "flow_rate_m3_per_h": 50,
            "hole_diameter_mm": 10,
            "hole_count": 20,
            "discharge_coefficient": 0.62
        });
        let map = inputs.as_object().unwrap();

        let h_earth = registry.load("liquid_height", &earth).unwrap().calculate(map);
        let h_moon = registry.load("liquid_height", &moon).unwrap().calculate(map);
        assert!(h_moon.outputs().unwrap()["liquid_height_m"] > h_earth.outputs().unwrap()["liquid_height_m"]);
    }

    #[test]
    fn test_instance_reused() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CalculationRegistry::builtin();
        let a = registry.load("pipe_mass", dir.path()).unwrap();
        let b = registry.load("pipe_mass", dir.path()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_malformed_constants_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("constants.json"), "{ not json").unwrap();

        let registry = CalculationRegistry::builtin();
        let err = registry.load("pipe_mass", dir.path()).err().unwrap();
        assert_eq!(err.error_code(), "DATA_FILE_ERROR");

        fs::write(dir.path().join("constants.json"), "{}").unwrap();
        assert!(registry.load("pipe_mass", dir.path()).is_ok());
    }

    #[test]
    fn test_switched_module_gets_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CalculationRegistry::builtin();
        let mass = registry.load("pipe_mass", dir.path()).unwrap();
        let height = registry.load("liquid_height", dir.path()).unwrap();
        assert!(!Arc::ptr_eq(&mass, &height));

        let inputs = json!({
            "flow_rate_m3_per_h": 50,
            "hole_diameter_mm": 10,
            "hole_count": 20,
            "discharge_coefficient": 0.62
        });
        assert!(height.calculate(inputs.as_object().unwrap()).is_success());
    }

    static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

    struct Echo {
        formulas: FormulasTable,
    }

    impl Calculation for Echo {
        type Input = ();

        fn name(&self) -> &'static str {
            "Echo"
        }

        fn validate(&self, _inputs: &Inputs<'_>) -> CalcResult<()> {
            Ok(())
        }

        fn compute(&self, _input: &()) -> CalcResult<Computed> {
            Ok(Computed::new().note("echo"))
        }

        fn formulas(&self) -> &FormulasTable {
            &self.formulas
        }
    }

    fn counting_factory(_data: &ModuleData) -> CalcResult<Box<dyn Calculator>> {
        CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(Box::new(Echo {
            formulas: FormulasTable::new(),
        }))
    }

    #[test]
    fn test_concurrent_first_use_constructs_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = CalculationRegistry::new();
        registry.register("echo", counting_factory);
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let path = dir.path().to_path_buf();
                std::thread::spawn(move || registry.load("echo", &path).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
    }
}
