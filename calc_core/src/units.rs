//! # Unit Types
//!
//! Lightweight newtype wrappers for the SI and process-engineering units the
//! calculators accept. They keep "millimetres vs metres" and "per hour vs
//! per second" conversions explicit at the validation boundary while
//! serializing as plain numbers.
//!
//! ## Units in Use
//!
//! - Length: millimetres (mm) on input, metres (m) inside formulas
//! - Volumetric flow: m³/h on input, m³/s inside formulas
//! - Pressure: kilopascals (kPa) on input, pascals (Pa) inside formulas
//! - Temperature: degrees Celsius on input, kelvin for gas correlations
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{CubicMetersPerHour, CubicMetersPerSecond, Meters, Millimeters};
//!
//! let hole: Meters = Millimeters(10.0).into();
//! assert_eq!(hole.0, 0.01);
//!
//! let flow: CubicMetersPerSecond = CubicMetersPerHour(3600.0).into();
//! assert_eq!(flow.0, 1.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Flow Units
// ============================================================================

/// Volumetric flow rate in cubic metres per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerHour(pub f64);

/// Volumetric flow rate in cubic metres per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSecond(pub f64);

impl From<CubicMetersPerHour> for CubicMetersPerSecond {
    fn from(q: CubicMetersPerHour) -> Self {
        CubicMetersPerSecond(q.0 / 3600.0)
    }
}

impl From<CubicMetersPerSecond> for CubicMetersPerHour {
    fn from(q: CubicMetersPerSecond) -> Self {
        CubicMetersPerHour(q.0 * 3600.0)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Pressure in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

impl From<Kilopascals> for Pascals {
    fn from(kpa: Kilopascals) -> Self {
        Pascals(kpa.0 * 1000.0)
    }
}

impl From<Pascals> for Kilopascals {
    fn from(pa: Pascals) -> Self {
        Kilopascals(pa.0 / 1000.0)
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + 273.15)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(CubicMetersPerHour);
impl_arithmetic!(CubicMetersPerSecond);
impl_arithmetic!(Pascals);
impl_arithmetic!(Kilopascals);
impl_arithmetic!(Celsius);
impl_arithmetic!(Kelvin);
