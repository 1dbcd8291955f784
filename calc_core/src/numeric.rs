//! Rounding and finiteness helpers shared by every calculator.
//!
//! All published outputs go through [`round_to`], which rounds half away
//! from zero at a fixed number of decimals.

use crate::errors::{CalcError, CalcResult};

/// Round `value` to `decimals` places, half away from zero.
///
/// ```rust
/// use calc_core::numeric::round_to;
///
/// assert_eq!(round_to(2.345, 1), 2.3);
/// assert_eq!(round_to(0.125, 2), 0.13);
/// assert_eq!(round_to(-0.125, 2), -0.13);
/// assert_eq!(round_to(1234.5, 0), 1235.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Reject NaN and infinities produced by a formula.
pub fn ensure_finite(value: f64, calculation_type: &str, what: &str) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::calculation_failed(
            calculation_type,
            format!("{} is not a finite number", what),
        ))
    }
}
