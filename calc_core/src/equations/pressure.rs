//! # Internal Pressure Formulas
//!
//! Required wall thickness of a cylindrical shell under internal pressure,
//! in the thin-wall form used by pressure-vessel and piping codes
//! (inside diameter basis).
//!
//! ## Notation
//!
//! - `p` = Design pressure (MPa)
//! - `D` = Inside diameter (mm)
//! - `σ` = Allowable stress at design temperature (MPa)
//! - `φ` = Weld joint coefficient, 0 < φ ≤ 1
//! - `t` = Calculated wall thickness (mm), before corrosion allowance
//!
//! Units only need to be consistent: MPa with mm gives mm.

/// Required wall thickness
///
/// # Formula
/// t = p·D / (2·σ·φ − p)
///
/// Only meaningful when 2·σ·φ > p; callers check this before use.
#[inline]
pub fn required_thickness(p: f64, d: f64, sigma: f64, phi: f64) -> f64 {
    p * d / (2.0 * sigma * phi - p)
}

/// Pressure a wall of thickness `t` can carry
///
/// # Formula
/// [p] = 2·σ·φ·t / (D + t)
#[inline]
pub fn allowable_pressure(t: f64, d: f64, sigma: f64, phi: f64) -> f64 {
    2.0 * sigma * phi * t / (d + t)
}

/// Linear interpolation over a tabulated curve.
///
/// `xs` must be strictly increasing and the same length as `ys`. Returns
/// `None` when `x` lies outside the tabulated range or the table is empty.
///
/// # Example
/// ```rust
/// use calc_core::equations::pressure::interpolate;
///
/// let temps = [20.0, 100.0, 200.0];
/// let stress = [117.0, 117.0, 108.0];
/// assert_eq!(interpolate(&temps, &stress, 150.0), Some(112.5));
/// assert_eq!(interpolate(&temps, &stress, 250.0), None);
/// ```
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    let first = *xs.first()?;
    let last = *xs.last()?;
    if xs.len() != ys.len() || x < first || x > last {
        return None;
    }
    for (i, window) in xs.windows(2).enumerate() {
        let (x0, x1) = (window[0], window[1]);
        if x >= x0 && x <= x1 {
            let ratio = (x - x0) / (x1 - x0);
            return Some(ys[i] + ratio * (ys[i + 1] - ys[i]));
        }
    }
    // single-point table
    Some(ys[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_thickness() {
        // D = 1000 mm, p = 1 MPa, σ = 117 MPa, φ = 1  ->  1000/233
        let t = required_thickness(1.0, 1000.0, 117.0, 1.0);
        assert!((t - 4.291845).abs() < 1e-6);
    }

    #[test]
    fn test_allowable_pressure_inverts_thickness() {
        let t = required_thickness(2.5, 600.0, 138.0, 0.9);
        let p = allowable_pressure(t, 600.0, 138.0, 0.9);
        assert!((p - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_endpoints_and_interior() {
        let xs = [-29.0, 20.0, 50.0];
        let ys = [117.0, 117.0, 110.0];
        assert_eq!(interpolate(&xs, &ys, -29.0), Some(117.0));
        assert_eq!(interpolate(&xs, &ys, 50.0), Some(110.0));
        assert!((interpolate(&xs, &ys, 35.0).unwrap() - 113.5).abs() < 1e-12);
        assert_eq!(interpolate(&xs, &ys, -40.0), None);
    }

    #[test]
    fn test_interpolate_degenerate_tables() {
        assert_eq!(interpolate(&[], &[], 1.0), None);
        assert_eq!(interpolate(&[20.0], &[100.0], 20.0), Some(100.0));
        assert_eq!(interpolate(&[20.0, 30.0], &[100.0], 25.0), None);
    }
}
