//! # Hydraulic Formulas
//!
//! Closed-form relations for flow through pipes and orifices. All functions
//! take and return SI base units (metres, seconds, kilograms, pascals).
//!
//! ## Notation
//!
//! - `d`, `D` = Diameter (m)
//! - `Q` = Volumetric flow rate (m³/s)
//! - `A` = Flow area (m²)
//! - `v` = Mean velocity (m/s)
//! - `μ` = Discharge coefficient (orifice) or dynamic viscosity (pipe)
//! - `ρ` = Density (kg/m³)
//! - `g` = Gravitational acceleration (m/s²)
//! - `ε/D` = Relative roughness
//!
//! ## References
//!
//! - Idelchik, Handbook of Hydraulic Resistance, 4th Edition
//! - Swamee & Jain (1976), explicit approximation of the Colebrook equation

/// Reynolds number below which pipe flow is treated as laminar
pub const LAMINAR_REYNOLDS_LIMIT: f64 = 2300.0;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Area of a circle of diameter `d`
///
/// # Formula
/// A = π·d²/4
///
/// # Example
/// ```rust
/// use calc_core::equations::hydraulics::circle_area;
///
/// let a = circle_area(std::f64::consts::PI, 0.01);
/// assert!((a - 7.853981634e-5).abs() < 1e-12);
/// ```
#[inline]
pub fn circle_area(pi: f64, d: f64) -> f64 {
    pi * d * d / 4.0
}

/// Area of an annulus (pipe wall cross-section)
///
/// # Formula
/// A = π/4·(D² − d²)
#[inline]
pub fn annulus_area(pi: f64, outer_d: f64, inner_d: f64) -> f64 {
    pi / 4.0 * (outer_d * outer_d - inner_d * inner_d)
}

// =============================================================================
// ORIFICE DISCHARGE
// Liquid leaving a vessel through n identical holes
// =============================================================================

/// Mean velocity through the combined hole area
///
/// # Formula
/// v = Q/A
#[inline]
pub fn mean_velocity(q: f64, area: f64) -> f64 {
    q / area
}

/// Liquid head above the holes needed to pass the flow
///
/// ```text
///   ───────────────  liquid surface
///        │ H
///   ──○──○──○──○──   perforated plate, n holes of diameter d
/// ```
///
/// # Formula (Torricelli with discharge coefficient)
/// H = (v/μ)²/(2g)
///
/// # Arguments
/// * `v` - Mean velocity through the holes (m/s)
/// * `mu` - Discharge coefficient, 0 < μ ≤ 1
/// * `g` - Gravitational acceleration (m/s²)
#[inline]
pub fn orifice_head(v: f64, mu: f64, g: f64) -> f64 {
    let ideal_v = v / mu;
    ideal_v * ideal_v / (2.0 * g)
}

// =============================================================================
// PIPE FRICTION
// =============================================================================

/// Reynolds number Re = ρ·v·D/μ
#[inline]
pub fn reynolds_number(density: f64, v: f64, d: f64, viscosity: f64) -> f64 {
    density * v * d / viscosity
}

/// Darcy friction factor
///
/// # Formulas
/// - Laminar (Re < 2300): f = 64/Re
/// - Turbulent: f = 0.25 / [log₁₀(ε/(3.7D) + 5.74/Re⁰·⁹)]²  (Swamee-Jain)
///
/// `relative_roughness` is ε/D.
pub fn darcy_friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds < LAMINAR_REYNOLDS_LIMIT {
        64.0 / reynolds
    } else {
        let log_term = (relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9)).log10();
        0.25 / (log_term * log_term)
    }
}

/// Darcy-Weisbach pressure drop
///
/// # Formula
/// Δp = f·(L/D)·ρ·v²/2
#[inline]
pub fn darcy_weisbach_pressure_drop(f: f64, length: f64, d: f64, density: f64, v: f64) -> f64 {
    f * (length / d) * 0.5 * density * v * v
}
