//! # Beam Formulas for Facade Members
//!
//! Closed-form maximum moment, shear and deflection for uniformly loaded
//! spans. Mullions are modelled as simple spans (floor-to-floor) or as a
//! two-span continuous member (continuous stack); transoms as fixed-end
//! spans for moment and simple spans for deflection.
//!
//! ## Notation
//!
//! - `w` = Uniform load intensity (force per unit length)
//! - `L` = Span length
//! - `E` = Modulus of elasticity
//! - `I` = Moment of inertia
//!
//! Units are whatever the caller supplies consistently. The frame engine
//! passes kN/m with metres for moments and N/mm with millimetres for
//! deflections.
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1
//! - AISC Steel Construction Manual, Table 3-23 (beam diagrams)

// =============================================================================
// SIMPLY-SUPPORTED SPAN
// =============================================================================

/// Maximum moment of a simply-supported span under uniform load
///
/// ```text
///    w w w w w w w w
///    ↓ ↓ ↓ ↓ ↓ ↓ ↓ ↓
///    ────────────────
///    △              △
///    ←──────L──────→
/// ```
///
/// # Formula
/// M_max = wL²/8 (at midspan)
///
/// # Example
/// ```rust
/// use facade_core::equations::beam::uniform_load_moment;
///
/// // 1.8 kN/m over 3.5 m
/// let m = uniform_load_moment(1.8, 3.5);
/// assert!((m - 2.75625).abs() < 1e-9);
/// ```
#[inline]
pub fn uniform_load_moment(w: f64, l: f64) -> f64 {
    w * l * l / 8.0
}

/// End shear of a simply-supported span under uniform load
///
/// # Formula
/// V_max = wL/2
#[inline]
pub fn uniform_load_shear(w: f64, l: f64) -> f64 {
    w * l / 2.0
}

/// Midspan deflection of a simply-supported span under uniform load
///
/// # Formula
/// δ_max = 5wL⁴/(384EI)
#[inline]
pub fn uniform_load_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    5.0 * w * l.powi(4) / (384.0 * e * i)
}

// =============================================================================
// FIXED-END SPAN
// =============================================================================

/// End moment of a fixed-fixed span under uniform load
///
/// # Formula
/// M_end = wL²/12
#[inline]
pub fn fixed_end_uniform_moment(w: f64, l: f64) -> f64 {
    w * l * l / 12.0
}

// =============================================================================
// TWO-SPAN CONTINUOUS MEMBER
// Equal spans, uniform load on both
// =============================================================================

/// Interior-support shear of a two-span continuous member
///
/// # Formula
/// V = 5wL/8
#[inline]
pub fn two_span_interior_shear(w: f64, l: f64) -> f64 {
    w * l * 5.0 / 8.0
}

/// Interior-support reaction of a two-span continuous member
///
/// # Formula
/// R_B = 10wL/8
#[inline]
pub fn two_span_interior_reaction(w: f64, l: f64) -> f64 {
    w * l * 10.0 / 8.0
}

/// Maximum deflection of a two-span continuous member
///
/// # Formula
/// δ_max = wL⁴/(185EI) (at 0.4215L from the end support)
#[inline]
pub fn two_span_max_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    w * l.powi(4) / (185.0 * e * i)
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    #[test]
    fn test_simple_span_moment_and_shear() {
        assert!(approx_eq(uniform_load_moment(2.0, 4.0), 4.0));
        assert!(approx_eq(uniform_load_shear(2.0, 4.0), 4.0));
    }

    #[test]
    fn test_fixed_end_moment_is_two_thirds_of_simple() {
        let simple = uniform_load_moment(1.5, 1.2);
        let fixed = fixed_end_uniform_moment(1.5, 1.2);
        assert!(approx_eq(fixed / simple, 8.0 / 12.0));
    }

    #[test]
    fn test_two_span_coefficients() {
        assert!(approx_eq(two_span_interior_shear(8.0, 1.0), 5.0));
        assert!(approx_eq(two_span_interior_reaction(8.0, 1.0), 10.0));
    }

    #[test]
    fn test_deflections() {
        // w = 1 N/mm, L = 1000 mm, E = 70000 MPa, I = 1e6 mm⁴
        let simple = uniform_load_deflection(1.0, 1000.0, 70_000.0, 1.0e6);
        assert!(approx_eq(simple, 5.0e12 / (384.0 * 7.0e10)));
        let continuous = two_span_max_deflection(1.0, 1000.0, 70_000.0, 1.0e6);
        // Continuity stiffens the span: 1/185 < 5/384
        assert!(continuous < simple * 0.42);
    }
}
