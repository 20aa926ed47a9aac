//! # Units and Rounding
//!
//! The engine works in millimetres, Newtons and MPa internally. Loads are
//! reported in kPa (kN/m²), line loads in kN/m (numerically N/mm), moments
//! in kN·m and forces in kN. Wind environment geometry is given in metres.
//!
//! ## Conversions Used Throughout
//!
//! - kPa × mm ÷ 1000 = kN/m (area load over a tributary width)
//! - N ÷ 1000 = kN
//!
//! ## Example
//!
//! ```rust
//! use facade_core::units::{mm_to_m, n_to_kn, round_to};
//!
//! assert_eq!(mm_to_m(1200.0), 1.2);
//! assert_eq!(n_to_kn(2_500.0), 2.5);
//! assert_eq!(round_to(16.6666, 2), 16.67);
//! assert_eq!(round_to(0.045, 2), 0.04);
//! ```

/// Millimetres per metre
pub const MM_PER_M: f64 = 1000.0;

/// Newtons per kilonewton
pub const N_PER_KN: f64 = 1000.0;

/// Convert millimetres to metres
#[inline]
pub fn mm_to_m(mm: f64) -> f64 {
    mm / MM_PER_M
}

/// Convert square millimetres to square metres
#[inline]
pub fn mm2_to_m2(mm2: f64) -> f64 {
    mm2 / (MM_PER_M * MM_PER_M)
}

/// Convert N to kN
#[inline]
pub fn n_to_kn(n: f64) -> f64 {
    n / N_PER_KN
}

/// Round to a fixed number of decimals.
///
/// The exact binary value is rounded to the nearest decimal, ties to even,
/// so `0.045` (stored just below the tie) gives `0.04` and `0.125` gives
/// `0.12`. All reported numbers pass through this function; rounded joint
/// forces and reactions also feed later formulas.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if decimals < 0 {
        let scale = 10f64.powi(-decimals);
        return round_to(value / scale, 0) * scale;
    }
    // Float formatting is exact-decimal and correctly rounded
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Round an optional value, keeping `None` as `None`
#[inline]
pub fn round_opt(value: Option<f64>, decimals: i32) -> Option<f64> {
    value.map(|v| round_to(v, decimals))
}

/// Round up to the next multiple of `increment` (e.g. 0.5 mm steps)
#[inline]
pub fn ceil_to_increment(value: f64, increment: f64) -> f64 {
    (value / increment).ceil() * increment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234567, 2), 1.23);
        assert_eq!(round_to(1.235001, 2), 1.24);
        assert_eq!(round_to(-0.456, 1), -0.5);
        assert_eq!(round_to(249.6, 0), 250.0);
        assert_eq!(round_to(1234.0, -2), 1200.0);
        assert!(round_to(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_round_to_decimal_ties() {
        // Stored just below the decimal tie
        assert_eq!(round_to(0.045, 2), 0.04);
        assert_eq!(round_to(0.075, 2), 0.07);
        assert_eq!(round_to(0.425, 2), 0.42);
        assert_eq!(round_to(2.675, 2), 2.67);
        // Stored just above the tie
        assert_eq!(round_to(3.825, 2), 3.83);
        // Exact binary ties go to the even digit
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        // Products that land on a tie
        assert_eq!(round_to(0.3 * 1.2 / 4.0 * 0.5, 2), 0.04);
        assert_eq!(round_to(1.7 * 1.0 * 4.5 / 2.0, 2), 3.82);
    }

    #[test]
    fn test_ceil_to_increment() {
        assert_eq!(ceil_to_increment(5.01, 0.5), 5.5);
        assert_eq!(ceil_to_increment(5.5, 0.5), 5.5);
        assert_eq!(ceil_to_increment(0.1, 0.5), 0.5);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(mm_to_m(3500.0), 3.5);
        assert_eq!(mm2_to_m2(2_000_000.0), 2.0);
        assert_eq!(n_to_kn(1500.0), 1.5);
        assert_eq!(round_opt(None, 2), None);
        assert_eq!(round_opt(Some(0.125), 1), Some(0.1));
    }
}
