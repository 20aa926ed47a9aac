//! # Cross-Section Property Formulas
//!
//! Geometric properties of rectangular hollow sections (mullion and transom
//! tubes, steel RHS reinforcement). Every property is the outer rectangle
//! minus the inner void.
//!
//! ## Notation
//!
//! - `W` = web length (depth, parallel to the strong-axis bending plane)
//! - `F` = flange length (width)
//! - `tw` = web wall thickness
//! - `tf` = flange wall thickness
//! - `I` = moment of inertia (second moment of area)
//! - `S` = elastic section modulus (I/c)
//! - `Z` = plastic section modulus
//! - `J` = torsion constant
//!
//! ```text
//!          F
//!     ┌─────────┐ ─┬─ tf
//!     │ ┌─────┐ │
//!   W │ │     │ │      x ── x  strong axis
//!     │ └─────┘ │
//!     └─────────┘
//!      tw     tw
//! ```
//!
//! ## References
//!
//! - Aluminum Design Manual, Part V: Section Properties
//! - AISC Steel Construction Manual, Part 1: Dimensions and Properties (HSS)
//! - Roark's Formulas for Stress and Strain, Table 10.7 (thin-walled tubes)

use serde::{Deserialize, Serialize};

// =============================================================================
// RECTANGULAR TUBE
// =============================================================================

/// Outer dimensions and wall thicknesses of a rectangular tube (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeDimensions {
    /// Web length W (mm)
    pub web_length: f64,
    /// Flange length F (mm)
    pub flange_length: f64,
    /// Web wall thickness tw (mm)
    pub web_thk: f64,
    /// Flange wall thickness tf (mm)
    pub flange_thk: f64,
}

impl TubeDimensions {
    /// Tube with different web and flange wall thicknesses
    pub fn new(web_length: f64, flange_length: f64, web_thk: f64, flange_thk: f64) -> Self {
        Self {
            web_length,
            flange_length,
            web_thk,
            flange_thk,
        }
    }

    /// Tube with a single wall thickness (steel RHS)
    pub fn uniform(web_length: f64, flange_length: f64, thk: f64) -> Self {
        Self::new(web_length, flange_length, thk, thk)
    }

    /// Inner void width (F - 2tw)
    #[inline]
    pub fn inner_flange(&self) -> f64 {
        self.flange_length - 2.0 * self.web_thk
    }

    /// Inner void depth (W - 2tf)
    #[inline]
    pub fn inner_web(&self) -> f64 {
        self.web_length - 2.0 * self.flange_thk
    }

    /// True when both walls are thinner than half the matching dimension
    pub fn is_hollow(&self) -> bool {
        self.web_thk > 0.0
            && self.flange_thk > 0.0
            && self.inner_flange() > 0.0
            && self.inner_web() > 0.0
    }
}

/// Cross-sectional area of a rectangular tube
///
/// # Formula
/// A = W·F − (W − 2tf)(F − 2tw)
///
/// # Example
/// ```rust
/// use facade_core::equations::section::{tube_area, TubeDimensions};
///
/// let rhs = TubeDimensions::uniform(100.0, 50.0, 4.0);
/// // 100×50 − 92×42 = 1136 mm²
/// assert!((tube_area(&rhs) - 1136.0).abs() < 1e-9);
/// ```
#[inline]
pub fn tube_area(t: &TubeDimensions) -> f64 {
    t.web_length * t.flange_length - t.inner_web() * t.inner_flange()
}

/// Strong-axis moment of inertia I_xx
///
/// # Formula
/// I_xx = F·W³/12 − (F − 2tw)(W − 2tf)³/12
#[inline]
pub fn tube_moment_of_inertia_x(t: &TubeDimensions) -> f64 {
    t.flange_length * t.web_length.powi(3) / 12.0 - t.inner_flange() * t.inner_web().powi(3) / 12.0
}

/// Weak-axis moment of inertia I_yy
///
/// # Formula
/// I_yy = W·F³/12 − (W − 2tf)(F − 2tw)³/12
#[inline]
pub fn tube_moment_of_inertia_y(t: &TubeDimensions) -> f64 {
    t.web_length * t.flange_length.powi(3) / 12.0 - t.inner_web() * t.inner_flange().powi(3) / 12.0
}

/// Elastic section modulus S = I / c
///
/// For a doubly symmetric tube `c` is half the dimension parallel to bending,
/// so S_x = I_xx / (W/2) and S_y = I_yy / (F/2).
#[inline]
pub fn section_modulus(moment_of_inertia: f64, extreme_fiber: f64) -> f64 {
    moment_of_inertia / extreme_fiber
}

/// Strong-axis plastic section modulus Z_x
///
/// # Formula
/// Z_x = [F·W² − (F − 2tw)(W − 2tf)²] / 4
#[inline]
pub fn tube_plastic_modulus_x(t: &TubeDimensions) -> f64 {
    (t.flange_length * t.web_length.powi(2) - t.inner_flange() * t.inner_web().powi(2)) / 4.0
}

/// Torsion constant of a thin-walled closed rectangular tube (Bredt)
///
/// # Formula
/// J = 2·tf·tw·(F − tw)²·(W − tf)² / (F·tw + W·tf − tw² − tf²)
///
/// With a uniform wall `t` this reduces to
/// J = 2t²(F − t)²(W − t)² / (F·t + W·t − 2t²).
#[inline]
pub fn tube_torsion_constant(t: &TubeDimensions) -> f64 {
    let numerator = 2.0
        * t.flange_thk
        * t.web_thk
        * (t.flange_length - t.web_thk).powi(2)
        * (t.web_length - t.flange_thk).powi(2);
    let denominator = t.flange_length * t.web_thk + t.web_length * t.flange_thk
        - t.web_thk.powi(2)
        - t.flange_thk.powi(2);
    numerator / denominator
}

/// Full set of tube properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeProperties {
    pub area: f64,
    pub i_xx: f64,
    pub i_yy: f64,
    pub s_x: f64,
    pub s_y: f64,
    pub z_x: f64,
    pub torsion_constant: f64,
}

/// Compute every tube property at once
///
/// Returns `None` unless the tube is hollow with positive walls.
pub fn tube_properties(t: &TubeDimensions) -> Option<TubeProperties> {
    if !t.is_hollow() {
        return None;
    }
    let i_xx = tube_moment_of_inertia_x(t);
    let i_yy = tube_moment_of_inertia_y(t);
    Some(TubeProperties {
        area: tube_area(t),
        i_xx,
        i_yy,
        s_x: section_modulus(i_xx, t.web_length / 2.0),
        s_y: section_modulus(i_yy, t.flange_length / 2.0),
        z_x: tube_plastic_modulus_x(t),
        torsion_constant: tube_torsion_constant(t),
    })
}

/// Parse a `W x F x T` dimension token from a profile name
///
/// The last whitespace-separated token is split on `x`; exactly three
/// positive numbers are required.
///
/// ```rust
/// use facade_core::equations::section::parse_dimension_triplet;
///
/// assert_eq!(parse_dimension_triplet("RHS 100x50x4"), Some((100.0, 50.0, 4.0)));
/// assert_eq!(parse_dimension_triplet("RHS 100x50"), None);
/// ```
pub fn parse_dimension_triplet(name: &str) -> Option<(f64, f64, f64)> {
    let token = name.split_whitespace().last()?;
    let parts: Vec<&str> = token.split('x').collect();
    if parts.len() != 3 {
        return None;
    }
    let web = crate::fields::parse_number(parts[0])?;
    let flange = crate::fields::parse_number(parts[1])?;
    let thk = crate::fields::parse_number(parts[2])?;
    if web <= 0.0 || flange <= 0.0 || thk <= 0.0 {
        return None;
    }
    Some((web, flange, thk))
}

// =============================================================================
// UNIT TESTS
// =============================================================================
