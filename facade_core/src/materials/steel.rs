//! Steel RHS Reinforcement Capacity (AISC 360-16 Section F7)
//!
//! Steel tubes are inserted into aluminum mullions to form composite
//! members. A steel section is described by its outer web and flange
//! lengths and a single wall thickness, either from a library record or
//! parsed from a `W x F x T` name such as `"RHS 100x50x4"`.
//!
//! ## Flange local buckling
//!
//! | Class | Condition | M_n |
//! |-------|-----------|-----|
//! | Compact | λ_f ≤ λ_p | M_p = F_y·Z_x |
//! | Noncompact | λ_p < λ_f ≤ λ_r | M_p − (M_p − F_y·S_x)(3.57·λ_f·√(F_y/E) − 4.0) ≤ M_p |
//! | Slender | λ_f > λ_r | F_y·S_e |
//!
//! with λ_p = 1.12√(E/F_y) and λ_r = 1.40√(E/F_y). The effective modulus
//! S_e removes the ineffective part of the compression flange (F7-4)
//! without shifting the neutral axis.

use serde::{Deserialize, Serialize};

use crate::equations::section::{parse_dimension_triplet, tube_properties, TubeDimensions};
use crate::units::round_to;

/// Modulus of elasticity for steel (MPa)
pub const STEEL_E_MPA: f64 = 210_000.0;

/// Yield stress of the reinforcement tubes (MPa)
pub const STEEL_FY_MPA: f64 = 318.0;

/// Resistance factor for flexure
pub const PHI_FLEXURE: f64 = 0.9;

/// Flange local buckling classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlangeClass {
    Compact,
    Noncompact,
    Slender,
}

/// Flexural capacity of a steel RHS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelCapacity {
    pub area: f64,
    #[serde(rename = "I_xx")]
    pub i_xx: f64,
    #[serde(rename = "I_yy")]
    pub i_yy: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "S_x")]
    pub s_x: f64,
    #[serde(rename = "S_y")]
    pub s_y: f64,
    #[serde(rename = "Z_x")]
    pub z_x: f64,
    pub tor_constant: f64,
    /// Flat flange width F − 2t
    pub b: f64,
    /// Flat web height W − 2t
    pub h: f64,
    pub lambda_f: f64,
    pub lambda_p_f: f64,
    pub lambda_r_f: f64,
    pub lambda_w: f64,
    pub lambda_p_w: f64,
    pub lambda_r_w: f64,
    pub flange_class: FlangeClass,
    /// Nominal moment (kN·m)
    #[serde(rename = "Mn")]
    pub mn: f64,
    /// Design moment (kN·m)
    #[serde(rename = "phi_Mn")]
    pub phi_mn: f64,
}

/// Capacity of a steel tube from its dimensions (mm)
///
/// Returns `None` unless every dimension is positive and the wall leaves a
/// hollow core.
///
/// # Example
/// ```rust
/// use facade_core::materials::steel::{steel_tube_capacity, FlangeClass};
///
/// let cap = steel_tube_capacity(100.0, 50.0, 4.0).unwrap();
/// assert_eq!(cap.flange_class, FlangeClass::Compact);
/// assert!(cap.phi_mn > 0.0);
/// ```
pub fn steel_tube_capacity(web_length: f64, flange_length: f64, thk: f64) -> Option<SteelCapacity> {
    if web_length <= 0.0 || flange_length <= 0.0 || thk <= 0.0 {
        return None;
    }
    let tube = TubeDimensions::uniform(web_length, flange_length, thk);
    let props = tube_properties(&tube)?;

    let b = flange_length - 2.0 * thk;
    let h = web_length - 2.0 * thk;
    let ratio = (STEEL_E_MPA / STEEL_FY_MPA).sqrt();

    let lambda_f = b / thk;
    let lambda_p_f = 1.12 * ratio;
    let lambda_r_f = 1.4 * ratio;
    let lambda_w = h / thk;
    let lambda_p_w = 2.42 * ratio;
    let lambda_r_w = 5.7 * ratio;

    let m_p = props.z_x * STEEL_FY_MPA;
    let (flange_class, mn_nmm) = if lambda_f <= lambda_p_f {
        (FlangeClass::Compact, m_p)
    } else if lambda_f <= lambda_r_f {
        let reduced = m_p
            - (m_p - STEEL_FY_MPA * props.s_x)
                * (3.57 * lambda_f * (STEEL_FY_MPA / STEEL_E_MPA).sqrt() - 4.0);
        (FlangeClass::Noncompact, reduced.min(m_p))
    } else {
        let b_e = (1.92 * thk * ratio * (1.0 - 0.38 / lambda_f * ratio)).clamp(0.0, b);
        let lever = (web_length - thk) / 2.0;
        let i_eff = props.i_xx - (b - b_e) * thk * lever.powi(2);
        let s_e = i_eff / (web_length / 2.0);
        (FlangeClass::Slender, STEEL_FY_MPA * s_e)
    };
    let mn = mn_nmm / 1.0e6;

    Some(SteelCapacity {
        area: round_to(props.area, 1),
        i_xx: round_to(props.i_xx, 1),
        i_yy: round_to(props.i_yy, 1),
        y: round_to(web_length / 2.0, 1),
        x: round_to(flange_length / 2.0, 1),
        s_x: round_to(props.s_x, 1),
        s_y: round_to(props.s_y, 1),
        z_x: round_to(props.z_x, 1),
        tor_constant: round_to(props.torsion_constant, 1),
        b: round_to(b, 1),
        h: round_to(h, 1),
        lambda_f: round_to(lambda_f, 2),
        lambda_p_f: round_to(lambda_p_f, 2),
        lambda_r_f: round_to(lambda_r_f, 2),
        lambda_w: round_to(lambda_w, 2),
        lambda_p_w: round_to(lambda_p_w, 2),
        lambda_r_w: round_to(lambda_r_w, 2),
        flange_class,
        mn: round_to(mn, 2),
        phi_mn: round_to(PHI_FLEXURE * mn, 2),
    })
}

/// Capacity of a steel tube named `"... W x F x T"`
///
/// ```rust
/// use facade_core::materials::steel::steel_capacity_from_name;
///
/// assert!(steel_capacity_from_name("RHS 100x50x4").is_some());
/// assert!(steel_capacity_from_name("RHS custom").is_none());
/// ```
pub fn steel_capacity_from_name(name: &str) -> Option<SteelCapacity> {
    let (web, flange, thk) = parse_dimension_triplet(name)?;
    steel_tube_capacity(web, flange, thk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rhs_100x50x4_compact() {
        let cap = steel_tube_capacity(100.0, 50.0, 4.0).unwrap();
        assert_eq!(cap.area, 1136.0);
        assert_eq!(cap.b, 42.0);
        assert_eq!(cap.h, 92.0);
        assert_eq!(cap.lambda_f, 10.5);
        assert_eq!(cap.flange_class, FlangeClass::Compact);
        // M_n = 36128 × 318 / 1e6
        assert_eq!(cap.mn, 11.49);
        assert_eq!(cap.phi_mn, 10.34);
        assert_eq!(cap.y, 50.0);
        assert_eq!(cap.x, 25.0);
    }

    #[test]
    fn test_slenderness_limits() {
        let cap = steel_tube_capacity(100.0, 50.0, 4.0).unwrap();
        // √(210000/318) = 25.698
        assert_eq!(cap.lambda_p_f, 28.78);
        assert_eq!(cap.lambda_r_f, 35.98);
        assert_eq!(cap.lambda_p_w, 62.19);
        assert_eq!(cap.lambda_r_w, 146.48);
    }

    #[test]
    fn test_noncompact_flange_reduces_capacity() {
        // b/t = (100 − 4)/3 = 32 falls between λ_p and λ_r
        let cap = steel_tube_capacity(150.0, 102.0, 3.0).unwrap();
        assert_eq!(cap.flange_class, FlangeClass::Noncompact);
        let m_p = cap.z_x * STEEL_FY_MPA / 1.0e6;
        assert!(cap.mn < m_p);
        assert!(cap.mn > cap.s_x * STEEL_FY_MPA / 1.0e6 * 0.99);
    }

    #[test]
    fn test_slender_flange_below_yield_moment() {
        let cap = steel_tube_capacity(150.0, 150.0, 3.0).unwrap();
        assert_eq!(cap.flange_class, FlangeClass::Slender);
        assert!(cap.mn < cap.s_x * STEEL_FY_MPA / 1.0e6);
        assert!(cap.mn > 0.0);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(steel_tube_capacity(0.0, 50.0, 4.0).is_none());
        assert!(steel_tube_capacity(100.0, 50.0, 30.0).is_none());
        assert!(steel_capacity_from_name("RHS 100x50").is_none());
    }

    #[test]
    fn test_capacity_from_name_matches_dimensions() {
        let by_name = steel_capacity_from_name("RHS 100x50x4").unwrap();
        let by_dims = steel_tube_capacity(100.0, 50.0, 4.0).unwrap();
        assert_eq!(by_name, by_dims);
    }
}
