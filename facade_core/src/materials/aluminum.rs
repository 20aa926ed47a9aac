//! # Aluminum Profile Flexural Capacity
//!
//! Local-buckling reduced flexural strength of extruded aluminum tubes per
//! the Aluminum Design Manual (ADM). Two profile kinds:
//!
//! - **Stick**: catalog tube described only by its outer dimensions and wall
//!   thicknesses; section properties are derived and the web buckling
//!   coefficient is fixed at m = 0.65.
//! - **Manual**: arbitrary extrusion with user-supplied I_xx, I_yy, area,
//!   neutral-axis distances and plastic centroids; m is derived from the
//!   tube eccentricity.
//!
//! ## Buckling constants (ADM Table B.4.1)
//!
//! ```text
//! B_p  = F_y·(1 + (F_y/10342.5)^⅓)      D_p  = (B_p/10)·√(B_p/E)
//! B_br = 1.3F_y·(1 + (F_y/2344.3)^⅓)    D_br = (B_br/20)·√(6B_br/E)
//! ```
//!
//! with E = 70000 MPa. Flange compression uses the flat-plate curve (B_p,
//! D_p) and web bending the braced-web curve (B_br, D_br).
//!
//! ## Capacity
//!
//! M_n = min(M_yield, M_lbw + M_lbf) and φM_n = 0.9·M_n, in kN·m.

use serde::{Deserialize, Serialize};

use crate::equations::section::{tube_properties, TubeDimensions};
use crate::units::round_to;

/// Modulus of elasticity for aluminum (MPa)
pub const ALUMINUM_E_MPA: f64 = 70_000.0;

/// Resistance factor for flexure
pub const PHI_FLEXURE: f64 = 0.9;

/// Web buckling coefficient for catalog stick profiles
pub const STICK_BUCKLING_COEFFICIENT: f64 = 0.65;

/// Plate buckling constants derived from the yield stress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucklingConstants {
    pub b_p: f64,
    pub d_p: f64,
    pub b_br: f64,
    pub d_br: f64,
}

impl BucklingConstants {
    /// Constants for yield stress `f_y` (MPa)
    pub fn for_yield(f_y: f64) -> Self {
        let b_p = f_y * (1.0 + (f_y / (1500.0 * 6.895)).powf(0.3333));
        let d_p = (b_p / 10.0) * (b_p / ALUMINUM_E_MPA).sqrt();
        let b_br = 1.3 * f_y * (1.0 + (f_y / (340.0 * 6.895)).powf(0.3333));
        let d_br = (b_br / 20.0) * (6.0 * b_br / ALUMINUM_E_MPA).sqrt();
        Self { b_p, d_p, b_br, d_br }
    }

    /// Flange slenderness limits (λ1, λ2)
    pub fn flange_limits(&self, f_y: f64) -> (f64, f64) {
        (
            (self.b_p - f_y) / (1.6 * self.d_p),
            0.35 * self.b_p / (1.6 * self.d_p),
        )
    }

    /// Web slenderness limits (λ1, λ2) for buckling coefficient `m`
    pub fn web_limits(&self, f_y: f64, m: f64) -> (f64, f64) {
        (
            (self.b_br - 1.5 * f_y) / (m * self.d_br),
            0.5 * self.b_br / (m * self.d_br),
        )
    }

    /// Web bending stress F_b for slenderness b/t
    pub fn web_stress(&self, f_y: f64, m: f64, slenderness: f64, lambda1: f64) -> f64 {
        if slenderness <= lambda1 {
            1.5 * f_y
        } else {
            self.b_br - m * self.d_br * slenderness
        }
    }

    /// Flange compression stress F_c for slenderness b/t
    pub fn flange_stress(&self, f_y: f64, slenderness: f64, lambda1: f64) -> f64 {
        if slenderness <= lambda1 {
            f_y
        } else {
            self.b_p - 5.0 * self.d_p * slenderness
        }
    }
}

/// Geometry shared by both profile kinds (mm, MPa)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileGeometry {
    pub web_length: f64,
    pub flange_length: f64,
    pub web_thk: f64,
    pub flange_thk: f64,
    pub f_y: f64,
}

/// Section data supplied for a manual profile (mm, mm², mm⁴)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualSection {
    /// Distance from the x-axis to the extreme fiber
    pub y: f64,
    /// Distance from the y-axis to the extreme fiber
    pub x: f64,
    pub i_xx: f64,
    pub i_yy: f64,
    pub area: f64,
    /// Plastic centroid distance of the upper half
    pub plastic_x: f64,
    /// Plastic centroid distance of the lower half
    pub plastic_y: f64,
}

/// Flexural capacity result of an aluminum profile
///
/// Section properties are rounded to 1 decimal, `m` and slenderness limits
/// to 2 decimals. Moments are kN·m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AluminumCapacity {
    pub area: f64,
    #[serde(rename = "I_xx")]
    pub i_xx: f64,
    #[serde(rename = "I_yy")]
    pub i_yy: f64,
    pub web_thk: f64,
    pub flange_thk: f64,
    #[serde(rename = "S_x")]
    pub s_x: f64,
    #[serde(rename = "S_y")]
    pub s_y: f64,
    #[serde(rename = "Z_x")]
    pub z_x: f64,
    /// Only for stick profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tor_constant: Option<f64>,
    pub web_b: f64,
    pub flange_b: f64,
    /// Only for manual profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_c: Option<f64>,
    /// Only for manual profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_o: Option<f64>,
    pub m: f64,
    #[serde(rename = "B_p")]
    pub b_p: f64,
    #[serde(rename = "D_p")]
    pub d_p: f64,
    #[serde(rename = "B_br")]
    pub b_br: f64,
    #[serde(rename = "D_br")]
    pub d_br: f64,
    pub flange_lambda1: f64,
    pub flange_lambda2: f64,
    pub web_lambda1: f64,
    pub web_lambda2: f64,
    /// Only for manual profiles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_d: Option<f64>,
    #[serde(rename = "I_w")]
    pub i_w: f64,
    #[serde(rename = "I_f")]
    pub i_f: f64,
    pub c_w: f64,
    pub c_f: f64,
    #[serde(rename = "F_b")]
    pub f_b: f64,
    #[serde(rename = "F_c")]
    pub f_c: f64,
    #[serde(rename = "Mn_yield")]
    pub mn_yield: f64,
    #[serde(rename = "Mn_lbw")]
    pub mn_lbw: f64,
    #[serde(rename = "Mn_lbf")]
    pub mn_lbf: f64,
    #[serde(rename = "Mn_lb")]
    pub mn_lb: f64,
    #[serde(rename = "phi_Mn")]
    pub phi_mn: f64,
}

/// Flat widths of the web and flange elements
fn element_widths(g: &ProfileGeometry) -> (f64, f64) {
    let web_b = g.web_length - 2.0 * (g.flange_thk - 0.5);
    let flange_b = g.flange_length - 2.0 * (g.web_thk - 0.5);
    (web_b, flange_b)
}

/// Capacity of a catalog stick profile
///
/// Returns `None` unless all dimensions and F_y are positive and the walls
/// leave a hollow core.
///
/// # Example
/// ```rust
/// use facade_core::materials::aluminum::{stick_profile_capacity, ProfileGeometry};
///
/// let cap = stick_profile_capacity(&ProfileGeometry {
///     web_length: 150.0,
///     flange_length: 65.0,
///     web_thk: 2.5,
///     flange_thk: 3.0,
///     f_y: 160.0,
/// })
/// .unwrap();
/// assert!(cap.phi_mn > 0.0);
/// assert_eq!(cap.m, 0.65);
/// ```
pub fn stick_profile_capacity(g: &ProfileGeometry) -> Option<AluminumCapacity> {
    if g.f_y <= 0.0 {
        return None;
    }
    let tube = TubeDimensions::new(g.web_length, g.flange_length, g.web_thk, g.flange_thk);
    let props = tube_properties(&tube)?;
    let m = STICK_BUCKLING_COEFFICIENT;
    let (web_b, flange_b) = element_widths(g);
    let k = BucklingConstants::for_yield(g.f_y);
    let (flange_lambda1, flange_lambda2) = k.flange_limits(g.f_y);
    let (web_lambda1, web_lambda2) = k.web_limits(g.f_y, m);

    let mn_yield = (props.z_x * g.f_y).min(1.5 * g.f_y * props.s_x) / 1.0e6;

    let i_w = 2.0 * (g.web_thk * web_b.powi(3) / 12.0);
    let c_w = web_b / 2.0;
    let f_b = k.web_stress(g.f_y, m, web_b / g.web_thk, web_lambda1);
    let f_c = k.flange_stress(g.f_y, flange_b / g.flange_thk, flange_lambda1);
    let i_f = props.i_xx - i_w;
    let c_f = (g.web_length - g.flange_thk) / 2.0;

    let mn_lbw = f_b * i_w / c_w / 1.0e6;
    let mn_lbf = f_c * i_f / c_f / 1.0e6;
    let mn_lb = mn_lbw + mn_lbf;
    let phi_mn = PHI_FLEXURE * mn_yield.min(mn_lb);

    Some(AluminumCapacity {
        area: round_to(props.area, 1),
        i_xx: round_to(props.i_xx, 1),
        i_yy: round_to(props.i_yy, 1),
        web_thk: round_to(g.web_thk, 1),
        flange_thk: round_to(g.flange_thk, 1),
        s_x: round_to(props.s_x, 1),
        s_y: round_to(props.s_y, 1),
        z_x: round_to(props.z_x, 1),
        tor_constant: Some(round_to(props.torsion_constant, 1)),
        web_b: round_to(web_b, 1),
        flange_b: round_to(flange_b, 1),
        c_c: None,
        c_o: None,
        m: round_to(m, 2),
        b_p: round_to(k.b_p, 1),
        d_p: round_to(k.d_p, 1),
        b_br: round_to(k.b_br, 1),
        d_br: round_to(k.d_br, 1),
        flange_lambda1: round_to(flange_lambda1, 2),
        flange_lambda2: round_to(flange_lambda2, 2),
        web_lambda1: round_to(web_lambda1, 2),
        web_lambda2: round_to(web_lambda2, 2),
        web_d: None,
        i_w: round_to(i_w, 1),
        i_f: round_to(i_f, 1),
        c_w: round_to(c_w, 1),
        c_f: round_to(c_f, 1),
        f_b: round_to(f_b, 1),
        f_c: round_to(f_c, 1),
        mn_yield: round_to(mn_yield, 1),
        mn_lbw: round_to(mn_lbw, 1),
        mn_lbf: round_to(mn_lbf, 1),
        mn_lb: round_to(mn_lb, 1),
        phi_mn: round_to(phi_mn, 1),
    })
}

/// Capacity of a manual (user-specified) profile
///
/// The web is treated as two plates offset from the neutral axis; the
/// buckling coefficient follows from the compression depth c_c and the
/// overhang c_o:
///
/// ```text
/// c_c = Y − t_f − 0.5      c_o = web_b − c_c
/// m   = 1.15 − c_o/(2c_c)
/// ```
///
/// Returns `None` unless every value is positive and c_c > 0.
pub fn manual_profile_capacity(g: &ProfileGeometry, s: &ManualSection) -> Option<AluminumCapacity> {
    let values = [
        g.web_length,
        g.flange_length,
        g.web_thk,
        g.flange_thk,
        g.f_y,
        s.y,
        s.x,
        s.i_xx,
        s.i_yy,
        s.area,
        s.plastic_x,
        s.plastic_y,
    ];
    if values.iter().any(|v| *v <= 0.0) {
        return None;
    }

    let s_x = s.i_xx / s.y;
    let s_y = s.i_yy / s.x;
    let z_x = 0.5 * s.area * (s.plastic_x + s.plastic_y);

    let (web_b, flange_b) = element_widths(g);
    let c_c = s.y - g.flange_thk - 0.5;
    if c_c <= 0.0 {
        return None;
    }
    let c_o = web_b - c_c;
    let m = 1.15 - c_o / (2.0 * c_c);

    let k = BucklingConstants::for_yield(g.f_y);
    let (flange_lambda1, flange_lambda2) = k.flange_limits(g.f_y);
    let (web_lambda1, web_lambda2) = k.web_limits(g.f_y, m);

    let mn_yield = (z_x * g.f_y).min(1.5 * g.f_y * s.i_xx / s.y) / 1.0e6;

    let web_d = s.y - web_b / 2.0;
    let i_w = 2.0 * (g.web_thk * web_b.powi(3) / 12.0 + g.web_thk * web_b * web_d.powi(2));
    let f_b = k.web_stress(g.f_y, m, web_b / g.web_thk, web_lambda1);
    let f_c = k.flange_stress(g.f_y, flange_b / g.flange_thk, flange_lambda1);
    let i_f = s.i_xx - i_w;
    let c_f = web_b / 2.0;

    let mn_lbw = f_b * (i_w / c_c) / 1.0e6;
    let mn_lbf = f_c * (i_f / c_f) / 1.0e6;
    let mn_lb = mn_lbw + mn_lbf;
    let phi_mn = PHI_FLEXURE * mn_yield.min(mn_lb);

    Some(AluminumCapacity {
        area: round_to(s.area, 1),
        i_xx: round_to(s.i_xx, 1),
        i_yy: round_to(s.i_yy, 1),
        web_thk: round_to(g.web_thk, 1),
        flange_thk: round_to(g.flange_thk, 1),
        s_x: round_to(s_x, 1),
        s_y: round_to(s_y, 1),
        z_x: round_to(z_x, 1),
        tor_constant: None,
        web_b: round_to(web_b, 1),
        flange_b: round_to(flange_b, 1),
        c_c: Some(round_to(c_c, 1)),
        c_o: Some(round_to(c_o, 1)),
        m: round_to(m, 2),
        b_p: round_to(k.b_p, 1),
        d_p: round_to(k.d_p, 1),
        b_br: round_to(k.b_br, 1),
        d_br: round_to(k.d_br, 1),
        flange_lambda1: round_to(flange_lambda1, 2),
        flange_lambda2: round_to(flange_lambda2, 2),
        web_lambda1: round_to(web_lambda1, 2),
        web_lambda2: round_to(web_lambda2, 2),
        web_d: Some(round_to(web_d, 1)),
        i_w: round_to(i_w, 1),
        i_f: round_to(i_f, 1),
        c_w: round_to(c_c, 1),
        c_f: round_to(c_f, 1),
        f_b: round_to(f_b, 1),
        f_c: round_to(f_c, 1),
        mn_yield: round_to(mn_yield, 1),
        mn_lbw: round_to(mn_lbw, 1),
        mn_lbf: round_to(mn_lbf, 1),
        mn_lb: round_to(mn_lb, 1),
        phi_mn: round_to(phi_mn, 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mullion_150() -> ProfileGeometry {
        ProfileGeometry {
            web_length: 150.0,
            flange_length: 65.0,
            web_thk: 2.5,
            flange_thk: 3.0,
            f_y: 160.0,
        }
    }

    #[test]
    fn test_buckling_constants_6063_t6() {
        // F_y = 160 MPa
        let k = BucklingConstants::for_yield(160.0);
        let expected_bp = 160.0 * (1.0 + (160.0_f64 / 10342.5).powf(0.3333));
        assert!((k.b_p - expected_bp).abs() < 1e-9);
        assert!(k.b_p > 160.0 && k.b_br > 1.3 * 160.0);
        assert!(k.d_p > 0.0 && k.d_br > 0.0);
    }

    #[test]
    fn test_stick_profile_properties() {
        let cap = stick_profile_capacity(&mullion_150()).unwrap();
        // A = 150·65 − 144·60
        assert_eq!(cap.area, 1110.0);
        assert_eq!(cap.web_b, 145.0);
        assert_eq!(cap.flange_b, 61.0);
        assert_eq!(cap.c_f, 73.5);
        assert!(cap.tor_constant.is_some());
        assert!(cap.c_c.is_none() && cap.web_d.is_none());
        assert!(cap.s_x > 0.0 && cap.z_x > cap.s_x);
    }

    #[test]
    fn test_stick_profile_capacity_governed_by_minimum() {
        let cap = stick_profile_capacity(&mullion_150()).unwrap();
        let governing = cap.mn_yield.min(cap.mn_lb);
        assert!((cap.phi_mn - 0.9 * governing).abs() <= 0.1, "{:?}", cap);
        assert!(cap.phi_mn > 0.0);
        // Capacity is in kN·m: a 150 mm mullion is a few kN·m
        assert!(cap.phi_mn < 50.0, "phi_Mn = {}", cap.phi_mn);
    }

    #[test]
    fn test_slender_flange_reduces_stress() {
        let g = ProfileGeometry {
            flange_length: 200.0,
            flange_thk: 1.5,
            ..mullion_150()
        };
        let cap = stick_profile_capacity(&g).unwrap();
        assert!(cap.f_c < 160.0, "F_c = {}", cap.f_c);
    }

    #[test]
    fn test_stick_profile_missing_values() {
        assert!(stick_profile_capacity(&ProfileGeometry { f_y: 0.0, ..mullion_150() }).is_none());
        assert!(stick_profile_capacity(&ProfileGeometry { web_thk: 0.0, ..mullion_150() }).is_none());
    }

    #[test]
    fn test_manual_profile_capacity() {
        let g = mullion_150();
        let s = ManualSection {
            y: 75.0,
            x: 32.5,
            i_xx: 3_600_000.0,
            i_yy: 650_000.0,
            area: 1200.0,
            plastic_x: 45.0,
            plastic_y: 45.0,
        };
        let cap = manual_profile_capacity(&g, &s).unwrap();
        // c_c = 75 − 3 − 0.5, c_o = 145 − 71.5
        assert_eq!(cap.c_c, Some(71.5));
        assert_eq!(cap.c_o, Some(73.5));
        // m = 1.15 − 73.5/143
        assert_eq!(cap.m, 0.64);
        assert_eq!(cap.z_x, 54_000.0);
        assert_eq!(cap.c_w, 71.5);
        assert_eq!(cap.c_f, 72.5);
        assert!(cap.tor_constant.is_none());
        assert!(cap.phi_mn > 0.0);
    }

    #[test]
    fn test_manual_profile_requires_all_values() {
        let s = ManualSection {
            y: 75.0,
            x: 32.5,
            i_xx: 3_600_000.0,
            i_yy: 650_000.0,
            area: 1200.0,
            plastic_x: 0.0,
            plastic_y: 45.0,
        };
        assert!(manual_profile_capacity(&mullion_150(), &s).is_none());
    }

    #[test]
    fn test_capacity_serializes_original_field_names() {
        let cap = stick_profile_capacity(&mullion_150()).unwrap();
        let json = serde_json::to_value(&cap).unwrap();
        assert!(json.get("phi_Mn").is_some());
        assert!(json.get("I_xx").is_some());
        assert!(json.get("Mn_lbw").is_some());
        assert!(json.get("c_c").is_none());
    }
}
