//! # Mullion and Transom Frame Check
//!
//! Strength and serviceability of a stick-system frame: a vertical mullion
//! spanning between floors and a horizontal transom spanning between
//! mullions, both loaded by wind suction and glass dead load.
//!
//! ## Mullion
//!
//! | Frame type | M_u | V_u | Δ (0.7W service) |
//! |------------|-----|-----|------------------|
//! | Floor-to-floor | 1.6wL²/8 | 1.6wL/2 | 5(0.7w)L⁴/384EI |
//! | Continuous | 1.6wL²/8 | 1.6w·5L/8 | (0.7w)L⁴/185EI |
//!
//! Composite (aluminum + steel insert) mullions share the moment in
//! proportion to transformed stiffness, with E_s/E_a taken as 3:
//!
//! ```text
//! I_x  = I_a + 3·I_s
//! ls_a = I_a / I_x,    ls_s = 1 − ls_a
//! ```
//!
//! ## Transom
//!
//! Fixed-ended under wind (M_u = 1.6wW²/12, V_u = 1.6wW/4); wind deflection
//! about I_xx and dead-load sag about I_yy as a simple span.
//!
//! ## Deflection limits
//!
//! - Mullion: L/175 up to 4100 mm, L/240 + 6.35 mm beyond
//! - Transom: W/175
//!
//! ## Irregular geometry
//!
//! When the grid is irregular the demands, deflections, joint and reaction
//! forces come from an external analysis and are carried through unchanged.

use serde::{Deserialize, Serialize};

use crate::equations::beam::{
    fixed_end_uniform_moment, two_span_interior_shear, two_span_max_deflection,
    uniform_load_deflection, uniform_load_moment, uniform_load_shear,
};
use crate::fields::{lenient_f64, nonzero};
use crate::loads::{
    frame_loads, glass_self_weight, joint_forces, reaction_forces, FrameType, Geometry,
    ACCESSORY_FACTOR, WIND_LOAD_FACTOR,
};
use crate::materials::{ProfileLibrary, PLACEHOLDER_SECTION_VALUE};
use crate::units::{mm2_to_m2, mm_to_m, round_opt, round_to};

/// Modulus of elasticity for aluminum (MPa)
pub const ALUMINUM_E_MPA: f64 = 70_000.0;

/// Wind load factor for serviceability checks
pub const SERVICE_WIND_FACTOR: f64 = 0.7;

/// Modular ratio E_steel / E_aluminum used for composite stiffness
pub const COMPOSITE_MODULAR_RATIO: f64 = 3.0;

/// Mullion make-up; anything but `"Aluminum + Steel"` is aluminum only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MullionType {
    #[default]
    AluminumOnly,
    Composite,
}

impl From<String> for MullionType {
    fn from(value: String) -> Self {
        if value == "Aluminum + Steel" {
            MullionType::Composite
        } else {
            MullionType::AluminumOnly
        }
    }
}

impl From<MullionType> for String {
    fn from(value: MullionType) -> Self {
        match value {
            MullionType::AluminumOnly => "Aluminum Only".to_string(),
            MullionType::Composite => "Aluminum + Steel".to_string(),
        }
    }
}

/// Frame record
///
/// `width`, `length` and `wind_neg` are required. The demand fields after
/// `glass_thk` are only read for irregular geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    #[serde(default)]
    pub label: String,
    /// Mullion profile name
    #[serde(default)]
    pub mullion: Option<String>,
    /// Transom profile name
    #[serde(default)]
    pub transom: Option<String>,
    /// Steel insert name (composite mullions)
    #[serde(default)]
    pub steel: Option<String>,
    /// Panel width / transom span (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width: Option<f64>,
    /// Mullion span (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub length: Option<f64>,
    /// Design suction (kPa)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wind_neg: Option<f64>,
    /// Transom spacing (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tran_spacing: Option<f64>,
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub mullion_type: MullionType,
    #[serde(default)]
    pub frame_type: FrameType,
    /// Total glass thickness (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub glass_thk: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub mul_mu: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mul_vu: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mul_def: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tran_mu: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tran_vu: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tran_def_wind: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tran_def_dead: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub joint_fy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub joint_fz: Option<f64>,
    #[serde(rename = "reaction_Ry", default, deserialize_with = "lenient_f64")]
    pub reaction_ry: Option<f64>,
    #[serde(rename = "reaction_Rz", default, deserialize_with = "lenient_f64")]
    pub reaction_rz: Option<f64>,
}

impl FrameInput {
    /// Total glass thickness; missing counts as no glass
    pub fn glass_thickness(&self) -> f64 {
        self.glass_thk.unwrap_or(0.0)
    }
}

/// Frame check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub frame_type: FrameType,
    pub mullion_type: MullionType,
    pub mullion: Option<String>,
    pub steel_ref: Option<String>,
    pub glass_thk: f64,
    /// Glass self-weight (kPa)
    pub glass_sw: f64,
    /// Accessory allowance (kPa)
    pub acc_sw: f64,
    /// Effective wind area (m²)
    pub eff_area: f64,
    #[serde(rename = "I_xa")]
    pub i_xa: Option<f64>,
    #[serde(rename = "I_xs")]
    pub i_xs: Option<f64>,
    pub ls_a: Option<f64>,
    pub ls_s: Option<f64>,
    pub mul_w_wind: f64,
    pub mul_w_dead: f64,
    pub tran_w_wind: f64,
    pub tran_w_dead: f64,
    pub mul_mu: Option<f64>,
    pub tran_mu: Option<f64>,
    #[serde(rename = "mul_phi_Mn")]
    pub mul_phi_mn: Option<f64>,
    #[serde(rename = "mul_phi_Mn_a")]
    pub mul_phi_mn_a: Option<f64>,
    #[serde(rename = "mul_phi_Mn_s")]
    pub mul_phi_mn_s: Option<f64>,
    pub mul_dc: Option<f64>,
    pub mul_dc_a: Option<f64>,
    pub mul_dc_s: Option<f64>,
    pub mul_mu_a: Option<f64>,
    pub mul_mu_s: Option<f64>,
    pub mul_def: Option<f64>,
    pub mul_allow_def: f64,
    #[serde(rename = "tran_phi_Mn")]
    pub tran_phi_mn: f64,
    pub tran_dc: Option<f64>,
    pub tran_def_wind: Option<f64>,
    pub tran_def_dead: Option<f64>,
    pub tran_allow_def: f64,
    pub tran_vu: Option<f64>,
    pub mul_vu: Option<f64>,
    #[serde(rename = "reaction_Ry")]
    pub reaction_ry: Option<f64>,
    #[serde(rename = "reaction_Rz")]
    pub reaction_rz: Option<f64>,
    pub joint_fy: Option<f64>,
    pub joint_fz: Option<f64>,
    /// Members computed with placeholder section values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholder_sections: Vec<String>,
}

impl FrameResult {
    /// Highest of the bending and deflection utilisations that are known
    pub fn governing_ratio(&self) -> f64 {
        let deflection = |def: Option<f64>, allow: f64| def.filter(|_| allow > 0.0).map(|d| d / allow);
        [
            self.mul_dc,
            self.mul_dc_a,
            self.mul_dc_s,
            self.tran_dc,
            deflection(self.mul_def, self.mul_allow_def),
            deflection(self.tran_def_wind, self.tran_allow_def),
        ]
        .into_iter()
        .flatten()
        .fold(0.0, f64::max)
    }
}

/// Stiffness and capacity of a member, or placeholders when unresolved
#[derive(Debug, Clone, Copy, PartialEq)]
struct MemberSection {
    i_xx: f64,
    i_yy: f64,
    phi_mn: f64,
    resolved: bool,
}

impl MemberSection {
    const PLACEHOLDER: MemberSection = MemberSection {
        i_xx: PLACEHOLDER_SECTION_VALUE,
        i_yy: PLACEHOLDER_SECTION_VALUE,
        phi_mn: PLACEHOLDER_SECTION_VALUE,
        resolved: false,
    };

    fn aluminum(library: &ProfileLibrary, name: Option<&str>) -> Self {
        name.and_then(|n| library.aluminum_capacity(n))
            .map(|cap| MemberSection {
                i_xx: cap.i_xx,
                i_yy: cap.i_yy,
                phi_mn: cap.phi_mn,
                resolved: true,
            })
            .unwrap_or(Self::PLACEHOLDER)
    }

    fn steel(library: &ProfileLibrary, name: Option<&str>) -> Self {
        name.and_then(|n| library.steel_capacity(n))
            .map(|cap| MemberSection {
                i_xx: cap.i_xx,
                i_yy: cap.i_yy,
                phi_mn: cap.phi_mn,
                resolved: true,
            })
            .unwrap_or(Self::PLACEHOLDER)
    }
}

/// Demand over capacity, `None` without a demand
fn ratio(demand: Option<f64>, capacity: f64) -> Option<f64> {
    demand
        .filter(|_| capacity != 0.0)
        .map(|d| round_to(d / capacity, 2))
}

/// Allowable mullion deflection (mm)
pub fn mullion_allowable_deflection(length: f64) -> f64 {
    if length <= 4100.0 {
        length / 175.0
    } else {
        length / 240.0 + 6.35
    }
}

/// Check a frame against the profiles in `library`
///
/// Returns `None` when width, length or wind suction is missing or zero.
/// Unresolved profile names fall back to placeholder section values and
/// are listed in [`FrameResult::placeholder_sections`].
///
/// # Example
/// ```rust
/// use facade_core::calculations::frame::{calculate, FrameInput};
/// use facade_core::materials::ProfileLibrary;
///
/// let frame: FrameInput = serde_json::from_str(r#"{
///     "width": 1200, "length": 3600, "wind_neg": 2.0,
///     "frame_type": "Floor-to-floor", "glass_thk": 10
/// }"#).unwrap();
///
/// let result = calculate(&frame, &ProfileLibrary::default()).unwrap();
/// assert_eq!(result.mul_mu, Some(6.22));
/// assert_eq!(result.mul_allow_def, 20.57);
/// ```
pub fn calculate(input: &FrameInput, library: &ProfileLibrary) -> Option<FrameResult> {
    let width = nonzero(input.width)?;
    let length = nonzero(input.length)?;
    let wind_neg = nonzero(input.wind_neg)?;
    let glass_thk = input.glass_thickness();
    let regular = input.geometry == Geometry::Regular;
    let frame_type = input.frame_type;

    let glass_sw = glass_self_weight(glass_thk);
    let acc_sw = glass_sw * ACCESSORY_FACTOR;
    let eff_span = frame_type.effective_span(length);
    let eff_area = mm2_to_m2((eff_span * width).max(eff_span * eff_span / 3.0));

    let loads = frame_loads(glass_thk, frame_type, length, width, input.tran_spacing, wind_neg);
    let length_m = mm_to_m(length);
    let width_m = mm_to_m(width);

    let mut placeholder_sections = Vec::new();

    // Mullion demand
    let (mul_mu, mul_vu) = if regular {
        let vu = match frame_type {
            FrameType::FloorToFloor => uniform_load_shear(loads.mul_w_wind, length_m),
            FrameType::Continuous => two_span_interior_shear(loads.mul_w_wind, length_m),
        };
        (
            Some(round_to(WIND_LOAD_FACTOR * uniform_load_moment(loads.mul_w_wind, length_m), 2)),
            Some(round_to(WIND_LOAD_FACTOR * vu, 2)),
        )
    } else {
        (input.mul_mu, input.mul_vu)
    };

    // Mullion capacity
    let aluminum = MemberSection::aluminum(library, input.mullion.as_deref());
    if !aluminum.resolved {
        placeholder_sections.push("mullion".to_string());
    }
    let mut composite = None;
    let mul_ix = match input.mullion_type {
        MullionType::Composite => {
            let steel = MemberSection::steel(library, input.steel.as_deref());
            if !steel.resolved {
                placeholder_sections.push("steel".to_string());
            }
            let ix = aluminum.i_xx + COMPOSITE_MODULAR_RATIO * steel.i_xx;
            let ls_a = aluminum.i_xx / ix;
            composite = Some((steel, ls_a, 1.0 - ls_a));
            ix
        }
        MullionType::AluminumOnly => aluminum.i_xx,
    };

    let mul_def = if regular {
        let service_w = SERVICE_WIND_FACTOR * loads.mul_w_wind;
        Some(match frame_type {
            FrameType::FloorToFloor => uniform_load_deflection(service_w, length, ALUMINUM_E_MPA, mul_ix),
            FrameType::Continuous => two_span_max_deflection(service_w, length, ALUMINUM_E_MPA, mul_ix),
        })
    } else {
        input.mul_def
    };

    // Transom
    let transom = MemberSection::aluminum(library, input.transom.as_deref());
    if !transom.resolved {
        placeholder_sections.push("transom".to_string());
    }
    let (tran_mu, tran_vu, tran_def_wind, tran_def_dead) = if regular {
        (
            Some(round_to(WIND_LOAD_FACTOR * fixed_end_uniform_moment(loads.tran_w_wind, width_m), 2)),
            Some(round_to(WIND_LOAD_FACTOR * loads.tran_w_wind * width_m / 4.0, 2)),
            Some(uniform_load_deflection(
                SERVICE_WIND_FACTOR * loads.tran_w_wind,
                width,
                ALUMINUM_E_MPA,
                transom.i_xx,
            )),
            Some(uniform_load_deflection(
                SERVICE_WIND_FACTOR * loads.tran_w_dead,
                width,
                ALUMINUM_E_MPA,
                transom.i_yy,
            )),
        )
    } else {
        (input.tran_mu, input.tran_vu, input.tran_def_wind, input.tran_def_dead)
    };

    let joint = joint_forces(input.geometry, width, &loads, input.joint_fy, input.joint_fz);
    let reaction = reaction_forces(
        input.geometry,
        frame_type,
        length,
        &loads,
        input.reaction_ry,
        input.reaction_rz,
    );

    let mut result = FrameResult {
        frame_type,
        mullion_type: input.mullion_type,
        mullion: input.mullion.clone(),
        steel_ref: input.steel.clone(),
        glass_thk: round_to(glass_thk, 1),
        glass_sw: round_to(glass_sw, 2),
        acc_sw: round_to(acc_sw, 2),
        eff_area: round_to(eff_area, 1),
        i_xa: None,
        i_xs: None,
        ls_a: None,
        ls_s: None,
        mul_w_wind: round_to(loads.mul_w_wind, 2),
        mul_w_dead: round_to(loads.mul_w_dead, 2),
        tran_w_wind: round_to(loads.tran_w_wind, 2),
        tran_w_dead: round_to(loads.tran_w_dead, 2),
        mul_mu: round_opt(mul_mu, 2),
        tran_mu: round_opt(tran_mu, 2),
        mul_phi_mn: None,
        mul_phi_mn_a: None,
        mul_phi_mn_s: None,
        mul_dc: None,
        mul_dc_a: None,
        mul_dc_s: None,
        mul_mu_a: None,
        mul_mu_s: None,
        mul_def: round_opt(mul_def, 2),
        mul_allow_def: round_to(mullion_allowable_deflection(length), 2),
        tran_phi_mn: round_to(transom.phi_mn, 2),
        tran_dc: ratio(tran_mu, transom.phi_mn),
        tran_def_wind: round_opt(tran_def_wind, 2),
        tran_def_dead: round_opt(tran_def_dead, 2),
        tran_allow_def: round_to(width / 175.0, 2),
        tran_vu: round_opt(tran_vu, 2),
        mul_vu: round_opt(mul_vu, 2),
        reaction_ry: round_opt(reaction.ry, 2),
        reaction_rz: round_opt(reaction.rz, 2),
        joint_fy: round_opt(joint.fy, 2),
        joint_fz: round_opt(joint.fz, 2),
        placeholder_sections,
    };

    match composite {
        Some((steel, ls_a, ls_s)) => {
            let mu_a = mul_mu.map(|m| m * ls_a);
            let mu_s = mul_mu.map(|m| m * ls_s);
            result.i_xa = Some(round_to(aluminum.i_xx, 1));
            result.i_xs = Some(round_to(steel.i_xx, 1));
            result.ls_a = Some(round_to(ls_a, 2));
            result.ls_s = Some(round_to(ls_s, 2));
            result.mul_phi_mn_a = Some(round_to(aluminum.phi_mn, 2));
            result.mul_phi_mn_s = Some(round_to(steel.phi_mn, 2));
            result.mul_mu_a = round_opt(mu_a, 2);
            result.mul_mu_s = round_opt(mu_s, 2);
            result.mul_dc_a = ratio(mu_a, aluminum.phi_mn);
            result.mul_dc_s = ratio(mu_s, steel.phi_mn);
        }
        None => {
            result.mul_phi_mn = Some(round_to(aluminum.phi_mn, 2));
            result.mul_dc = ratio(mul_mu, aluminum.phi_mn);
        }
    }

    Some(result)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
