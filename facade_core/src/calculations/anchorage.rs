//! # Mullion Anchorage to Concrete
//!
//! Post-installed anchors (ACI 318-19 Chapter 17) and the steel bracket
//! that carries the mullion support reactions into the slab. Three bracket
//! details are supported:
//!
//! | Detail | Anchors | Checks |
//! |--------|---------|--------|
//! | Box clamp | 4 on the slab top, shear only | anchor group, base plate bearing |
//! | U clamp | 4 on the slab edge, tension + shear | anchor group, through bolt, fin plate, weld, base plate bearing and tension |
//! | L clamp | 2 on the slab top + 2 on the slab edge | both groups, through bolt, fin plate, weld, both plates |
//!
//! ## Anchor group (per group)
//!
//! ```text
//! φN_sa  = 0.75·A_se,N·f_uta              steel in tension
//! φN_cbg = 0.65·(A_Nc/A_Nc0)·ψ_ed,N·N_b    concrete breakout, N_b = k_c√f'c·h_ef^1.5
//! φN_pn  = 0.70·N_p5                      pull-out from the product approval
//! φV_sa  = 0.65·0.6·A_se,N·f_uta          steel in shear
//! φV_cbg = 0.70·(A_Vc/A_Vc0)·ψ_ed,V·ψ_h,V·V_b
//! φV_cp  = 0.70·2·N_cbg                   pry-out
//! (β_N)^1.67 + (β_V)^1.6 ≤ 1.0
//! ```
//!
//! Concrete f'c = 27.5 MPa, anchor f_uta = 500 MPa, plate F_y = 345 MPa,
//! F_u = 450 MPa, bolt F_nv = 280 MPa, E70 weld.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::calculations::frame::FrameInput;
use crate::equations::section::parse_dimension_triplet;
use crate::errors::CalcError;
use crate::fields::{lenient_f64, nonzero, positive};
use crate::loads::{frame_loads, reaction_forces, DEAD_LOAD_FACTOR, WIND_LOAD_FACTOR};
use crate::materials::ProfileLibrary;
use crate::units::{n_to_kn, round_to};

/// Concrete compressive strength (MPa)
pub const CONCRETE_FC: f64 = 27.5;

/// Anchor steel ultimate strength (MPa)
pub const ANCHOR_FUTA: f64 = 500.0;

/// Bracket plate yield strength (MPa)
pub const PLATE_FY: f64 = 345.0;

/// Bracket plate ultimate strength (MPa)
pub const PLATE_FU: f64 = 450.0;

/// Through bolt nominal shear stress (MPa)
pub const BOLT_FNV: f64 = 280.0;

/// Weld electrode strength (MPa)
pub const WELD_FEXX: f64 = 482.7;

/// Breakout coefficient for post-installed anchors
const K_C: f64 = 7.0;

/// Edge distance perpendicular to the shear load, taken as a wide slab (mm)
const ASSUMED_CA2: f64 = 1000.0;

/// Edge distance of anchors from the plate edge (mm)
const PLATE_EDGE_DISTANCE: f64 = 40.0;

const ANCHOR_STRESS_AREAS: [(f64, f64); 3] = [(10.0, 58.0), (12.0, 84.3), (16.0, 156.7)];

/// Effective tensile stress area (mm²) of a tabulated anchor or bolt diameter
///
/// ```rust
/// use facade_core::calculations::anchorage::anchor_stress_area;
///
/// assert_eq!(anchor_stress_area(12.0), Some(84.3));
/// assert_eq!(anchor_stress_area(20.0), None);
/// ```
pub fn anchor_stress_area(diameter: f64) -> Option<f64> {
    let nominal = diameter.trunc();
    ANCHOR_STRESS_AREAS
        .iter()
        .find(|(d, _)| *d == nominal)
        .map(|(_, area)| *area)
}

// =============================================================================
// INPUT
// =============================================================================

/// Bracket detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClampType {
    #[default]
    Box,
    U,
    L,
}

impl ClampType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClampType::Box => "Box Clump",
            ClampType::U => "U Clump",
            ClampType::L => "L Clump",
        }
    }
}

impl FromStr for ClampType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Box Clump" => Ok(ClampType::Box),
            "U Clump" => Ok(ClampType::U),
            "L Clump" => Ok(ClampType::L),
            other => Err(CalcError::invalid_input(
                "clump_type",
                other,
                "Expected 'Box Clump', 'U Clump' or 'L Clump'",
            )),
        }
    }
}

impl TryFrom<String> for ClampType {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClampType> for String {
    fn from(value: ClampType) -> Self {
        value.as_str().to_string()
    }
}

/// Anchorage record
///
/// Zero or missing values take the detail's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorageInput {
    #[serde(default)]
    pub label: String,
    /// Index of the parent frame within its category
    #[serde(default)]
    pub frame: usize,
    #[serde(default)]
    pub clump_type: ClampType,
    /// Anchor diameter (mm), default 12
    #[serde(default, deserialize_with = "lenient_f64")]
    pub anchor_dia: Option<f64>,
    /// Effective embedment h_ef (mm), default 100
    #[serde(default, deserialize_with = "lenient_f64")]
    pub embed_depth: Option<f64>,
    /// Characteristic pull-out strength (kN), default 20
    #[serde(rename = "N_p5", default, deserialize_with = "lenient_f64")]
    pub n_p5: Option<f64>,
    /// Slab thickness h_a (mm), default 1000
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h_a: Option<f64>,
    /// Base plate thickness (mm), default 5
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bp_thk: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub anchor_nos: Option<f64>,
    /// Edge distance in the direction of shear (mm)
    #[serde(rename = "C_a1", default, deserialize_with = "lenient_f64")]
    pub c_a1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub thr_bolt_dia: Option<f64>,
    /// Fin plate eccentricity (mm), default 70
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fin_e: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fin_thk: Option<f64>,
    #[serde(rename = "front_bp_length_N", default, deserialize_with = "lenient_f64")]
    pub front_bp_length: Option<f64>,
    #[serde(rename = "front_bp_width_B", default, deserialize_with = "lenient_f64")]
    pub front_bp_width: Option<f64>,
    #[serde(rename = "top_bp_width_B", default, deserialize_with = "lenient_f64")]
    pub top_bp_width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub top_anchor_nos: Option<f64>,
    #[serde(rename = "front_C_a1", default, deserialize_with = "lenient_f64")]
    pub front_c_a1: Option<f64>,
    #[serde(rename = "top_C_a1", default, deserialize_with = "lenient_f64")]
    pub top_c_a1: Option<f64>,
}

fn or_default(value: Option<f64>, default: f64) -> f64 {
    nonzero(value).unwrap_or(default)
}

// =============================================================================
// ANCHOR GROUP
// =============================================================================

/// Anchor properties shared by every group of a bracket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorSpec {
    pub diameter: f64,
    pub embed_depth: f64,
    pub stress_area: f64,
    pub n_p5: f64,
    pub h_a: f64,
}

/// Factored loads on the most stressed anchor (`*_ua`) and the group (`*_ug`), kN
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorDemand {
    pub n_ua: f64,
    pub n_ug: f64,
    pub v_ua: f64,
    pub v_ug: f64,
}

/// Strength check of one anchor group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorGroupCheck {
    #[serde(rename = "N_ua")]
    pub n_ua: f64,
    #[serde(rename = "N_ug")]
    pub n_ug: f64,
    #[serde(rename = "V_ua")]
    pub v_ua: f64,
    #[serde(rename = "V_ug")]
    pub v_ug: f64,
    #[serde(rename = "phi_Nsa")]
    pub phi_nsa: f64,
    #[serde(rename = "A_NC")]
    pub a_nc: f64,
    #[serde(rename = "A_NCO")]
    pub a_nco: f64,
    #[serde(rename = "phi_Ncbg")]
    pub phi_ncbg: f64,
    #[serde(rename = "phi_Npn")]
    pub phi_npn: f64,
    #[serde(rename = "phi_Vsa")]
    pub phi_vsa: f64,
    #[serde(rename = "A_VC")]
    pub a_vc: f64,
    #[serde(rename = "A_VCO")]
    pub a_vco: f64,
    #[serde(rename = "phi_Vcbg")]
    pub phi_vcbg: f64,
    #[serde(rename = "phi_Vcp")]
    pub phi_vcp: f64,
    pub interaction: f64,
    #[serde(rename = "psi_edN")]
    pub psi_ed_n: f64,
    #[serde(rename = "N_b")]
    pub n_b: f64,
    #[serde(rename = "psi_edV")]
    pub psi_ed_v: f64,
    #[serde(rename = "psi_hV")]
    pub psi_h_v: f64,
    pub l_e: f64,
    #[serde(rename = "V_b")]
    pub v_b: f64,
    #[serde(rename = "beta_N1")]
    pub beta_n1: f64,
    #[serde(rename = "beta_N2")]
    pub beta_n2: f64,
    #[serde(rename = "beta_N3")]
    pub beta_n3: f64,
    #[serde(rename = "beta_V1")]
    pub beta_v1: f64,
    #[serde(rename = "beta_V2")]
    pub beta_v2: f64,
    #[serde(rename = "beta_V3")]
    pub beta_v3: f64,
    #[serde(rename = "beta_N")]
    pub beta_n: f64,
    #[serde(rename = "beta_V")]
    pub beta_v: f64,
}

/// Tension and shear check of an anchor group
///
/// `a_nc` and `a_vc` are the projected breakout areas of the group (mm²),
/// `c_a1` the edge distance in the direction of shear (mm).
pub fn anchor_group_check(
    props: &AnchorSpec,
    demand: &AnchorDemand,
    a_nc: f64,
    a_vc: f64,
    c_a1: f64,
) -> AnchorGroupCheck {
    let hef = props.embed_depth;
    let d_a = props.diameter;
    let sqrt_fc = CONCRETE_FC.sqrt();

    // Tension
    let a_nco = 9.0 * hef.powi(2);
    let phi_nsa = 0.75 * n_to_kn(props.stress_area * ANCHOR_FUTA);
    let psi_ed_n = (0.7 + 0.3 * c_a1 / (1.5 * hef)).min(1.0);
    let n_b = n_to_kn(K_C * sqrt_fc * hef.powf(1.5));
    let phi_ncbg = 0.65 * (a_nc / a_nco) * psi_ed_n * n_b;
    let phi_npn = 0.7 * props.n_p5;
    let beta_n1 = demand.n_ua / phi_nsa;
    let beta_n2 = demand.n_ug / phi_ncbg;
    let beta_n3 = demand.n_ua / phi_npn;

    // Shear
    let phi_vsa = 0.65 * 0.6 * n_to_kn(props.stress_area * ANCHOR_FUTA);
    let a_vco = 4.5 * c_a1.powi(2);
    let psi_ed_v = (0.7 + 0.3 * ASSUMED_CA2 / (1.5 * c_a1)).min(1.0);
    let psi_h_v = (1.5 * c_a1 / props.h_a).sqrt().max(1.0);
    let l_e = hef.min(8.0 * d_a);
    let v_b = n_to_kn(0.6 * (l_e / d_a).powf(0.2) * d_a.sqrt() * sqrt_fc * c_a1.powf(1.5));
    let phi_vcbg = 0.7 * (a_vc / a_vco) * psi_ed_v * psi_h_v * v_b;
    let phi_vcp = 0.7 * 2.0 * phi_ncbg / 0.65;
    let beta_v1 = demand.v_ua / phi_vsa;
    let beta_v2 = demand.v_ug / phi_vcbg;
    let beta_v3 = demand.v_ug / phi_vcp;

    let beta_n = beta_n1.max(beta_n2).max(beta_n3);
    let beta_v = beta_v1.max(beta_v2).max(beta_v3);
    let interaction = beta_n.powf(1.67) + beta_v.powf(1.6);

    AnchorGroupCheck {
        n_ua: round_to(demand.n_ua, 2),
        n_ug: round_to(demand.n_ug, 2),
        v_ua: round_to(demand.v_ua, 2),
        v_ug: round_to(demand.v_ug, 2),
        phi_nsa: round_to(phi_nsa, 2),
        a_nc: round_to(a_nc, 1),
        a_nco: round_to(a_nco, 1),
        phi_ncbg: round_to(phi_ncbg, 2),
        phi_npn: round_to(phi_npn, 2),
        phi_vsa: round_to(phi_vsa, 2),
        a_vc: round_to(a_vc, 1),
        a_vco: round_to(a_vco, 1),
        phi_vcbg: round_to(phi_vcbg, 2),
        phi_vcp: round_to(phi_vcp, 2),
        interaction: round_to(interaction, 2),
        psi_ed_n: round_to(psi_ed_n, 2),
        n_b: round_to(n_b, 2),
        psi_ed_v: round_to(psi_ed_v, 2),
        psi_h_v: round_to(psi_h_v, 2),
        l_e: round_to(l_e, 2),
        v_b: round_to(v_b, 2),
        beta_n1: round_to(beta_n1, 2),
        beta_n2: round_to(beta_n2, 2),
        beta_n3: round_to(beta_n3, 2),
        beta_v1: round_to(beta_v1, 2),
        beta_v2: round_to(beta_v2, 2),
        beta_v3: round_to(beta_v3, 2),
        beta_n: round_to(beta_n, 2),
        beta_v: round_to(beta_v, 2),
    }
}

/// Tension breakout area of a top-of-slab group
fn slab_top_breakout_area(hef: f64, s1: f64, s2: f64, c_a1: f64) -> f64 {
    (3.0 * hef + s1) * (1.5 * hef + s2 + (1.5 * hef).min(c_a1))
}

/// Tension breakout area of a slab-edge group
fn slab_edge_breakout_area(hef: f64, s1: f64, s2: f64, c_a1: f64) -> f64 {
    (3.0 * hef + s1) * (3.0 * hef + s2).min(2.0 * c_a1 + s2)
}

// =============================================================================
// BRACKET COMPONENTS
// =============================================================================

/// Base plate bearing on concrete (AISC Design Guide 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateBearingCheck {
    #[serde(rename = "bp_Pu")]
    pub pu: f64,
    #[serde(rename = "bp_d")]
    pub d: f64,
    #[serde(rename = "bp_b")]
    pub b: f64,
    #[serde(rename = "bp_m")]
    pub m: f64,
    #[serde(rename = "bp_n")]
    pub n: f64,
    #[serde(rename = "bp_t_req_bear")]
    pub t_req: f64,
    #[serde(rename = "bp_lambda_n")]
    pub lambda_n: f64,
    #[serde(rename = "bp_l")]
    pub l: f64,
    #[serde(rename = "bp_q")]
    pub q: f64,
    #[serde(rename = "bp_bearing_Mu")]
    pub mu: f64,
    #[serde(rename = "bp_A1")]
    pub a1: f64,
    #[serde(rename = "bp_fp_max")]
    pub fp_max: f64,
}

/// Bearing of a plate `length` × `width` under `pu` (kN)
///
/// `d` × `b` is the bearing footprint of the member and `n_factor` the
/// footprint fraction used for the n cantilever (0.95 for solid sections,
/// 0.8 for channels).
fn plate_bearing(length: f64, width: f64, d: f64, b: f64, n_factor: f64, pu: f64) -> PlateBearingCheck {
    let m = (length - 0.95 * d) / 2.0;
    let n = (width - n_factor * b) / 2.0;
    let lambda_n = (d * b).sqrt() / 4.0;
    let l = m.max(n).max(lambda_n);
    let q = pu * 1000.0 / length;
    let mu = q * l.powi(2) / 2.0 / 1.0e6;
    let t_req = (4.0 * mu / (0.9 * PLATE_FY * width)).sqrt() * 1000.0;
    let a1 = pu * 1000.0 / (0.65 * 0.85 * CONCRETE_FC);
    let fp_max = (0.65 * 0.85 * CONCRETE_FC).min(0.65 * 1.7 * CONCRETE_FC);
    PlateBearingCheck {
        pu: round_to(pu, 2),
        d: round_to(d, 2),
        b: round_to(b, 2),
        m: round_to(m, 2),
        n: round_to(n, 2),
        t_req: round_to(t_req, 2),
        lambda_n: round_to(lambda_n, 2),
        l: round_to(l, 2),
        q: round_to(q, 2),
        mu: round_to(mu, 2),
        a1: round_to(a1, 2),
        fp_max: round_to(fp_max, 2),
    }
}

/// Base plate bending from anchor tension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateTensionCheck {
    #[serde(rename = "bp_Tu")]
    pub tu: f64,
    #[serde(rename = "bp_x")]
    pub x: f64,
    #[serde(rename = "bp_Beff")]
    pub b_eff: f64,
    #[serde(rename = "bp_t_req_tension")]
    pub t_req: f64,
    #[serde(rename = "bp_tension_Mu")]
    pub mu: f64,
}

/// Tension bending of a plate of `length`; `None` when the anchor line
/// falls inside the member footprint `d`
fn plate_tension(length: f64, d: f64, tu: f64) -> Option<PlateTensionCheck> {
    let x = (length - d) / 2.0 - PLATE_EDGE_DISTANCE;
    if x <= 0.0 {
        return None;
    }
    let b_eff = (2.0 * x).min(x + PLATE_EDGE_DISTANCE);
    let mu = tu * x / 1000.0;
    let t_req = (4.0 * mu * 1.0e6 / (0.9 * PLATE_FY * b_eff)).sqrt();
    Some(PlateTensionCheck {
        tu: round_to(tu, 2),
        x: round_to(x, 2),
        b_eff: round_to(b_eff, 2),
        t_req: round_to(t_req, 2),
        mu: round_to(mu, 2),
    })
}

/// Through bolts joining the mullion to the fin plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughBoltCheck {
    #[serde(rename = "bolt_Vu")]
    pub vu: f64,
    #[serde(rename = "bolt_phi_Rn_shear")]
    pub phi_rn_shear: f64,
    #[serde(rename = "bolt_phi_Rn_bear")]
    pub phi_rn_bear: f64,
    #[serde(rename = "thr_Vh")]
    pub vh: f64,
    #[serde(rename = "thr_Vv")]
    pub vv: f64,
    #[serde(rename = "thr_Ab")]
    pub ab: f64,
    #[serde(rename = "thr_bearing_lc")]
    pub bearing_lc: f64,
    #[serde(rename = "thr_bearing_phi_Rn1")]
    pub bearing_phi_rn1: f64,
    #[serde(rename = "thr_bearing_phi_Rn2")]
    pub bearing_phi_rn2: f64,
    /// Stress area; `None` for an untabulated diameter
    #[serde(rename = "thr_bolt_AseN")]
    pub stress_area: Option<f64>,
    #[serde(rename = "thr_bolt_nos")]
    pub bolt_nos: u32,
    #[serde(rename = "thr_bolt_length")]
    pub bolt_length: f64,
}

/// Fin plate welded to the base plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinPlateCheck {
    #[serde(rename = "fin_Vu")]
    pub vu: f64,
    #[serde(rename = "fin_Vh")]
    pub vh: f64,
    #[serde(rename = "fin_Vv")]
    pub vv: f64,
    #[serde(rename = "fin_t_req")]
    pub t_req: f64,
    #[serde(rename = "fin_thk")]
    pub thk: f64,
    #[serde(rename = "fin_phi_Rn_yield")]
    pub phi_rn_yield: f64,
    #[serde(rename = "fin_phi_Rn_rupture")]
    pub phi_rn_rupture: f64,
    #[serde(rename = "fin_phi_Rn_block")]
    pub phi_rn_block: f64,
    #[serde(rename = "fin_Mu")]
    pub mu: f64,
    #[serde(rename = "fin_length")]
    pub length: f64,
    #[serde(rename = "fin_width")]
    pub width: f64,
    #[serde(rename = "fin_dh")]
    pub dh: f64,
    #[serde(rename = "fin_rupture_Anv")]
    pub rupture_anv: f64,
    #[serde(rename = "fin_bgv")]
    pub bgv: f64,
    #[serde(rename = "fin_bnt")]
    pub bnt: f64,
    #[serde(rename = "fin_block_Anv")]
    pub block_anv: f64,
    #[serde(rename = "fin_block_Ant")]
    pub block_ant: f64,
    #[serde(rename = "fin_block_phi_Rn1")]
    pub block_phi_rn1: f64,
    #[serde(rename = "fin_block_phi_Rn2")]
    pub block_phi_rn2: f64,
}

/// Fillet weld of the fin plate (both sides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldCheck {
    #[serde(rename = "weld_fn")]
    pub f_n: f64,
    #[serde(rename = "weld_fv")]
    pub f_v: f64,
    #[serde(rename = "weld_fb")]
    pub f_b: f64,
    #[serde(rename = "weld_fR")]
    pub f_r: f64,
    #[serde(rename = "weld_phi_Rn")]
    pub phi_rn: f64,
}

/// Through bolts, fin plate and weld of a U or L clamp
struct FinAssembly {
    bolt: ThroughBoltCheck,
    fin: FinPlateCheck,
    weld: WeldCheck,
}

const THROUGH_BOLT_NOS: u32 = 2;
const THROUGH_BOLT_LENGTH: f64 = 100.0;

fn fin_assembly(input: &AnchorageInput, design_ry: f64, design_rz: f64, fin_width: f64) -> FinAssembly {
    let bolt_dia = or_default(input.thr_bolt_dia, 10.0);
    let fin_e = or_default(input.fin_e, 70.0);
    let fin_thk = or_default(input.fin_thk, 5.0);
    let bolt_nos = f64::from(THROUGH_BOLT_NOS);

    // Through bolts, double shear
    let vh = design_ry / (bolt_nos * 2.0);
    let vv = design_rz / (bolt_nos * 2.0);
    let ab = 3.1416 * bolt_dia.powi(2) / 4.0;
    let bearing_rn1 = 0.75 * 1.2 * fin_e * fin_thk * PLATE_FU / 1000.0;
    let bearing_rn2 = 0.75 * 2.4 * bolt_dia * fin_thk * PLATE_FU / 1000.0;
    let bolt = ThroughBoltCheck {
        vu: round_to(vh.hypot(vv), 2),
        phi_rn_shear: round_to(0.75 * BOLT_FNV * ab / 1000.0, 2),
        phi_rn_bear: round_to(bearing_rn1.min(bearing_rn2), 2),
        vh: round_to(vh, 2),
        vv: round_to(vv, 2),
        ab: round_to(ab, 2),
        bearing_lc: round_to(fin_e, 2),
        bearing_phi_rn1: round_to(bearing_rn1, 2),
        bearing_phi_rn2: round_to(bearing_rn2, 2),
        stress_area: anchor_stress_area(bolt_dia).filter(|_| bolt_dia.fract() == 0.0),
        bolt_nos: THROUGH_BOLT_NOS,
        bolt_length: THROUGH_BOLT_LENGTH,
    };

    // Fin plate
    let fin_vh = design_ry / 2.0;
    let fin_vv = design_rz / 2.0;
    let fin_mu = fin_vv * fin_e / 1000.0;
    let t_req = 4.0 * fin_mu * 1.0e6 / (0.9 * PLATE_FY * fin_width.powi(2));
    let dh = bolt_dia + 2.0;
    let rupture_anv = (fin_width - bolt_nos * dh) * fin_thk;
    let bgv = fin_width - 40.0;
    let bnt = 50.0;
    let block_anv = (bgv - (2.0 * bolt_nos - 1.0) * (dh / 2.0)) * fin_thk;
    let block_ant = (bnt - dh / 2.0) * fin_thk;
    let block_rn1 = (0.75 * 0.6 * PLATE_FU * block_anv + PLATE_FU * block_ant) / 1000.0;
    let block_rn2 = (0.75 * 0.6 * PLATE_FY * bgv * fin_thk + PLATE_FU * block_ant) / 1000.0;
    let fin = FinPlateCheck {
        vu: round_to(fin_vh.hypot(fin_vv), 2),
        vh: round_to(fin_vh, 2),
        vv: round_to(fin_vv, 2),
        t_req: round_to(t_req, 2),
        thk: round_to(fin_thk, 2),
        phi_rn_yield: round_to(0.6 * PLATE_FY * fin_width * fin_thk / 1000.0, 2),
        phi_rn_rupture: round_to(0.75 * 0.6 * PLATE_FU * rupture_anv / 1000.0, 2),
        phi_rn_block: round_to(block_rn1.min(block_rn2), 2),
        mu: round_to(fin_mu, 2),
        length: round_to(fin_e + 50.0, 0),
        width: round_to(fin_width, 0),
        dh: round_to(dh, 2),
        rupture_anv: round_to(rupture_anv, 2),
        bgv: round_to(bgv, 2),
        bnt: round_to(bnt, 2),
        block_anv: round_to(block_anv, 2),
        block_ant: round_to(block_ant, 2),
        block_phi_rn1: round_to(block_rn1, 2),
        block_phi_rn2: round_to(block_rn2, 2),
    };

    // Weld: direct tension, shear and eccentric bending per unit length
    let f_n = (design_ry * 1000.0 / 2.0) / (fin_width * 2.0);
    let f_v = (design_rz * 1000.0 / 2.0) / (fin_width * 2.0);
    let f_b = (design_rz * 1000.0 / 2.0) * fin_e / (fin_width.powi(2) / 3.0);
    let weld = WeldCheck {
        f_n: round_to(f_n, 2),
        f_v: round_to(f_v, 2),
        f_b: round_to(f_b, 2),
        f_r: round_to((f_n.powi(2) + f_v.powi(2) + f_b.powi(2)).sqrt(), 2),
        phi_rn: round_to(0.75 * 0.6 * WELD_FEXX * 0.707 * 4.0, 2),
    };

    FinAssembly { bolt, fin, weld }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Reactions and anchor data common to every detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorageBase {
    #[serde(rename = "reaction_Ry")]
    pub reaction_ry: f64,
    #[serde(rename = "reaction_Rz")]
    pub reaction_rz: f64,
    #[serde(rename = "design_Ry")]
    pub design_ry: f64,
    #[serde(rename = "design_Rz")]
    pub design_rz: f64,
    #[serde(rename = "A_seN")]
    pub a_se_n: f64,
    #[serde(rename = "N_p5")]
    pub n_p5: f64,
    pub h_a: f64,
    pub bp_thk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxClampResult {
    #[serde(flatten)]
    pub base: AnchorageBase,
    #[serde(flatten)]
    pub anchors: AnchorGroupCheck,
    pub bp_length: f64,
    pub bp_width: f64,
    #[serde(flatten)]
    pub plate: PlateBearingCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UClampResult {
    #[serde(flatten)]
    pub base: AnchorageBase,
    #[serde(flatten)]
    pub anchors: AnchorGroupCheck,
    #[serde(flatten)]
    pub bolt: ThroughBoltCheck,
    #[serde(flatten)]
    pub fin: FinPlateCheck,
    #[serde(flatten)]
    pub weld: WeldCheck,
    pub bp_length: f64,
    pub bp_width: f64,
    #[serde(flatten)]
    pub plate: PlateBearingCheck,
    #[serde(flatten)]
    pub tension: PlateTensionCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LClampResult {
    #[serde(flatten)]
    pub base: AnchorageBase,
    /// Horizontal reaction taken by the front group (kN)
    #[serde(rename = "Bx")]
    pub b_x: f64,
    /// Horizontal reaction taken by the top group (kN)
    #[serde(rename = "Ax")]
    pub a_x: f64,
    /// Vertical reaction at the front group (kN)
    #[serde(rename = "By")]
    pub b_y: f64,
    /// Vertical reaction at the top group (kN)
    #[serde(rename = "Ay")]
    pub a_y: f64,
    pub e_f1: f64,
    pub e_f2: f64,
    pub e_t1: f64,
    pub e_t2: f64,
    pub top: AnchorGroupCheck,
    pub front: AnchorGroupCheck,
    #[serde(flatten)]
    pub bolt: ThroughBoltCheck,
    #[serde(flatten)]
    pub fin: FinPlateCheck,
    #[serde(flatten)]
    pub weld: WeldCheck,
    #[serde(flatten)]
    pub plate: PlateBearingCheck,
    #[serde(flatten)]
    pub tension: PlateTensionCheck,
    pub top_plate: PlateBearingCheck,
    pub top_bp_length: f64,
    pub top_bp_width: f64,
    pub front_bp_length: f64,
    pub front_bp_width: f64,
}

/// Anchorage check result, tagged by `clump_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "clump_type")]
pub enum AnchorageResult {
    #[serde(rename = "Box Clump")]
    Box(BoxClampResult),
    #[serde(rename = "U Clump")]
    U(UClampResult),
    #[serde(rename = "L Clump")]
    L(LClampResult),
}

impl AnchorageResult {
    pub fn base(&self) -> &AnchorageBase {
        match self {
            AnchorageResult::Box(r) => &r.base,
            AnchorageResult::U(r) => &r.base,
            AnchorageResult::L(r) => &r.base,
        }
    }

    /// Highest anchor tension/shear interaction of the detail
    pub fn governing_interaction(&self) -> f64 {
        match self {
            AnchorageResult::Box(r) => r.anchors.interaction,
            AnchorageResult::U(r) => r.anchors.interaction,
            AnchorageResult::L(r) => r.top.interaction.max(r.front.interaction),
        }
    }
}

// =============================================================================
// CALCULATION
// =============================================================================

/// Web and flange length of the mullion (mm)
///
/// A library profile supplies its own dimensions; otherwise the name must
/// end in a `W x F x T` token.
pub fn mullion_dimensions(frame: &FrameInput, library: &ProfileLibrary) -> Option<(f64, f64)> {
    let name = frame.mullion.as_deref()?;
    match library.find_aluminum(name) {
        Some(profile) => Some((nonzero(profile.web_length)?, nonzero(profile.flange_length)?)),
        None => {
            let (web, flange, _) = parse_dimension_triplet(name)?;
            Some((web, flange))
        }
    }
}

fn box_clamp(
    input: &AnchorageInput,
    props: &AnchorSpec,
    base: AnchorageBase,
    web: f64,
    flange: f64,
) -> AnchorageResult {
    let anchor_nos = or_default(input.anchor_nos, 4.0);
    let c_a1 = or_default(input.c_a1, 150.0);
    let length = 250.0;
    let width = web - 35.0;

    let v_ua = base.design_ry / anchor_nos;
    let demand = AnchorDemand {
        n_ua: 0.0,
        n_ug: 0.0,
        v_ua,
        v_ug: 2.0 * v_ua,
    };
    let s1 = length - 2.0 * PLATE_EDGE_DISTANCE;
    let s2 = width - 2.0 * 25.0;
    let hef = props.embed_depth;
    let a_nc = slab_top_breakout_area(hef, s1, s2, c_a1);
    let a_vc = (3.0 * c_a1 + s1) * props.h_a.min(1.5 * c_a1);
    let anchors = anchor_group_check(props, &demand, a_nc, a_vc, c_a1);

    let plate = plate_bearing(length, width, flange - 10.0, web - 40.0, 0.95, base.design_rz);

    AnchorageResult::Box(BoxClampResult {
        base,
        anchors,
        bp_length: round_to(length, 0),
        bp_width: round_to(width, 0),
        plate,
    })
}

fn u_clamp(
    input: &AnchorageInput,
    props: &AnchorSpec,
    base: AnchorageBase,
    flange: f64,
) -> Option<AnchorageResult> {
    let anchor_nos = or_default(input.anchor_nos, 4.0);
    let c_a1 = or_default(input.c_a1, 60.0);
    let length = 250.0;
    let width = 150.0;

    let n_ua = base.design_ry / anchor_nos;
    let v_ua = base.design_rz / anchor_nos;
    let demand = AnchorDemand {
        n_ua,
        n_ug: n_ua * anchor_nos,
        v_ua,
        v_ug: 2.0 * v_ua,
    };
    let s1 = length - 2.0 * PLATE_EDGE_DISTANCE;
    let s2 = width - 2.0 * PLATE_EDGE_DISTANCE;
    let a_nc = slab_edge_breakout_area(props.embed_depth, s1, s2, c_a1);
    let a_vc = (3.0 * c_a1 + s1) * 1.5 * c_a1;
    let anchors = anchor_group_check(props, &demand, a_nc, a_vc, c_a1);

    let FinAssembly { bolt, fin, weld } = fin_assembly(input, base.design_ry, base.design_rz, width);
    let bp_d = flange + 10.0;
    let plate = plate_bearing(length, width, bp_d, width, 0.8, base.design_ry);
    let tension = plate_tension(length, bp_d, n_ua)?;

    Some(AnchorageResult::U(UClampResult {
        base,
        anchors,
        bolt,
        fin,
        weld,
        bp_length: round_to(length, 0),
        bp_width: round_to(width, 0),
        plate,
        tension,
    }))
}

fn l_clamp(
    input: &AnchorageInput,
    props: &AnchorSpec,
    base: AnchorageBase,
    web: f64,
    flange: f64,
) -> Option<AnchorageResult> {
    let front_length = or_default(input.front_bp_length, 250.0);
    let front_width = or_default(input.front_bp_width, 150.0);
    let top_length = front_length;
    let top_width = or_default(input.top_bp_width, 250.0);
    let top_anchor_nos = or_default(input.top_anchor_nos, 2.0);
    let front_anchor_nos = 2.0;
    let front_c_a1 = or_default(input.front_c_a1, 60.0);
    let top_c_a1 = or_default(input.top_c_a1, 150.0);
    let fin_e = or_default(input.fin_e, 70.0);
    let hef = props.embed_depth;

    let s1 = top_length - 2.0 * PLATE_EDGE_DISTANCE;
    let (top_s2, e_t1) = if top_anchor_nos == 2.0 {
        (0.0, top_c_a1)
    } else {
        let s2 = top_width - top_c_a1 - PLATE_EDGE_DISTANCE;
        (s2, top_c_a1 + s2 / 2.0)
    };
    let e_f2 = front_width / 2.0 - PLATE_EDGE_DISTANCE;
    let e_f1 = (props.h_a / 2.0 - e_f2).min(front_width / 2.0 - PLATE_EDGE_DISTANCE);
    let e_t2 = fin_e;
    if e_f1 + e_f2 == 0.0 || e_t1 == 0.0 {
        return None;
    }

    // Statics of the bracket between the two anchor groups
    let b_x = base.design_ry * e_f2 / (e_f1 + e_f2);
    let a_x = base.design_ry - b_x;
    let b_y = base.design_rz * (e_t1 + e_t2) / e_t1;
    let a_y = base.design_rz - b_y;

    let top_v_ua = a_x / top_anchor_nos;
    let top_demand = AnchorDemand {
        n_ua: 0.0,
        n_ug: 0.0,
        v_ua: top_v_ua,
        v_ug: 2.0 * top_v_ua,
    };
    let top_a_nc = slab_top_breakout_area(hef, s1, top_s2, top_c_a1);
    let top_a_vc = (3.0 * top_c_a1 + s1) * props.h_a.min(1.5 * top_c_a1);
    let top = anchor_group_check(props, &top_demand, top_a_nc, top_a_vc, top_c_a1);

    let front_n_ua = b_x / front_anchor_nos;
    let front_v_ua = b_y / front_anchor_nos;
    let front_demand = AnchorDemand {
        n_ua: front_n_ua,
        n_ug: front_n_ua * front_anchor_nos,
        v_ua: front_v_ua,
        v_ug: front_v_ua * front_anchor_nos,
    };
    let front_a_nc = slab_edge_breakout_area(hef, s1, 0.0, front_c_a1);
    let front_a_vc = (3.0 * front_c_a1 + s1) * 1.5 * front_c_a1;
    let front = anchor_group_check(props, &front_demand, front_a_nc, front_a_vc, front_c_a1);

    let FinAssembly { bolt, fin, weld } = fin_assembly(input, base.design_ry, base.design_rz, front_width);
    let bp_d = flange + 10.0;
    let plate = plate_bearing(front_length, front_width, bp_d, front_width, 0.8, base.design_ry);
    let tension = plate_tension(front_length, bp_d, front_n_ua)?;
    let top_plate = plate_bearing(top_length, top_width, flange - 10.0, web - 40.0, 0.95, base.design_rz);

    Some(AnchorageResult::L(LClampResult {
        base,
        b_x: round_to(b_x, 2),
        a_x: round_to(a_x, 2),
        b_y: round_to(b_y, 2),
        a_y: round_to(a_y, 2),
        e_f1: round_to(e_f1, 2),
        e_f2: round_to(e_f2, 2),
        e_t1: round_to(e_t1, 2),
        e_t2: round_to(e_t2, 2),
        top,
        front,
        bolt,
        fin,
        weld,
        plate,
        tension,
        top_plate,
        top_bp_length: round_to(top_length, 0),
        top_bp_width: round_to(top_width, 0),
        front_bp_length: round_to(front_length, 0),
        front_bp_width: round_to(front_width, 0),
    }))
}

/// Check the anchorage of `frame`
///
/// Returns `None` when the frame has no width or length, no wind suction
/// value (zero is accepted), an unresolvable mullion, no reactions (irregular
/// frames without supplied values), an untabulated anchor diameter, a
/// negative embedment, or a bracket whose anchor line falls inside the
/// mullion footprint.
///
/// # Example
/// ```rust
/// use facade_core::calculations::anchorage::{calculate, AnchorageInput, AnchorageResult};
/// use facade_core::calculations::frame::FrameInput;
/// use facade_core::materials::ProfileLibrary;
///
/// let frame: FrameInput = serde_json::from_str(r#"{
///     "mullion": "M 150x65x3", "width": 1200, "length": 3600,
///     "wind_neg": 2.0, "glass_thk": 10
/// }"#).unwrap();
/// let anchor = AnchorageInput::default();
///
/// let result = calculate(&anchor, &frame, &ProfileLibrary::default()).unwrap();
/// assert!(matches!(result, AnchorageResult::Box(_)));
/// assert!(result.governing_interaction() < 1.0);
/// ```
pub fn calculate(
    input: &AnchorageInput,
    frame: &FrameInput,
    library: &ProfileLibrary,
) -> Option<AnchorageResult> {
    let width = nonzero(frame.width)?;
    let length = nonzero(frame.length)?;
    let wind_neg = frame.wind_neg?;
    let (web, flange) = mullion_dimensions(frame, library)?;

    let loads = frame_loads(
        frame.glass_thickness(),
        frame.frame_type,
        length,
        width,
        frame.tran_spacing,
        wind_neg,
    );
    let reactions = reaction_forces(
        frame.geometry,
        frame.frame_type,
        length,
        &loads,
        frame.reaction_ry,
        frame.reaction_rz,
    );
    let reaction_ry = reactions.ry?;
    let reaction_rz = reactions.rz?;
    let design_ry = reaction_ry * WIND_LOAD_FACTOR;
    let design_rz = reaction_rz * DEAD_LOAD_FACTOR;

    let diameter = or_default(input.anchor_dia, 12.0);
    let embed_depth = or_default(input.embed_depth, 100.0);
    let n_p5 = or_default(input.n_p5, 20.0);
    let h_a = or_default(input.h_a, 1000.0);
    let bp_thk = or_default(input.bp_thk, 5.0);
    let stress_area = anchor_stress_area(diameter)?;
    positive(Some(embed_depth))?;

    let props = AnchorSpec {
        diameter,
        embed_depth,
        stress_area,
        n_p5,
        h_a,
    };
    let base = AnchorageBase {
        reaction_ry: round_to(reaction_ry, 2),
        reaction_rz: round_to(reaction_rz, 2),
        design_ry: round_to(design_ry, 2),
        design_rz: round_to(design_rz, 2),
        a_se_n: stress_area,
        n_p5,
        h_a,
        bp_thk,
    };
    // Engine math uses the unrounded design reactions
    let unrounded = AnchorageBase {
        design_ry,
        design_rz,
        ..base.clone()
    };

    let mut result = match input.clump_type {
        ClampType::Box => box_clamp(input, &props, unrounded, web, flange),
        ClampType::U => u_clamp(input, &props, unrounded, flange)?,
        ClampType::L => l_clamp(input, &props, unrounded, web, flange)?,
    };
    match &mut result {
        AnchorageResult::Box(r) => r.base = base,
        AnchorageResult::U(r) => r.base = base,
        AnchorageResult::L(r) => r.base = base,
    }
    Some(result)
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::FrameType;
    use crate::materials::AluminumProfile;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.011
    }

    fn frame() -> FrameInput {
        FrameInput {
            mullion: Some("M-150".into()),
            width: Some(1200.0),
            length: Some(3600.0),
            wind_neg: Some(2.0),
            glass_thk: Some(10.0),
            frame_type: FrameType::FloorToFloor,
            ..Default::default()
        }
    }

    fn library() -> ProfileLibrary {
        ProfileLibrary {
            alum_profiles: vec![AluminumProfile {
                profile_name: "M-150".into(),
                web_length: Some(150.0),
                flange_length: Some(65.0),
                web_thk: Some(2.5),
                flange_thk: Some(3.0),
                f_y: Some(160.0),
                ..Default::default()
            }],
            steel_profiles: vec![],
        }
    }

    fn anchor(clump_type: ClampType) -> AnchorageInput {
        AnchorageInput {
            clump_type,
            ..Default::default()
        }
    }

    // ========================================================================
    // Reactions and shared data
    // ========================================================================

    #[test]
    fn test_design_reactions() {
        let r = calculate(&anchor(ClampType::Box), &frame(), &library()).unwrap();
        let base = r.base();
        // 2.4 × 3.6 / 2, 0.39 × 3.6 / 2
        assert_eq!(base.reaction_ry, 4.32);
        assert_eq!(base.reaction_rz, 0.7);
        assert_eq!(base.design_ry, 6.91);
        assert_eq!(base.design_rz, 0.98);
        assert_eq!(base.a_se_n, 84.3);
        assert_eq!(base.n_p5, 20.0);
        assert_eq!(base.bp_thk, 5.0);
    }

    #[test]
    fn test_stress_area_lookup() {
        assert_eq!(anchor_stress_area(10.0), Some(58.0));
        assert_eq!(anchor_stress_area(16.0), Some(156.7));
        assert_eq!(anchor_stress_area(14.0), None);

        let mut a = anchor(ClampType::Box);
        a.anchor_dia = Some(20.0);
        assert!(calculate(&a, &frame(), &library()).is_none());
    }

    #[test]
    fn test_anchor_group_capacities() {
        let props = AnchorSpec {
            diameter: 12.0,
            embed_depth: 100.0,
            stress_area: 84.3,
            n_p5: 20.0,
            h_a: 1000.0,
        };
        let check = anchor_group_check(&props, &AnchorDemand::default(), 90_000.0, 50_000.0, 150.0);
        // 0.75 × 84.3 × 500 / 1000
        assert!(approx_eq(check.phi_nsa, 31.61));
        assert_eq!(check.a_nco, 90_000.0);
        // 7 × √27.5 × 100^1.5 / 1000
        assert!(approx_eq(check.n_b, 36.71));
        assert_eq!(check.psi_ed_n, 1.0);
        assert_eq!(check.phi_npn, 14.0);
        assert!(approx_eq(check.phi_vsa, 16.44));
        assert_eq!(check.l_e, 96.0);
        assert_eq!(check.a_vco, 101_250.0);
        assert_eq!(check.interaction, 0.0);
    }

    // ========================================================================
    // Box clamp
    // ========================================================================

    #[test]
    fn test_box_clamp_geometry() {
        let AnchorageResult::Box(r) = calculate(&anchor(ClampType::Box), &frame(), &library()).unwrap() else {
            panic!("expected box clamp");
        };
        assert_eq!(r.bp_length, 250.0);
        assert_eq!(r.bp_width, 115.0);
        assert_eq!(r.plate.d, 55.0);
        assert_eq!(r.plate.b, 110.0);
        assert_eq!(r.anchors.n_ua, 0.0);
        // 6.912 / 4
        assert_eq!(r.anchors.v_ua, 1.73);
        assert_eq!(r.anchors.v_ug, 3.46);
        assert_eq!(r.anchors.beta_n, 0.0);
        assert!(r.anchors.interaction > 0.0 && r.anchors.interaction < 1.0);
    }

    #[test]
    fn test_box_clamp_zero_demand_has_zero_interaction() {
        let mut f = frame();
        f.wind_neg = Some(0.0);
        f.glass_thk = Some(0.0);
        let AnchorageResult::Box(r) = calculate(&anchor(ClampType::Box), &f, &library()).unwrap() else {
            panic!("expected box clamp");
        };
        assert_eq!(r.anchors.beta_n, 0.0);
        assert_eq!(r.anchors.beta_v, 0.0);
        assert_eq!(r.anchors.interaction, 0.0);
    }

    // ========================================================================
    // U clamp
    // ========================================================================

    #[test]
    fn test_u_clamp_components() {
        let AnchorageResult::U(r) = calculate(&anchor(ClampType::U), &frame(), &library()).unwrap() else {
            panic!("expected U clamp");
        };
        // 6.912 / 4 per anchor in tension, whole group 6.912
        assert_eq!(r.anchors.n_ua, 1.73);
        assert_eq!(r.anchors.n_ug, 6.91);
        assert_eq!(r.bolt.bolt_nos, 2);
        assert_eq!(r.bolt.stress_area, Some(58.0));
        assert_eq!(r.bolt.ab, 78.54);
        assert_eq!(r.fin.width, 150.0);
        assert_eq!(r.fin.length, 120.0);
        assert_eq!(r.fin.dh, 12.0);
        // d = 65 + 10, x = (250 − 75)/2 − 40
        assert_eq!(r.plate.d, 75.0);
        assert_eq!(r.tension.x, 47.5);
        assert_eq!(r.tension.b_eff, 87.5);
        assert_eq!(r.tension.tu, r.anchors.n_ua);
        assert_eq!(r.weld.phi_rn, 614.28);
    }

    #[test]
    fn test_untabulated_through_bolt_reports_null() {
        let mut a = anchor(ClampType::U);
        a.thr_bolt_dia = Some(14.0);
        let r = calculate(&a, &frame(), &library()).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert!(json["thr_bolt_AseN"].is_null());
        assert_eq!(json["clump_type"], "U Clump");
    }

    // ========================================================================
    // L clamp
    // ========================================================================

    #[test]
    fn test_l_clamp_statics() {
        let AnchorageResult::L(r) = calculate(&anchor(ClampType::L), &frame(), &library()).unwrap() else {
            panic!("expected L clamp");
        };
        // e_f2 = 150/2 − 40, e_f1 = min(500 − 35, 35)
        assert_eq!(r.e_f2, 35.0);
        assert_eq!(r.e_f1, 35.0);
        assert_eq!(r.e_t1, 150.0);
        assert_eq!(r.e_t2, 70.0);
        // B_x = A_x = R_y/2
        assert!(approx_eq(r.b_x + r.a_x, r.base.design_ry));
        assert!(approx_eq(r.b_x, r.a_x));
        // B_y + A_y = R_z
        assert!(approx_eq(r.b_y + r.a_y, r.base.design_rz));
        assert!(r.a_y < 0.0);
        assert_eq!(r.top.n_ua, 0.0);
        assert!(r.front.n_ua > 0.0);
        assert_eq!(r.top_bp_width, 250.0);
        assert_eq!(r.front_bp_length, 250.0);
    }

    #[test]
    fn test_l_clamp_nested_groups_in_json() {
        let r = calculate(&anchor(ClampType::L), &frame(), &library()).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["clump_type"], "L Clump");
        assert!(json["top"]["interaction"].is_number());
        assert!(json["front"]["phi_Ncbg"].is_number());
        assert!(json["top_plate"]["bp_A1"].is_number());
        assert!(json["bp_Tu"].is_number());
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    #[test]
    fn test_mullion_dimensions_from_name() {
        let mut f = frame();
        f.mullion = Some("Mullion 180x70x3".into());
        assert_eq!(mullion_dimensions(&f, &library()), Some((180.0, 70.0)));
        f.mullion = Some("Mullion custom".into());
        assert!(calculate(&anchor(ClampType::Box), &f, &library()).is_none());
    }

    #[test]
    fn test_missing_suction_rejected() {
        let mut f = frame();
        f.wind_neg = None;
        assert!(calculate(&anchor(ClampType::Box), &f, &library()).is_none());
    }

    #[test]
    fn test_non_numeric_frame_field_gives_none() {
        let f: FrameInput = serde_json::from_str(
            r#"{"mullion": "M-150", "width": 1200, "length": "tall", "wind_neg": 2.0,
                "frame_type": "Floor-to-floor", "glass_thk": 10}"#,
        )
        .unwrap();
        assert_eq!(f.length, None);
        assert!(calculate(&anchor(ClampType::Box), &f, &library()).is_none());

        let f: FrameInput = serde_json::from_str(
            r#"{"mullion": "M-150", "width": 1200, "length": 3600, "wind_neg": "n/a"}"#,
        )
        .unwrap();
        assert!(calculate(&anchor(ClampType::U), &f, &library()).is_none());
    }

    #[test]
    fn test_non_numeric_anchor_field_takes_default() {
        let a: AnchorageInput =
            serde_json::from_str(r#"{"clump_type": "Box Clump", "anchor_dia": "M12", "bp_thk": "-"}"#).unwrap();
        assert_eq!(a.anchor_dia, None);
        assert_eq!(a.bp_thk, None);
        let parsed = calculate(&a, &frame(), &library()).unwrap();
        let defaults = calculate(&anchor(ClampType::Box), &frame(), &library()).unwrap();
        assert_eq!(parsed, defaults);

        let a: AnchorageInput = serde_json::from_str(r#"{"embed_depth": "-50"}"#).unwrap();
        assert!(calculate(&a, &frame(), &library()).is_none());
    }

    #[test]
    fn test_clamp_type_parse() {
        let a: AnchorageInput = serde_json::from_str(r#"{"clump_type": "U Clump", "anchor_dia": "16"}"#).unwrap();
        assert_eq!(a.clump_type, ClampType::U);
        assert_eq!(a.anchor_dia, Some(16.0));
        let bad: Result<AnchorageInput, _> = serde_json::from_str(r#"{"clump_type": "T Clump"}"#);
        assert!(bad.is_err());
    }
}
