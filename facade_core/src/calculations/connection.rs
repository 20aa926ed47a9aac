//! # Transom-to-Mullion Screw Connection
//!
//! Self-drilling screws fixing a transom cleat to the mullion, checked per
//! AISI S100 Chapter J4 with F_u = 207 MPa for the aluminum plies and a
//! resistance factor of 0.5.
//!
//! ## Demands
//!
//! The joint forces of the parent frame are factored (1.6 wind, 1.4 dead)
//! and shared by half the screws:
//!
//! ```text
//! R_y = 1.6·f_y / (n/2)     R_z = 1.4·f_z / (n/2)     V_u = √(R_y² + R_z²)
//! ```
//!
//! ## Capacities
//!
//! | Mode | Nominal strength |
//! |------|------------------|
//! | Tilting / bearing | min(4.2√(t₂³d)·F_u, 2.7t₁d·F_u, 2.7t₂d·F_u) |
//! | Pull-out | 0.85·t_c·d·F_u |
//! | Pull-over | 1.5·t₁·d_w·F_u, d_w ≤ 19.1 mm |
//!
//! ## Interaction
//!
//! ```text
//! β_pullover = V_u/P_nv + 0.71·R_z/P_nov
//! β_pullout  = V_u/P_nv + R_z/P_not
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::frame::FrameInput;
use crate::fields::{lenient_f64, nonzero};
use crate::loads::{frame_loads, joint_forces, FrameLoads, DEAD_LOAD_FACTOR, WIND_LOAD_FACTOR};
use crate::units::{n_to_kn, round_to};

/// Tensile strength of the connected aluminum plies (MPa)
pub const PLY_TENSILE_STRENGTH: f64 = 207.0;

/// Resistance factor for screw connections
pub const PHI_SCREW: f64 = 0.5;

/// Maximum effective washer diameter for pull-over (mm)
pub const MAX_WASHER_DIAMETER: f64 = 19.1;

/// Screw connection record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInput {
    #[serde(default)]
    pub label: String,
    /// Index of the parent frame within its category
    #[serde(default)]
    pub frame: usize,
    /// Number of screws in the joint
    #[serde(default, deserialize_with = "lenient_f64")]
    pub screw_nos: Option<f64>,
    /// Nominal screw diameter (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub screw_dia: Option<f64>,
    /// Screw head or washer diameter (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub head_dia: Option<f64>,
    /// Ply in contact with the screw head (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub t1: Option<f64>,
    /// Ply not in contact with the screw head (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub t2: Option<f64>,
    /// Thread engagement depth in the receiving ply (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tc: Option<f64>,
}

/// Screw connection check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionResult {
    pub joint_fy: f64,
    pub joint_fz: f64,
    pub tran_w_wind: f64,
    pub tran_w_dead: f64,
    /// Factored tension per screw (kN)
    #[serde(rename = "R_zA")]
    pub r_z: f64,
    /// Factored shear per screw (kN)
    #[serde(rename = "R_yA")]
    pub r_y: f64,
    #[serde(rename = "Vu")]
    pub vu: f64,
    pub d_w: f64,
    #[serde(rename = "phi_Pnv")]
    pub phi_pnv: f64,
    #[serde(rename = "phi_Pnot")]
    pub phi_pnot: f64,
    #[serde(rename = "phi_Pnov")]
    pub phi_pnov: f64,
    pub beta_pullover: f64,
    pub beta_pullout: f64,
}

impl ConnectionResult {
    pub fn governing_ratio(&self) -> f64 {
        self.beta_pullover.max(self.beta_pullout)
    }
}

/// Transom loads of the parent frame as seen by its joints
///
/// Missing suction counts as zero; width and length are required.
pub fn parent_frame_loads(frame: &FrameInput) -> Option<(f64, FrameLoads)> {
    let width = nonzero(frame.width)?;
    let length = nonzero(frame.length)?;
    let loads = frame_loads(
        frame.glass_thickness(),
        frame.frame_type,
        length,
        width,
        frame.tran_spacing,
        frame.wind_neg.unwrap_or(0.0),
    );
    Some((width, loads))
}

/// Check the screw connection of `frame`
///
/// Returns `None` when a screw field is missing or zero, when the frame has
/// no width or length, or when an irregular frame does not supply its joint
/// forces.
///
/// # Example
/// ```rust
/// use facade_core::calculations::connection::{calculate, ConnectionInput};
/// use facade_core::calculations::frame::FrameInput;
///
/// let frame: FrameInput = serde_json::from_str(
///     r#"{"width": 1200, "length": 3600, "wind_neg": 2.0, "glass_thk": 10}"#,
/// ).unwrap();
/// let screws: ConnectionInput = serde_json::from_str(
///     r#"{"screw_nos": 4, "screw_dia": 4.8, "head_dia": 8.0, "t1": 2.0, "t2": 2.5, "tc": 2.5}"#,
/// ).unwrap();
///
/// let result = calculate(&screws, &frame).unwrap();
/// assert!(result.beta_pullover < 1.0);
/// ```
pub fn calculate(input: &ConnectionInput, frame: &FrameInput) -> Option<ConnectionResult> {
    let (width, loads) = parent_frame_loads(frame)?;
    let joint = joint_forces(frame.geometry, width, &loads, frame.joint_fy, frame.joint_fz);
    let joint_fy = joint.fy?;
    let joint_fz = joint.fz?;

    let screw_nos = nonzero(input.screw_nos)?;
    let d = nonzero(input.screw_dia)?;
    let head_dia = nonzero(input.head_dia)?;
    let t1 = nonzero(input.t1)?;
    let t2 = nonzero(input.t2)?;
    let tc = nonzero(input.tc)?;

    let design_fy = joint_fy * WIND_LOAD_FACTOR;
    let design_fz = joint_fz * DEAD_LOAD_FACTOR;
    let sharing = screw_nos / 2.0;
    let r_y = design_fy / sharing;
    let r_z = design_fz / sharing;
    let vu = r_y.hypot(r_z);

    let fu = PLY_TENSILE_STRENGTH;
    let pnv = (4.2 * (t2.powi(3) * d).sqrt() * fu)
        .min(2.7 * t1 * d * fu)
        .min(2.7 * t2 * d * fu);
    let phi_pnv = round_to(PHI_SCREW * n_to_kn(pnv), 2);
    let phi_pnot = round_to(PHI_SCREW * n_to_kn(0.85 * tc * d * fu), 2);
    let d_w = head_dia.min(MAX_WASHER_DIAMETER);
    let phi_pnov = round_to(PHI_SCREW * n_to_kn(1.5 * t1 * d_w * fu), 2);
    if phi_pnv == 0.0 || phi_pnot == 0.0 || phi_pnov == 0.0 {
        return None;
    }

    let shear_term = vu / (phi_pnv / PHI_SCREW);
    let beta_pullover = shear_term + 0.71 * r_z / (phi_pnov / PHI_SCREW);
    let beta_pullout = shear_term + r_z / (phi_pnot / PHI_SCREW);

    Some(ConnectionResult {
        joint_fy: round_to(joint_fy, 2),
        joint_fz: round_to(joint_fz, 2),
        tran_w_wind: round_to(loads.tran_w_wind, 2),
        tran_w_dead: round_to(loads.tran_w_dead, 2),
        r_z: round_to(r_z, 2),
        r_y: round_to(r_y, 2),
        vu: round_to(vu, 2),
        d_w: round_to(d_w, 2),
        phi_pnv,
        phi_pnot,
        phi_pnov,
        beta_pullover: round_to(beta_pullover, 2),
        beta_pullout: round_to(beta_pullout, 2),
    })
}
