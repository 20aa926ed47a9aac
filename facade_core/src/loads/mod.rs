//! Facade frame loads, joint forces and support reactions
//!
//! The frame, connection and anchorage checks all start from the same
//! service loads on a mullion/transom grid. They are derived here once so
//! the three engines cannot drift apart.
//!
//! # Overview
//!
//! - [`FrameType`] - floor-to-floor (simple span) or continuous (two-span) mullions
//! - [`Geometry`] - regular grids are computed; irregular grids carry
//!   externally analysed forces
//! - [`frame_loads`] - dead and wind line loads on mullion and transom
//! - [`joint_forces`] - transom-to-mullion joint shear
//! - [`reaction_forces`] - mullion support reactions at the slab
//!
//! # Example
//!
//! ```
//! use facade_core::loads::{frame_loads, joint_forces, FrameType, Geometry};
//!
//! // 1200 mm wide panel, 3600 mm span, 10 mm glass, 2.0 kPa suction
//! let loads = frame_loads(10.0, FrameType::Continuous, 3600.0, 1200.0, None, 2.0);
//! assert_eq!(loads.tran_w_wind, 2.4);
//!
//! let joint = joint_forces(Geometry::Regular, 1200.0, &loads, None, None);
//! assert_eq!(joint.fy, Some(0.72));
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::equations::beam::{two_span_interior_reaction, uniform_load_shear};
use crate::errors::CalcError;
use crate::units::{mm_to_m, round_to};

/// Area weight of glass per mm of thickness (kPa/mm)
pub const GLASS_UNIT_WEIGHT: f64 = 0.025;

/// Accessory allowance as a fraction of glass self-weight
pub const ACCESSORY_FACTOR: f64 = 0.3;

/// LRFD factor on dead load components
pub const DEAD_LOAD_FACTOR: f64 = 1.4;

/// LRFD factor on wind load components
pub const WIND_LOAD_FACTOR: f64 = 1.6;

/// Mullion support arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FrameType {
    /// Simply supported between floors
    FloorToFloor,
    /// Continuous over an intermediate support (two equal spans)
    #[default]
    Continuous,
}

impl FrameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameType::FloorToFloor => "Floor-to-floor",
            FrameType::Continuous => "Continuous",
        }
    }

    /// Span used for effective wind area: L for a single span, 2L when continuous
    pub fn effective_span(&self, length: f64) -> f64 {
        match self {
            FrameType::FloorToFloor => length,
            FrameType::Continuous => 2.0 * length,
        }
    }
}

impl FromStr for FrameType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "floor-to-floor" => Ok(FrameType::FloorToFloor),
            "continuous" => Ok(FrameType::Continuous),
            other => Err(CalcError::invalid_input(
                "frame_type",
                other,
                "Expected 'Floor-to-floor' or 'Continuous'",
            )),
        }
    }
}

impl TryFrom<String> for FrameType {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameType> for String {
    fn from(value: FrameType) -> Self {
        value.as_str().to_string()
    }
}

/// Whether frame forces are computed or supplied
///
/// Anything other than `"regular"` is treated as irregular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Geometry {
    #[default]
    Regular,
    Irregular,
}

impl From<String> for Geometry {
    fn from(value: String) -> Self {
        if value == "regular" {
            Geometry::Regular
        } else {
            Geometry::Irregular
        }
    }
}

impl From<Geometry> for String {
    fn from(value: Geometry) -> Self {
        match value {
            Geometry::Regular => "regular".to_string(),
            Geometry::Irregular => "irregular".to_string(),
        }
    }
}

/// Service line loads on the frame members (kN/m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameLoads {
    pub mul_w_dead: f64,
    pub mul_w_wind: f64,
    pub tran_w_dead: f64,
    pub tran_w_wind: f64,
}

/// Glass self-weight (kPa) for a total glass thickness (mm)
#[inline]
pub fn glass_self_weight(glass_thk: f64) -> f64 {
    glass_thk * GLASS_UNIT_WEIGHT
}

/// Dead and wind line loads on mullion and transom
///
/// The mullion carries glass plus accessories over the panel width. A
/// transom carries the full panel load when the frame is continuous or an
/// intermediate transom splits the span (`tran_spacing` < `length`);
/// otherwise it shares the panel with the next transom and takes half.
///
/// # Arguments
/// * `glass_thk` - Total glass thickness (mm)
/// * `frame_type` - Mullion support arrangement
/// * `length` - Mullion span (mm)
/// * `width` - Panel width / transom span (mm)
/// * `tran_spacing` - Transom spacing (mm); `None` or zero means none
/// * `wind_neg` - Design suction magnitude (kPa)
pub fn frame_loads(
    glass_thk: f64,
    frame_type: FrameType,
    length: f64,
    width: f64,
    tran_spacing: Option<f64>,
    wind_neg: f64,
) -> FrameLoads {
    let glass_sw = glass_self_weight(glass_thk);
    let acc_sw = glass_sw * ACCESSORY_FACTOR;
    let width_m = mm_to_m(width);

    let split_span = tran_spacing.is_some_and(|s| s != 0.0 && s < length);
    let share = if frame_type == FrameType::Continuous || split_span {
        1.0
    } else {
        0.5
    };

    FrameLoads {
        mul_w_dead: (glass_sw + acc_sw) * width_m,
        mul_w_wind: wind_neg * width_m,
        tran_w_dead: glass_sw * share * width_m,
        tran_w_wind: wind_neg * share * width_m,
    }
}

/// Transom-to-mullion joint force components (kN)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointForces {
    /// In-plane (wind) component
    pub fy: Option<f64>,
    /// Vertical (dead) component
    pub fz: Option<f64>,
}

/// Joint forces at each transom end
///
/// A regular transom is split over four joints: fy = w_wind·W/4, fz =
/// w_dead·W/4. Irregular frames pass the supplied values through.
pub fn joint_forces(
    geometry: Geometry,
    width: f64,
    loads: &FrameLoads,
    supplied_fy: Option<f64>,
    supplied_fz: Option<f64>,
) -> JointForces {
    match geometry {
        Geometry::Regular => JointForces {
            fy: Some(round_to(loads.tran_w_wind * mm_to_m(width) / 4.0, 2)),
            fz: Some(round_to(loads.tran_w_dead * mm_to_m(width) / 4.0, 2)),
        },
        Geometry::Irregular => JointForces {
            fy: supplied_fy,
            fz: supplied_fz,
        },
    }
}

/// Mullion support reactions (kN)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReactionForces {
    /// Horizontal (wind) reaction
    #[serde(rename = "reaction_Ry")]
    pub ry: Option<f64>,
    /// Vertical (dead) reaction
    #[serde(rename = "reaction_Rz")]
    pub rz: Option<f64>,
}

/// Support reactions of a mullion
///
/// | Frame type | R_y | R_z |
/// |------------|-----|-----|
/// | Floor-to-floor | wL/2 | w_dL/2 |
/// | Continuous | 10wL/8 (interior support) | w_d·2L (full dead load hung at one anchor) |
pub fn reaction_forces(
    geometry: Geometry,
    frame_type: FrameType,
    length: f64,
    loads: &FrameLoads,
    supplied_ry: Option<f64>,
    supplied_rz: Option<f64>,
) -> ReactionForces {
    if geometry == Geometry::Irregular {
        return ReactionForces {
            ry: supplied_ry,
            rz: supplied_rz,
        };
    }
    let span_m = mm_to_m(length);
    let (ry, rz) = match frame_type {
        FrameType::FloorToFloor => (
            uniform_load_shear(loads.mul_w_wind, span_m),
            uniform_load_shear(loads.mul_w_dead, span_m),
        ),
        FrameType::Continuous => (
            two_span_interior_reaction(loads.mul_w_wind, span_m),
            loads.mul_w_dead * 2.0 * span_m,
        ),
    };
    ReactionForces {
        ry: Some(round_to(ry, 2)),
        rz: Some(round_to(rz, 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ========================================================================
    // Line loads
    // ========================================================================

    #[test]
    fn test_mullion_loads() {
        let l = frame_loads(10.0, FrameType::FloorToFloor, 3600.0, 1200.0, None, 2.0);
        // (0.25 + 0.075) × 1.2
        assert!(approx_eq(l.mul_w_dead, 0.39));
        assert!(approx_eq(l.mul_w_wind, 2.4));
    }

    #[test]
    fn test_transom_load_halved_without_intermediate_transom() {
        let l = frame_loads(10.0, FrameType::FloorToFloor, 3600.0, 1200.0, None, 2.0);
        assert!(approx_eq(l.tran_w_wind, 1.2));
        assert!(approx_eq(l.tran_w_dead, 0.15));

        // spacing equal to the span does not split it
        let same = frame_loads(10.0, FrameType::FloorToFloor, 3600.0, 1200.0, Some(3600.0), 2.0);
        assert_eq!(l, same);
        let zero = frame_loads(10.0, FrameType::FloorToFloor, 3600.0, 1200.0, Some(0.0), 2.0);
        assert_eq!(l, zero);
    }

    #[test]
    fn test_transom_full_load_when_split_or_continuous() {
        let split = frame_loads(10.0, FrameType::FloorToFloor, 3600.0, 1200.0, Some(1800.0), 2.0);
        assert!(approx_eq(split.tran_w_wind, 2.4));
        assert!(approx_eq(split.tran_w_dead, 0.3));

        let cont = frame_loads(10.0, FrameType::Continuous, 3600.0, 1200.0, None, 2.0);
        assert!(approx_eq(cont.tran_w_wind, 2.4));
    }

    // ========================================================================
    // Joint and reaction forces
    // ========================================================================

    #[test]
    fn test_joint_forces_regular() {
        let l = frame_loads(10.0, FrameType::Continuous, 3600.0, 1200.0, None, 2.0);
        let j = joint_forces(Geometry::Regular, 1200.0, &l, Some(9.0), Some(9.0));
        // 2.4 × 1.2 / 4, 0.3 × 1.2 / 4
        assert_eq!(j.fy, Some(0.72));
        assert_eq!(j.fz, Some(0.09));
    }

    #[test]
    fn test_joint_forces_irregular_pass_through() {
        let l = frame_loads(10.0, FrameType::Continuous, 3600.0, 1200.0, None, 2.0);
        let j = joint_forces(Geometry::Irregular, 1200.0, &l, Some(1.5), None);
        assert_eq!(j, JointForces { fy: Some(1.5), fz: None });
    }

    #[test]
    fn test_reactions_by_frame_type() {
        let l = frame_loads(10.0, FrameType::FloorToFloor, 4000.0, 1000.0, None, 1.5);
        let r = reaction_forces(Geometry::Regular, FrameType::FloorToFloor, 4000.0, &l, None, None);
        // 1.5 × 4 / 2, 0.325 × 4 / 2
        assert_eq!(r.ry, Some(3.0));
        assert_eq!(r.rz, Some(0.65));

        let r = reaction_forces(Geometry::Regular, FrameType::Continuous, 4000.0, &l, None, None);
        assert_eq!(r.ry, Some(7.5));
        assert_eq!(r.rz, Some(2.6));
    }

    #[test]
    fn test_reactions_irregular_pass_through() {
        let l = frame_loads(0.0, FrameType::Continuous, 4000.0, 1000.0, None, 1.5);
        let r = reaction_forces(Geometry::Irregular, FrameType::Continuous, 4000.0, &l, Some(4.2), Some(1.1));
        assert_eq!(r, ReactionForces { ry: Some(4.2), rz: Some(1.1) });
    }

    // ========================================================================
    // Tags
    // ========================================================================

    #[test]
    fn test_frame_type_parse() {
        assert_eq!("Floor-to-floor".parse::<FrameType>().unwrap(), FrameType::FloorToFloor);
        assert_eq!(" continuous ".parse::<FrameType>().unwrap(), FrameType::Continuous);
        assert!("Cantilever".parse::<FrameType>().is_err());
        let json = serde_json::to_string(&FrameType::FloorToFloor).unwrap();
        assert_eq!(json, "\"Floor-to-floor\"");
    }

    #[test]
    fn test_geometry_anything_else_is_irregular() {
        let g: Geometry = serde_json::from_str("\"regular\"").unwrap();
        assert_eq!(g, Geometry::Regular);
        let g: Geometry = serde_json::from_str("\"Irregular (RFEM)\"").unwrap();
        assert_eq!(g, Geometry::Irregular);
    }
}
