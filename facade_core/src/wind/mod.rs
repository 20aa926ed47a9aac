//! # Wind Pressure Engine
//!
//! Building-level (MWFRS) pressures per floor and component-level (C&C)
//! pressures per effective area, from a [`WindEnvironment`].
//!
//! ## Flow
//!
//! 1. Parse the floor-height sequence; building height h is the cumulative
//!    height of the top floor.
//! 2. Resolve the basic wind speed (explicit value, else location table).
//! 3. MWFRS: compute q_h, internal, leeward and side-wall pressures once at
//!    h, then windward pressure at every floor level.
//! 4. C&C: evaluate at the top level only for the standard effective areas.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::wind::{compute_mwfrs_pressures, WindEnvironment};
//!
//! let env: WindEnvironment = serde_json::from_str(r#"{
//!     "exposure_cat": "B",
//!     "b_length": 30, "b_width": 20,
//!     "wind_speed": 50, "K_d": 0.85, "GC_pi": 0.18,
//!     "floor_heights": "3.5 3.2 3.2"
//! }"#).unwrap();
//!
//! let mwfrs = compute_mwfrs_pressures(&env).unwrap();
//! assert_eq!(mwfrs.summary.b_height, 9.9);
//! assert_eq!(mwfrs.levels.len(), 3);
//! ```

pub mod coefficients;
pub mod locations;

pub use coefficients::{
    base_velocity_pressure, cladding_pressure_coefficients, external_pressure_coefficients,
    gust_effect_factor, roof_cladding_coefficients, topographic_factor,
    velocity_pressure_coefficient, wall_cladding_coefficients, CladdingCoefficients,
    CladdingSurface, CrestSide, ExposureCategory, ExternalPressureCoefficients, RiskCategory,
    RoofCladdingCoefficients, Topography, TopographyInput, WallCladdingCoefficients, WindSystem,
    RIGID_GUST_FACTOR,
};
pub use locations::{known_locations, location_wind_speed};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::fields::{lenient_f64, parse_number};
use crate::units::round_to;

/// Effective areas (m²) for the C&C tables
pub const CLADDING_AREAS: [f64; 6] = [5.0, 10.0, 20.0, 30.0, 40.0, 46.5];

// =============================================================================
// INPUT
// =============================================================================

/// Floor-to-floor heights, as a list or a space/comma separated string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FloorHeights {
    List(Vec<f64>),
    Text(String),
}

impl Default for FloorHeights {
    fn default() -> Self {
        FloorHeights::List(Vec::new())
    }
}

/// Wind environment of the building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindEnvironment {
    /// Exposure category (A/B/C)
    pub exposure_cat: ExposureCategory,

    /// Building length parallel to the wind (m)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub b_length: Option<f64>,

    /// Building width normal to the wind (m)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub b_width: Option<f64>,

    /// Basic wind speed (m/s); zero or absent falls back to `location`
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wind_speed: Option<f64>,

    /// Site location for the wind-speed table
    #[serde(default)]
    pub location: Option<String>,

    /// Directionality factor K_d
    #[serde(rename = "K_d", default, deserialize_with = "lenient_f64")]
    pub k_d: Option<f64>,

    /// Internal pressure coefficient GC_pi (magnitude)
    #[serde(rename = "GC_pi", default, deserialize_with = "lenient_f64")]
    pub gc_pi: Option<f64>,

    /// Risk (occupancy) category for the importance factor
    #[serde(default)]
    pub occupancy_cat: RiskCategory,

    /// Site topography
    #[serde(flatten)]
    pub topography: TopographyInput,

    /// Floor-to-floor heights (m), bottom to top
    #[serde(default)]
    pub floor_heights: FloorHeights,

    /// Fundamental natural frequency n₁ (Hz)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub b_freq: Option<f64>,

    /// Damping ratio β
    #[serde(default, deserialize_with = "lenient_f64")]
    pub damping: Option<f64>,
}

impl WindEnvironment {
    fn require(value: Option<f64>, field: &str) -> CalcResult<f64> {
        value.ok_or_else(|| CalcError::missing_field(field))
    }

    fn require_positive(value: Option<f64>, field: &str) -> CalcResult<f64> {
        let v = Self::require(value, field)?;
        if v <= 0.0 {
            return Err(CalcError::invalid_input(field, v.to_string(), "Must be positive"));
        }
        Ok(v)
    }
}

// =============================================================================
// FLOOR HEIGHTS AND WIND SPEED
// =============================================================================

/// Parse floor heights into (floor heights, cumulative heights)
///
/// Non-positive entries are skipped. Cumulative heights are strictly
/// increasing.
///
/// # Errors
/// - `MissingField` if the text is empty
/// - `InvalidInput` naming the first non-numeric token
/// - `InvalidInput` if no positive height remains
///
/// ```rust
/// use facade_core::wind::{parse_floor_heights, FloorHeights};
///
/// let (floors, cumu) = parse_floor_heights(&FloorHeights::Text("3.5, 3.2 3.2".into())).unwrap();
/// assert_eq!(floors, vec![3.5, 3.2, 3.2]);
/// assert!((cumu[2] - 9.9).abs() < 1e-9);
/// ```
pub fn parse_floor_heights(input: &FloorHeights) -> CalcResult<(Vec<f64>, Vec<f64>)> {
    let floors: Vec<f64> = match input {
        FloorHeights::List(values) => values.iter().copied().filter(|h| *h > 0.0).collect(),
        FloorHeights::Text(text) => {
            let normalized = text.replace(',', " ");
            let tokens: Vec<&str> = normalized.split_whitespace().collect();
            if tokens.is_empty() {
                return Err(CalcError::missing_field("floor_heights"));
            }
            let mut floors = Vec::with_capacity(tokens.len());
            for token in tokens {
                let value = parse_number(token).ok_or_else(|| {
                    CalcError::invalid_input("floor_heights", token, "Invalid floor height value")
                })?;
                if value > 0.0 {
                    floors.push(value);
                }
            }
            floors
        }
    };

    if floors.is_empty() {
        return Err(CalcError::invalid_input(
            "floor_heights",
            format!("{:?}", input),
            "No positive floor heights found",
        ));
    }

    let cumulative = floors
        .iter()
        .scan(0.0, |total, h| {
            *total += h;
            Some(*total)
        })
        .collect();

    Ok((floors, cumulative))
}

/// Basic wind speed: the explicit value if positive, else the location table
pub fn resolve_wind_speed(env: &WindEnvironment) -> CalcResult<f64> {
    match env.wind_speed {
        Some(v) if v > 0.0 => Ok(v),
        _ => match env.location.as_deref() {
            Some(location) if !location.trim().is_empty() => location_wind_speed(location),
            _ => Err(CalcError::missing_field("wind_speed")),
        },
    }
}

// =============================================================================
// MWFRS
// =============================================================================

/// Building-level values of the MWFRS calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MwfrsSummary {
    /// Building height h (m)
    pub b_height: f64,
    #[serde(rename = "K_h")]
    pub k_h: f64,
    #[serde(rename = "K_ht")]
    pub k_ht: f64,
    /// Velocity pressure at h (kPa)
    pub q_h: f64,
    /// Internal pressure q_h·GC_pi (kPa)
    #[serde(rename = "P_hi")]
    pub p_hi: f64,
    /// Leeward wall pressure (kPa)
    #[serde(rename = "P_hl")]
    pub p_hl: f64,
    /// Side wall pressure (kPa)
    #[serde(rename = "P_hs")]
    pub p_hs: f64,
    pub gust_factor: f64,
    #[serde(rename = "Imp_factor")]
    pub imp_factor: f64,
    #[serde(rename = "C_pw")]
    pub c_pw: f64,
    #[serde(rename = "C_pl")]
    pub c_pl: f64,
    #[serde(rename = "C_ps")]
    pub c_ps: f64,
    pub wind_speed: f64,
}

/// Windward wall pressure at one floor level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MwfrsLevel {
    /// 1-based level number, bottom first
    pub level: usize,
    /// Floor-to-floor height (m)
    pub height: f64,
    /// Height of the level above grade (m)
    pub cumu_height: f64,
    #[serde(rename = "K_z")]
    pub k_z: f64,
    #[serde(rename = "K_zt")]
    pub k_zt: f64,
    pub q_z: f64,
    /// Windward pressure q_z·G·C_pw + P_hi (kPa)
    #[serde(rename = "P_zw")]
    pub p_zw: f64,
}

/// MWFRS result: summary plus one row per floor, bottom to top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MwfrsPressures {
    pub summary: MwfrsSummary,
    pub levels: Vec<MwfrsLevel>,
}

/// Compute MWFRS pressures floor by floor
///
/// # Formula
/// - q = 0.000613·K·K_zt·K_d·V²·I
/// - P_hi = q_h·GC_pi
/// - P_hl = q_h·G·C_pl − P_hi, P_hs = q_h·G·C_ps − P_hi
/// - P_zw = q_z·G·C_pw + P_hi
///
/// G comes from the flexible-building gust model when both `b_freq` and
/// `damping` are positive, otherwise [`RIGID_GUST_FACTOR`].
pub fn compute_mwfrs_pressures(env: &WindEnvironment) -> CalcResult<MwfrsPressures> {
    let (floors, cumulative) = parse_floor_heights(&env.floor_heights)?;
    let b_height = cumulative.last().copied().unwrap_or_default();
    let length = WindEnvironment::require_positive(env.b_length, "b_length")?;
    let width = WindEnvironment::require_positive(env.b_width, "b_width")?;
    let k_d = WindEnvironment::require(env.k_d, "K_d")?;
    let gc_pi = WindEnvironment::require(env.gc_pi, "GC_pi")?;
    let wind_speed = resolve_wind_speed(env)?;
    let exposure = env.exposure_cat;

    let k_h = velocity_pressure_coefficient(exposure, b_height, WindSystem::Mwfrs);
    let k_ht = topographic_factor(&env.topography, b_height, exposure)?;
    let cp = external_pressure_coefficients(length, width);
    let gust = match (env.b_freq, env.damping) {
        (Some(n), Some(beta)) if n > 0.0 && beta > 0.0 => {
            gust_effect_factor(b_height, length, width, wind_speed, n, beta, exposure)
        }
        _ => RIGID_GUST_FACTOR,
    };
    let importance = env.occupancy_cat.importance_factor();
    let q_base = base_velocity_pressure(wind_speed, k_d, env.occupancy_cat);

    let q_h = q_base * k_h * k_ht;
    let p_hi = q_h * gc_pi;
    let p_hl = q_h * gust * cp.c_pl - p_hi;
    let p_hs = q_h * gust * cp.c_ps - p_hi;

    let mut levels = Vec::with_capacity(floors.len());
    for (index, (height, cumu_height)) in floors.iter().zip(cumulative.iter()).enumerate() {
        let k_z = velocity_pressure_coefficient(exposure, *cumu_height, WindSystem::Mwfrs);
        let k_zt = topographic_factor(&env.topography, *cumu_height, exposure)?;
        let q_z = q_base * k_z * k_zt;
        let p_zw = q_z * gust * cp.c_pw + p_hi;
        levels.push(MwfrsLevel {
            level: index + 1,
            height: round_to(*height, 2),
            cumu_height: round_to(*cumu_height, 2),
            k_z: round_to(k_z, 2),
            k_zt: round_to(k_zt, 2),
            q_z: round_to(q_z, 2),
            p_zw: round_to(p_zw, 2),
        });
    }

    Ok(MwfrsPressures {
        summary: MwfrsSummary {
            b_height: round_to(b_height, 2),
            k_h: round_to(k_h, 2),
            k_ht: round_to(k_ht, 2),
            q_h: round_to(q_h, 2),
            p_hi: round_to(p_hi, 2),
            p_hl: round_to(p_hl, 2),
            p_hs: round_to(p_hs, 2),
            gust_factor: round_to(gust, 2),
            imp_factor: round_to(importance, 2),
            c_pw: cp.c_pw,
            c_pl: cp.c_pl,
            c_ps: cp.c_ps,
            wind_speed: round_to(wind_speed, 2),
        },
        levels,
    })
}

// =============================================================================
// COMPONENTS AND CLADDING
// =============================================================================

/// Wall C&C pressures at one effective area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallCladdingRow {
    pub level: usize,
    #[serde(rename = "A_eff")]
    pub a_eff: f64,
    pub height: f64,
    #[serde(rename = "K_z")]
    pub k_z: f64,
    #[serde(rename = "K_zt")]
    pub k_zt: f64,
    pub q_z: f64,
    #[serde(rename = "P_zi")]
    pub p_zi: f64,
    #[serde(rename = "P_z4_pos")]
    pub p_z4_pos: f64,
    #[serde(rename = "P_z4_neg")]
    pub p_z4_neg: f64,
    #[serde(rename = "P_z5_pos")]
    pub p_z5_pos: f64,
    #[serde(rename = "P_z5_neg")]
    pub p_z5_neg: f64,
}

/// Roof C&C pressures at one effective area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofCladdingRow {
    pub level: usize,
    #[serde(rename = "A_eff")]
    pub a_eff: f64,
    pub height: f64,
    #[serde(rename = "K_z")]
    pub k_z: f64,
    #[serde(rename = "K_zt")]
    pub k_zt: f64,
    pub q_z: f64,
    #[serde(rename = "P_zi")]
    pub p_zi: f64,
    #[serde(rename = "P_z1_neg")]
    pub p_z1_neg: f64,
    #[serde(rename = "P_z2_neg")]
    pub p_z2_neg: f64,
    #[serde(rename = "P_z3_neg")]
    pub p_z3_neg: f64,
}

/// C&C result, one wall row and one roof row per effective area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CladdingPressures {
    pub wall: Vec<WallCladdingRow>,
    pub roof: Vec<RoofCladdingRow>,
}

impl CladdingPressures {
    /// Wall row for an exact effective area
    pub fn wall_at(&self, area: f64) -> Option<&WallCladdingRow> {
        self.wall.iter().find(|row| row.a_eff == area)
    }

    /// Roof row for an exact effective area
    pub fn roof_at(&self, area: f64) -> Option<&RoofCladdingRow> {
        self.roof.iter().find(|row| row.a_eff == area)
    }
}

/// Compute C&C pressures at the top floor for [`CLADDING_AREAS`]
///
/// # Formula
/// - q_z = 0.000613·K_d·V²·I · K_z(C&C)·K_zt
/// - P_zi = q_z·GC_pi
/// - positive zones: q_z·GCp + P_zi; negative zones: q_z·GCp − P_zi
pub fn compute_cladding_pressures(env: &WindEnvironment) -> CalcResult<CladdingPressures> {
    let (floors, cumulative) = parse_floor_heights(&env.floor_heights)?;
    let level = floors.len();
    let height = cumulative.last().copied().unwrap_or_default();
    let k_d = WindEnvironment::require(env.k_d, "K_d")?;
    let gc_pi = WindEnvironment::require(env.gc_pi, "GC_pi")?;
    let wind_speed = resolve_wind_speed(env)?;
    let exposure = env.exposure_cat;

    let q_base = base_velocity_pressure(wind_speed, k_d, env.occupancy_cat);
    let k_z = velocity_pressure_coefficient(exposure, height, WindSystem::ComponentsAndCladding);
    let k_zt = topographic_factor(&env.topography, height, exposure)?;
    let q_z = q_base * k_z * k_zt;
    let p_zi = q_z * gc_pi;

    let mut wall = Vec::with_capacity(CLADDING_AREAS.len());
    let mut roof = Vec::with_capacity(CLADDING_AREAS.len());
    for area in CLADDING_AREAS {
        let w = wall_cladding_coefficients(area);
        let r = roof_cladding_coefficients(area);
        wall.push(WallCladdingRow {
            level,
            a_eff: area,
            height: round_to(height, 2),
            k_z: round_to(k_z, 2),
            k_zt: round_to(k_zt, 2),
            q_z: round_to(q_z, 2),
            p_zi: round_to(p_zi, 2),
            p_z4_pos: round_to(q_z * w.z4_pos + p_zi, 2),
            p_z4_neg: round_to(q_z * w.z4_neg - p_zi, 2),
            p_z5_pos: round_to(q_z * w.z5_pos + p_zi, 2),
            p_z5_neg: round_to(q_z * w.z5_neg - p_zi, 2),
        });
        roof.push(RoofCladdingRow {
            level,
            a_eff: area,
            height: round_to(height, 2),
            k_z: round_to(k_z, 2),
            k_zt: round_to(k_zt, 2),
            q_z: round_to(q_z, 2),
            p_zi: round_to(p_zi, 2),
            p_z1_neg: round_to(q_z * r.z1_neg - p_zi, 2),
            p_z2_neg: round_to(q_z * r.z2_neg - p_zi, 2),
            p_z3_neg: round_to(q_z * r.z3_neg - p_zi, 2),
        });
    }

    Ok(CladdingPressures { wall, roof })
}

/// Both wind results for a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindPressures {
    pub mwfrs: MwfrsPressures,
    pub cladding: CladdingPressures,
}

/// Run the MWFRS and C&C calculations for one environment
pub fn compute_wind_pressures(env: &WindEnvironment) -> CalcResult<WindPressures> {
    Ok(WindPressures {
        mwfrs: compute_mwfrs_pressures(env)?,
        cladding: compute_cladding_pressures(env)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_env() -> WindEnvironment {
        WindEnvironment {
            exposure_cat: ExposureCategory::B,
            b_length: Some(30.0),
            b_width: Some(20.0),
            wind_speed: Some(50.0),
            location: None,
            k_d: Some(0.85),
            gc_pi: Some(0.18),
            occupancy_cat: RiskCategory::II,
            topography: TopographyInput::default(),
            floor_heights: FloorHeights::Text("3.5 3.2 3.2".to_string()),
            b_freq: None,
            damping: None,
        }
    }

    #[test]
    fn test_parse_floor_heights_variants() {
        let (floors, cumu) = parse_floor_heights(&FloorHeights::List(vec![3.0, 0.0, -1.0, 4.0])).unwrap();
        assert_eq!(floors, vec![3.0, 4.0]);
        assert_eq!(cumu, vec![3.0, 7.0]);

        let err = parse_floor_heights(&FloorHeights::Text("3.5 abc".into())).unwrap_err();
        match err {
            CalcError::InvalidInput { value, .. } => assert_eq!(value, "abc"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_floor_heights(&FloorHeights::Text("   ".into())).is_err());
        assert!(parse_floor_heights(&FloorHeights::Text("0 -3".into())).is_err());
        assert!(parse_floor_heights(&FloorHeights::List(vec![])).is_err());
    }

    #[test]
    fn test_resolve_wind_speed_fallback() {
        let mut env = reference_env();
        assert_eq!(resolve_wind_speed(&env).unwrap(), 50.0);
        env.wind_speed = Some(0.0);
        env.location = Some(" Dhaka ".into());
        assert_eq!(resolve_wind_speed(&env).unwrap(), 65.7);
        env.location = Some("Nowhere".into());
        assert_eq!(resolve_wind_speed(&env).unwrap_err().error_code(), "LOCATION_NOT_FOUND");
        env.location = None;
        env.wind_speed = None;
        assert_eq!(resolve_wind_speed(&env).unwrap_err().error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_mwfrs_end_to_end() {
        let result = compute_mwfrs_pressures(&reference_env()).unwrap();
        assert_eq!(result.summary.b_height, 9.9);
        assert_eq!(result.summary.gust_factor, 0.85);
        assert_eq!(result.summary.k_ht, 1.0);
        assert_eq!(result.levels.len(), 3);

        let heights: Vec<f64> = result.levels.iter().map(|l| l.cumu_height).collect();
        assert_eq!(heights, vec![3.5, 6.7, 9.9]);
        for pair in result.levels.windows(2) {
            assert!(pair[1].cumu_height > pair[0].cumu_height);
            assert!(pair[1].p_zw > pair[0].p_zw, "{:?} then {:?}", pair[0], pair[1]);
        }
        assert_eq!(result.levels[0].level, 1);
        assert_eq!(result.levels[2].level, 3);
    }

    #[test]
    fn test_mwfrs_summary_values() {
        let s = compute_mwfrs_pressures(&reference_env()).unwrap().summary;
        // K_h at 9.9 m: 0.98 + (0.8/3.1)·0.06 = 0.99548
        // q_h = 0.000613·0.99548·0.85·2500 = 1.2967
        assert_eq!(s.k_h, 1.0);
        assert_eq!(s.q_h, 1.3);
        assert_eq!(s.c_pl, -0.5);
        assert_eq!(s.imp_factor, 1.0);
        assert!(s.p_hl < 0.0 && s.p_hs < s.p_hl);
    }

    #[test]
    fn test_mwfrs_flexible_building_gust_factor() {
        let env = WindEnvironment {
            b_freq: Some(0.8),
            damping: Some(0.02),
            ..reference_env()
        };
        let s = compute_mwfrs_pressures(&env).unwrap().summary;
        assert_eq!(s.gust_factor, 0.91);
        assert_eq!(s.q_h, 1.3);
        assert_eq!(s.p_hl, -0.82);
        assert_eq!(s.p_hs, -1.06);
    }

    #[test]
    fn test_mwfrs_escarpment_site() {
        let env: WindEnvironment = serde_json::from_str(
            r#"{
                "exposure_cat": "C", "b_length": 30, "b_width": 20,
                "wind_speed": 50, "K_d": 0.85, "GC_pi": 0.18,
                "occupancy_cat": "III",
                "topography_type": "Escarpment", "topo_height": "20",
                "topo_length": 100, "topo_distance": "50",
                "topo_crest_side": "Downwind",
                "floor_heights": "3.5 3.2 3.2 3.2 3.2 3.2 3.2 3.2",
                "b_freq": 0.8, "damping": 0.02
            }"#,
        )
        .unwrap();
        let result = compute_mwfrs_pressures(&env).unwrap();
        let s = &result.summary;
        assert_eq!(s.b_height, 25.9);
        assert_eq!(s.gust_factor, 0.87);
        assert_eq!(s.k_h, 1.39);
        assert_eq!(s.k_ht, 1.18);
        assert_eq!(s.q_h, 2.46);
        assert_eq!(s.p_hi, 0.44);
        assert_eq!(s.imp_factor, 1.15);

        let first = &result.levels[0];
        assert_eq!(first.k_z, 1.03);
        assert_eq!(first.k_zt, 1.33);
        assert_eq!(first.q_z, 2.05);
        assert_eq!(first.p_zw, 1.86);
        let top = &result.levels[7];
        assert_eq!(top.k_zt, 1.18);
        assert_eq!(top.p_zw, 2.15);
    }

    #[test]
    fn test_mwfrs_validation_errors() {
        let mut env = reference_env();
        env.floor_heights = FloorHeights::Text("".into());
        assert!(compute_mwfrs_pressures(&env).is_err());

        let mut env = reference_env();
        env.b_length = None;
        assert_eq!(compute_mwfrs_pressures(&env).unwrap_err(), CalcError::missing_field("b_length"));
    }

    #[test]
    fn test_cladding_top_level_only() {
        let result = compute_cladding_pressures(&reference_env()).unwrap();
        assert_eq!(result.wall.len(), CLADDING_AREAS.len());
        assert_eq!(result.roof.len(), CLADDING_AREAS.len());
        assert!(result.wall.iter().all(|row| row.level == 3 && row.height == 9.9));

        let small = result.wall_at(5.0).unwrap();
        let large = result.wall_at(46.5).unwrap();
        assert!(small.p_z5_neg < large.p_z5_neg, "suction decreases with area");
        assert!(small.p_z4_pos >= large.p_z4_pos);
        let roof = result.roof_at(10.0).unwrap();
        assert!(roof.p_z3_neg < roof.p_z2_neg && roof.p_z2_neg < roof.p_z1_neg);
    }

    #[test]
    fn test_environment_from_json_list_heights() {
        let env: WindEnvironment = serde_json::from_str(
            r#"{
                "exposure_cat": "C", "b_length": "40", "b_width": 25,
                "location": "Chittagong", "K_d": 0.85, "GC_pi": 0.18,
                "occupancy_cat": "III",
                "topography_type": "Homogeneous",
                "floor_heights": [4.0, 3.5, 3.5, 3.5],
                "b_freq": 1.2, "damping": 0.02
            }"#,
        )
        .unwrap();
        assert_eq!(env.b_length, Some(40.0));
        let pressures = compute_wind_pressures(&env).unwrap();
        assert_eq!(pressures.mwfrs.summary.wind_speed, 80.0);
        assert_eq!(pressures.mwfrs.summary.imp_factor, 1.15);
        assert_ne!(pressures.mwfrs.summary.gust_factor, RIGID_GUST_FACTOR);
        assert_eq!(pressures.mwfrs.levels.len(), 4);
    }

    #[test]
    fn test_unknown_exposure_rejected() {
        let json = r#"{"exposure_cat": "D", "floor_heights": "3"}"#;
        assert!(serde_json::from_str::<WindEnvironment>(json).is_err());
    }
}
