//! # Wind Pressure Coefficients
//!
//! Velocity pressure exposure coefficient K_z, topographic factor K_zt, gust
//! effect factor G, external pressure coefficients C_p for the MWFRS and the
//! area-dependent GCp envelopes for components and cladding.
//!
//! ## References
//!
//! - ASCE 7-05 Table 6-3 (K_z), Figure 6-4 (K_zt), Section 6.5.8 (G)
//! - ASCE 7-05 Figure 6-6 (C_p), Figures 6-11A/B/C (GCp)
//! - BNBC 2020 Part 6 Chapter 2 (same tables in SI units)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CalcError;
use crate::fields::lenient_f64;

// =============================================================================
// ENUMERATIONS
// =============================================================================

/// Terrain exposure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ExposureCategory {
    /// Large city centres
    A,
    /// Urban and suburban terrain
    B,
    /// Open terrain with scattered obstructions
    C,
}

impl FromStr for ExposureCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(ExposureCategory::A),
            "B" => Ok(ExposureCategory::B),
            "C" => Ok(ExposureCategory::C),
            other => Err(CalcError::invalid_input(
                "exposure_category",
                other,
                "Expected exposure category A, B or C",
            )),
        }
    }
}

impl TryFrom<String> for ExposureCategory {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for ExposureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ExposureCategory::A => "A",
            ExposureCategory::B => "B",
            ExposureCategory::C => "C",
        };
        write!(f, "{}", code)
    }
}

/// Wind-force resisting system the K_z table is read for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindSystem {
    /// Main wind-force resisting system
    #[serde(rename = "MWFRS")]
    Mwfrs,
    /// Components and cladding
    #[serde(rename = "C&C")]
    ComponentsAndCladding,
}

/// Risk (occupancy) category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskCategory {
    I,
    #[default]
    II,
    III,
    IV,
}

impl RiskCategory {
    /// Importance factor for wind loads
    ///
    /// | Category | I    |
    /// |----------|------|
    /// | I        | 0.77 |
    /// | II       | 1.00 |
    /// | III, IV  | 1.15 |
    pub fn importance_factor(&self) -> f64 {
        match self {
            RiskCategory::I => 0.77,
            RiskCategory::II => 1.0,
            RiskCategory::III | RiskCategory::IV => 1.15,
        }
    }
}

// =============================================================================
// VELOCITY PRESSURE
// =============================================================================

/// Heights (m) of the K_z table rows
const KZ_HEIGHTS: [f64; 22] = [
    4.6, 6.1, 7.6, 9.1, 12.2, 15.2, 18.0, 21.3, 24.4, 27.41, 30.5, 36.6, 42.7, 48.8, 54.9, 61.0,
    76.2, 91.4, 106.7, 121.9, 137.2, 152.4,
];

const KZ_A_CLADDING: [f64; 22] = [
    0.7, 0.7, 0.7, 0.7, 0.76, 0.81, 0.85, 0.89, 0.93, 0.96, 0.99, 1.04, 1.09, 1.13, 1.17, 1.2,
    1.28, 1.35, 1.41, 1.47, 1.52, 1.56,
];

const KZ_A_MWFRS: [f64; 22] = [
    0.57, 0.62, 0.66, 0.7, 0.76, 0.81, 0.85, 0.89, 0.93, 0.96, 0.99, 1.04, 1.09, 1.13, 1.17, 1.2,
    1.28, 1.35, 1.41, 1.47, 1.52, 1.56,
];

const KZ_B: [f64; 22] = [
    0.85, 0.9, 0.94, 0.98, 1.04, 1.09, 1.13, 1.17, 1.21, 1.24, 1.26, 1.31, 1.36, 1.39, 1.43, 1.46,
    1.53, 1.59, 1.64, 1.69, 1.73, 1.77,
];

const KZ_C: [f64; 22] = [
    1.03, 1.08, 1.12, 1.16, 1.22, 1.27, 1.31, 1.34, 1.38, 1.4, 1.43, 1.48, 1.52, 1.55, 1.58, 1.61,
    1.68, 1.73, 1.78, 1.82, 1.86, 1.89,
];

/// Piecewise-linear interpolation, clamped to the end values outside the table
fn interpolate_clamped(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    for i in 0..last {
        let (x0, x1) = (xs[i], xs[i + 1]);
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return ys[i] + t * (ys[i + 1] - ys[i]);
        }
    }
    ys[last]
}

/// Velocity pressure exposure coefficient K_z at height `z` (m)
///
/// Category A differs between the MWFRS and C&C columns below 9.1 m; B and
/// C share one column.
///
/// # Example
/// ```rust
/// use facade_core::wind::{velocity_pressure_coefficient, ExposureCategory, WindSystem};
///
/// let kz = velocity_pressure_coefficient(ExposureCategory::B, 9.1, WindSystem::Mwfrs);
/// assert!((kz - 0.98).abs() < 1e-12);
/// ```
pub fn velocity_pressure_coefficient(exposure: ExposureCategory, z: f64, system: WindSystem) -> f64 {
    let column: &[f64; 22] = match (exposure, system) {
        (ExposureCategory::A, WindSystem::Mwfrs) => &KZ_A_MWFRS,
        (ExposureCategory::A, WindSystem::ComponentsAndCladding) => &KZ_A_CLADDING,
        (ExposureCategory::B, _) => &KZ_B,
        (ExposureCategory::C, _) => &KZ_C,
    };
    interpolate_clamped(z, &KZ_HEIGHTS, column)
}

/// Base velocity pressure without K_z and K_zt (kPa)
///
/// # Formula
/// q = 0.000613·K_d·V²·I
pub fn base_velocity_pressure(wind_speed: f64, k_d: f64, risk: RiskCategory) -> f64 {
    0.000613 * k_d * wind_speed.powi(2) * risk.importance_factor()
}

// =============================================================================
// TOPOGRAPHIC FACTOR
// =============================================================================

/// Landform type for the topographic factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Topography {
    /// Flat, uninterrupted terrain (K_zt = 1)
    #[default]
    Homogeneous,
    /// 2-D ridge
    Ridge,
    /// 2-D escarpment
    Escarpment,
    /// 3-D axisymmetric hill
    Hill,
}

impl FromStr for Topography {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Homogeneous" => Ok(Topography::Homogeneous),
            "Ridge" => Ok(Topography::Ridge),
            "Escarpment" => Ok(Topography::Escarpment),
            "Hill" => Ok(Topography::Hill),
            other => Err(CalcError::invalid_input(
                "topography_type",
                other,
                "Expected Homogeneous, Ridge, Escarpment or Hill",
            )),
        }
    }
}

impl TryFrom<String> for Topography {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Building position relative to the crest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CrestSide {
    #[default]
    Upwind,
    Downwind,
}

impl FromStr for CrestSide {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Upwind" => Ok(CrestSide::Upwind),
            "Downwind" => Ok(CrestSide::Downwind),
            other => Err(CalcError::invalid_input(
                "topo_crest_side",
                other,
                "Expected Upwind or Downwind",
            )),
        }
    }
}

impl TryFrom<String> for CrestSide {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Topography {
    /// K1 multiplier per unit H/L_h
    fn k1_base(&self, exposure: ExposureCategory) -> f64 {
        use ExposureCategory::*;
        match (self, exposure) {
            (Topography::Homogeneous, _) => 0.0,
            (Topography::Ridge, A) => 1.30,
            (Topography::Ridge, B) => 1.45,
            (Topography::Ridge, C) => 1.55,
            (Topography::Escarpment, A) => 0.75,
            (Topography::Escarpment, B) => 0.85,
            (Topography::Escarpment, C) => 0.95,
            (Topography::Hill, A) => 0.95,
            (Topography::Hill, B) => 1.05,
            (Topography::Hill, C) => 1.15,
        }
    }

    /// Height attenuation factor γ
    fn gamma(&self) -> f64 {
        match self {
            Topography::Homogeneous => 0.0,
            Topography::Ridge => 3.0,
            Topography::Escarpment => 2.5,
            Topography::Hill => 4.0,
        }
    }

    /// Horizontal attenuation factor μ
    fn mu(&self, side: CrestSide) -> f64 {
        match (self, side) {
            (Topography::Escarpment, CrestSide::Downwind) => 4.0,
            _ => 1.5,
        }
    }
}

/// Topographic descriptor of the site
///
/// Missing or non-numeric dimensions count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TopographyInput {
    #[serde(default)]
    pub topography_type: Topography,
    /// Crest height H (m)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub topo_height: Option<f64>,
    /// Horizontal distance L_h upwind of the crest to half height (m)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub topo_length: Option<f64>,
    /// Distance x from the crest to the building (m)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub topo_distance: Option<f64>,
    #[serde(default)]
    pub topo_crest_side: CrestSide,
}

/// Topographic factor K_zt at height `z` (m)
///
/// # Formula
/// - K1 = K1_base · H/L_h
/// - K2 = max(0, 1 − |x|/(μ·L_h))
/// - K3 = e^(−γ·z/L_h)
/// - K_zt = (1 + K1·K2·K3)², rounded to 3 decimals
///
/// Homogeneous terrain returns exactly 1.0.
///
/// # Errors
/// `InvalidInput` when a landform other than homogeneous has a non-positive
/// horizontal length.
pub fn topographic_factor(
    topo: &TopographyInput,
    z: f64,
    exposure: ExposureCategory,
) -> Result<f64, CalcError> {
    let landform = topo.topography_type;
    if landform == Topography::Homogeneous {
        return Ok(1.0);
    }
    let height = topo.topo_height.unwrap_or(0.0);
    let length = topo.topo_length.unwrap_or(0.0);
    let distance = topo.topo_distance.unwrap_or(0.0);
    if length <= 0.0 {
        return Err(CalcError::invalid_input(
            "topo_length",
            length.to_string(),
            "Landform horizontal length must be positive",
        ));
    }

    let k1 = landform.k1_base(exposure) * (height / length);
    let mu = landform.mu(topo.topo_crest_side);
    let k2 = (1.0 - distance.abs() / (mu * length)).max(0.0);
    let k3 = (-landform.gamma() * z / length).exp();

    let kzt = (1.0 + k1 * k2 * k3).powi(2);
    Ok(crate::units::round_to(kzt, 3))
}

// =============================================================================
// GUST EFFECT FACTOR
// =============================================================================

/// Gust factor used for rigid buildings (no dynamic properties supplied)
pub const RIGID_GUST_FACTOR: f64 = 0.85;

/// Terrain constants (α̂, b̂, c) for the gust model
fn gust_terrain_constants(exposure: ExposureCategory) -> (f64, f64, f64) {
    match exposure {
        ExposureCategory::A => (0.25, 0.45, 0.30),
        ExposureCategory::B => (0.20, 0.35, 0.25),
        ExposureCategory::C => (0.15, 0.25, 0.20),
    }
}

/// Resonant response reduction R_η = 1/η − (1 − e^(−2η))/(2η²)
fn resonant_reduction(eta: f64) -> f64 {
    1.0 / eta - (1.0 - (-2.0 * eta).exp()) / (2.0 * eta * eta)
}

/// Gust effect factor G_f for flexible buildings
///
/// # Arguments
/// * `height` - Mean roof height h (m)
/// * `length` - Building length L parallel to the wind (m)
/// * `width` - Building width B normal to the wind (m)
/// * `wind_speed` - Basic wind speed V (m/s)
/// * `frequency` - Fundamental natural frequency n₁ (Hz)
/// * `damping` - Damping ratio β
///
/// # Formula
/// ```text
/// z̄   = max(0.6h, z_min)
/// I_z = c·(10/z̄)^(1/6)          L_z = ℓ·(z̄/10)^ε̄
/// Q   = √(1 / (1 + 0.63·((B + h)/L_z)^0.63))
/// g_R = √(2 ln(3600 n₁)) + 0.577/√(2 ln(3600 n₁))
/// V_z = b̂·(z̄/10)^α̂·V           N₁ = n₁·L_z/V_z
/// R_n = 7.47 N₁ / (1 + 10.3 N₁)^(5/3)
/// R   = √((1/β)·R_n·R_h·R_B·(0.53 + 0.47 R_L))
/// G_f = 0.925·(1 + 1.7 I_z √(g_Q²Q² + g_R²R²)) / (1 + 1.7 g_v I_z)
/// ```
///
/// The resonant peak factor g_R needs 3600·n₁ > 1; slower buildings get
/// [`RIGID_GUST_FACTOR`].
pub fn gust_effect_factor(
    height: f64,
    length: f64,
    width: f64,
    wind_speed: f64,
    frequency: f64,
    damping: f64,
    exposure: ExposureCategory,
) -> f64 {
    let (alpha, b_hat, c) = gust_terrain_constants(exposure);

    const EPSILON_BAR: f64 = 0.333;
    const Z_MIN: f64 = 9.14;
    const G_Q: f64 = 3.4;
    const G_V: f64 = 3.4;
    const ELL: f64 = 97.54;

    let z = (0.6 * height).max(Z_MIN);
    let i_z = c * (10.0 / z).powf(1.0 / 6.0);
    let l_z = ELL * (z / 10.0).powf(EPSILON_BAR);

    let q = (1.0 / (1.0 + 0.63 * ((width + height) / l_z).powf(0.63))).sqrt();
    let log_term = 2.0 * (3600.0 * frequency).ln();
    if log_term.is_nan() || log_term <= 0.0 {
        return RIGID_GUST_FACTOR;
    }
    let g_r = log_term.sqrt() + 0.577 / log_term.sqrt();

    let v_z = b_hat * (z / 10.0).powf(alpha) * wind_speed;
    let n1 = frequency * l_z / v_z;
    let r_n = 7.47 * n1 / (1.0 + 10.3 * n1).powf(5.0 / 3.0);

    let r_h = resonant_reduction(4.6 * frequency * height / v_z);
    let r_b = resonant_reduction(4.6 * frequency * width / v_z);
    let r_l = resonant_reduction(15.4 * frequency * length / v_z);

    let r = ((1.0 / damping) * r_n * r_h * r_b * (0.53 + 0.47 * r_l)).sqrt();

    let peak = ((G_Q * q).powi(2) + (g_r * r).powi(2)).sqrt();
    0.925 * (1.0 + 1.7 * i_z * peak) / (1.0 + 1.7 * G_V * i_z)
}

// =============================================================================
// EXTERNAL PRESSURE COEFFICIENTS (MWFRS)
// =============================================================================

/// Wall pressure coefficients C_p
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPressureCoefficients {
    /// Windward wall
    pub c_pw: f64,
    /// Leeward wall
    pub c_pl: f64,
    /// Side walls
    pub c_ps: f64,
}

/// Wall C_p values from the plan aspect ratio B/L
///
/// | B/L      | Leeward C_p |
/// |----------|-------------|
/// | ≤ 1      | −0.5        |
/// | (1, 4)   | −0.3        |
/// | ≥ 4      | −0.2        |
///
/// Windward is 0.8 and side walls −0.7 throughout.
pub fn external_pressure_coefficients(length: f64, width: f64) -> ExternalPressureCoefficients {
    let ratio = width / length;
    let c_pl = if ratio <= 1.0 {
        -0.5
    } else if ratio < 4.0 {
        -0.3
    } else {
        -0.2
    };
    ExternalPressureCoefficients {
        c_pw: 0.8,
        c_pl,
        c_ps: -0.7,
    }
}

// =============================================================================
// COMPONENTS AND CLADDING GCp
// =============================================================================

/// Upper effective-area bound (m²) for every C&C curve
const GCP_AREA_MAX: f64 = 46.5;

/// Lower effective-area bound (m²) for wall zones 4/5
const GCP_WALL_AREA_MIN: f64 = 1.9;

/// Lower effective-area bound (m²) for roof zones 1/2/3
const GCP_ROOF_AREA_MIN: f64 = 0.9;

/// Log-linear interpolation between `small_area_value` (at `area_min`) and
/// `large_area_value` (at 46.5 m²), clamped outside the bounds
fn log_interpolate(area: f64, area_min: f64, small_area_value: f64, large_area_value: f64) -> f64 {
    if area <= area_min {
        small_area_value
    } else if area >= GCP_AREA_MAX {
        large_area_value
    } else {
        large_area_value
            + (small_area_value - large_area_value) * (GCP_AREA_MAX.ln() - area.ln())
                / (GCP_AREA_MAX.ln() - area_min.ln())
    }
}

/// Wall GCp for zones 4 (field) and 5 (corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallCladdingCoefficients {
    pub z4_pos: f64,
    pub z4_neg: f64,
    pub z5_pos: f64,
    pub z5_neg: f64,
}

/// Roof GCp for zones 1 (field), 2 (edge) and 3 (corner), suction only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofCladdingCoefficients {
    pub z1_neg: f64,
    pub z2_neg: f64,
    pub z3_neg: f64,
}

/// Wall GCp envelope at effective area `area` (m²)
pub fn wall_cladding_coefficients(area: f64) -> WallCladdingCoefficients {
    let positive = log_interpolate(area, GCP_WALL_AREA_MIN, 0.9, 0.6);
    WallCladdingCoefficients {
        z4_pos: positive,
        z4_neg: -log_interpolate(area, GCP_WALL_AREA_MIN, 0.9, 0.7),
        z5_pos: positive,
        z5_neg: -log_interpolate(area, GCP_WALL_AREA_MIN, 1.8, 1.0),
    }
}

/// Roof GCp envelope at effective area `area` (m²)
pub fn roof_cladding_coefficients(area: f64) -> RoofCladdingCoefficients {
    RoofCladdingCoefficients {
        z1_neg: -log_interpolate(area, GCP_ROOF_AREA_MIN, 1.4, 0.9),
        z2_neg: -log_interpolate(area, GCP_ROOF_AREA_MIN, 2.3, 1.6),
        z3_neg: -log_interpolate(area, GCP_ROOF_AREA_MIN, 3.2, 2.3),
    }
}

/// Envelope surface for C&C coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CladdingSurface {
    Wall,
    Roof,
}

/// GCp envelope for either surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CladdingCoefficients {
    Wall(WallCladdingCoefficients),
    Roof(RoofCladdingCoefficients),
}

/// GCp envelope for `surface` at effective area `area` (m²)
pub fn cladding_pressure_coefficients(area: f64, surface: CladdingSurface) -> CladdingCoefficients {
    match surface {
        CladdingSurface::Wall => CladdingCoefficients::Wall(wall_cladding_coefficients(area)),
        CladdingSurface::Roof => CladdingCoefficients::Roof(roof_cladding_coefficients(area)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_kz_table_points_and_clamping() {
        use ExposureCategory::*;
        assert!(approx_eq(velocity_pressure_coefficient(A, 4.6, WindSystem::Mwfrs), 0.57));
        assert!(approx_eq(
            velocity_pressure_coefficient(A, 4.6, WindSystem::ComponentsAndCladding),
            0.7
        ));
        assert!(approx_eq(velocity_pressure_coefficient(B, 2.0, WindSystem::Mwfrs), 0.85));
        assert!(approx_eq(velocity_pressure_coefficient(C, 500.0, WindSystem::Mwfrs), 1.89));
        // Midway between 9.1 (0.98) and 12.2 (1.04)
        let kz = velocity_pressure_coefficient(B, 10.65, WindSystem::Mwfrs);
        assert!((kz - 1.01).abs() < 1e-9, "K_z = {}", kz);
    }

    #[test]
    fn test_kz_monotonic_in_height() {
        for exposure in [ExposureCategory::A, ExposureCategory::B, ExposureCategory::C] {
            for system in [WindSystem::Mwfrs, WindSystem::ComponentsAndCladding] {
                let mut previous = 0.0;
                let mut z = 0.0;
                while z <= 160.0 {
                    let kz = velocity_pressure_coefficient(exposure, z, system);
                    assert!(kz >= previous, "{:?}/{:?}: K_z({}) = {} < {}", exposure, system, z, kz, previous);
                    previous = kz;
                    z += 0.25;
                }
            }
        }
    }

    #[test]
    fn test_topographic_factor_homogeneous_is_one() {
        let topo = TopographyInput {
            topography_type: Topography::Homogeneous,
            topo_height: Some(80.0),
            topo_length: None,
            topo_distance: Some(-5.0),
            topo_crest_side: CrestSide::Downwind,
        };
        for z in [0.0, 3.0, 45.0] {
            assert_eq!(topographic_factor(&topo, z, ExposureCategory::C).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_topographic_factor_ridge() {
        let topo = TopographyInput {
            topography_type: Topography::Ridge,
            topo_height: Some(20.0),
            topo_length: Some(100.0),
            topo_distance: Some(0.0),
            topo_crest_side: CrestSide::Upwind,
        };
        // K1 = 1.45·0.2 = 0.29, K2 = 1, K3 = e^(−3·10/100) = 0.7408
        let expected = (1.0_f64 + 0.29 * (-0.3_f64).exp()).powi(2);
        let kzt = topographic_factor(&topo, 10.0, ExposureCategory::B).unwrap();
        assert!((kzt - expected).abs() < 0.0005, "K_zt = {} (expected {})", kzt, expected);
    }

    #[test]
    fn test_topographic_factor_far_from_crest() {
        let topo = TopographyInput {
            topography_type: Topography::Escarpment,
            topo_height: Some(20.0),
            topo_length: Some(100.0),
            topo_distance: Some(1000.0),
            topo_crest_side: CrestSide::Downwind,
        };
        assert_eq!(topographic_factor(&topo, 10.0, ExposureCategory::B).unwrap(), 1.0);
    }

    #[test]
    fn test_topographic_factor_rejects_zero_length() {
        let topo = TopographyInput {
            topography_type: Topography::Hill,
            ..Default::default()
        };
        let err = topographic_factor(&topo, 10.0, ExposureCategory::B).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_topography_from_numeric_strings() {
        let topo: TopographyInput = serde_json::from_str(
            r#"{"topography_type": "Hill", "topo_height": "20", "topo_length": " 100 ",
                "topo_distance": "n/a", "topo_crest_side": "Upwind"}"#,
        )
        .unwrap();
        assert_eq!(topo.topo_height, Some(20.0));
        assert_eq!(topo.topo_length, Some(100.0));
        assert_eq!(topo.topo_distance, None);

        // K1 = 1.05·0.2, K2 = 1 (x counts as zero), K3 = e^(−4·10/100)
        let expected = (1.0_f64 + 0.21 * (-0.4_f64).exp()).powi(2);
        let kzt = topographic_factor(&topo, 10.0, ExposureCategory::B).unwrap();
        assert!((kzt - expected).abs() < 0.0005, "K_zt = {} (expected {})", kzt, expected);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("b".parse::<ExposureCategory>().unwrap(), ExposureCategory::B);
        assert!("D".parse::<ExposureCategory>().is_err());
        assert!("Valley".parse::<Topography>().is_err());
        let err = serde_json::from_str::<Topography>("\"Plateau\"").unwrap_err();
        assert!(err.to_string().contains("topography_type"));
    }

    #[test]
    fn test_gust_factor_reasonable() {
        let g = gust_effect_factor(60.0, 30.0, 20.0, 50.0, 0.8, 0.02, ExposureCategory::B);
        assert!(g > 0.75 && g < 1.2, "G_f = {}", g);
    }

    #[test]
    fn test_gust_factor_values() {
        // h = 9.9 m, z̄ = z_min: G_f = 0.9065
        let g = gust_effect_factor(9.9, 30.0, 20.0, 50.0, 0.8, 0.02, ExposureCategory::B);
        assert!((g - 0.906506).abs() < 1e-5, "G_f = {}", g);
        let g = gust_effect_factor(25.9, 30.0, 20.0, 50.0, 0.8, 0.02, ExposureCategory::C);
        assert!((g - 0.867180).abs() < 1e-5, "G_f = {}", g);
    }

    #[test]
    fn test_gust_factor_very_low_frequency_is_rigid() {
        for n in [1.0 / 3600.0, 1.0e-4] {
            let g = gust_effect_factor(9.9, 30.0, 20.0, 50.0, n, 0.02, ExposureCategory::B);
            assert_eq!(g, RIGID_GUST_FACTOR);
        }
        let g = gust_effect_factor(9.9, 30.0, 20.0, 50.0, 0.01, 0.02, ExposureCategory::B);
        assert!(g.is_finite());
    }

    #[test]
    fn test_external_pressure_bands() {
        assert!(approx_eq(external_pressure_coefficients(30.0, 20.0).c_pl, -0.5));
        assert!(approx_eq(external_pressure_coefficients(30.0, 30.0).c_pl, -0.5));
        assert!(approx_eq(external_pressure_coefficients(10.0, 30.0).c_pl, -0.3));
        assert!(approx_eq(external_pressure_coefficients(10.0, 40.0).c_pl, -0.2));
        let cp = external_pressure_coefficients(30.0, 20.0);
        assert!(approx_eq(cp.c_pw, 0.8));
        assert!(approx_eq(cp.c_ps, -0.7));
    }

    #[test]
    fn test_wall_gcp_bounds() {
        let small = wall_cladding_coefficients(1.0);
        assert!(approx_eq(small.z4_pos, 0.9));
        assert!(approx_eq(small.z4_neg, -0.9));
        assert!(approx_eq(small.z5_neg, -1.8));
        let large = wall_cladding_coefficients(100.0);
        assert!(approx_eq(large.z5_pos, 0.6));
        assert!(approx_eq(large.z4_neg, -0.7));
        assert!(approx_eq(large.z5_neg, -1.0));
        let mid = wall_cladding_coefficients(10.0);
        assert!(mid.z5_neg < mid.z4_neg && mid.z4_neg < 0.0);
        assert!(mid.z4_pos > 0.6 && mid.z4_pos < 0.9);
    }

    #[test]
    fn test_roof_gcp_bounds() {
        let small = roof_cladding_coefficients(0.5);
        assert!(approx_eq(small.z1_neg, -1.4));
        assert!(approx_eq(small.z3_neg, -3.2));
        let large = roof_cladding_coefficients(46.5);
        assert!(approx_eq(large.z2_neg, -1.6));
        match cladding_pressure_coefficients(46.5, CladdingSurface::Roof) {
            CladdingCoefficients::Roof(r) => assert!(approx_eq(r.z3_neg, -2.3)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_importance_and_base_pressure() {
        assert!(approx_eq(RiskCategory::I.importance_factor(), 0.77));
        assert!(approx_eq(RiskCategory::IV.importance_factor(), 1.15));
        let q = base_velocity_pressure(50.0, 0.85, RiskCategory::II);
        assert!((q - 1.302625).abs() < 1e-9);
    }
}
