//! # Glass Unit Check
//!
//! Load resistance and deflection of edge-supported glass panels under
//! wind, following the ASTM E1300 approach: a non-factored load (NFL)
//! read from the charts for the ply thickness and aspect ratio is scaled by
//! a glass type factor (GTF) and, for insulated units, by the load share
//! of each lite.
//!
//! ## Branches
//!
//! | Tag | Unit | Allowable deflection |
//! |-----|------|----------------------|
//! | `sgu` | Single glazed (monolithic) | W/60 |
//! | `lgu` | Laminated | W/60 |
//! | `dgu` | Insulated double glazed | W/90 |
//! | `ldgu` | Insulated with laminated outer lite | W/90 |
//!
//! Panels spanning 5000 mm or more, and point-fixed panels, are outside the
//! closed-form method and are reported as deferred to finite element
//! analysis.
//!
//! ## Structural silicone
//!
//! Every closed-form result also sizes the structural silicone joint:
//! bite = q·W/(2·140) rounded up to 0.5 mm, glue line thickness = bite/3
//! (min. 6 mm).
//!
//! ## Example
//!
//! ```rust
//! use facade_core::calculations::glazing::{calculate, GlassUnitInput, GlazingResult};
//!
//! let unit: GlassUnitInput = serde_json::from_str(r#"{
//!     "glass_type": "sgu", "grade": "FT",
//!     "length": 2000, "width": 1000, "wind_load": 2.0,
//!     "nfl": 1.0, "def": 5.0
//! }"#).unwrap();
//!
//! match calculate(&unit).unwrap() {
//!     GlazingResult::Sgu(r) => assert_eq!(r.check.stress_ratio, 0.5),
//!     other => panic!("unexpected branch {:?}", other),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CalcError;
use crate::fields::{lenient_f64, nonzero};
use crate::units::{ceil_to_increment, mm2_to_m2, round_to};

/// Spans at or above this length (mm) need finite element analysis
pub const MAX_CLOSED_FORM_SPAN: f64 = 5000.0;

/// Design strength of structural silicone (kPa), applied on both sides
const SILICONE_DESIGN_STRENGTH: f64 = 140.0;

/// Minimum glue line thickness (mm)
const MIN_GLUE_THICKNESS: f64 = 6.0;

// =============================================================================
// INPUT TAGS
// =============================================================================

/// Glass unit make-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum GlassType {
    /// Single glazed unit
    Sgu,
    /// Double glazed (insulated) unit
    Dgu,
    /// Laminated glass unit
    Lgu,
    /// Laminated double glazed unit
    Ldgu,
}

impl FromStr for GlassType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sgu" => Ok(GlassType::Sgu),
            "dgu" => Ok(GlassType::Dgu),
            "lgu" => Ok(GlassType::Lgu),
            "ldgu" => Ok(GlassType::Ldgu),
            other => Err(CalcError::invalid_input(
                "glass_type",
                other,
                "Expected sgu, dgu, lgu or ldgu",
            )),
        }
    }
}

impl TryFrom<String> for GlassType {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Panel support condition; anything but `"Point Fixed"` is edge supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SupportType {
    #[default]
    EdgeSupported,
    PointFixed,
}

impl From<String> for SupportType {
    fn from(value: String) -> Self {
        if value == "Point Fixed" {
            SupportType::PointFixed
        } else {
            SupportType::EdgeSupported
        }
    }
}

impl From<SupportType> for String {
    fn from(value: SupportType) -> Self {
        match value {
            SupportType::EdgeSupported => "Edge Supported".to_string(),
            SupportType::PointFixed => "Point Fixed".to_string(),
        }
    }
}

/// Heat treatment of a lite
///
/// Unrecognised or missing grades are `Unrated` and use a factor of 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GlassGrade {
    /// Annealed
    Annealed,
    /// Heat strengthened
    HeatStrengthened,
    /// Fully tempered
    FullyTempered,
    #[default]
    Unrated,
}

impl From<String> for GlassGrade {
    fn from(value: String) -> Self {
        match value.as_str() {
            "AN" => GlassGrade::Annealed,
            "HS" => GlassGrade::HeatStrengthened,
            "FT" => GlassGrade::FullyTempered,
            _ => GlassGrade::Unrated,
        }
    }
}

impl From<GlassGrade> for String {
    fn from(value: GlassGrade) -> Self {
        let code = match value {
            GlassGrade::Annealed => "AN",
            GlassGrade::HeatStrengthened => "HS",
            GlassGrade::FullyTempered => "FT",
            GlassGrade::Unrated => "Unrated",
        };
        code.to_string()
    }
}

impl GlassGrade {
    /// Glass type factor of a single lite under short duration load
    pub fn single_lite_factor(&self) -> f64 {
        match self {
            GlassGrade::FullyTempered => 4.0,
            GlassGrade::HeatStrengthened => 2.0,
            GlassGrade::Annealed | GlassGrade::Unrated => 1.0,
        }
    }

    fn table_index(&self) -> Option<usize> {
        match self {
            GlassGrade::Annealed => Some(0),
            GlassGrade::HeatStrengthened => Some(1),
            GlassGrade::FullyTempered => Some(2),
            GlassGrade::Unrated => None,
        }
    }
}

/// Glass type factors of an insulated unit, indexed [outer][inner]
/// (E1300 Table 3, short duration)
const INSULATED_GTF: [[(f64, f64); 3]; 3] = [
    [(0.9, 0.9), (1.0, 1.9), (1.0, 3.8)],
    [(1.9, 1.0), (1.8, 1.8), (1.9, 3.8)],
    [(3.8, 1.0), (3.8, 1.9), (3.6, 3.6)],
];

/// Glass type factors (lite 1, lite 2) of an insulated unit
///
/// ```rust
/// use facade_core::calculations::glazing::{insulated_gtf, GlassGrade};
///
/// assert_eq!(insulated_gtf(GlassGrade::HeatStrengthened, GlassGrade::FullyTempered), (1.9, 3.8));
/// assert_eq!(insulated_gtf(GlassGrade::Unrated, GlassGrade::Annealed), (1.0, 1.0));
/// ```
pub fn insulated_gtf(grade1: GlassGrade, grade2: GlassGrade) -> (f64, f64) {
    match (grade1.table_index(), grade2.table_index()) {
        (Some(i), Some(j)) => INSULATED_GTF[i][j],
        _ => (1.0, 1.0),
    }
}

// =============================================================================
// INPUT
// =============================================================================

/// Glass unit record
///
/// Single-lite units (`sgu`, `lgu`) use `grade`, `nfl` and `def`; insulated
/// units use the numbered fields. For `ldgu` the outer laminated lite is
/// `thickness1_1 + thickness1_2`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlassUnitInput {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub glass_type: Option<GlassType>,
    /// Span (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub length: Option<f64>,
    /// Width (mm)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub width: Option<f64>,
    /// Design wind pressure (kPa)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wind_load: Option<f64>,
    #[serde(default)]
    pub support_type: SupportType,
    #[serde(default)]
    pub grade: GlassGrade,
    #[serde(default)]
    pub grade1: GlassGrade,
    #[serde(default)]
    pub grade2: GlassGrade,
    /// Non-factored load (kPa)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub nfl: Option<f64>,
    /// Centre deflection from the E1300 charts (mm)
    #[serde(rename = "def", default, deserialize_with = "lenient_f64")]
    pub deflection: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub thickness1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub thickness1_1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub thickness1_2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub thickness2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub nfl1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub nfl2: Option<f64>,
    #[serde(rename = "def1", default, deserialize_with = "lenient_f64")]
    pub deflection1: Option<f64>,
    #[serde(rename = "def2", default, deserialize_with = "lenient_f64")]
    pub deflection2: Option<f64>,
}

// =============================================================================
// RESULTS
// =============================================================================

/// Values reported for every closed-form branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSummary {
    /// Effective wind area (m²)
    #[serde(rename = "A_eff")]
    pub a_eff: f64,
    pub aspect_ratio: f64,
    /// Required structural silicone bite (mm)
    pub bite_req: f64,
    pub bite_pro: f64,
    /// Required glue line thickness (mm)
    pub glue_req: f64,
    pub glue_pro: f64,
}

/// Strength and deflection check of a single-lite unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleLiteCheck {
    pub gtf: f64,
    pub stress_ratio: f64,
    pub def_ratio: f64,
    pub allow_def: f64,
    pub deflection: f64,
}

/// Strength and deflection check of an insulated unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsulatedCheck {
    pub gtf1: f64,
    pub gtf2: f64,
    pub stress_ratio: f64,
    pub def_ratio: f64,
    pub allow_def: f64,
    pub deflection1: f64,
    pub deflection2: f64,
    pub deflection: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SguResult {
    #[serde(flatten)]
    pub panel: PanelSummary,
    pub sgu_lr: f64,
    #[serde(flatten)]
    pub check: SingleLiteCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LguResult {
    #[serde(flatten)]
    pub panel: PanelSummary,
    pub lgu_lr: f64,
    #[serde(flatten)]
    pub check: SingleLiteCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DguResult {
    #[serde(flatten)]
    pub panel: PanelSummary,
    pub dgu_ls1: f64,
    pub dgu_ls2: f64,
    pub dgu_lr1: f64,
    pub dgu_lr2: f64,
    pub dgu_lr: f64,
    #[serde(flatten)]
    pub check: InsulatedCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdguResult {
    #[serde(flatten)]
    pub panel: PanelSummary,
    pub ldgu_ls1: f64,
    pub ldgu_ls2: f64,
    pub ldgu_lr1: f64,
    pub ldgu_lr2: f64,
    pub ldgu_lr: f64,
    #[serde(flatten)]
    pub check: InsulatedCheck,
}

/// Outcome of a glass unit check, tagged by `branch`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "branch", rename_all = "lowercase")]
pub enum GlazingResult {
    Sgu(SguResult),
    Dgu(DguResult),
    Lgu(LguResult),
    Ldgu(LdguResult),
    /// Deferred to finite element analysis
    Rfem { note: String },
}

impl GlazingResult {
    /// Governing utilisation (max of stress and deflection ratios)
    pub fn governing_ratio(&self) -> Option<f64> {
        match self {
            GlazingResult::Sgu(r) => Some(r.check.stress_ratio.max(r.check.def_ratio)),
            GlazingResult::Lgu(r) => Some(r.check.stress_ratio.max(r.check.def_ratio)),
            GlazingResult::Dgu(r) => Some(r.check.stress_ratio.max(r.check.def_ratio)),
            GlazingResult::Ldgu(r) => Some(r.check.stress_ratio.max(r.check.def_ratio)),
            GlazingResult::Rfem { .. } => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, GlazingResult::Rfem { .. })
    }
}

// =============================================================================
// CALCULATION
// =============================================================================

fn panel_summary(length: f64, width: f64, wind_load: f64) -> PanelSummary {
    let a_eff = mm2_to_m2((length * width).max(length * length / 3.0));
    let bite_req = wind_load * width / (2.0 * SILICONE_DESIGN_STRENGTH);
    let glue_req = bite_req / 3.0;
    PanelSummary {
        a_eff: round_to(a_eff, 2),
        aspect_ratio: round_to(length / width, 2),
        bite_req: round_to(bite_req, 1),
        bite_pro: round_to(ceil_to_increment(bite_req, 0.5), 1),
        glue_req: round_to(glue_req, 1),
        glue_pro: round_to(MIN_GLUE_THICKNESS.max(ceil_to_increment(glue_req, 0.5)), 1),
    }
}

fn single_lite(input: &GlassUnitInput, width: f64, wind_load: f64) -> Option<(f64, SingleLiteCheck)> {
    let nfl = nonzero(input.nfl)?;
    let deflection = nonzero(input.deflection)?;
    let gtf = input.grade.single_lite_factor();
    let lr = nfl * gtf;
    let allow_def = width / 60.0;
    Some((
        round_to(lr, 2),
        SingleLiteCheck {
            gtf,
            stress_ratio: round_to(wind_load / lr, 2),
            def_ratio: round_to(deflection / allow_def, 2),
            allow_def: round_to(allow_def, 2),
            deflection: round_to(deflection, 2),
        },
    ))
}

/// Load share and resistance of the two lites of an insulated unit
struct LoadShare {
    ls1: f64,
    ls2: f64,
    lr1: f64,
    lr2: f64,
    lr: f64,
}

fn insulated(
    input: &GlassUnitInput,
    t1: f64,
    width: f64,
    wind_load: f64,
    ratio_decimals: i32,
) -> Option<(LoadShare, InsulatedCheck)> {
    let t2 = input.thickness2?;
    let nfl1 = input.nfl1?;
    let nfl2 = input.nfl2?;
    let def1 = input.deflection1?;
    let def2 = input.deflection2?;
    if t1 <= 0.0 || t2 <= 0.0 {
        return None;
    }

    let stiffness = t1.powi(3) + t2.powi(3);
    let ls1 = stiffness / t1.powi(3);
    let ls2 = stiffness / t2.powi(3);
    let (gtf1, gtf2) = insulated_gtf(input.grade1, input.grade2);
    let lr1 = nfl1 * gtf1 * ls1;
    let lr2 = nfl2 * gtf2 * ls2;
    let lr = lr1.min(lr2);
    if lr == 0.0 {
        return None;
    }
    let deflection = def1.max(def2);
    let allow_def = width / 90.0;

    Some((
        LoadShare {
            ls1: round_to(ls1, 2),
            ls2: round_to(ls2, 2),
            lr1: round_to(lr1, 2),
            lr2: round_to(lr2, 2),
            lr: round_to(lr, 2),
        },
        InsulatedCheck {
            gtf1,
            gtf2,
            stress_ratio: round_to(wind_load / lr, ratio_decimals),
            def_ratio: round_to(deflection / allow_def, ratio_decimals),
            allow_def: round_to(allow_def, 2),
            deflection1: round_to(def1, 2),
            deflection2: round_to(def2, 2),
            deflection: round_to(deflection, 2),
        },
    ))
}

/// Check a glass unit
///
/// Returns `None` when the glass type, span, width or wind load is missing
/// (zero counts as missing), or when the branch's own inputs are absent.
pub fn calculate(input: &GlassUnitInput) -> Option<GlazingResult> {
    let glass_type = input.glass_type?;
    let length = nonzero(input.length)?;
    let width = nonzero(input.width)?;
    let wind_load = nonzero(input.wind_load)?;

    if length >= MAX_CLOSED_FORM_SPAN || input.support_type == SupportType::PointFixed {
        return Some(GlazingResult::Rfem {
            note: "Point fixed or span >= 5000".to_string(),
        });
    }

    let panel = panel_summary(length, width, wind_load);
    let result = match glass_type {
        GlassType::Sgu => {
            let (sgu_lr, check) = single_lite(input, width, wind_load)?;
            GlazingResult::Sgu(SguResult { panel, sgu_lr, check })
        }
        GlassType::Lgu => {
            let (lgu_lr, check) = single_lite(input, width, wind_load)?;
            GlazingResult::Lgu(LguResult { panel, lgu_lr, check })
        }
        GlassType::Dgu => {
            let t1 = input.thickness1?;
            let (share, check) = insulated(input, t1, width, wind_load, 2)?;
            GlazingResult::Dgu(DguResult {
                panel,
                dgu_ls1: share.ls1,
                dgu_ls2: share.ls2,
                dgu_lr1: share.lr1,
                dgu_lr2: share.lr2,
                dgu_lr: share.lr,
                check,
            })
        }
        GlassType::Ldgu => {
            let t1 = input.thickness1_1? + input.thickness1_2?;
            let (share, check) = insulated(input, t1, width, wind_load, 3)?;
            GlazingResult::Ldgu(LdguResult {
                panel,
                ldgu_ls1: share.ls1,
                ldgu_ls2: share.ls2,
                ldgu_lr1: share.lr1,
                ldgu_lr2: share.lr2,
                ldgu_lr: share.lr,
                check,
            })
        }
    };
    Some(result)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
