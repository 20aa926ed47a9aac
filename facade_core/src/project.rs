//! # Project Data Structures
//!
//! The `Project` struct is the root container of a facade job. Projects
//! serialize to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (code labels, default risk category)
//! ├── profiles: ProfileLibrary (aluminum + steel sections)
//! ├── wind: Option<WindEnvironment>
//! └── categories: Vec<Category> (glass units, frames, connections, anchorages)
//! ```
//!
//! Connections and anchorages name their parent frame by index within the
//! same category.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::project::{Category, Project};
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! project.categories.push(Category::new("Typical floor"));
//!
//! let results = project.evaluate().unwrap();
//! assert_eq!(results.categories.len(), 1);
//! assert!(results.wind.is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug_span, info, warn};

use crate::calculations::{
    anchorage, connection, frame, glazing, AnchorageInput, AnchorageResult, ConnectionInput,
    ConnectionResult, FrameInput, FrameResult, GlassUnitInput, GlazingResult,
};
use crate::errors::CalcResult;
use crate::materials::ProfileLibrary;
use crate::wind::coefficients::RiskCategory;
use crate::wind::{compute_wind_pressures, WindEnvironment, WindPressures};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub settings: GlobalSettings,

    /// Section library referenced by frame and anchorage records
    #[serde(default)]
    pub profiles: ProfileLibrary,

    /// Building wind environment; no wind result when absent
    #[serde(default)]
    pub wind: Option<WindEnvironment>,

    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use facade_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                project_name: String::new(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            profiles: ProfileLibrary::default(),
            wind: None,
            categories: Vec::new(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Append a category and return its index.
    pub fn add_category(&mut self, category: Category) -> usize {
        self.categories.push(category);
        self.touch();
        self.categories.len() - 1
    }

    /// Total number of records across all categories
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(Category::item_count).sum()
    }

    /// Evaluate the wind environment once, then every category.
    ///
    /// # Errors
    /// Wind validation failures (floor heights, wind speed, landform length)
    /// abort the evaluation. Item-level missing input yields a `None` result
    /// for that item only.
    pub fn evaluate(&self) -> CalcResult<ProjectResults> {
        let wind = match &self.wind {
            Some(env) => {
                let _span = debug_span!("wind").entered();
                let pressures = compute_wind_pressures(env)?;
                info!(
                    levels = pressures.mwfrs.levels.len(),
                    "wind pressures evaluated"
                );
                Some(pressures)
            }
            None => None,
        };

        let categories = self
            .categories
            .iter()
            .map(|category| category.evaluate(&self.profiles))
            .collect();

        Ok(ProjectResults {
            job_id: self.meta.job_id.clone(),
            evaluated: Utc::now(),
            wind,
            categories,
        })
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    #[serde(default)]
    pub project_name: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Wind load standard label
    pub wind_code: String,

    /// Member and anchorage design standard label
    pub design_code: String,

    /// Risk category applied to new wind environments
    pub risk_category: RiskCategory,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            wind_code: "ASCE 7-16".to_string(),
            design_code: "AAMA TIR-A9 / AISC 360-16 / ACI 318-19".to_string(),
            risk_category: RiskCategory::II,
        }
    }
}

// =============================================================================
// CATEGORIES
// =============================================================================

/// A group of related facade records, e.g. one elevation or system type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub glass_units: Vec<GlassUnitInput>,
    #[serde(default)]
    pub frames: Vec<FrameInput>,
    #[serde(default)]
    pub connections: Vec<ConnectionInput>,
    #[serde(default)]
    pub anchorages: Vec<AnchorageInput>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn item_count(&self) -> usize {
        self.glass_units.len() + self.frames.len() + self.connections.len() + self.anchorages.len()
    }

    fn parent_frame(&self, index: usize, kind: &str, label: &str) -> Option<&FrameInput> {
        let parent = self.frames.get(index);
        if parent.is_none() {
            warn!(
                category = %self.name,
                item = %label,
                frame = index,
                "{} references a missing frame",
                kind
            );
        }
        parent
    }

    /// Run every engine over the category's records.
    pub fn evaluate(&self, profiles: &ProfileLibrary) -> CategoryResults {
        info!(
            category = %self.name,
            glass_units = self.glass_units.len(),
            frames = self.frames.len(),
            connections = self.connections.len(),
            anchorages = self.anchorages.len(),
            "evaluating category"
        );

        let glass_units = self
            .glass_units
            .iter()
            .map(|unit| {
                let _span = debug_span!("glass_unit", label = %unit.label).entered();
                let result = glazing::calculate(unit);
                if result.as_ref().is_some_and(GlazingResult::is_deferred) {
                    warn!(category = %self.name, item = %unit.label, "glass unit deferred to FE analysis");
                }
                ItemOutcome::new(&self.name, "glass unit", &unit.label, result)
            })
            .collect();

        let frames = self
            .frames
            .iter()
            .map(|input| {
                let _span = debug_span!("frame", label = %input.label).entered();
                let result = frame::calculate(input, profiles);
                if let Some(r) = &result {
                    if !r.placeholder_sections.is_empty() {
                        warn!(
                            category = %self.name,
                            item = %input.label,
                            profiles = ?r.placeholder_sections,
                            "profile not in library, placeholder section values used"
                        );
                    }
                }
                ItemOutcome::new(&self.name, "frame", &input.label, result)
            })
            .collect();

        let connections = self
            .connections
            .iter()
            .map(|input| {
                let _span = debug_span!("connection", label = %input.label).entered();
                let result = self
                    .parent_frame(input.frame, "connection", &input.label)
                    .and_then(|parent| connection::calculate(input, parent));
                ItemOutcome::new(&self.name, "connection", &input.label, result)
            })
            .collect();

        let anchorages = self
            .anchorages
            .iter()
            .map(|input| {
                let _span = debug_span!("anchorage", label = %input.label).entered();
                let result = self
                    .parent_frame(input.frame, "anchorage", &input.label)
                    .and_then(|parent| anchorage::calculate(input, parent, profiles));
                ItemOutcome::new(&self.name, "anchorage", &input.label, result)
            })
            .collect();

        CategoryResults {
            name: self.name.clone(),
            glass_units,
            frames,
            connections,
            anchorages,
        }
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Result of one record; `result` is `None` when input was missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutcome<T> {
    pub label: String,
    pub result: Option<T>,
}

impl<T> ItemOutcome<T> {
    fn new(category: &str, kind: &str, label: &str, result: Option<T>) -> Self {
        if result.is_none() {
            warn!(category = %category, item = %label, "{} produced no result", kind);
        }
        ItemOutcome {
            label: label.to_string(),
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResults {
    pub name: String,
    pub glass_units: Vec<ItemOutcome<GlazingResult>>,
    pub frames: Vec<ItemOutcome<FrameResult>>,
    pub connections: Vec<ItemOutcome<ConnectionResult>>,
    pub anchorages: Vec<ItemOutcome<AnchorageResult>>,
}

impl CategoryResults {
    /// Number of records that produced no result
    pub fn missing_count(&self) -> usize {
        self.glass_units.iter().filter(|o| o.result.is_none()).count()
            + self.frames.iter().filter(|o| o.result.is_none()).count()
            + self.connections.iter().filter(|o| o.result.is_none()).count()
            + self.anchorages.iter().filter(|o| o.result.is_none()).count()
    }
}

/// Output of [`Project::evaluate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResults {
    pub job_id: String,
    pub evaluated: DateTime<Utc>,
    pub wind: Option<WindPressures>,
    pub categories: Vec<CategoryResults>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{ClampType, GlassType};
    use crate::loads::FrameType;
    use crate::materials::AluminumProfile;
    use crate::wind::coefficients::{ExposureCategory, TopographyInput};
    use crate::wind::FloorHeights;

    fn sample_project() -> Project {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        project.profiles.alum_profiles.push(AluminumProfile {
            profile_name: "M-150".into(),
            web_length: Some(150.0),
            flange_length: Some(65.0),
            web_thk: Some(2.5),
            flange_thk: Some(3.0),
            f_y: Some(160.0),
            ..Default::default()
        });

        let mut category = Category::new("Curtain wall");
        category.glass_units.push(GlassUnitInput {
            label: "G-1".into(),
            glass_type: Some(GlassType::Sgu),
            length: Some(2000.0),
            width: Some(1000.0),
            wind_load: Some(2.0),
            nfl: Some(1.0),
            deflection: Some(5.0),
            ..Default::default()
        });
        category.frames.push(FrameInput {
            label: "F-1".into(),
            mullion: Some("M-150".into()),
            width: Some(1200.0),
            length: Some(3600.0),
            wind_neg: Some(2.0),
            frame_type: FrameType::FloorToFloor,
            glass_thk: Some(10.0),
            ..Default::default()
        });
        category.connections.push(ConnectionInput {
            label: "C-1".into(),
            screw_nos: Some(2.0),
            screw_dia: Some(5.5),
            head_dia: Some(10.0),
            t1: Some(3.0),
            t2: Some(3.0),
            tc: Some(3.0),
            ..Default::default()
        });
        category.anchorages.push(AnchorageInput {
            label: "A-1".into(),
            clump_type: ClampType::U,
            ..Default::default()
        });
        project.add_category(category);
        project
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let project = sample_project();
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("ASCE 7-16"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.categories, project.categories);
        assert_eq!(roundtrip.item_count(), 4);
    }

    #[test]
    fn test_minimal_document_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0", "engineer": "E", "job_id": "J", "client": "C",
                "created": "2025-01-01T00:00:00Z", "modified": "2025-01-01T00:00:00Z"
            }
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.wind.is_none());
        assert!(project.categories.is_empty());
        assert_eq!(project.settings, GlobalSettings::default());
    }

    #[test]
    fn test_evaluate_every_engine() {
        let results = sample_project().evaluate().unwrap();
        assert_eq!(results.job_id, "25-042");
        let cat = &results.categories[0];
        assert_eq!(cat.name, "Curtain wall");
        assert!(cat.glass_units[0].result.is_some());
        assert!(cat.frames[0].result.is_some());
        assert!(cat.connections[0].result.is_some());
        assert!(matches!(cat.anchorages[0].result, Some(AnchorageResult::U(_))));
        assert_eq!(cat.missing_count(), 0);
    }

    #[test]
    fn test_connection_matches_direct_call() {
        let project = sample_project();
        let results = project.evaluate().unwrap();
        let cat = &project.categories[0];
        let direct = connection::calculate(&cat.connections[0], &cat.frames[0]);
        assert_eq!(results.categories[0].connections[0].result, direct);
    }

    #[test]
    fn test_missing_parent_frame() {
        let mut project = sample_project();
        project.categories[0].connections[0].frame = 3;
        project.categories[0].anchorages[0].frame = 1;
        let results = project.evaluate().unwrap();
        let cat = &results.categories[0];
        assert!(cat.connections[0].result.is_none());
        assert!(cat.anchorages[0].result.is_none());
        assert_eq!(cat.missing_count(), 2);
        assert_eq!(cat.connections[0].label, "C-1");
    }

    #[test]
    fn test_deferred_glass_unit_is_kept() {
        let mut project = sample_project();
        project.categories[0].glass_units[0].length = Some(5200.0);
        let results = project.evaluate().unwrap();
        let unit = results.categories[0].glass_units[0].result.as_ref().unwrap();
        assert!(unit.is_deferred());
    }

    #[test]
    fn test_wind_failure_aborts() {
        let mut project = sample_project();
        project.wind = Some(WindEnvironment {
            exposure_cat: ExposureCategory::B,
            b_length: Some(30.0),
            b_width: Some(20.0),
            wind_speed: Some(50.0),
            location: None,
            k_d: Some(0.85),
            gc_pi: Some(0.18),
            occupancy_cat: RiskCategory::II,
            topography: TopographyInput::default(),
            floor_heights: FloorHeights::Text("3.5 abc".into()),
            b_freq: None,
            damping: None,
        });
        let err = project.evaluate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        if let Some(env) = project.wind.as_mut() {
            env.floor_heights = FloorHeights::Text("3.5 3.2 3.2".into());
        }
        let results = project.evaluate().unwrap();
        assert_eq!(results.wind.unwrap().mwfrs.levels.len(), 3);
    }

    #[test]
    fn test_risk_category_serialization() {
        let json = serde_json::to_string(&RiskCategory::III).unwrap();
        assert_eq!(json, "\"III\"");
        let roundtrip: RiskCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, RiskCategory::III);
    }
}
