//! # facade_core - Curtain-Wall Facade Calculation Engine
//!
//! `facade_core` checks the structural elements of a curtain-wall facade:
//! building wind pressures, aluminum and steel profile capacities, glass
//! units, mullion/transom frames, screwed joints and the anchorage into the
//! slab. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Lenient input**: Missing or non-numeric fields give `None`, not a panic
//! - **Rich Errors**: Structured error types for hard validation failures
//!
//! ## Quick Start
//!
//! ```rust
//! use facade_core::calculations::{glazing, GlassUnitInput};
//!
//! let unit: GlassUnitInput = serde_json::from_str(r#"{
//!     "glass_type": "sgu", "grade": "FT",
//!     "length": 2000, "width": 1000, "wind_load": 2.0,
//!     "nfl": 1.0, "def": 5.0
//! }"#).unwrap();
//!
//! let result = glazing::calculate(&unit).unwrap();
//! assert_eq!(result.governing_ratio(), Some(0.5));
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project container, categories and batch evaluation
//! - [`wind`] - MWFRS and C&C wind pressures
//! - [`materials`] - Profile library and aluminum/steel capacities
//! - [`calculations`] - Glazing, frame, connection and anchorage checks
//! - [`loads`] - Frame line loads, joint forces and support reactions
//! - [`equations`] - Section and beam formulas
//! - [`fields`] - Lenient numeric decoding
//! - [`units`] - Unit conversion and rounding
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic JSON saves and project loading

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod fields;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod units;
pub mod wind;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_json, save_project};
pub use materials::ProfileLibrary;
pub use project::{Category, GlobalSettings, Project, ProjectMetadata, ProjectResults};
pub use wind::{compute_wind_pressures, WindEnvironment, WindPressures};
