//! # Facade Calculations
//!
//! One module per facade component. Each follows the pattern:
//!
//! - `*Input` - Input record (JSON-serializable, lenient numeric fields)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(...) -> Option<*Result>` - Pure calculation function;
//!   `None` when a required input is missing or non-numeric
//!
//! ## Available Calculations
//!
//! - [`glazing`] - Glass unit stress, deflection and structural silicone
//! - [`frame`] - Mullion and transom bending, shear and deflection
//! - [`connection`] - Screwed transom-to-mullion joint
//! - [`anchorage`] - Mullion bracket and post-installed anchors

pub mod anchorage;
pub mod connection;
pub mod frame;
pub mod glazing;

pub use anchorage::{AnchorageInput, AnchorageResult, ClampType};
pub use connection::{ConnectionInput, ConnectionResult};
pub use frame::{FrameInput, FrameResult, MullionType};
pub use glazing::{GlassGrade, GlassType, GlassUnitInput, GlazingResult, SupportType};
