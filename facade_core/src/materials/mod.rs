//! # Profile Library
//!
//! Named aluminum extrusions and steel reinforcement tubes that frame,
//! connection and anchorage calculations refer to by name.
//!
//! ## Profile Kinds
//!
//! - **Stick**: catalog aluminum tube, capacity from its outer dimensions
//! - **Manual**: aluminum extrusion with supplied section properties
//! - **Steel**: RHS reinforcement with a single wall thickness
//!
//! Lookups match the name exactly first, then ignoring surrounding
//! whitespace on both sides.
//!
//! ## Example
//!
//! ```rust
//! use facade_core::materials::{AluminumProfile, ProfileLibrary};
//!
//! let library: ProfileLibrary = serde_json::from_str(r#"{
//!     "alum_profiles": [{
//!         "profile_name": "M-150",
//!         "web_length": 150, "flange_length": 65,
//!         "web_thk": 2.5, "flange_thk": 3.0, "F_y": 160
//!     }]
//! }"#).unwrap();
//!
//! let mullion = library.find_aluminum(" M-150 ").unwrap();
//! assert!(mullion.capacity().unwrap().phi_mn > 0.0);
//! ```

pub mod aluminum;
pub mod steel;

pub use aluminum::{
    manual_profile_capacity, stick_profile_capacity, AluminumCapacity, BucklingConstants,
    ManualSection, ProfileGeometry,
};
pub use steel::{steel_capacity_from_name, steel_tube_capacity, FlangeClass, SteelCapacity};

use serde::{Deserialize, Serialize};

use crate::fields::{lenient_f64, positive};

/// Stand-in section value for a profile that cannot be resolved
///
/// Keeps downstream ratios finite; results built from it are meaningless
/// and the project layer logs a warning when it is used.
pub const PLACEHOLDER_SECTION_VALUE: f64 = 0.001;

/// How an aluminum profile's capacity is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileKind {
    #[default]
    Stick,
    Manual,
}

/// Aluminum profile record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AluminumProfile {
    pub profile_name: String,
    #[serde(default)]
    pub profile_type: ProfileKind,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub web_length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub flange_length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub web_thk: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub flange_thk: Option<f64>,
    #[serde(rename = "F_y", default, deserialize_with = "lenient_f64")]
    pub f_y: Option<f64>,
    #[serde(rename = "Y", default, deserialize_with = "lenient_f64")]
    pub y: Option<f64>,
    #[serde(rename = "X", default, deserialize_with = "lenient_f64")]
    pub x: Option<f64>,
    #[serde(rename = "I_xx", default, deserialize_with = "lenient_f64")]
    pub i_xx: Option<f64>,
    #[serde(rename = "I_yy", default, deserialize_with = "lenient_f64")]
    pub i_yy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub area: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub plastic_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub plastic_y: Option<f64>,
}

impl AluminumProfile {
    /// Outer dimensions, wall thicknesses and yield stress
    pub fn geometry(&self) -> Option<ProfileGeometry> {
        Some(ProfileGeometry {
            web_length: positive(self.web_length)?,
            flange_length: positive(self.flange_length)?,
            web_thk: positive(self.web_thk)?,
            flange_thk: positive(self.flange_thk)?,
            f_y: positive(self.f_y)?,
        })
    }

    /// Supplied section data of a manual profile
    pub fn manual_section(&self) -> Option<ManualSection> {
        Some(ManualSection {
            y: positive(self.y)?,
            x: positive(self.x)?,
            i_xx: positive(self.i_xx)?,
            i_yy: positive(self.i_yy)?,
            area: positive(self.area)?,
            plastic_x: positive(self.plastic_x)?,
            plastic_y: positive(self.plastic_y)?,
        })
    }

    /// Flexural capacity for this profile's kind
    pub fn capacity(&self) -> Option<AluminumCapacity> {
        let geometry = self.geometry()?;
        match self.profile_type {
            ProfileKind::Stick => stick_profile_capacity(&geometry),
            ProfileKind::Manual => manual_profile_capacity(&geometry, &self.manual_section()?),
        }
    }
}

/// Steel reinforcement record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteelProfile {
    pub profile_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub web_length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub flange_length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub thk: Option<f64>,
}

impl SteelProfile {
    /// Capacity from the record's dimensions, falling back to its name
    pub fn capacity(&self) -> Option<SteelCapacity> {
        match (
            positive(self.web_length),
            positive(self.flange_length),
            positive(self.thk),
        ) {
            (Some(web), Some(flange), Some(thk)) => steel_tube_capacity(web, flange, thk),
            _ => steel_capacity_from_name(&self.profile_name),
        }
    }
}

/// Named profiles available to a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileLibrary {
    #[serde(default)]
    pub alum_profiles: Vec<AluminumProfile>,
    #[serde(default)]
    pub steel_profiles: Vec<SteelProfile>,
}

/// Exact match first, then a whitespace-insensitive match
fn find_by_name<'a, T>(items: &'a [T], name: &str, key: impl Fn(&T) -> &str) -> Option<&'a T> {
    items.iter().find(|p| key(p) == name).or_else(|| {
        let wanted = name.trim();
        items.iter().find(|p| key(p).trim() == wanted)
    })
}

impl ProfileLibrary {
    pub fn find_aluminum(&self, name: &str) -> Option<&AluminumProfile> {
        find_by_name(&self.alum_profiles, name, |p| &p.profile_name)
    }

    pub fn find_steel(&self, name: &str) -> Option<&SteelProfile> {
        find_by_name(&self.steel_profiles, name, |p| &p.profile_name)
    }

    /// Capacity of a named aluminum profile
    pub fn aluminum_capacity(&self, name: &str) -> Option<AluminumCapacity> {
        self.find_aluminum(name)?.capacity()
    }

    /// Capacity of a named steel tube
    ///
    /// Names absent from the library are still resolved when they end in a
    /// `W x F x T` token.
    pub fn steel_capacity(&self, name: &str) -> Option<SteelCapacity> {
        match self.find_steel(name) {
            Some(profile) => profile.capacity(),
            None => steel_capacity_from_name(name),
        }
    }
}
