//! # Structural Engineering Equations
//!
//! Fundamental mechanics formulas shared by the capacity and frame engines.
//! Keeping them in one place makes every engine use the same expression for
//! the same quantity.
//!
//! ## Modules
//!
//! - [`beam`] - Uniform-load span formulas (moment, shear, deflection)
//! - [`section`] - Rectangular tube properties (A, I, S, Z, J)
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive toward the member (wind suction is entered as a
//!   positive magnitude)
//! - **Moment**: Magnitude only; facade members are checked for the envelope
//! - **Deflection**: Magnitude only
//!
//! ## References
//!
//! - Aluminum Design Manual 2020
//! - AISC 360-16: Specification for Structural Steel Buildings
//! - Roark's Formulas for Stress and Strain, 8th Edition

pub mod beam;
pub mod section;

pub use beam::{
    fixed_end_uniform_moment,
    two_span_interior_reaction,
    two_span_interior_shear,
    two_span_max_deflection,
    uniform_load_deflection,
    uniform_load_moment,
    uniform_load_shear,
};

pub use section::{
    parse_dimension_triplet,
    section_modulus,
    tube_area,
    tube_moment_of_inertia_x,
    tube_moment_of_inertia_y,
    tube_plastic_modulus_x,
    tube_properties,
    tube_torsion_constant,
    TubeDimensions,
    TubeProperties,
};
