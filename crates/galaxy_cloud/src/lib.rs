//! Procedural point clouds for the spiral galaxy viewer.
//!
//! Everything here is a pure function of its parameters and a random source;
//! nothing depends on the renderer.
mod error;
mod galaxy;
mod nebula;
mod point_cloud;
mod spin;
mod starfield;

pub mod prelude;

pub use error::{CloudError, CloudResult};
pub use galaxy::{branch_angle, generate, GalaxyParameters, MIN_BRIGHTNESS};
pub use nebula::{generate_nebulae, NebulaField, NebulaParameters};
pub use point_cloud::PointCloud;
pub use spin::AxialSpin;
pub use starfield::{generate_starfield, StarfieldParameters};
