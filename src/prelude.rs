pub use crate::galaxy::{CloudRng, GalaxyConfig, REFERENCE_FPS};
pub use galaxy_cloud::prelude::*;
