use bevy::prelude::*;

mod galaxy_config;
mod rotation;
mod spawn_clouds;

use galaxy_config::GalaxyConfigPlugin;
use rotation::RotationPlugin;
use spawn_clouds::SpawnCloudsPlugin;

pub use galaxy_config::{CloudRng, GalaxyConfig, REFERENCE_FPS};

pub struct GalaxyPlugin;

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((GalaxyConfigPlugin, SpawnCloudsPlugin, RotationPlugin));
    }
}
