use bevy::prelude::*;
use galaxy_cloud::{AxialSpin, GalaxyParameters};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Frame rate the original per-frame increments were tuned for
pub const REFERENCE_FPS: f32 = 60.0;

#[derive(Resource, Clone, PartialEq)]
pub struct GalaxyConfig {
    pub generation: i32,

    pub params: GalaxyParameters,
    /// Reseeds the generator before every rebuild so the galaxy is reproducible
    pub seed: Option<u64>,
    /// Bumped to force a fresh draw with otherwise unchanged settings
    pub reroll: u32,

    pub point_size: f32,
    pub galaxy_spin_rate: f32,
    pub stars_spin_rate: f32,

    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            generation: 1,
            params: GalaxyParameters::default(),
            seed: None,
            reroll: 0,
            point_size: 0.02,
            galaxy_spin_rate: AxialSpin::from_per_frame(0.0005, REFERENCE_FPS).rate,
            stars_spin_rate: AxialSpin::from_per_frame(0.0002, REFERENCE_FPS).rate,
            auto_rotate: true,
            auto_rotate_speed: 0.2,
        }
    }
}

#[derive(Resource)]
struct GalaxyConfigOld(GalaxyConfig);

impl Default for GalaxyConfigOld {
    fn default() -> Self {
        Self(GalaxyConfig {
            generation: -1,
            ..default()
        })
    }
}

/// Random source shared by every cloud generator, drawn from sequentially
#[derive(Resource)]
pub struct CloudRng(pub StdRng);

impl CloudRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = GalaxyConfig::default();
        app.insert_resource(CloudRng::new(config.seed))
            .insert_resource(config)
            .insert_resource(GalaxyConfigOld::default())
            .add_systems(PreUpdate, apply_ui_updates);
    }
}

fn apply_ui_updates(
    mut galaxy_config_old: ResMut<GalaxyConfigOld>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    if galaxy_config.is_changed() && !galaxy_config.same_settings(&galaxy_config_old.0) {
        galaxy_config.generation += 1;
        debug!("Galaxy config changed, generation {}", galaxy_config.generation);
        galaxy_config_old.0 = galaxy_config.clone();
    }
}

impl GalaxyConfig {
    /// Compares everything except the generation counter
    pub fn same_settings(&self, other: &GalaxyConfig) -> bool {
        *self
            == GalaxyConfig {
                generation: self.generation,
                ..other.clone()
            }
    }

    /// Only the generator inputs require the point cloud to be rebuilt
    pub fn needs_rebuild(&self, other: &GalaxyConfig) -> bool {
        self.params != other.params || self.seed != other.seed || self.reroll != other.reroll
    }
}
