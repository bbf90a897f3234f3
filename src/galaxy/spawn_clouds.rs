use super::rotation::Rotating;
use crate::graphics::{SpriteCloudMaterial, SpriteMeshBuilder};
use crate::prelude::*;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct SpawnCloudsPlugin;

impl Plugin for SpawnCloudsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GalaxyCloudControl {
            generation: -1,
            built_from: None,
        })
        .add_systems(Startup, (spawn_nebulae, spawn_core_glow, spawn_starfield))
        .add_systems(Update, (rebuild_galaxy, apply_display_settings).chain());
    }
}

/// Tracks which config the spawned galaxy was generated from
#[derive(Resource)]
pub struct GalaxyCloudControl {
    generation: i32,
    built_from: Option<GalaxyConfig>,
}

#[derive(Component)]
pub struct GalaxyCloud;

#[derive(Component)]
pub struct Starfield;

#[derive(Component)]
pub struct NebulaGlow;

const CORE_GLOW_SIZE: f32 = 8.0;
const CORE_GLOW_OPACITY: f32 = 0.8;
const NEBULA_OPACITY: f32 = 0.5;
const STAR_SIZE: f32 = 0.5;

/// Regenerates the galaxy when the generator inputs change.
/// A rejected configuration leaves the scene without a galaxy until it is fixed.
fn rebuild_galaxy(
    mut commands: Commands,
    galaxy_config: Res<GalaxyConfig>,
    mut control: ResMut<GalaxyCloudControl>,
    mut shared_rng: ResMut<CloudRng>,
    existing: Query<(Entity, &Rotating), With<GalaxyCloud>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<SpriteCloudMaterial>>,
) {
    if control.generation == galaxy_config.generation {
        return;
    }
    control.generation = galaxy_config.generation;

    if let Some(built_from) = &control.built_from {
        if !built_from.needs_rebuild(&galaxy_config) {
            return;
        }
    }
    control.built_from = Some(galaxy_config.clone());

    // keep the current angle so a rebuild does not snap the galaxy back
    let mut rotating = Rotating::new(galaxy_config.galaxy_spin_rate);
    for (entity, previous) in &existing {
        rotating = *previous;
        commands.entity(entity).despawn();
    }

    let mut seeded;
    let rng = match galaxy_config.seed {
        Some(seed) => {
            seeded = StdRng::seed_from_u64(seed);
            &mut seeded
        }
        None => &mut shared_rng.0,
    };

    let cloud = match generate(&galaxy_config.params, rng) {
        Ok(cloud) => cloud,
        Err(err) => {
            warn!("Galaxy not generated: {err}");
            return;
        }
    };
    info!(
        "Galaxy config updated, regenerated {} points across {} arms",
        cloud.len(),
        galaxy_config.params.arms
    );

    // sprites are unit sized, the material scales them to the configured point size
    let mesh = SpriteMeshBuilder::uniform(1.0).build(&cloud);
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(SpriteCloudMaterial::additive(galaxy_config.point_size))),
        Transform::from_rotation(rotating.rotation()),
        rotating,
        GalaxyCloud,
        NoFrustumCulling,
        NotShadowCaster,
    ));
}

/// Settings that only touch materials and spin rates, applied without regenerating
fn apply_display_settings(
    galaxy_config: Res<GalaxyConfig>,
    mut galaxy: Query<
        (&MeshMaterial3d<SpriteCloudMaterial>, &mut Rotating),
        (With<GalaxyCloud>, Without<Starfield>),
    >,
    mut stars: Query<&mut Rotating, (With<Starfield>, Without<GalaxyCloud>)>,
    mut materials: ResMut<Assets<SpriteCloudMaterial>>,
) {
    if !galaxy_config.is_changed() {
        return;
    }
    for (handle, mut rotating) in &mut galaxy {
        rotating.spin.rate = galaxy_config.galaxy_spin_rate;
        if let Some(mat) = materials.get_mut(&handle.0) {
            mat.params.size_scale = galaxy_config.point_size;
        }
    }
    for mut rotating in &mut stars {
        rotating.spin.rate = galaxy_config.stars_spin_rate;
    }
}

fn spawn_nebulae(
    mut commands: Commands,
    mut rng: ResMut<CloudRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<SpriteCloudMaterial>>,
) {
    let field = match generate_nebulae(&NebulaParameters::default(), &mut rng.0) {
        Ok(field) => field,
        Err(err) => {
            warn!("Nebulae not generated: {err}");
            return;
        }
    };
    debug!("Spawning {} nebula glows", field.cloud.len());

    let mesh = SpriteMeshBuilder::per_point(field.scales).build(&field.cloud);
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(SpriteCloudMaterial::glow(NEBULA_OPACITY))),
        Transform::IDENTITY,
        NebulaGlow,
        NoFrustumCulling,
        NotShadowCaster,
    ));
}

fn spawn_core_glow(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<SpriteCloudMaterial>>,
) {
    let core: PointCloud = [([0.0; 3], [1.0; 3])].into_iter().collect();

    let mesh = SpriteMeshBuilder::uniform(CORE_GLOW_SIZE).build(&core);
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(SpriteCloudMaterial::glow(CORE_GLOW_OPACITY))),
        Transform::IDENTITY,
        NebulaGlow,
        NoFrustumCulling,
        NotShadowCaster,
    ));
}

fn spawn_starfield(
    mut commands: Commands,
    galaxy_config: Res<GalaxyConfig>,
    mut rng: ResMut<CloudRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<SpriteCloudMaterial>>,
) {
    let cloud = match generate_starfield(&StarfieldParameters::default(), &mut rng.0) {
        Ok(cloud) => cloud,
        Err(err) => {
            warn!("Starfield not generated: {err}");
            return;
        }
    };
    debug!("Spawning {} background stars", cloud.len());

    let mesh = SpriteMeshBuilder::uniform(STAR_SIZE).build(&cloud);
    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(SpriteCloudMaterial::premultiplied(1.0))),
        Transform::IDENTITY,
        Rotating::new(galaxy_config.stars_spin_rate),
        Starfield,
        NoFrustumCulling,
        NotShadowCaster,
    ));
}
