use bevy::prelude::*;

mod sprite_material;
mod sprite_mesh;

pub use sprite_material::SpriteCloudMaterial;
pub use sprite_mesh::SpriteMeshBuilder;

pub struct GraphicsPlugin;

impl Plugin for GraphicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(sprite_material::SpriteMaterialPlugin);
    }
}
