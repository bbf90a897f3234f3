use super::sprite_mesh::ATTRIBUTE_SPRITE_SIZE;
use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::MeshVertexBufferLayoutRef,
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError,
        },
    },
};
use bytemuck::{Pod, Zeroable};

const SHADER_ASSET_PATH: &str = "shaders/sprite_cloud.wgsl";

/// Falloff exponents for the radial fade; points stay crisp, glows are soft
const POINT_FALLOFF: f32 = 1.5;
const GLOW_FALLOFF: f32 = 2.5;

pub struct SpriteMaterialPlugin;

impl Plugin for SpriteMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<SpriteCloudMaterial>::default());
    }
}

// Duplicated in sprite_cloud.wgsl, so make sure to update both
#[derive(ShaderType, Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct SpriteParams {
    /// multiplies the per-vertex sprite size
    pub size_scale: f32,
    pub opacity: f32,
    pub falloff: f32,
    /// 1.0 when the sprite adds light instead of covering what is behind it
    pub additive: f32,
}

/// Camera facing sprites that never write depth.
/// Bevy blends `AlphaMode::Add` with the premultiplied equation, so additive sprites
/// also have to zero their output alpha through `SpriteParams::additive`.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct SpriteCloudMaterial {
    #[uniform(0)]
    pub params: SpriteParams,
    pub alpha_mode: AlphaMode,
}

impl SpriteCloudMaterial {
    fn new(size_scale: f32, opacity: f32, falloff: f32, alpha_mode: AlphaMode) -> Self {
        Self {
            params: SpriteParams {
                size_scale,
                opacity,
                falloff,
                additive: if alpha_mode == AlphaMode::Add { 1.0 } else { 0.0 },
            },
            alpha_mode,
        }
    }

    /// Overlapping points brighten each other
    pub fn additive(size_scale: f32) -> Self {
        Self::new(size_scale, 1.0, POINT_FALLOFF, AlphaMode::Add)
    }

    /// Soft additive glow whose size comes entirely from the mesh
    pub fn glow(opacity: f32) -> Self {
        Self::new(1.0, opacity, GLOW_FALLOFF, AlphaMode::Add)
    }

    /// Regular transparency, used for the background stars
    pub fn premultiplied(size_scale: f32) -> Self {
        Self::new(size_scale, 1.0, POINT_FALLOFF, AlphaMode::Premultiplied)
    }
}

impl Material for SpriteCloudMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
            ATTRIBUTE_SPRITE_SIZE.at_shader_location(3),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
