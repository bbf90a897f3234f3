use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, MeshVertexAttribute, PrimitiveTopology},
        render_asset::RenderAssetUsages,
        render_resource::VertexFormat,
    },
};
use galaxy_cloud::PointCloud;
use rayon::prelude::*;

/// World space width and height of each sprite quad
pub const ATTRIBUTE_SPRITE_SIZE: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_SpriteSize", 988_540_917, VertexFormat::Float32x2);

const CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

enum SpriteSizes {
    Uniform(f32),
    PerPoint(Vec<[f32; 2]>),
}

/// Expands a point cloud into one camera facing quad per point.
/// All four vertices of a quad share the point's center; the vertex shader
/// pushes them apart along the view plane using the corner UV.
pub struct SpriteMeshBuilder {
    sizes: SpriteSizes,
}

impl SpriteMeshBuilder {
    pub fn uniform(size: f32) -> Self {
        Self {
            sizes: SpriteSizes::Uniform(size),
        }
    }

    /// `sizes` must be aligned with the cloud passed to `build`
    pub fn per_point(sizes: Vec<[f32; 2]>) -> Self {
        Self {
            sizes: SpriteSizes::PerPoint(sizes),
        }
    }

    fn size_of(&self, index: usize) -> [f32; 2] {
        match &self.sizes {
            SpriteSizes::Uniform(size) => [*size; 2],
            SpriteSizes::PerPoint(sizes) => sizes.get(index).copied().unwrap_or([0.0; 2]),
        }
    }

    pub fn build(&self, cloud: &PointCloud) -> Mesh {
        let vertex_count = cloud.len() * 4;

        let mut positions = vec![[0.0f32; 3]; vertex_count];
        let mut colors = vec![[0.0f32; 4]; vertex_count];
        let mut sizes = vec![[0.0f32; 2]; vertex_count];

        positions
            .par_chunks_exact_mut(4)
            .zip(cloud.flat_positions().par_chunks_exact(3))
            .for_each(|(quad, p)| quad.fill([p[0], p[1], p[2]]));

        colors
            .par_chunks_exact_mut(4)
            .zip(cloud.flat_colors().par_chunks_exact(3))
            .for_each(|(quad, c)| quad.fill([c[0], c[1], c[2], 1.0]));

        sizes
            .par_chunks_exact_mut(4)
            .enumerate()
            .for_each(|(i, quad)| quad.fill(self.size_of(i)));

        let corners: Vec<[f32; 2]> = CORNERS.iter().copied().cycle().take(vertex_count).collect();

        let indices: Vec<u32> = (0..cloud.len() as u32)
            .into_par_iter()
            .flat_map_iter(|quad| QUAD_INDICES.iter().map(move |i| quad * 4 + i))
            .collect();

        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
            .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
            .with_inserted_attribute(ATTRIBUTE_SPRITE_SIZE, sizes)
            .with_inserted_indices(Indices::U32(indices))
    }
}
