use crate::error::{check_count, check_positive, CloudResult};
use crate::PointCloud;
use bevy_color::LinearRgba;
use bevy_math::{vec3, Vec3};
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldParameters {
    pub count: i32,
    /// edge length of the cube the stars are scattered in
    pub extent: f32,
    pub color: LinearRgba,
}

impl Default for StarfieldParameters {
    fn default() -> Self {
        Self {
            count: 5_000,
            extent: 400.0,
            color: LinearRgba::WHITE,
        }
    }
}

impl StarfieldParameters {
    pub fn validate(&self) -> CloudResult<usize> {
        let count = check_count("count", self.count)?;
        check_positive("extent", self.extent)?;
        Ok(count)
    }
}

/// Uniformly scatters single-colored stars through a cube centered on the origin
pub fn generate_starfield<R: Rng + ?Sized>(
    params: &StarfieldParameters,
    rng: &mut R,
) -> CloudResult<PointCloud> {
    let count = params.validate()?;
    let color = Vec3::new(params.color.red, params.color.green, params.color.blue);

    let mut cloud = PointCloud::with_capacity(count);
    for _ in 0..count {
        let position = vec3(
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
        ) * params.extent;
        cloud.push(position, color);
    }

    tracing::debug!(stars = count, "generated starfield");
    Ok(cloud)
}
