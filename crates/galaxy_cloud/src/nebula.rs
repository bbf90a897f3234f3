use crate::error::{check_count, check_non_negative, check_positive, CloudResult};
use crate::PointCloud;
use bevy_color::{Hsla, LinearRgba, Srgba};
use bevy_math::{vec3, Vec3};
use rand::Rng;

/// Loose colored glows scattered through a cube around the galaxy
#[derive(Clone, Debug, PartialEq)]
pub struct NebulaParameters {
    pub count: i32,
    /// edge length of the cube the glows are scattered in
    pub extent: f32,
    pub min_scale: f32,
    /// each sprite axis is `min_scale + U(0,1) * scale_spread`
    pub scale_spread: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for NebulaParameters {
    fn default() -> Self {
        Self {
            count: 15,
            extent: 40.0,
            min_scale: 10.0,
            scale_spread: 20.0,
            saturation: 0.8,
            lightness: 0.5,
        }
    }
}

impl NebulaParameters {
    pub fn validate(&self) -> CloudResult<usize> {
        let count = check_count("count", self.count)?;
        check_non_negative("extent", self.extent)?;
        check_positive("min_scale", self.min_scale)?;
        check_non_negative("scale_spread", self.scale_spread)?;
        check_non_negative("saturation", self.saturation)?;
        check_non_negative("lightness", self.lightness)?;
        Ok(count)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NebulaField {
    pub cloud: PointCloud,
    /// per glow sprite size, aligned with `cloud`
    pub scales: Vec<[f32; 2]>,
}

pub fn generate_nebulae<R: Rng + ?Sized>(
    params: &NebulaParameters,
    rng: &mut R,
) -> CloudResult<NebulaField> {
    let count = params.validate()?;

    let mut field = NebulaField {
        cloud: PointCloud::with_capacity(count),
        scales: Vec::with_capacity(count),
    };
    for _ in 0..count {
        let hue = rng.random::<f32>() * 360.0;
        let hsla = Hsla::hsl(hue, params.saturation, params.lightness);
        let color = LinearRgba::from(Srgba::from(hsla));

        let scale = [
            params.min_scale + rng.random::<f32>() * params.scale_spread,
            params.min_scale + rng.random::<f32>() * params.scale_spread,
        ];
        let position = vec3(
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() - 0.5,
        ) * params.extent;

        field.cloud.push(position, Vec3::new(color.red, color.green, color.blue));
        field.scales.push(scale);
    }

    tracing::debug!(glows = count, "generated nebula field");
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_rng::ConstantRng;
    use crate::CloudError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn glows_stay_inside_cube() {
        let params = NebulaParameters::default();
        let field = generate_nebulae(&params, &mut StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(field.cloud.len(), 15);
        assert_eq!(field.scales.len(), 15);
        for position in field.cloud.positions() {
            assert!(position.iter().all(|c| c.abs() <= params.extent * 0.5));
        }
        for scale in &field.scales {
            assert!(scale.iter().all(|s| (10.0..=30.0).contains(s)));
        }
        for color in field.cloud.colors() {
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn constant_draws_center_the_glow() {
        let params = NebulaParameters {
            count: 1,
            ..NebulaParameters::default()
        };
        let field = generate_nebulae(&params, &mut ConstantRng::half()).unwrap();

        assert_eq!(field.cloud.positions()[0], [0.0, 0.0, 0.0]);
        assert_eq!(field.scales[0], [20.0, 20.0]);
        // hue 180 is cyan, so red is the weakest channel
        let [r, g, b] = field.cloud.colors()[0];
        assert!(r < g && r < b);
    }

    #[test]
    fn rejects_negative_count() {
        let params = NebulaParameters {
            count: -3,
            ..NebulaParameters::default()
        };
        assert!(matches!(
            generate_nebulae(&params, &mut ConstantRng::half()),
            Err(CloudError::InvalidArgument { field: "count", .. })
        ));
    }
}
