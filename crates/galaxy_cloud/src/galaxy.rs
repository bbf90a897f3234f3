use crate::error::{
    check_count, check_finite, check_non_negative, check_positive, CloudError, CloudResult,
};
use crate::PointCloud;
use bevy_color::{LinearRgba, Mix, Srgba};
use bevy_math::{vec3, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Lowest brightness multiplier applied to a point's interpolated color
pub const MIN_BRIGHTNESS: f32 = 0.7;

#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParameters {
    pub count: i32,
    pub arms: i32,
    pub radius: f32,
    /// radians of twist per unit of radius
    pub spin: f32,
    /// jitter scale, relative to the radius of each point
    pub randomness: f32,
    /// higher values pack more points near the core
    pub randomness_power: f32,
    pub inside_color: LinearRgba,
    pub outside_color: LinearRgba,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            arms: 4,
            radius: 10.0,
            spin: 2.0,
            randomness: 0.3,
            randomness_power: 3.0,
            inside_color: Srgba::rgb_u8(0xff, 0x66, 0xff).into(),
            outside_color: Srgba::rgb_u8(0x66, 0xff, 0xff).into(),
        }
    }
}

impl GalaxyParameters {
    /// Checks everything `generate` relies on and returns the point count.
    /// `randomness_power` is deliberately left alone; non-positive values are
    /// degenerate but still numeric.
    pub fn validate(&self) -> CloudResult<usize> {
        let count = check_count("count", self.count)?;
        if self.arms < 1 {
            return Err(CloudError::invalid(
                "arms",
                format!("{} must be at least 1", self.arms),
            ));
        }
        check_positive("radius", self.radius)?;
        check_finite("spin", self.spin)?;
        check_non_negative("randomness", self.randomness)?;
        Ok(count)
    }
}

/// Baseline angle of the arm that point `index` belongs to.
/// Arms are assigned round robin, so every arm gets `count / arms` points (± 1).
pub fn branch_angle(index: usize, arms: usize) -> f32 {
    (index % arms) as f32 / arms as f32 * TAU
}

/// Everything drawn for a single point, before it is flattened into a cloud
#[derive(Clone, Copy, Debug)]
pub(crate) struct GalaxySample {
    pub radius: f32,
    pub branch_angle: f32,
    pub spin_angle: f32,
    pub jitter: Vec3,
    pub brightness: f32,
}

impl GalaxySample {
    fn draw<R: Rng + ?Sized>(
        index: usize,
        arms: usize,
        params: &GalaxyParameters,
        rng: &mut R,
    ) -> Self {
        let radius = rng.random::<f32>().powf(params.randomness_power) * params.radius;
        let spread = params.randomness * radius;
        let jitter = vec3(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread * 0.5,
            (rng.random::<f32>() - 0.5) * spread,
        );
        let brightness = MIN_BRIGHTNESS + (1.0 - MIN_BRIGHTNESS) * rng.random::<f32>();

        Self {
            radius,
            branch_angle: branch_angle(index, arms),
            spin_angle: radius * params.spin,
            jitter,
            brightness,
        }
    }

    pub fn position(&self) -> Vec3 {
        let angle = self.branch_angle + self.spin_angle;
        vec3(angle.cos() * self.radius, 0.0, angle.sin() * self.radius) + self.jitter
    }

    pub fn color(&self, params: &GalaxyParameters) -> Vec3 {
        let t = (self.radius / params.radius).clamp(0.0, 1.0);
        let mixed = params.inside_color.mix(&params.outside_color, t);
        vec3(mixed.red, mixed.green, mixed.blue) * self.brightness
    }
}

/// Samples a spiral galaxy.
///
/// Each call consumes fresh entropy from `rng`, so two calls only match when
/// the generator is seeded identically. Parameters are validated up front and
/// nothing is drawn when they are rejected.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParameters,
    rng: &mut R,
) -> CloudResult<PointCloud> {
    let count = params.validate()?;
    let arms = params.arms as usize;

    let mut cloud = PointCloud::with_capacity(count);
    for index in 0..count {
        let sample = GalaxySample::draw(index, arms, params, rng);
        cloud.push(sample.position(), sample.color(params));
    }

    tracing::debug!(points = count, arms, "generated galaxy cloud");
    Ok(cloud)
}

#[cfg(test)]
pub(crate) fn samples<R: Rng + ?Sized>(
    params: &GalaxyParameters,
    rng: &mut R,
) -> Vec<GalaxySample> {
    let arms = params.arms as usize;
    (0..params.count as usize)
        .map(|index| GalaxySample::draw(index, arms, params, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_rng::ConstantRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    fn small_params(count: i32) -> GalaxyParameters {
        GalaxyParameters {
            count,
            ..default_params()
        }
    }

    fn default_params() -> GalaxyParameters {
        GalaxyParameters {
            count: 2_000,
            ..GalaxyParameters::default()
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn output_matches_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let cloud = generate(&small_params(1234), &mut rng).unwrap();
        assert_eq!(cloud.len(), 1234);
        assert_eq!(cloud.positions().len(), cloud.colors().len());
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let cloud = generate(&small_params(0), &mut rng).unwrap();
        assert!(cloud.is_empty());
        assert!(cloud.colors().is_empty());
    }

    #[test]
    fn radius_never_exceeds_galaxy_radius() {
        let params = default_params();
        let mut rng = StdRng::seed_from_u64(11);
        for sample in samples(&params, &mut rng) {
            let p = sample.position() - sample.jitter;
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r >= 0.0);
            assert!(r <= params.radius + EPSILON, "radius {r} out of bounds");
            assert!(approx(r, sample.radius));
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn jitter_scales_with_local_radius() {
        let params = default_params();
        let mut rng = StdRng::seed_from_u64(12);
        for sample in samples(&params, &mut rng) {
            let limit = params.randomness * sample.radius * 0.5 + EPSILON;
            assert!(sample.jitter.x.abs() <= limit);
            assert!(sample.jitter.y.abs() <= limit * 0.5 + EPSILON);
            assert!(sample.jitter.z.abs() <= limit);
        }
    }

    #[test]
    fn color_endpoints_follow_radius() {
        let params = default_params();
        let rgb = |c: LinearRgba| vec3(c.red, c.green, c.blue);
        let inside = rgb(params.inside_color);
        let outside = rgb(params.outside_color);

        let core = GalaxySample {
            radius: 0.0,
            branch_angle: 0.0,
            spin_angle: 0.0,
            jitter: Vec3::ZERO,
            brightness: 0.7,
        };
        assert!(core.color(&params).abs_diff_eq(inside * 0.7, EPSILON));

        let rim = GalaxySample {
            radius: params.radius,
            brightness: 1.0,
            ..core
        };
        assert!(rim.color(&params).abs_diff_eq(outside, EPSILON));
    }

    #[test]
    fn colors_stay_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let cloud = generate(&default_params(), &mut rng).unwrap();
        for color in cloud.colors() {
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)), "{color:?}");
        }
    }

    #[test]
    fn arms_are_assigned_by_index() {
        let params = GalaxyParameters {
            count: 400,
            arms: 4,
            spin: 0.0,
            randomness: 0.0,
            ..GalaxyParameters::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let samples = samples(&params, &mut rng);

        for arm in 0..4 {
            let expected = arm as f32 * FRAC_PI_2;
            let on_arm = samples
                .iter()
                .filter(|s| approx(s.branch_angle, expected))
                .count();
            assert_eq!(on_arm, 100);
        }
        for (index, sample) in samples.iter().enumerate() {
            assert!(approx(sample.branch_angle, (index % 4) as f32 * FRAC_PI_2));
        }
    }

    #[test]
    fn seeded_generation_is_repeatable() {
        let params = default_params();
        let a = generate(&params, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&params, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unseeded_generation_varies() {
        let params = default_params();
        let a = generate(&params, &mut rand::rng()).unwrap();
        let b = generate(&params, &mut rand::rng()).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn constant_draws_give_closed_form_points() {
        let params = GalaxyParameters {
            count: 4,
            arms: 4,
            radius: 10.0,
            spin: 0.0,
            randomness: 0.0,
            randomness_power: 1.0,
            ..GalaxyParameters::default()
        };
        let cloud = generate(&params, &mut ConstantRng::half()).unwrap();

        let mixed = params.inside_color.mix(&params.outside_color, 0.5);
        let expected_color = vec3(mixed.red, mixed.green, mixed.blue) * 0.85;

        let points = cloud.positions().iter().zip(cloud.colors());
        for (i, (position, color)) in points.enumerate() {
            let angle = i as f32 * FRAC_PI_2;
            let expected = vec3(5.0 * angle.cos(), 0.0, 5.0 * angle.sin());
            assert!(Vec3::from_array(*position).abs_diff_eq(expected, EPSILON));
            assert!(Vec3::from_array(*color).abs_diff_eq(expected_color, EPSILON));
        }
    }

    #[test]
    fn rejects_malformed_parameters() {
        let mut rng = ConstantRng::half();

        let err = generate(&small_params(-1), &mut rng).unwrap_err();
        assert!(matches!(err, CloudError::InvalidArgument { field: "count", .. }));

        let zero_radius = GalaxyParameters {
            radius: 0.0,
            ..default_params()
        };
        let err = generate(&zero_radius, &mut rng).unwrap_err();
        assert!(matches!(err, CloudError::InvalidArgument { field: "radius", .. }));

        let no_arms = GalaxyParameters {
            arms: 0,
            ..default_params()
        };
        assert!(generate(&no_arms, &mut rng).is_err());

        let negative_randomness = GalaxyParameters {
            randomness: -1.0,
            ..default_params()
        };
        assert!(generate(&negative_randomness, &mut rng).is_err());

        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn default_colors_are_linear() {
        let params = GalaxyParameters::default();
        assert_eq!(params.inside_color.red, 1.0);
        // 0x66 in sRGB is well below 0.4 once linearized
        assert!(params.inside_color.green < 0.2);
        assert_eq!(params.outside_color.blue, 1.0);
    }
}
