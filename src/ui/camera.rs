use crate::prelude::*;
use bevy::{
    core_pipeline::tonemapping::Tonemapping,
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
    transform::TransformSystem,
    window::WindowResized,
};
use bevy_egui::EguiContexts;
use std::f32::consts::{FRAC_PI_2, TAU};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(
                PostUpdate,
                camera_control_system.before(TransformSystem::TransformPropagate),
            )
            .add_systems(Update, log_resize);
    }
}

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    let orbit = OrbitCamera::looking_from(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Tonemapping::None,
        orbit.transform(),
        orbit,
    ));
}

/// Damping applied per frame at the reference frame rate
const DAMPING_FACTOR: f32 = 0.05;
const ROTATE_SENSITIVITY: f32 = 0.005;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 300.0;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
/// Largest share of the zoom buffer spent in a single frame
const MAX_ZOOM_STEP: f32 = 0.5;

/// Orbit controller around a fixed target.
/// Drag input feeds angular velocity that decays over time, and scrolling
/// fills a zoom buffer that drains smoothly into the distance.
#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    smooth_zoom_buffer: f32,
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(MIN_DISTANCE);
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            smooth_zoom_buffer: 0.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let direction = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        self.target + direction * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    pub fn drag(&mut self, delta: Vec2) {
        self.yaw_velocity -= delta.x * ROTATE_SENSITIVITY;
        self.pitch_velocity += delta.y * ROTATE_SENSITIVITY;
    }

    /// Positive scroll zooms in
    pub fn scroll(&mut self, amount: f32) {
        self.smooth_zoom_buffer += amount * 0.1;
    }

    /// Advances the controller by one frame.
    /// `auto_rotate_speed` uses orbit-controls units: 2.0 means one turn every 30 seconds.
    pub fn advance(&mut self, delta_secs: f32, auto_rotate_speed: f32) {
        let frames = delta_secs * REFERENCE_FPS;

        self.yaw = (self.yaw + self.yaw_velocity - auto_rotate_speed * TAU / 60.0 * delta_secs)
            .rem_euclid(TAU);
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let decay = (1.0 - DAMPING_FACTOR).powf(frames);
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;

        // buffer drains a fraction per frame, with a floor so it always empties
        let smooth_zoom_min = 0.001f32;
        let smooth_zoom_factor = (0.2 * frames).min(1.0);
        let smooth_zoom_amount = if self.smooth_zoom_buffer < 0.0 {
            f32::min(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                (-smooth_zoom_min).max(self.smooth_zoom_buffer),
            )
        } else {
            f32::max(
                self.smooth_zoom_buffer * smooth_zoom_factor,
                smooth_zoom_min.min(self.smooth_zoom_buffer),
            )
        }
        .clamp(-MAX_ZOOM_STEP, MAX_ZOOM_STEP);
        self.smooth_zoom_buffer -= smooth_zoom_amount;
        // exponential so a large step never flips the sign of the distance
        self.distance =
            (self.distance * (-smooth_zoom_amount).exp()).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

pub fn camera_control_system(
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    galaxy_config: Res<GalaxyConfig>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
) {
    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };

    // the config panel owns the pointer while it is hovered
    let ui_has_pointer = contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area());

    let drag: Vec2 = motion_evr.read().map(|ev| ev.delta).sum();
    if mouse_buttons.pressed(MouseButton::Left) && !ui_has_pointer {
        orbit.drag(drag);
    }

    for ev in scroll_evr.read() {
        if ui_has_pointer {
            continue;
        }
        match ev.unit {
            MouseScrollUnit::Line => orbit.scroll(ev.y),
            MouseScrollUnit::Pixel => orbit.scroll(ev.y * 0.05),
        }
    }

    let auto_rotate_speed = if galaxy_config.auto_rotate {
        galaxy_config.auto_rotate_speed
    } else {
        0.0
    };
    orbit.advance(time.delta_secs(), auto_rotate_speed);
    *transform = orbit.transform();
}

/// Bevy keeps the projection aspect in sync with the window; this only reports it
fn log_resize(mut resize_evr: EventReader<WindowResized>) {
    for ev in resize_evr.read() {
        debug!("Window resized to {}x{}", ev.width, ev.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn default_orbit() -> OrbitCamera {
        OrbitCamera::looking_from(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO)
    }

    #[test]
    fn starts_at_requested_eye() {
        let orbit = default_orbit();
        assert!(orbit.eye().abs_diff_eq(Vec3::new(0.0, 5.0, 10.0), 1e-4));
        assert!(orbit.transform().forward().dot(-orbit.eye().normalize()) > 0.999);
    }

    #[test]
    fn drag_velocity_is_damped() {
        let mut orbit = default_orbit();
        orbit.drag(Vec2::new(-100.0, 0.0));
        let initial = orbit.yaw_velocity;

        orbit.advance(FRAME, 0.0);
        assert!((orbit.yaw_velocity - initial * 0.95).abs() < 1e-5);

        for _ in 0..600 {
            orbit.advance(FRAME, 0.0);
        }
        assert!(orbit.yaw_velocity.abs() < 1e-6);
        // distance is untouched by rotation
        assert!((orbit.eye().length() - 125f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn auto_rotation_matches_orbit_controls() {
        let mut orbit = default_orbit();
        let start = orbit.yaw;
        for _ in 0..60 {
            orbit.advance(FRAME, 0.2);
        }
        let turned = (start - orbit.yaw).rem_euclid(TAU);
        assert!((turned - TAU / 60.0 * 0.2).abs() < 1e-4);
    }

    #[test]
    fn zoom_drains_smoothly_and_clamps() {
        let mut orbit = default_orbit();
        let start = orbit.distance;
        orbit.scroll(1.0);

        orbit.advance(FRAME, 0.0);
        let after_one = orbit.distance;
        assert!(after_one < start);
        assert!(orbit.smooth_zoom_buffer > 0.0);

        for _ in 0..600 {
            orbit.advance(FRAME, 0.0);
        }
        assert_eq!(orbit.smooth_zoom_buffer, 0.0);
        assert!(orbit.distance < after_one);

        for _ in 0..200 {
            orbit.scroll(-10.0);
            orbit.advance(FRAME, 0.0);
        }
        assert!(orbit.distance <= MAX_DISTANCE);
    }

    #[test]
    fn hard_scroll_zooms_in_over_several_frames() {
        let mut orbit = default_orbit();
        let start = orbit.distance;
        orbit.scroll(50.0);

        // a long hitch frame drains the whole factor but not the whole buffer
        orbit.advance(0.5, 0.0);
        assert!(orbit.distance.is_finite());
        assert!(orbit.distance < start);
        assert!(orbit.distance > MIN_DISTANCE);
        assert!(orbit.smooth_zoom_buffer > 0.0);

        for _ in 0..600 {
            orbit.advance(FRAME, 0.0);
        }
        assert_eq!(orbit.distance, MIN_DISTANCE);
    }

    #[test]
    fn pitch_never_flips_over_the_pole() {
        let mut orbit = default_orbit();
        orbit.drag(Vec2::new(0.0, 10_000.0));
        for _ in 0..120 {
            orbit.advance(FRAME, 0.0);
        }
        assert!(orbit.pitch <= PITCH_LIMIT);
    }
}
