use bevy::prelude::*;
use galaxy_cloud::AxialSpin;

pub struct RotationPlugin;

impl Plugin for RotationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_rotations);
    }
}

/// Spins an entity about the world Y axis
#[derive(Component, Clone, Copy, Debug)]
pub struct Rotating {
    pub spin: AxialSpin,
}

impl Rotating {
    pub fn new(rate: f32) -> Self {
        Self {
            spin: AxialSpin::new(rate),
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.spin.angle())
    }
}

fn advance_rotations(time: Res<Time>, mut query: Query<(&mut Rotating, &mut Transform)>) {
    let delta = time.delta_secs();
    for (mut rotating, mut transform) in &mut query {
        rotating.spin.advance(delta);
        transform.rotation = rotating.rotation();
    }
}
