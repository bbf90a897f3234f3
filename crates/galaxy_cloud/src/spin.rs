use std::f32::consts::TAU;

/// Rotation about a single axis, advanced once per rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxialSpin {
    /// radians per second
    pub rate: f32,
    angle: f32,
}

impl AxialSpin {
    pub fn new(rate: f32) -> Self {
        Self { rate, angle: 0.0 }
    }

    /// Converts a fixed per-frame increment into a rate, assuming `fps` frames per second
    pub fn from_per_frame(increment: f32, fps: f32) -> Self {
        Self::new(increment * fps)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Moves the spin forward by `delta_secs` and returns the new angle, kept in [0, 2π)
    pub fn advance(&mut self, delta_secs: f32) -> f32 {
        let angle = (self.angle + self.rate * delta_secs).rem_euclid(TAU);
        // tiny negative sums round up to exactly TAU
        self.angle = if angle >= TAU { 0.0 } else { angle };
        self.angle
    }
}
