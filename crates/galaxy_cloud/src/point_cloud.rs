use bevy_math::Vec3;

/// Index-aligned point positions and linear RGB colors.
///
/// Once built a cloud is read-only; consumers copy out of it into whatever
/// buffer layout their renderer needs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl PointCloud {
    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
        }
    }

    pub(crate) fn push(&mut self, position: Vec3, color: Vec3) {
        self.positions.push(position.to_array());
        self.colors.push(color.to_array());
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Positions as a flat buffer, 3 floats per point
    pub fn flat_positions(&self) -> &[f32] {
        self.positions.as_flattened()
    }

    /// Colors as a flat buffer, 3 floats per point
    pub fn flat_colors(&self) -> &[f32] {
        self.colors.as_flattened()
    }
}

impl FromIterator<([f32; 3], [f32; 3])> for PointCloud {
    fn from_iter<I: IntoIterator<Item = ([f32; 3], [f32; 3])>>(iter: I) -> Self {
        let (positions, colors) = iter.into_iter().unzip();
        Self { positions, colors }
    }
}
