pub mod parameters;

use parameters::d2q9;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.8;

/// Lowest height a liquid node may recover to.
pub const MIN_HEIGHT: f32 = 0.001;

/// Froude number above which recovered velocities are scaled down.
pub const FROUDE_LIMIT: f32 = 0.75;

/// Margin kept below the lattice speed derived bounds.
const BOUND_EPSILON: f32 = 0.001;

/// Immutable lattice geometry shared read-only by every stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
    width: usize,
    height: usize,
    spacing: f32,
    step_time: f32,
    e: f32,
    max_height: f32,
    max_speed: f32,
}

impl Lattice {
    /// Create a `Lattice` of `width` × `height` nodes.
    pub fn new(width: usize, height: usize, spacing: f32, step_time: f32) -> Self {
        let e = spacing / step_time;
        Self {
            width,
            height,
            spacing,
            step_time,
            e,
            max_height: e * e / GRAVITY - BOUND_EPSILON,
            max_speed: e.abs() - BOUND_EPSILON,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn step_time(&self) -> f32 {
        self.step_time
    }

    /// Lattice speed `e = spacing / step_time`.
    pub fn e(&self) -> f32 {
        self.e
    }

    /// Highest height a node may hold, `e²/g − ε`.
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Highest representable speed, `|e| − ε`.
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Flat index for a node.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Scaled link vector `c_i = e · dir_i`.
    #[inline]
    pub fn link_vector(&self, link: usize) -> [f32; 2] {
        d2q9::DIRECTION[link].map(|val| val * self.e)
    }

    /// Node a link points to from (`row`, `col`), wrapping when `periodic`.
    /// `None` when the neighbor falls outside a bounded lattice.
    #[inline]
    pub fn neighbor(&self, row: usize, col: usize, link: usize, periodic: bool) -> Option<usize> {
        let [dx, dy] = d2q9::OFFSET[link];
        let col = Self::offset(col, dx, self.width, periodic)?;
        let row = Self::offset(row, dy, self.height, periodic)?;
        Some(self.index(row, col))
    }

    /// Node a link streams in from, i.e. the neighbor in the reciprocal direction.
    #[inline]
    pub fn upstream(&self, row: usize, col: usize, link: usize, periodic: bool) -> Option<usize> {
        self.neighbor(row, col, d2q9::OPPOSITE[link], periodic)
    }

    fn offset(pos: usize, delta: isize, size: usize, periodic: bool) -> Option<usize> {
        match pos as isize + delta {
            val if val < 0 => periodic.then_some(size - 1),
            val if val >= size as isize => periodic.then_some(0),
            val => Some(val as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::linear_algebra::VectorOps;

    use approx::assert_relative_eq;

    #[test]
    fn test_derived_bounds() {
        let lattice = Lattice::new(8, 6, 0.05, 0.016);
        let e = 0.05 / 0.016;
        assert_relative_eq!(lattice.e(), e, epsilon = 1e-6);
        assert_relative_eq!(lattice.max_height(), e * e / GRAVITY - 0.001, epsilon = 1e-6);
        assert_relative_eq!(lattice.max_speed(), e - 0.001, epsilon = 1e-6);
        assert_eq!(lattice.len(), 48);
    }

    #[test]
    fn test_opposite_links_cancel() {
        for link in 0..d2q9::Q {
            let opposite = d2q9::OPPOSITE[link];
            assert_eq!(d2q9::OPPOSITE[opposite], link);
            let sum = [
                d2q9::OFFSET[link][0] + d2q9::OFFSET[opposite][0],
                d2q9::OFFSET[link][1] + d2q9::OFFSET[opposite][1],
            ];
            assert_eq!(sum, [0, 0], "link {link} and {opposite} are not reciprocal");
        }
    }

    #[test]
    fn test_directions_match_offsets() {
        for link in 1..d2q9::Q {
            let offset = d2q9::OFFSET[link].map(|val| val as f32);
            assert_eq!(offset, d2q9::DIRECTION[link]);
            let expected = if d2q9::is_axis_aligned(link) { 1.0 } else { 2.0 };
            let length_squared = d2q9::DIRECTION[link].dot_product(&d2q9::DIRECTION[link]);
            assert_relative_eq!(length_squared, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_neighbor_bounded_and_periodic() {
        let lattice = Lattice::new(4, 3, 1.0, 1.0);

        // east of the last column
        assert_eq!(lattice.neighbor(1, 3, 1, false), None);
        assert_eq!(lattice.neighbor(1, 3, 1, true), Some(lattice.index(1, 0)));

        // south-west of the origin
        assert_eq!(lattice.neighbor(0, 0, 6, false), None);
        assert_eq!(lattice.neighbor(0, 0, 6, true), Some(lattice.index(2, 3)));

        // interior north-east
        assert_eq!(lattice.neighbor(1, 1, 2, false), Some(lattice.index(2, 2)));

        // upstream of the east link is the west neighbor
        assert_eq!(lattice.upstream(1, 1, 1, false), Some(lattice.index(1, 0)));
    }
}
