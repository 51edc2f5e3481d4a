pub mod circular;

/// Node offsets `[dx, dy]` painted by a cluster brush: the node and its four axis
/// aligned neighbors.
pub const PLUS_BRUSH: [[isize; 2]; 5] = [[0, 0], [1, 0], [0, 1], [-1, 0], [0, -1]];

/// A solid obstacle that can be painted onto the lattice.
///
/// Positions are in node units, `[column, row]`.
pub trait Object<const D: usize> {
    /// Calculate whether the object contains a position.
    fn contains(&self, pos: &[f32; D]) -> bool;
}
