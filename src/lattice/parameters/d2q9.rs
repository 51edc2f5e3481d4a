/// Number of links for the D2Q9 model (rest link included).
pub const Q: usize = 9;

/// Lattice offsets for the shallow water D2Q9 model.
/// Index for links (counterclockwise from east, rest link at 0):
///     4   3   2
///       \ | /
///     5 — 0 — 1
///       / | \
///     6   7   8
pub const OFFSET: [[isize; 2]; Q] = [
    [0, 0],
    [1, 0],
    [1, 1],
    [0, 1],
    [-1, 1],
    [-1, 0],
    [-1, -1],
    [0, -1],
    [1, -1],
];

/// Link directions. Axis aligned links have unit length, diagonal links are the unit
/// vector scaled by √2 so that every link moves exactly one node per step.
pub const DIRECTION: [[f32; 2]; Q] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [-1.0, 1.0],
    [-1.0, 0.0],
    [-1.0, -1.0],
    [0.0, -1.0],
    [1.0, -1.0],
];

/// Reciprocal link used by bounce-back.
pub const OPPOSITE: [usize; Q] = [0, 5, 6, 7, 8, 1, 2, 3, 4];

/// Whether a link is axis aligned (odd links) rather than diagonal (even links).
pub const fn is_axis_aligned(link: usize) -> bool {
    link % 2 == 1
}
