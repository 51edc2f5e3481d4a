//! Bilinear sampling of node fields in UV space.
//!
//! UV `(0, 0)` maps to the first node of the first row and `(1, 1)` to the last node
//! of the last row. `dimensions` are `[columns, rows]`.

use crate::linear_algebra::lerp;

/// Clamp each component to `[0, 1]`.
pub fn saturate(val: [f32; 2]) -> [f32; 2] {
    val.map(|val| val.clamp(0.0, 1.0))
}

/// The four node indices surrounding a UV position and the blend weights between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleCoords {
    pub upper_left: usize,
    pub lower_left: usize,
    pub upper_right: usize,
    pub lower_right: usize,
    /// Horizontal and vertical weight of the right and lower nodes.
    pub weights: [f32; 2],
}

/// Half the distance between two nodes in UV space.
pub fn half_texel(dimensions: [usize; 2]) -> [f32; 2] {
    dimensions.map(|val| 0.5 / val as f32)
}

/// Find the nodes and weights for sampling at `uv`.
pub fn linear_sample_coords(uv: [f32; 2], dimensions: [usize; 2], half_texel: [f32; 2]) -> SampleCoords {
    let mut upper_left = [0usize; 2];
    let mut lower_right = [0usize; 2];
    let mut weights = [0.0f32; 2];
    for axis in 0..2 {
        let size = dimensions[axis];
        let last = size.saturating_sub(1);
        // position in node units, node centers at integers
        let position = (uv[axis] - half_texel[axis]) * size as f32;
        upper_left[axis] = (position.clamp(0.0, last as f32).floor() as usize).min(last);
        weights[axis] = (position - upper_left[axis] as f32).clamp(0.0, 1.0);
        lower_right[axis] = (upper_left[axis] + 1).min(last);
    }

    let index = |col: usize, row: usize| row * dimensions[0] + col;
    SampleCoords {
        upper_left: index(upper_left[0], upper_left[1]),
        lower_left: index(upper_left[0], lower_right[1]),
        upper_right: index(lower_right[0], upper_left[1]),
        lower_right: index(lower_right[0], lower_right[1]),
        weights,
    }
}

/// Blend four samples: vertically on each side, then horizontally.
pub fn linear_blend(upper_left: f32, lower_left: f32, upper_right: f32, lower_right: f32, weights: [f32; 2]) -> f32 {
    lerp(
        lerp(upper_left, lower_left, weights[1]),
        lerp(upper_right, lower_right, weights[1]),
        weights[0],
    )
}

/// Sample a scalar field at `uv`.
pub fn sample_scalar(field: &[f32], uv: [f32; 2], dimensions: [usize; 2]) -> f32 {
    let coords = linear_sample_coords(uv, dimensions, half_texel(dimensions));
    linear_blend(
        field[coords.upper_left],
        field[coords.lower_left],
        field[coords.upper_right],
        field[coords.lower_right],
        coords.weights,
    )
}

/// Sample a vector field at `uv`, component by component.
pub fn sample_vector(field: &[[f32; 2]], uv: [f32; 2], dimensions: [usize; 2]) -> [f32; 2] {
    let coords = linear_sample_coords(uv, dimensions, half_texel(dimensions));
    std::array::from_fn(|axis| {
        linear_blend(
            field[coords.upper_left][axis],
            field[coords.lower_left][axis],
            field[coords.upper_right][axis],
            field[coords.lower_right][axis],
            coords.weights,
        )
    })
}

/// Fraction of solid nodes around `uv`, 1 when every blended node is solid.
pub fn sample_mask(mask: &[bool], uv: [f32; 2], dimensions: [usize; 2]) -> f32 {
    let coords = linear_sample_coords(uv, dimensions, half_texel(dimensions));
    let val = |index: usize| if mask[index] { 1.0 } else { 0.0 };
    linear_blend(
        val(coords.upper_left),
        val(coords.lower_left),
        val(coords.upper_right),
        val(coords.lower_right),
        coords.weights,
    )
}

/// Node nearest to `uv` as `(row, col)`.
pub fn nearest_node(uv: [f32; 2], dimensions: [usize; 2]) -> (usize, usize) {
    let [u, v] = saturate(uv);
    let col = (u * dimensions[0].saturating_sub(1) as f32).round() as usize;
    let row = (v * dimensions[1].saturating_sub(1) as f32).round() as usize;
    (
        row.min(dimensions[1].saturating_sub(1)),
        col.min(dimensions[0].saturating_sub(1)),
    )
}
