use crate::linear_algebra::VectorOps;

use super::Object;

/// A round obstacle (circle on the 2D lattice).
pub struct Circular<const D: usize> {
    /// Center.
    center: [f32; D],
    /// Radius squared.
    rxr: f32,
}

impl<const D: usize> Circular<D> {
    /// Create a new `Circular` centered on `center` with radius `r`, in node units.
    pub fn new(center: [f32; D], r: f32) -> Self {
        Self { center, rxr: r * r }
    }
}

impl<const D: usize> Object<D> for Circular<D> {
    fn contains(&self, pos: &[f32; D]) -> bool {
        let offset: [f32; D] = std::array::from_fn(|axis| pos[axis] - self.center[axis]);
        offset.dot_product(&offset) <= self.rxr
    }
}
