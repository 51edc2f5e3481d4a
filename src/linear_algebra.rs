use itertools::izip;

pub trait VectorOps<const D: usize> {
    /// Vector [dot product](https://en.wikipedia.org/wiki/Dot_product).
    fn dot_product(&self, other: &[f32; D]) -> f32;

    /// Euclidean length.
    fn length(&self) -> f32;

    /// Vector multiplied by a scalar.
    fn scale(&self, factor: f32) -> [f32; D];
}

impl<const D: usize> VectorOps<D> for [f32; D] {
    fn dot_product(&self, other: &[f32; D]) -> f32 {
        izip!(self, other).fold(0.0, |acc, (first, second)| acc + first * second)
    }

    fn length(&self) -> f32 {
        self.dot_product(self).sqrt()
    }

    fn scale(&self, factor: f32) -> [f32; D] {
        self.map(|val| val * factor)
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
