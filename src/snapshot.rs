use crate::error::BufferError;
use crate::lattice::Lattice;
use crate::node::{copy_buffer, NodeBuffers};
use crate::sampling;

/// Read-only copy of the macroscopic fields published after each completed tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    width: usize,
    height: usize,
    max_height: f32,
    max_speed: f32,
    generation: u64,
    heights: Vec<f32>,
    velocities: Vec<[f32; 2]>,
    solids: Vec<bool>,
    forces: Vec<[f32; 2]>,
}

impl Snapshot {
    pub fn new(lattice: &Lattice) -> Self {
        let len = lattice.len();
        Self {
            width: lattice.width(),
            height: lattice.height(),
            max_height: lattice.max_height(),
            max_speed: lattice.max_speed(),
            generation: 0,
            heights: vec![0.0; len],
            velocities: vec![[0.0; 2]; len],
            solids: vec![false; len],
            forces: vec![[0.0; 2]; len],
        }
    }

    /// Copy the fields out of `nodes`.
    pub(crate) fn publish(&mut self, nodes: &NodeBuffers, generation: u64) -> Result<(), BufferError> {
        copy_buffer(&nodes.height, &mut self.heights)?;
        copy_buffer(&nodes.velocity, &mut self.velocities)?;
        copy_buffer(&nodes.solid, &mut self.solids)?;
        copy_buffer(&nodes.force, &mut self.forces)?;
        self.generation = generation;
        Ok(())
    }

    /// Nodes per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Number of completed ticks this snapshot reflects.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn velocities(&self) -> &[[f32; 2]] {
        &self.velocities
    }

    pub fn solids(&self) -> &[bool] {
        &self.solids
    }

    pub fn forces(&self) -> &[[f32; 2]] {
        &self.forces
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn node_height(&self, row: usize, col: usize) -> f32 {
        self.heights[self.index(row, col)]
    }

    pub fn node_velocity(&self, row: usize, col: usize) -> [f32; 2] {
        self.velocities[self.index(row, col)]
    }

    pub fn is_solid(&self, row: usize, col: usize) -> bool {
        self.solids[self.index(row, col)]
    }

    pub fn node_force(&self, row: usize, col: usize) -> [f32; 2] {
        self.forces[self.index(row, col)]
    }

    /// Total height over liquid nodes.
    pub fn liquid_volume(&self) -> f32 {
        self.heights
            .iter()
            .zip(&self.solids)
            .filter(|(_, solid)| !**solid)
            .map(|(h, _)| h)
            .sum()
    }

    fn dimensions(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// Bilinearly interpolated height at `uv`.
    pub fn sample_height(&self, uv: [f32; 2]) -> f32 {
        sampling::sample_scalar(&self.heights, uv, self.dimensions())
    }

    /// Bilinearly interpolated velocity at `uv`.
    pub fn sample_velocity(&self, uv: [f32; 2]) -> [f32; 2] {
        sampling::sample_vector(&self.velocities, uv, self.dimensions())
    }

    /// Bilinearly interpolated solid fraction at `uv`.
    pub fn sample_solid(&self, uv: [f32; 2]) -> f32 {
        sampling::sample_mask(&self.solids, uv, self.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_copies_fields() {
        let lattice = Lattice::new(3, 2, 0.05, 0.016);
        let mut nodes = NodeBuffers::new(lattice.len());
        nodes.height.iter_mut().enumerate().for_each(|(i, h)| *h = i as f32);
        nodes.velocity[4] = [0.5, -0.5];
        nodes.solid[1] = true;

        let mut snapshot = Snapshot::new(&lattice);
        snapshot.publish(&nodes, 7).expect("matching sizes");

        assert_eq!(snapshot.generation(), 7);
        assert_eq!(snapshot.node_height(1, 2), 5.0);
        assert_eq!(snapshot.node_velocity(1, 1), [0.5, -0.5]);
        assert!(snapshot.is_solid(0, 1));
        assert_eq!(snapshot.liquid_volume(), 0.0 + 2.0 + 3.0 + 4.0 + 5.0);
    }

    #[test]
    fn test_publish_rejects_larger_lattice() {
        let mut snapshot = Snapshot::new(&Lattice::new(2, 2, 0.05, 0.016));
        let nodes = NodeBuffers::new(9);
        assert!(snapshot.publish(&nodes, 1).is_err());
    }

    #[test]
    fn test_samples_corners_exactly() {
        let lattice = Lattice::new(3, 3, 0.05, 0.016);
        let mut nodes = NodeBuffers::new(lattice.len());
        nodes.height.iter_mut().enumerate().for_each(|(i, h)| *h = i as f32);
        nodes.solid[8] = true;
        let mut snapshot = Snapshot::new(&lattice);
        snapshot.publish(&nodes, 1).expect("matching sizes");

        assert_eq!(snapshot.sample_height([0.0, 0.0]), 0.0);
        assert_eq!(snapshot.sample_solid([1.0, 1.0]), 1.0);
        assert_eq!(snapshot.sample_solid([0.0, 1.0]), 0.0);
    }
}
