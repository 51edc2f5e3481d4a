use crate::error::BufferError;
use crate::lattice::parameters::d2q9::Q;

/// Distributions of a single node, rest link at index 0.
pub type Distribution = [f32; Q];

/// Two distribution arenas used ping-pong style.
///
/// The arena selected by `generation` holds the current (pre-collision)
/// distributions, the other one is the staging arena streaming writes into.
pub struct Arenas {
    buffers: [Vec<Distribution>; 2],
    generation: usize,
}

impl Arenas {
    pub fn new(len: usize) -> Self {
        Self {
            buffers: [vec![[0.0; Q]; len], vec![[0.0; Q]; len]],
            generation: 0,
        }
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current distributions.
    pub fn current(&self) -> &[Distribution] {
        &self.buffers[self.generation]
    }

    pub fn current_mut(&mut self) -> &mut [Distribution] {
        &mut self.buffers[self.generation]
    }

    /// Staging distributions, the streaming destination.
    pub fn staging(&self) -> &[Distribution] {
        &self.buffers[self.generation ^ 1]
    }

    pub fn staging_mut(&mut self) -> &mut [Distribution] {
        &mut self.buffers[self.generation ^ 1]
    }

    /// Current (read) and staging (write) arenas borrowed together.
    pub fn split_mut(&mut self) -> (&[Distribution], &mut [Distribution]) {
        let [first, second] = &mut self.buffers;
        match self.generation {
            0 => (first.as_slice(), second.as_mut_slice()),
            _ => (second.as_slice(), first.as_mut_slice()),
        }
    }

    /// Make the staging arena current and clear the new staging arena, so slots that
    /// streaming leaves untouched read as zero on the next tick.
    pub fn rotate(&mut self) {
        self.generation ^= 1;
        fill_buffer(self.staging_mut());
    }
}

/// Per-node simulation state stored as flat vectors (struct of arrays).
pub struct NodeBuffers {
    pub solid: Vec<bool>,
    pub distributions: Arenas,
    pub equilibrium: Vec<Distribution>,
    pub inverse_relaxation: Vec<f32>,
    pub height: Vec<f32>,
    pub velocity: Vec<[f32; 2]>,
    pub force: Vec<[f32; 2]>,
}

impl NodeBuffers {
    /// Allocate buffers for `len` liquid nodes at rest with zero height.
    pub fn new(len: usize) -> Self {
        Self {
            solid: vec![false; len],
            distributions: Arenas::new(len),
            equilibrium: vec![[0.0; Q]; len],
            inverse_relaxation: vec![0.0; len],
            height: vec![0.0; len],
            velocity: vec![[0.0; 2]; len],
            force: vec![[0.0; 2]; len],
        }
    }

    pub fn len(&self) -> usize {
        self.solid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solid.is_empty()
    }

    /// Mark a node solid, clearing its macroscopic state and its rest distribution.
    /// Directional distributions are kept for bounce-back.
    pub fn make_solid(&mut self, index: usize) {
        self.solid[index] = true;
        self.height[index] = 0.0;
        self.velocity[index] = [0.0; 2];
        self.force[index] = [0.0; 2];
        self.inverse_relaxation[index] = 0.0;
        self.distributions.current_mut()[index][0] = 0.0;
    }

    /// Sum of every distribution over liquid nodes in the current arena.
    pub fn liquid_mass(&self) -> f32 {
        self.distributions
            .current()
            .iter()
            .zip(&self.solid)
            .filter(|(_, solid)| !**solid)
            .map(|(distribution, _)| distribution.iter().sum::<f32>())
            .sum()
    }
}

/// Copy `source` into the front of `destination`.
pub fn copy_buffer<T: Copy>(source: &[T], destination: &mut [T]) -> Result<(), BufferError> {
    if destination.len() < source.len() {
        return Err(BufferError::Undersized {
            required: source.len(),
            available: destination.len(),
        });
    }
    destination[..source.len()].copy_from_slice(source);
    Ok(())
}

/// Reset every distribution in `buffer` to zero.
pub fn fill_buffer(buffer: &mut [Distribution]) {
    buffer.fill([0.0; Q]);
}
