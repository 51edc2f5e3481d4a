//! Lattice Boltzmann shallow water solver on a D2Q9 lattice.
//!
//! A [`Simulation`] owns the solver state and advances it one tick at a time, either
//! on the calling thread ([`Simulation::step`]) or on the rayon pool
//! ([`Simulation::begin_tick`] / [`Simulation::complete_tick`]). Every completed tick
//! publishes a [`Snapshot`] of heights, velocities and the solid mask.

pub mod config;
pub mod error;
pub mod lattice;
pub mod linear_algebra;
pub mod node;
pub mod object;
pub mod sampling;
pub mod simulation;
pub mod snapshot;
pub mod swe;
pub mod wasm;

pub use config::{BoundaryScheme, Config};
pub use error::{BufferError, ConfigError, SimulationError};
pub use lattice::Lattice;
pub use simulation::Simulation;
pub use snapshot::Snapshot;
