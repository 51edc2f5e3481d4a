//! Error types for wasm-lbm-swe.

use thiserror::Error;

/// Configuration mistakes, surfaced when a simulation is constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("inlet y-velocity must be zero for the Zou-He boundary scheme (got {0})")]
    TangentialInletVelocity(f32),

    #[error("lattice must be at least 3x3 nodes (got {width}x{height})")]
    LatticeTooSmall { width: usize, height: usize },

    #[error("{0} must be positive")]
    NonPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("inlet speed {speed} must stay below the lattice maximum {max_speed}")]
    InletTooFast { speed: f32, max_speed: f32 },

    #[error("inlet Froude number {0} must stay below the stability limit")]
    SupercriticalInlet(f32),

    #[error("relaxation time must exceed 0.5 (got {0})")]
    RelaxationTimeTooSmall(f32),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Buffer utility misuse.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("destination holds {available} elements but {required} are required")]
    Undersized { required: usize, available: usize },
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("tick worker finished without returning the simulation state")]
    TickWorkerLost,
}

pub type Result<T> = std::result::Result<T, SimulationError>;
