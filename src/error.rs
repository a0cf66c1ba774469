//! Crate-wide error type.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or running a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// A particle violates its construction invariants (mass > 0, radius >= 0, finite state).
    #[error("invalid particle: {0}")]
    InvalidParticle(String),

    /// Invalid run parameter (time step, spring constant, bounds).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A configured vector does not match the compiled dimensionality.
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The recorder sink rejected a call.
    #[error("recorder failure: {0}")]
    Recorder(String),

    /// The driver only runs once.
    #[error("simulation has already been run")]
    AlreadyRun,

    /// Propagated I/O errors from recorder sinks.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
