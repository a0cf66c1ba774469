//! Run parameters for the simulation
//!
//! `RunConfig` holds the settings fixed before a run starts:
//! - iteration count and time step,
//! - world bounds,
//! - spring constant of the contact laws

use crate::error::{Error, Result};
use crate::simulation::states::WorldBounds;

/// Spring constant used when a scenario does not set one.
pub const DEFAULT_SPRING_CONSTANT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig<const D: usize> {
    pub iters: usize, // number of iterations
    pub dt: f64, // time step
    pub bounds: WorldBounds<D>, // confining box
    pub k: f64, // spring constant
}

impl<const D: usize> RunConfig<D> {
    /// Validate and build a run configuration.
    ///
    /// `dt` must be finite and > 0 (telemetry divides by it), `k` finite and >= 0.
    pub fn new(iters: usize, dt: f64, bounds: WorldBounds<D>, k: f64) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidParam(format!("dt must be finite and > 0, got {dt}")));
        }
        if !k.is_finite() || k < 0.0 {
            return Err(Error::InvalidParam(format!(
                "spring constant must be finite and >= 0, got {k}"
            )));
        }
        Ok(Self { iters, dt, bounds, k })
    }
}
