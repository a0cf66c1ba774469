//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – dimensionality and contact spring constant
//! - [`ParametersConfig`] – iteration count and time step
//! - [`BoundsConfig`]     – the confining box
//! - [`ParticleConfig`]   – initial state for each particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! The two-particle scenario shipped in `scenarios/two_particles.yaml`:
//!
//! ```yaml
//! engine:
//!   dimension: "2d"         # or "3d"
//!   spring_constant: 10.0   # optional, defaults to 10.0
//!
//! parameters:
//!   iters: 100
//!   dt: 0.1
//!
//! bounds:
//!   min: [-50.0, -50.0]
//!   max: [50.0, 50.0]
//!
//! particles:
//!   - m: 12.1
//!     radius: 3.2
//!     x: [0.0, 5.0]
//!     v: [1.0, 0.0]
//!   - m: 3.2
//!     radius: 1.0
//!     x: [5.0, 0.0]
//!     v: [0.0, 1.0]
//! ```
//!
//! Particle order in the file is the particle order of the run: the first
//! entry gets id 1. Vector lengths are checked against the dimension when the
//! scenario is built.

use std::io::Read;

use serde::Deserialize;

use crate::simulation::params::DEFAULT_SPRING_CONSTANT;

/// Spatial dimension of the run
/// `dimension: "2d"` or `dimension: "3d"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionConfig {
    #[serde(rename = "2d")]
    Two,

    #[serde(rename = "3d")]
    Three,
}

fn default_spring_constant() -> f64 {
    DEFAULT_SPRING_CONSTANT
}

/// Engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub dimension: DimensionConfig, // 2D or 3D vectors
    #[serde(default = "default_spring_constant")]
    pub spring_constant: f64, // k for both contact laws
}

/// Run parameters
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub iters: usize, // number of iterations
    pub dt: f64, // time step size
}

/// Per-axis bounds of the world box
#[derive(Deserialize, Debug, Clone)]
pub struct BoundsConfig {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

/// Initial state of a single particle
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub m: f64, // mass
    pub radius: f64, // radius
    pub x: Vec<f64>, // initial centroid position
    pub v: Vec<f64>, // initial velocity
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub bounds: BoundsConfig,
    pub particles: Vec<ParticleConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
