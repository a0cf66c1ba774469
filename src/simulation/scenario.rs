//! Build runnable simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario<D>`
//! containing the validated particle set and run configuration, ready to be
//! turned into a `Simulation`.

use crate::configuration::config::{BoundsConfig, ParticleConfig, ScenarioConfig};
use crate::error::{Error, Result};
use crate::simulation::engine::Simulation;
use crate::simulation::params::RunConfig;
use crate::simulation::states::{NVec, Particle, ParticleSet, WorldBounds};

/// Fully-validated run input for a `D`-dimensional simulation.
#[derive(Debug, Clone)]
pub struct Scenario<const D: usize> {
    pub particles: ParticleSet<D>,
    pub config: RunConfig<D>,
}

impl<const D: usize> Scenario<D> {
    /// Convert a deserialized configuration, checking every vector has `D`
    /// components and every particle and parameter is valid.
    ///
    /// The dimension named in the engine section is not consulted here; the
    /// caller picks `D` from it.
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        // Particles: map `ParticleConfig` -> runtime `Particle` using nalgebra vectors
        let particles = cfg
            .particles
            .iter()
            .map(build_particle::<D>)
            .collect::<Result<Vec<_>>>()?;
        log::info!("Loaded {} particles", particles.len());

        let bounds = build_bounds::<D>(&cfg.bounds)?;
        let config = RunConfig::new(
            cfg.parameters.iters,
            cfg.parameters.dt,
            bounds,
            cfg.engine.spring_constant,
        )?;

        Ok(Self {
            particles: ParticleSet::new(particles),
            config,
        })
    }

    pub fn into_simulation(self) -> Simulation<D> {
        Simulation::new(self.particles, self.config)
    }
}

/// Copy a configured vector into a fixed-size one.
pub fn to_vector<const D: usize>(values: &[f64]) -> Result<NVec<D>> {
    if values.len() != D {
        return Err(Error::DimensionMismatch {
            expected: D,
            found: values.len(),
        });
    }
    Ok(NVec::<D>::from_column_slice(values))
}

fn build_particle<const D: usize>(pc: &ParticleConfig) -> Result<Particle<D>> {
    Particle::new(pc.m, pc.radius, to_vector(&pc.x)?, to_vector(&pc.v)?)
}

fn build_bounds<const D: usize>(bc: &BoundsConfig) -> Result<WorldBounds<D>> {
    WorldBounds::new(to_vector(&bc.min)?, to_vector(&bc.max)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec2;

    fn config_text(mass: f64, x: &str) -> String {
        format!(
            r#"
engine:
  dimension: "2d"
  spring_constant: 5.0
parameters:
  iters: 3
  dt: 0.5
bounds:
  min: [0.0, 0.0]
  max: [10.0, 10.0]
particles:
  - {{ m: {mass}, radius: 1.0, x: {x}, v: [0.0, 0.0] }}
"#
        )
    }

    #[test]
    fn builds_2d_scenario() -> Result<()> {
        let cfg = ScenarioConfig::from_yaml_str(&config_text(2.0, "[1.5, 2.5]")).unwrap();
        let scenario = Scenario::<2>::build_scenario(&cfg)?;
        assert_eq!(scenario.particles.len(), 1);
        assert_eq!(scenario.particles.as_slice()[0].x, NVec2::new(1.5, 2.5));
        assert_eq!(scenario.config.k, 5.0);
        assert_eq!(scenario.config.bounds.max, NVec2::new(10.0, 10.0));
        Ok(())
    }

    #[test]
    fn wrong_vector_length_is_a_dimension_mismatch() {
        let cfg = ScenarioConfig::from_yaml_str(&config_text(2.0, "[1.0, 2.0, 3.0]")).unwrap();
        let err = Scenario::<2>::build_scenario(&cfg).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn non_positive_mass_fails_the_build() {
        let cfg = ScenarioConfig::from_yaml_str(&config_text(0.0, "[1.0, 2.0]")).unwrap();
        let err = Scenario::<2>::build_scenario(&cfg).unwrap_err();
        assert!(matches!(err, Error::InvalidParticle(_)));
    }

    #[test]
    fn same_file_in_3d_fails_on_bounds_or_particles() {
        let cfg = ScenarioConfig::from_yaml_str(&config_text(1.0, "[1.0, 2.0]")).unwrap();
        assert!(Scenario::<3>::build_scenario(&cfg).is_err());
    }
}
