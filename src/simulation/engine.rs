//! Simulation driver
//!
//! Owns the particle set for one run and sequences every iteration:
//! move, resolve contacts, advance time, derive telemetry, record.
//! A driver runs exactly once: `Idle -> Running -> Completed`.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::recording::{MotionRecord, RecorderSink};
use crate::simulation::forces::{ContactModel, SpringContact};
use crate::simulation::integrator::contact_step;
use crate::simulation::params::RunConfig;
use crate::simulation::states::{NVec, ParticleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub iterations: usize, // iterations performed
    pub final_time: f64, // simulated time at the end
    pub collisions: usize, // sum of the per-iteration collision reports
    pub elapsed: Duration, // wall-clock duration of the run
}

#[derive(Debug, Clone)]
pub struct Simulation<const D: usize, M = SpringContact> {
    particles: ParticleSet<D>,
    config: RunConfig<D>,
    contact: M,
    t: f64,
    state: RunState,
}

impl<const D: usize> Simulation<D> {
    /// Driver using spring contact with the configured spring constant.
    pub fn new(particles: ParticleSet<D>, config: RunConfig<D>) -> Self {
        let contact = SpringContact { k: config.k };
        Self::with_model(particles, config, contact)
    }
}

impl<const D: usize, M: ContactModel<D>> Simulation<D, M> {
    pub fn with_model(particles: ParticleSet<D>, config: RunConfig<D>, contact: M) -> Self {
        Self {
            particles,
            config,
            contact,
            t: 0.0,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Simulated time.
    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn particles(&self) -> &ParticleSet<D> {
        &self.particles
    }

    pub fn config(&self) -> &RunConfig<D> {
        &self.config
    }

    /// Perform the whole run, pushing telemetry into `sink`.
    ///
    /// The sink receives the schema, particle and model calls first, then
    /// `particles * iters` motion records, iteration by iteration and in
    /// particle order within each iteration.
    ///
    /// Any sink error ends the run; the driver then stays `Running` and
    /// cannot be run again.
    pub fn run<S>(&mut self, sink: &mut S) -> Result<RunSummary>
    where
        S: RecorderSink<D> + ?Sized,
    {
        if self.state != RunState::Idle {
            return Err(Error::AlreadyRun);
        }
        self.state = RunState::Running;

        let begin = Instant::now();
        log::info!(
            "Starting run: {} particles, {} iterations, dt = {}",
            self.particles.len(),
            self.config.iters,
            self.config.dt
        );

        self.record_setup(sink)?;

        let dt = self.config.dt;
        let mut collisions = 0;
        for i in 0..self.config.iters {
            // Velocities entering the iteration, for the reported acceleration
            let v_before = self.particles.velocities();

            let report = contact_step(&mut self.particles, &self.contact, &self.config.bounds, dt);
            collisions += report.collisions;
            log::debug!("iter: {}, collisions: {}", i, report.collisions);

            self.t += dt;

            self.record_motion(&v_before, sink)?;
        }

        self.state = RunState::Completed;
        let elapsed = begin.elapsed();
        log::info!("Run completed in {} seconds", elapsed.as_secs_f64());

        Ok(RunSummary {
            iterations: self.config.iters,
            final_time: self.t,
            collisions,
            elapsed,
        })
    }

    fn record_setup<S>(&self, sink: &mut S) -> Result<()>
    where
        S: RecorderSink<D> + ?Sized,
    {
        sink.init_schema()?;
        for (expected, p) in self.particles.iter_with_ids() {
            let id = sink.record_particle(p.m, p.radius)?;
            if id != expected {
                return Err(Error::Recorder(format!(
                    "sink assigned id {id} to particle {expected}"
                )));
            }
        }
        sink.record_model(self.config.iters, self.config.dt, &self.config.bounds)
    }

    /// Emit one record per particle: a = (v_after - v_before) / dt, f = m * a.
    fn record_motion<S>(&self, v_before: &[NVec<D>], sink: &mut S) -> Result<()>
    where
        S: RecorderSink<D> + ?Sized,
    {
        let dt = self.config.dt;
        for ((particle_id, p), v0) in self.particles.iter_with_ids().zip(v_before) {
            let acceleration = (p.v - v0) / dt;
            let force = acceleration * p.m;
            sink.record_motion(&MotionRecord {
                time: self.t,
                particle_id,
                position: p.x,
                velocity: p.v,
                acceleration,
                force,
            })?;
        }
        Ok(())
    }
}
