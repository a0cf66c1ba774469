//! Wall-clock timing of the contact step and of full runs
//!
//! Particles are laid out deterministically (no rand needed) inside a
//! fixed box so that a share of them overlap their neighbours.

use std::time::Instant;

use crate::error::Result;
use crate::recording::NullRecorder;
use crate::simulation::engine::Simulation;
use crate::simulation::forces::SpringContact;
use crate::simulation::integrator::contact_step;
use crate::simulation::params::{RunConfig, DEFAULT_SPRING_CONSTANT};
use crate::simulation::states::{NVec3, Particle, ParticleSet, WorldBounds};

const HALF_WIDTH: f64 = 20.0;

/// Helper to build a manual set of `n` particles
pub fn make_particles(n: usize) -> Result<ParticleSet<3>> {
    let mut particles = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec3::new(
            (i_f * 0.37).sin() * 15.0,
            (i_f * 0.13).cos() * 15.0,
            (i_f * 0.07).sin() * 15.0,
        );
        let v = NVec3::new((i_f * 0.11).cos(), (i_f * 0.29).sin(), 0.0);

        particles.push(Particle::new(1.0, 0.3, x, v)?);
    }

    Ok(ParticleSet::new(particles))
}

/// Helper to build the run configuration shared by the benchmarks
pub fn make_config(iters: usize) -> Result<RunConfig<3>> {
    let bounds = WorldBounds::new(
        NVec3::new(-HALF_WIDTH, -HALF_WIDTH, -HALF_WIDTH),
        NVec3::new(HALF_WIDTH, HALF_WIDTH, HALF_WIDTH),
    )?;
    RunConfig::new(iters, 0.001, bounds, DEFAULT_SPRING_CONSTANT)
}

/// Time a single `contact_step` for growing particle counts
pub fn bench_contact_step() -> Result<()> {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let steps = 3;

    for n in ns {
        let mut sys = make_particles(n)?;
        let config = make_config(steps)?;
        let model = SpringContact { k: config.k };

        // Warm up
        contact_step(&mut sys, &model, &config.bounds, config.dt);

        let t0 = Instant::now();
        let mut collisions = 0;
        for _ in 0..steps {
            collisions += contact_step(&mut sys, &model, &config.bounds, config.dt).collisions;
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, step = {per_step:8.6} s, collisions/step = {}", collisions / steps);
    }
    Ok(())
}

/// Time full runs, recorder included, for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_run() -> Result<()> {
    println!("N,iters,total_ms,ms_per_iter");

    for n in (100..=1600).step_by(100) {
        // Fewer iterations for large n to keep runtime reasonable
        let iters = if n <= 400 { 50 } else { 10 };

        let mut sim = Simulation::new(make_particles(n)?, make_config(iters)?);
        let mut sink = NullRecorder::default();
        let summary = sim.run(&mut sink)?;

        let total_ms = summary.elapsed.as_secs_f64() * 1000.0;
        println!("{},{},{:.6},{:.6}", n, iters, total_ms, total_ms / iters as f64);
    }
    Ok(())
}
