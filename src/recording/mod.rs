//! Telemetry sinks fed by the simulation driver
//!
//! The driver talks to storage only through [`RecorderSink`]: one schema
//! call, one call per particle and one for the model before the run, then one
//! motion record per particle per iteration.

pub mod csv;

pub use self::csv::CsvRecorder;

use crate::error::{Error, Result};
use crate::simulation::states::{NVec, ParticleId, WorldBounds};

/// Kinematic and dynamic state of one particle at the end of one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRecord<const D: usize> {
    pub time: f64, // simulated time after the iteration
    pub particle_id: ParticleId,
    pub position: NVec<D>,
    pub velocity: NVec<D>,
    pub acceleration: NVec<D>, // velocity change over the iteration / dt
    pub force: NVec<D>, // mass * acceleration
}

/// Consumer of per-run and per-step telemetry.
pub trait RecorderSink<const D: usize> {
    /// Prepare storage for particles, the model and motion records.
    fn init_schema(&mut self) -> Result<()>;

    /// Store one particle and return its id; ids start at 1 and follow call order.
    fn record_particle(&mut self, mass: f64, radius: f64) -> Result<ParticleId>;

    /// Store the run configuration.
    fn record_model(&mut self, iters: usize, dt: f64, bounds: &WorldBounds<D>) -> Result<()>;

    /// Store one motion record.
    fn record_motion(&mut self, record: &MotionRecord<D>) -> Result<()>;
}

/// A particle row as stored by [`MemoryRecorder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRow {
    pub id: ParticleId,
    pub mass: f64,
    pub radius: f64,
}

/// A model row as stored by [`MemoryRecorder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRow<const D: usize> {
    pub iters: usize,
    pub dt: f64,
    pub bounds: WorldBounds<D>,
}

/// Sink that keeps everything it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRecorder<const D: usize> {
    pub schema_ready: bool,
    pub particles: Vec<ParticleRow>,
    pub model: Option<ModelRow<D>>,
    pub motion: Vec<MotionRecord<D>>,
}

impl<const D: usize> MemoryRecorder<D> {
    pub fn new() -> Self {
        Self {
            schema_ready: false,
            particles: Vec::new(),
            model: None,
            motion: Vec::new(),
        }
    }

    /// Motion records of one particle, in iteration order.
    pub fn motion_of(&self, id: ParticleId) -> impl Iterator<Item = &MotionRecord<D>> + '_ {
        self.motion.iter().filter(move |r| r.particle_id == id)
    }

    fn require_schema(&self) -> Result<()> {
        if self.schema_ready {
            Ok(())
        } else {
            Err(Error::Recorder("schema has not been initialized".into()))
        }
    }
}

impl<const D: usize> RecorderSink<D> for MemoryRecorder<D> {
    fn init_schema(&mut self) -> Result<()> {
        self.schema_ready = true;
        Ok(())
    }

    fn record_particle(&mut self, mass: f64, radius: f64) -> Result<ParticleId> {
        self.require_schema()?;
        let id = ParticleId::from_index(self.particles.len())
            .ok_or_else(|| Error::Recorder("particle ids exhausted".into()))?;
        self.particles.push(ParticleRow { id, mass, radius });
        Ok(id)
    }

    fn record_model(&mut self, iters: usize, dt: f64, bounds: &WorldBounds<D>) -> Result<()> {
        self.require_schema()?;
        self.model = Some(ModelRow {
            iters,
            dt,
            bounds: *bounds,
        });
        Ok(())
    }

    fn record_motion(&mut self, record: &MotionRecord<D>) -> Result<()> {
        self.require_schema()?;
        self.motion.push(*record);
        Ok(())
    }
}

/// Sink that hands out ids and counts motion records without storing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullRecorder {
    pub particles: usize,
    pub motion_records: usize,
}

impl<const D: usize> RecorderSink<D> for NullRecorder {
    fn init_schema(&mut self) -> Result<()> {
        Ok(())
    }

    fn record_particle(&mut self, _mass: f64, _radius: f64) -> Result<ParticleId> {
        let id = ParticleId::from_index(self.particles)
            .ok_or_else(|| Error::Recorder("particle ids exhausted".into()))?;
        self.particles += 1;
        Ok(id)
    }

    fn record_model(&mut self, _iters: usize, _dt: f64, _bounds: &WorldBounds<D>) -> Result<()> {
        Ok(())
    }

    fn record_motion(&mut self, _record: &MotionRecord<D>) -> Result<()> {
        self.motion_records += 1;
        Ok(())
    }
}
