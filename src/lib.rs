pub mod error;
pub mod simulation;
pub mod recording;
pub mod configuration;
pub mod benchmark;

pub use error::{Error, Result};
pub use simulation::states::{Particle, ParticleSet, ParticleId, WorldBounds, NVec, NVec2, NVec3};
pub use simulation::params::{RunConfig, DEFAULT_SPRING_CONSTANT};
pub use simulation::forces::{Contact, ContactModel, SpringContact, pairwise_force, boundary_force};
pub use simulation::integrator::{move_particle, accelerate, contact_step, StepReport};
pub use simulation::engine::{Simulation, RunState, RunSummary};
pub use simulation::scenario::Scenario;
pub use recording::{RecorderSink, MotionRecord, MemoryRecorder, NullRecorder, CsvRecorder};
pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, BoundsConfig, ParticleConfig, DimensionConfig};
pub use benchmark::benchmark::{bench_contact_step, bench_run};
