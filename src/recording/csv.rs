//! CSV telemetry sink
//!
//! Writes the particle and model rows as `#`-prefixed metadata lines, then a
//! header and one row per motion record:
//!
//! ```csv
//! # odem telemetry, dimension 2
//! # particle,1,12.1,3.2
//! # particle,2,3.2,1
//! # model,100,0.1,-50,50,-50,50
//! time,particle_id,x,y,v_x,v_y,a_x,a_y,f_x,f_y
//! 0.1,1,0.1,5,1,0,0,0,0,0
//! ```
//!
//! Values use Rust's shortest round-trip float formatting, so a row reads back
//! to the exact recorded value.

use std::io::Write;

use super::{MotionRecord, RecorderSink};
use crate::error::{Error, Result};
use crate::simulation::states::{ParticleId, WorldBounds};

const AXES: [&str; 3] = ["x", "y", "z"];

fn axis_name(i: usize) -> String {
    AXES.get(i).map(|s| s.to_string()).unwrap_or_else(|| format!("q{i}"))
}

/// Column header for a `D`-dimensional motion table.
pub fn motion_header(dim: usize) -> String {
    let mut cols = vec!["time".to_string(), "particle_id".to_string()];
    cols.extend((0..dim).map(axis_name));
    for prefix in ["v", "a", "f"] {
        cols.extend((0..dim).map(|i| format!("{prefix}_{}", axis_name(i))));
    }
    cols.join(",")
}

/// Sink writing comma-separated telemetry to any writer.
pub struct CsvRecorder<W: Write> {
    out: W,
    schema_ready: bool,
    header_written: bool,
    next_id: usize,
}

impl<W: Write> CsvRecorder<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            schema_ready: false,
            header_written: false,
            next_id: 0,
        }
    }

    /// Flush and hand back the writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn require_schema(&self) -> Result<()> {
        if self.schema_ready {
            Ok(())
        } else {
            Err(Error::Recorder("schema has not been initialized".into()))
        }
    }
}

impl<W: Write, const D: usize> RecorderSink<D> for CsvRecorder<W> {
    fn init_schema(&mut self) -> Result<()> {
        writeln!(self.out, "# odem telemetry, dimension {}", D)?;
        self.schema_ready = true;
        Ok(())
    }

    fn record_particle(&mut self, mass: f64, radius: f64) -> Result<ParticleId> {
        self.require_schema()?;
        let id = ParticleId::from_index(self.next_id)
            .ok_or_else(|| Error::Recorder("particle ids exhausted".into()))?;
        writeln!(self.out, "# particle,{id},{mass},{radius}")?;
        self.next_id += 1;
        Ok(id)
    }

    fn record_model(&mut self, iters: usize, dt: f64, bounds: &WorldBounds<D>) -> Result<()> {
        self.require_schema()?;
        write!(self.out, "# model,{iters},{dt}")?;
        for i in 0..D {
            write!(self.out, ",{},{}", bounds.min[i], bounds.max[i])?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn record_motion(&mut self, record: &MotionRecord<D>) -> Result<()> {
        self.require_schema()?;
        if !self.header_written {
            writeln!(self.out, "{}", motion_header(D))?;
            self.header_written = true;
        }

        write!(self.out, "{},{}", record.time, record.particle_id)?;
        for vec in [&record.position, &record.velocity, &record.acceleration, &record.force] {
            for c in vec.iter() {
                write!(self.out, ",{c}")?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::Simulation;
    use crate::simulation::params::RunConfig;
    use crate::simulation::states::{NVec2, NVec3, Particle, ParticleSet};

    /// Writer whose every write fails, like a closed pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("pipe closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn header_matches_dimension() {
        assert_eq!(motion_header(2), "time,particle_id,x,y,v_x,v_y,a_x,a_y,f_x,f_y");
        assert_eq!(
            motion_header(3),
            "time,particle_id,x,y,z,v_x,v_y,v_z,a_x,a_y,a_z,f_x,f_y,f_z"
        );
    }

    #[test]
    fn writes_metadata_then_rows() -> Result<()> {
        let mut rec = CsvRecorder::new(Vec::<u8>::new());
        let bounds = WorldBounds::new(NVec2::new(-1.0, -2.0), NVec2::new(1.0, 2.0))?;
        RecorderSink::<2>::init_schema(&mut rec)?;
        let id = RecorderSink::<2>::record_particle(&mut rec, 12.1, 3.2)?;
        rec.record_model(3, 0.5, &bounds)?;
        rec.record_motion(&MotionRecord {
            time: 0.5,
            particle_id: id,
            position: NVec2::new(1.5, -0.25),
            velocity: NVec2::new(1.0, 0.0),
            acceleration: NVec2::new(0.0, 2.0),
            force: NVec2::new(0.0, 24.2),
        })?;

        let text = String::from_utf8(rec.into_inner()?).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# odem telemetry, dimension 2");
        assert_eq!(lines[1], "# particle,1,12.1,3.2");
        assert_eq!(lines[2], "# model,3,0.5,-1,1,-2,2");
        assert_eq!(lines[3], motion_header(2));
        assert_eq!(lines[4], "0.5,1,1.5,-0.25,1,0,0,2,0,24.2");
        assert_eq!(lines.len(), 5);
        Ok(())
    }

    #[test]
    fn header_written_once() -> Result<()> {
        let mut rec = CsvRecorder::new(Vec::<u8>::new());
        RecorderSink::<3>::init_schema(&mut rec)?;
        let record = MotionRecord {
            time: 1.0,
            particle_id: ParticleId(1),
            position: NVec3::zeros(),
            velocity: NVec3::zeros(),
            acceleration: NVec3::zeros(),
            force: NVec3::zeros(),
        };
        rec.record_motion(&record)?;
        rec.record_motion(&record)?;
        let text = String::from_utf8(rec.into_inner()?).unwrap();
        assert_eq!(text.matches("particle_id").count(), 1);
        assert_eq!(text.lines().count(), 4);
        Ok(())
    }

    #[test]
    fn write_failures_surface_as_io_errors() -> Result<()> {
        let particles = ParticleSet::new(vec![Particle::new(1.0, 0.5, NVec2::zeros(), NVec2::zeros())?]);
        let bounds = WorldBounds::new(NVec2::new(-5.0, -5.0), NVec2::new(5.0, 5.0))?;
        let mut sim = Simulation::new(particles, RunConfig::new(2, 0.1, bounds, 10.0)?);
        let mut rec = CsvRecorder::new(ClosedPipe);

        let err = sim.run(&mut rec).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
        Ok(())
    }

    #[test]
    fn motion_before_schema_is_rejected() {
        let mut rec = CsvRecorder::new(Vec::<u8>::new());
        let record = MotionRecord {
            time: 1.0,
            particle_id: ParticleId(1),
            position: NVec2::zeros(),
            velocity: NVec2::zeros(),
            acceleration: NVec2::zeros(),
            force: NVec2::zeros(),
        };
        assert!(matches!(rec.record_motion(&record), Err(Error::Recorder(_))));
    }
}
