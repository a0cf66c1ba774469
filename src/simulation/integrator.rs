//! Fixed-step semi-implicit Euler integration for the contact system
//!
//! `move_particle` and `accelerate` are the two per-particle mutators;
//! `contact_step` sequences them over a whole `ParticleSet` for one iteration.

use super::forces::ContactModel;
use super::states::{NVec, Particle, ParticleSet, WorldBounds};

/// Advance the position using the current velocity: x += v * dt
#[inline]
pub fn move_particle<const D: usize>(p: &mut Particle<D>, dt: f64) {
    p.x += p.v * dt;
}

/// Advance the velocity with an acceleration: v += a * dt
#[inline]
pub fn accelerate<const D: usize>(p: &mut Particle<D>, dt: f64, accel: &NVec<D>) {
    p.v += accel * dt;
}

/// Per-iteration collision bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Collisions observed this iteration. Boundary contacts are counted first
    /// but the tally is reset before the pairwise pass, so only particle-particle
    /// collisions survive here.
    pub collisions: usize,
}

/// Run the motion and collision part of one iteration.
///
/// 1. every particle moves with the velocity it entered the iteration with
/// 2. boundary contacts accelerate each particle as soon as they are found
/// 3. every unordered pair `(i, j)`, `i < j`, in set order is tested and both
///    particles are accelerated immediately, equal and opposite
///
/// Accelerations are not batched: a later contact in the same iteration sees
/// velocities already changed by earlier ones, while positions stay fixed
/// after step 1.
pub fn contact_step<const D: usize, M>(
    sys: &mut ParticleSet<D>,
    model: &M,
    bounds: &WorldBounds<D>,
    dt: f64,
) -> StepReport
where
    M: ContactModel<D> + ?Sized,
{
    // Drift with the previous iteration's velocities
    for p in sys.iter_mut() {
        move_particle(p, dt);
    }

    let mut collisions = 0;

    // Boundary contacts
    for p in sys.iter_mut() {
        let contact = model.boundary(p, bounds);
        if contact.collided {
            collisions += 1;
            let accel = contact.force / p.m;
            accelerate(p, dt, &accel);
        }
    }

    // Particle contacts
    collisions = 0;
    let n = sys.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = sys.pair_mut(i, j);
            let contact = model.pairwise(a, b);
            if !contact.collided {
                continue;
            }
            collisions += 1;

            let accel_a = contact.force / a.m;
            accelerate(a, dt, &accel_a);

            let accel_b = -contact.force / b.m;
            accelerate(b, dt, &accel_b);
        }
    }

    StepReport { collisions }
}
