//! Contact force laws for the simulator
//!
//! Two spring laws, both pure functions of the current positions and radii:
//! - particle-particle overlap (`pairwise_force`)
//! - particle-boundary overlap (`boundary_force`)
//!
//! `ContactModel` is the seam the integrator calls through; `SpringContact`
//! binds both laws to one spring constant.

use crate::simulation::states::{NVec, Particle, WorldBounds};

/// Result of evaluating a contact law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact<const D: usize> {
    pub force: NVec<D>, // force on the (first) particle
    pub collided: bool, // whether the law registered an overlap
}

impl<const D: usize> Contact<D> {
    pub fn none() -> Self {
        Self {
            force: NVec::<D>::zeros(),
            collided: false,
        }
    }
}

/// Signed surface gap between two particles; negative means they overlap.
#[inline]
pub fn gap<const D: usize>(a: &Particle<D>, b: &Particle<D>) -> f64 {
    (a.x - b.x).norm() - a.radius - b.radius
}

/// Unit vector pointing from `a` toward `b`.
///
/// Coincident centroids give the zero vector instead of NaNs.
#[inline]
pub fn unit_normal<const D: usize>(a: &Particle<D>, b: &Particle<D>) -> NVec<D> {
    let e = b.x - a.x;
    let norm = e.norm();
    if norm != 0.0 {
        e / norm
    } else {
        e
    }
}

/// Spring force on `a` from overlapping `b`.
///
/// With `gap < 0` the force is `e * gap * k`, `e` pointing from `a` to `b`;
/// since the gap is negative the force pushes `a` away from `b`.
/// A gap of exactly zero is not a collision.
pub fn pairwise_force<const D: usize>(a: &Particle<D>, b: &Particle<D>, k: f64) -> Contact<D> {
    let delta = gap(a, b);
    if delta < 0.0 {
        Contact {
            force: unit_normal(a, b) * (delta * k),
            collided: true,
        }
    } else {
        Contact::none()
    }
}

/// Spring force pushing `p` back inside `bounds`.
///
/// Each axis is tested against its lower then its upper bound. A violated
/// lower bound gives `-penetration * k` (pushes up), a violated upper bound
/// `+penetration * k` (pushes down); if both are violated the upper one
/// overwrites the lower one. Untouched axes get exactly zero.
pub fn boundary_force<const D: usize>(p: &Particle<D>, bounds: &WorldBounds<D>, k: f64) -> Contact<D> {
    let mut contact = Contact::none();
    for i in 0..D {
        // lower bound
        let delta = p.x[i] - bounds.min[i] - p.radius;
        if delta < 0.0 {
            contact.force[i] = -delta * k;
            contact.collided = true;
        }

        // upper bound
        let delta = bounds.max[i] - p.x[i] - p.radius;
        if delta < 0.0 {
            contact.force[i] = delta * k;
            contact.collided = true;
        }
    }
    contact
}

/// Contact laws evaluated by the integrator each iteration.
pub trait ContactModel<const D: usize> {
    /// Force on `a` due to its overlap with `b`.
    fn pairwise(&self, a: &Particle<D>, b: &Particle<D>) -> Contact<D>;

    /// Force on `p` due to its overlap with the world bounds.
    fn boundary(&self, p: &Particle<D>, bounds: &WorldBounds<D>) -> Contact<D>;
}

/// Linear spring contact with a single spring constant for both laws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringContact {
    pub k: f64, // spring constant
}

impl<const D: usize> ContactModel<D> for SpringContact {
    fn pairwise(&self, a: &Particle<D>, b: &Particle<D>) -> Contact<D> {
        pairwise_force(a, b, self.k)
    }

    fn boundary(&self, p: &Particle<D>, bounds: &WorldBounds<D>) -> Contact<D> {
        boundary_force(p, bounds, self.k)
    }
}
