//! Core state types for the contact simulation.
//!
//! Defines the particle and its ordered container, generic over the
//! spatial dimension `D` (2 or 3):
//! - `Particle<D>`    mass, radius, position and velocity
//! - `ParticleSet<D>` insertion-ordered particles with stable 1-based ids
//! - `WorldBounds<D>` the axis-aligned box particles are softly confined to

use std::fmt;

use nalgebra::SVector;

use crate::error::{Error, Result};

pub type NVec<const D: usize> = SVector<f64, D>;
pub type NVec2 = NVec<2>;
pub type NVec3 = NVec<3>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle<const D: usize> {
    pub x: NVec<D>, // position of the centroid
    pub v: NVec<D>, // velocity
    pub m: f64, // mass
    pub radius: f64, // radius
}

impl<const D: usize> Particle<D> {
    /// Create a particle after validating its invariants.
    ///
    /// Errors with `Error::InvalidParticle` if the mass is not finite and
    /// strictly positive, the radius is negative or not finite, or any
    /// position/velocity component is NaN or infinite.
    pub fn new(m: f64, radius: f64, x: NVec<D>, v: NVec<D>) -> Result<Self> {
        if !m.is_finite() || m <= 0.0 {
            return Err(Error::InvalidParticle(format!("mass must be finite and > 0, got {m}")));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidParticle(format!(
                "radius must be finite and >= 0, got {radius}"
            )));
        }
        if !x.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidParticle("position must be finite".into()));
        }
        if !v.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidParticle("velocity must be finite".into()));
        }
        Ok(Self { x, v, m, radius })
    }
}

/// 1-based particle identifier, fixed by insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u32);

impl ParticleId {
    /// Id of the particle stored at `index` in a `ParticleSet`, if it fits in a `u32`.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok()?.checked_add(1).map(ParticleId)
    }

    /// Position of this particle in its `ParticleSet`. `None` for id 0.
    #[inline]
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered collection of particles.
///
/// The order is fixed at construction: no insertion or removal afterwards,
/// so pairwise enumeration and id assignment stay stable for a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSet<const D: usize> {
    particles: Vec<Particle<D>>,
}

impl<const D: usize> ParticleSet<D> {
    pub fn new(particles: Vec<Particle<D>>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle<D>> {
        id.index().and_then(|i| self.particles.get(i))
    }

    pub fn as_slice(&self) -> &[Particle<D>] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle<D>> {
        self.particles.iter()
    }

    /// Particles paired with their ids, in set order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (ParticleId, &Particle<D>)> + '_ {
        (1..=u32::MAX).map(ParticleId).zip(self.particles.iter())
    }

    /// Copy of every velocity, in set order.
    pub fn velocities(&self) -> Vec<NVec<D>> {
        self.particles.iter().map(|p| p.v).collect()
    }

    pub fn positions(&self) -> Vec<NVec<D>> {
        self.particles.iter().map(|p| p.x).collect()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle<D>> {
        self.particles.iter_mut()
    }

    /// Mutable access to two distinct particles, `i < j`.
    pub(crate) fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Particle<D>, &mut Particle<D>) {
        debug_assert!(i < j);
        let (head, tail) = self.particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    }
}

impl<'a, const D: usize> IntoIterator for &'a ParticleSet<D> {
    type Item = &'a Particle<D>;
    type IntoIter = std::slice::Iter<'a, Particle<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

/// Axis-aligned box `[min[i], max[i]]` per dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds<const D: usize> {
    pub min: NVec<D>,
    pub max: NVec<D>,
}

impl<const D: usize> WorldBounds<D> {
    /// Build bounds, requiring finite `min[i] < max[i]` on every axis.
    pub fn new(min: NVec<D>, max: NVec<D>) -> Result<Self> {
        for i in 0..D {
            if !min[i].is_finite() || !max[i].is_finite() {
                return Err(Error::InvalidParam(format!("bounds on axis {i} must be finite")));
            }
            if min[i] >= max[i] {
                return Err(Error::InvalidParam(format!(
                    "bounds on axis {i} must satisfy min < max, got [{}, {}]",
                    min[i], max[i]
                )));
            }
        }
        Ok(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p2(m: f64, radius: f64, x: [f64; 2]) -> Particle<2> {
        Particle::new(m, radius, NVec2::from(x), NVec2::zeros()).unwrap()
    }

    #[test]
    fn new_particle_ok() -> Result<()> {
        let p = Particle::new(2.0, 0.5, NVec3::new(0.0, 1.0, 2.0), NVec3::new(1.0, 0.0, -1.0))?;
        assert_eq!(p.m, 2.0);
        assert_eq!(p.radius, 0.5);
        assert_eq!(p.x, NVec3::new(0.0, 1.0, 2.0));
        Ok(())
    }

    #[test]
    fn non_positive_mass_rejected() {
        for m in [0.0, -1.0, f64::NAN] {
            let err = Particle::new(m, 1.0, NVec2::zeros(), NVec2::zeros()).unwrap_err();
            assert!(err.to_string().contains("mass"));
        }
    }

    #[test]
    fn zero_radius_allowed_negative_rejected() {
        assert!(Particle::new(1.0, 0.0, NVec2::zeros(), NVec2::zeros()).is_ok());
        let err = Particle::new(1.0, -0.1, NVec2::zeros(), NVec2::zeros()).unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn non_finite_state_rejected() {
        let err = Particle::new(1.0, 1.0, NVec2::new(f64::INFINITY, 0.0), NVec2::zeros()).unwrap_err();
        assert!(err.to_string().contains("position"));
    }

    #[test]
    fn ids_follow_insertion_order() {
        let set = ParticleSet::new(vec![p2(1.0, 1.0, [0.0, 0.0]), p2(2.0, 1.0, [5.0, 0.0]), p2(3.0, 1.0, [9.0, 0.0])]);
        let ids: Vec<u32> = set.iter_with_ids().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(set.get(ParticleId(2)).map(|p| p.m), Some(2.0));
        assert_eq!(ParticleId(3).index(), Some(2));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let set = ParticleSet::new(vec![p2(1.0, 1.0, [0.0, 0.0]), p2(2.0, 1.0, [5.0, 0.0])]);
        assert!(set.get(ParticleId(0)).is_none());
        assert!(set.get(ParticleId(3)).is_none());
        assert!(set.get(ParticleId(u32::MAX)).is_none());
        assert_eq!(ParticleId(0).index(), None);
    }

    #[test]
    fn from_index_rejects_ids_past_u32() {
        assert_eq!(ParticleId::from_index(0), Some(ParticleId(1)));
        assert_eq!(ParticleId::from_index(u32::MAX as usize - 1), Some(ParticleId(u32::MAX)));
        assert_eq!(ParticleId::from_index(u32::MAX as usize), None);
    }

    #[test]
    fn pair_mut_returns_requested_particles() {
        let mut set = ParticleSet::new(vec![p2(1.0, 1.0, [0.0, 0.0]), p2(2.0, 1.0, [5.0, 0.0]), p2(3.0, 1.0, [9.0, 0.0])]);
        let (a, b) = set.pair_mut(0, 2);
        assert_eq!((a.m, b.m), (1.0, 3.0));
    }

    #[test]
    fn bounds_require_min_below_max() {
        assert!(WorldBounds::new(NVec2::new(0.0, 0.0), NVec2::new(1.0, 1.0)).is_ok());
        assert!(WorldBounds::new(NVec2::new(0.0, 1.0), NVec2::new(1.0, 1.0)).is_err());
    }
}
