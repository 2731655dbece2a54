//! Core state types for the charged-particle simulation.
//!
//! - `Particle`   fixed mass/charge plus kinematic state
//! - `Sample`     one `(t, position, velocity)` grid point
//! - `Trajectory` the ordered, read-only output of an integration run

use nalgebra::Vector3;

use super::forces::ForceError;

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: NVec3, // position
    pub velocity: NVec3, // velocity
    pub acceleration: NVec3, // recorded initial acceleration, never read by the force model or integrator
    pub mass: f64, // mass, must be > 0
    pub charge: f64, // charge, any sign
}

impl Particle {
    /// Build a particle with zero recorded acceleration, rejecting non-positive
    /// or non-finite mass.
    pub fn new(position: NVec3, velocity: NVec3, mass: f64, charge: f64) -> Result<Self, ForceError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ForceError::InvalidMass { mass });
        }
        Ok(Self {
            position,
            velocity,
            acceleration: NVec3::zeros(),
            mass,
            charge,
        })
    }

    /// Set the recorded initial acceleration
    pub fn with_acceleration(mut self, acceleration: NVec3) -> Self {
        self.acceleration = acceleration;
        self
    }
}

/// One grid point of a trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64, // time
    pub position: NVec3, // position at t
    pub velocity: NVec3, // velocity at t
}

/// Ordered samples produced by the integrator.
///
/// Samples are only reachable through shared references, so a trajectory
/// handed to a consumer cannot be altered.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub(crate) fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Sample> {
        self.samples.get(i)
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Endpoint of the run
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.t)
    }

    pub fn positions(&self) -> impl Iterator<Item = NVec3> + '_ {
        self.samples.iter().map(|s| s.position)
    }

    pub fn velocities(&self) -> impl Iterator<Item = NVec3> + '_ {
        self.samples.iter().map(|s| s.velocity)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
