//! Numerical and physical parameters for the simulation
//!
//! - `Parameters` holds the time horizon, step size and Coulomb constant
//! - `FieldEnvironment` is the uniform magnetic field
//! - `InteractionPartner` is the fixed second charge
//!
//! All three are owned by the caller and passed explicitly to the force
//! model and integrator.

use super::states::NVec3;

/// Coulomb constant in SI units (N·m²/C²)
pub const COULOMB_K: f64 = 9.0e9;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub t_end: f64, // total duration T
    pub dt: f64, // fixed step size
    pub k: f64, // Coulomb constant
}

impl Parameters {
    /// Parameters with the SI Coulomb constant
    pub fn new(t_end: f64, dt: f64) -> Self {
        Self {
            t_end,
            dt,
            k: COULOMB_K,
        }
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }
}

/// Time-invariant magnetic field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEnvironment {
    pub b: NVec3,
}

impl FieldEnvironment {
    pub fn new(b: NVec3) -> Self {
        Self { b }
    }

    pub fn zero() -> Self {
        Self { b: NVec3::zeros() }
    }
}

/// Second point charge, held fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionPartner {
    pub charge: f64, // charge2
    pub position: NVec3, // position2
}

impl InteractionPartner {
    pub fn new(charge: f64, position: NVec3) -> Self {
        Self { charge, position }
    }
}
