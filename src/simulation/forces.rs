//! Force / acceleration contributors for a single charged particle
//!
//! Free functions implement the two force laws with every environment input
//! passed explicitly. [`ForceLaw`] and [`ForceSet`] wrap them so a run can be
//! driven by any collection of terms, the same way the integrator consumes
//! them.

use thiserror::Error;

use crate::simulation::params::{FieldEnvironment, InteractionPartner};
use crate::simulation::states::{NVec3, Particle};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForceError {
    #[error("particle at {position:?} coincides with or is too close to the interaction partner; Coulomb force is undefined")]
    DegenerateGeometry { position: NVec3 },

    #[error("invalid particle mass {mass}; mass must be finite and > 0")]
    InvalidMass { mass: f64 },
}

/// Magnetic part of the Lorentz force, `q (v × B)`.
///
/// Zero whenever `v` is parallel to `B` or the particle is neutral.
pub fn magnetic_force(particle: &Particle, field: &FieldEnvironment) -> NVec3 {
    particle.charge * particle.velocity.cross(&field.b)
}

/// Coulomb force exerted on `particle` by `partner`:
/// `k q q2 / r^3 * (x - x2)`.
///
/// Fails with [`ForceError::DegenerateGeometry`] when the separation is zero,
/// not representable, or so small that the force overflows. Very large
/// separations give a force that underflows toward zero instead.
pub fn electric_force(particle: &Particle, partner: &InteractionPartner, k: f64) -> Result<NVec3, ForceError> {
    let degenerate = || ForceError::DegenerateGeometry { position: particle.position };

    // r points from the partner to the particle, so like charges repel along +r
    let r = particle.position - partner.position;

    // Scale by the largest component so |r| never overflows while squaring
    let scale = r.amax();
    if scale == 0.0 || !scale.is_finite() {
        return Err(degenerate());
    }
    let u = r / scale;
    let u_norm = u.norm();
    let dist = scale * u_norm;
    let dir = u / u_norm;

    // k q q2 / |r|^2 along the unit direction
    let coef = k * particle.charge * partner.charge * (dist * dist).recip();
    if !coef.is_finite() {
        return Err(degenerate());
    }

    let force = coef * dir;
    if force.iter().any(|c| !c.is_finite()) {
        return Err(degenerate());
    }
    Ok(force)
}

/// Sum of the magnetic and Coulomb terms
pub fn total_force(
    particle: &Particle,
    field: &FieldEnvironment,
    partner: &InteractionPartner,
    k: f64,
) -> Result<NVec3, ForceError> {
    Ok(magnetic_force(particle, field) + electric_force(particle, partner, k)?)
}

/// Acceleration from the current state, `F_total / m`.
///
/// Always recomputed from `particle.position` and `particle.velocity`;
/// `particle.acceleration` is not consulted.
pub fn acceleration(
    particle: &Particle,
    field: &FieldEnvironment,
    partner: &InteractionPartner,
    k: f64,
) -> Result<NVec3, ForceError> {
    check_mass(particle)?;
    Ok(total_force(particle, field, partner, k)? / particle.mass)
}

/// Mass is set by the caller at construction, so it is re-checked here
pub(crate) fn check_mass(particle: &Particle) -> Result<(), ForceError> {
    if particle.mass.is_finite() && particle.mass > 0.0 {
        Ok(())
    } else {
        Err(ForceError::InvalidMass { mass: particle.mass })
    }
}

/// Trait for force sources acting on a single [`Particle`]
pub trait ForceLaw {
    fn force(&self, particle: &Particle) -> Result<NVec3, ForceError>;
}

/// Uniform magnetic field term
pub struct LorentzForce {
    pub field: FieldEnvironment,
}

impl ForceLaw for LorentzForce {
    fn force(&self, particle: &Particle) -> Result<NVec3, ForceError> {
        Ok(magnetic_force(particle, &self.field))
    }
}

/// Fixed point-charge term
pub struct CoulombForce {
    pub partner: InteractionPartner,
    pub k: f64, // Coulomb constant
}

impl ForceLaw for CoulombForce {
    fn force(&self, particle: &Particle) -> Result<NVec3, ForceError> {
        electric_force(particle, &self.partner, self.k)
    }
}

/// Collection of force terms.
/// Each term implements [`ForceLaw`] and their contributions are summed
/// into a single force vector
pub struct ForceSet {
    terms: Vec<Box<dyn ForceLaw + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Lorentz + Coulomb, the standard pair for one particle
    pub fn lorentz_coulomb(field: FieldEnvironment, partner: InteractionPartner, k: f64) -> Self {
        Self::new()
            .with(LorentzForce { field })
            .with(CoulombForce { partner, k })
    }

    /// Add a force term
    pub fn with(mut self, term: impl ForceLaw + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of all terms; the first failing term aborts the sum
    pub fn total_force(&self, particle: &Particle) -> Result<NVec3, ForceError> {
        let mut total = NVec3::zeros();
        for term in &self.terms {
            total += term.force(particle)?;
        }
        Ok(total)
    }

    pub fn acceleration(&self, particle: &Particle) -> Result<NVec3, ForceError> {
        check_mass(particle)?;
        Ok(self.total_force(particle)? / particle.mass)
    }
}
