//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! consumed by the integrator:
//! - numerical parameters (`Parameters`)
//! - magnetic field and fixed partner charge
//! - the particles to integrate, each validated at construction

use thiserror::Error;
use tracing::debug;

use crate::configuration::config::{ParticleConfig, ScenarioConfig};
use crate::simulation::forces::{ForceError, ForceSet};
use crate::simulation::integrator::{integrate_batch, IntegrationError};
use crate::simulation::params::{FieldEnvironment, InteractionPartner, Parameters};
use crate::simulation::states::{NVec3, Particle, Trajectory};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("scenario defines no particles")]
    NoParticles,

    #[error("particle {index}: {source}")]
    Particle {
        index: usize,
        #[source]
        source: ForceError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub parameters: Parameters,
    pub field: FieldEnvironment,
    pub partner: InteractionPartner,
    pub particles: Vec<Particle>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        if cfg.particles.is_empty() {
            return Err(ScenarioError::NoParticles);
        }

        // Particles: map `ParticleConfig` -> runtime `Particle` using nalgebra vectors
        let particles = cfg
            .particles
            .iter()
            .enumerate()
            .map(|(index, pc): (usize, &ParticleConfig)| {
                Particle::new(NVec3::from(pc.position), NVec3::from(pc.velocity), pc.mass, pc.charge)
                    .map_err(|source| ScenarioError::Particle { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let parameters = Parameters {
            t_end: cfg.parameters.t_end,
            dt: cfg.parameters.dt,
            k: cfg.parameters.k,
        };

        let field = FieldEnvironment::new(NVec3::from(cfg.field.b));
        let partner = InteractionPartner::new(cfg.partner.charge, NVec3::from(cfg.partner.position));

        debug!(particles = particles.len(), "scenario built");

        Ok(Self {
            parameters,
            field,
            partner,
            particles,
        })
    }

    /// Force set for this scenario's environment
    pub fn forces(&self) -> ForceSet {
        ForceSet::lorentz_coulomb(self.field, self.partner, self.parameters.k)
    }

    /// Integrate every particle independently, in input order
    pub fn run(&self) -> Vec<Result<Trajectory, IntegrationError>> {
        integrate_batch(&self.particles, &self.field, &self.partner, &self.parameters)
    }
}
