pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Particle, Sample, Trajectory, NVec3};
pub use simulation::params::{Parameters, FieldEnvironment, InteractionPartner, COULOMB_K};
pub use simulation::forces::{magnetic_force, electric_force, total_force, acceleration};
pub use simulation::forces::{ForceError, ForceLaw, ForceSet, LorentzForce, CoulombForce};
pub use simulation::integrator::{integrate, integrate_with, integrate_batch, euler_step, sample_count, IntegrationError};
pub use simulation::scenario::{Scenario, ScenarioError};

pub use configuration::config::{ScenarioConfig, ParametersConfig, FieldConfig, PartnerConfig, ParticleConfig};

pub use benchmark::benchmark::bench_integrate;
