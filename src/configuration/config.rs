//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – time horizon, step size and Coulomb constant
//! - [`FieldConfig`]      – the uniform magnetic field
//! - [`PartnerConfig`]    – the fixed second charge
//! - [`ParticleConfig`]   – initial state for each independent particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   t_end: 10.0             # total simulation time
//!   dt: 0.1                 # fixed step size
//!   k: 9.0e9                # optional, defaults to the SI Coulomb constant
//!
//! field:
//!   b: [2.0, 1.0, 5.0]
//!
//! partner:
//!   charge: -1.0
//!   position: [-1.0, 1.0, 2.0]
//!
//! particles:
//!   - position: [3.0, 1.0, 2.0]
//!     velocity: [0.0, 0.0, 0.0]
//!     mass: 10.0
//!     charge: 1.0
//! ```
//!
//! Each particle is integrated on its own; particles never interact.

use serde::Deserialize;

use crate::simulation::params::COULOMB_K;

fn default_k() -> f64 {
    COULOMB_K
}

/// Time grid and force-law constants
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    pub t_end: f64, // total duration
    pub dt: f64,    // step size
    #[serde(default = "default_k")]
    pub k: f64,     // Coulomb constant
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub b: [f64; 3], // magnetic field vector
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PartnerConfig {
    pub charge: f64,
    pub position: [f64; 3],
}

/// Initial state of one particle
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub mass: f64,
    pub charge: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub field: FieldConfig,
    pub partner: PartnerConfig,
    pub particles: Vec<ParticleConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}
