//! Fixed-step time integrator for a single charged particle
//!
//! Provides a forward-Euler stepper driven by a [`ForceSet`] and
//! [`Parameters`], plus a rayon-backed batch runner for independent
//! particles sharing one environment.
//!
//! Grid policy: `N = floor(T/dt + GRID_TOL) + 1` samples at `t_i = i * dt`.
//! The last sample is not clipped to `T`. It sits at or before `T`, except
//! when `T/dt` falls within `GRID_TOL` below an integer, where it may pass
//! `T` by at most `GRID_TOL * dt`.

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use super::forces::{check_mass, ForceError, ForceSet};
use super::params::{FieldEnvironment, InteractionPartner, Parameters};
use super::states::{NVec3, Particle, Sample, Trajectory};

/// Absorbs representation error in `T / dt` (e.g. `10.0 / 0.1`)
pub const GRID_TOL: f64 = 1e-9;

/// Largest sample buffer `Vec` can describe
const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<Sample>();

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    #[error("invalid step configuration (t_end = {t_end}, dt = {dt}): {reason}")]
    InvalidStepConfiguration { t_end: f64, dt: f64, reason: &'static str },

    /// `partial` holds the samples computed before the failing step; it is an
    /// incomplete trajectory and never stands in for a finished run.
    #[error("integration aborted at step {step} (t = {time}): {source}")]
    Aborted {
        step: usize,
        time: f64,
        #[source]
        source: ForceError,
        partial: Vec<Sample>,
    },
}

impl IntegrationError {
    /// Samples produced before an abort, if any
    pub fn partial(&self) -> Option<&[Sample]> {
        match self {
            IntegrationError::Aborted { partial, .. } => Some(partial.as_slice()),
            IntegrationError::InvalidStepConfiguration { .. } => None,
        }
    }
}

/// Number of grid points for `params`, after validating `T` and `dt`
pub fn sample_count(params: &Parameters) -> Result<usize, IntegrationError> {
    let (t_end, dt) = (params.t_end, params.dt);
    let invalid = |reason| IntegrationError::InvalidStepConfiguration { t_end, dt, reason };

    if !t_end.is_finite() || t_end <= 0.0 {
        return Err(invalid("t_end must be finite and > 0"));
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(invalid("dt must be finite and > 0"));
    }
    if dt > t_end {
        return Err(invalid("dt must not exceed t_end"));
    }

    let steps = (t_end / dt + GRID_TOL).floor();
    if !steps.is_finite() || steps >= MAX_SAMPLES as f64 {
        return Err(invalid("grid too large"));
    }

    Ok(steps as usize + 1)
}

/// One forward-Euler step with acceleration `a` taken at the start of the step:
/// - v_n+1 = v_n + a_n dt
/// - x_n+1 = x_n + v_n dt + 1/2 a_n dt^2
pub fn euler_step(position: NVec3, velocity: NVec3, a: NVec3, dt: f64) -> (NVec3, NVec3) {
    let next_v = velocity + a * dt;
    let next_x = position + velocity * dt + 0.5 * a * dt * dt;
    (next_x, next_v)
}

/// Integrate `particle` under the Lorentz + Coulomb pair over `[0, params.t_end]`
pub fn integrate(
    particle: &Particle,
    field: &FieldEnvironment,
    partner: &InteractionPartner,
    params: &Parameters,
) -> Result<Trajectory, IntegrationError> {
    let forces = ForceSet::lorentz_coulomb(*field, *partner, params.k);
    integrate_with(particle, &forces, params)
}

/// Integrate `particle` under an arbitrary force set.
///
/// The caller's particle is left untouched. Acceleration comes from the force
/// set at every step; `Particle::acceleration` plays no part in the run.
pub fn integrate_with(particle: &Particle, forces: &ForceSet, params: &Parameters) -> Result<Trajectory, IntegrationError> {
    let n = sample_count(params)?;
    let dt = params.dt;

    // Mass problems surface before any sample is written
    if let Err(source) = check_mass(particle) {
        warn!(step = 0, error = %source, "integration aborted");
        return Err(IntegrationError::Aborted {
            step: 0,
            time: 0.0,
            source,
            partial: Vec::new(),
        });
    }

    debug!(samples = n, dt, t_end = params.t_end, terms = forces.len(), "integration start");

    let mut samples: Vec<Sample> = Vec::new();
    if samples.try_reserve_exact(n).is_err() {
        return Err(IntegrationError::InvalidStepConfiguration {
            t_end: params.t_end,
            dt,
            reason: "grid too large",
        });
    }
    let mut state = particle.clone();
    samples.push(Sample {
        t: 0.0,
        position: state.position,
        velocity: state.velocity,
    });

    // n - 1 steps fill slots 1..n
    for i in 0..n - 1 {
        let t = i as f64 * dt;

        let a = match forces.acceleration(&state) {
            Ok(a) => a,
            Err(source) => {
                warn!(step = i, time = t, error = %source, "integration aborted");
                return Err(IntegrationError::Aborted {
                    step: i,
                    time: t,
                    source,
                    partial: samples,
                });
            }
        };

        let (x, v) = euler_step(state.position, state.velocity, a, dt);
        state.position = x;
        state.velocity = v;

        samples.push(Sample {
            t: (i + 1) as f64 * dt,
            position: x,
            velocity: v,
        });
    }

    debug!(samples = samples.len(), t_final = (n - 1) as f64 * dt, "integration done");
    Ok(Trajectory::from_samples(samples))
}

/// Integrate independent particles in parallel, one run each.
///
/// Particles do not interact; results come back in input order.
pub fn integrate_batch(
    particles: &[Particle],
    field: &FieldEnvironment,
    partner: &InteractionPartner,
    params: &Parameters,
) -> Vec<Result<Trajectory, IntegrationError>> {
    debug!(runs = particles.len(), "batch integration start");
    particles
        .par_iter()
        .map(|p| integrate(p, field, partner, params))
        .collect()
}
