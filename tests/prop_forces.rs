//! Property-based tests for the force model and integrator using proptest.
//!
//! Covers: Lorentz force orthogonality, Coulomb scaling with charge and
//! distance, zero-field free flight, grid sample counts.

use chargesim::simulation::forces::{electric_force, magnetic_force};
use chargesim::simulation::integrator::{integrate, sample_count};
use chargesim::simulation::params::{FieldEnvironment, InteractionPartner, Parameters, COULOMB_K};
use chargesim::simulation::states::{NVec3, Particle};
use proptest::prelude::*;

fn vec3(range: std::ops::Range<f64>) -> impl Strategy<Value = NVec3> {
    (range.clone(), range.clone(), range).prop_map(|(x, y, z)| NVec3::new(x, y, z))
}

fn particle(position: NVec3, velocity: NVec3, charge: f64) -> Particle {
    Particle {
        position,
        velocity,
        acceleration: NVec3::zeros(),
        mass: 1.0,
        charge,
    }
}

// ── Lorentz force ────────────────────────────────────────────────────

proptest! {
    /// The magnetic force is perpendicular to the velocity.
    #[test]
    fn magnetic_force_orthogonal_to_velocity(
        v in vec3(-1.0e3..1.0e3),
        b in vec3(-10.0..10.0),
        q in -5.0f64..5.0,
    ) {
        let p = particle(NVec3::zeros(), v, q);
        let f = magnetic_force(&p, &FieldEnvironment::new(b));
        let scale = (q.abs() * v.norm() * b.norm() * v.norm()).max(1.0);
        prop_assert!(f.dot(&v).abs() <= 1e-12 * scale);
    }

    /// Lorentz force stays orthogonal along an integrated trajectory.
    #[test]
    fn magnetic_force_orthogonal_on_every_sample(
        v in vec3(-5.0..5.0),
        b in vec3(-2.0..2.0),
    ) {
        let p = particle(NVec3::new(50.0, 0.0, 0.0), v, 1.0);
        let field = FieldEnvironment::new(b);
        let partner = InteractionPartner::new(0.0, NVec3::new(-1.0e6, 0.0, 0.0));
        let traj = integrate(&p, &field, &partner, &Parameters::new(1.0, 0.01)).unwrap();

        for s in &traj {
            let state = particle(s.position, s.velocity, 1.0);
            let f = magnetic_force(&state, &field);
            let scale = (s.velocity.norm_squared() * b.norm()).max(1.0);
            prop_assert!(f.dot(&s.velocity).abs() <= 1e-12 * scale);
        }
    }
}

// ── Coulomb force ────────────────────────────────────────────────────

proptest! {
    /// Halving one charge halves the force magnitude.
    #[test]
    fn coulomb_linear_in_charge(
        x in vec3(-10.0..10.0),
        q in 0.1f64..10.0,
        q2 in -10.0f64..-0.1,
    ) {
        let partner = InteractionPartner::new(q2, NVec3::new(20.0, 20.0, 20.0));
        let full = electric_force(&particle(x, NVec3::zeros(), q), &partner, COULOMB_K).unwrap();
        let half = electric_force(&particle(x, NVec3::zeros(), q / 2.0), &partner, COULOMB_K).unwrap();

        prop_assert!((2.0 * half.norm() - full.norm()).abs() <= 1e-12 * full.norm());
    }

    /// Magnitude equals k |q q2| / r^2.
    #[test]
    fn coulomb_inverse_square(
        dir in vec3(-1.0..1.0),
        r in 0.1f64..100.0,
        q in -3.0f64..3.0,
        q2 in -3.0f64..3.0,
    ) {
        prop_assume!(dir.norm() > 1e-3);
        let offset = dir.normalize() * r;
        let partner = InteractionPartner::new(q2, NVec3::new(1.0, 2.0, 3.0));
        let p = particle(partner.position + offset, NVec3::zeros(), q);

        let f = electric_force(&p, &partner, COULOMB_K).unwrap();
        let expected = COULOMB_K * (q * q2).abs() / (r * r);
        prop_assert!((f.norm() - expected).abs() <= 1e-9 * expected.max(1.0));
    }
}

// ── Integrator ───────────────────────────────────────────────────────

proptest! {
    /// With no field and a neutral partner the particle coasts.
    #[test]
    fn zero_field_free_flight(
        x0 in vec3(-10.0..10.0),
        v0 in vec3(-10.0..10.0),
        steps in 1usize..200,
    ) {
        let dt = 0.05;
        let params = Parameters::new(steps as f64 * dt, dt);
        let partner = InteractionPartner::new(0.0, NVec3::new(1.0e9, 1.0e9, 1.0e9));
        let traj = integrate(&particle(x0, v0, 1.0), &FieldEnvironment::zero(), &partner, &params).unwrap();

        prop_assert_eq!(traj.len(), steps + 1);
        for (i, s) in traj.iter().enumerate() {
            let expected = x0 + v0 * (i as f64 * dt);
            prop_assert!((s.position - expected).norm() <= 1e-9 * (1.0 + expected.norm()));
        }
    }

    /// Sample count is floor(T/dt) + 1 and the last sample never passes T.
    #[test]
    fn grid_count_matches_floor(
        steps in 1usize..500,
        frac in 0.0f64..0.99,
        dt in 1.0e-3f64..1.0,
    ) {
        let t_end = (steps as f64 + frac) * dt;
        let n = sample_count(&Parameters::new(t_end, dt)).unwrap();
        prop_assert_eq!(n, steps + 1);
        prop_assert!((n - 1) as f64 * dt <= t_end * (1.0 + 1e-12));
    }
}
