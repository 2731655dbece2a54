use std::time::Instant;
use crate::simulation::states::{Particle, NVec3};
use crate::simulation::params::{Parameters, FieldEnvironment, InteractionPartner};
use crate::simulation::integrator::{integrate, integrate_batch};

/// Helper to build `n` particles on a deterministic ring, no rand needed
fn make_particles(n: usize) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        let position = NVec3::new(
            (i_f * 0.37).sin() * 5.0 + 6.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );

        particles.push(Particle {
            position,
            velocity: NVec3::new(0.0, 1.0, 0.0),
            acceleration: NVec3::zeros(),
            mass: 1.0,
            charge: 1.0e-6,
        });
    }

    particles
}

/// Shared environment: field along z, weak partner at the origin
fn make_environment() -> (FieldEnvironment, InteractionPartner) {
    (
        FieldEnvironment::new(NVec3::new(0.0, 0.0, 1.0)),
        InteractionPartner::new(-1.0e-6, NVec3::zeros()),
    )
}

/// Time `integrate` for shrinking step sizes, then `integrate_batch`
/// for growing batch sizes.
/// Paste output directly into excel to graph
pub fn bench_integrate() {
    let (field, partner) = make_environment();

    println!("samples,single_ms");

    let particle = make_particles(1).remove(0);
    for dt in [1.0e-2, 1.0e-3, 1.0e-4, 1.0e-5] {
        let params = Parameters::new(10.0, dt);

        // Warm-up
        let _ = integrate(&particle, &field, &partner, &params);

        let t0 = Instant::now();
        let samples = match integrate(&particle, &field, &partner, &params) {
            Ok(traj) => traj.len(),
            Err(e) => {
                println!("dt = {dt}: {e}");
                continue;
            }
        };
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{},{:.6}", samples, ms);
    }

    println!("runs,batch_ms,per_run_ms");

    let params = Parameters::new(10.0, 1.0e-3);
    for n in [1, 8, 64, 512] {
        let particles = make_particles(n);

        let t1 = Instant::now();
        let results = integrate_batch(&particles, &field, &partner, &params);
        let ms = t1.elapsed().as_secs_f64() * 1000.0;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            println!("runs = {n}: {failed} aborted");
        }

        println!("{},{:.6},{:.6}", n, ms, ms / n as f64);
    }
}
