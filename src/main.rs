use chargesim::{ScenarioConfig, Scenario, Trajectory};
use chargesim::bench_integrate;

use clap::Parser;
use anyhow::{Context, Result};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file name under `scenarios/`
    #[arg(short, default_value = "scenario_a.yaml")]
    file_name: String,

    /// Dump every sample as `t,x,y,z,vx,vy,vz`
    #[arg(long)]
    print: bool,

    /// Run the timing sweep instead of a scenario
    #[arg(long)]
    bench: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open {}", config_path.display()))?;
    let scenario_cfg = ScenarioConfig::from_reader(file)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn print_trajectory(index: usize, traj: &Trajectory) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "# particle {index}")?;
    writeln!(out, "t,x,y,z,vx,vy,vz")?;
    for s in traj {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            s.t, s.position.x, s.position.y, s.position.z, s.velocity.x, s.velocity.y, s.velocity.z
        )?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.bench {
        bench_integrate();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;

    tracing::info!(
        file = %args.file_name,
        particles = scenario.particles.len(),
        t_end = scenario.parameters.t_end,
        dt = scenario.parameters.dt,
        "running scenario"
    );

    let mut failures = 0;
    for (i, result) in scenario.run().into_iter().enumerate() {
        match result {
            Ok(traj) => {
                if let Some(end) = traj.last() {
                    tracing::info!(
                        particle = i,
                        samples = traj.len(),
                        t = end.t,
                        position = ?end.position.as_slice(),
                        velocity = ?end.velocity.as_slice(),
                        "trajectory complete"
                    );
                }
                if args.print {
                    print_trajectory(i, &traj)?;
                }
            }
            Err(e) => {
                failures += 1;
                tracing::error!(particle = i, error = %e, "trajectory failed");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} runs failed", scenario.particles.len());
    }

    Ok(())
}
