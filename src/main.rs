use pmsim::{ScenarioConfig, Simulation};
use pmsim::{compare_damping_seeded, bench_step_curve, CompareParams};
use pmsim::{Range, ShotType, Vector3};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pmsim", version, about = "Point-mass particle simulation")]
struct Args {
    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario file from `scenarios/` to its end time
    Run {
        #[arg(short, default_value = "test_file.yaml")]
        file_name: String,
    },

    /// Compare per-frame and exponential damping over random frame times
    Compare {
        #[arg(long, default_value = "5.0")]
        duration: f64,
        #[arg(long, default_value = "0.01")]
        min_frame: f64,
        #[arg(long, default_value = "0.03")]
        max_frame: f64,
        #[arg(long, default_value = "1")]
        runs: usize,
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Fire ballistic rounds on a headless range
    Ballistic {
        #[arg(long, value_enum, default_value = "pistol")]
        shot: ShotType,
        #[arg(long, default_value = "16")]
        rounds: usize,
        /// Frame duration in seconds
        #[arg(long, default_value = "0.016")]
        frame: f64,
    },

    /// Time accumulate + integrate for growing particle counts
    Bench,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;
    Ok(scenario_cfg)
}

fn run_scenario(file_name: &str) -> Result<()> {
    let scenario_cfg = load_scenario_from_yaml(file_name)?;
    let mut sim = Simulation::build_scenario(scenario_cfg)?;

    let frames = sim.run()?;
    info!(frames, t = sim.t, "scenario finished");

    for (handle, p) in sim.particles.iter() {
        info!(
            ?handle,
            position = %p.position,
            velocity = %p.velocity,
            kinetic_energy = p.kinetic_energy(),
            "final state"
        );
    }
    Ok(())
}

fn run_ballistic(shot: ShotType, rounds: usize, frame: f64) -> Result<()> {
    anyhow::ensure!(frame > 0.0, "frame duration must be positive, got {frame}");
    let mut range = Range::new(rounds);

    // one shot every quarter second until the pool is full, then let them land
    let mut since_last = f64::INFINITY;
    while range.t < 10.0 {
        if since_last >= 0.25 {
            if !range.fire(shot) {
                warn!("no free round slots");
            }
            since_last = 0.0;
        }
        range.update(frame)?;
        since_last += frame;
    }

    let furthest = range
        .live()
        .map(|r| r.particle.position)
        .fold(Vector3::ZERO, |acc, p| if p.z() > acc.z() { p } else { acc });
    info!(live = range.live().count(), furthest = %furthest, "range closed");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command.unwrap_or(Commands::Run { file_name: "test_file.yaml".into() }) {
        Commands::Run { file_name } => run_scenario(&file_name)?,
        Commands::Compare { duration, min_frame, max_frame, runs, seed } => {
            let params = CompareParams {
                duration,
                min_frame,
                max_frame,
                runs,
                ..CompareParams::default()
            };
            let report = compare_damping_seeded(&params, seed)?;
            println!("{:#?}", report);
        }
        Commands::Ballistic { shot, rounds, frame } => run_ballistic(shot, rounds, frame)?,
        Commands::Bench => bench_step_curve()?,
    }

    Ok(())
}
