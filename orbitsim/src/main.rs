use orbitsim::{EngineState, ScenarioConfig, Scenario, SimulationEngine, Summary};
use orbitsim::{bench_forces, bench_step_curve};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Headless frame loop for the pairwise-gravity engine
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario YAML; looked up under `scenarios/` when not found as given
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of frames to run
    #[arg(long, default_value_t = 1000)]
    frames: u64,

    /// Log a diagnostics line every K frames (0 = only at the end)
    #[arg(long, default_value_t = 100)]
    report_every: u64,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Force the mass-aware engine regardless of the scenario
    #[arg(long)]
    mass_aware: bool,

    /// Write the final published frame as YAML
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Run the step benchmarks instead of a simulation
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    let mut cfg = match &args.file {
        Some(path) => {
            let path = if path.exists() {
                path.clone()
            } else {
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(path)
            };
            log::info!("loading scenario {}", path.display());
            ScenarioConfig::from_yaml_file(&path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?
        }
        None => ScenarioConfig::default(),
    };

    // CLI overrides land before the bodies are built so file masses survive
    if let Some(seed) = args.seed {
        cfg.simulation.seed = Some(seed);
    }
    if args.mass_aware {
        cfg.simulation.mass_aware = true;
    }
    Scenario::build_scenario(cfg).context("invalid scenario")
}

fn report(engine: &SimulationEngine) {
    let s = Summary::of(engine.bodies(), engine.config().mass_aware);
    match engine.center_of_mass() {
        Some(com) => log::info!(
            "frame {:6} t = {:8.3} com = ({:.4}, {:.4}, {:.4}) ke = {:.6} |p| = {:.3e}",
            engine.frame(),
            engine.time(),
            com.x,
            com.y,
            com.z,
            s.kinetic_energy,
            s.momentum.norm()
        ),
        None => log::info!(
            "frame {:6} t = {:8.3} ke = {:.6} |p| = {:.3e}",
            engine.frame(),
            engine.time(),
            s.kinetic_energy,
            s.momentum.norm()
        ),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_forces();
        bench_step_curve();
        return Ok(());
    }

    let scenario = load_scenario(&args)?;
    let mut engine = scenario.into_engine();
    log::info!(
        "running {} bodies for {} frames (dt = {}, mass_aware = {})",
        engine.bodies().len(),
        args.frames,
        engine.config().time_step,
        engine.config().mass_aware
    );

    for _ in 0..args.frames {
        let ran = engine.step() == EngineState::Running;
        if ran && args.report_every > 0 && engine.frame() % args.report_every == 0 {
            report(&engine);
        }
    }
    report(&engine);

    if let Some(path) = &args.dump {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_yaml::to_writer(BufWriter::new(file), &engine.snapshot())?;
        log::info!("wrote frame {} to {}", engine.frame(), path.display());
    }

    Ok(())
}
