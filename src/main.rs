use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use savannah::{Engine, EngineSettings, RunStatus, Scenario, ScenarioLoader};

/// Savannah ecosystem simulator: run a seeded scenario to completion.
#[derive(Parser, Debug)]
#[command(name = "savannah", version, about)]
struct Cli {
    /// Scenario YAML file. Without one the stock savannah setup runs.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the scenario's run length.
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario's RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override how often snapshots are written (0 disables them).
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory snapshot files go under.
    #[arg(long, default_value = "snapshots")]
    snapshot_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut scenario = match &cli.scenario {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("scenario path has no file name")?;
            ScenarioLoader::new(dir)
                .load(name)
                .with_context(|| format!("loading scenario {}", path.display()))?
        }
        None => Scenario::savannah(),
    };
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    if let Some(ticks) = cli.ticks {
        scenario.ticks = Some(ticks);
    }
    if let Some(interval) = cli.snapshot_interval {
        scenario.snapshot_interval_ticks = interval;
    }

    let settings = EngineSettings::from_scenario(&scenario).with_snapshot_dir(&cli.snapshot_dir);
    let ticks = scenario.ticks();

    println!(
        "scenario '{}': {}x{} field, seed {}, {} ticks",
        scenario.name, scenario.field.width, scenario.field.depth, scenario.seed, ticks
    );

    let mut engine = Engine::new(scenario, settings);
    println!("seeded {} actors", engine.world().total_population());

    let outcome = engine.run(ticks)?;

    match outcome.status {
        RunStatus::Completed => println!("run complete after {} ticks", outcome.ticks_run),
        RunStatus::Stopped => println!("run stopped after {} ticks", outcome.ticks_run),
        RunStatus::NonViable => println!(
            "ecosystem no longer viable after {} ticks",
            outcome.ticks_run
        ),
    }

    let snapshot = engine.snapshot();
    println!(
        "final state: hour {}, weather {}, {} infected",
        snapshot.hour, snapshot.weather, snapshot.infected
    );
    for population in &snapshot.populations {
        println!("  {:<12} {}", population.species, population.count);
    }

    Ok(())
}
