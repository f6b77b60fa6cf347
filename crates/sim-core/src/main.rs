//! Impostor Simulation CLI
//!
//! Runs one seeded game or a parallel batch of them over a map file.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use sim_core::{
    load_map, run_batch, simulate, write_actions_csv, write_actions_jsonl, write_stats,
    BatchSummary, Config, WorldMap,
};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "impostor_sim")]
#[command(about = "A hidden-role social deduction simulation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a single seeded game
    Run {
        /// Map file to load
        #[arg(long)]
        map: PathBuf,

        /// Random seed for reproducibility
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Tuning file (defaults to tuning.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the tick limit
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Override the initial group size
        #[arg(long)]
        group_size: Option<usize>,

        /// Write the action log as CSV
        #[arg(long)]
        actions_out: Option<PathBuf>,

        /// Write the action log as JSON Lines
        #[arg(long)]
        jsonl_out: Option<PathBuf>,
    },
    /// Play a range of seeds in parallel and summarize the outcomes
    Batch {
        /// Map file to load
        #[arg(long)]
        map: PathBuf,

        #[arg(long, default_value_t = 0)]
        start_seed: u64,

        /// Last seed, inclusive
        #[arg(long, default_value_t = 999)]
        end_seed: u64,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        group_size: Option<usize>,

        /// Write the summary as JSON
        #[arg(long)]
        stats_out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            map,
            seed,
            config,
            max_ticks,
            group_size,
            actions_out,
            jsonl_out,
        } => {
            let Some((map, mut config)) = prepare(&map, config.as_deref()) else {
                return ExitCode::FAILURE;
            };
            if let Some(max_ticks) = max_ticks {
                config.run.max_ticks = max_ticks;
            }
            if let Some(group_size) = group_size {
                config.policy.group_size = group_size.max(1);
            }

            tracing::info!(seed, max_ticks = config.run.max_ticks, "starting run");
            let (sim, report) = simulate(map, seed, &config);
            println!("Seed: {}", report.seed);
            println!("Outcome: {}", report.outcome);
            println!("Ticks: {}", report.ticks);
            println!("Logged actions: {}", sim.log().len());

            if let Some(path) = actions_out {
                match write_actions_csv(&sim, &path) {
                    Ok(()) => tracing::info!("wrote action log to {}", path.display()),
                    Err(e) => tracing::warn!("Could not write {}: {}", path.display(), e),
                }
            }
            if let Some(path) = jsonl_out {
                match write_actions_jsonl(&sim, &path) {
                    Ok(()) => tracing::info!("wrote JSONL log to {}", path.display()),
                    Err(e) => tracing::warn!("Could not write {}: {}", path.display(), e),
                }
            }
        }
        Command::Batch {
            map,
            start_seed,
            end_seed,
            config,
            group_size,
            stats_out,
        } => {
            let Some((map, mut config)) = prepare(&map, config.as_deref()) else {
                return ExitCode::FAILURE;
            };
            if let Some(group_size) = group_size {
                config.policy.group_size = group_size.max(1);
            }
            if end_seed < start_seed {
                tracing::error!(start_seed, end_seed, "empty seed range");
                return ExitCode::FAILURE;
            }

            let reports = run_batch(map, start_seed..=end_seed, &config);
            let summary = BatchSummary::from_reports(&reports);
            println!("Runs: {}", summary.runs);
            println!(
                "Crewmate wins: {} ({:.1}%)",
                summary.crewmate_wins,
                summary.crewmate_win_rate * 100.0
            );
            println!(
                "Impostor wins: {} ({:.1}%)",
                summary.impostor_wins,
                summary.impostor_win_rate * 100.0
            );
            println!("Timeouts: {}", summary.timeouts);
            println!(
                "Ticks: mean {:.1}, min {}, max {}",
                summary.mean_ticks, summary.min_ticks, summary.max_ticks
            );

            if let Some(path) = stats_out {
                match write_stats(&summary, &path) {
                    Ok(()) => tracing::info!("wrote summary to {}", path.display()),
                    Err(e) => tracing::warn!("Could not write {}: {}", path.display(), e),
                }
            }
        }
    }
    ExitCode::SUCCESS
}

/// Load the map and tuning, logging whatever goes wrong.
fn prepare(map: &Path, config: Option<&Path>) -> Option<(Arc<WorldMap>, Config)> {
    let world = match load_map(map) {
        Ok(world) => world,
        Err(e) => {
            tracing::error!("Could not load map {}: {}", map.display(), e);
            return None;
        }
    };
    tracing::info!(
        locations = world.location_count(),
        players = world.players().len(),
        "loaded map {}",
        map.display()
    );

    let config = match config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Could not load config {}: {}", path.display(), e);
                return None;
            }
        },
        None => Config::load_or_default(),
    };
    Some((Arc::new(world), config))
}
