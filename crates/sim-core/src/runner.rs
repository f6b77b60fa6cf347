//! Runner
//!
//! Runs games to completion. A single run touches nothing but its own
//! simulation and policy, so batches fan out across threads with rayon.

use rayon::prelude::*;
use std::sync::Arc;

use sim_events::{Outcome, RunReport};

use crate::components::WorldMap;
use crate::config::Config;
use crate::policy::Fuzzer;
use crate::systems::Simulation;

/// Tick until one side wins or `max_ticks` is reached.
///
/// Crewmate win is checked before impostor win, after every tick.
pub fn run_simulation(sim: &mut Simulation, fuzzer: &mut Fuzzer, max_ticks: u64) -> Outcome {
    loop {
        if let Some(outcome) = sim.outcome() {
            return outcome;
        }
        if sim.tick() >= max_ticks {
            return Outcome::Timeout;
        }
        fuzzer.tick(sim);
    }
}

/// Play one seeded game and hand back the finished simulation with its log.
pub fn simulate(map: Arc<WorldMap>, seed: u64, config: &Config) -> (Simulation, RunReport) {
    let mut sim = Simulation::new(map, config.rules.clone());
    let mut fuzzer = Fuzzer::new(&sim, seed, config.policy.clone());
    let outcome = run_simulation(&mut sim, &mut fuzzer, config.run.max_ticks);
    let report = RunReport {
        seed,
        outcome,
        ticks: sim.tick(),
    };
    (sim, report)
}

/// Play one seeded game and report only how it ended.
pub fn run_single(map: Arc<WorldMap>, seed: u64, config: &Config) -> RunReport {
    let (_, report) = simulate(map, seed, config);
    tracing::debug!(seed, outcome = %report.outcome, ticks = report.ticks, "run finished");
    report
}

/// Play every seed in parallel. Reports come back in seed order.
pub fn run_batch(map: Arc<WorldMap>, seeds: impl IntoIterator<Item = u64>, config: &Config) -> Vec<RunReport> {
    let seeds: Vec<u64> = seeds.into_iter().collect();
    tracing::info!(runs = seeds.len(), "starting batch");

    let reports: Vec<RunReport> = seeds
        .into_par_iter()
        .map(|seed| run_single(Arc::clone(&map), seed, config))
        .collect();

    tracing::info!(runs = reports.len(), "batch finished");
    reports
}
