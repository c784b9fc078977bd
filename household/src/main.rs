//! Household Engine Benchmark
//!
//! Runs the full analysis over a synthetic roll and reports timings.

use std::time::Instant;

use household::synthetic::SyntheticRoll;
use household::{AnalysisConfig, FilterMode, Roll};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const RUNS: u32 = 10;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Household engine benchmark starting...");

    let households = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 20_000,
    };
    let params = SyntheticRoll {
        households,
        ..Default::default()
    };
    let records = params.generate()?;
    info!("Generated {} records across {} households", records.len(), households);

    let start = Instant::now();
    let mut last = None;
    for _ in 0..RUNS {
        last = Some(Roll::analyze(&records, AnalysisConfig::default())?);
    }
    let elapsed = start.elapsed();

    if let Some(roll) = last {
        let summary = roll.summary();
        info!(
            "Benchmark complete: {:?} total, {:?} per run, {} roots, {} influencers, {} large-family voters",
            elapsed,
            elapsed / RUNS,
            summary.roots,
            summary.influencers,
            roll.filter(FilterMode::LargeFamily).len()
        );
    }

    let physical_mem = memory_stats::memory_stats()
        .map(|stats| stats.physical_mem)
        .unwrap_or(0);
    info!("Process memory: {:.1} MiB", physical_mem as f64 / (1024.0 * 1024.0));

    Ok(())
}
