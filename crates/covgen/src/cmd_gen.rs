use std::path::PathBuf;

use covgen::pipeline::{Pools, run_generation};
use covgen::sink::build_sink;

use crate::cmd_helpers::{init_logging, load_config, make_rng, today};

pub(crate) fn run(
    config_path: PathBuf,
    seed: Option<u64>,
    days: Option<u32>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut config = load_config(&config_path)?;
    if let Some(days) = days {
        if days == 0 {
            anyhow::bail!("--days must be > 0");
        }
        config.generation.days = days;
    }
    let _guard = init_logging(&config)?;

    let (mut rng, seed) = make_rng(seed, &config);
    let first_day = config.generation.first_day(today())?;
    tracing::info!(domain = "sys", seed = ?seed, first_day = %first_day, "covgen gen starting");

    let pools = Pools::load(&config, &mut rng).map_err(|e| anyhow::anyhow!("{e}"))?;
    let mut sink =
        build_sink(&config.sink, &config.base_dir, dry_run).map_err(|e| anyhow::anyhow!("{e}"))?;
    let stats = run_generation(&config, &pools, first_day, sink.as_mut(), &mut rng)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "Generated {} records over {} days ({} batches, {} substitutions) into index '{}'{}",
        stats.records,
        stats.days,
        stats.batches,
        stats.substitutions,
        config.generation.index,
        if dry_run { " [dry run]" } else { "" },
    );
    Ok(())
}
