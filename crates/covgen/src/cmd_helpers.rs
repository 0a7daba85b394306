use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use cov_config::CovgenConfig;
use covgen::tracing_init::init_tracing;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_appender::non_blocking::WorkerGuard;

pub(crate) fn load_config(path: &Path) -> anyhow::Result<CovgenConfig> {
    CovgenConfig::load(path).with_context(|| format!("loading config {}", path.display()))
}

pub(crate) fn init_logging(config: &CovgenConfig) -> anyhow::Result<Option<WorkerGuard>> {
    init_tracing(&config.logging, &config.base_dir)
}

/// `--seed` first, then `generation.seed`, then OS entropy.
pub(crate) fn make_rng(cli_seed: Option<u64>, config: &CovgenConfig) -> (StdRng, Option<u64>) {
    match cli_seed.or(config.generation.seed) {
        Some(seed) => (StdRng::seed_from_u64(seed), Some(seed)),
        None => (StdRng::from_os_rng(), None),
    }
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
