use std::path::{Path, PathBuf};

use anyhow::Context;
use covgen::pipeline::{load_population, run_document_updates};
use covgen::sink::build_sink;

use crate::cmd_helpers::{init_logging, load_config, make_rng};

pub(crate) fn run(
    config_path: PathBuf,
    ids_path: PathBuf,
    seed: Option<u64>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = load_config(&config_path)?;
    let _guard = init_logging(&config)?;
    let ids = read_ids(&ids_path)?;
    if ids.is_empty() {
        anyhow::bail!("no document ids in {}", ids_path.display());
    }
    let (mut rng, _) = make_rng(seed, &config);

    let population = load_population(&config, &mut rng).map_err(|e| anyhow::anyhow!("{e}"))?;
    let mut sink =
        build_sink(&config.sink, &config.base_dir, dry_run).map_err(|e| anyhow::anyhow!("{e}"))?;
    let stats = run_document_updates(&config, &population, &ids, sink.as_mut(), &mut rng)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "Updated {} documents in {} batches{}",
        stats.documents,
        stats.batches,
        if dry_run { " [dry run]" } else { "" },
    );
    Ok(())
}

/// One id per line; blank lines and `#` comments are ignored.
fn read_ids(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading document ids {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}
