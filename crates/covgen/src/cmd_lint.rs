use std::path::PathBuf;

use chrono::{Datelike, Days};
use cov_config::Volume;
use covgen::datagen::{load_file_pool, report_coverage};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cmd_helpers::{load_config, today};

pub(crate) fn run(config_path: PathBuf) -> anyhow::Result<()> {
    let config = load_config(&config_path)?;
    let g = &config.generation;

    // Ids drawn here are discarded, so any seed will do.
    let mut rng = StdRng::seed_from_u64(0);
    let files_path = config.resolve_path(&config.files.path);
    let files = load_file_pool(&files_path, &config.files, &mut rng)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    if files.len() < g.max_reports + 1 {
        anyhow::bail!(
            "file pool {} has {} files, need at least {} for max_reports = {}",
            files_path.display(),
            files.len(),
            g.max_reports + 1,
            g.max_reports
        );
    }
    let reports = report_coverage(&config.report_types)?;

    let first_day = g.first_day(today())?;
    let model = config.traffic_model(first_day, g.days)?;
    let expected: f64 = (0..g.days)
        .map(|d| {
            let date = first_day + Days::new(u64::from(d));
            model.expected_daily_count(date.weekday())
        })
        .sum();

    println!("config OK: {}", config_path.display());
    println!("  index:        {}", g.index);
    println!("  users:        {}", config.users.count);
    println!("  files:        {}", files.len());
    println!("  report types: {}", reports.len());
    println!(
        "  catalogs:     {}",
        config.catalogs.names().collect::<Vec<_>>().join(", ")
    );
    match g.volume()? {
        Volume::DailyBaseline(b) => println!("  baseline:     {b} records/day"),
        Volume::Annual(a) => println!(
            "  baseline:     {:.2} records/day (annual volume {a})",
            model.daily_baseline()
        ),
    }
    println!("  window:       {} for {}", g.window_start, g.window);
    println!(
        "  dayparts:     {}",
        model
            .daypart_shares()
            .iter()
            .map(|s| format!("{:.1}%", s * 100.0))
            .collect::<Vec<_>>()
            .join(" / ")
    );
    println!(
        "  plan:         {} days from {first_day}, ~{expected:.0} records",
        g.days
    );
    Ok(())
}
