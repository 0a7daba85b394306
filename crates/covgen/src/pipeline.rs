//! End-to-end runs: traffic plan to records to batches to sink.

use chrono::NaiveDate;
use cov_config::CovgenConfig;
use cov_config::catalogs::USER_ROLES;
use cov_core::CoverageInfo;
use orion_error::StructError;
use orion_error::compat_prelude::*;
use orion_error::prelude::*;
use rand::Rng;

use crate::datagen::{
    DocumentUpdateFactory, Population, RecordFactory, RecordFactoryOptions, ReportFile, ReportType,
    User, generate_users, load_file_pool, report_coverage,
};
use crate::error::{GenReason, GenResult, OweSample};
use crate::output::{BatchAssembler, BulkAction, BulkBatch};
use crate::sink::{IngestionSink, UserDirectory};

/// Everything records are drawn from.
#[derive(Debug, Clone)]
pub struct Pools {
    pub population: Population,
    pub files: Vec<ReportFile>,
    pub report_types: Vec<CoverageInfo<ReportType>>,
}

impl Pools {
    /// Generate the user population and read the file pool and report types
    /// named by `config`.
    pub fn load<R: Rng + ?Sized>(config: &CovgenConfig, rng: &mut R) -> GenResult<Self> {
        let population = load_population(config, rng)?;
        let files_path = config.resolve_path(&config.files.path);
        let files = load_file_pool(&files_path, &config.files, rng)?;
        let report_types = report_coverage(&config.report_types).owe_sample()?;
        cov_info!(
            conf,
            users = population.len(),
            delegates = population.delegates().len(),
            files = files.len(),
            report_types = report_types.len(),
            "pools ready"
        );
        Ok(Self {
            population,
            files,
            report_types,
        })
    }
}

/// Generate the users described by `[users]`.
pub fn load_population<R: Rng + ?Sized>(
    config: &CovgenConfig,
    rng: &mut R,
) -> GenResult<Population> {
    let u = &config.users;
    let roles = config.catalogs.require(USER_ROLES).owe_conf()?;
    let users = generate_users(u.count, u.id_offset, roles, u.max_roles, rng).owe_sample()?;
    Ok(Population::new(users, &u.delegation_roles))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenStats {
    pub days: u32,
    pub records: u64,
    pub batches: u64,
    pub substitutions: u64,
}

/// Generate `config.generation.days` days of access records starting at
/// `first_day` and hand every full batch to `sink`.
///
/// Record ids are `{day_index}_{daypart}_{seq}`. The first sink failure
/// aborts the run.
pub fn run_generation<R: Rng + ?Sized>(
    config: &CovgenConfig,
    pools: &Pools,
    first_day: NaiveDate,
    sink: &mut dyn IngestionSink,
    rng: &mut R,
) -> GenResult<GenStats> {
    let g = &config.generation;
    let model = config.traffic_model(first_day, g.days).owe_conf()?;
    let factory = RecordFactory::new(
        &pools.population,
        &pools.files,
        pools.report_types.clone(),
        RecordFactoryOptions::from(g),
    )
    .owe_sample()?;
    let mut assembler = BatchAssembler::new(g.index.as_str(), g.batch_size)?;
    let mut stats = GenStats::default();

    cov_info!(
        pipe,
        index = %g.index,
        first_day = %first_day,
        days = g.days,
        baseline = model.daily_baseline(),
        "generation started"
    );

    for day_index in 0..g.days {
        let plan = model.plan_day(first_day, day_index, rng);
        cov_debug!(
            pipe,
            day = plan.day_index,
            date = %plan.date,
            weekday = %plan.weekday,
            records = plan.scheduled(),
            "day planned"
        );
        for (daypart, &count) in plan.dayparts.iter().enumerate() {
            for seq in 0..count {
                let downloaded_at = model.timestamp(plan.date, rng);
                let record = factory.create(downloaded_at, rng).owe_sample()?;
                if record.substitution.is_some() {
                    stats.substitutions += 1;
                }
                let id = format!("{}_{daypart}_{seq}", plan.day_index);
                if let Some(batch) = assembler.push(BulkAction::Index, &id, &record)? {
                    deliver(sink, &g.index, &batch, &mut stats.batches)?;
                }
                stats.records += 1;
            }
        }
        stats.days += 1;
    }
    if let Some(batch) = assembler.finish() {
        deliver(sink, &g.index, &batch, &mut stats.batches)?;
    }

    cov_info!(
        pipe,
        days = stats.days,
        records = stats.records,
        batches = stats.batches,
        substitutions = stats.substitutions,
        "generation finished"
    );
    Ok(stats)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    pub documents: u64,
    pub batches: u64,
}

/// Send one attribute update per id in `ids` as bulk `update` actions.
pub fn run_document_updates<R: Rng + ?Sized>(
    config: &CovgenConfig,
    population: &Population,
    ids: &[String],
    sink: &mut dyn IngestionSink,
    rng: &mut R,
) -> GenResult<UpdateStats> {
    let g = &config.generation;
    let factory = DocumentUpdateFactory::new(&config.catalogs, population)?;
    let mut assembler = BatchAssembler::new(g.index.as_str(), g.batch_size)?;
    let mut stats = UpdateStats::default();

    for id in ids {
        let update = factory.create(rng).owe_sample()?;
        if let Some(batch) = assembler.push(BulkAction::Update, id, &update)? {
            deliver(sink, &g.index, &batch, &mut stats.batches)?;
        }
        stats.documents += 1;
    }
    if let Some(batch) = assembler.finish() {
        deliver(sink, &g.index, &batch, &mut stats.batches)?;
    }

    cov_info!(
        pipe,
        documents = stats.documents,
        batches = stats.batches,
        "document updates finished"
    );
    Ok(stats)
}

/// Push `users` to `directory` in chunks of `batch_size`. Returns the number
/// of requests made.
pub fn publish_users(
    users: &[User],
    batch_size: usize,
    directory: &mut dyn UserDirectory,
) -> GenResult<usize> {
    if batch_size == 0 {
        return Err(StructError::from(GenReason::Config)
            .with_detail("user batch size must be > 0".to_string()));
    }
    let mut requests = 0;
    for chunk in users.chunks(batch_size) {
        directory.add_users(chunk)?;
        requests += 1;
    }
    cov_info!(sink, users = users.len(), requests, "users published");
    Ok(requests)
}

fn deliver(
    sink: &mut dyn IngestionSink,
    index: &str,
    batch: &BulkBatch,
    sent: &mut u64,
) -> GenResult<()> {
    sink.send(index, batch)?;
    *sent += 1;
    Ok(())
}
