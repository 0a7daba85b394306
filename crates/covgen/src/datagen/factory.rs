use chrono::NaiveDateTime;
use cov_config::GenerationConfig;
use cov_core::{
    CoverageInfo, SampleError, SampleResult, pick_categorical, pick_one_uniform,
    pick_up_to_unique_from_list,
};
use rand::Rng;

use super::files::ReportFile;
use super::record::{AccessRecord, Actor, Channel, ReportType};
use super::users::Population;

/// Per-record probabilities and limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordFactoryOptions {
    /// Chance that a record carries a substitution actor.
    pub substitution_rate: f64,
    /// Upper bound on files referenced by one record.
    pub max_reports: usize,
    /// Chance that a record came in over the intranet.
    pub intranet_ratio: f64,
}

impl Default for RecordFactoryOptions {
    fn default() -> Self {
        Self {
            substitution_rate: 0.01,
            max_reports: 4,
            intranet_ratio: 1.0 / 3.0,
        }
    }
}

impl From<&GenerationConfig> for RecordFactoryOptions {
    fn from(g: &GenerationConfig) -> Self {
        Self {
            substitution_rate: g.substitution_rate,
            max_reports: g.max_reports,
            intranet_ratio: g.intranet_ratio,
        }
    }
}

/// Builds one [`AccessRecord`] per simulated event.
///
/// Every precondition that would make a draw impossible is checked in
/// [`RecordFactory::new`], so [`RecordFactory::create`] only fails on
/// corrupted state.
#[derive(Debug)]
pub struct RecordFactory<'a> {
    population: &'a Population,
    files: &'a [ReportFile],
    report_types: Vec<CoverageInfo<ReportType>>,
    options: RecordFactoryOptions,
}

impl<'a> RecordFactory<'a> {
    pub fn new(
        population: &'a Population,
        files: &'a [ReportFile],
        report_types: Vec<CoverageInfo<ReportType>>,
        options: RecordFactoryOptions,
    ) -> SampleResult<Self> {
        if population.is_empty() {
            return Err(SampleError::EmptyInput("user population is empty".into()));
        }
        if files.is_empty() {
            return Err(SampleError::EmptyInput("file pool is empty".into()));
        }
        if report_types.is_empty() {
            return Err(SampleError::EmptyInput("no report types configured".into()));
        }
        if options.substitution_rate > 0.0 && population.delegates().is_empty() {
            return Err(SampleError::EmptyInput(
                "substitutions are enabled but no user holds a delegation role".into(),
            ));
        }
        if options.max_reports == 0 || files.len() < options.max_reports + 1 {
            return Err(SampleError::DegenerateSubsetRequest(format!(
                "file pool of {} cannot serve up to {} reports per record",
                files.len(),
                options.max_reports
            )));
        }
        Ok(Self {
            population,
            files,
            report_types,
            options,
        })
    }

    pub fn options(&self) -> RecordFactoryOptions {
        self.options
    }

    /// Compose a record stamped with `downloaded_at`.
    pub fn create<R: Rng + ?Sized>(
        &self,
        downloaded_at: NaiveDateTime,
        rng: &mut R,
    ) -> SampleResult<AccessRecord> {
        let user = self.actor(rng.random_range(0..self.population.len()))?;

        let substitution = if self.options.substitution_rate > 0.0
            && rng.random::<f64>() < self.options.substitution_rate
        {
            let idx = *pick_one_uniform(self.population.delegates(), rng)?;
            Some(self.actor(idx)?)
        } else {
            None
        };

        let reports = pick_up_to_unique_from_list(self.files, self.options.max_reports + 1, rng)?;
        let report_type = pick_categorical(&self.report_types, rng)?.clone();
        let channel = if rng.random::<f64>() < self.options.intranet_ratio {
            Channel::Intranet
        } else {
            Channel::Extranet
        };

        Ok(AccessRecord {
            user,
            substitution,
            downloaded_at,
            channel,
            reports,
            report_type,
        })
    }

    fn actor(&self, idx: usize) -> SampleResult<Actor> {
        self.population
            .actor(idx)
            .ok_or_else(|| SampleError::EmptyInput(format!("no user at index {idx}")))
    }
}
