use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use cov_core::{TrafficCoefficients, TrafficModel};
use serde::Deserialize;

use crate::catalogs::Catalogs;
use crate::generation::{FilesConfig, GenerationConfig, UsersConfig, Volume};
use crate::logging::LoggingConfig;
use crate::reports::ReportTypesConfig;
use crate::sink::SinkConfig;
use crate::traffic::TrafficConfig;
use crate::validate;

// ---------------------------------------------------------------------------
// Raw TOML structure (intermediate representation)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CovgenConfigRaw {
    generation: GenerationConfig,
    users: UsersConfig,
    traffic: TrafficConfig,
    #[serde(default)]
    catalogs: BTreeMap<String, toml::Table>,
    #[serde(default)]
    report_types: ReportTypesConfig,
    files: FilesConfig,
    #[serde(default)]
    sink: SinkConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// CovgenConfig (resolved, validated)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CovgenConfig {
    pub generation: GenerationConfig,
    pub users: UsersConfig,
    pub traffic: TrafficCoefficients,
    pub catalogs: Catalogs,
    pub report_types: ReportTypesConfig,
    pub files: FilesConfig,
    pub sink: SinkConfig,
    pub logging: LoggingConfig,
    /// Directory relative paths resolve against. Set by [`CovgenConfig::load`];
    /// `"."` when parsed from a string.
    pub base_dir: PathBuf,
}

impl CovgenConfig {
    /// Read and parse a `covgen.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let mut config: CovgenConfig = content.parse()?;
        config.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Join `path` onto the config directory unless it is already absolute.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Build the traffic model for a run whose first day is `first_day`.
    pub fn traffic_model(&self, first_day: NaiveDate, days: u32) -> anyhow::Result<TrafficModel> {
        let gen_cfg = &self.generation;
        let baseline = match gen_cfg.volume()? {
            Volume::DailyBaseline(b) => b,
            Volume::Annual(annual) => {
                TrafficModel::baseline_for_annual(annual, &self.traffic, first_day, days)?
            }
        };
        Ok(TrafficModel::new(
            self.traffic.clone(),
            baseline,
            gen_cfg.jitter,
            gen_cfg.business_hours()?,
        )?)
    }
}

impl FromStr for CovgenConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a resolved, validated [`CovgenConfig`].
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: CovgenConfigRaw = toml::from_str(toml_str)?;

        let traffic = raw.traffic.coefficients()?;
        let catalogs = Catalogs::from_raw(raw.catalogs)?;

        let config = CovgenConfig {
            generation: raw.generation,
            users: raw.users,
            traffic,
            catalogs,
            report_types: raw.report_types,
            files: raw.files,
            sink: raw.sink,
            logging: raw.logging,
            base_dir: PathBuf::from("."),
        };

        validate::validate(&config)?;

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
