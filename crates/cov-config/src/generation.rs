use std::path::PathBuf;

use chrono::{Months, NaiveDate};
use cov_core::BusinessHours;
use serde::Deserialize;

use crate::types::{ClockTime, HumanDuration};

/// How much traffic a run produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Volume {
    /// Records on a day whose weekday coefficient is 1.0.
    DailyBaseline(f64),
    /// Total records across the whole run, before jitter and rounding.
    Annual(f64),
}

/// `[generation]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    pub index: String,
    #[serde(default)]
    pub seed: Option<u64>,
    /// The generated year ends here; the first simulated day is one year
    /// earlier. Defaults to today.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default)]
    pub daily_baseline: Option<f64>,
    #[serde(default)]
    pub annual_volume: Option<f64>,
    #[serde(default)]
    pub jitter: f64,
    #[serde(default = "default_window_start")]
    pub window_start: ClockTime,
    #[serde(default = "default_window")]
    pub window: HumanDuration,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_substitution_rate")]
    pub substitution_rate: f64,
    #[serde(default = "default_max_reports")]
    pub max_reports: usize,
    #[serde(default = "default_intranet_ratio")]
    pub intranet_ratio: f64,
}

impl GenerationConfig {
    pub fn volume(&self) -> anyhow::Result<Volume> {
        match (self.daily_baseline, self.annual_volume) {
            (Some(b), None) => Ok(Volume::DailyBaseline(b)),
            (None, Some(a)) => Ok(Volume::Annual(a)),
            (Some(_), Some(_)) => {
                anyhow::bail!("generation: set only one of daily_baseline and annual_volume")
            }
            (None, None) => {
                anyhow::bail!("generation: one of daily_baseline or annual_volume is required")
            }
        }
    }

    pub fn business_hours(&self) -> anyhow::Result<BusinessHours> {
        let secs = u32::try_from(self.window.as_secs())
            .map_err(|_| anyhow::anyhow!("generation.window is too long: {}", self.window))?;
        BusinessHours::new(self.window_start.as_time(), secs)
            .map_err(|e| anyhow::anyhow!("generation.window: {e}"))
    }

    /// First simulated day: `start_date` (or `today`) minus one year.
    pub fn first_day(&self, today: NaiveDate) -> anyhow::Result<NaiveDate> {
        let anchor = self.start_date.unwrap_or(today);
        anchor
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| anyhow::anyhow!("generation.start_date {anchor} is out of range"))
    }
}

/// `[users]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersConfig {
    pub count: usize,
    #[serde(default)]
    pub id_offset: usize,
    #[serde(default = "default_max_roles")]
    pub max_roles: usize,
    /// Roles whose holders may act as a substitute for another user.
    #[serde(default)]
    pub delegation_roles: Vec<String>,
    /// Internal-users API the `users` command can push accounts to.
    #[serde(default)]
    pub admin: Option<UserAdminConfig>,
}

/// `[users.admin]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAdminConfig {
    /// Cluster base URL; accounts are patched into
    /// `<url>/_searchguard/api/internalusers`.
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_admin_timeout")]
    pub timeout: HumanDuration,
    /// Users per PATCH request.
    #[serde(default = "default_admin_batch_size")]
    pub batch_size: usize,
}

/// `[files]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// CSV file pool; relative paths resolve against the config file.
    pub path: PathBuf,
    #[serde(default = "default_filename_column")]
    pub filename_column: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
}

fn default_days() -> u32 {
    365
}

fn default_window_start() -> ClockTime {
    ClockTime::from(BusinessHours::default().start())
}

fn default_window() -> HumanDuration {
    HumanDuration::from(std::time::Duration::from_secs(u64::from(
        BusinessHours::default().length_secs(),
    )))
}

fn default_batch_size() -> usize {
    255
}

fn default_substitution_rate() -> f64 {
    0.01
}

fn default_max_reports() -> usize {
    4
}

fn default_intranet_ratio() -> f64 {
    1.0 / 3.0
}

fn default_max_roles() -> usize {
    3
}

fn default_admin_timeout() -> HumanDuration {
    HumanDuration::from(std::time::Duration::from_secs(30))
}

fn default_admin_batch_size() -> usize {
    100
}

fn default_filename_column() -> String {
    "filename".to_string()
}

fn default_id_column() -> String {
    "id".to_string()
}
