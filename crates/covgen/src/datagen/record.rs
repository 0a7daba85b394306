use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use super::files::ReportFile;

/// Timestamp layout of `downloaded_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub oid: usize,
    pub login: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Intranet,
    Extranet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportType {
    pub id: String,
    pub title: String,
}

/// One simulated document download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessRecord {
    pub user: Actor,
    pub substitution: Option<Actor>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub downloaded_at: NaiveDateTime,
    #[serde(rename = "from")]
    pub channel: Channel,
    pub reports: Vec<ReportFile>,
    pub report_type: ReportType,
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}
