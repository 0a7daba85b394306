use std::path::PathBuf;

use serde::Deserialize;

use crate::types::HumanDuration;

/// Where bulk payloads go.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SinkConfig {
    /// One `.ndjson` file per batch under `dir`. Relative paths resolve
    /// against the config file's directory.
    File { dir: PathBuf },
    /// POST to `<url>/<index>/_bulk`.
    Http {
        url: String,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
        #[serde(default = "default_timeout")]
        timeout: HumanDuration,
    },
    /// Build payloads and drop them.
    Discard,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::File {
            dir: PathBuf::from("out"),
        }
    }
}

fn default_timeout() -> HumanDuration {
    HumanDuration::from(std::time::Duration::from_secs(30))
}
