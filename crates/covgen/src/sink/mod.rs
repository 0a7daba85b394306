//! Destinations for bulk payloads.

mod file;
mod http;
mod user_admin;

use std::path::Path;

use cov_config::{SinkConfig, UserAdminConfig};

use crate::datagen::User;
use crate::error::GenResult;
use crate::output::BulkBatch;

pub use file::FileSink;
pub use http::HttpBulkSink;
pub use user_admin::HttpUserAdmin;

/// Receives finished bulk batches, one call per batch.
///
/// Failures are returned to the caller as-is; sinks never retry.
pub trait IngestionSink {
    fn send(&mut self, index: &str, batch: &BulkBatch) -> GenResult<()>;
}

/// Accepts and drops every batch.
#[derive(Debug, Default)]
pub struct DiscardSink {
    batches: usize,
    documents: usize,
}

impl DiscardSink {
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn documents(&self) -> usize {
        self.documents
    }
}

impl IngestionSink for DiscardSink {
    fn send(&mut self, _index: &str, batch: &BulkBatch) -> GenResult<()> {
        self.batches += 1;
        self.documents += batch.documents;
        cov_trace!(sink, documents = batch.documents, "batch discarded");
        Ok(())
    }
}

/// Receives generated user accounts, one call per chunk.
pub trait UserDirectory {
    fn add_users(&mut self, users: &[User]) -> GenResult<()>;
}

/// Client for the `[users.admin]` endpoint.
pub fn build_user_admin(config: &UserAdminConfig) -> GenResult<HttpUserAdmin> {
    HttpUserAdmin::new(
        &config.url,
        config.username.clone(),
        config.password.clone(),
        config.timeout.as_duration(),
    )
}

/// Build the sink described by `config`. `dry_run` always yields a
/// [`DiscardSink`]. Relative file sink directories resolve against
/// `base_dir`.
pub fn build_sink(
    config: &SinkConfig,
    base_dir: &Path,
    dry_run: bool,
) -> GenResult<Box<dyn IngestionSink>> {
    if dry_run {
        cov_info!(sink, "dry run, batches will be discarded");
        return Ok(Box::new(DiscardSink::default()));
    }
    match config {
        SinkConfig::File { dir } => {
            let dir = if dir.is_relative() {
                base_dir.join(dir)
            } else {
                dir.clone()
            };
            Ok(Box::new(FileSink::create(dir)?))
        }
        SinkConfig::Http {
            url,
            username,
            password,
            timeout,
        } => Ok(Box::new(HttpBulkSink::new(
            url,
            username.clone(),
            password.clone(),
            timeout.as_duration(),
        )?)),
        SinkConfig::Discard => Ok(Box::new(DiscardSink::default())),
    }
}
