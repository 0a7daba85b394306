use std::time::Duration;

use orion_error::StructError;
use orion_error::compat_prelude::*;
use orion_error::prelude::*;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::IngestionSink;
use crate::error::{GenReason, GenResult};
use crate::output::BulkBatch;

const NDJSON: &str = "application/x-ndjson";

/// POSTs each batch to `<url>/<index>/_bulk`.
#[derive(Debug)]
pub struct HttpBulkSink {
    client: Client,
    base_url: String,
    credentials: Option<(String, Option<String>)>,
}

impl HttpBulkSink {
    pub fn new(
        url: &str,
        username: Option<String>,
        password: Option<String>,
        timeout: Duration,
    ) -> GenResult<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StructError::from(GenReason::Config)
                .with_detail(format!("sink url must start with http:// or https://, got {url:?}")));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .owe(GenReason::Sink)?;
        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            credentials: username.map(|u| (u, password)),
        })
    }

    pub fn endpoint(&self, index: &str) -> String {
        format!("{}/{index}/_bulk", self.base_url)
    }
}

impl IngestionSink for HttpBulkSink {
    fn send(&mut self, index: &str, batch: &BulkBatch) -> GenResult<()> {
        let url = self.endpoint(index);
        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, NDJSON)
            .body(batch.payload.clone());
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_ref());
        }

        let response = request.send().owe(GenReason::Sink).position(url.clone())?;
        let status = response.status();
        let body = response.text().owe(GenReason::Sink).position(url.clone())?;
        if !status.is_success() {
            return Err(StructError::from(GenReason::Sink)
                .with_detail(format!("bulk request to {url} failed with {status}: {body}")));
        }
        if bulk_has_errors(&body) {
            cov_error!(sink, url = %url, documents = batch.documents, "bulk response reported item errors");
            return Err(StructError::from(GenReason::Sink)
                .with_detail(format!("bulk request to {url} reported item errors")));
        }
        cov_debug!(sink, url = %url, documents = batch.documents, "batch sent");
        Ok(())
    }
}

/// True when a bulk response body reports `"errors": true`.
fn bulk_has_errors(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("errors").and_then(serde_json::Value::as_bool))
        .unwrap_or(false)
}
