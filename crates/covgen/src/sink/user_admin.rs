use std::time::Duration;

use orion_error::StructError;
use orion_error::compat_prelude::*;
use orion_error::prelude::*;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::UserDirectory;
use crate::datagen::User;
use crate::error::{GenReason, GenResult};
use crate::output::user_patch;

const INTERNAL_USERS: &str = "_searchguard/api/internalusers";

/// PATCHes user accounts into the cluster's internal-users API.
#[derive(Debug)]
pub struct HttpUserAdmin {
    client: Client,
    endpoint: String,
    credentials: Option<(String, Option<String>)>,
}

impl HttpUserAdmin {
    pub fn new(
        url: &str,
        username: Option<String>,
        password: Option<String>,
        timeout: Duration,
    ) -> GenResult<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StructError::from(GenReason::Config)
                .with_detail(format!("user admin url must start with http:// or https://, got {url:?}")));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .owe(GenReason::Sink)?;
        Ok(Self {
            client,
            endpoint: format!("{}/{INTERNAL_USERS}", url.trim_end_matches('/')),
            credentials: username.map(|u| (u, password)),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl UserDirectory for HttpUserAdmin {
    fn add_users(&mut self, users: &[User]) -> GenResult<()> {
        let body = user_patch(users)?;
        let mut request = self
            .client
            .patch(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_ref());
        }

        let response = request
            .send()
            .owe(GenReason::Sink)
            .position(self.endpoint.clone())?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            cov_error!(sink, url = %self.endpoint, status = %status, "user patch rejected");
            return Err(StructError::from(GenReason::Sink).with_detail(format!(
                "user patch to {} failed with {status}: {body}",
                self.endpoint
            )));
        }
        cov_debug!(sink, url = %self.endpoint, users = users.len(), "users patched");
        Ok(())
    }
}
