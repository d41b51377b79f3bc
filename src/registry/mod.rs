//! Container registry client.
//!
//! Speaks the two calls of the Docker registry token flow: a pull-scoped
//! token from the auth service, then the image's tag listing. One request per
//! call, no pagination and no retries.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{Result, TrackerError};

/// Source of published tags for an image
pub trait TagSource {
    /// All tags currently published for `image` (e.g. "gitlab/gitlab-ce")
    fn list_tags(&self, image: &str) -> Result<Vec<String>>;
}

/// Blocking client for the registry HTTP API
pub struct RegistryClient {
    client: Client,
    index_url: String,
    auth_url: String,
    service: String,
    token_override: Option<String>,
}

impl RegistryClient {
    /// Build a client from registry settings; a timeout is only applied when configured
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("image-release-tracker/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(RegistryClient {
            client: builder.build()?,
            index_url: config.index_url.trim_end_matches('/').to_string(),
            auth_url: config.auth_url.trim_end_matches('/').to_string(),
            service: config.service.clone(),
            token_override: None,
        })
    }

    /// Use `token` instead of requesting one from the auth service
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token_override = token;
        self
    }

    /// Request a pull-scoped bearer token for `image`
    pub fn fetch_token(&self, image: &str) -> Result<String> {
        let url = format!("{}/token", self.auth_url);
        let scope = format!("repository:{}:pull", image);
        debug!(%url, %scope, "requesting registry token");

        let response = self
            .client
            .get(&url)
            .query(&[("service", self.service.as_str()), ("scope", scope.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::auth(format!(
                "token request for '{}' returned {}",
                image, status
            )));
        }

        let body: Value = response.json().map_err(|e| {
            TrackerError::auth(format!("token response for '{}' is not JSON: {}", image, e))
        })?;

        body.get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                TrackerError::auth(format!("token response for '{}' has no 'token' field", image))
            })
    }

    /// Fetch the full tag listing for `image`
    pub fn fetch_tags(&self, token: &str, image: &str) -> Result<Vec<String>> {
        let url = format!("{}/v2/{}/tags/list", self.index_url, image);
        debug!(%url, "listing registry tags");

        let body = self.client.get(&url).bearer_auth(token).send()?.text()?;

        let tags = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| match value.get("tags") {
                Some(Value::Array(tags)) => Some(
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect::<Vec<_>>(),
                ),
                _ => None,
            })
            .ok_or_else(|| {
                TrackerError::registry_data(
                    format!("tag listing for '{}' has no 'tags' field", image),
                    body.clone(),
                )
            })?;

        debug!(image, count = tags.len(), "received registry tags");
        Ok(tags)
    }
}

impl TagSource for RegistryClient {
    fn list_tags(&self, image: &str) -> Result<Vec<String>> {
        let token = match &self.token_override {
            Some(token) => token.clone(),
            None => self.fetch_token(image)?,
        };

        self.fetch_tags(&token, image)
    }
}
