//! Crossref works API client
//!
//! See <https://api.crossref.org/swagger-ui/index.html>. One GET per DOI,
//! no retries: the caller decides what an unavailable record means.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Url};
use serde::Deserialize;

use crate::{
    config::{CrossrefConfig, SiteConfig},
    error::{AppError, AppResult, FetchError},
    models::MetadataRecord,
};

/// Source of bibliographic metadata keyed by DOI
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch(&self, identifier: &str) -> Result<MetadataRecord, FetchError>;
}

#[derive(Deserialize)]
struct Envelope {
    message: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct CrossrefClient {
    http: Client,
    endpoint: String,
}

impl CrossrefClient {
    pub fn new(config: &CrossrefConfig, site: &SiteConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(Self::user_agent(config, site))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// `<agent>/<version> (mailto:<site mail>)`, as asked of polite API users
    pub fn user_agent(config: &CrossrefConfig, site: &SiteConfig) -> String {
        format!(
            "{}/{} (mailto:{})",
            config.agent_name.as_deref().unwrap_or(&site.name),
            env!("CARGO_PKG_VERSION"),
            site.mail
        )
    }

    /// Works URL for a DOI; the DOI becomes one percent-encoded path segment
    pub fn work_url(&self, identifier: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| FetchError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(format!("{} cannot take a path", self.endpoint)))?
            .pop_if_empty()
            .push(identifier);
        Ok(url)
    }
}

/// Extract the work from a `{"status": .., "message": {..}}` response body
pub fn parse_envelope(body: &str) -> Result<MetadataRecord, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    let message = envelope
        .message
        .filter(serde_json::Value::is_object)
        .ok_or(FetchError::MissingEnvelope)?;
    Ok(serde_json::from_value(message)?)
}

#[async_trait]
impl MetadataSource for CrossrefClient {
    async fn fetch(&self, identifier: &str) -> Result<MetadataRecord, FetchError> {
        let url = self.work_url(identifier)?;
        tracing::debug!("Crossref request: {}", url);

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        parse_envelope(&body)
    }
}
