use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::SearchConfig;
use crate::services::{RawResult, SearchRequest};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("could not decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One page of `SearchResponse`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<RawResult>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub total_size: Option<i64>,
}

impl SearchPage {
    /// The provider sends an empty string on the last page.
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|token| !token.is_empty())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search_page(&self, request: &SearchRequest) -> Result<SearchPage, SearchError>;
}

#[derive(Clone)]
pub struct DiscoveryEngineClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl DiscoveryEngineClient {
    pub fn new(settings: &SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            access_token: settings.access_token.clone(),
        }
    }

    pub fn search_url(&self, serving_config: &str) -> String {
        format!("{}/v1/{}:search", self.endpoint, serving_config)
    }
}

#[async_trait]
impl SearchBackend for DiscoveryEngineClient {
    async fn search_page(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let url = self.search_url(&request.serving_config);
        tracing::debug!("POST {} (page token: {:?})", url, request.page_token);

        let mut builder = self.http.post(&url).json(request);
        if !self.access_token.trim().is_empty() {
            builder = builder.bearer_auth(&self.access_token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SearchError::Status { status, body });
        }

        parse_page(&body)
    }
}

pub fn parse_page(body: &str) -> Result<SearchPage, SearchError> {
    Ok(serde_json::from_str(body)?)
}
