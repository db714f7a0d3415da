use serde::Serialize;

use crate::config::SearchConfig;

/// Outbound body for `servingConfigs/*:search`. `serving_config` is part of the
/// URL, not the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(skip)]
    pub serving_config: String,
    pub query: String,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl SearchRequest {
    pub fn with_page_token(&self, page_token: impl Into<String>) -> Self {
        Self {
            page_token: Some(page_token.into()),
            ..self.clone()
        }
    }
}

pub fn serving_config_path(project_id: &str, location: &str, data_store_id: &str) -> String {
    format!(
        "projects/{}/locations/{}/collections/default_collection/dataStores/{}/servingConfigs/default_search",
        project_id, location, data_store_id
    )
}

pub fn build_search_request(
    project_id: &str,
    location: &str,
    data_store_id: &str,
    query: &str,
    page_size: u32,
) -> SearchRequest {
    SearchRequest {
        serving_config: serving_config_path(project_id, location, data_store_id),
        query: query.to_string(),
        page_size,
        page_token: None,
    }
}

pub fn request_for(settings: &SearchConfig, query: &str) -> SearchRequest {
    build_search_request(
        &settings.project_id,
        &settings.location,
        &settings.data_store_id,
        query,
        settings.page_size,
    )
}
