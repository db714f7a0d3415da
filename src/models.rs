use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

pub const NO_TITLE: &str = "No Title";
pub const NO_SNIPPET: &str = "No Snippet";
pub const NO_URL: &str = "#";

/// One search hit, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

pub type ResultList = Vec<DisplayResult>;

/// Form body submitted by the search box.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchForm {
    pub input: String,
}

/// Everything the page template needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageModel {
    pub title: String,
    pub subtitle: String,
    pub input: String,
    pub responses: ResultList,
}

impl PageModel {
    pub fn new(app: &AppConfig, input: impl Into<String>, responses: ResultList) -> Self {
        Self {
            title: app.title.clone(),
            subtitle: app.subtitle.clone(),
            input: input.into(),
            responses,
        }
    }

    pub fn empty(app: &AppConfig) -> Self {
        Self::new(app, String::new(), Vec::new())
    }
}
