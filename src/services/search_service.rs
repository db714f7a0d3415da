use futures::stream::{self, Stream, TryStreamExt};
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::models::ResultList;
use crate::services::{
    format_response, request_for, SearchBackend, SearchError, SearchPage, SearchRequest,
};

/// Runs one query against the configured data store.
#[derive(Clone)]
pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
    settings: SearchConfig,
}

impl SearchService {
    pub fn new(backend: Arc<dyn SearchBackend>, settings: SearchConfig) -> Self {
        Self { backend, settings }
    }

    /// Pages in provider order, following `nextPageToken` until it runs out,
    /// repeats the token just sent, or `max_pages` is reached.
    pub fn pages(
        &self,
        first: SearchRequest,
    ) -> impl Stream<Item = Result<SearchPage, SearchError>> + '_ {
        let max_pages = self.settings.max_pages;
        stream::try_unfold((Some(first), 0usize), move |(next, fetched)| async move {
            let request = match next {
                Some(request) if max_pages.map_or(true, |max| fetched < max) => request,
                _ => return Ok(None),
            };

            let page = self.backend.search_page(&request).await?;
            tracing::debug!(
                "Fetched page {} with {} results (total size {:?})",
                fetched + 1,
                page.results.len(),
                page.total_size
            );
            let following = match page.next_token() {
                Some(token) if request.page_token.as_deref() == Some(token) => {
                    tracing::warn!("Search service repeated page token {:?}; stopping", token);
                    None
                }
                Some(token) => Some(request.with_page_token(token)),
                None => None,
            };
            Ok::<_, SearchError>(Some((page, (following, fetched + 1))))
        })
    }

    pub async fn search(&self, query: &str) -> Result<ResultList, SearchError> {
        let request = request_for(&self.settings, query);
        let pages: Vec<SearchPage> = self.pages(request).try_collect().await?;

        let page_count = pages.len();
        let results = format_response(pages.into_iter().flat_map(|page| page.results));
        tracing::info!(
            "Query {:?} returned {} displayable results over {} page(s)",
            query,
            results.len(),
            page_count
        );

        Ok(results)
    }
}
