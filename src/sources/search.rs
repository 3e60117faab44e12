//! JSON search-API strategy.
//!
//! The endpoint is queried with `query`, `page` and `size` parameters and is
//! expected to answer with a JSON list of `{ "title": .., "url": .. }`
//! objects. Paging stops at the first empty or non-list response.

use super::http;
use super::{page_failure, CandidateSink, FetchContext, Harvest, SourceAdapter, SourceDescriptor};
use crate::error::SourceError;
use crate::models::RawCandidate;
use crate::utils::truncate_for_log;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
}

/// Hits on one page; an empty list for anything that is not a JSON array.
fn parse_hits(body: &str) -> Result<Vec<SearchHit>, SourceError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(format!("search json: {e}")))?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[derive(Debug, Clone)]
pub struct SearchApiSource {
    descriptor: SourceDescriptor,
    endpoint: String,
    topic: String,
    pages: usize,
    page_size: usize,
}

impl SearchApiSource {
    pub fn new(descriptor: SourceDescriptor, endpoint: &str, topic: &str) -> Self {
        Self {
            descriptor,
            endpoint: endpoint.to_string(),
            topic: topic.to_string(),
            pages: 3,
            page_size: 10,
        }
    }

    pub fn with_pages(mut self, pages: usize) -> Self {
        self.pages = pages.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn page_url(&self, query: &str, page: usize) -> Result<Url, SourceError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("size", self.page_size.to_string()),
            ],
        )
        .map_err(|e| SourceError::Config(format!("bad search endpoint '{}': {e}", self.endpoint)))
    }
}

#[async_trait]
impl SourceAdapter for SearchApiSource {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    #[instrument(level = "info", skip_all, fields(source = %self.descriptor.key))]
    async fn fetch(&self, ctx: &FetchContext) -> Result<Harvest, SourceError> {
        let query = ctx.query_or(&self.topic);
        let mut sink = CandidateSink::new(ctx.max_items);

        for index in 0..ctx.page_limit(self.pages) {
            if sink.is_full() {
                break;
            }
            let url = match self.page_url(query, index + 1) {
                Ok(url) => url,
                Err(e) => return page_failure(index, sink, e),
            };
            let body = match http::get_text(ctx, &url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(error = %e, page = index + 1, "Search page failed");
                    return page_failure(index, sink, e);
                }
            };
            let hits = match parse_hits(&body) {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(
                        error = %e,
                        page = index + 1,
                        body_preview = %truncate_for_log(&body, 200),
                        "Search response was not JSON"
                    );
                    return page_failure(index, sink, e);
                }
            };
            if hits.is_empty() {
                debug!(page = index + 1, "Search results exhausted");
                break;
            }
            for hit in hits {
                sink.push(RawCandidate::new(hit.title, hit.url, &self.descriptor.display_name));
            }
        }

        info!(count = sink.len(), %query, "Collected search results");
        Ok(sink.finish(None))
    }
}
