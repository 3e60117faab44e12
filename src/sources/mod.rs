//! News source adapters.
//!
//! Every source implements [`SourceAdapter`]. Sites differ only in their
//! data (URLs, selectors, filters), so the per-site logic lives in three
//! generic strategies configured by the [`catalog`]:
//!
//! | Strategy | Module | Method | Notes |
//! |----------|--------|--------|-------|
//! | [`HtmlSource`](html::HtmlSource) | [`html`] | HTML scraping | CSS rules, optional `{page}` pagination |
//! | [`FeedSource`](feed::FeedSource) | [`feed`] | RSS / Atom | Images via [`ImageResolver`](crate::image::ImageResolver) |
//! | [`SearchApiSource`](search::SearchApiSource) | [`search`] | JSON search API | Stops at the first empty page |
//!
//! # Common Patterns
//!
//! Adapters:
//! - Fetch pages sequentially through [`http::get_text`], which applies the
//!   politeness policy, the request timeout and the run deadline
//! - Deduplicate candidates by cleaned title within one call
//! - Fail the whole call only when the first request fails; a later failure
//!   returns the pages gathered so far with [`Harvest::degraded`] set

pub mod catalog;
pub mod feed;
pub mod html;
pub mod http;
pub mod search;

use crate::error::SourceError;
use crate::models::{RawCandidate, Region};
use crate::normalize::{clean_text, FilterProfile};
use crate::politeness::PolitenessPolicy;
use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Static description of one registered source.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    /// Registry key, e.g. `hindustan_times`.
    pub key: String,
    /// Name stamped on every candidate, e.g. `Hindustan Times`.
    pub display_name: String,
    /// Base for resolving relative links.
    pub base_url: Url,
    pub filters: FilterProfile,
    pub max_items: Option<usize>,
}

impl SourceDescriptor {
    pub fn new(key: &str, display_name: &str, base_url: &str) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SourceError::Config(format!("{key}: bad base url '{base_url}': {e}")))?;
        Ok(Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            base_url,
            filters: FilterProfile::none(),
            max_items: None,
        })
    }

    pub fn with_filters(mut self, filters: FilterProfile) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }
}

/// Everything an adapter needs for one call.
#[derive(Debug, Clone)]
pub struct FetchContext {
    pub region: Region,
    /// Topic override for search-style sources.
    pub query: Option<String>,
    /// Page-count override for paginated sources.
    pub max_pages: Option<usize>,
    /// Stop collecting after this many candidates.
    pub max_items: Option<usize>,
    pub deadline: Option<Instant>,
    pub client: reqwest::Client,
    pub request_timeout: Duration,
    pub politeness: PolitenessPolicy,
}

impl FetchContext {
    pub fn new(client: reqwest::Client, region: Region) -> Self {
        Self {
            region,
            query: None,
            max_pages: None,
            max_items: None,
            deadline: None,
            client,
            request_timeout: Duration::from_secs(15),
            politeness: PolitenessPolicy::disabled(),
        }
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn deadline_passed(&self) -> bool {
        self.remaining().is_some_and(|r| r.is_zero())
    }

    /// Timeout for the next request: the configured request timeout,
    /// shortened to the time left before the deadline.
    ///
    /// # Errors
    ///
    /// [`SourceError::Cancelled`] once the deadline has passed.
    pub fn request_budget(&self) -> Result<Duration, SourceError> {
        match self.remaining() {
            Some(r) if r.is_zero() => Err(SourceError::Cancelled),
            Some(r) => Ok(r.min(self.request_timeout)),
            None => Ok(self.request_timeout),
        }
    }

    /// Pages to crawl for a source whose own plan is `planned` pages.
    pub fn page_limit(&self, planned: usize) -> usize {
        self.max_pages.unwrap_or(planned).max(1)
    }

    /// The query to use, falling back to the source's own topic.
    pub fn query_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(default)
    }
}

/// The result of one adapter call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Harvest {
    pub candidates: Vec<RawCandidate>,
    /// Set when the call stopped early; `candidates` holds what was gathered.
    pub degraded: Option<SourceError>,
}

impl Harvest {
    pub fn complete(candidates: Vec<RawCandidate>) -> Self {
        Self {
            candidates,
            degraded: None,
        }
    }

    pub fn partial(candidates: Vec<RawCandidate>, cause: SourceError) -> Self {
        Self {
            candidates,
            degraded: Some(cause),
        }
    }
}

/// A news source.
///
/// Implementations are stateless between calls; anything remembered during a
/// call (seen titles, page counters) lives on the stack of `fetch`.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn descriptor(&self) -> &SourceDescriptor;

    fn key(&self) -> &str {
        &self.descriptor().key
    }

    /// Fetch candidates from the source.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when nothing could be fetched at all.
    async fn fetch(&self, ctx: &FetchContext) -> Result<Harvest, SourceError>;
}

/// Call-scoped accumulator: drops repeated titles and stops at the cap.
#[derive(Debug)]
pub(crate) struct CandidateSink {
    seen_titles: HashSet<String>,
    candidates: Vec<RawCandidate>,
    cap: Option<usize>,
}

impl CandidateSink {
    pub(crate) fn new(cap: Option<usize>) -> Self {
        Self {
            seen_titles: HashSet::new(),
            candidates: Vec::new(),
            cap,
        }
    }

    /// Add `candidate` unless its cleaned title is empty or already seen.
    pub(crate) fn push(&mut self, candidate: RawCandidate) -> bool {
        if self.is_full() {
            return false;
        }
        let key = clean_text(&candidate.title).to_lowercase();
        if key.is_empty() || !self.seen_titles.insert(key) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    pub(crate) fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.candidates.len() >= cap)
    }

    pub(crate) fn len(&self) -> usize {
        self.candidates.len()
    }

    pub(crate) fn finish(self, degraded: Option<SourceError>) -> Harvest {
        Harvest {
            candidates: self.candidates,
            degraded,
        }
    }
}

/// Decide what a failed page means for the whole call: on the first page the
/// call fails, afterwards the pages gathered so far are kept.
pub(crate) fn page_failure(
    page_index: usize,
    sink: CandidateSink,
    cause: SourceError,
) -> Result<Harvest, SourceError> {
    if page_index == 0 {
        Err(cause)
    } else {
        Ok(sink.finish(Some(cause)))
    }
}
