//! Run orchestration: fan out to adapters, then normalize and deduplicate.
//!
//! # Pipeline
//!
//! 1. **Resolve**: pick adapters from the [`SourceRegistry`]
//! 2. **Fetch**: one tokio task per adapter, `concurrency` in flight, each
//!    bounded by the per-source timeout and the run deadline
//! 3. **Normalize**: validate candidates with each adapter's base URL and filters
//! 4. **Deduplicate**: first occurrence wins across the whole run
//! 5. **Truncate**: apply `max_articles`, if any
//!
//! Results are gathered with an order-preserving buffered stream, so the
//! output follows registry order no matter which adapter finishes first.
//! Nothing in here returns an error: a failing adapter becomes one
//! [`ErrorDescriptor`] and contributes no candidates, a degraded one keeps its
//! partial candidates and also records a descriptor.

use crate::config::HarvestSettings;
use crate::dedup::Deduplicator;
use crate::error::SourceError;
use crate::models::{ArticleRecord, Category, ErrorDescriptor, Region};
use crate::normalize::Normalizer;
use crate::politeness::PolitenessPolicy;
use crate::registry::SourceRegistry;
use crate::sources::http::build_client;
use crate::sources::{FetchContext, Harvest, SourceAdapter, SourceDescriptor};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Extra time granted past the run deadline so adapters can hand back the
/// pages they already have.
const DEADLINE_GRACE: Duration = Duration::from_millis(500);

/// Parameters of one harvest run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub region: Region,
    pub category: Category,
    /// Source keys to run; empty means every registered source.
    pub sources: Vec<String>,
    pub max_articles: Option<usize>,
    pub max_items_per_source: Option<usize>,
    pub query: Option<String>,
    pub max_pages: Option<usize>,
    /// Time budget for the whole run, counted from the start of [`Orchestrator::run`].
    pub deadline: Option<Duration>,
}

impl RunRequest {
    pub fn new(region: Region, category: Category) -> Self {
        Self {
            region,
            category,
            sources: Vec::new(),
            max_articles: None,
            max_items_per_source: None,
            query: None,
            max_pages: None,
            deadline: None,
        }
    }

    pub fn with_sources<S: AsRef<str>>(mut self, sources: &[S]) -> Self {
        self.sources = sources.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_max_articles(mut self, max: usize) -> Self {
        self.max_articles = Some(max);
        self
    }

    pub fn with_max_items_per_source(mut self, max: usize) -> Self {
        self.max_items_per_source = Some(max);
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }

    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pages = Some(pages);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Final state of one adapter in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdapterState {
    /// Returned candidates. `degraded` is set when it stopped early.
    Succeeded { candidates: usize, degraded: bool },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub key: String,
    pub name: String,
    #[serde(flatten)]
    pub state: AdapterState,
    pub elapsed_ms: u64,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub sources: Vec<SourceReport>,
    /// Candidates returned by all adapters, after per-source caps.
    pub candidates: usize,
    /// Rejected candidates by reason.
    pub rejected: BTreeMap<String, usize>,
    pub duplicates: usize,
    pub accepted: usize,
    pub elapsed_ms: u64,
}

impl RunStats {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunOutcome {
    pub articles: Vec<ArticleRecord>,
    pub errors: Vec<ErrorDescriptor>,
    pub stats: RunStats,
}

/// One adapter's raw result, before normalization.
struct Fetched {
    adapter: Arc<dyn SourceAdapter>,
    result: Result<Harvest, SourceError>,
    elapsed: Duration,
}

pub struct Orchestrator {
    registry: SourceRegistry,
    settings: HarvestSettings,
    client: reqwest::Client,
    politeness: PolitenessPolicy,
    normalizer: Normalizer,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish()
    }
}

impl Orchestrator {
    /// Build an orchestrator with its own HTTP client and politeness policy.
    ///
    /// # Errors
    ///
    /// [`SourceError::Config`] if the HTTP client cannot be built.
    pub fn new(registry: SourceRegistry, settings: HarvestSettings) -> Result<Self, SourceError> {
        let client = build_client(&settings.user_agent)?;
        let politeness = PolitenessPolicy::new(settings.per_host_delay());
        Ok(Self {
            registry,
            settings,
            client,
            politeness,
            normalizer: Normalizer::new(),
        })
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &HarvestSettings {
        &self.settings
    }

    /// Smallest of the request cap, the descriptor cap and the configured cap.
    fn item_cap(&self, request: &RunRequest, descriptor: &SourceDescriptor) -> Option<usize> {
        [
            request.max_items_per_source,
            descriptor.max_items,
            self.settings.max_items.get(&descriptor.key).copied(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn context_for(&self, request: &RunRequest, adapter: &dyn SourceAdapter, deadline: Option<Instant>) -> FetchContext {
        let descriptor = adapter.descriptor();
        let key = descriptor.key.as_str();
        let max_items = self.item_cap(request, descriptor);

        FetchContext {
            region: request.region,
            query: request.query.clone(),
            max_pages: request.max_pages.or_else(|| self.settings.max_pages.get(key).copied()),
            max_items,
            deadline,
            client: self.client.clone(),
            request_timeout: self.settings.request_timeout(),
            politeness: self.politeness.clone(),
        }
    }

    /// Harvest articles for one request. Never fails; see [`RunOutcome::errors`].
    #[instrument(level = "info", skip_all, fields(region = %request.region, category = %request.category))]
    pub async fn run(&self, request: &RunRequest) -> RunOutcome {
        let started = Instant::now();
        let deadline = request.deadline.map(|d| started + d);
        let adapters = self.registry.resolve(request.region, request.category, &request.sources);
        if adapters.is_empty() {
            warn!(requested = ?request.sources, "No matching sources");
        }
        info!(sources = adapters.len(), concurrency = self.settings.concurrency, "Starting harvest");

        let concurrency = self.settings.concurrency.max(1);
        let gap = self.settings.source_gap();
        let source_timeout = self.settings.source_timeout();

        let fetched: Vec<Fetched> = stream::iter(adapters.into_iter().enumerate())
            .map(|(index, adapter)| {
                let ctx = self.context_for(request, adapter.as_ref(), deadline);
                async move {
                    if concurrency == 1 && index > 0 && !gap.is_zero() {
                        pause(gap, deadline).await;
                    }
                    run_adapter(adapter, ctx, source_timeout).await
                }
            })
            .buffered(concurrency)
            .collect()
            .await;

        let mut outcome = self.assemble(fetched, request);
        outcome.stats.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            articles = outcome.articles.len(),
            errors = outcome.errors.len(),
            rejected = outcome.stats.rejected_total(),
            duplicates = outcome.stats.duplicates,
            elapsed_ms = outcome.stats.elapsed_ms,
            "Harvest complete"
        );
        outcome
    }

    /// Normalize and deduplicate in adapter order, recording failures.
    fn assemble(&self, fetched: Vec<Fetched>, request: &RunRequest) -> RunOutcome {
        let mut outcome = RunOutcome::default();
        let mut dedup = Deduplicator::new();

        for Fetched { adapter, result, elapsed } in fetched {
            let descriptor = adapter.descriptor();
            let key = descriptor.key.clone();
            let state = match result {
                Ok(Harvest { mut candidates, degraded }) => {
                    if let Some(cap) = self.item_cap(request, descriptor) {
                        candidates.truncate(cap);
                    }
                    let count = candidates.len();
                    outcome.stats.candidates += count;
                    if let Some(cause) = &degraded {
                        warn!(source = %key, error = %cause, count, "Source stopped early");
                        outcome.errors.push(ErrorDescriptor::new(&key, cause.to_string()));
                    } else {
                        info!(source = %key, count, elapsed_ms = elapsed.as_millis() as u64, "Source finished");
                    }

                    for raw in candidates {
                        match self.normalizer.normalize(raw, Some(&descriptor.base_url), &descriptor.filters) {
                            Ok(record) => {
                                if dedup.admit(&record) {
                                    outcome.articles.push(record);
                                } else {
                                    outcome.stats.duplicates += 1;
                                }
                            }
                            Err(rejection) => {
                                debug!(source = %key, reason = %rejection, "Rejected candidate");
                                *outcome
                                    .stats
                                    .rejected
                                    .entry(rejection.reason().to_string())
                                    .or_default() += 1;
                            }
                        }
                    }
                    AdapterState::Succeeded {
                        candidates: count,
                        degraded: degraded.is_some(),
                    }
                }
                Err(cause) => {
                    warn!(source = %key, error = %cause, "Source failed");
                    outcome.errors.push(ErrorDescriptor::new(&key, cause.to_string()));
                    AdapterState::Failed {
                        message: cause.to_string(),
                    }
                }
            };
            outcome.stats.sources.push(SourceReport {
                key,
                name: descriptor.display_name.clone(),
                state,
                elapsed_ms: elapsed.as_millis() as u64,
            });
        }

        if let Some(max) = request.max_articles {
            outcome.articles.truncate(max);
        }
        outcome.stats.accepted = outcome.articles.len();
        outcome
    }
}

/// Sleep for `gap`, but not past the deadline.
async fn pause(gap: Duration, deadline: Option<Instant>) {
    let until = Instant::now() + gap;
    let until = deadline.map_or(until, |d| until.min(d));
    tokio::time::sleep_until(until).await;
}

/// Run one adapter in its own task so a panic stays contained.
async fn run_adapter(adapter: Arc<dyn SourceAdapter>, ctx: FetchContext, source_timeout: Duration) -> Fetched {
    let started = Instant::now();
    if ctx.deadline_passed() {
        debug!(source = %adapter.key(), "Deadline passed; not starting source");
        return Fetched {
            adapter,
            result: Err(SourceError::Cancelled),
            elapsed: Duration::ZERO,
        };
    }

    let (budget, deadline_bound) = match ctx.remaining() {
        Some(left) if left < source_timeout => (left + DEADLINE_GRACE, true),
        _ => (source_timeout, false),
    };

    debug!(source = %adapter.key(), ?budget, "Starting source");
    let task_adapter = Arc::clone(&adapter);
    let handle = tokio::spawn(async move { task_adapter.fetch(&ctx).await });
    let abort = handle.abort_handle();

    let result = match tokio::time::timeout(budget, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(join_failure(join)),
        Err(_) => {
            abort.abort();
            if deadline_bound {
                Err(SourceError::Cancelled)
            } else {
                Err(SourceError::Timeout(source_timeout))
            }
        }
    };

    Fetched {
        adapter,
        result,
        elapsed: started.elapsed(),
    }
}

fn join_failure(err: JoinError) -> SourceError {
    if !err.is_panic() {
        return SourceError::Cancelled;
    }
    let payload = err.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    SourceError::Panicked(message)
}
