//! # News Harvester
//!
//! Harvests short news-article records (title, link, source, optional
//! summary and image) from many independently maintained HTML pages, RSS/Atom
//! feeds and JSON search endpoints, and merges them into one validated,
//! deduplicated collection per (region, category).
//!
//! ## Architecture
//!
//! 1. **Registry**: [`registry::SourceRegistry`] maps (region, category) to
//!    an ordered set of [`sources::SourceAdapter`]s; the built-in set comes
//!    from [`sources::catalog::default_registry`]
//! 2. **Fetching**: [`orchestrator::Orchestrator`] runs adapters concurrently
//!    with per-source timeouts, a run deadline and per-host politeness
//! 3. **Normalizing**: [`normalize::Normalizer`] cleans titles, resolves URLs
//!    and applies each adapter's filters
//! 4. **Deduplicating**: [`dedup::Deduplicator`] drops repeats by URL or title
//!
//! ## Example
//!
//! ```no_run
//! use news_harvester::config::HarvestSettings;
//! use news_harvester::models::{Category, Region};
//! use news_harvester::orchestrator::{Orchestrator, RunRequest};
//! use news_harvester::sources::catalog::default_registry;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = Orchestrator::new(default_registry()?, HarvestSettings::default())?;
//! let outcome = orchestrator
//!     .run(&RunRequest::new(Region::India, Category::General).with_max_articles(20))
//!     .await;
//! for article in &outcome.articles {
//!     println!("{} ({})", article.title(), article.source());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod feed;
pub mod image;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod outputs;
pub mod politeness;
pub mod registry;
pub mod sources;
pub mod utils;
