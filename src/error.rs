//! Error types for source adapters, validation and configuration.

use std::time::Duration;
use thiserror::Error;

/// Failure of one source adapter call.
///
/// Never escapes the orchestrator: each one becomes an
/// [`ErrorDescriptor`](crate::models::ErrorDescriptor) built from its
/// `Display` text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("cancelled: run deadline exceeded")]
    Cancelled,
    #[error("adapter panicked: {0}")]
    Panicked(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Reason a raw candidate was dropped by the normalizer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("empty title")]
    EmptyTitle,
    #[error("empty url")]
    EmptyUrl,
    #[error("title length {0} outside 10..=200")]
    TitleLength(usize),
    #[error("title contains skip word '{0}'")]
    SkipWord(&'static str),
    #[error("url cannot be made absolute: {0}")]
    InvalidUrl(String),
    #[error("title matches no topical keyword")]
    KeywordMiss,
    #[error("title mentions excluded name '{0}'")]
    GeoExcluded(String),
}

impl Rejection {
    /// Stable label used when counting rejections.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::EmptyTitle => "empty_title",
            Rejection::EmptyUrl => "empty_url",
            Rejection::TitleLength(_) => "title_length",
            Rejection::SkipWord(_) => "skip_word",
            Rejection::InvalidUrl(_) => "invalid_url",
            Rejection::KeywordMiss => "keyword_miss",
            Rejection::GeoExcluded(_) => "geo_excluded",
        }
    }
}

/// Failure loading [`HarvestSettings`](crate::config::HarvestSettings).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
