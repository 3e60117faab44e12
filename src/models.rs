//! Data models for harvested articles and run bookkeeping.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`RawCandidate`]: Unvalidated article data as returned by a source adapter
//! - [`ArticleRecord`]: A normalized article that passed every validation step
//! - [`ErrorDescriptor`]: A recorded adapter failure, never thrown onward
//! - [`Region`] and [`Category`]: The two registry coordinates
//!
//! `ArticleRecord` has private fields and no public constructor. The only way
//! to obtain one is through [`crate::normalize::Normalizer`], so a record that
//! skipped validation cannot exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A raw article candidate as scraped from one source.
///
/// Adapters fill `title`, `url` and `source`; feed-based adapters may also
/// provide a summary, content, image and publish time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCandidate {
    /// Title text as found in the page or feed, uncleaned.
    pub title: String,
    /// Link as found in the page or feed, possibly relative.
    pub url: String,
    /// Display name of the adapter that produced this candidate.
    pub source: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl RawCandidate {
    /// Build a plain `{title, url, source}` candidate.
    pub fn new(title: impl Into<String>, url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            ..Self::default()
        }
    }
}

/// A normalized article, the output unit of a harvest run.
///
/// Invariants (enforced by the normalizer):
/// - `title` is whitespace-collapsed and 10 to 200 characters long
/// - `url` is an absolute `http(s)` URL
/// - `image`, when present, is an absolute `http(s)` URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRecord {
    title: String,
    url: String,
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    pub(crate) fn validated(
        title: String,
        url: String,
        source: String,
        summary: Option<String>,
        content: Option<String>,
        image: Option<String>,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title,
            url,
            source,
            summary,
            content,
            image,
            published_at,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Full text when the source provided it, otherwise the summary.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().or(self.summary.as_deref())
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
}

/// A failure recorded by the orchestrator for one adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Registry key of the adapter that failed.
    pub source: String,
    /// Human-readable cause.
    pub message: String,
}

impl ErrorDescriptor {
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// Geographic scope of a harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    India,
    Global,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::India, Region::Global];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::India => "india",
            Region::Global => "global",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "india" | "in" => Ok(Region::India),
            "global" | "world" => Ok(Region::Global),
            other => Err(format!("unknown region '{other}' (expected india or global)")),
        }
    }
}

/// Content category, the second registry coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// General education news.
    General,
    Environment,
    Technology,
    Sports,
    HigherEducation,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::Environment,
        Category::Technology,
        Category::Sports,
        Category::HigherEducation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Environment => "environment",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::HigherEducation => "higher_education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "general" | "education" => Ok(Category::General),
            "environment" => Ok(Category::Environment),
            "technology" | "tech" => Ok(Category::Technology),
            "sports" | "sport" => Ok(Category::Sports),
            "higher_education" | "higher_ed" => Ok(Category::HigherEducation),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}
