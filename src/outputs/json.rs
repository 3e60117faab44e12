//! JSON output for harvest runs.
//!
//! Each run is written to `{json_output_dir}/{date}/{region}_{category}.json`
//! with the shape:
//!
//! ```json
//! {
//!   "region": "india",
//!   "category": "general",
//!   "generated_at": "2025-05-06T10:30:00Z",
//!   "articles": [{ "title": "...", "url": "...", "source": "..." }],
//!   "errors": [{ "source": "ndtv", "message": "HTTP 503 from ..." }],
//!   "stats": { "candidates": 120, "accepted": 74, ... }
//! }
//! ```
//!
//! A second run on the same day for the same region and category replaces
//! the earlier file.

use crate::models::{ArticleRecord, Category, ErrorDescriptor, Region};
use crate::orchestrator::{RunOutcome, RunStats};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// The serialized form of one run.
#[derive(Debug, Serialize)]
pub struct HarvestReport<'a> {
    pub region: Region,
    pub category: Category,
    pub generated_at: DateTime<Utc>,
    pub articles: &'a [ArticleRecord],
    pub errors: &'a [ErrorDescriptor],
    pub stats: &'a RunStats,
}

impl<'a> HarvestReport<'a> {
    pub fn new(region: Region, category: Category, outcome: &'a RunOutcome) -> Self {
        Self {
            region,
            category,
            generated_at: Utc::now(),
            articles: &outcome.articles,
            errors: &outcome.errors,
            stats: &outcome.stats,
        }
    }
}

/// Path of the report file for `region`/`category` on `date`.
pub fn report_path(json_output_dir: &str, date: &str, region: Region, category: Category) -> PathBuf {
    PathBuf::from(json_output_dir)
        .join(date)
        .join(format!("{region}_{category}.json"))
}

/// Write a [`HarvestReport`] under today's (local) date directory.
///
/// # Arguments
///
/// * `report` - The run to serialize
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path written to.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &HarvestReport<'_>,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let date = Local::now().date_naive().to_string();
    let path = report_path(json_output_dir, &date, report.region, report.category);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = report.articles.len(), "Wrote JSON report");
    Ok(path)
}
