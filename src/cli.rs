//! Command-line interface definitions for the news harvester.
//!
//! All arguments can be provided via command-line flags or environment variables.

use crate::models::{Category, Region};
use crate::orchestrator::RunRequest;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for one harvest run.
///
/// # Examples
///
/// ```sh
/// # Every India general-education source, printed to stdout
/// news_harvester
///
/// # Two global sports sources, written to ./json as well
/// news_harvester -r global -c sports -s espn_global -s bbc_sport -j ./json
///
/// # Cap the run at 60 seconds and 20 articles
/// news_harvester -c higher-ed --deadline-secs 60 -n 20
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Region to harvest (india, global)
    #[arg(short, long, env = "HARVEST_REGION", default_value = "india")]
    pub region: Region,

    /// Category to harvest (general, environment, technology, sports, higher_education)
    #[arg(short, long, env = "HARVEST_CATEGORY", default_value = "general")]
    pub category: Category,

    /// Source key to run; repeat for several. Defaults to every source.
    #[arg(short, long = "source", env = "HARVEST_SOURCES", value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Keep at most this many articles after deduplication
    #[arg(short = 'n', long, env = "HARVEST_MAX_ARTICLES")]
    pub max_articles: Option<usize>,

    /// Keep at most this many candidates from each source
    #[arg(long, env = "HARVEST_MAX_PER_SOURCE")]
    pub max_per_source: Option<usize>,

    /// Topic for search-style sources
    #[arg(long, env = "HARVEST_QUERY")]
    pub query: Option<String>,

    /// Page limit for paginated sources
    #[arg(long, env = "HARVEST_MAX_PAGES")]
    pub max_pages: Option<usize>,

    /// Abandon sources still running after this many seconds
    #[arg(long, env = "HARVEST_DEADLINE_SECS")]
    pub deadline_secs: Option<u64>,

    /// Optional path to a YAML settings file
    #[arg(long, env = "HARVEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output directory for the JSON report
    #[arg(short, long, env = "HARVEST_JSON_DIR")]
    pub json_output_dir: Option<String>,

    /// List the source keys for the region and category, then exit
    #[arg(long)]
    pub list_sources: bool,
}

impl Cli {
    pub fn run_request(&self) -> RunRequest {
        RunRequest {
            region: self.region,
            category: self.category,
            sources: self.sources.clone(),
            max_articles: self.max_articles,
            max_items_per_source: self.max_per_source,
            query: self.query.clone(),
            max_pages: self.max_pages,
            deadline: self.deadline_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_harvester"]);

        assert_eq!(cli.region, Region::India);
        assert_eq!(cli.category, Category::General);
        assert!(cli.sources.is_empty());
        assert!(!cli.list_sources);
        assert_eq!(cli.run_request(), RunRequest::new(Region::India, Category::General));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "news_harvester",
            "-r",
            "global",
            "-c",
            "higher-ed",
            "-s",
            "guardian",
            "-s",
            "inside_higher_ed",
            "-n",
            "25",
            "-j",
            "/tmp/json",
        ]);

        assert_eq!(cli.region, Region::Global);
        assert_eq!(cli.category, Category::HigherEducation);
        assert_eq!(cli.sources, vec!["guardian", "inside_higher_ed"]);
        assert_eq!(cli.max_articles, Some(25));
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }

    #[test]
    fn test_cli_run_request() {
        let cli = Cli::parse_from([
            "news_harvester",
            "--category",
            "environment",
            "--max-per-source",
            "10",
            "--query",
            "climate",
            "--max-pages",
            "2",
            "--deadline-secs",
            "45",
        ]);
        let request = cli.run_request();

        assert_eq!(request.category, Category::Environment);
        assert_eq!(request.max_items_per_source, Some(10));
        assert_eq!(request.query.as_deref(), Some("climate"));
        assert_eq!(request.max_pages, Some(2));
        assert_eq!(request.deadline, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_cli_rejects_unknown_region() {
        assert!(Cli::try_parse_from(["news_harvester", "-r", "mars"]).is_err());
    }
}
