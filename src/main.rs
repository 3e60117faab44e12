//! # News Harvester
//!
//! Runs one harvest for a region and category, prints the articles and
//! optionally writes a JSON report.
//!
//! ## Usage
//!
//! ```sh
//! news_harvester -r india -c general -j ./json
//! news_harvester -r global -c sports --list-sources
//! ```

use clap::Parser;
use news_harvester::cli::Cli;
use news_harvester::config::HarvestSettings;
use news_harvester::orchestrator::Orchestrator;
use news_harvester::outputs::json::{write_report, HarvestReport};
use news_harvester::sources::catalog::default_registry;
use news_harvester::utils::{article_line, ensure_writable_dir};
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_harvester starting up");

    let args = Cli::parse();
    debug!(region = %args.region, category = %args.category, sources = ?args.sources, "Parsed CLI arguments");

    let registry = default_registry()?;

    if args.list_sources {
        for key in registry.names(args.region, args.category) {
            println!("{key}");
        }
        return Ok(());
    }

    // Early check: ensure JSON output dir is writable
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let settings = HarvestSettings::load(args.config.as_deref()).await?;
    let orchestrator = Orchestrator::new(registry, settings)?;

    let request = args.run_request();
    let outcome = orchestrator.run(&request).await;

    for article in &outcome.articles {
        println!("{}", article_line(article));
    }
    for failure in &outcome.errors {
        warn!(source = %failure.source, message = %failure.message, "Source error");
    }

    if let Some(dir) = &args.json_output_dir {
        let report = HarvestReport::new(request.region, request.category, &outcome);
        if let Err(e) = write_report(&report, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = outcome.articles.len(),
        errors = outcome.errors.len(),
        "Execution complete"
    );

    Ok(())
}
