//! Syndication-feed strategy (RSS 2.0 / Atom).

use super::http;
use super::{page_failure, CandidateSink, FetchContext, Harvest, SourceAdapter, SourceDescriptor};
use crate::error::SourceError;
use crate::feed::{parse_feed, Feed};
use crate::image::ImageResolver;
use crate::models::RawCandidate;
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// A source backed by one or more feeds, read in order.
#[derive(Debug, Clone)]
pub struct FeedSource {
    descriptor: SourceDescriptor,
    feeds: Vec<String>,
    images: ImageResolver,
}

impl FeedSource {
    pub fn new(descriptor: SourceDescriptor, feeds: &[&str]) -> Self {
        Self {
            descriptor,
            feeds: feeds.iter().map(|f| f.to_string()).collect(),
            images: ImageResolver::new(),
        }
    }

    /// Turn parsed entries into candidates. Relative links and images are
    /// resolved against the feed's site link, or the feed URL without one.
    fn collect(&self, feed: &Feed, feed_url: &Url, sink: &mut CandidateSink) -> usize {
        let base = feed
            .link
            .as_deref()
            .and_then(|l| feed_url.join(l).ok())
            .unwrap_or_else(|| feed_url.clone());

        let mut added = 0;
        for entry in &feed.entries {
            if sink.is_full() {
                break;
            }
            let (Some(title), Some(link)) = (entry.title.as_deref(), entry.link.as_deref()) else {
                continue;
            };
            let url = base
                .join(link.trim())
                .map(|u| u.to_string())
                .unwrap_or_else(|_| link.trim().to_string());
            let candidate = RawCandidate {
                title: title.to_string(),
                url,
                source: self.descriptor.display_name.clone(),
                summary: entry.summary.clone(),
                content: entry.content.clone(),
                image: self.images.resolve(entry, Some(&base)),
                published_at: entry.published,
            };
            if sink.push(candidate) {
                added += 1;
            }
        }
        added
    }
}

#[async_trait]
impl SourceAdapter for FeedSource {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    #[instrument(level = "info", skip_all, fields(source = %self.descriptor.key))]
    async fn fetch(&self, ctx: &FetchContext) -> Result<Harvest, SourceError> {
        let mut sink = CandidateSink::new(ctx.max_items);

        for (index, feed_url) in self.feeds.iter().enumerate() {
            if sink.is_full() {
                break;
            }
            let url = match Url::parse(feed_url) {
                Ok(url) => url,
                Err(e) => {
                    let cause = SourceError::Config(format!("bad feed url '{feed_url}': {e}"));
                    return page_failure(index, sink, cause);
                }
            };
            let feed = match http::get_text(ctx, &url).await.and_then(|xml| parse_feed(&xml)) {
                Ok(feed) => feed,
                Err(e) => {
                    warn!(error = %e, %url, "Feed fetch failed");
                    return page_failure(index, sink, e);
                }
            };
            let found = self.collect(&feed, &url, &mut sink);
            debug!(entries = feed.entries.len(), found, %url, "Parsed feed");
        }

        info!(count = sink.len(), "Collected feed entries");
        Ok(sink.finish(None))
    }
}
