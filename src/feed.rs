//! RSS / Atom / JSON Feed parsing into structured entries.
//!
//! Parsing itself is done by `feed-rs`. This module flattens its model into
//! [`FeedEntry`], keeping the entry's title, link, summary, content and
//! publish time plus every structured field the [`ImageResolver`] inspects
//! (thumbnails, media contents, link relations and categories).
//!
//! RSS `<enclosure>` elements arrive as media contents, next to
//! `media:content`.
//!
//! [`ImageResolver`]: crate::image::ImageResolver

use crate::error::SourceError;
use chrono::{DateTime, Utc};
use feed_rs::model;

/// A parsed feed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub title: Option<String>,
    /// The site link declared by the channel, used as a base for relative URLs.
    pub link: Option<String>,
    pub entries: Vec<FeedEntry>,
}

/// One `<item>` or `<entry>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    /// RSS `<description>` or Atom `<summary>`.
    pub summary: Option<String>,
    /// RSS `<content:encoded>` or Atom `<content>`.
    pub content: Option<String>,
    /// `<media:description>`.
    pub description: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub thumbnails: Vec<String>,
    pub media: Vec<MediaContent>,
    pub links: Vec<FeedLink>,
    pub categories: Vec<FeedCategory>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaContent {
    pub url: String,
    pub mime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedLink {
    pub href: String,
    pub rel: Option<String>,
    pub mime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedCategory {
    pub term: String,
    pub label: Option<String>,
    /// RSS `domain` or Atom `scheme`.
    pub scheme: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn text(value: Option<&model::Text>) -> Option<String> {
    value.and_then(|t| non_empty(&t.content))
}

/// The page link among `links`: no relation or `alternate`.
fn page_link(links: &[model::Link]) -> Option<String> {
    links
        .iter()
        .filter(|l| {
            l.rel
                .as_deref()
                .is_none_or(|rel| rel.eq_ignore_ascii_case("alternate"))
        })
        .find_map(|l| non_empty(&l.href))
}

fn convert_entry(entry: model::Entry) -> FeedEntry {
    // feed-rs fills `id` from <guid>, which many RSS feeds use as the permalink.
    let link = page_link(&entry.links).or_else(|| {
        let id = entry.id.trim();
        (id.starts_with("http://") || id.starts_with("https://")).then(|| id.to_string())
    });

    let thumbnails = entry
        .media
        .iter()
        .flat_map(|m| &m.thumbnails)
        .filter_map(|t| non_empty(&t.image.uri))
        .collect();

    let media = entry
        .media
        .iter()
        .flat_map(|m| &m.content)
        .filter_map(|c| {
            Some(MediaContent {
                url: c.url.as_ref()?.to_string(),
                mime: c.content_type.as_ref().map(|m| m.to_string()),
            })
        })
        .collect();

    let links = entry
        .links
        .iter()
        .filter_map(|l| {
            Some(FeedLink {
                href: non_empty(&l.href)?,
                rel: l.rel.clone(),
                mime: l.media_type.clone(),
            })
        })
        .collect();

    let categories = entry
        .categories
        .iter()
        .map(|c| FeedCategory {
            term: c.term.trim().to_string(),
            label: c.label.clone(),
            scheme: c.scheme.clone(),
        })
        .collect();

    FeedEntry {
        title: text(entry.title.as_ref()),
        link,
        summary: text(entry.summary.as_ref()),
        content: entry
            .content
            .as_ref()
            .and_then(|c| c.body.as_deref())
            .and_then(non_empty),
        description: entry
            .media
            .iter()
            .find_map(|m| text(m.description.as_ref())),
        published: entry.published.or(entry.updated),
        thumbnails,
        media,
        links,
        categories,
    }
}

/// Parse a feed document.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] when the document is not a feed `feed-rs`
/// recognises.
pub fn parse_feed(xml: &str) -> Result<Feed, SourceError> {
    let parsed = feed_rs::parser::parse(xml.as_bytes())
        .map_err(|e| SourceError::Parse(format!("feed: {e}")))?;
    Ok(Feed {
        title: text(parsed.title.as_ref()),
        link: page_link(&parsed.links),
        entries: parsed.entries.into_iter().map(convert_entry).collect(),
    })
}
