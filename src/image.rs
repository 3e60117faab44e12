//! Representative-image selection for feed entries.
//!
//! Feeds publish images in many places. [`ImageResolver::resolve`] walks a
//! fixed fallback chain and returns the first candidate that validates:
//!
//! 1. thumbnail metadata (`media:thumbnail`, `itunes:image`)
//! 2. `media:content` with an image type (or none)
//! 3. `<enclosure>` with an `image/*` type: RSS enclosures are media contents
//!    and are taken with step 2, typed Atom enclosure links come next
//! 4. markup in the summary, content or media description (lazy-load
//!    `data-src` attributes first, then `<img src>` and
//!    `background-image: url(..)`)
//! 5. `<link rel="enclosure">` with no type
//! 6. category tags whose term, label or scheme is an image URL
//!
//! A candidate validates when it can be made an absolute `http(s)` URL and
//! either its path ends in an image extension or its host/path contains an
//! image-hosting token such as `cdn` or `uploads`.

use crate::feed::{FeedEntry, FeedLink};
use crate::normalize::has_web_scheme;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const IMAGE_EXTENSIONS: [&str; 9] = ["jpg", "jpeg", "png", "gif", "webp", "avif", "bmp", "svg", "jfif"];

const IMAGE_PATH_TOKENS: [&str; 9] = [
    "images", "image", "img", "photo", "cdn", "thumb", "media", "uploads", "static",
];

static RE_IMG_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<img\b[^>]*?\ssrc\s*=\s*["']([^"']+)["']"#).unwrap());
static RE_IMG_UNQUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<img\b[^>]*?\ssrc\s*=\s*([^\s"'>]+)"#).unwrap());
static RE_BACKGROUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)background(?:-image)?\s*:\s*url\(\s*["']?([^"')]+?)["']?\s*\)"#).unwrap()
});
static RE_DATA_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bdata-(?:lazy-)?src\s*=\s*["']([^"']+)["']"#).unwrap());

fn is_image_mime(mime: Option<&str>) -> bool {
    mime.is_some_and(|m| m.trim().to_ascii_lowercase().starts_with("image/"))
}

fn is_enclosure(link: &FeedLink) -> bool {
    link.rel
        .as_deref()
        .is_some_and(|r| r.eq_ignore_ascii_case("enclosure"))
}

fn has_image_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext))
}

fn has_hosting_token(url: &Url) -> bool {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let path = url.path().to_ascii_lowercase();
    host.split('.')
        .chain(path.split(['/', '-', '_', '.']))
        .any(|segment| IMAGE_PATH_TOKENS.iter().any(|t| segment.starts_with(t)))
}

/// Make `candidate` absolute and check that it plausibly points at an image.
pub fn validate_image_url(candidate: &str, base: Option<&Url>) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.starts_with("data:") {
        return None;
    }
    let url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base?.join(candidate).ok()?,
        Err(_) => return None,
    };
    if !has_web_scheme(&url) {
        return None;
    }
    (has_image_extension(&url) || has_hosting_token(&url)).then(|| url.to_string())
}

/// Walks the fallback chain over one [`FeedEntry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageResolver;

impl ImageResolver {
    pub fn new() -> Self {
        Self
    }

    /// Pick the entry's representative image.
    ///
    /// # Arguments
    ///
    /// * `entry` - The parsed feed entry
    /// * `base` - Base URL for relative candidates, usually the feed's site link
    ///
    /// # Returns
    ///
    /// The first candidate passing [`validate_image_url`], or `None`.
    pub fn resolve(&self, entry: &FeedEntry, base: Option<&Url>) -> Option<String> {
        let accept = |c: &str| validate_image_url(c, base);

        let thumbnails = entry.thumbnails.iter().map(String::as_str);

        let media = entry
            .media
            .iter()
            .filter(|m| m.mime.is_none() || is_image_mime(m.mime.as_deref()))
            .map(|m| m.url.as_str());

        let enclosures = entry
            .links
            .iter()
            .filter(|l| is_enclosure(l) && is_image_mime(l.mime.as_deref()))
            .map(|l| l.href.as_str());

        thumbnails
            .chain(media)
            .chain(enclosures)
            .find_map(accept)
            .or_else(|| self.from_markup(entry, base))
            .or_else(|| {
                entry
                    .links
                    .iter()
                    .filter(|l| is_enclosure(l) && l.mime.is_none())
                    .find_map(|l| accept(l.href.as_str()))
            })
            .or_else(|| {
                entry.categories.iter().find_map(|cat| {
                    std::iter::once(cat.term.as_str())
                        .chain(cat.label.as_deref())
                        .chain(cat.scheme.as_deref())
                        .find_map(accept)
                })
            })
    }

    fn from_markup(&self, entry: &FeedEntry, base: Option<&Url>) -> Option<String> {
        let texts = [&entry.summary, &entry.content, &entry.description];
        // Lazy-loaded images keep a placeholder in `src`.
        let patterns: [&Regex; 4] = [&RE_DATA_SRC, &RE_IMG_QUOTED, &RE_IMG_UNQUOTED, &RE_BACKGROUND];
        texts.into_iter().flatten().find_map(|html| {
            patterns.iter().find_map(|re| {
                re.captures_iter(html)
                    .filter_map(|caps| caps.get(1))
                    .find_map(|m| validate_image_url(m.as_str(), base))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedCategory, FeedLink, MediaContent};

    fn base() -> Url {
        Url::parse("https://www.example.in/education/").unwrap()
    }

    #[test]
    fn test_thumbnail_wins_over_enclosure() {
        let entry = FeedEntry {
            thumbnails: vec!["https://cdn.example.in/t/1.jpg".into()],
            links: vec![FeedLink {
                href: "https://cdn.example.in/e/2.jpg".into(),
                rel: Some("enclosure".into()),
                mime: Some("image/jpeg".into()),
            }],
            ..FeedEntry::default()
        };
        assert_eq!(
            ImageResolver::new().resolve(&entry, None).as_deref(),
            Some("https://cdn.example.in/t/1.jpg")
        );
    }

    #[test]
    fn test_video_media_skipped_for_image_enclosure() {
        let entry = FeedEntry {
            media: vec![
                MediaContent {
                    url: "https://cdn.example.in/clip.mp4".into(),
                    mime: Some("video/mp4".into()),
                },
                MediaContent {
                    url: "https://example.in/photo.png".into(),
                    mime: Some("image/png".into()),
                },
            ],
            ..FeedEntry::default()
        };
        assert_eq!(
            ImageResolver::new().resolve(&entry, None).as_deref(),
            Some("https://example.in/photo.png")
        );
    }

    #[test]
    fn test_relative_img_in_summary_resolved() {
        let entry = FeedEntry {
            summary: Some(r#"<p>Results <img alt="x" src="/img/board.jpg"> today</p>"#.into()),
            ..FeedEntry::default()
        };
        assert_eq!(
            ImageResolver::new().resolve(&entry, Some(&base())).as_deref(),
            Some("https://www.example.in/img/board.jpg")
        );
    }

    #[test]
    fn test_unquoted_and_background_and_lazy_sources() {
        let resolver = ImageResolver::new();
        let unquoted = FeedEntry {
            content: Some("<img class=a src=https://x.org/pics/a.webp>".into()),
            ..FeedEntry::default()
        };
        assert_eq!(
            resolver.resolve(&unquoted, None).as_deref(),
            Some("https://x.org/pics/a.webp")
        );

        let background = FeedEntry {
            content: Some(r#"<div style="background-image: url('/bg/hero.jpeg')"></div>"#.into()),
            ..FeedEntry::default()
        };
        assert_eq!(
            resolver.resolve(&background, Some(&base())).as_deref(),
            Some("https://www.example.in/bg/hero.jpeg")
        );

        let lazy = FeedEntry {
            description: Some(r#"<span data-lazy-src="https://static.example.org/x"></span>"#.into()),
            ..FeedEntry::default()
        };
        assert_eq!(
            resolver.resolve(&lazy, None).as_deref(),
            Some("https://static.example.org/x")
        );
    }

    #[test]
    fn test_lazy_source_preferred_over_placeholder() {
        let entry = FeedEntry {
            summary: Some(
                r#"<img src="/assets/spacer.gif" data-src="/uploads/2025/05/campus.jpg" alt="">"#
                    .into(),
            ),
            ..FeedEntry::default()
        };
        assert_eq!(
            ImageResolver::new().resolve(&entry, Some(&base())).as_deref(),
            Some("https://www.example.in/uploads/2025/05/campus.jpg")
        );
    }

    #[test]
    fn test_typed_link_enclosure_beats_markup() {
        let entry = FeedEntry {
            summary: Some(r#"<img src="/img/inline.jpg">"#.into()),
            links: vec![FeedLink {
                href: "https://uni.example.org/images/rank.jpg".into(),
                rel: Some("enclosure".into()),
                mime: Some("image/jpeg".into()),
            }],
            ..FeedEntry::default()
        };
        assert_eq!(
            ImageResolver::new().resolve(&entry, Some(&base())).as_deref(),
            Some("https://uni.example.org/images/rank.jpg")
        );
    }

    #[test]
    fn test_link_enclosure_and_category_fallbacks() {
        let resolver = ImageResolver::new();
        let link = FeedEntry {
            links: vec![
                FeedLink {
                    href: "https://uni.example.org/rankings".into(),
                    rel: Some("alternate".into()),
                    mime: None,
                },
                FeedLink {
                    href: "/images/rank".into(),
                    rel: Some("enclosure".into()),
                    mime: None,
                },
            ],
            ..FeedEntry::default()
        };
        assert_eq!(
            resolver.resolve(&link, Some(&base())).as_deref(),
            Some("https://www.example.in/images/rank")
        );

        let category = FeedEntry {
            categories: vec![FeedCategory {
                term: "Exams".into(),
                label: None,
                scheme: Some("https://example.in/tags/exams.png".into()),
            }],
            ..FeedEntry::default()
        };
        assert_eq!(
            resolver.resolve(&category, None).as_deref(),
            Some("https://example.in/tags/exams.png")
        );
    }

    #[test]
    fn test_no_valid_candidate_yields_none() {
        let entry = FeedEntry {
            thumbnails: vec!["javascript:alert(1)".into(), "relative/no-base.jpg".into()],
            links: vec![FeedLink {
                href: "https://example.com/article/123".into(),
                rel: Some("enclosure".into()),
                mime: Some("image/jpeg".into()),
            }],
            summary: Some("<p>No pictures here</p>".into()),
            ..FeedEntry::default()
        };
        assert_eq!(ImageResolver::new().resolve(&entry, None), None);
    }

    #[test]
    fn test_validate_image_url_heuristics() {
        assert!(validate_image_url("https://x.com/a/pic.JPG?w=300", None).is_some());
        assert!(validate_image_url("https://x.com/uploads/2025/05/hero", None).is_some());
        assert!(validate_image_url("https://x.com/news/story", None).is_none());
        assert!(validate_image_url("ftp://x.com/pic.jpg", None).is_none());
        assert!(validate_image_url("data:image/png;base64,AAAA", None).is_none());
        assert_eq!(
            validate_image_url("//cdn.x.com/p", Some(&base())).as_deref(),
            Some("https://cdn.x.com/p")
        );
    }
}
