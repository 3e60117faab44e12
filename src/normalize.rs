//! Title and URL normalization plus per-source filtering.
//!
//! Every raw candidate passes through [`Normalizer::normalize`] before it can
//! become an [`ArticleRecord`]. The checks, in order:
//!
//! 1. Clean the title (entities decoded, whitespace collapsed, trimmed)
//! 2. Reject empty titles and empty URLs
//! 3. Reject titles shorter than 10 or longer than 200 characters
//! 4. Reject titles containing a navigation/ad skip word
//! 5. Apply the adapter's [`FilterProfile`] (keyword allow-list, geo exclusions)
//! 6. Resolve the URL to an absolute `http(s)` URL against the adapter's base
//!
//! Rejections are values, not errors: the orchestrator counts them by reason.

use crate::error::Rejection;
use crate::models::{ArticleRecord, RawCandidate};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

pub const MIN_TITLE_CHARS: usize = 10;
pub const MAX_TITLE_CHARS: usize = 200;

/// Navigation and advertising tokens that never appear in real headlines.
pub const SKIP_WORDS: [&str; 7] = [
    "subscribe",
    "login",
    "register",
    "advertisement",
    "menu",
    "search",
    "newsletter",
];

/// Query parameters dropped from article URLs. Anything starting with
/// `utm_` is dropped as well.
const TRACKING_PARAMS: [&str; 10] = [
    "ref", "ref_src", "refsrc", "fbclid", "gclid", "mc_cid", "mc_eid", "ocid", "cmpid", "ftag",
];

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<[^>]+>").unwrap());

/// Per-adapter topical and geographic filters.
///
/// Sources in the same category do not share one policy: some only keep
/// keyword matches, some drop titles naming foreign countries, most do
/// neither. The profile travels with each adapter's descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterProfile {
    keywords: Vec<String>,
    excluded_names: Vec<String>,
}

impl FilterProfile {
    /// No filtering.
    pub fn none() -> Self {
        Self::default()
    }

    /// Keep only titles containing at least one of `words` (substring,
    /// case-insensitive).
    pub fn with_keywords(mut self, words: &[&str]) -> Self {
        self.keywords = words.iter().map(|w| w.to_lowercase()).collect();
        self
    }

    /// Drop titles mentioning any of `names` as a whole word.
    pub fn excluding(mut self, names: &[&str]) -> Self {
        self.excluded_names = names.iter().map(|n| n.to_lowercase()).collect();
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn excluded_names(&self) -> &[String] {
        &self.excluded_names
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.excluded_names.is_empty()
    }

    /// Apply both filters to an already cleaned title.
    pub fn check(&self, title: &str) -> Result<(), Rejection> {
        let lower = title.to_lowercase();
        if !self.keywords.is_empty() && !self.keywords.iter().any(|k| lower.contains(k.as_str())) {
            return Err(Rejection::KeywordMiss);
        }
        if let Some(name) = self
            .excluded_names
            .iter()
            .find(|name| mentions_word(&lower, name))
        {
            return Err(Rejection::GeoExcluded(name.clone()));
        }
        Ok(())
    }
}

/// Whole-word, already-lowercased containment check.
fn mentions_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// Decode HTML entities, drop zero-width characters, collapse all
/// whitespace (including non-breaking spaces and newlines) and trim.
pub fn clean_text(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    decoded
        .replace(['\u{200b}', '\u{feff}'], "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove markup from an HTML fragment and clean the remaining text.
pub fn strip_markup(html: &str) -> String {
    clean_text(&RE_TAGS.replace_all(html, " "))
}

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key.as_str())
}

/// Serialize `url`, dropping tracking parameters. When nothing is dropped
/// the `original` text is returned untouched.
fn without_tracking(original: &str, url: &Url) -> String {
    if url.query().is_none() {
        return original.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let kept: Vec<&(String, String)> = pairs.iter().filter(|(k, _)| !is_tracking_param(k)).collect();
    if kept.len() == pairs.len() {
        return original.to_string();
    }
    let mut cleaned = url.clone();
    if kept.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned
            .query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    cleaned.to_string()
}

pub(crate) fn has_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

/// Make `href` an absolute `http(s)` URL.
///
/// Absolute URLs are kept verbatim apart from tracking parameters. Relative
/// URLs (`/path`, `path`, `//host/path`) are joined onto `base`.
pub fn resolve_url(href: &str, base: Option<&Url>) -> Result<String, Rejection> {
    let href = href.trim();
    if href.is_empty() {
        return Err(Rejection::EmptyUrl);
    }
    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        let parsed = Url::parse(href).map_err(|_| Rejection::InvalidUrl(href.to_string()))?;
        if !has_web_scheme(&parsed) {
            return Err(Rejection::InvalidUrl(href.to_string()));
        }
        return Ok(without_tracking(href, &parsed));
    }
    let base = base.ok_or_else(|| Rejection::InvalidUrl(href.to_string()))?;
    let joined = base
        .join(href)
        .map_err(|_| Rejection::InvalidUrl(href.to_string()))?;
    if !has_web_scheme(&joined) {
        return Err(Rejection::InvalidUrl(href.to_string()));
    }
    Ok(without_tracking(joined.as_str(), &joined))
}

/// Turns raw candidates into validated [`ArticleRecord`]s.
#[derive(Debug, Clone)]
pub struct Normalizer {
    skip_words: &'static [&'static str],
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            skip_words: &SKIP_WORDS,
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the skip-word list. Words must be lowercase.
    pub fn with_skip_words(skip_words: &'static [&'static str]) -> Self {
        Self { skip_words }
    }

    /// Validate a title on its own, returning the cleaned form.
    pub fn check_title(&self, raw_title: &str) -> Result<String, Rejection> {
        let title = clean_text(raw_title);
        if title.is_empty() {
            return Err(Rejection::EmptyTitle);
        }
        let len = title.chars().count();
        if !(MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&len) {
            return Err(Rejection::TitleLength(len));
        }
        let lower = title.to_lowercase();
        if let Some(word) = self.skip_words.iter().find(|w| lower.contains(**w)) {
            return Err(Rejection::SkipWord(*word));
        }
        Ok(title)
    }

    /// Validate one candidate against the adapter's base URL and filters.
    pub fn normalize(
        &self,
        raw: RawCandidate,
        base: Option<&Url>,
        filters: &FilterProfile,
    ) -> Result<ArticleRecord, Rejection> {
        if raw.url.trim().is_empty() && !raw.title.trim().is_empty() {
            return Err(Rejection::EmptyUrl);
        }
        let title = self.check_title(&raw.title)?;
        filters.check(&title)?;
        let url = resolve_url(&raw.url, base)?;

        let summary = raw.summary.as_deref().map(strip_markup).filter(|s| !s.is_empty());
        let content = raw.content.as_deref().map(strip_markup).filter(|s| !s.is_empty());
        let image = raw
            .image
            .as_deref()
            .map(str::trim)
            .filter(|i| Url::parse(i).is_ok_and(|u| has_web_scheme(&u)))
            .map(str::to_string);

        Ok(ArticleRecord::validated(
            title,
            url,
            raw.source,
            summary,
            content,
            image,
            raw.published_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.thehindu.com").unwrap()
    }

    #[test]
    fn test_clean_text_collapses_whitespace_and_nbsp() {
        assert_eq!(
            clean_text("  Board exams\n\tpostponed\u{a0}again&nbsp;today  "),
            "Board exams postponed again today"
        );
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<p>Students <b>return</b> to class</p>"),
            "Students return to class"
        );
    }

    #[test]
    fn test_short_title_dropped() {
        let n = Normalizer::new();
        let raw = RawCandidate::new("ok", "https://example.com/a", "Example");
        assert_eq!(
            n.normalize(raw, None, &FilterProfile::none()),
            Err(Rejection::TitleLength(2))
        );
    }

    #[test]
    fn test_long_title_dropped() {
        let n = Normalizer::new();
        let raw = RawCandidate::new("x".repeat(201), "https://example.com/a", "Example");
        assert_eq!(
            n.normalize(raw, None, &FilterProfile::none()),
            Err(Rejection::TitleLength(201))
        );
    }

    #[test]
    fn test_title_bounds_inclusive() {
        let n = Normalizer::new();
        assert!(n.check_title(&"a".repeat(10)).is_ok());
        assert!(n.check_title(&"a".repeat(200)).is_ok());
    }

    #[test]
    fn test_skip_words_case_insensitive() {
        let n = Normalizer::new();
        assert_eq!(
            n.check_title("SUBSCRIBE to our daily briefing"),
            Err(Rejection::SkipWord("subscribe"))
        );
        assert_eq!(
            n.check_title("Sign up for the Newsletter now"),
            Err(Rejection::SkipWord("newsletter"))
        );
    }

    #[test]
    fn test_empty_fields_rejected() {
        let n = Normalizer::new();
        let no_title = RawCandidate::new("   ", "https://example.com/a", "Example");
        assert_eq!(
            n.normalize(no_title, None, &FilterProfile::none()),
            Err(Rejection::EmptyTitle)
        );
        let no_url = RawCandidate::new("A perfectly fine headline", "", "Example");
        assert_eq!(
            n.normalize(no_url, None, &FilterProfile::none()),
            Err(Rejection::EmptyUrl)
        );
    }

    #[test]
    fn test_relative_url_resolved_against_base() {
        let b = base();
        assert_eq!(
            resolve_url("/education/exam-results", Some(&b)).unwrap(),
            "https://www.thehindu.com/education/exam-results"
        );
        assert_eq!(
            resolve_url("//cdn.thehindu.com/x", Some(&b)).unwrap(),
            "https://cdn.thehindu.com/x"
        );
    }

    #[test]
    fn test_absolute_url_unchanged() {
        let b = base();
        let href = "https://indianexpress.com/article/education/cbse-results-9876/";
        assert_eq!(resolve_url(href, Some(&b)).unwrap(), href);
        let with_query = "http://example.com/story?id=42";
        assert_eq!(resolve_url(with_query, None).unwrap(), with_query);
    }

    #[test]
    fn test_tracking_params_removed() {
        assert_eq!(resolve_url("http://x.com/a?ref=1", None).unwrap(), "http://x.com/a");
        assert_eq!(
            resolve_url("https://x.com/a?id=7&utm_source=feed", None).unwrap(),
            "https://x.com/a?id=7"
        );
    }

    #[test]
    fn test_non_web_schemes_rejected() {
        let b = base();
        assert!(matches!(
            resolve_url("javascript:void(0)", Some(&b)),
            Err(Rejection::InvalidUrl(_))
        ));
        assert!(matches!(
            resolve_url("mailto:desk@example.com", Some(&b)),
            Err(Rejection::InvalidUrl(_))
        ));
        assert!(matches!(resolve_url("/relative", None), Err(Rejection::InvalidUrl(_))));
    }

    #[test]
    fn test_keyword_filter() {
        let filters = FilterProfile::none().with_keywords(&["climate", "pollution"]);
        assert!(filters.check("Delhi Pollution levels spike again").is_ok());
        assert_eq!(
            filters.check("Cricket board announces new captain"),
            Err(Rejection::KeywordMiss)
        );
    }

    #[test]
    fn test_geo_exclusion_whole_words() {
        let filters = FilterProfile::none().excluding(&["china", "chad", "uk"]);
        assert_eq!(
            filters.check("Floods in China displace thousands"),
            Err(Rejection::GeoExcluded("china".into()))
        );
        assert!(filters.check("Raghav Chadha visits flood-hit villages").is_ok());
        assert!(filters.check("Duke scholars publish river study").is_ok());
    }

    #[test]
    fn test_normalize_full_record() {
        let n = Normalizer::new();
        let b = base();
        let raw = RawCandidate {
            title: "  Schools reopen\nafter monsoon break ".into(),
            url: "/news/schools-reopen".into(),
            source: "The Hindu".into(),
            summary: Some("<p>All <i>schools</i> open</p>".into()),
            content: None,
            image: Some("not a url".into()),
            published_at: None,
        };
        let rec = n.normalize(raw, Some(&b), &FilterProfile::none()).unwrap();
        assert_eq!(rec.title(), "Schools reopen after monsoon break");
        assert_eq!(rec.url(), "https://www.thehindu.com/news/schools-reopen");
        assert_eq!(rec.summary(), Some("All schools open"));
        assert_eq!(rec.image(), None);
    }
}
