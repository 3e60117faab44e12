//! Cross-source duplicate removal.
//!
//! Two canonical keys are derived from every record and checked
//! independently. A record that collides on *either* key is dropped, so the
//! merge errs on the side of uniqueness: two stories sharing a headline but
//! not a URL still count as one.

use crate::models::ArticleRecord;
use std::collections::HashSet;

/// Maximum number of characters kept in a title key.
pub const TITLE_KEY_CHARS: usize = 60;

/// Keys used purely for duplicate detection, never for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKeys {
    pub url_key: String,
    pub title_key: String,
}

impl CanonicalKeys {
    pub fn of(url: &str, title: &str) -> Self {
        Self {
            url_key: url_key(url),
            title_key: title_key(title),
        }
    }
}

/// URL without query string and fragment, lower-cased.
pub fn url_key(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].to_lowercase()
}

/// Title lower-cased, non-alphanumerics removed, first 60 characters.
pub fn title_key(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .take(TITLE_KEY_CHARS)
        .collect()
}

/// Order-preserving, first-occurrence-wins deduplicator for one run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen_urls: HashSet<String>,
    seen_titles: HashSet<String>,
    rejected: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `record` if neither key was seen before; both keys are
    /// recorded only on acceptance.
    ///
    /// An empty title key (all punctuation) is a key like any other, so only
    /// the first such record gets through.
    pub fn admit(&mut self, record: &ArticleRecord) -> bool {
        let keys = CanonicalKeys::of(record.url(), record.title());
        if self.seen_urls.contains(&keys.url_key) || self.seen_titles.contains(&keys.title_key) {
            self.rejected += 1;
            return false;
        }
        self.seen_urls.insert(keys.url_key);
        self.seen_titles.insert(keys.title_key);
        true
    }

    /// Filter a whole batch, keeping arrival order.
    pub fn dedup(&mut self, records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        records.into_iter().filter(|r| self.admit(r)).collect()
    }

    /// Number of records dropped so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: &str, url: &str, source: &str) -> ArticleRecord {
        ArticleRecord::validated(
            title.into(),
            url.into(),
            source.into(),
            None,
            None,
            None,
            None,
        )
    }

    #[test]
    fn test_url_key_strips_query_and_fragment() {
        assert_eq!(url_key("HTTP://X.com/A?ref=1#top"), "http://x.com/a");
        assert_eq!(url_key("https://x.com/a#frag"), "https://x.com/a");
        assert_eq!(url_key("https://x.com/a"), "https://x.com/a");
    }

    #[test]
    fn test_title_key_normalization() {
        assert_eq!(title_key("CBSE Results: Out Now!"), "cbseresultsoutnow");
        let long = "a".repeat(100);
        assert_eq!(title_key(&long).chars().count(), TITLE_KEY_CHARS);
    }

    #[test]
    fn test_first_occurrence_wins_on_query_variant() {
        let mut d = Deduplicator::new();
        let out = d.dedup(vec![
            rec("Exam schedule released", "http://x.com/u1", "s1"),
            rec("Exam schedule released", "http://x.com/u1?query=x", "s2"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source(), "s1");
        assert_eq!(d.rejected(), 1);
    }

    #[test]
    fn test_either_key_collision_rejects() {
        let mut d = Deduplicator::new();
        let out = d.dedup(vec![
            rec("First headline of the day", "https://a.com/1", "s1"),
            rec("Different headline entirely", "https://a.com/1", "s2"),
            rec("First headline of the day!", "https://b.com/2", "s3"),
            rec("A genuinely new headline", "https://c.com/3", "s4"),
        ]);
        let sources: Vec<&str> = out.iter().map(|r| r.source()).collect();
        assert_eq!(sources, vec!["s1", "s4"]);
    }

    #[test]
    fn test_order_is_stable() {
        let mut d = Deduplicator::new();
        let input: Vec<ArticleRecord> = (0..5)
            .map(|i| rec(&format!("Headline number {i}"), &format!("https://x.com/{i}"), "s"))
            .collect();
        let out = d.dedup(input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn test_incremental_admission_matches_batch() {
        let mut d = Deduplicator::new();
        assert!(d.admit(&rec("Unique headline one", "https://x.com/1", "a")));
        assert!(!d.admit(&rec("Unique headline one", "https://y.com/1", "b")));
        assert!(d.admit(&rec("Unique headline two", "https://y.com/1", "b")));
    }

    #[test]
    fn test_punctuation_only_titles_share_the_empty_key() {
        let mut d = Deduplicator::new();
        assert_eq!(title_key("!!!!!!!!!!!!"), "");
        assert!(d.admit(&rec("!!!!!!!!!!!!", "https://x.com/1", "a")));
        assert!(!d.admit(&rec("????????????", "https://x.com/2", "a")));
        assert!(d.admit(&rec("A real headline here", "https://x.com/3", "a")));
        assert_eq!(d.rejected(), 1);
    }
}
