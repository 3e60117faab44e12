//! HTML listing-page strategy.
//!
//! Most sites publish a section page (`/education`, `/environment`) whose
//! headlines are links. An [`HtmlSource`] fetches one or more of those pages
//! and applies a list of [`ExtractRule`]s, each a CSS selector plus where the
//! headline text lives relative to the matched element.
//!
//! # URL Pattern
//!
//! Paginated sections are described by a [`PagePlan`]: the first page URL and
//! a template containing `{page}` for the following ones, e.g.
//! `https://www.financialexpress.com/about/education/page/{page}/`. Templates
//! may also contain `{query}`, replaced by the URL-encoded topic.

use super::http;
use super::{page_failure, CandidateSink, FetchContext, Harvest, SourceAdapter, SourceDescriptor};
use crate::error::SourceError;
use crate::models::RawCandidate;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static IMAGE_WITH_ALT: Lazy<Selector> = Lazy::new(|| Selector::parse("img[alt]").unwrap());

fn parse_selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Config(format!("invalid selector '{css}': {e:?}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Where a rule finds the headline of a matched element.
#[derive(Debug, Clone)]
pub enum TitleFrom {
    /// All text inside the element.
    Text,
    /// An attribute of the element or its link (`aria-label`, `title`).
    Attr(String),
    /// Text of the first descendant matching a selector (`span`, `h2`).
    Child(Selector),
    /// `alt` of the first image inside the element.
    ImageAlt,
}

/// One CSS selector plus its title source.
#[derive(Debug, Clone)]
pub struct ExtractRule {
    selector: Selector,
    title: TitleFrom,
}

impl ExtractRule {
    pub fn text(css: &str) -> Result<Self, SourceError> {
        Ok(Self {
            selector: parse_selector(css)?,
            title: TitleFrom::Text,
        })
    }

    pub fn attr(css: &str, attribute: &str) -> Result<Self, SourceError> {
        Ok(Self {
            selector: parse_selector(css)?,
            title: TitleFrom::Attr(attribute.to_string()),
        })
    }

    pub fn child(css: &str, child_css: &str) -> Result<Self, SourceError> {
        Ok(Self {
            selector: parse_selector(css)?,
            title: TitleFrom::Child(parse_selector(child_css)?),
        })
    }

    pub fn image_alt(css: &str) -> Result<Self, SourceError> {
        Ok(Self {
            selector: parse_selector(css)?,
            title: TitleFrom::ImageAlt,
        })
    }

    fn title_of(&self, element: ElementRef<'_>, anchor: ElementRef<'_>) -> Option<String> {
        let raw = match &self.title {
            TitleFrom::Text => Some(element_text(element)),
            TitleFrom::Attr(name) => element
                .value()
                .attr(name)
                .or_else(|| anchor.value().attr(name))
                .map(str::to_string),
            TitleFrom::Child(child) => element
                .select(child)
                .next()
                .or_else(|| anchor.select(child).next())
                .map(element_text),
            TitleFrom::ImageAlt => element
                .select(&IMAGE_WITH_ALT)
                .next()
                .and_then(|img| img.value().attr("alt"))
                .map(str::to_string),
        }?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// The link for a matched element: itself, its first descendant link, or the
/// link wrapping it.
fn find_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if element.value().name() == "a" && element.value().attr("href").is_some() {
        return Some(element);
    }
    element.select(&ANCHOR).next().or_else(|| {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "a" && e.value().attr("href").is_some())
    })
}

/// Which listing pages to crawl.
#[derive(Debug, Clone)]
pub struct PagePlan {
    fixed: Vec<String>,
    template: Option<String>,
    pages: usize,
}

impl PagePlan {
    pub fn single(url: &str) -> Self {
        Self::list(&[url])
    }

    /// A fixed list of pages, e.g. several topic pages of one site.
    pub fn list(urls: &[&str]) -> Self {
        Self {
            fixed: urls.iter().map(|u| u.to_string()).collect(),
            template: None,
            pages: urls.len().max(1),
        }
    }

    /// `first`, then `template` with `{page}` = 2, 3, ... up to `pages`.
    pub fn paged(first: &str, template: &str, pages: usize) -> Self {
        Self {
            fixed: vec![first.to_string()],
            template: Some(template.to_string()),
            pages: pages.max(1),
        }
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Concrete URLs for at most `limit` pages.
    pub fn urls(&self, limit: usize, query: &str) -> Vec<String> {
        let query = urlencoding::encode(query);
        let fill = |raw: &str, page: usize| {
            raw.replace("{page}", &page.to_string())
                .replace("{query}", &query)
        };
        let mut urls: Vec<String> = self
            .fixed
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, u)| fill(u, i + 1))
            .collect();
        if let Some(template) = &self.template {
            let next = urls.len() + 1;
            urls.extend((next..=limit).map(|n| fill(template, n)));
        }
        urls
    }
}

/// A source scraped from HTML listing pages.
#[derive(Debug, Clone)]
pub struct HtmlSource {
    descriptor: SourceDescriptor,
    pages: PagePlan,
    rules: Vec<ExtractRule>,
    href_contains: Option<String>,
    strip_query: bool,
    topic: String,
}

impl HtmlSource {
    pub fn new(descriptor: SourceDescriptor, pages: PagePlan, rules: Vec<ExtractRule>) -> Self {
        Self {
            descriptor,
            pages,
            rules,
            href_contains: None,
            strip_query: false,
            topic: String::new(),
        }
    }

    /// Only keep links whose raw `href` contains `needle`.
    pub fn require_href(mut self, needle: &str) -> Self {
        self.href_contains = Some(needle.to_string());
        self
    }

    /// Cut `?query` and `#fragment` off every link.
    pub fn strip_query(mut self) -> Self {
        self.strip_query = true;
        self
    }

    /// Default value for `{query}` in page URLs.
    pub fn with_topic(mut self, topic: &str) -> Self {
        self.topic = topic.to_string();
        self
    }

    /// Apply every rule to one page, in rule order.
    ///
    /// # Returns
    ///
    /// How many new candidates the page contributed.
    fn extract(&self, body: &str, sink: &mut CandidateSink) -> usize {
        let document = Html::parse_document(body);
        let mut added = 0;
        for rule in &self.rules {
            for element in document.select(&rule.selector) {
                if sink.is_full() {
                    return added;
                }
                let Some(anchor) = find_anchor(element) else {
                    continue;
                };
                let href = anchor.value().attr("href").unwrap_or_default().trim();
                if href.is_empty() || href.starts_with('#') {
                    continue;
                }
                if let Some(needle) = &self.href_contains {
                    if !href.contains(needle.as_str()) {
                        continue;
                    }
                }
                let href = if self.strip_query {
                    &href[..href.find(['?', '#']).unwrap_or(href.len())]
                } else {
                    href
                };
                let Some(title) = rule.title_of(element, anchor) else {
                    continue;
                };
                if sink.push(RawCandidate::new(title, href, &self.descriptor.display_name)) {
                    added += 1;
                }
            }
        }
        added
    }
}

#[async_trait]
impl SourceAdapter for HtmlSource {
    fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    #[instrument(level = "info", skip_all, fields(source = %self.descriptor.key))]
    async fn fetch(&self, ctx: &FetchContext) -> Result<Harvest, SourceError> {
        let mut sink = CandidateSink::new(ctx.max_items);
        let urls = self
            .pages
            .urls(ctx.page_limit(self.pages.pages()), ctx.query_or(&self.topic));

        for (index, page) in urls.iter().enumerate() {
            if sink.is_full() {
                debug!(count = sink.len(), "Item cap reached");
                break;
            }
            let url = match Url::parse(page) {
                Ok(url) => url,
                Err(e) => {
                    let cause = SourceError::Config(format!("bad page url '{page}': {e}"));
                    return page_failure(index, sink, cause);
                }
            };
            let body = match http::get_text(ctx, &url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(error = %e, page = index + 1, %url, "Listing page fetch failed");
                    return page_failure(index, sink, e);
                }
            };
            let found = self.extract(&body, &mut sink);
            debug!(page = index + 1, found, %url, "Parsed listing page");
        }

        info!(count = sink.len(), "Indexed listing headlines");
        Ok(sink.finish(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use std::time::Duration;
    use tokio::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE_ONE: &str = r##"<html><body>
        <h3><a href="/education/board-results-2025">CBSE board results declared today</a></h3>
        <h3><a href="https://other.example.com/ad">Subscribe to our newsletter</a></h3>
        <h2><a href="/education/neet-counselling?utm_source=home">NEET counselling schedule released</a></h2>
        <h3><a href="#top">Back to the very top</a></h3>
    </body></html>"##;

    const PAGE_TWO: &str = r#"<html><body>
        <h3><a href="/education/board-results-2025">CBSE board results declared today</a></h3>
        <h3><a href="/education/jee-main-cutoff">JEE Main cutoff expected to rise</a></h3>
    </body></html>"#;

    fn ctx() -> FetchContext {
        FetchContext::new(reqwest::Client::new(), Region::India)
    }

    fn source(base: &str, plan: PagePlan) -> HtmlSource {
        let descriptor = SourceDescriptor::new("test_site", "Test Site", base).unwrap();
        HtmlSource::new(
            descriptor,
            plan,
            vec![ExtractRule::text("h3 a").unwrap(), ExtractRule::text("h2 a").unwrap()],
        )
    }

    #[tokio::test]
    async fn test_fetch_single_page() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/education"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_ONE))
            .mount(&mock_server)
            .await;

        let base = mock_server.uri();
        let src = source(&base, PagePlan::single(&format!("{base}/education")));
        let harvest = src.fetch(&ctx()).await.unwrap();

        assert!(harvest.degraded.is_none());
        let titles: Vec<&str> = harvest.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "CBSE board results declared today",
                "Subscribe to our newsletter",
                "NEET counselling schedule released",
            ]
        );
        assert_eq!(harvest.candidates[0].url, "/education/board-results-2025");
        assert_eq!(harvest.candidates[0].source, "Test Site");
    }

    #[tokio::test]
    async fn test_fetch_paginated_dedups_across_pages() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/education"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_ONE))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/education/page/2/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_TWO))
            .mount(&mock_server)
            .await;

        let base = mock_server.uri();
        let plan = PagePlan::paged(
            &format!("{base}/education"),
            &format!("{base}/education/page/{{page}}/"),
            2,
        );
        let harvest = source(&base, plan).require_href("/education/").fetch(&ctx()).await.unwrap();

        let titles: Vec<&str> = harvest.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "CBSE board results declared today",
                "NEET counselling schedule released",
                "JEE Main cutoff expected to rise",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_on_second_page_keeps_first() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/education"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_ONE))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/education/page/2/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let base = mock_server.uri();
        let plan = PagePlan::paged(
            &format!("{base}/education"),
            &format!("{base}/education/page/{{page}}/"),
            3,
        );
        let harvest = source(&base, plan).fetch(&ctx()).await.unwrap();

        assert_eq!(harvest.candidates.len(), 3);
        assert!(matches!(
            harvest.degraded,
            Some(SourceError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_deadline_during_pagination_keeps_first_page() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/education"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_ONE))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/education/page/2/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(PAGE_TWO)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let base = mock_server.uri();
        let plan = PagePlan::paged(
            &format!("{base}/education"),
            &format!("{base}/education/page/{{page}}/"),
            3,
        );
        let mut ctx = ctx();
        ctx.deadline = Some(Instant::now() + Duration::from_millis(800));
        let started = Instant::now();
        let harvest = source(&base, plan).fetch(&ctx).await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(4));
        assert_eq!(harvest.candidates.len(), 3);
        assert_eq!(harvest.candidates[0].title, "CBSE board results declared today");
        assert!(matches!(
            harvest.degraded,
            Some(SourceError::Cancelled) | Some(SourceError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_failure_on_first_page_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let base = mock_server.uri();
        let src = source(&base, PagePlan::single(&format!("{base}/education")));
        let err = src.fetch(&ctx()).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 404, .. }));
    }

    #[test]
    fn test_rule_title_sources_and_query_stripping() {
        let html = r#"<html><body>
            <a aria-label="Climate summit ends with a deal" href="/2025/05/climate-deal?ref=rss">Read</a>
            <div class="lSIdy"><a href="/tech/phones.cms?from=mdr"><span>New phone launch in India</span></a></div>
            <figure><a href="/sports/final"><img alt="Cricket final goes to the wire" src="x.jpg"></a></figure>
            <div class="card"><h2 class="headline">Headline inside a linked card</h2></div>
        </body></html>"#;
        let descriptor = SourceDescriptor::new("t", "T", "https://news.example.com").unwrap();
        let src = HtmlSource::new(
            descriptor,
            PagePlan::single("https://news.example.com"),
            vec![
                ExtractRule::attr("a[aria-label]", "aria-label").unwrap(),
                ExtractRule::child("div.lSIdy a", "span").unwrap(),
                ExtractRule::image_alt("figure").unwrap(),
                ExtractRule::text("div.card h2").unwrap(),
            ],
        )
        .strip_query();

        let mut sink = CandidateSink::new(None);
        assert_eq!(src.extract(html, &mut sink), 3);
        let harvest = sink.finish(None);
        assert_eq!(harvest.candidates[0].title, "Climate summit ends with a deal");
        assert_eq!(harvest.candidates[0].url, "/2025/05/climate-deal");
        assert_eq!(harvest.candidates[1].url, "/tech/phones.cms");
        assert_eq!(harvest.candidates[2].title, "Cricket final goes to the wire");
    }

    #[test]
    fn test_extract_stops_at_cap() {
        let descriptor = SourceDescriptor::new("t", "T", "https://news.example.com").unwrap();
        let src = HtmlSource::new(
            descriptor,
            PagePlan::single("https://news.example.com"),
            vec![ExtractRule::text("h3 a").unwrap()],
        );
        let mut sink = CandidateSink::new(Some(1));
        assert_eq!(src.extract(PAGE_TWO, &mut sink), 1);
        assert!(sink.is_full());
    }

    #[test]
    fn test_page_plan_list_respects_limit() {
        let plan = PagePlan::list(&[
            "https://www.scoop.it/topic/education-news",
            "https://www.scoop.it/topic/global-education",
        ]);
        assert_eq!(plan.pages(), 2);
        assert_eq!(plan.urls(1, "").len(), 1);
        assert_eq!(plan.urls(5, "").len(), 2);
    }

    #[test]
    fn test_page_plan_urls() {
        let plan = PagePlan::paged(
            "https://www.thehindu.com/sci-tech/energy-and-environment/?page=1",
            "https://www.thehindu.com/sci-tech/energy-and-environment/?page={page}",
            5,
        );
        let urls = plan.urls(3, "");
        assert_eq!(urls.len(), 3);
        assert!(urls[2].ends_with("?page=3"));

        let search = PagePlan::paged(
            "https://www.euronews.com/search?query={query}",
            "https://www.euronews.com/search?query={query}&p={page}",
            2,
        );
        let urls = search.urls(2, "climate change");
        assert_eq!(urls[0], "https://www.euronews.com/search?query=climate%20change");
        assert_eq!(urls[1], "https://www.euronews.com/search?query=climate%20change&p=2");
    }
}
