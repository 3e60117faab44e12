//! Built-in site catalog.
//!
//! Every site is a configured [`HtmlSource`], [`FeedSource`] or
//! [`SearchApiSource`]; nothing here performs I/O. Keys follow the names
//! downstream callers already use (`hindustan_times`, `the_hindu`, ...), so
//! the same key can mean a different section page in each category.
//!
//! # Supported Sources
//!
//! | Category | India | Global |
//! |----------|-------|--------|
//! | general | flipboard, scoopit, hindustan_times, times_of_india, indian_express, the_hindu, deccan_herald, ndtv, financial_express, india_today, edexlive, toi_rss, the_hindu_rss | flipboard, scoopit, bbc, guardian, nytimes, washington_post, telegraph, times_higher_education, inside_higher_ed, edweek, chronicle, bbc_rss, hechinger_report, edweek_rss, university_world_news |
//! | environment | deccan_herald, indian_express, ndtv, hindustan_times, times_of_india, the_hindu | euronews, cnbc, guardian |
//! | technology | hindustan_times, times_of_india, financial_express, indian_express | guardian, euronews, cnbc |
//! | sports | espncricinfo, indian_express_sports, ndtv_sports, the_hindu, times_of_india_sports | espn_global, guardian_sports, bbc_sport |
//! | higher_education | deccan_herald, financial_express, indian_express, toi | times_higher_education, inside_higher_ed, guardian |

use super::feed::FeedSource;
use super::html::{ExtractRule, HtmlSource, PagePlan};
use super::search::SearchApiSource;
use super::{SourceAdapter, SourceDescriptor};
use crate::error::SourceError;
use crate::models::{Category, Region};
use crate::normalize::FilterProfile;
use crate::registry::SourceRegistry;
use std::sync::Arc;
use tracing::debug;

pub const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "technology", "tech", "ai", "artificial intelligence", "machine learning", "deep learning",
    "data science", "robotics", "quantum", "5g", "iot", "cybersecurity", "hacking", "software",
    "hardware", "semiconductor", "startup", "cloud", "computing", "mobile", "gadget",
    "internet", "app", "programming", "coding", "developer", "python", "javascript",
    "meta", "google", "microsoft", "apple", "openai", "chatgpt", "elon", "tesla", "neuralink",
];

pub const HIGHER_ED_KEYWORDS: &[&str] = &[
    "university", "universities", "college", "higher education", "phd",
    "postgraduate", "campus", "admission", "rankings", "faculty", "research",
    "degree", "institute", "jee", "neet", "engineering", "iit", "mbbs",
    "aiims", "iim", "mba", "btech", "mtech", "bsc", "msc", "bcom", "mcom",
    "ba", "ma", "llb", "llm", "medical", "law", "management", "programming",
    "resume", "placement", "internship", "gate", "cat", "mat", "xat", "ugc",
    "net", "cuet", "nift", "nlu", "nlsiu", "scholarship", "fellowship",
];

/// Country names other than India, for sources that should stay domestic.
pub const FOREIGN_COUNTRIES: &[&str] = &[
    "afghanistan", "albania", "algeria", "andorra", "angola", "argentina", "armenia", "australia", "austria",
    "azerbaijan", "bahamas", "bahrain", "bangladesh", "barbados", "belarus", "belgium", "belize", "benin",
    "bhutan", "bolivia", "bosnia", "botswana", "brazil", "brunei", "bulgaria", "burkina", "burundi", "cambodia",
    "cameroon", "canada", "cape verde", "central african republic", "chad", "chile", "china", "colombia",
    "comoros", "congo", "costa rica", "croatia", "cuba", "cyprus", "czech", "denmark", "djibouti", "dominica",
    "dominican republic", "east timor", "ecuador", "egypt", "el salvador", "equatorial guinea", "eritrea",
    "estonia", "eswatini", "ethiopia", "fiji", "finland", "france", "gabon", "gambia", "georgia", "germany",
    "ghana", "greece", "grenada", "guatemala", "guinea", "guinea-bissau", "guyana", "haiti", "honduras",
    "hungary", "iceland", "indonesia", "iran", "iraq", "ireland", "israel", "italy", "ivory coast", "jamaica",
    "japan", "jordan", "kazakhstan", "kenya", "kiribati", "korea", "kosovo", "kuwait", "kyrgyzstan", "laos",
    "latvia", "lebanon", "lesotho", "liberia", "libya", "liechtenstein", "lithuania", "luxembourg", "madagascar",
    "malawi", "malaysia", "maldives", "mali", "malta", "marshall islands", "mauritania", "mauritius", "mexico",
    "micronesia", "moldova", "monaco", "mongolia", "montenegro", "morocco", "mozambique", "myanmar", "namibia",
    "nauru", "nepal", "netherlands", "new zealand", "nicaragua", "niger", "nigeria", "north macedonia",
    "norway", "oman", "pakistan", "palau", "palestine", "panama", "papua new guinea", "paraguay", "peru",
    "philippines", "poland", "portugal", "qatar", "romania", "russia", "rwanda", "saint kitts", "saint lucia",
    "saint vincent", "samoa", "san marino", "sao tome", "saudi arabia", "senegal", "serbia", "seychelles",
    "sierra leone", "singapore", "slovakia", "slovenia", "solomon islands", "somalia", "south africa",
    "south sudan", "spain", "sri lanka", "sudan", "suriname", "sweden", "switzerland", "syria", "taiwan",
    "tajikistan", "tanzania", "thailand", "togo", "tonga", "trinidad", "tunisia", "turkey", "turkmenistan",
    "tuvalu", "uganda", "ukraine", "united arab emirates", "united kingdom", "uk", "usa", "united states",
    "uruguay", "uzbekistan", "vanuatu", "vatican", "venezuela", "vietnam", "yemen", "zambia", "zimbabwe",
];

type Adapters = Vec<Arc<dyn SourceAdapter>>;

fn site(key: &str, name: &str, base: &str) -> Result<SourceDescriptor, SourceError> {
    SourceDescriptor::new(key, name, base)
}

/// One text rule per selector, in order.
fn text_rules(selectors: &[&str]) -> Result<Vec<ExtractRule>, SourceError> {
    selectors.iter().map(|css| ExtractRule::text(css)).collect()
}

/// A single listing page scraped with plain text rules.
fn listing(key: &str, name: &str, base: &str, page: &str, selectors: &[&str]) -> Result<HtmlSource, SourceError> {
    Ok(HtmlSource::new(site(key, name, base)?, PagePlan::single(page), text_rules(selectors)?))
}

/// Guardian section pages label each card link with `aria-label`; dated
/// article paths contain `/202x`.
fn guardian(key: &str, page: &str) -> Result<HtmlSource, SourceError> {
    Ok(HtmlSource::new(
        site(key, "The Guardian", "https://www.theguardian.com")?,
        PagePlan::single(page),
        vec![ExtractRule::attr("a[aria-label]", "aria-label")?],
    )
    .require_href("/202"))
}

fn cnbc(page: &str) -> Result<HtmlSource, SourceError> {
    listing("cnbc", "CNBC", "https://www.cnbc.com", page, &["div[data-test='Card'] a.Card-title"])
}

fn flipboard(region: Region) -> Result<HtmlSource, SourceError> {
    let page = match region {
        Region::India => "https://flipboard.com/topic/educationindia",
        Region::Global => "https://flipboard.com/topic/education",
    };
    Ok(HtmlSource::new(
        site("flipboard", "Flipboard", "https://flipboard.com")?,
        PagePlan::single(page),
        vec![
            ExtractRule::child("a[href*='/story/']", "h2, div.title")?,
            ExtractRule::text("a[href*='/story/']")?,
            ExtractRule::text("a.article-link")?,
            ExtractRule::child("div.article, article.story", "h2, div.title")?,
        ],
    ))
}

fn scoopit(region: Region) -> Result<HtmlSource, SourceError> {
    let pages: &[&str] = match region {
        Region::India => &[
            "https://www.scoop.it/topic/education-in-india",
            "https://www.scoop.it/topic/indian-education-system",
        ],
        Region::Global => &[
            "https://www.scoop.it/topic/education-news",
            "https://www.scoop.it/topic/higher-education-today",
            "https://www.scoop.it/topic/global-education",
        ],
    };
    Ok(HtmlSource::new(
        site("scoopit", "Scoop.it", "https://www.scoop.it")?,
        PagePlan::list(pages),
        vec![ExtractRule::child("[class*='postItem']", "h2, h3, .title")?],
    ))
}

fn feed(key: &str, name: &str, base: &str, feeds: &[&str]) -> Result<FeedSource, SourceError> {
    Ok(FeedSource::new(site(key, name, base)?, feeds))
}

fn india_general() -> Result<Adapters, SourceError> {
    Ok(vec![
        Arc::new(flipboard(Region::India)?),
        Arc::new(scoopit(Region::India)?),
        Arc::new(listing(
            "hindustan_times",
            "Hindustan Times",
            "https://www.hindustantimes.com",
            "https://www.hindustantimes.com/education",
            &["h3 a", "h2 a", ".story-box a", ".listView a", ".story-title a"],
        )?),
        Arc::new(
            HtmlSource::new(
                site("times_of_india", "Times of India", "https://timesofindia.indiatimes.com")?
                    .with_max_items(40),
                PagePlan::single("https://timesofindia.indiatimes.com/education"),
                vec![
                    ExtractRule::child("div.lSIdy.col_l_6.col_m_6 a[href]", "span")?,
                    ExtractRule::child("a[href*='education']", "figcaption")?,
                    ExtractRule::child("a.linktype1[href*='education']", "span")?,
                ],
            )
            .strip_query(),
        ),
        Arc::new(listing(
            "indian_express",
            "Indian Express",
            "https://indianexpress.com",
            "https://indianexpress.com/section/education/",
            &[".title a", "h2 a", ".articles a", ".entry-title a"],
        )?),
        Arc::new(listing(
            "the_hindu",
            "The Hindu",
            "https://www.thehindu.com",
            "https://www.thehindu.com/education/",
            &[".title a", "h2 a", "h3 a", ".story-card-news a"],
        )?),
        Arc::new(listing(
            "deccan_herald",
            "Deccan Herald",
            "https://www.deccanherald.com",
            "https://www.deccanherald.com/education",
            &[".article-title a", "h2 a", "h3 a", ".story-title a"],
        )?),
        Arc::new(listing(
            "ndtv",
            "NDTV",
            "https://www.ndtv.com",
            "https://www.ndtv.com/education",
            &[".newsHdng a", "h2 a", "h1 a", ".news-title a"],
        )?),
        Arc::new(HtmlSource::new(
            site("financial_express", "Financial Express", "https://www.financialexpress.com")?
                .with_max_items(30),
            PagePlan::paged(
                "https://www.financialexpress.com/about/education/",
                "https://www.financialexpress.com/about/education/page/{page}/",
                5,
            ),
            text_rules(&["div.entry-wrapper div.entry-title a"])?,
        )),
        Arc::new(HtmlSource::new(
            site("india_today", "India Today", "https://www.indiatoday.in")?,
            PagePlan::single("https://www.indiatoday.in/education-today/news"),
            vec![ExtractRule::attr("div.B1S3_content__wrap__9mSB6 a[href][title]", "title")?],
        )),
        Arc::new(feed(
            "edexlive",
            "EdexLive",
            "https://www.edexlive.com",
            &["https://www.edexlive.com/news/rssfeed/?id=198&getXmlFeed=true"],
        )?),
        Arc::new(feed(
            "toi_rss",
            "Times of India",
            "https://timesofindia.indiatimes.com",
            &["https://timesofindia.indiatimes.com/education/rssfeeds/913168846.cms"],
        )?),
        Arc::new(feed(
            "the_hindu_rss",
            "The Hindu",
            "https://www.thehindu.com",
            &["https://www.thehindu.com/education/feeder/default.rss"],
        )?),
    ])
}

fn global_general() -> Result<Adapters, SourceError> {
    Ok(vec![
        Arc::new(flipboard(Region::Global)?),
        Arc::new(scoopit(Region::Global)?),
        Arc::new(listing(
            "bbc",
            "BBC",
            "https://www.bbc.com",
            "https://www.bbc.com/news/education",
            &["h3 a", "h2 a", ".gel-layout__item a", ".media__content a"],
        )?),
        Arc::new(listing(
            "guardian",
            "The Guardian",
            "https://www.theguardian.com",
            "https://www.theguardian.com/education",
            &[".fc-item__title a", ".u-faux-block-link__overlay", "h3 a"],
        )?),
        Arc::new(listing(
            "nytimes",
            "New York Times",
            "https://www.nytimes.com",
            "https://www.nytimes.com/section/education",
            &["h3 a", "h2 a", ".css-1l4spti a"],
        )?),
        Arc::new(listing(
            "washington_post",
            "Washington Post",
            "https://www.washingtonpost.com",
            "https://www.washingtonpost.com/education/",
            &["h3 a", "h2 a", ".headline a", ".title a"],
        )?),
        Arc::new(listing(
            "telegraph",
            "The Telegraph",
            "https://www.telegraph.co.uk",
            "https://www.telegraph.co.uk/education/",
            &["h3 a", "h2 a", ".list-headline a", ".card__heading a"],
        )?),
        Arc::new(listing(
            "times_higher_education",
            "Times Higher Education",
            "https://www.timeshighereducation.com",
            "https://www.timeshighereducation.com/news",
            &["h3 a", "h2 a", ".views-field-title a", ".article-title a"],
        )?),
        Arc::new(listing(
            "inside_higher_ed",
            "Inside Higher Ed",
            "https://www.insidehighered.com",
            "https://www.insidehighered.com/news",
            &["h3 a", "h2 a", ".views-field-title a", ".article-title a"],
        )?),
        Arc::new(listing(
            "edweek",
            "Education Week",
            "https://www.edweek.org",
            "https://www.edweek.org/",
            &["h3 a", "h2 a", ".article-title a", ".headline a"],
        )?),
        Arc::new(listing(
            "chronicle",
            "The Chronicle of Higher Education",
            "https://www.chronicle.com",
            "https://www.chronicle.com/",
            &["h3 a", "h2 a", ".hed a", ".title a"],
        )?),
        Arc::new(feed(
            "bbc_rss",
            "BBC",
            "https://www.bbc.co.uk",
            &["https://feeds.bbci.co.uk/news/education/rss.xml"],
        )?),
        Arc::new(feed(
            "hechinger_report",
            "The Hechinger Report",
            "https://hechingerreport.org",
            &["https://hechingerreport.org/feed/"],
        )?),
        Arc::new(feed(
            "edweek_rss",
            "Education Week",
            "https://www.edweek.org",
            &["https://www.edweek.org/api/rss.xml"],
        )?),
        Arc::new(feed(
            "university_world_news",
            "University World News",
            "https://www.universityworldnews.com",
            &["https://www.universityworldnews.com/rss.php"],
        )?),
    ])
}

fn india_environment() -> Result<Adapters, SourceError> {
    let domestic = || FilterProfile::none().excluding(FOREIGN_COUNTRIES);
    Ok(vec![
        Arc::new(listing(
            "deccan_herald",
            "Deccan Herald",
            "https://www.deccanherald.com",
            "https://www.deccanherald.com/environment",
            &["div.story-card-15 h2.headline"],
        )?),
        Arc::new(
            listing(
                "indian_express",
                "Indian Express",
                "https://indianexpress.com",
                "https://indianexpress.com/about/environment/",
                &["h3 a"],
            )?
            .require_href("/environment/"),
        ),
        Arc::new(listing(
            "ndtv",
            "NDTV",
            "https://www.ndtv.com",
            "https://www.ndtv.com/environment",
            &["div.NwsLstPg_txt-wrp a.NwsLstPg_ttl"],
        )?),
        Arc::new(HtmlSource::new(
            site("hindustan_times", "Hindustan Times", "https://www.hindustantimes.com")?
                .with_filters(domestic()),
            PagePlan::single("https://www.hindustantimes.com/environment"),
            text_rules(&["h3.hdg3 a"])?,
        )),
        Arc::new(HtmlSource::new(
            site("times_of_india", "Times of India", "https://timesofindia.indiatimes.com")?
                .with_filters(domestic()),
            PagePlan::single("https://timesofindia.indiatimes.com/home/environment"),
            text_rules(&["span.w_tle a[title]"])?,
        )),
        Arc::new(HtmlSource::new(
            site("the_hindu", "The Hindu", "https://www.thehindu.com")?.with_filters(domestic()),
            PagePlan::paged(
                "https://www.thehindu.com/sci-tech/energy-and-environment/?page=1",
                "https://www.thehindu.com/sci-tech/energy-and-environment/?page={page}",
                5,
            ),
            text_rules(&["h3.title.big a"])?,
        )),
    ])
}

fn global_environment() -> Result<Adapters, SourceError> {
    Ok(vec![
        Arc::new(
            SearchApiSource::new(
                site("euronews", "Euronews", "https://www.euronews.com/")?,
                "https://www.euronews.com/api/search",
                "environment",
            )
            .with_pages(3)
            .with_page_size(10),
        ),
        Arc::new(cnbc("https://www.cnbc.com/environment/")?),
        Arc::new(guardian("guardian", "https://www.theguardian.com/environment")?),
    ])
}

fn india_technology() -> Result<Adapters, SourceError> {
    let tech = || FilterProfile::none().with_keywords(TECHNOLOGY_KEYWORDS);
    Ok(vec![
        Arc::new(HtmlSource::new(
            site("hindustan_times", "Hindustan Times", "https://www.hindustantimes.com")?
                .with_filters(tech()),
            PagePlan::single("https://www.hindustantimes.com/technology"),
            vec![
                ExtractRule::attr("div.cartHolder", "data-vars-story-title")?,
                ExtractRule::text("div.cartHolder a.storyLink")?,
            ],
        )),
        Arc::new(
            HtmlSource::new(
                site("times_of_india", "Times of India", "https://timesofindia.indiatimes.com")?,
                PagePlan::single("https://timesofindia.indiatimes.com/technology"),
                vec![
                    ExtractRule::child("div.lSIdy.col_l_6.col_m_6 a.linktype1", "span")?,
                    ExtractRule::child("div.GLeza a", "h5")?,
                ],
            )
            .strip_query(),
        ),
        Arc::new(listing(
            "financial_express",
            "Financial Express",
            "https://www.financialexpress.com",
            "https://www.financialexpress.com/about/technology-news/",
            &["article div.entry-title a"],
        )?),
        Arc::new(HtmlSource::new(
            site("indian_express", "Indian Express", "https://indianexpress.com")?.with_filters(tech()),
            PagePlan::single("https://indianexpress.com/section/technology/"),
            text_rules(&["h3 a, h2 a"])?,
        )),
    ])
}

fn global_technology() -> Result<Adapters, SourceError> {
    let guardian_tech = HtmlSource::new(
        site("guardian", "The Guardian", "https://www.theguardian.com")?
            .with_filters(FilterProfile::none().with_keywords(TECHNOLOGY_KEYWORDS)),
        PagePlan::single("https://www.theguardian.com/technology"),
        vec![ExtractRule::attr("a[aria-label]", "aria-label")?],
    )
    .require_href("/202");
    Ok(vec![
        Arc::new(guardian_tech),
        Arc::new(
            HtmlSource::new(
                site("euronews", "Euronews", "https://www.euronews.com")?,
                PagePlan::paged(
                    "https://www.euronews.com/search?query={query}&p=1",
                    "https://www.euronews.com/search?query={query}&p={page}",
                    1,
                ),
                vec![
                    ExtractRule::attr("article a.the-media-object__link", "aria-label")?,
                    ExtractRule::text("article a.the-media-object__link")?,
                ],
            )
            .with_topic("technology"),
        ),
        Arc::new(cnbc("https://www.cnbc.com/technology/")?),
    ])
}

fn india_sports() -> Result<Adapters, SourceError> {
    Ok(vec![
        Arc::new(HtmlSource::new(
            site("espncricinfo", "ESPN Cricinfo", "https://www.espncricinfo.com")?,
            PagePlan::paged(
                "https://www.espncricinfo.com/genre/news-1",
                "https://www.espncricinfo.com/genre/news-1?page={page}",
                4,
            ),
            text_rules(&["h2.ds-text-title-s"])?,
        )),
        Arc::new(HtmlSource::new(
            site("indian_express_sports", "Indian Express", "https://indianexpress.com")?,
            PagePlan::paged(
                "https://indianexpress.com/section/sports/",
                "https://indianexpress.com/section/sports/page/{page}/",
                2,
            ),
            text_rules(&[".articles a"])?,
        )),
        Arc::new(HtmlSource::new(
            site("ndtv_sports", "NDTV Sports", "https://sports.ndtv.com")?,
            PagePlan::single("https://sports.ndtv.com/"),
            vec![
                ExtractRule::image_alt("a.img-gr")?,
                ExtractRule::text("h3.crd_txt-wrp a")?,
                ExtractRule::text("h1.crd_ttl5 a")?,
                ExtractRule::text("h3.crd_ttl a")?,
            ],
        )),
        Arc::new(HtmlSource::new(
            site("the_hindu", "The Hindu", "https://www.thehindu.com")?,
            PagePlan::paged(
                "https://www.thehindu.com/sport/other-sports/?page=1",
                "https://www.thehindu.com/sport/other-sports/?page={page}",
                6,
            ),
            text_rules(&["h3.title a"])?,
        )),
        Arc::new(HtmlSource::new(
            site("times_of_india_sports", "Times of India", "https://timesofindia.indiatimes.com")?
                .with_max_items(50),
            PagePlan::single("https://timesofindia.indiatimes.com/sports"),
            vec![ExtractRule::child("div.iN5CR a.lfn2e", "div.WavNE")?],
        )),
    ])
}

fn global_sports() -> Result<Adapters, SourceError> {
    Ok(vec![
        Arc::new(listing(
            "espn_global",
            "ESPN",
            "https://www.espn.com",
            "https://www.espn.com/",
            &["section.headlineStack li a"],
        )?),
        Arc::new(guardian("guardian_sports", "https://www.theguardian.com/sport")?),
        Arc::new(HtmlSource::new(
            site("bbc_sport", "BBC Sport", "https://www.bbc.com")?,
            PagePlan::single("https://www.bbc.com/sport"),
            vec![
                ExtractRule::child("h3 a", "span[aria-hidden='false']")?,
                ExtractRule::text("h3 a")?,
            ],
        )),
    ])
}

fn india_higher_education() -> Result<Adapters, SourceError> {
    let higher_ed = || FilterProfile::none().with_keywords(HIGHER_ED_KEYWORDS);
    Ok(vec![
        Arc::new(HtmlSource::new(
            site("deccan_herald", "Deccan Herald", "https://www.deccanherald.com")?
                .with_filters(higher_ed()),
            PagePlan::single("https://www.deccanherald.com/tags/higher-education"),
            text_rules(&["a .headline, .article-title a, h2 a, h3 a"])?,
        )),
        Arc::new(
            HtmlSource::new(
                site("financial_express", "Financial Express", "https://www.financialexpress.com")?
                    .with_filters(higher_ed()),
                PagePlan::single("https://www.financialexpress.com/about/higher-education/"),
                text_rules(&[".entry-title a, .listitembx h3 a, h2 a, .title a"])?,
            )
            .require_href("http"),
        ),
        Arc::new(HtmlSource::new(
            site("indian_express", "Indian Express", "https://indianexpress.com")?
                .with_filters(higher_ed()),
            PagePlan::single("https://indianexpress.com/about/higher-education/"),
            text_rules(&["h3 a, h2 a"])?,
        )),
        Arc::new(HtmlSource::new(
            site("toi", "Times of India", "https://timesofindia.indiatimes.com")?,
            PagePlan::single("https://timesofindia.indiatimes.com/topic/education"),
            vec![ExtractRule::child("div.uwU81", "div.fHv_i")?],
        )),
    ])
}

fn global_higher_education() -> Result<Adapters, SourceError> {
    Ok(vec![
        Arc::new(HtmlSource::new(
            site("times_higher_education", "Times Higher Education", "https://www.timeshighereducation.com")?,
            PagePlan::single("https://www.timeshighereducation.com/academic/news"),
            vec![ExtractRule::child("a[data-position='teaser-card']", "h3.teaser-card__title")?],
        )),
        Arc::new(HtmlSource::new(
            site("inside_higher_ed", "Inside Higher Ed", "https://www.insidehighered.com")?,
            PagePlan::paged(
                "https://www.insidehighered.com/news?page=1",
                "https://www.insidehighered.com/news?page={page}",
                3,
            ),
            vec![ExtractRule::child("h4 a", "span")?],
        )),
        Arc::new(guardian("guardian", "https://www.theguardian.com/education/higher-education")?),
    ])
}

/// Adapters for one (region, category), in invocation order.
pub fn adapters_for(region: Region, category: Category) -> Result<Adapters, SourceError> {
    match (region, category) {
        (Region::India, Category::General) => india_general(),
        (Region::Global, Category::General) => global_general(),
        (Region::India, Category::Environment) => india_environment(),
        (Region::Global, Category::Environment) => global_environment(),
        (Region::India, Category::Technology) => india_technology(),
        (Region::Global, Category::Technology) => global_technology(),
        (Region::India, Category::Sports) => india_sports(),
        (Region::Global, Category::Sports) => global_sports(),
        (Region::India, Category::HigherEducation) => india_higher_education(),
        (Region::Global, Category::HigherEducation) => global_higher_education(),
    }
}

/// A registry holding every built-in source.
///
/// # Errors
///
/// [`SourceError::Config`] if a catalog entry has a malformed URL or selector.
pub fn default_registry() -> Result<SourceRegistry, SourceError> {
    let mut registry = SourceRegistry::new();
    for region in Region::ALL {
        for category in Category::ALL {
            for adapter in adapters_for(region, category)? {
                registry.register(region, category, adapter);
            }
            debug!(%region, %category, sources = registry.names(region, category).len(), "Registered sources");
        }
    }
    Ok(registry)
}
