//! Google News RSS search scraper.
//!
//! Builds a search-feed URL for a query, fetches it over HTTPS, and parses
//! the RSS XML into [`RawItem`]s. Google News items carry the publisher both
//! in a `<source>` element and appended to the title; both are passed through
//! raw here and reconciled later by the normalizer.

use crate::models::RawItem;
use crate::updater::NewsSearch;
use once_cell::sync::Lazy;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

const SEARCH_BASE: &str = "https://news.google.com/rss/search";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; NewsPulseBot/1.0)";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Cap on items taken from a single feed response.
const MAX_FEED_ITEMS: usize = 100;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("failed to build HTTP client")
});

/// Build a Google News RSS search URL for a query.
pub fn search_url(query: &str) -> String {
    let mut url = Url::parse(SEARCH_BASE).expect("valid search base URL");
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("hl", "en-US")
        .append_pair("gl", "US")
        .append_pair("ceid", "US:en");
    url.to_string()
}

/// Fetch the search feed for `query` and parse it into raw items.
#[instrument(level = "info", skip_all, fields(query = %query))]
pub async fn search_news(query: &str) -> Result<Vec<RawItem>, Box<dyn Error>> {
    let url = search_url(query);
    debug!(%url, "Fetching news feed");

    let body = HTTP_CLIENT
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let items = parse_feed(&body)?;
    info!(count = items.len(), "Parsed feed items");
    Ok(items)
}

/// Parse an RSS XML document into [`RawItem`]s.
///
/// Extracts `<title>`, `<link>`, `<pubDate>`, and `<source>` from each
/// `<item>` element. Missing fields stay empty. Stops after
/// [`MAX_FEED_ITEMS`] items.
fn parse_feed(xml: &str) -> Result<Vec<RawItem>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut current_tag = String::new();
    let mut current = RawItem::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "item" {
                    in_item = true;
                    current = RawItem::default();
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" && in_item {
                    in_item = false;
                    if !current.link.is_empty() {
                        items.push(std::mem::take(&mut current));
                        if items.len() >= MAX_FEED_ITEMS {
                            break;
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    append_field(&mut current, &current_tag, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    append_field(&mut current, &current_tag, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(items)
}

/// Route a text node to the item field named by the enclosing tag.
///
/// Text is appended rather than assigned so values split across several
/// nodes (entity references, CDATA islands) come through whole.
fn append_field(item: &mut RawItem, tag: &str, text: &str) {
    let field = match tag {
        "title" => &mut item.title,
        "link" => &mut item.link,
        "pubDate" => &mut item.pub_date,
        "source" => &mut item.source,
        _ => return,
    };
    field.push_str(text);
}

/// Production [`NewsSearch`] implementation backed by Google News.
pub struct GoogleNews;

impl NewsSearch for GoogleNews {
    async fn search(&self, query: &str) -> Result<Vec<RawItem>, Box<dyn Error>> {
        search_news(query).await
    }
}
