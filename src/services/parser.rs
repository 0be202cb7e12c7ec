// src/services/parser.rs

//! Page parsing: the seam between the crawl engine and the web.
//!
//! The engine only knows [`PageParser`]. [`HtmlPageParser`] is the HTTP-backed
//! implementation used by the CLI.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use scraper::{Html, Selector};
use unicode_segmentation::UnicodeSegmentation;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CrawlConfig, HttpConfig, ParsedPage, PatternSet};
use crate::utils::http;
use crate::utils::resolve_link;

/// Turns a URL into word counts and outgoing links.
///
/// Ordinary transient fetch problems should produce an empty page rather than
/// an error; an `Err` fails only the subtree rooted at that URL.
#[async_trait]
pub trait PageParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<ParsedPage>;
}

/// Parser that fetches pages over HTTP and scrapes them as HTML.
pub struct HtmlPageParser {
    client: Client,
    ignored_words: PatternSet,
}

impl HtmlPageParser {
    /// Create a parser with the given HTTP settings and ignored word patterns.
    pub fn new(config: &HttpConfig, ignored_words: PatternSet) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
            ignored_words,
        })
    }

    /// Create a parser from a full crawl configuration.
    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        Self::new(&config.http, config.word_patterns()?)
    }
}

#[async_trait]
impl PageParser for HtmlPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage> {
        let base = Url::parse(url).map_err(|e| AppError::parse(url, e))?;

        let html = match http::fetch_text(&self.client, url).await {
            Ok(html) => html,
            Err(error) => {
                warn!("Failed to fetch {}: {}", url, error);
                return Ok(ParsedPage::default());
            }
        };

        let page = extract_page(&html, &base, &self.ignored_words)?;
        debug!(
            "Parsed {} ({} distinct words, {} links)",
            url,
            page.word_counts.len(),
            page.links.len()
        );
        Ok(page)
    }
}

/// Extract visible words and outgoing links from an HTML document.
pub fn extract_page(html: &str, base: &Url, ignored_words: &PatternSet) -> Result<ParsedPage> {
    let document = Html::parse_document(html);
    let body_sel = parse_selector("body")?;
    let link_sel = parse_selector("a[href]")?;

    let root = document
        .select(&body_sel)
        .next()
        .unwrap_or_else(|| document.root_element());

    let texts = root.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
        });
        (!hidden).then(|| &**text)
    });
    let word_counts = count_words(texts, ignored_words);

    let mut seen = HashSet::new();
    let links = document
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .filter(|link| seen.insert(link.clone()))
        .collect();

    Ok(ParsedPage::new(word_counts, links))
}

/// Count lowercase words, skipping any that fully match an ignored pattern.
pub fn count_words<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    ignored_words: &PatternSet,
) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for text in texts {
        for word in text.unicode_words() {
            let word = word.to_lowercase();
            if ignored_words.matches(&word) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    counts
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
