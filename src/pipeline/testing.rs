//! In-memory link graph used as a parser in tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{AppError, Result};
use crate::models::ParsedPage;
use crate::services::PageParser;
use crate::utils::clock::FakeClock;

#[derive(Default)]
pub struct GraphParser {
    pages: HashMap<String, ParsedPage>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
    calls: DashMap<String, usize>,
    tick: Option<(Arc<FakeClock>, Duration)>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl GraphParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        let word_counts = words.iter().map(|(w, c)| (w.to_string(), *c)).collect();
        let links = links.iter().map(|l| l.to_string()).collect();
        self.pages
            .insert(url.to_string(), ParsedPage::new(word_counts, links));
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn panicking(mut self, url: &str) -> Self {
        self.panicking.insert(url.to_string());
        self
    }

    /// Advance `clock` by `step` on every parse call.
    pub fn ticking(mut self, clock: Arc<FakeClock>, step: Duration) -> Self {
        self.tick = Some((clock, step));
        self
    }

    /// Sleep for `delay` inside every parse call.
    pub fn delaying(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Most parse calls ever running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.get(url).map(|c| *c).unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }

    pub fn parsed_urls(&self) -> HashSet<String> {
        self.calls.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[async_trait]
impl PageParser for GraphParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage> {
        *self.calls.entry(url.to_string()).or_insert(0) += 1;
        if let Some((clock, step)) = &self.tick {
            clock.advance(*step);
        }
        if let Some(delay) = self.delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        if self.panicking.contains(url) {
            panic!("parser panicked on {url}");
        }
        if self.failing.contains(url) {
            return Err(AppError::parse(url, "simulated failure"));
        }
        Ok(self.pages.get(url).cloned().unwrap_or_default())
    }
}
