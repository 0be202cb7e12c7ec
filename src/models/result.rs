//! Final crawl result.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of one crawl: the ranked popular words and the number of distinct
/// pages visited.
///
/// Serializes as `{"wordCounts": {...}, "urlsVisited": n}` with the word
/// object in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    word_counts: IndexMap<String, u64>,
    urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: IndexMap<String, u64>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Word counts, most popular first.
    pub fn word_counts(&self) -> &IndexMap<String, u64> {
        &self.word_counts
    }

    /// Number of distinct URLs claimed during the crawl.
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }
}
