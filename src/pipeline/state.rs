//! Per-crawl shared state.
//!
//! Both structures are sharded concurrent maps: every mutation locks one
//! shard for one key, never the whole table.

use std::collections::HashMap;

use dashmap::{DashMap, DashSet};

/// Visited URLs and aggregated word counts for a single crawl invocation.
#[derive(Debug, Default)]
pub struct SharedState {
    visited: DashSet<String>,
    word_counts: DashMap<String, u64>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically mark `url` as visited.
    ///
    /// Returns `true` only for the single caller that inserted it.
    pub fn claim(&self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Add `count` to `word`, initializing it if absent.
    pub fn add_count(&self, word: &str, count: u64) {
        if let Some(mut total) = self.word_counts.get_mut(word) {
            *total = total.saturating_add(count);
            return;
        }
        let mut total = self.word_counts.entry(word.to_string()).or_insert(0);
        *total = total.saturating_add(count);
    }

    /// Merge a page's counts one word at a time.
    pub fn merge_counts<'a>(&self, counts: impl IntoIterator<Item = (&'a String, &'a u64)>) {
        for (word, count) in counts {
            self.add_count(word, *count);
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts.get(word).map(|c| *c)
    }

    /// Copy of the current word counts.
    pub fn word_counts(&self) -> HashMap<String, u64> {
        self.word_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
