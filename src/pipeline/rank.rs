//! Popular word ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use indexmap::IndexMap;

/// Return the `top_n` most popular words, in rank order.
///
/// Order:
/// 1. Higher count first
/// 2. Longer word first if counts are equal
/// 3. Alphabetical order if both count and length are equal
///
/// Keys are unique, so this is a strict total order and the output is
/// deterministic.
pub fn rank(word_counts: &HashMap<String, u64>, top_n: usize) -> IndexMap<String, u64> {
    if top_n == 0 {
        return IndexMap::new();
    }

    let mut entries: Vec<(&String, &u64)> = word_counts.iter().collect();
    entries.sort_unstable_by(|a, b| compare(a, b));

    entries
        .into_iter()
        .take(top_n)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

fn compare(a: &(&String, &u64), b: &(&String, &u64)) -> Ordering {
    b.1.cmp(a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(b.0))
}
