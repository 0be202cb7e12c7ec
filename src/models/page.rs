//! Parsed page content.

use std::collections::HashMap;

/// What the page parser extracted from one URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Word occurrences on the page
    pub word_counts: HashMap<String, u64>,

    /// Outgoing links, in document order
    pub links: Vec<String>,
}

impl ParsedPage {
    pub fn new(word_counts: HashMap<String, u64>, links: Vec<String>) -> Self {
        Self { word_counts, links }
    }
}
