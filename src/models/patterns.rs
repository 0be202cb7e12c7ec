//! Whole-string regular expression sets.

use std::fmt;

use regex::RegexSet;

use crate::error::{AppError, Result};

/// A set of regular expressions matched against the *entire* candidate.
///
/// `a.c` matches `abc` but not `xabcx`.
#[derive(Clone)]
pub struct PatternSet {
    set: RegexSet,
    sources: Vec<String>,
}

impl PatternSet {
    /// Compile the given patterns. Any invalid pattern is a configuration error.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sources: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();

        let anchored = sources.iter().map(|p| format!("^(?:{p})$"));
        let set = RegexSet::new(anchored).map_err(|e| {
            AppError::config(format!("Invalid pattern in {sources:?}: {e}"))
        })?;

        Ok(Self { set, sources })
    }

    /// An empty set that matches nothing.
    pub fn empty() -> Self {
        Self {
            set: RegexSet::empty(),
            sources: Vec::new(),
        }
    }

    /// True if any pattern matches the whole candidate.
    pub fn matches(&self, candidate: &str) -> bool {
        self.set.is_match(candidate)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PatternSet").field(&self.sources).finish()
    }
}
