//! Crawl request and its validated limits.

use std::time::Duration;

use chrono::TimeDelta;

use crate::error::{AppError, Result};
use crate::models::PatternSet;
use crate::models::config::defaults;

/// Everything one `crawl` call needs.
///
/// Depth, word count and timeout are signed so that negative input reaches
/// [`CrawlRequest::limits`] and is rejected instead of clamped.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    pub seed_urls: Vec<String>,
    pub max_depth: i64,
    pub timeout: TimeDelta,
    pub exclusions: PatternSet,
    pub top_n: i64,
    pub parallelism: usize,
}

/// Limits of a request after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    pub max_depth: usize,
    pub timeout: Duration,
    pub top_n: usize,
    pub parallelism: usize,
}

impl CrawlRequest {
    /// Create a request for the given seeds with default limits.
    pub fn new<I, S>(seed_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seed_urls: seed_urls.into_iter().map(Into::into).collect(),
            max_depth: defaults::max_depth(),
            timeout: TimeDelta::seconds(defaults::timeout_seconds()),
            exclusions: PatternSet::empty(),
            top_n: defaults::popular_word_count(),
            parallelism: defaults::parallelism(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_timeout(mut self, timeout: TimeDelta) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_exclusions(mut self, exclusions: PatternSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_top_n(mut self, top_n: i64) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Validate the numeric limits.
    pub fn limits(&self) -> Result<CrawlLimits> {
        let max_depth = usize::try_from(self.max_depth).map_err(|_| {
            AppError::config(format!("max_depth must be >= 0, got {}", self.max_depth))
        })?;
        let top_n = usize::try_from(self.top_n)
            .map_err(|_| AppError::config(format!("top_n must be >= 0, got {}", self.top_n)))?;
        let timeout = self
            .timeout
            .to_std()
            .map_err(|_| AppError::config(format!("timeout must be >= 0, got {}", self.timeout)))?;
        if self.parallelism == 0 {
            return Err(AppError::config("parallelism must be > 0"));
        }

        Ok(CrawlLimits {
            max_depth,
            timeout,
            top_n,
            parallelism: self.parallelism,
        })
    }
}
