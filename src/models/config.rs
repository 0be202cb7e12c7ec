//! Crawl configuration structures.

use std::fs;
use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{CrawlRequest, PatternSet};

/// Root crawl configuration, loaded from a TOML file.
///
/// ```toml
/// start_pages = ["https://example.com/"]
/// ignored_urls = ["http(s)?://(www\\.)?example\\.com/private/.*"]
/// ignored_words = ["^.{1,3}$"]
/// parallelism = 4
/// max_depth = 3
/// timeout_seconds = 10
/// popular_word_count = 5
///
/// [http]
/// user_agent = "wordcrawl/0.1"
///
/// [output]
/// result_path = "result.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Seed URLs the crawl starts from
    #[serde(default)]
    pub start_pages: Vec<String>,

    /// URL patterns (full match) that are never visited
    #[serde(default)]
    pub ignored_urls: Vec<String>,

    /// Word patterns (full match) that are never counted
    #[serde(default)]
    pub ignored_words: Vec<String>,

    /// Worker threads in the crawl pool
    #[serde(default = "defaults::parallelism")]
    pub parallelism: usize,

    /// Maximum hop depth; seeds consume one unit
    #[serde(default = "defaults::max_depth")]
    pub max_depth: i64,

    /// Wall-clock budget for a single crawl
    #[serde(default = "defaults::timeout_seconds")]
    pub timeout_seconds: i64,

    /// Number of ranked words in the result
    #[serde(default = "defaults::popular_word_count")]
    pub popular_word_count: i64,

    /// HTTP client settings for the page parser
    #[serde(default)]
    pub http: HttpConfig,

    /// Where results and profiling data go
    #[serde(default)]
    pub output: OutputConfig,
}

impl CrawlConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read config file {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.start_pages.is_empty() {
            return Err(AppError::config("start_pages is empty"));
        }
        if self.parallelism == 0 {
            return Err(AppError::config("parallelism must be > 0"));
        }
        if self.max_depth < 0 {
            return Err(AppError::config("max_depth must be >= 0"));
        }
        if self.timeout_seconds < 0 {
            return Err(AppError::config("timeout_seconds must be >= 0"));
        }
        if self.popular_word_count < 0 {
            return Err(AppError::config("popular_word_count must be >= 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(AppError::config("http.request_timeout_secs must be > 0"));
        }
        self.url_patterns()?;
        self.word_patterns()?;
        Ok(())
    }

    /// Compile `ignored_urls`.
    pub fn url_patterns(&self) -> Result<PatternSet> {
        PatternSet::new(&self.ignored_urls)
    }

    /// Compile `ignored_words`.
    pub fn word_patterns(&self) -> Result<PatternSet> {
        PatternSet::new(&self.ignored_words)
    }

    /// Build the crawl request described by this configuration.
    ///
    /// Limits are carried over as-is; the crawler rejects negative values.
    pub fn to_request(&self) -> Result<CrawlRequest> {
        let timeout = TimeDelta::try_seconds(self.timeout_seconds)
            .ok_or_else(|| AppError::config("timeout_seconds is out of range"))?;

        Ok(CrawlRequest::new(self.start_pages.clone())
            .with_max_depth(self.max_depth)
            .with_timeout(timeout)
            .with_top_n(self.popular_word_count)
            .with_parallelism(self.parallelism)
            .with_exclusions(self.url_patterns()?))
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_pages: Vec::new(),
            ignored_urls: Vec::new(),
            ignored_words: Vec::new(),
            parallelism: defaults::parallelism(),
            max_depth: defaults::max_depth(),
            timeout_seconds: defaults::timeout_seconds(),
            popular_word_count: defaults::popular_word_count(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            request_timeout_secs: defaults::request_timeout(),
        }
    }
}

/// Output destinations. `None` means stdout.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// JSON crawl result
    #[serde(default)]
    pub result_path: Option<String>,

    /// Profiling report (appended)
    #[serde(default)]
    pub profile_output_path: Option<String>,
}

pub(crate) mod defaults {
    pub fn parallelism() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
    pub fn max_depth() -> i64 {
        10
    }
    pub fn timeout_seconds() -> i64 {
        10
    }
    pub fn popular_word_count() -> i64 {
        5
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; wordcrawl/0.1)".into()
    }
    pub fn request_timeout() -> u64 {
        10
    }
}
