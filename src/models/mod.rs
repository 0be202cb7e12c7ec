// src/models/mod.rs

//! Domain models for the crawler.
//!
//! - `CrawlConfig`: file-level configuration
//! - `CrawlRequest`: the input of a single crawl
//! - `ParsedPage`: what the parser returns for one URL
//! - `CrawlResult`: ranked words and visit count

mod config;
mod page;
mod patterns;
mod request;
mod result;

// Re-export all public types
pub use config::{CrawlConfig, HttpConfig, OutputConfig};
pub use page::ParsedPage;
pub use patterns::PatternSet;
pub use request::{CrawlLimits, CrawlRequest};
pub use result::CrawlResult;
