// src/lib.rs

//! wordcrawl: concurrent web crawler that ranks popular words

pub mod error;
pub mod models;
pub mod pipeline;
pub mod profiler;
pub mod services;
pub mod storage;
pub mod utils;

pub use error::{AppError, Result};
pub use models::{CrawlConfig, CrawlRequest, CrawlResult, ParsedPage, PatternSet};
pub use pipeline::{WebCrawler, rank};
pub use services::{HtmlPageParser, PageParser};
pub use utils::clock::{Clock, FakeClock, SystemClock};
