// src/profiler.rs

//! Wall-time profiling of selected operations.
//!
//! Timing is opt-in per call site: wrap a closure with [`Profiler::profile`]
//! or a parser with [`ProfiledParser`]. Totals are accumulated per label and
//! written as a plain-text report:
//!
//! ```text
//! Run at Sun, 18 Oct 2026 09:12:44 GMT
//! PageParser::parse took 0m 3s 412ms
//! WebCrawler::crawl took 0m 4s 87ms
//! ```

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::error::Result;
use crate::models::ParsedPage;
use crate::services::PageParser;
use crate::utils::clock::Clock;

/// Label under which [`ProfiledParser`] records parse calls.
pub const PARSE_LABEL: &str = "PageParser::parse";

/// Accumulates elapsed time per operation label.
pub struct Profiler {
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
    totals: DashMap<String, Duration>,
}

impl Profiler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            started_at: Utc::now(),
            totals: DashMap::new(),
        }
    }

    /// Stamp the report with `started_at` instead of the construction time.
    ///
    /// [`Clock`] only yields monotonic instants, so the wall-clock header is
    /// set separately.
    pub fn with_start_time(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Add `elapsed` to the total for `label`.
    pub fn record(&self, label: &str, elapsed: Duration) {
        *self.totals.entry(label.to_string()).or_default() += elapsed;
    }

    /// Run `f`, recording how long it took under `label`.
    pub fn profile<T>(&self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = self.clock.now();
        let output = f();
        self.record(label, self.clock.now().saturating_duration_since(start));
        output
    }

    /// Total time recorded for `label`.
    pub fn total(&self, label: &str) -> Option<Duration> {
        self.totals.get(label).map(|d| *d)
    }

    /// Append the report to `path`, creating it if needed.
    pub fn write_data(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the report to an open writer.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        writeln!(
            writer,
            "Run at {}",
            self.started_at.format("%a, %-d %b %Y %H:%M:%S GMT")
        )?;

        let mut totals: Vec<(String, Duration)> = self
            .totals
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        totals.sort_by(|a, b| a.0.cmp(&b.0));

        for (label, elapsed) in totals {
            writeln!(writer, "{} took {}", label, format_duration(elapsed))?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {}s {}ms", secs / 60, secs % 60, elapsed.subsec_millis())
}

/// A [`PageParser`] that records the time of every `parse` call.
pub struct ProfiledParser<P> {
    inner: P,
    profiler: Arc<Profiler>,
}

impl<P: PageParser> ProfiledParser<P> {
    pub fn new(inner: P, profiler: Arc<Profiler>) -> Self {
        Self { inner, profiler }
    }
}

#[async_trait]
impl<P: PageParser> PageParser for ProfiledParser<P> {
    async fn parse(&self, url: &str) -> Result<ParsedPage> {
        let start = self.profiler.clock.now();
        let result = self.inner.parse(url).await;
        let elapsed = self.profiler.clock.now().saturating_duration_since(start);
        self.profiler.record(PARSE_LABEL, elapsed);
        result
    }
}
