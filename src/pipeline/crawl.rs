// src/pipeline/crawl.rs

//! Crawl orchestration.
//!
//! [`WebCrawler`] owns a fixed worker pool for its whole lifetime. Each
//! [`WebCrawler::crawl`] call seeds a pending queue with one task per start
//! URL, feeds the pool up to the request's parallelism, pushes every visited
//! page's children back onto the queue, and returns once the queue is empty
//! and nothing is in flight.

use std::collections::VecDeque;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinSet;

use crate::error::{AppError, Result};
use crate::models::{CrawlRequest, CrawlResult};
use crate::pipeline::visit::{PageVisitTask, VisitContext, VisitOutcome};
use crate::pipeline::{SharedState, rank};
use crate::services::PageParser;
use crate::utils::clock::{Clock, SystemClock};

/// Per-crawl task counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraversalStats {
    pub visited: usize,
    pub depth_exhausted: usize,
    pub deadline_skipped: usize,
    pub excluded: usize,
    pub duplicates: usize,
    pub failed: usize,
}

impl TraversalStats {
    fn record(&mut self, outcome: &VisitOutcome) {
        match outcome {
            VisitOutcome::DepthExhausted => self.depth_exhausted += 1,
            VisitOutcome::DeadlineReached => self.deadline_skipped += 1,
            VisitOutcome::Excluded => self.excluded += 1,
            VisitOutcome::AlreadyVisited => self.duplicates += 1,
            VisitOutcome::Visited { .. } => self.visited += 1,
        }
    }

    /// Total number of tasks that ran.
    pub fn tasks(&self) -> usize {
        self.visited
            + self.depth_exhausted
            + self.deadline_skipped
            + self.excluded
            + self.duplicates
            + self.failed
    }
}

/// Concurrent, depth- and deadline-bounded crawler.
pub struct WebCrawler {
    runtime: Runtime,
    workers: usize,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
}

impl WebCrawler {
    /// Create a crawler whose pool has `workers` threads.
    pub fn new(
        workers: usize,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if workers == 0 {
            return Err(AppError::config("worker pool needs at least one thread"));
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(workers)
            .thread_name("crawl-worker")
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            workers,
            parser,
            clock,
        })
    }

    /// Create a crawler driven by the system clock.
    pub fn with_system_clock(workers: usize, parser: Arc<dyn PageParser>) -> Result<Self> {
        Self::new(workers, parser, Arc::new(SystemClock))
    }

    /// Number of worker threads in the pool.
    pub fn max_parallelism(&self) -> usize {
        self.workers
    }

    /// Crawl from the request's seeds and rank the words found.
    ///
    /// Blocks until every reachable task has finished. Fails with
    /// [`AppError::Runtime`] when called from inside an async runtime.
    pub fn crawl(&self, request: &CrawlRequest) -> Result<CrawlResult> {
        self.crawl_with_stats(request).map(|(result, _)| result)
    }

    /// Like [`WebCrawler::crawl`], also returning task counters.
    pub fn crawl_with_stats(
        &self,
        request: &CrawlRequest,
    ) -> Result<(CrawlResult, TraversalStats)> {
        if Handle::try_current().is_ok() {
            return Err(AppError::runtime(
                "crawl() blocks and cannot run inside an async runtime",
            ));
        }

        let limits = request.limits()?;
        let deadline = self
            .clock
            .now()
            .checked_add(limits.timeout)
            .ok_or_else(|| AppError::config("timeout is too large"))?;

        let ctx = Arc::new(VisitContext {
            parser: Arc::clone(&self.parser),
            clock: Arc::clone(&self.clock),
            deadline,
            exclusions: request.exclusions.clone(),
            state: SharedState::new(),
        });

        let roots = request
            .seed_urls
            .iter()
            .map(|url| PageVisitTask::new(url.as_str(), limits.max_depth))
            .collect();

        info!(
            "Crawling {} seed(s), depth {}, timeout {:?}, parallelism {}, {} exclusion(s)",
            request.seed_urls.len(),
            limits.max_depth,
            limits.timeout,
            limits.parallelism,
            request.exclusions.len()
        );

        let stats = self
            .runtime
            .block_on(drain(Arc::clone(&ctx), roots, limits.parallelism));

        let result = CrawlResult::new(
            rank(&ctx.state.word_counts(), limits.top_n),
            ctx.state.visited_count(),
        );

        info!(
            "Crawl finished: {} task(s), {} visited, {} failed, {} dup, {} excluded, {} late",
            stats.tasks(),
            result.urls_visited(),
            stats.failed,
            stats.duplicates,
            stats.excluded,
            stats.deadline_skipped
        );

        Ok((result, stats))
    }
}

/// Run tasks until the pending queue and the in-flight set are both empty.
async fn drain(
    ctx: Arc<VisitContext>,
    roots: Vec<PageVisitTask>,
    max_in_flight: usize,
) -> TraversalStats {
    let mut pending: VecDeque<PageVisitTask> = roots.into();
    let mut in_flight = JoinSet::new();
    let mut stats = TraversalStats::default();

    loop {
        while in_flight.len() < max_in_flight {
            let Some(task) = pending.pop_front() else {
                break;
            };
            let ctx = Arc::clone(&ctx);
            in_flight.spawn(async move {
                let url = task.url().to_string();
                (url, task.run(&ctx).await)
            });
        }

        let Some(joined) = in_flight.join_next().await else {
            break;
        };

        match joined {
            Ok((_, Ok(VisitOutcome::Visited { children }))) => {
                stats.visited += 1;
                pending.extend(children);
            }
            Ok((_, Ok(outcome))) => stats.record(&outcome),
            Ok((url, Err(error))) => {
                stats.failed += 1;
                warn!("Skipping subtree of {}: {}", url, error);
            }
            Err(error) => {
                stats.failed += 1;
                error!("Crawl task panicked: {}", error);
            }
        }
    }

    stats
}
