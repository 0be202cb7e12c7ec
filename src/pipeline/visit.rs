//! The unit of crawl work: one URL at one remaining depth.

use std::sync::Arc;
use std::time::Instant;

use log::debug;

use crate::error::{AppError, Result};
use crate::models::PatternSet;
use crate::pipeline::SharedState;
use crate::services::PageParser;
use crate::utils::clock::Clock;

/// Everything the tasks of one crawl share.
pub struct VisitContext {
    pub parser: Arc<dyn PageParser>,
    pub clock: Arc<dyn Clock>,
    pub deadline: Instant,
    pub exclusions: PatternSet,
    pub state: SharedState,
}

/// A URL waiting to be visited with `remaining_depth` hops left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageVisitTask {
    url: String,
    remaining_depth: usize,
}

/// How a task ended.
#[derive(Debug)]
pub enum VisitOutcome {
    DepthExhausted,
    DeadlineReached,
    Excluded,
    AlreadyVisited,
    /// The page was parsed and merged; `children` are its links one hop deeper.
    Visited { children: Vec<PageVisitTask> },
}

impl PageVisitTask {
    pub fn new(url: impl Into<String>, remaining_depth: usize) -> Self {
        Self {
            url: url.into(),
            remaining_depth,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run the guards, then parse and merge.
    ///
    /// Guards run in order and the first that applies ends the task:
    /// depth, deadline, exclusion, then the visited-set claim. Only a task
    /// that wins the claim pays for parsing.
    pub async fn run(self, ctx: &VisitContext) -> Result<VisitOutcome> {
        if self.remaining_depth == 0 {
            return Ok(VisitOutcome::DepthExhausted);
        }
        if ctx.clock.now() >= ctx.deadline {
            return Ok(VisitOutcome::DeadlineReached);
        }
        if ctx.exclusions.matches(&self.url) {
            debug!("Skipping excluded URL {}", self.url);
            return Ok(VisitOutcome::Excluded);
        }
        if !ctx.state.claim(&self.url) {
            return Ok(VisitOutcome::AlreadyVisited);
        }

        debug!("Visiting [depth {}] {}", self.remaining_depth, self.url);
        let page = ctx.parser.parse(&self.url).await.map_err(|e| match e {
            AppError::Parse { .. } => e,
            other => AppError::parse(&self.url, other),
        })?;

        ctx.state.merge_counts(&page.word_counts);

        let depth = self.remaining_depth - 1;
        let children = page
            .links
            .into_iter()
            .map(|link| PageVisitTask::new(link, depth))
            .collect();

        Ok(VisitOutcome::Visited { children })
    }
}
