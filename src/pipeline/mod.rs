//! The crawl engine.
//!
//! - `WebCrawler`: worker pool and orchestration
//! - `PageVisitTask`: one URL at one remaining depth
//! - `SharedState`: visited set and word counts of one crawl
//! - `rank`: popular word ordering

pub mod crawl;
mod rank;
mod state;
pub mod visit;

#[cfg(test)]
pub(crate) mod testing;

pub use crawl::{TraversalStats, WebCrawler};
pub use rank::rank;
pub use state::SharedState;
pub use visit::{PageVisitTask, VisitContext, VisitOutcome};
