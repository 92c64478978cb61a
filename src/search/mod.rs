//! Exhaustive search for the expression closest to a target
//!
//! The enumeration index space is walked in parallel. Each index is encoded
//! into a postfix expression, evaluated, and ranked by its distance to the
//! target in a per-worker store. The per-worker best lists are merged once
//! every worker is done.

pub mod aggregate;
pub mod candidate;
pub mod config;
pub mod parallel;
pub mod result;
pub mod store;

pub use aggregate::merge_top_k;
pub use candidate::Candidate;
pub use config::{SearchConfig, SentinelPolicy};
pub use parallel::run_parallel_search;
pub use result::{SearchResult, SearchStatistics};
pub use store::{InsertOutcome, RankedStore};

use crate::error::Result;
use crate::library::FunctionLibrary;
use crate::report::NullProgress;
use std::sync::Arc;

/// Run a search without progress output.
pub fn search(library: Arc<FunctionLibrary>, config: &SearchConfig) -> Result<SearchResult> {
    run_parallel_search(library, config, &mut NullProgress)
}
