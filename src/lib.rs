//! Numeric reverse engineering
//!
//! Given a target number, enumerate postfix expressions over a small
//! function library and report the ones whose value comes closest.
//!
//! ```no_run
//! use nre::{search, FunctionLibrary, SearchConfig};
//! use std::sync::Arc;
//!
//! let library = Arc::new(FunctionLibrary::standard());
//! let config = SearchConfig::default().with_target(1.618034).with_limit(1_000_000);
//! let result = search(library, &config)?;
//! for candidate in &result.ranked {
//!     println!("{} = {}", candidate.expression, candidate.value);
//! }
//! # Ok::<(), nre::SearchError>(())
//! ```

pub mod error;
pub mod expr;
pub mod library;
pub mod report;
pub mod search;

pub use error::{ConfigError, EvalError, LibraryError, SearchError};
pub use expr::{Encoder, Expression, Rendering, Symbol, SymbolClass};
pub use library::FunctionLibrary;
pub use search::{
    run_parallel_search, search, Candidate, SearchConfig, SearchResult, SearchStatistics,
    SentinelPolicy,
};
