//! Error types shared across the crate

use crate::expr::Symbol;
use thiserror::Error;

/// Failure to run a postfix program on the stack machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An operator was reached before enough operands were pushed.
    #[error("stack underflow at position {position}: needs {required} operand(s), stack holds {depth}")]
    Underflow {
        position: usize,
        required: usize,
        depth: usize,
    },
    /// The program finished with a stack depth other than one.
    #[error("program left {depth} value(s) on the stack, expected exactly 1")]
    Unbalanced { depth: usize },
    /// The symbol code is outside the function library.
    #[error("unknown symbol {symbol}")]
    UnknownSymbol { symbol: Symbol },
}

/// Invalid function library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("function library has no nullary functions")]
    NoNullary,
    #[error("duplicate function name '{0}'")]
    DuplicateName(String),
    #[error("invalid constant '{0}': expected NAME=VALUE")]
    InvalidConstant(String),
}

/// Invalid run configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("keep count must be at least 1")]
    ZeroKeep,
    #[error("cleanup interval ({cleanup}) must be greater than keep count ({keep})")]
    CleanupTooSmall { cleanup: usize, keep: usize },
    #[error("progress interval must be at least 1")]
    ZeroProgress,
    #[error("target must be finite, got {0}")]
    NonFiniteTarget(f64),
    #[error("enumeration limit ({limit}) is smaller than the worker count ({threads})")]
    LimitTooSmall { limit: u64, threads: usize },
}

/// Failure of a whole search run.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SearchError>;
