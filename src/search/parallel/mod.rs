//! Fork/join execution of the enumeration across worker threads.
//!
//! # Architecture
//!
//! - Each **worker** owns a private ranked store and a strided slice of the
//!   index space: worker `t` of `W` visits `t + W, t + 2W, ...`.
//! - Workers never talk to each other. Their only shared state is the
//!   read-only function library and configuration.
//! - Progress snapshots go over a **channel** to the **coordinator**, the
//!   single consumer that forwards them to a progress sink.
//! - After every worker has been joined, the per-worker best lists are merged
//!   into the global ranking.

pub mod channel;
pub mod coordinator;
pub mod worker;

pub use channel::{ProgressSnapshot, WorkerMessage};
pub use coordinator::run_parallel_search;
pub use worker::{run_worker, WorkerOutput};
