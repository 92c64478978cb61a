//! Messages from search workers to the coordinator.

use crate::search::candidate::Candidate;
use crate::search::result::SearchStatistics;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::Duration;

/// Periodic view of one worker's progress
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub worker_id: usize,
    /// Local iteration the snapshot was taken at
    pub iteration: u64,
    /// Iterations this worker runs in total
    pub total_iterations: u64,
    /// Estimated time until the worker finishes
    pub remaining: Duration,
    /// Lowest-error candidate the worker holds, if any
    pub best: Option<Candidate>,
}

impl ProgressSnapshot {
    /// Completed share of the worker's iterations (0.0 to 1.0)
    pub fn fraction_done(&self) -> f64 {
        if self.total_iterations == 0 {
            1.0
        } else {
            self.iteration as f64 / self.total_iterations as f64
        }
    }
}

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Progress(ProgressSnapshot),
    /// Worker has left its search loop.
    Finished {
        worker_id: usize,
        statistics: SearchStatistics,
    },
}

/// Create the channel shared by all workers. Unbounded so that workers never
/// block on a slow progress sink.
pub fn create_channel() -> (Sender<WorkerMessage>, Receiver<WorkerMessage>) {
    unbounded()
}
