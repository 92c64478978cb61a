//! The enumeration loop run by each worker thread

use crate::expr::{evaluate, Encoder};
use crate::library::FunctionLibrary;
use crate::search::candidate::Candidate;
use crate::search::config::{SearchConfig, SentinelPolicy};
use crate::search::parallel::channel::{ProgressSnapshot, WorkerMessage};
use crate::search::result::SearchStatistics;
use crate::search::store::{InsertOutcome, RankedStore};
use crossbeam_channel::Sender;
use std::time::{Duration, Instant};

/// What a worker hands back when it is joined
#[derive(Debug, Clone)]
pub struct WorkerOutput {
    pub worker_id: usize,
    /// The worker's best candidates, ascending error
    pub top: Vec<Candidate>,
    pub statistics: SearchStatistics,
}

/// Run worker `worker_id` of `config.worker_count()` to completion.
///
/// Local iteration `i` visits global index `i * workers + worker_id`, for
/// `i` in `1..config.iterations_per_worker()`. Every index is visited once;
/// there is no early exit.
pub fn run_worker(
    worker_id: usize,
    library: &FunctionLibrary,
    config: &SearchConfig,
    progress: &Sender<WorkerMessage>,
) -> WorkerOutput {
    let start_time = Instant::now();
    let encoder = Encoder::new(library);
    let iterations = config.iterations_per_worker();
    let stride = config.worker_count() as u64;

    let mut store = RankedStore::new();
    let mut stats = SearchStatistics::default();
    let mut last_snapshot = start_time;

    tracing::debug!(worker_id, iterations, base = encoder.base(), "worker started");

    for i in 1..iterations {
        if i % config.progress_interval == 0 {
            let now = Instant::now();
            let per_interval = now - last_snapshot;
            last_snapshot = now;
            let remaining_intervals = (iterations - i) as f64 / config.progress_interval as f64;

            // A closed channel only means nobody is watching.
            let _ = progress.send(WorkerMessage::Progress(ProgressSnapshot {
                worker_id,
                iteration: i,
                total_iterations: iterations,
                remaining: estimate_remaining(per_interval, remaining_intervals),
                best: store.best().cloned(),
            }));
        }

        let index = i * stride + worker_id as u64;
        let expression = encoder.encode(index);
        stats.candidates_evaluated += 1;

        let value = match evaluate(&expression, library) {
            Ok(value) => value,
            Err(_) => {
                stats.malformed += 1;
                continue;
            }
        };
        if config.sentinel_policy == SentinelPolicy::DiscardDefault
            && value == config.default_value
        {
            stats.default_discarded += 1;
            continue;
        }

        match store.insert(Candidate::new(expression, value, config.target)) {
            InsertOutcome::Added => stats.inserted += 1,
            InsertOutcome::Duplicate => stats.duplicates += 1,
            InsertOutcome::Rejected => stats.rejected += 1,
        }

        if store.len() >= config.cleanup_interval {
            store.compact(config.keep);
            stats.compactions += 1;
            tracing::trace!(worker_id, iteration = i, "store compacted");
        }
    }

    stats.elapsed_time = start_time.elapsed();
    tracing::debug!(
        worker_id,
        evaluated = stats.candidates_evaluated,
        inserted = stats.inserted,
        "worker finished"
    );

    let _ = progress.send(WorkerMessage::Finished {
        worker_id,
        statistics: stats.clone(),
    });

    WorkerOutput {
        worker_id,
        top: store.drain_top_k(config.keep),
        statistics: stats,
    }
}

/// Time left if every remaining interval takes as long as the last one.
/// Saturates at `Duration::MAX`.
fn estimate_remaining(per_interval: Duration, remaining_intervals: f64) -> Duration {
    Duration::try_from_secs_f64(per_interval.as_secs_f64() * remaining_intervals)
        .unwrap_or(Duration::MAX)
}
