//! Parallel search coordinator that manages worker threads.

use crate::error::{Result, SearchError};
use crate::library::FunctionLibrary;
use crate::report::{NullProgress, ProgressSink};
use crate::search::aggregate::merge_top_k;
use crate::search::config::SearchConfig;
use crate::search::parallel::channel::{create_channel, WorkerMessage};
use crate::search::parallel::worker::{run_worker, WorkerOutput};
use crate::search::result::{SearchResult, SearchStatistics};
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// Run the whole search: spawn the workers, relay their progress to `sink`
/// until they are done, join them and merge their results.
pub fn run_parallel_search(
    library: Arc<FunctionLibrary>,
    config: &SearchConfig,
    sink: &mut dyn ProgressSink,
) -> Result<SearchResult> {
    config.validate()?;

    let start_time = Instant::now();
    let num_workers = config.worker_count();
    let config = Arc::new(config.clone());
    let (tx, rx) = create_channel();

    tracing::info!(
        workers = num_workers,
        limit = config.limit,
        symbols = library.len(),
        target = config.target,
        "starting search"
    );

    let mut worker_handles = Vec::with_capacity(num_workers);
    for worker_id in 0..num_workers {
        let library = Arc::clone(&library);
        let config = Arc::clone(&config);
        let worker_tx = tx.clone();

        let spawned = std::thread::Builder::new()
            .name(format!("nre-worker-{}", worker_id))
            .spawn(move || run_worker(worker_id, &library, &config, &worker_tx));
        match spawned {
            Ok(handle) => worker_handles.push(handle),
            Err(e) => {
                tracing::error!(worker_id, error = %e, "failed to spawn worker");
                // Let the already running workers finish before giving up.
                drop(tx);
                drain_workers(rx, worker_handles);
                return Err(SearchError::Spawn(e));
            }
        }
    }
    // Workers hold the only remaining senders; the relay ends when they exit.
    drop(tx);

    relay_progress(rx, sink);

    let mut outputs: Vec<WorkerOutput> = Vec::with_capacity(num_workers);
    for (worker_id, handle) in worker_handles.into_iter().enumerate() {
        let output = handle
            .join()
            .map_err(|_| SearchError::WorkerPanicked(worker_id))?;
        outputs.push(output);
    }

    let mut total = SearchStatistics::default();
    for output in &outputs {
        total.merge(&output.statistics);
    }
    total.elapsed_time = start_time.elapsed();

    let worker_statistics = outputs.iter().map(|o| o.statistics.clone()).collect();
    let ranked = merge_top_k(outputs.into_iter().map(|o| o.top).collect(), config.keep);

    tracing::info!(
        evaluated = total.candidates_evaluated,
        results = ranked.len(),
        elapsed = ?total.elapsed_time,
        "search complete"
    );

    Ok(SearchResult {
        ranked,
        statistics: total,
        worker_statistics,
    })
}

/// Discard the output of workers that were started before a failure.
fn drain_workers(rx: Receiver<WorkerMessage>, handles: Vec<JoinHandle<WorkerOutput>>) {
    relay_progress(rx, &mut NullProgress);
    for handle in handles {
        let _ = handle.join();
    }
}

/// Single consumer of worker messages. Returns once every sender is gone.
fn relay_progress(rx: Receiver<WorkerMessage>, sink: &mut dyn ProgressSink) {
    for message in rx {
        match message {
            WorkerMessage::Progress(snapshot) => sink.snapshot(&snapshot),
            WorkerMessage::Finished {
                worker_id,
                statistics,
            } => sink.finished(worker_id, &statistics),
        }
    }
}
