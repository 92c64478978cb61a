//! Search result types and statistics

use crate::search::candidate::Candidate;
use std::time::Duration;

/// Final ranking of a search run
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best candidates, ascending error
    pub ranked: Vec<Candidate>,
    /// Totals across all workers
    pub statistics: SearchStatistics,
    /// Per-worker statistics, indexed by worker id
    pub worker_statistics: Vec<SearchStatistics>,
}

impl SearchResult {
    pub fn best(&self) -> Option<&Candidate> {
        self.ranked.first()
    }
}

/// Counters collected by a worker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    /// Time spent searching
    pub elapsed_time: Duration,
    /// Expressions encoded and evaluated
    pub candidates_evaluated: u64,
    /// Expressions that failed to evaluate
    pub malformed: u64,
    /// Valid expressions dropped because they equal the default value
    pub default_discarded: u64,
    /// Candidates dropped because an equal error was already stored
    pub duplicates: u64,
    /// Candidates with a NaN error
    pub rejected: u64,
    /// Candidates added to the store
    pub inserted: u64,
    /// Number of store compactions
    pub compactions: u64,
}

impl SearchStatistics {
    /// Fold another worker's counters into this one. Elapsed time is the
    /// maximum since workers run concurrently.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.elapsed_time = self.elapsed_time.max(other.elapsed_time);
        self.candidates_evaluated += other.candidates_evaluated;
        self.malformed += other.malformed;
        self.default_discarded += other.default_discarded;
        self.duplicates += other.duplicates;
        self.rejected += other.rejected;
        self.inserted += other.inserted;
        self.compactions += other.compactions;
    }

    /// Share of evaluated expressions that were valid programs (0.0 to 1.0)
    pub fn valid_rate(&self) -> f64 {
        if self.candidates_evaluated == 0 {
            0.0
        } else {
            (self.candidates_evaluated - self.malformed) as f64 / self.candidates_evaluated as f64
        }
    }

    /// Get candidates evaluated per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.candidates_evaluated as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!(
            "Candidates evaluated: {}\n",
            self.candidates_evaluated
        ));
        s.push_str(&format!(
            "Throughput: {:.0} candidates/sec\n",
            self.throughput()
        ));
        s.push_str(&format!("Valid rate: {:.2}%\n", self.valid_rate() * 100.0));
        s.push_str(&format!("Inserted: {}\n", self.inserted));
        s.push_str(&format!("Duplicate errors: {}\n", self.duplicates));

        if self.default_discarded > 0 {
            s.push_str(&format!(
                "Discarded as default: {}\n",
                self.default_discarded
            ));
        }
        if self.rejected > 0 {
            s.push_str(&format!("Rejected (NaN): {}\n", self.rejected));
        }

        s.push_str(&format!("Compactions: {}\n", self.compactions));
        s
    }
}
