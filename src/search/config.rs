//! Configuration for a search run

use crate::error::ConfigError;

/// What the worker does with a value equal to the default sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentinelPolicy {
    /// Treat a computed value equal to the default like a malformed
    /// expression and drop it
    #[default]
    DiscardDefault,
    /// Drop only malformed expressions; valid values are always ranked
    MalformedOnly,
}

impl std::fmt::Display for SentinelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentinelPolicy::DiscardDefault => write!(f, "discard-default"),
            SentinelPolicy::MalformedOnly => write!(f, "malformed-only"),
        }
    }
}

/// Run configuration, fixed before the workers start
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// The number to approximate
    pub target: f64,
    /// Total enumeration budget, shared across workers
    pub limit: u64,
    /// Number of workers (0 = one per CPU)
    pub threads: usize,
    /// Number of results kept per worker and reported at the end
    pub keep: usize,
    /// Value standing in for a malformed expression
    pub default_value: f64,
    /// Store size that triggers compaction down to `keep`
    pub cleanup_interval: usize,
    /// Iterations between progress snapshots
    pub progress_interval: u64,
    pub sentinel_policy: SentinelPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target: 2.03509033057,
            limit: 100_000_000,
            threads: 4,
            keep: 40,
            default_value: 0.0,
            cleanup_interval: 10_000_000,
            progress_interval: 1_000_000,
            sentinel_policy: SentinelPolicy::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_keep(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    pub fn with_default_value(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn with_cleanup_interval(mut self, interval: usize) -> Self {
        self.cleanup_interval = interval;
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_sentinel_policy(mut self, policy: SentinelPolicy) -> Self {
        self.sentinel_policy = policy;
        self
    }

    /// Resolved worker count
    pub fn worker_count(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.threads
        }
    }

    /// Loop iterations each worker runs. Local iteration 0 is skipped, so a
    /// worker covers `1..iterations_per_worker`.
    pub fn iterations_per_worker(&self) -> u64 {
        self.limit / self.worker_count() as u64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keep == 0 {
            return Err(ConfigError::ZeroKeep);
        }
        if self.cleanup_interval <= self.keep {
            return Err(ConfigError::CleanupTooSmall {
                cleanup: self.cleanup_interval,
                keep: self.keep,
            });
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgress);
        }
        if !self.target.is_finite() {
            return Err(ConfigError::NonFiniteTarget(self.target));
        }
        let threads = self.worker_count();
        if self.limit < threads as u64 {
            return Err(ConfigError::LimitTooSmall {
                limit: self.limit,
                threads,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.limit, 100_000_000);
        assert_eq!(config.threads, 4);
        assert_eq!(config.keep, 40);
        assert_eq!(config.default_value, 0.0);
        assert_eq!(config.sentinel_policy, SentinelPolicy::DiscardDefault);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::default()
            .with_target(3.5)
            .with_limit(1000)
            .with_threads(2)
            .with_keep(5)
            .with_cleanup_interval(50)
            .with_progress_interval(100)
            .with_sentinel_policy(SentinelPolicy::MalformedOnly);

        assert_eq!(config.target, 3.5);
        assert_eq!(config.iterations_per_worker(), 500);
        assert_eq!(config.sentinel_policy, SentinelPolicy::MalformedOnly);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auto_threads() {
        let config = SearchConfig::default().with_threads(0);
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn test_validation_errors() {
        let base = SearchConfig::default().with_keep(10).with_cleanup_interval(100);

        assert_eq!(
            base.clone().with_keep(0).validate(),
            Err(ConfigError::ZeroKeep)
        );
        assert_eq!(
            base.clone().with_cleanup_interval(10).validate(),
            Err(ConfigError::CleanupTooSmall {
                cleanup: 10,
                keep: 10
            })
        );
        assert_eq!(
            base.clone().with_progress_interval(0).validate(),
            Err(ConfigError::ZeroProgress)
        );
        assert!(matches!(
            base.clone().with_target(f64::NAN).validate(),
            Err(ConfigError::NonFiniteTarget(_))
        ));
        assert_eq!(
            base.with_threads(8).with_limit(3).validate(),
            Err(ConfigError::LimitTooSmall {
                limit: 3,
                threads: 8
            })
        );
    }
}
