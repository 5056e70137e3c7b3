//! Rayon thread pool configuration for simulation workloads.
//!
//! Comparison batches are embarrassingly parallel; [WorkerPool::install]
//! bounds them to a fixed thread count when the default (all CPU cores) is
//! too greedy for the host.

use rayon::ThreadPoolBuilder;

/// Environment variable read by [WorkerPool::from_env].
pub const WORKERS_ENV_VAR: &str = "FLURRY_WORKERS";

/// Configures how many worker threads are used for parallel batch execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use Rayon's default (all CPU cores).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads (0 keeps the Rayon default).
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Read the worker count from `FLURRY_WORKERS`. Unset or unparsable
    /// values keep the Rayon default.
    pub fn from_env() -> Self {
        let workers = std::env::var(WORKERS_ENV_VAR)
            .ok()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        Self { workers }
    }

    /// Run a closure on a pool with this worker count. A zero count runs on
    /// the global Rayon pool; otherwise a temporary pool is built.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            f()
        } else {
            match ThreadPoolBuilder::new().num_threads(self.workers).build() {
                Ok(pool) => pool.install(f),
                // Global pool fallback when the dedicated pool can't be built.
                Err(_) => f(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_runs_on_global_rayon() {
        let pool = WorkerPool::default();
        assert_eq!(pool.workers, 0);
        assert_eq!(pool.install(|| 21 * 2), 42);
    }

    #[test]
    fn fixed_pool_limits_thread_count() {
        let pool = WorkerPool::with_workers(2);
        let threads = pool.install(rayon::current_num_threads);
        assert_eq!(threads, 2);
    }
}
