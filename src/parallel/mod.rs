pub mod batch;
pub mod pool;

pub use batch::{batch_ranges, run_comparison_batches};
pub use pool::{WorkerPool, WORKERS_ENV_VAR};
