//! Sequential range-read benchmark driver.
//!
//! Reproduces the access pattern a streaming HTTP server produces when it
//! serves browser range requests out of an object store: every read opens a
//! fresh handle, seeks, reads a fixed-size span, and closes. Reads cover the
//! object front to back, one at a time.
//!
//! The run is fully deterministic for a given object size and read size.
//! Latency is measured per read; throughput is measured over the whole loop.
//!
//! # Example
//!
//! ```ignore
//! use range_read_driver::{run_benchmark, RunConfig};
//! use range_read_object::S3Store;
//!
//! let config = RunConfig::new("my/file/name.mp4").with_read_size(1 << 20);
//! let store = S3Store::connect(&config.endpoint, &config.bucket, &config.region).await?;
//! let summary = run_benchmark(&store, &config, &mut std::io::stdout()).await?;
//! println!("{:.3} Mbps", summary.megabits_per_second());
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod plan;
pub mod read;
pub mod report;
pub mod runner;

#[cfg(test)]
mod testing;

pub use config::{OutputFormat, RunConfig, DEFAULT_READ_SIZE};
pub use error::BenchError;
pub use metrics::{megabits_per_second, LatencyStats, RunTotals, Summary};
pub use plan::{ReadPlan, ReadTask};
pub use read::{perform_range_read, ReadResult};
pub use report::Reporter;
pub use runner::run_benchmark;
