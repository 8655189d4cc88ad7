//! Error types for the benchmark driver.

use range_read_object::ObjectError;
use thiserror::Error;

/// Errors that abort a benchmark run.
///
/// None of these are recovered from: a failure anywhere ends the run
/// without a summary.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Object size lookup failed.
    #[error("Failed to stat {name}")]
    Stat {
        name: String,
        #[source]
        source: ObjectError,
    },

    /// Opening a fresh handle failed.
    #[error("Failed to open {name} for the read at offset {offset}")]
    Open {
        name: String,
        offset: u64,
        #[source]
        source: ObjectError,
    },

    /// Seeking the handle failed.
    #[error("Failed to seek {name} to offset {offset}")]
    Seek {
        name: String,
        offset: u64,
        #[source]
        source: ObjectError,
    },

    /// A read call failed.
    #[error("Failed to read {name} at offset {offset} after {read} bytes")]
    Read {
        name: String,
        offset: u64,
        read: usize,
        #[source]
        source: ObjectError,
    },

    /// The object ended before the requested range was filled.
    #[error("Object {name} ended after {read} of {expected} bytes at offset {offset}")]
    ShortRead {
        name: String,
        offset: u64,
        read: usize,
        expected: usize,
    },

    /// Writing a report line failed.
    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),

    /// Encoding a JSON report record failed.
    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}
