//! Run configuration.

use crate::error::BenchError;
use crate::plan::ReadPlan;

/// Default bytes per range read (256 KiB).
pub const DEFAULT_READ_SIZE: u64 = 1 << 18;

/// How report lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration for a benchmark run.
///
/// Built once at startup and passed by reference; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Object store endpoint URL.
    pub endpoint: String,
    /// Bucket to read from.
    pub bucket: String,
    /// Region passed to the storage client.
    pub region: String,
    /// Bytes per range read.
    pub read_size: u64,
    /// Object key to benchmark.
    pub filename: String,
    /// Also read the trailing partial segment.
    pub include_tail: bool,
    /// Stop after this many reads.
    pub max_reads: Option<u64>,
    /// Report format.
    pub output: OutputFormat,
}

impl RunConfig {
    /// Create a configuration for `filename` with default connection settings.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            endpoint: "http://localhost:8333".to_string(),
            bucket: "webvideo".to_string(),
            region: "none".to_string(),
            read_size: DEFAULT_READ_SIZE,
            filename: filename.into(),
            include_tail: false,
            max_reads: None,
            output: OutputFormat::Text,
        }
    }

    /// Set the endpoint, bucket and region.
    pub fn with_store(
        mut self,
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        self.endpoint = endpoint.into();
        self.bucket = bucket.into();
        self.region = region.into();
        self
    }

    /// Set the read size.
    pub fn with_read_size(mut self, read_size: u64) -> Self {
        self.read_size = read_size;
        self
    }

    /// Enable or disable reading the trailing partial segment.
    pub fn with_tail(mut self, include_tail: bool) -> Self {
        self.include_tail = include_tail;
        self
    }

    /// Cap the number of reads.
    pub fn with_max_reads(mut self, max_reads: Option<u64>) -> Self {
        self.max_reads = max_reads;
        self
    }

    /// Set the report format.
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Check the configuration before any I/O happens.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.filename.is_empty() {
            return Err(BenchError::Config("Filename must not be empty".to_string()));
        }
        if self.read_size == 0 {
            return Err(BenchError::Config("Read size must be positive".to_string()));
        }
        if self.max_reads == Some(0) {
            return Err(BenchError::Config("Max reads must be positive".to_string()));
        }
        Ok(())
    }

    /// Build the read plan for an object of `file_size` bytes.
    pub fn plan(&self, file_size: u64) -> Result<ReadPlan, BenchError> {
        let mut plan = ReadPlan::new(file_size, self.read_size)?;
        if self.include_tail {
            plan = plan.with_tail();
        }
        if let Some(max_reads) = self.max_reads {
            plan = plan.limit(max_reads);
        }
        Ok(plan)
    }
}
