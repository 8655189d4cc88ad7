//! Read plan: the deterministic sequence of range reads for one run.

use crate::error::BenchError;

/// A single range read: `len` bytes starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTask {
    pub offset: u64,
    pub len: u64,
}

/// Non-overlapping, ascending range reads covering an object.
///
/// By default only whole `read_size` segments are planned, so the trailing
/// `file_size % read_size` bytes are never read. [`ReadPlan::with_tail`]
/// adds one final partial read for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPlan {
    file_size: u64,
    read_size: u64,
    full_reads: u64,
    tail: u64,
    max_reads: Option<u64>,
}

impl ReadPlan {
    /// Plan `floor(file_size / read_size)` reads.
    pub fn new(file_size: u64, read_size: u64) -> Result<Self, BenchError> {
        if read_size == 0 {
            return Err(BenchError::Config("Read size must be positive".to_string()));
        }
        Ok(Self {
            file_size,
            read_size,
            full_reads: file_size / read_size,
            tail: 0,
            max_reads: None,
        })
    }

    /// Also read the trailing partial segment, if any.
    pub fn with_tail(mut self) -> Self {
        self.tail = self.file_size % self.read_size;
        self
    }

    /// Stop after at most `max_reads` reads.
    pub fn limit(mut self, max_reads: u64) -> Self {
        self.max_reads = Some(max_reads);
        self
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn read_size(&self) -> u64 {
        self.read_size
    }

    /// Number of reads this plan performs.
    pub fn read_count(&self) -> u64 {
        let count = self.full_reads + u64::from(self.tail > 0);
        match self.max_reads {
            Some(max) => count.min(max),
            None => count,
        }
    }

    /// Total bytes covered by the plan. Percent-through-file is relative to this.
    pub fn planned_bytes(&self) -> u64 {
        let count = self.read_count();
        if count <= self.full_reads {
            count * self.read_size
        } else {
            self.full_reads * self.read_size + self.tail
        }
    }

    /// The reads in ascending offset order.
    pub fn tasks(&self) -> impl Iterator<Item = ReadTask> {
        let plan = *self;
        (0..plan.read_count()).map(move |i| ReadTask {
            offset: i * plan.read_size,
            len: if i < plan.full_reads {
                plan.read_size
            } else {
                plan.tail
            },
        })
    }

    pub fn offsets(&self) -> Vec<u64> {
        self.tasks().map(|task| task.offset).collect()
    }
}
