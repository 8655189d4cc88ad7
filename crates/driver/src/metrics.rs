//! Run totals, throughput, and latency statistics.

use crate::read::ReadResult;
use std::time::Duration;

/// Megabits per second for `bytes` moved in `elapsed`.
///
/// Returns 0.0 for a zero duration.
pub fn megabits_per_second(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        bytes as f64 * 8.0 / secs / 1_000_000.0
    } else {
        0.0
    }
}

/// Accumulated while a run is in progress.
#[derive(Debug, Clone, Default)]
pub struct RunTotals {
    bytes: u64,
    latencies: Vec<Duration>,
}

impl RunTotals {
    pub fn record(&mut self, result: &ReadResult) {
        self.bytes += result.bytes_read;
        self.latencies.push(result.elapsed);
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn reads(&self) -> u64 {
        self.latencies.len() as u64
    }

    /// Close out the run. `elapsed` is the whole-loop wall-clock time, not
    /// the sum of the per-read latencies.
    pub fn finish(self, elapsed: Duration) -> Summary {
        Summary {
            total_bytes: self.bytes,
            read_count: self.latencies.len() as u64,
            elapsed,
            latency: LatencyStats::from_samples(&self.latencies),
        }
    }
}

/// Final result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_bytes: u64,
    pub read_count: u64,
    /// Wall-clock time for the whole read loop, including open and seek overhead.
    pub elapsed: Duration,
    /// `None` when no reads were planned.
    pub latency: Option<LatencyStats>,
}

impl Summary {
    pub fn megabits_per_second(&self) -> f64 {
        megabits_per_second(self.total_bytes, self.elapsed)
    }
}

/// Distribution of per-read latencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub min: Duration,
    pub mean: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p99: Duration,
    pub max: Duration,
}

impl LatencyStats {
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let total: Duration = sorted.iter().sum();
        let mean = total / sorted.len() as u32;

        Some(Self {
            min: sorted[0],
            mean,
            p50: percentile(&sorted, 50.0),
            p90: percentile(&sorted, 90.0),
            p99: percentile(&sorted, 99.0),
            max: sorted[sorted.len() - 1],
        })
    }
}

// Nearest-rank percentile over a sorted, non-empty slice.
fn percentile(sorted: &[Duration], pct: f64) -> Duration {
    let rank = (pct / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
