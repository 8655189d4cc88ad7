//! Report lines written while a run progresses.

use crate::config::OutputFormat;
use crate::error::BenchError;
use crate::metrics::{LatencyStats, Summary};
use crate::read::ReadResult;
use serde::Serialize;
use std::io::Write;

/// Per-read progress line.
pub fn read_line(result: &ReadResult) -> String {
    format!(
        "Read {} bytes at offset {} in {:.3}s ({:.1}%)",
        result.bytes_read,
        result.offset,
        result.elapsed.as_secs_f64(),
        result.percent
    )
}

/// Final throughput line.
pub fn summary_line(summary: &Summary) -> String {
    format!(
        "Read {} bytes in {:.3} seconds at {:.6} Mbps",
        summary.total_bytes,
        summary.elapsed.as_secs_f64(),
        summary.megabits_per_second()
    )
}

/// Latency distribution line.
pub fn latency_line(read_count: u64, stats: &LatencyStats) -> String {
    format!(
        "Latency over {} reads: min {:.3}s mean {:.3}s p50 {:.3}s p90 {:.3}s p99 {:.3}s max {:.3}s",
        read_count,
        stats.min.as_secs_f64(),
        stats.mean.as_secs_f64(),
        stats.p50.as_secs_f64(),
        stats.p90.as_secs_f64(),
        stats.p99.as_secs_f64(),
        stats.max.as_secs_f64()
    )
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record {
    Read {
        offset: u64,
        bytes: u64,
        elapsed_secs: f64,
        percent: f64,
    },
    Summary {
        bytes: u64,
        reads: u64,
        elapsed_secs: f64,
        mbps: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        latency: Option<LatencyRecord>,
    },
}

#[derive(Serialize)]
struct LatencyRecord {
    min_secs: f64,
    mean_secs: f64,
    p50_secs: f64,
    p90_secs: f64,
    p99_secs: f64,
    max_secs: f64,
}

impl From<&LatencyStats> for LatencyRecord {
    fn from(stats: &LatencyStats) -> Self {
        Self {
            min_secs: stats.min.as_secs_f64(),
            mean_secs: stats.mean.as_secs_f64(),
            p50_secs: stats.p50.as_secs_f64(),
            p90_secs: stats.p90.as_secs_f64(),
            p99_secs: stats.p99.as_secs_f64(),
            max_secs: stats.max.as_secs_f64(),
        }
    }
}

/// Writes report lines in the configured format.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write_read<W: Write + ?Sized>(
        &self,
        out: &mut W,
        result: &ReadResult,
    ) -> Result<(), BenchError> {
        match self.format {
            OutputFormat::Text => writeln!(out, "{}", read_line(result))?,
            OutputFormat::Json => write_record(
                out,
                &Record::Read {
                    offset: result.offset,
                    bytes: result.bytes_read,
                    elapsed_secs: result.elapsed.as_secs_f64(),
                    percent: result.percent,
                },
            )?,
        }
        Ok(())
    }

    pub fn write_summary<W: Write + ?Sized>(
        &self,
        out: &mut W,
        summary: &Summary,
    ) -> Result<(), BenchError> {
        match self.format {
            OutputFormat::Text => {
                writeln!(out, "{}", summary_line(summary))?;
                if let Some(stats) = &summary.latency {
                    writeln!(out, "{}", latency_line(summary.read_count, stats))?;
                }
            }
            OutputFormat::Json => write_record(
                out,
                &Record::Summary {
                    bytes: summary.total_bytes,
                    reads: summary.read_count,
                    elapsed_secs: summary.elapsed.as_secs_f64(),
                    mbps: summary.megabits_per_second(),
                    latency: summary.latency.as_ref().map(LatencyRecord::from),
                },
            )?,
        }
        out.flush()?;
        Ok(())
    }
}

fn write_record<W: Write + ?Sized>(out: &mut W, record: &Record) -> Result<(), BenchError> {
    serde_json::to_writer(&mut *out, record)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_read() -> ReadResult {
        ReadResult {
            offset: 524_288,
            bytes_read: 262_144,
            elapsed: Duration::from_millis(33),
            percent: 1.5,
        }
    }

    fn sample_summary() -> Summary {
        Summary {
            total_bytes: 40_108_032,
            read_count: 153,
            elapsed: Duration::from_millis(1229),
            latency: LatencyStats::from_samples(&[Duration::from_millis(8)]),
        }
    }

    #[test]
    fn test_read_line_format() {
        assert_eq!(
            read_line(&sample_read()),
            "Read 262144 bytes at offset 524288 in 0.033s (1.5%)"
        );
    }

    #[test]
    fn test_summary_line_format() {
        let line = summary_line(&sample_summary());
        assert!(line.starts_with("Read 40108032 bytes in 1.229 seconds at 261.077"));
        assert!(line.ends_with(" Mbps"));
    }

    #[test]
    fn test_text_summary_includes_latency() {
        let mut out = Vec::new();
        Reporter::new(OutputFormat::Text)
            .write_summary(&mut out, &sample_summary())
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Latency over 153 reads: min 0.008s"));
    }

    #[test]
    fn test_json_records() {
        let mut out = Vec::new();
        let reporter = Reporter::new(OutputFormat::Json);
        reporter.write_read(&mut out, &sample_read()).unwrap();
        reporter.write_summary(&mut out, &sample_summary()).unwrap();

        let text = String::from_utf8(out).unwrap();
        let records: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "read");
        assert_eq!(records[0]["offset"], 524_288);
        assert_eq!(records[0]["bytes"], 262_144);
        assert_eq!(records[1]["type"], "summary");
        assert_eq!(records[1]["reads"], 153);
        assert!(records[1]["latency"]["p99_secs"].is_number());
    }

    #[test]
    fn test_json_summary_without_reads_omits_latency() {
        let summary = Summary {
            total_bytes: 0,
            read_count: 0,
            elapsed: Duration::ZERO,
            latency: None,
        };
        let mut out = Vec::new();
        Reporter::new(OutputFormat::Json)
            .write_summary(&mut out, &summary)
            .unwrap();

        let record: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(record["mbps"], 0.0);
        assert!(record.get("latency").is_none());
    }
}
