//! range-read-bench
//!
//! Diagnoses read amplification in S3-compatible object stores: small,
//! offset-based range reads against large objects can trigger far more
//! traffic between the store's internal components than the client ever
//! receives.
//!
//! The tool mimics a streaming HTTP server feeding video to a browser. It
//! opens the object once per read, seeks, reads a fixed-size span, and
//! closes, walking the object front to back. Each read's latency is printed
//! as it completes, followed by the aggregate throughput for the whole run.
//! Watch the store's internal network load and request latency while it runs.
//!
//! # Usage
//!
//! ```bash
//! # 256 KiB reads (default) against a SeaweedFS S3 gateway
//! range-read-bench --endpoint http://s3:8333 --bucket webvideo my/file/name.mp4
//!
//! # 1 MiB reads, stop after 100 reads, JSON output
//! range-read-bench --endpoint http://s3:8333 --bucket webvideo \
//!   --readsize 1048576 --max-reads 100 --output json my/file/name.mp4
//!
//! # Local baseline: reads /srv/objects/webvideo/my/file/name.mp4
//! range-read-bench --endpoint file:///srv/objects --bucket webvideo my/file/name.mp4
//! ```
//!
//! The trailing `size % readsize` bytes are skipped unless `--include-tail`
//! is given, so total byte counts vary with the read size. Compare the Mbps
//! figures, not the byte counts.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use range_read_driver::{run_benchmark, OutputFormat, RunConfig, Summary, DEFAULT_READ_SIZE};
use range_read_object::{Endpoint, LocalStore, S3Store};
use std::io::Write;
use tracing::info;

#[derive(Parser, Clone, Debug)]
#[command(name = "range-read-bench")]
#[command(about = "Benchmark sequential fixed-size range reads against an object store")]
#[command(long_about = None)]
pub struct Cli {
    /// Object store endpoint (http:// or https:// for S3, file:// for a local directory)
    #[arg(long, default_value = "http://localhost:8333", env = "RANGE_READ_ENDPOINT")]
    pub endpoint: String,

    /// Bucket to read from
    #[arg(long, default_value = "webvideo", env = "RANGE_READ_BUCKET")]
    pub bucket: String,

    /// Region passed to the S3 client
    #[arg(long, default_value = "none", env = "RANGE_READ_REGION")]
    pub region: String,

    /// Number of bytes to read per file open
    #[arg(
        long = "readsize",
        default_value_t = DEFAULT_READ_SIZE,
        env = "RANGE_READ_SIZE",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub read_size: u64,

    /// Also read the trailing partial segment of the object
    #[arg(long)]
    pub include_tail: bool,

    /// Stop after this many reads
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_reads: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputArg::Text)]
    pub output: OutputArg,

    /// Object key to benchmark
    pub filename: String,
}

/// Report format as given on the command line
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        RunConfig::new(cli.filename.clone())
            .with_store(cli.endpoint.clone(), cli.bucket.clone(), cli.region.clone())
            .with_read_size(cli.read_size)
            .with_tail(cli.include_tail)
            .with_max_reads(cli.max_reads)
            .with_output(cli.output.into())
    }
}

/// Connect to the configured store and run the benchmark, writing the report to `out`.
pub async fn run_bench<W: Write + ?Sized>(config: &RunConfig, out: &mut W) -> anyhow::Result<Summary> {
    config.validate().context("Invalid configuration")?;

    let endpoint = Endpoint::parse(&config.endpoint)?;
    info!(
        "Connecting to {} (bucket: {}, region: {})",
        endpoint.display_name(),
        config.bucket,
        config.region
    );

    let summary = match endpoint {
        Endpoint::S3(url) => {
            let store = S3Store::connect(&url, &config.bucket, &config.region)
                .await
                .with_context(|| format!("Failed to connect to {url}"))?;
            run_benchmark(&store, config, out).await?
        }
        Endpoint::Local(root) => {
            let store = LocalStore::connect(&root, &config.bucket)
                .await
                .with_context(|| format!("Failed to open {}", root.display()))?;
            run_benchmark(&store, config, out).await?
        }
    };

    Ok(summary)
}
