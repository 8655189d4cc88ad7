//! Command-line interface for range-read-bench
//!
//! # Usage Examples
//!
//! ```bash
//! # Default 256 KiB reads
//! range-read-bench --endpoint http://s3:8333 --bucket webvideo my/file/name.mp4
//!
//! # 16 MiB reads with per-read tracing on stderr
//! RUST_LOG=range_read_driver=debug range-read-bench \
//!   --endpoint http://s3:8333 --bucket webvideo --readsize 16777216 my/file/name.mp4
//! ```

use clap::Parser;
use range_read_bench::{run_bench, Cli};
use range_read_driver::RunConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RunConfig::from(&cli);

    run_bench(&config, &mut std::io::stdout()).await?;

    Ok(())
}
