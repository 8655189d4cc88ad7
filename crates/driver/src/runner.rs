//! The benchmark loop.

use crate::config::RunConfig;
use crate::error::BenchError;
use crate::metrics::{RunTotals, Summary};
use crate::read::perform_range_read;
use crate::report::Reporter;
use range_read_object::ObjectStore;
use std::io::Write;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Run the sequential range-read benchmark described by `config` against `store`.
///
/// Writes one line per read to `out`, then the summary. Reads run strictly
/// one after another in ascending offset order. The first error ends the run
/// and no summary is written.
pub async fn run_benchmark<S, W>(
    store: &S,
    config: &RunConfig,
    out: &mut W,
) -> Result<Summary, BenchError>
where
    S: ObjectStore,
    W: Write + ?Sized,
{
    config.validate()?;

    let meta = store
        .stat(&config.filename)
        .await
        .map_err(|source| BenchError::Stat {
            name: config.filename.clone(),
            source,
        })?;

    let plan = config.plan(meta.size)?;
    info!(
        "Reading {} of {} bytes from {} in {} reads of {} bytes",
        plan.planned_bytes(),
        plan.file_size(),
        config.filename,
        plan.read_count(),
        plan.read_size()
    );
    if plan.read_count() == 0 {
        warn!(
            "{} is smaller than the read size ({} < {}), nothing to read",
            config.filename,
            plan.file_size(),
            plan.read_size()
        );
    }

    let reporter = Reporter::new(config.output);
    let mut totals = RunTotals::default();

    let start = Instant::now();
    for task in plan.tasks() {
        let result =
            perform_range_read(store, &config.filename, task, plan.planned_bytes()).await?;
        debug!(
            "Read {} at offset {} took {:?}",
            result.bytes_read, result.offset, result.elapsed
        );
        reporter.write_read(&mut *out, &result)?;
        totals.record(&result);
    }
    let summary = totals.finish(start.elapsed());

    info!(
        "Read {} bytes in {:?} ({:.3} Mbps)",
        summary.total_bytes,
        summary.elapsed,
        summary.megabits_per_second()
    );
    reporter.write_summary(&mut *out, &summary)?;

    Ok(summary)
}
