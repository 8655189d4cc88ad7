//! A single timed range read: open, seek, read until filled, close.

use crate::error::BenchError;
use crate::plan::ReadTask;
use range_read_object::{ObjectReader, ObjectStore};
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Outcome of one range read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadResult {
    /// Offset the read started at.
    pub offset: u64,
    /// Bytes read; equals the task length on success.
    pub bytes_read: u64,
    /// Wall-clock time from open to close.
    pub elapsed: Duration,
    /// `100 * offset / planned_bytes`.
    pub percent: f64,
}

/// Closes the reader when dropped, on success and error paths alike.
struct OpenHandle<R: ObjectReader> {
    reader: R,
}

impl<R: ObjectReader> Deref for OpenHandle<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.reader
    }
}

impl<R: ObjectReader> DerefMut for OpenHandle<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.reader
    }
}

impl<R: ObjectReader> Drop for OpenHandle<R> {
    fn drop(&mut self) {
        self.reader.close();
    }
}

/// Read `task.len` bytes of `name` at `task.offset` through a fresh handle.
///
/// The transport may hand back fewer bytes than asked for on every call
/// (S3 bodies typically arrive in ~32 KiB pieces), so reads are repeated
/// until the buffer is full. Any failure aborts immediately.
pub async fn perform_range_read<S: ObjectStore>(
    store: &S,
    name: &str,
    task: ReadTask,
    planned_bytes: u64,
) -> Result<ReadResult, BenchError> {
    let size = usize::try_from(task.len).map_err(|_| {
        BenchError::Config(format!("Read size {} does not fit in memory", task.len))
    })?;

    let start = Instant::now();

    let mut handle = OpenHandle {
        reader: store
            .open(name)
            .await
            .map_err(|source| BenchError::Open {
                name: name.to_string(),
                offset: task.offset,
                source,
            })?,
    };

    handle
        .seek(task.offset)
        .await
        .map_err(|source| BenchError::Seek {
            name: name.to_string(),
            offset: task.offset,
            source,
        })?;

    let mut buf = vec![0u8; size];
    let mut cursor = 0usize;
    let mut calls = 0usize;
    while cursor < size {
        let n = handle
            .read(&mut buf[cursor..])
            .await
            .map_err(|source| BenchError::Read {
                name: name.to_string(),
                offset: task.offset,
                read: cursor,
                source,
            })?;
        if n == 0 {
            return Err(BenchError::ShortRead {
                name: name.to_string(),
                offset: task.offset,
                read: cursor,
                expected: size,
            });
        }
        cursor += n;
        calls += 1;
    }
    debug_assert_eq!(cursor, size);

    drop(handle);
    let elapsed = start.elapsed();

    trace!(
        "Read {} bytes at offset {} in {} calls",
        cursor,
        task.offset,
        calls
    );

    let percent = if planned_bytes == 0 {
        0.0
    } else {
        100.0 * task.offset as f64 / planned_bytes as f64
    };

    Ok(ReadResult {
        offset: task.offset,
        bytes_read: cursor as u64,
        elapsed,
        percent,
    })
}
