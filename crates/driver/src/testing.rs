//! Scripted in-memory object store for driver tests.

use range_read_object::{ObjectError, ObjectMeta, ObjectReader, ObjectStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Byte stored at `position` in every scripted object.
pub(crate) fn pattern_byte(position: u64) -> u8 {
    (position % 251) as u8
}

/// Call counters shared between a store and the readers it hands out.
#[derive(Debug, Default)]
pub(crate) struct CallLog {
    pub stat_calls: AtomicUsize,
    pub open_calls: AtomicUsize,
    pub seek_calls: AtomicUsize,
    pub read_calls: AtomicUsize,
    pub close_calls: AtomicUsize,
    /// Buffer length passed to every read call, in order.
    pub read_requests: Mutex<Vec<usize>>,
}

impl CallLog {
    pub fn stats(&self) -> usize {
        self.stat_calls.load(Ordering::SeqCst)
    }

    pub fn opens(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub fn read_requests(&self) -> Vec<usize> {
        self.read_requests.lock().unwrap().clone()
    }
}

/// Object store serving a single synthetic object of `size` bytes.
///
/// Reads return at most `chunk` bytes per call. Failures and delays are
/// injected by 1-based call number.
pub(crate) struct ScriptedStore {
    size: u64,
    chunk: usize,
    fail_open_at: Option<usize>,
    fail_read_at: Option<usize>,
    first_open_delay: Option<Duration>,
    pub log: Arc<CallLog>,
}

impl ScriptedStore {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            chunk: 32 * 1024,
            fail_open_at: None,
            fail_read_at: None,
            first_open_delay: None,
            log: Arc::new(CallLog::default()),
        }
    }

    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk;
        self
    }

    pub fn fail_open_at(mut self, call: usize) -> Self {
        self.fail_open_at = Some(call);
        self
    }

    pub fn fail_read_at(mut self, call: usize) -> Self {
        self.fail_read_at = Some(call);
        self
    }

    pub fn with_first_open_delay(mut self, delay: Duration) -> Self {
        self.first_open_delay = Some(delay);
        self
    }
}

#[async_trait::async_trait]
impl ObjectStore for ScriptedStore {
    type Reader = ScriptedReader;

    async fn stat(&self, name: &str) -> Result<ObjectMeta, ObjectError> {
        self.log.stat_calls.fetch_add(1, Ordering::SeqCst);
        if name != "object.bin" {
            return Err(ObjectError::NotFound(name.to_string()));
        }
        Ok(ObjectMeta { size: self.size })
    }

    async fn open(&self, name: &str) -> Result<ScriptedReader, ObjectError> {
        let call = self.log.open_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == 1 {
            if let Some(delay) = self.first_open_delay {
                tokio::time::sleep(delay).await;
            }
        }
        if self.fail_open_at == Some(call) {
            return Err(ObjectError::Request {
                target: name.to_string(),
                message: format!("injected open failure on call {call}"),
            });
        }
        Ok(ScriptedReader {
            size: self.size,
            chunk: self.chunk,
            position: 0,
            fail_read_at: self.fail_read_at,
            closed: false,
            log: Arc::clone(&self.log),
        })
    }
}

pub(crate) struct ScriptedReader {
    size: u64,
    chunk: usize,
    position: u64,
    fail_read_at: Option<usize>,
    closed: bool,
    log: Arc<CallLog>,
}

#[async_trait::async_trait]
impl ObjectReader for ScriptedReader {
    async fn seek(&mut self, offset: u64) -> Result<u64, ObjectError> {
        self.log.seek_calls.fetch_add(1, Ordering::SeqCst);
        self.position = offset;
        Ok(offset)
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ObjectError> {
        let call = self.log.read_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.read_requests.lock().unwrap().push(buf.len());
        if self.fail_read_at == Some(call) {
            return Err(ObjectError::Io(std::io::Error::other(format!(
                "injected read failure on call {call}"
            ))));
        }

        let remaining = self.size.saturating_sub(self.position);
        let n = buf
            .len()
            .min(self.chunk)
            .min(usize::try_from(remaining).unwrap_or(usize::MAX));
        for (i, byte) in buf[..n].iter_mut().enumerate() {
            *byte = pattern_byte(self.position + i as u64);
        }
        self.position += n as u64;
        Ok(n)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.log.close_calls.fetch_add(1, Ordering::SeqCst);
        }
    }
}
