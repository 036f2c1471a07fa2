// crates/sample-harness-core/src/runtime/log.rs
// ============================================================================
// Module: JSON Line Invocation Log
// Description: Invocation log writing one JSON object per line.
// Purpose: Persist structured run records without affecting run outcomes.
// Dependencies: serde_json, std
// ============================================================================

//! ## Overview
//! `JsonLineInvocationLog` serializes each [`InvocationRecord`] to its writer
//! followed by a newline. Write failures are counted and otherwise dropped so
//! logging never changes what the dispatcher returns.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::interfaces::InvocationLog;
use crate::interfaces::InvocationRecord;

// ============================================================================
// SECTION: JSON Line Log
// ============================================================================

/// Invocation log emitting JSON lines.
pub struct JsonLineInvocationLog<W: Write + Send> {
    /// Output writer for log records.
    writer: Mutex<W>,
    /// Number of records that could not be written.
    failures: AtomicU64,
}

impl<W: Write + Send> JsonLineInvocationLog<W> {
    /// Creates a log over `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            failures: AtomicU64::new(0),
        }
    }

    /// Returns how many records failed to write.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Serializes one record and its trailing newline.
    fn write_record(&self, record: &InvocationRecord) -> io::Result<()> {
        let mut guard =
            self.writer.lock().map_err(|_| io::Error::other("log writer mutex poisoned"))?;
        serde_json::to_writer(&mut *guard, record).map_err(io::Error::other)?;
        guard.write_all(b"\n")?;
        guard.flush()
    }
}

impl<W: Write + Send> InvocationLog for JsonLineInvocationLog<W> {
    fn record(&self, record: &InvocationRecord) {
        if self.write_record(record).is_err() {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }
}
