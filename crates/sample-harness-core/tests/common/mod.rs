// crates/sample-harness-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fixtures for sample harness integration tests.
// Purpose: Provide in-memory writers, logs, and deterministic samples.
// Dependencies: sample-harness-core
// ============================================================================

//! ## Overview
//! Provides in-memory writers, a recording invocation log, and a small
//! registry with deterministic samples.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test fixtures favor direct unwraps and deliberate panics."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use sample_harness_core::InvocationLog;
use sample_harness_core::InvocationRecord;
use sample_harness_core::ParameterSpec;
use sample_harness_core::SampleError;
use sample_harness_core::SampleRegistry;
use sample_harness_core::sample_println;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Converts string literals into owned argument vectors.
pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Thread-safe in-memory writer whose contents can be inspected after use.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn to_string_lossy(&self) -> String {
        let bytes = self.inner.lock().expect("buffer lock").clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that fails every write.
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("simulated write failure"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("simulated write failure"))
    }
}

/// Invocation log that keeps every record in memory.
#[derive(Clone, Default)]
pub struct RecordingLog {
    records: Arc<Mutex<Vec<InvocationRecord>>>,
}

impl RecordingLog {
    pub fn records(&self) -> Vec<InvocationRecord> {
        self.records.lock().expect("records lock").clone()
    }
}

impl InvocationLog for RecordingLog {
    fn record(&self, record: &InvocationRecord) {
        self.records.lock().expect("records lock").push(record.clone());
    }
}

/// Registry with `greet`, `pair`, `lookup`, `fails`, and `panics` samples.
pub fn fixture_registry() -> SampleRegistry {
    let mut registry = SampleRegistry::default();
    registry
        .register_fn(
            "greet",
            "Prints a greeting.",
            ParameterSpec::builder().optional("name", "world").build().expect("greet spec"),
            |request| {
                sample_println!("hello {}!", request.require("name")?)?;
                Ok(None)
            },
        )
        .expect("register greet");
    registry
        .register_fn(
            "pair",
            "Prints a then b.",
            ParameterSpec::builder().optional("a", "1").required("b").build().expect("pair spec"),
            |request| {
                sample_println!("a={} b={}", request.require("a")?, request.require("b")?)?;
                Ok(None)
            },
        )
        .expect("register pair");
    registry
        .register_fn(
            "fails",
            "Prints then fails.",
            ParameterSpec::empty(),
            |_request| {
                sample_println!("partial")?;
                Err(SampleError::Failed("backend unavailable".to_string()))
            },
        )
        .expect("register fails");
    registry
        .register_fn(
            "lookup",
            "Prints and returns a key.",
            ParameterSpec::builder().required("key").build().expect("lookup spec"),
            |request| {
                let key = request.require("key")?;
                sample_println!("found {key}")?;
                Ok(Some(json!({ "key": key })))
            },
        )
        .expect("register lookup");
    registry
        .register_fn("panics", "Prints then panics.", ParameterSpec::empty(), |_request| {
            sample_println!("before panic")?;
            panic!("sample body panicked");
        })
        .expect("register panics");
    registry
}
