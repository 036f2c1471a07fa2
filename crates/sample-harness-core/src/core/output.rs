// crates/sample-harness-core/src/core/output.rs
// ============================================================================
// Module: Captured Output
// Description: Immutable snapshot of text written during one invocation.
// Purpose: Hand captured stdout to tests and the CLI without further mutation.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`CapturedOutput`] is finalized when a capture scope ends. It exposes
//! read-only accessors only. [`SampleRun`] pairs it with the value the
//! sample returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Value;

// ============================================================================
// SECTION: Captured Output
// ============================================================================

/// Text written to the harness stdout during one capture scope.
///
/// # Invariants
/// - Contents are in write order.
/// - Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedOutput {
    /// Captured text (lossy UTF-8).
    text: String,
}

impl CapturedOutput {
    /// Finalizes raw captured bytes into an immutable snapshot.
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        Self {
            text,
        }
    }

    /// Returns the captured text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the snapshot and returns the captured text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Returns the captured length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true when nothing was written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns true when the captured text contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}

impl fmt::Display for CapturedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CapturedOutput {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for CapturedOutput {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for CapturedOutput {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

// ============================================================================
// SECTION: Sample Run
// ============================================================================

/// Outcome of a successful sample run: its return value and its output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleRun {
    /// Value returned by the sample, if any.
    pub value: Option<Value>,
    /// Text the sample printed.
    pub output: CapturedOutput,
}

impl SampleRun {
    /// Splits the run into its value and output.
    #[must_use]
    pub fn into_parts(self) -> (Option<Value>, CapturedOutput) {
        (self.value, self.output)
    }

    /// Discards the value and returns the output.
    #[must_use]
    pub fn into_output(self) -> CapturedOutput {
        self.output
    }
}
