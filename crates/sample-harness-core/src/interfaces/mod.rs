// crates/sample-harness-core/src/interfaces/mod.rs
// ============================================================================
// Module: Sample Harness Interfaces
// Description: Contract surfaces for samples and invocation logging.
// Purpose: Define how samples and log sinks plug into the dispatcher.
// Dependencies: crate::core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Sample`] declares its parameters and performs one operation against an
//! external collaborator (typically a cloud API client). The harness neither
//! inspects nor transforms what the sample does; it only forwards the
//! resolved [`InvocationRequest`] and captures what the sample prints.
//!
//! An [`InvocationLog`] receives one [`InvocationRecord`] per dispatcher run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::InvocationRequest;
use crate::core::ParameterSpec;

// ============================================================================
// SECTION: Sample
// ============================================================================

/// Errors raised by sample bodies.
///
/// The harness propagates these unchanged; it never classifies or retries
/// them.
#[derive(Debug, Error)]
pub enum SampleError {
    /// Writing to the harness stdout failed.
    #[error("failed to write sample output: {0}")]
    Output(#[from] std::io::Error),
    /// A parameter the sample expected was not resolved.
    #[error("missing value for parameter {name}")]
    MissingValue {
        /// Parameter name.
        name: String,
    },
    /// A parameter value could not be interpreted by the sample.
    #[error("invalid value for parameter {name} ({value}): {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Raw supplied value.
        value: String,
        /// Parse or validation failure detail.
        reason: String,
    },
    /// Failure reported by an external client library.
    #[error(transparent)]
    External(#[from] Box<dyn std::error::Error + Send + Sync>),
    /// Free-form sample failure.
    #[error("{0}")]
    Failed(String),
}

/// Value a sample hands back alongside its printed output.
///
/// Samples that create or fetch a resource return it here so callers can
/// assert on it without parsing the printed text.
pub type SampleValue = serde_json::Value;

/// Result of one sample body.
pub type SampleResult = Result<Option<SampleValue>, SampleError>;

/// A single runnable sample.
///
/// # Output
/// Only writes through [`crate::stdout`] or the `sample_print!` and
/// `sample_println!` macros are captured. `println!` and direct
/// [`std::io::stdout`] writes bypass every capture scope and reach the
/// terminal, so sample bodies must not use them.
pub trait Sample: Send + Sync {
    /// Returns the declared parameter list.
    fn spec(&self) -> &ParameterSpec;

    /// Returns a one-line human description.
    fn description(&self) -> &str {
        ""
    }

    /// Runs the sample with resolved parameters, writing through
    /// [`crate::stdout`].
    ///
    /// Returns the sample's result value, or `None` when it only prints.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError`] when the sample fails.
    fn invoke(&self, request: &InvocationRequest) -> SampleResult;
}

// ============================================================================
// SECTION: Invocation Log
// ============================================================================

/// Outcome label for one dispatcher run.
///
/// # Invariants
/// - Variants are stable for log consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationOutcome {
    /// The sample completed and its output was captured.
    Ok,
    /// A required parameter had no value.
    MissingParameter,
    /// No sample is registered under the requested identifier.
    UnknownSample,
    /// The sample raised an error.
    InvocationFailed,
}

impl InvocationOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::MissingParameter => "missing_parameter",
            Self::UnknownSample => "unknown_sample",
            Self::InvocationFailed => "invocation_failed",
        }
    }
}

/// Structured record emitted once per dispatcher run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationRecord {
    /// Per-dispatcher sequence number, starting at 1.
    pub sequence: u64,
    /// Requested sample identifier.
    pub sample_id: String,
    /// Outcome classification.
    pub outcome: InvocationOutcome,
    /// Captured output length in bytes (zero on failure).
    pub output_bytes: usize,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    /// Positional values and flags that matched no declared parameter.
    pub ignored_arguments: usize,
    /// Error message when the run failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sink for invocation records.
///
/// Implementations must not fail the invocation; write errors are handled
/// internally.
pub trait InvocationLog: Send + Sync {
    /// Records one invocation.
    fn record(&self, record: &InvocationRecord);
}

/// Invocation log that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvocationLog;

impl InvocationLog for NoopInvocationLog {
    fn record(&self, _record: &InvocationRecord) {}
}
