// crates/sample-harness-core/src/runtime/error.rs
// ============================================================================
// Module: Harness Errors
// Description: The failure taxonomy surfaced by the dispatcher.
// Purpose: Keep every dispatcher failure within three stable variants.
// Dependencies: crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! [`HarnessError`] is the only error type returned by the resolver, the
//! argument splitter, and the dispatcher. Sample failures are wrapped, never
//! reinterpreted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::interfaces::InvocationOutcome;
use crate::interfaces::SampleError;

// ============================================================================
// SECTION: Harness Error
// ============================================================================

/// Errors surfaced by the sample harness.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `Invocation` carries the sample error unchanged as its source.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A required parameter has no supplied value and no default.
    #[error("missing required parameter: {name}")]
    MissingParameter {
        /// Parameter name.
        name: String,
    },
    /// No sample is registered under the requested identifier.
    #[error("unknown sample: {sample_id}")]
    UnknownSample {
        /// Requested identifier.
        sample_id: String,
    },
    /// The sample raised an error.
    #[error("sample {sample_id} failed: {source}")]
    Invocation {
        /// Identifier of the failing sample.
        sample_id: String,
        /// Error raised by the sample.
        #[source]
        source: SampleError,
    },
}

impl HarnessError {
    /// Returns the log outcome label for this error.
    #[must_use]
    pub const fn outcome(&self) -> InvocationOutcome {
        match self {
            Self::MissingParameter {
                ..
            } => InvocationOutcome::MissingParameter,
            Self::UnknownSample {
                ..
            } => InvocationOutcome::UnknownSample,
            Self::Invocation {
                ..
            } => InvocationOutcome::InvocationFailed,
        }
    }
}
