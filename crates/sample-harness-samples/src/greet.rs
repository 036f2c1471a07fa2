// crates/sample-harness-samples/src/greet.rs
// ============================================================================
// Module: Greet Sample
// Description: Prints a greeting for the supplied name.
// Purpose: Smallest runnable sample for harness smoke tests.
// Dependencies: sample-harness-core
// ============================================================================

//! ## Overview
//! `greet` takes one parameter, `name`, defaulting to `world`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sample_harness_core::InvocationRequest;
use sample_harness_core::ParameterSpec;
use sample_harness_core::Sample;
use sample_harness_core::SampleResult;
use sample_harness_core::SpecError;
use sample_harness_core::sample_println;

// ============================================================================
// SECTION: Greet
// ============================================================================

/// Registry identifier.
pub const SAMPLE_ID: &str = "greet";

/// Prints `hello <name>!`.
pub struct GreetSample {
    /// `name` (default `world`).
    spec: ParameterSpec,
}

impl GreetSample {
    /// Creates the sample.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the parameter spec is malformed.
    pub fn new() -> Result<Self, SpecError> {
        Ok(Self {
            spec: ParameterSpec::builder().optional("name", "world").build()?,
        })
    }
}

impl Sample for GreetSample {
    fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    fn description(&self) -> &str {
        "Prints a greeting for NAME."
    }

    fn invoke(&self, request: &InvocationRequest) -> SampleResult {
        sample_println!("hello {}!", request.require("name")?)?;
        Ok(None)
    }
}
