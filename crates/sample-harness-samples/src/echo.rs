// crates/sample-harness-samples/src/echo.rs
// ============================================================================
// Module: Echo Params Sample
// Description: Prints each resolved parameter as `name=value`.
// Purpose: Make parameter resolution visible from the command line.
// Dependencies: sample-harness-core, serde_json
// ============================================================================

//! ## Overview
//! `echo-params` writes one `name=value` line per resolved parameter and
//! returns the same pairs as a JSON object.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sample_harness_core::InvocationRequest;
use sample_harness_core::ParameterSpec;
use sample_harness_core::Sample;
use sample_harness_core::SampleResult;
use sample_harness_core::SpecError;
use sample_harness_core::sample_println;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Echo Params
// ============================================================================

/// Registry identifier.
pub const SAMPLE_ID: &str = "echo-params";

/// Prints resolved parameters in declaration order.
pub struct EchoParamsSample {
    /// `first` (required), `second` (default empty).
    spec: ParameterSpec,
}

impl EchoParamsSample {
    /// Creates the sample.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the parameter spec is malformed.
    pub fn new() -> Result<Self, SpecError> {
        Ok(Self {
            spec: ParameterSpec::builder().required("first").optional("second", "").build()?,
        })
    }
}

impl Sample for EchoParamsSample {
    fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    fn description(&self) -> &str {
        "Prints every resolved parameter as name=value."
    }

    fn invoke(&self, request: &InvocationRequest) -> SampleResult {
        let mut echoed = Map::new();
        for (name, value) in request.iter() {
            sample_println!("{name}={value}")?;
            echoed.insert(name.to_string(), Value::String(value.to_string()));
        }
        Ok(Some(Value::Object(echoed)))
    }
}
