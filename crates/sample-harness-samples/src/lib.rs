// crates/sample-harness-samples/src/lib.rs
// ============================================================================
// Module: Sample Harness Built-in Samples
// Description: Offline samples shipped with the harness.
// Purpose: Register runnable samples that need no cloud credentials.
// Dependencies: sample-harness-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Built-in samples exercise the harness end to end without network access:
//! - `greet` prints a greeting.
//! - `echo-params` prints every resolved parameter.
//! - `bigtable-gc-rule` previews a Bigtable column-family GC rule request.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bigtable_gc;
pub mod echo;
pub mod greet;

// ============================================================================
// SECTION: Imports
// ============================================================================

use sample_harness_core::RegistryError;
use sample_harness_core::SampleRegistry;
use sample_harness_core::SpecError;
use thiserror::Error;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bigtable_gc::BigtableGcRuleSample;
pub use bigtable_gc::GcRuleKind;
pub use echo::EchoParamsSample;
pub use greet::GreetSample;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Errors raised while registering built-in samples.
#[derive(Debug, Error)]
pub enum BuiltinSampleError {
    /// A built-in parameter spec is malformed.
    #[error("invalid built-in sample spec: {0}")]
    Spec(#[from] SpecError),
    /// A built-in sample could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Registers every built-in sample.
///
/// # Errors
///
/// Returns [`BuiltinSampleError`] when a spec is malformed or an identifier
/// is already taken.
pub fn register_builtin_samples(registry: &mut SampleRegistry) -> Result<(), BuiltinSampleError> {
    registry.register(greet::SAMPLE_ID, GreetSample::new()?)?;
    registry.register(echo::SAMPLE_ID, EchoParamsSample::new()?)?;
    registry.register(bigtable_gc::SAMPLE_ID, BigtableGcRuleSample::new()?)?;
    Ok(())
}

/// Returns a registry holding every built-in sample under an allow-all policy.
///
/// # Errors
///
/// Returns [`BuiltinSampleError`] when registration fails.
pub fn builtin_registry() -> Result<SampleRegistry, BuiltinSampleError> {
    let mut registry = SampleRegistry::default();
    register_builtin_samples(&mut registry)?;
    Ok(registry)
}
