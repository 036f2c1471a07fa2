// crates/sample-harness-core/src/core/mod.rs
// ============================================================================
// Module: Sample Harness Core Types
// Description: Parameter specs, resolved requests, and captured output.
// Purpose: Provide the transient per-invocation data model.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe what a sample declares ([`ParameterSpec`]), what it
//! receives ([`InvocationRequest`]) and what it printed ([`CapturedOutput`]).
//! All of them are created per invocation and dropped when it completes.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod output;
pub mod request;
pub mod spec;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::SampleId;
pub use output::CapturedOutput;
pub use output::SampleRun;
pub use request::InvocationRequest;
pub use spec::ParameterDecl;
pub use spec::ParameterDefault;
pub use spec::ParameterSpec;
pub use spec::ParameterSpecBuilder;
pub use spec::SpecError;
pub use spec::normalize_parameter_name;
