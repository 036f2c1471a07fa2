// crates/sample-harness-core/src/runtime/mod.rs
// ============================================================================
// Module: Sample Harness Runtime
// Description: Resolver, capture scopes, registry, and dispatcher.
// Purpose: Execute registered samples against resolved CLI-style arguments.
// Dependencies: crate::{core, interfaces}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Runtime modules implement the sample invocation pipeline: split raw
//! tokens, resolve them against a spec, open a capture scope, invoke the
//! sample, and log the outcome. All entry points (CLI, tests) go through
//! [`SampleDispatcher`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod args;
pub mod capture;
pub mod dispatcher;
pub mod error;
pub mod log;
pub mod registry;
pub mod resolver;
pub mod usage;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use args::CliArgs;
pub use args::split_cli_args;
pub use capture::CaptureScope;
pub use capture::HarnessStdout;
pub use capture::stdout;
pub use capture::try_with_captured_output;
pub use capture::with_captured_output;
pub use dispatcher::HarnessState;
pub use dispatcher::SampleDispatcher;
pub use error::HarnessError;
pub use log::JsonLineInvocationLog;
pub use registry::FnSample;
pub use registry::RegistryError;
pub use registry::SampleAccessPolicy;
pub use registry::SampleRegistry;
pub use resolver::Resolution;
pub use resolver::resolve;
pub use resolver::resolve_detailed;
pub use usage::synopsis;
