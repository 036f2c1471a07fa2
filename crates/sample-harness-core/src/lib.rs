// crates/sample-harness-core/src/lib.rs
// ============================================================================
// Module: Sample Harness Core Library
// Description: Public API surface for the sample invocation harness.
// Purpose: Expose parameter specs, capture scopes, registry, and dispatcher.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Sample Harness core resolves CLI-style arguments against a sample's declared
//! [`ParameterSpec`], invokes the registered sample inside a scoped output
//! capture, and returns the [`CapturedOutput`] for assertions or display.
//! Samples never read global option state: every input flows through an
//! [`InvocationRequest`].
//!
//! Invariants:
//! - Parameter names are unique within a spec.
//! - The harness stdout is restored on every exit path of a capture scope.
//! - [`SampleDispatcher::run`] fails with exactly one [`HarnessError`] variant.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::InvocationLog;
pub use interfaces::InvocationOutcome;
pub use interfaces::InvocationRecord;
pub use interfaces::NoopInvocationLog;
pub use interfaces::Sample;
pub use interfaces::SampleError;
pub use interfaces::SampleResult;
pub use interfaces::SampleValue;
pub use runtime::CaptureScope;
pub use runtime::CliArgs;
pub use runtime::FnSample;
pub use runtime::HarnessError;
pub use runtime::HarnessState;
pub use runtime::HarnessStdout;
pub use runtime::JsonLineInvocationLog;
pub use runtime::RegistryError;
pub use runtime::Resolution;
pub use runtime::SampleAccessPolicy;
pub use runtime::SampleDispatcher;
pub use runtime::SampleRegistry;
pub use runtime::resolve;
pub use runtime::resolve_detailed;
pub use runtime::split_cli_args;
pub use runtime::stdout;
pub use runtime::synopsis;
pub use runtime::try_with_captured_output;
pub use runtime::with_captured_output;

// ============================================================================
// SECTION: Macros
// ============================================================================

/// Writes formatted text to the harness stdout without a trailing newline.
///
/// Expands to an [`std::io::Result<()>`] so samples can propagate write
/// failures with `?`.
#[macro_export]
macro_rules! sample_print {
    ($($arg:tt)*) => {
        ::std::io::Write::write_fmt(
            &mut $crate::runtime::capture::stdout(),
            ::std::format_args!($($arg)*),
        )
    };
}

/// Writes formatted text followed by a newline to the harness stdout.
///
/// Expands to an [`std::io::Result<()>`] so samples can propagate write
/// failures with `?`.
#[macro_export]
macro_rules! sample_println {
    () => {
        ::std::io::Write::write_all(&mut $crate::runtime::capture::stdout(), b"\n")
    };
    ($($arg:tt)*) => {{
        let mut out = $crate::runtime::capture::stdout();
        ::std::io::Write::write_fmt(&mut out, ::std::format_args!($($arg)*))
            .and_then(|()| ::std::io::Write::write_all(&mut out, b"\n"))
    }};
}
