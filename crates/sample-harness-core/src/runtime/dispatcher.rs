// crates/sample-harness-core/src/runtime/dispatcher.rs
// ============================================================================
// Module: Sample Dispatcher
// Description: Looks up, resolves, and invokes samples under output capture.
// Purpose: Provide the single entry point used by the CLI and by tests.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! A dispatcher run follows a fixed order:
//! 1. Look up the sample. Unknown identifiers fail before any capture opens.
//! 2. Split raw tokens (CLI entry point only) and resolve them against the
//!    sample's spec.
//! 3. Invoke the sample inside a capture scope, keeping its return value.
//! 4. Emit exactly one [`InvocationRecord`] to the configured log.
//!
//! The dispatcher reports [`HarnessState::Running`] for the duration of a run
//! and returns to [`HarnessState::Idle`] on every exit path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::Cell;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::core::CapturedOutput;
use crate::core::SampleRun;
use crate::interfaces::InvocationLog;
use crate::interfaces::InvocationOutcome;
use crate::interfaces::InvocationRecord;
use crate::interfaces::NoopInvocationLog;
use crate::runtime::args::CliArgs;
use crate::runtime::args::split_cli_args;
use crate::runtime::capture::try_with_captured_output;
use crate::runtime::error::HarnessError;
use crate::runtime::registry::SampleRegistry;
use crate::runtime::resolver::resolve_detailed;
use crate::runtime::usage::synopsis;

// ============================================================================
// SECTION: State
// ============================================================================

/// Lifecycle state of a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarnessState {
    /// No invocation in progress.
    #[default]
    Idle,
    /// A sample is executing.
    Running,
}

impl HarnessState {
    /// Returns a stable label for the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
        }
    }
}

/// Marks a dispatcher as running until dropped.
struct RunningGuard<'a> {
    /// Dispatcher state cell.
    state: &'a Cell<HarnessState>,
    /// State to restore on drop.
    previous: HarnessState,
}

impl<'a> RunningGuard<'a> {
    /// Switches `state` to running.
    fn enter(state: &'a Cell<HarnessState>) -> Self {
        let previous = state.replace(HarnessState::Running);
        Self {
            state,
            previous,
        }
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.state.set(self.previous);
    }
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Runs registered samples and captures their output.
///
/// # Invariants
/// - Each run emits exactly one invocation record.
/// - A failed run returns exactly one [`HarnessError`] and no output.
pub struct SampleDispatcher {
    /// Samples available to this dispatcher.
    registry: SampleRegistry,
    /// Sink for per-run records.
    log: Box<dyn InvocationLog>,
    /// Current lifecycle state.
    state: Cell<HarnessState>,
    /// Sequence number of the last emitted record.
    sequence: Cell<u64>,
}

impl SampleDispatcher {
    /// Creates a dispatcher over `registry` that discards invocation records.
    #[must_use]
    pub fn new(registry: SampleRegistry) -> Self {
        Self {
            registry,
            log: Box::new(NoopInvocationLog),
            state: Cell::new(HarnessState::Idle),
            sequence: Cell::new(0),
        }
    }

    /// Replaces the invocation log.
    #[must_use]
    pub fn with_log(mut self, log: impl InvocationLog + 'static) -> Self {
        self.log = Box::new(log);
        self
    }

    /// Returns the underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &SampleRegistry {
        &self.registry
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> HarnessState {
        self.state.get()
    }

    /// Runs `sample_id` with positional arguments only.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnknownSample`] when no allowed sample matches,
    /// [`HarnessError::MissingParameter`] when resolution fails, and
    /// [`HarnessError::Invocation`] when the sample raises an error.
    pub fn run(&self, sample_id: &str, args: &[String]) -> Result<CapturedOutput, HarnessError> {
        self.run_returning(sample_id, args).map(SampleRun::into_output)
    }

    /// Runs `sample_id` with positional arguments and keeps its return value.
    ///
    /// # Errors
    ///
    /// Same as [`SampleDispatcher::run`].
    pub fn run_returning(
        &self,
        sample_id: &str,
        args: &[String],
    ) -> Result<SampleRun, HarnessError> {
        self.execute(sample_id, || {
            Ok(CliArgs {
                positional: args.to_vec(),
                flags: BTreeMap::new(),
            })
        })
    }

    /// Runs `sample_id` with positional arguments and explicit flags.
    ///
    /// # Errors
    ///
    /// Same as [`SampleDispatcher::run`].
    pub fn run_with_flags(
        &self,
        sample_id: &str,
        args: &[String],
        flags: &BTreeMap<String, String>,
    ) -> Result<CapturedOutput, HarnessError> {
        self.execute(sample_id, || {
            Ok(CliArgs {
                positional: args.to_vec(),
                flags: flags.clone(),
            })
        })
        .map(SampleRun::into_output)
    }

    /// Runs `sample_id` with raw CLI tokens (`--name value` flags allowed).
    ///
    /// # Errors
    ///
    /// Same as [`SampleDispatcher::run`]; a trailing flag with no value is
    /// reported as [`HarnessError::MissingParameter`].
    pub fn run_cli(
        &self,
        sample_id: &str,
        tokens: &[String],
    ) -> Result<CapturedOutput, HarnessError> {
        self.run_cli_returning(sample_id, tokens).map(SampleRun::into_output)
    }

    /// Runs `sample_id` with raw CLI tokens and keeps its return value.
    ///
    /// # Errors
    ///
    /// Same as [`SampleDispatcher::run_cli`].
    pub fn run_cli_returning(
        &self,
        sample_id: &str,
        tokens: &[String],
    ) -> Result<SampleRun, HarnessError> {
        self.execute(sample_id, || split_cli_args(tokens.iter().cloned()))
    }

    /// Returns the usage line for `sample_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnknownSample`] when no allowed sample matches.
    pub fn usage(&self, sample_id: &str) -> Result<String, HarnessError> {
        self.registry.get(sample_id).map(|sample| synopsis(sample_id, sample.spec())).ok_or_else(
            || HarnessError::UnknownSample {
                sample_id: sample_id.to_string(),
            },
        )
    }

    /// Runs one invocation and records its outcome.
    fn execute(
        &self,
        sample_id: &str,
        args: impl FnOnce() -> Result<CliArgs, HarnessError>,
    ) -> Result<SampleRun, HarnessError> {
        let started = Instant::now();
        let running = RunningGuard::enter(&self.state);
        let mut ignored = 0;
        let result = self.dispatch(sample_id, args, &mut ignored);
        drop(running);
        self.emit(sample_id, &result, started, ignored);
        result
    }

    /// Looks up, resolves, and invokes the sample.
    fn dispatch(
        &self,
        sample_id: &str,
        args: impl FnOnce() -> Result<CliArgs, HarnessError>,
        ignored: &mut usize,
    ) -> Result<SampleRun, HarnessError> {
        let sample = self.registry.get(sample_id).ok_or_else(|| HarnessError::UnknownSample {
            sample_id: sample_id.to_string(),
        })?;
        let args = args()?;
        let resolution = resolve_detailed(sample.spec(), &args.positional, &args.flags)?;
        *ignored = resolution.ignored_count();
        let (value, output) = try_with_captured_output(|| sample.invoke(&resolution.request))
            .map_err(|source| HarnessError::Invocation {
                sample_id: sample_id.to_string(),
                source,
            })?;
        Ok(SampleRun {
            value,
            output,
        })
    }

    /// Emits the invocation record for a finished run.
    fn emit(
        &self,
        sample_id: &str,
        result: &Result<SampleRun, HarnessError>,
        started: Instant,
        ignored: usize,
    ) {
        let sequence = self.sequence.get().wrapping_add(1);
        self.sequence.set(sequence);
        let (outcome, output_bytes, error) = match result {
            Ok(run) => (InvocationOutcome::Ok, run.output.len(), None),
            Err(err) => (err.outcome(), 0, Some(err.to_string())),
        };
        let record = InvocationRecord {
            sequence,
            sample_id: sample_id.to_string(),
            outcome,
            output_bytes,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            ignored_arguments: ignored,
            error,
        };
        self.log.record(&record);
    }
}
