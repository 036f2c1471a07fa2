// crates/sample-harness-core/tests/dispatcher.rs
// ============================================================================
// Module: Sample Dispatcher Tests
// Description: End-to-end tests for lookup, resolution, capture, and logging.
// ============================================================================
//! ## Overview
//! Validates dispatcher outcomes, state transitions, error propagation, and
//! invocation records.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]
#![allow(dead_code, reason = "Common module may have unused helpers.")]

mod common;

use std::collections::BTreeMap;
use std::error::Error;
use std::panic;
use std::panic::AssertUnwindSafe;

use common::RecordingLog;
use common::fixture_registry;
use common::strings;
use sample_harness_core::HarnessError;
use sample_harness_core::HarnessState;
use sample_harness_core::InvocationOutcome;
use sample_harness_core::SampleDispatcher;
use sample_harness_core::SampleError;
use sample_harness_core::runtime::capture::is_capturing;
use sample_harness_core::runtime::capture::capture_depth;
use sample_harness_core::runtime::capture::scopes_opened;
use serde_json::json;

#[test]
fn greet_uses_default_name() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let output = dispatcher.run("greet", &[]).expect("greet runs");
    assert_eq!(output, "hello world!\n");
}

#[test]
fn greet_binds_positional_name() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let output = dispatcher.run("greet", &strings(&["Ada"])).expect("greet runs");
    assert_eq!(output, "hello Ada!\n");
}

#[test]
fn unknown_sample_fails_without_opening_capture() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let opened = scopes_opened();
    let err = dispatcher.run("does-not-exist", &[]).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::UnknownSample { ref sample_id } if sample_id == "does-not-exist"
    ));
    assert_eq!(scopes_opened(), opened);
}

#[test]
fn missing_parameter_fails_without_opening_capture() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let opened = scopes_opened();
    let err = dispatcher.run("pair", &[]).unwrap_err();
    assert_eq!(err.to_string(), "missing required parameter: b");
    assert_eq!(scopes_opened(), opened);
}

#[test]
fn sample_error_propagates_unchanged() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let err = dispatcher.run("fails", &[]).unwrap_err();
    let HarnessError::Invocation {
        sample_id,
        source,
    } = &err
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(sample_id, "fails");
    assert!(matches!(source, SampleError::Failed(message) if message == "backend unavailable"));
    assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("backend unavailable"));
    assert!(!is_capturing());
}

#[test]
fn state_returns_to_idle_after_success_and_failure() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    assert_eq!(dispatcher.state(), HarnessState::Idle);
    dispatcher.run("greet", &[]).expect("greet runs");
    assert_eq!(dispatcher.state(), HarnessState::Idle);
    dispatcher.run("fails", &[]).unwrap_err();
    assert_eq!(dispatcher.state(), HarnessState::Idle);
}

#[test]
fn panicking_sample_leaves_dispatcher_idle_and_uncaptured() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| dispatcher.run("panics", &[])));
    assert!(outcome.is_err());
    assert_eq!(dispatcher.state(), HarnessState::Idle);
    assert!(!is_capturing());
    assert_eq!(capture_depth(), 0);
    assert_eq!(dispatcher.run("greet", &[]).expect("greet runs"), "hello world!\n");
}

#[test]
fn returned_value_is_kept_with_output() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let run = dispatcher.run_returning("lookup", &strings(&["k1"])).expect("lookup runs");
    assert_eq!(run.output, "found k1\n");
    assert_eq!(run.value, Some(json!({ "key": "k1" })));

    let (value, output) = dispatcher
        .run_cli_returning("lookup", &strings(&["--key", "k2"]))
        .expect("lookup runs")
        .into_parts();
    assert_eq!(value, Some(json!({ "key": "k2" })));
    assert_eq!(output, "found k2\n");
}

#[test]
fn printing_only_samples_return_no_value() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let run = dispatcher.run_returning("greet", &[]).expect("greet runs");
    assert!(run.value.is_none());
    assert_eq!(run.into_output(), "hello world!\n");
}

#[test]
fn flags_override_positional_values() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let flags = BTreeMap::from([("name".to_string(), "Grace".to_string())]);
    let output =
        dispatcher.run_with_flags("greet", &strings(&["Ada"]), &flags).expect("greet runs");
    assert_eq!(output, "hello Grace!\n");
}

#[test]
fn cli_tokens_are_split_before_resolution() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    let output = dispatcher.run_cli("pair", &strings(&["--a", "9", "5"])).expect("pair runs");
    assert_eq!(output, "a=9 b=5\n");
    let err = dispatcher.run_cli("pair", &strings(&["5", "--b"])).unwrap_err();
    assert_eq!(err.outcome(), InvocationOutcome::MissingParameter);
}

#[test]
fn usage_describes_spec() {
    let dispatcher = SampleDispatcher::new(fixture_registry());
    assert_eq!(dispatcher.usage("pair").expect("usage"), "pair [a=1] <b>");
    assert!(matches!(dispatcher.usage("nope"), Err(HarnessError::UnknownSample { .. })));
}

#[test]
fn every_run_emits_one_record() {
    let log = RecordingLog::default();
    let dispatcher = SampleDispatcher::new(fixture_registry()).with_log(log.clone());
    dispatcher.run("greet", &strings(&["Ada", "extra"])).expect("greet runs");
    dispatcher.run("missing", &[]).unwrap_err();
    dispatcher.run("fails", &[]).unwrap_err();

    let records = log.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().map(|record| record.sequence).collect::<Vec<_>>(), [1, 2, 3]);

    assert_eq!(records[0].outcome, InvocationOutcome::Ok);
    assert_eq!(records[0].output_bytes, "hello Ada!\n".len());
    assert_eq!(records[0].ignored_arguments, 1);
    assert!(records[0].error.is_none());

    assert_eq!(records[1].outcome, InvocationOutcome::UnknownSample);
    assert_eq!(records[1].error.as_deref(), Some("unknown sample: missing"));

    assert_eq!(records[2].outcome, InvocationOutcome::InvocationFailed);
    assert_eq!(records[2].output_bytes, 0);
}
