// crates/sample-harness-samples/tests/builtin_samples.rs
// ============================================================================
// Module: Built-in Sample Tests
// Description: End-to-end runs of the built-in samples through a dispatcher.
// ============================================================================
//! ## Overview
//! Validates output of `greet`, `echo-params`, and `bigtable-gc-rule`,
//! including rule shapes and parameter validation failures.

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

use sample_harness_core::HarnessError;
use sample_harness_core::SampleDispatcher;
use sample_harness_core::SampleError;
use sample_harness_samples::GcRuleKind;
use sample_harness_samples::builtin_registry;
use sample_harness_samples::register_builtin_samples;
use serde_json::Value;
use serde_json::json;

fn dispatcher() -> SampleDispatcher {
    SampleDispatcher::new(builtin_registry().expect("builtin registry"))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn gc_preview(tokens: &[&str]) -> (String, Value) {
    let output = dispatcher().run_cli("bigtable-gc-rule", &strings(tokens)).expect("sample runs");
    let mut lines = output.as_str().lines();
    let progress = lines.next().expect("progress line").to_string();
    let body = serde_json::from_str(lines.next().expect("json line")).expect("valid json");
    assert!(lines.next().is_none());
    (progress, body)
}

#[test]
fn registry_lists_builtin_samples() {
    let registry = builtin_registry().expect("builtin registry");
    let ids: Vec<&str> = registry.ids().into_iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, ["bigtable-gc-rule", "echo-params", "greet"]);
    for (_, sample) in registry.entries() {
        assert!(!sample.description().is_empty());
    }
}

#[test]
fn registering_twice_is_rejected() {
    let mut registry = builtin_registry().expect("builtin registry");
    let err = register_builtin_samples(&mut registry).unwrap_err();
    assert_eq!(err.to_string(), "sample already registered: greet");
}

#[test]
fn greet_prints_default_and_supplied_names() {
    let dispatcher = dispatcher();
    assert_eq!(dispatcher.run("greet", &[]).expect("greet"), "hello world!\n");
    assert_eq!(dispatcher.run("greet", &strings(&["Ada"])).expect("greet"), "hello Ada!\n");
}

#[test]
fn echo_params_prints_in_declaration_order() {
    let dispatcher = dispatcher();
    let tokens = strings(&["--second", "b", "a"]);
    let output = dispatcher.run_cli("echo-params", &tokens).expect("echo");
    assert_eq!(output, "first=a\nsecond=b\n");
    let output = dispatcher.run("echo-params", &strings(&["only"])).expect("echo");
    assert_eq!(output, "first=only\nsecond=\n");
}

#[test]
fn echo_params_returns_resolved_pairs() {
    let run = dispatcher().run_returning("echo-params", &strings(&["a", "b"])).expect("echo");
    assert_eq!(run.value, Some(json!({"first": "a", "second": "b"})));
}

#[test]
fn greet_returns_no_value() {
    let run = dispatcher().run_returning("greet", &[]).expect("greet");
    assert!(run.value.is_none());
}

#[test]
fn echo_params_requires_first() {
    let err = dispatcher().run("echo-params", &[]).unwrap_err();
    assert!(matches!(err, HarnessError::MissingParameter { ref name } if name == "first"));
}

#[test]
fn gc_rule_defaults_to_five_day_max_age() {
    let (progress, body) = gc_preview(&["my-project", "my-instance", "my-table"]);
    assert_eq!(progress, "Creating column family cf1 with MaxAge GC rule on table my-table...");
    assert_eq!(
        body,
        json!({
            "name": "projects/my-project/instances/my-instance/tables/my-table",
            "modifications": [
                {"id": "cf1", "create": {"gcRule": {"maxAge": {"seconds": 432_000}}}}
            ]
        })
    );
}

#[test]
fn gc_rule_returns_printed_request_as_value() {
    let tokens = strings(&["p", "i", "t", "--rule", "union"]);
    let run = dispatcher().run_cli_returning("bigtable-gc-rule", &tokens).expect("sample runs");
    let line = run.output.as_str().lines().nth(1).expect("json line");
    let printed: Value = serde_json::from_str(line).expect("valid json");
    assert_eq!(run.value, Some(printed));
}

#[test]
fn gc_rule_union_lists_versions_then_age() {
    let (_, body) = gc_preview(&["p", "i", "t", "--rule", "union", "--family-id", "cf3"]);
    assert_eq!(body["modifications"][0]["id"], "cf3");
    assert_eq!(
        body["modifications"][0]["create"]["gcRule"],
        json!({"union": {"rules": [{"maxNumVersions": 2}, {"maxAge": {"seconds": 432_000}}]}})
    );
}

#[test]
fn gc_rule_intersection_uses_supplied_limits() {
    let (progress, body) =
        gc_preview(&["p", "i", "t", "cf4", "intersection", "3", "30", "--", "surplus"]);
    assert!(progress.contains("with Intersection GC rule"));
    assert_eq!(
        body["modifications"][0]["create"]["gcRule"],
        json!({
            "intersection": {
                "rules": [{"maxAge": {"seconds": 2_592_000}}, {"maxNumVersions": 3}]
            }
        })
    );
}

#[test]
fn gc_rule_max_versions_only() {
    let (_, body) = gc_preview(&["p", "i", "t", "--rule=max_versions", "--max-versions=1"]);
    assert_eq!(body["modifications"][0]["create"]["gcRule"], json!({"maxNumVersions": 1}));
}

#[test]
fn gc_rule_kind_parses_known_names() {
    assert_eq!("MAX-AGE".parse::<GcRuleKind>(), Ok(GcRuleKind::MaxAge));
    assert_eq!("max_versions".parse::<GcRuleKind>(), Ok(GcRuleKind::MaxVersions));
    assert!("lru".parse::<GcRuleKind>().is_err());
}

#[test]
fn gc_rule_rejects_invalid_parameters() {
    let dispatcher = dispatcher();
    for (tokens, param) in [
        (vec!["p", "i", "t", "--rule", "lru"], "rule"),
        (vec!["p", "i", "t", "--max-versions", "0", "--rule", "max-versions"], "max_versions"),
        (vec!["p", "i", "t", "--max-age-days", "five"], "max_age_days"),
        (vec!["p", "i", "t", "--max-age-days", "999999999999999999"], "max_age_days"),
        (vec!["p", " ", "t"], "instance_id"),
    ] {
        let err = dispatcher.run_cli("bigtable-gc-rule", &strings(&tokens)).unwrap_err();
        match err {
            HarnessError::Invocation {
                source: SampleError::InvalidParameter {
                    name,
                    ..
                },
                ..
            } => assert_eq!(name, param),
            other => panic!("unexpected error for {tokens:?}: {other}"),
        }
    }
}

#[test]
fn gc_rule_requires_table_coordinates() {
    let err = dispatcher().run("bigtable-gc-rule", &strings(&["p", "i"])).unwrap_err();
    assert_eq!(err.to_string(), "missing required parameter: table_id");
}
