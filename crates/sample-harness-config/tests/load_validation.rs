//! Config load validation tests for sample-harness-config.
// crates/sample-harness-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, lists).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::collections::BTreeSet;
use std::env;
use std::io::Write;
use std::path::Path;

use sample_harness_config::CONFIG_ENV_VAR;
use sample_harness_config::ConfigError;
use sample_harness_config::HarnessConfig;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<HarnessConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(content: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(HarnessConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(HarnessConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_malformed_toml() -> TestResult {
    let file = write_config("[logging\nenabled = true")?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn load_rejects_missing_explicit_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(HarnessConfig::load(Some(&path)), "config io error")?;
    Ok(())
}

#[test]
fn load_without_default_file_yields_defaults() -> TestResult {
    if env::var(CONFIG_ENV_VAR).is_ok() {
        return Ok(());
    }
    let config = HarnessConfig::load(None).map_err(|err| err.to_string())?;
    if config != HarnessConfig::default() {
        return Err("expected default config".to_string());
    }
    Ok(())
}

#[test]
fn load_reads_logging_and_access_lists() -> TestResult {
    let file = write_config(
        "[logging]\nenabled = true\npath = \"harness.log\"\n\n[samples]\nallowlist = [\"greet\", \
         \"echo-params\"]\ndenylist = [\"echo-params\"]\n",
    )?;
    let config = HarnessConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if !config.logging.enabled || config.logging.path.as_deref() != Some("harness.log") {
        return Err("logging section not parsed".to_string());
    }
    if config.source.as_deref() != Some(file.path()) {
        return Err("source path not recorded".to_string());
    }
    let policy = config.access_policy();
    let expected_allow: BTreeSet<String> =
        ["greet", "echo-params"].into_iter().map(str::to_string).collect();
    if policy.allowlist.as_ref() != Some(&expected_allow) {
        return Err("allowlist not mapped".to_string());
    }
    if policy.is_allowed("echo-params") || !policy.is_allowed("greet") {
        return Err("denylist must override allowlist".to_string());
    }
    Ok(())
}

#[test]
fn parse_rejects_empty_log_path() -> TestResult {
    assert_invalid(
        HarnessConfig::parse("[logging]\nenabled = true\npath = \"  \"\n"),
        "logging.path must be non-empty",
    )
}

#[test]
fn parse_rejects_duplicate_denylist_entries() -> TestResult {
    assert_invalid(
        HarnessConfig::parse("[samples]\ndenylist = [\"greet\", \"greet\"]\n"),
        "samples.denylist contains duplicate entry greet",
    )
}

#[test]
fn parse_rejects_whitespace_in_allowlist() -> TestResult {
    assert_invalid(
        HarnessConfig::parse("[samples]\nallowlist = [\"two words\"]\n"),
        "samples.allowlist entries must be non-empty tokens",
    )
}

#[test]
fn empty_document_is_valid() -> TestResult {
    let config = HarnessConfig::parse("").map_err(|err| err.to_string())?;
    if config.logging.enabled || config.samples.allowlist.is_some() {
        return Err("empty document must yield defaults".to_string());
    }
    Ok(())
}
