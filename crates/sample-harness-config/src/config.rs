// crates/sample-harness-config/src/config.rs
// ============================================================================
// Module: Sample Harness Configuration
// Description: Configuration loading and validation for the sample harness.
// Purpose: Provide strict config parsing with hard limits.
// Dependencies: sample-harness-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path is taken from the caller, then `SAMPLE_HARNESS_CONFIG`, then
//! `sample-harness.toml` in the working directory. Only the default file may
//! be absent; an explicitly named file that does not exist is an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use sample_harness_core::SampleAccessPolicy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "sample-harness.toml";
/// Environment variable naming the configuration path.
pub const CONFIG_ENV_VAR: &str = "SAMPLE_HARNESS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a sample identifier in access lists.
pub(crate) const MAX_SAMPLE_ID_LENGTH: usize = 128;
/// Maximum number of entries in each access list.
pub(crate) const MAX_ACCESS_LIST_ENTRIES: usize = 1024;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Sample harness configuration.
///
/// # Invariants
/// - `validate` has succeeded for every value returned by [`HarnessConfig::load`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Invocation log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Sample access policy.
    #[serde(default)]
    pub samples: SampleAccessConfig,
    /// Path the configuration was read from (not serialized).
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Invocation log settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit one JSON line per invocation.
    #[serde(default)]
    pub enabled: bool,
    /// Append records to this file instead of stderr.
    #[serde(default)]
    pub path: Option<String>,
}

/// Sample allowlist and denylist.
///
/// # Invariants
/// - `denylist` overrides `allowlist`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SampleAccessConfig {
    /// Samples that may run; all samples when absent.
    #[serde(default)]
    pub allowlist: Option<Vec<String>>,
    /// Samples that may never run.
    #[serde(default)]
    pub denylist: Vec<String>,
}

impl HarnessConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if !explicit && err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };
        let mut config = Self::parse_bytes(&bytes)?;
        config.source = Some(resolved);
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::parse_bytes(content.as_bytes())
    }

    /// Applies size, encoding, parse, and validation checks to raw bytes.
    fn parse_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.validate()?;
        self.samples.validate()
    }

    /// Returns the sample access policy described by this configuration.
    #[must_use]
    pub fn access_policy(&self) -> SampleAccessPolicy {
        self.samples.access_policy()
    }
}

impl LoggingConfig {
    /// Validates logging settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the log path is empty or too long.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("logging.path", path)?;
        }
        Ok(())
    }
}

impl SampleAccessConfig {
    /// Validates access list entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an entry is malformed or repeated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(allowlist) = &self.allowlist {
            validate_access_list("samples.allowlist", allowlist)?;
        }
        validate_access_list("samples.denylist", &self.denylist)
    }

    /// Converts the lists into a runtime policy.
    #[must_use]
    pub fn access_policy(&self) -> SampleAccessPolicy {
        SampleAccessPolicy {
            allowlist: self.allowlist.as_ref().map(|ids| ids.iter().cloned().collect()),
            denylist: self.denylist.iter().cloned().collect(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path and whether it was named explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates sample identifiers in an access list.
fn validate_access_list(field: &str, ids: &[String]) -> Result<(), ConfigError> {
    if ids.len() > MAX_ACCESS_LIST_ENTRIES {
        return Err(ConfigError::Invalid(format!("{field} has too many entries")));
    }
    let mut seen = BTreeSet::new();
    for id in ids {
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!("{field} entries must be non-empty tokens")));
        }
        if id.len() > MAX_SAMPLE_ID_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} entry exceeds max length")));
        }
        if !seen.insert(id.as_str()) {
            return Err(ConfigError::Invalid(format!("{field} contains duplicate entry {id}")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use super::*;

    #[test]
    fn validate_path_string_rejects_whitespace_only() {
        let err = validate_path_string("logging.path", "   ").unwrap_err();
        assert!(err.to_string().contains("logging.path must be non-empty"));
    }

    #[test]
    fn validate_path_string_rejects_component_too_long() {
        let value = format!("logs/{}", "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1));
        let err = validate_path_string("logging.path", &value).unwrap_err();
        assert!(err.to_string().contains("path component too long"));
    }

    #[test]
    fn validate_access_list_accepts_max_length_id() {
        let ids = vec!["a".repeat(MAX_SAMPLE_ID_LENGTH)];
        validate_access_list("samples.denylist", &ids).expect("valid list");
    }

    #[test]
    fn validate_access_list_rejects_long_id() {
        let ids = vec!["a".repeat(MAX_SAMPLE_ID_LENGTH + 1)];
        let err = validate_access_list("samples.denylist", &ids).unwrap_err();
        assert!(err.to_string().contains("entry exceeds max length"));
    }
}
