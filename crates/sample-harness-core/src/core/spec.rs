// crates/sample-harness-core/src/core/spec.rs
// ============================================================================
// Module: Sample Parameter Specs
// Description: Ordered parameter declarations for samples.
// Purpose: Describe positional binding order, defaults, and required inputs.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A [`ParameterSpec`] is the ordered list of parameters a sample accepts.
//! Each entry is either required or carries a textual default. The order of
//! declaration drives positional binding in the resolver.
//!
//! Parameter names are compared after [`normalize_parameter_name`], so
//! `project-id` and `project_id` denote the same parameter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building a [`ParameterSpec`].
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Two declarations share the same normalized name.
    #[error("duplicate parameter: {0}")]
    DuplicateParameter(String),
    /// A declaration has an empty or whitespace-only name.
    #[error("parameter names must be non-empty")]
    EmptyName,
}

// ============================================================================
// SECTION: Declarations
// ============================================================================

/// Default behavior for a declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterDefault {
    /// The caller must supply a value.
    Required,
    /// Value used when the caller supplies nothing.
    Value(String),
}

/// A single named parameter within a [`ParameterSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    /// Declared parameter name.
    name: String,
    /// Default behavior when no value is supplied.
    default: ParameterDefault,
}

impl ParameterDecl {
    /// Declares a required parameter.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: ParameterDefault::Required,
        }
    }

    /// Declares a parameter with a textual default.
    #[must_use]
    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: ParameterDefault::Value(default.into()),
        }
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the default behavior.
    #[must_use]
    pub const fn default(&self) -> &ParameterDefault {
        &self.default
    }

    /// Returns true when the parameter has no default.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.default, ParameterDefault::Required)
    }

    /// Returns the default value, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        match &self.default {
            ParameterDefault::Required => None,
            ParameterDefault::Value(value) => Some(value),
        }
    }
}

// ============================================================================
// SECTION: Parameter Spec
// ============================================================================

/// Ordered parameter list declared by a sample.
///
/// # Invariants
/// - Normalized names are unique.
/// - Names are non-empty.
/// - Order matches positional binding order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterSpec {
    /// Declarations in binding order.
    params: Vec<ParameterDecl>,
}

impl ParameterSpec {
    /// Returns a spec with no parameters.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            params: Vec::new(),
        }
    }

    /// Starts a builder for a new spec.
    #[must_use]
    pub const fn builder() -> ParameterSpecBuilder {
        ParameterSpecBuilder {
            params: Vec::new(),
        }
    }

    /// Creates a spec from declarations, validating name uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when a name is empty or duplicated.
    pub fn new(params: Vec<ParameterDecl>) -> Result<Self, SpecError> {
        let mut seen = BTreeSet::new();
        for decl in &params {
            if decl.name.trim().is_empty() {
                return Err(SpecError::EmptyName);
            }
            if !seen.insert(normalize_parameter_name(&decl.name)) {
                return Err(SpecError::DuplicateParameter(decl.name.clone()));
            }
        }
        Ok(Self {
            params,
        })
    }

    /// Returns the declarations in binding order.
    #[must_use]
    pub fn params(&self) -> &[ParameterDecl] {
        &self.params
    }

    /// Returns the number of declared parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true when no parameters are declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Looks up a declaration by name (normalized comparison).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterDecl> {
        let wanted = normalize_parameter_name(name);
        self.params.iter().find(|decl| normalize_parameter_name(&decl.name) == wanted)
    }

    /// Returns the number of required parameters.
    #[must_use]
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|decl| decl.is_required()).count()
    }
}

/// Incremental builder for [`ParameterSpec`].
#[derive(Debug, Clone, Default)]
pub struct ParameterSpecBuilder {
    /// Declarations collected so far.
    params: Vec<ParameterDecl>,
}

impl ParameterSpecBuilder {
    /// Appends a required parameter.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParameterDecl::required(name));
        self
    }

    /// Appends a parameter with a default value.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.params.push(ParameterDecl::optional(name, default));
        self
    }

    /// Validates and returns the spec.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when a name is empty or duplicated.
    pub fn build(self) -> Result<ParameterSpec, SpecError> {
        ParameterSpec::new(self.params)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Normalizes a parameter or flag name for comparison (`-` becomes `_`).
#[must_use]
pub fn normalize_parameter_name(name: &str) -> String {
    name.trim().replace('-', "_")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
