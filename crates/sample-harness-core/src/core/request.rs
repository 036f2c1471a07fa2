// crates/sample-harness-core/src/core/request.rs
// ============================================================================
// Module: Invocation Requests
// Description: Resolved parameter values handed to a sample.
// Purpose: Give samples a stringly-typed view with explicit parse helpers.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! An [`InvocationRequest`] is the result of overlaying supplied arguments
//! onto a [`crate::ParameterSpec`]. Values stay textual; samples parse them
//! with [`InvocationRequest::parse`] when they need numbers or flags.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;
use std::str::FromStr;

use crate::core::spec::normalize_parameter_name;
use crate::interfaces::SampleError;

// ============================================================================
// SECTION: Invocation Request
// ============================================================================

/// Resolved parameter values for one sample invocation.
///
/// # Invariants
/// - Entries follow the declaration order of the originating spec.
/// - Every required parameter of that spec has an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationRequest {
    /// Name/value pairs in declaration order.
    values: Vec<(String, String)>,
}

impl InvocationRequest {
    /// Builds a request from name/value pairs, keeping their order.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(name, value)| (name.into(), value.into())).collect(),
        }
    }

    /// Returns the value for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let wanted = normalize_parameter_name(name);
        self.values
            .iter()
            .find(|(key, _)| normalize_parameter_name(key) == wanted)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value for `name` or a [`SampleError::MissingValue`].
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::MissingValue`] when the parameter is absent.
    pub fn require(&self, name: &str) -> Result<&str, SampleError> {
        self.get(name).ok_or_else(|| SampleError::MissingValue {
            name: name.to_string(),
        })
    }

    /// Parses the value for `name` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::MissingValue`] when absent and
    /// [`SampleError::InvalidParameter`] when parsing fails.
    pub fn parse<T>(&self, name: &str) -> Result<T, SampleError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.require(name)?;
        value.trim().parse::<T>().map_err(|err| SampleError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            reason: err.to_string(),
        })
    }

    /// Iterates over name/value pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of resolved parameters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no parameters were resolved.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
