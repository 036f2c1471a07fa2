// crates/sample-harness-core/src/runtime/registry.rs
// ============================================================================
// Module: Sample Registry
// Description: Registry of runnable samples keyed by sample identifier.
// Purpose: Resolve sample identifiers with allowlist and denylist checks.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! The registry owns every runnable sample and answers lookups by
//! identifier. An access policy hides samples from lookup and listing; a
//! denied sample behaves exactly like an unregistered one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::InvocationRequest;
use crate::core::ParameterSpec;
use crate::core::SampleId;
use crate::interfaces::Sample;
use crate::interfaces::SampleResult;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A sample is already registered under the identifier.
    #[error("sample already registered: {0}")]
    DuplicateSample(String),
    /// The identifier is empty or contains whitespace.
    #[error("invalid sample id: '{0}'")]
    InvalidSampleId(String),
}

// ============================================================================
// SECTION: Access Policy
// ============================================================================

/// Access policy controlling which samples may be listed and run.
///
/// # Invariants
/// - `denylist` overrides `allowlist` when both are present.
/// - If `allowlist` is `None`, all samples are allowed unless denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleAccessPolicy {
    /// Optional allowlist of sample identifiers.
    pub allowlist: Option<BTreeSet<String>>,
    /// Explicit denylist of sample identifiers.
    pub denylist: BTreeSet<String>,
}

impl SampleAccessPolicy {
    /// Returns a policy that permits all samples.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            allowlist: None,
            denylist: BTreeSet::new(),
        }
    }

    /// Returns true when the sample is allowed by policy.
    #[must_use]
    pub fn is_allowed(&self, sample_id: &str) -> bool {
        if self.denylist.contains(sample_id) {
            return false;
        }
        if let Some(allowlist) = &self.allowlist {
            return allowlist.contains(sample_id);
        }
        true
    }
}

impl Default for SampleAccessPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}

// ============================================================================
// SECTION: Closure Samples
// ============================================================================

/// Sample backed by a closure.
pub struct FnSample<F> {
    /// One-line description.
    description: String,
    /// Declared parameters.
    spec: ParameterSpec,
    /// Sample body.
    handler: F,
}

impl<F> FnSample<F>
where
    F: Fn(&InvocationRequest) -> SampleResult + Send + Sync,
{
    /// Wraps `handler` as a sample with the given spec.
    #[must_use]
    pub fn new(description: impl Into<String>, spec: ParameterSpec, handler: F) -> Self {
        Self {
            description: description.into(),
            spec,
            handler,
        }
    }
}

impl<F> Sample for FnSample<F>
where
    F: Fn(&InvocationRequest) -> SampleResult + Send + Sync,
{
    fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn invoke(&self, request: &InvocationRequest) -> SampleResult {
        (self.handler)(request)
    }
}

// ============================================================================
// SECTION: Sample Registry
// ============================================================================

/// Sample registry with policy enforcement.
///
/// # Invariants
/// - Sample identifiers are unique within the registry.
/// - Access policy is enforced on every lookup and listing.
pub struct SampleRegistry {
    /// Sample implementations keyed by identifier.
    samples: BTreeMap<SampleId, Box<dyn Sample>>,
    /// Access control policy for sample usage.
    policy: SampleAccessPolicy,
}

impl SampleRegistry {
    /// Creates an empty registry with the provided policy.
    #[must_use]
    pub const fn new(policy: SampleAccessPolicy) -> Self {
        Self {
            samples: BTreeMap::new(),
            policy,
        }
    }

    /// Registers a sample under the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the identifier is invalid or already
    /// registered.
    pub fn register(
        &mut self,
        sample_id: impl Into<SampleId>,
        sample: impl Sample + 'static,
    ) -> Result<(), RegistryError> {
        let sample_id = sample_id.into();
        let raw = sample_id.as_str();
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(RegistryError::InvalidSampleId(raw.to_string()));
        }
        if self.samples.contains_key(raw) {
            return Err(RegistryError::DuplicateSample(raw.to_string()));
        }
        self.samples.insert(sample_id, Box::new(sample));
        Ok(())
    }

    /// Registers a closure-backed sample.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the identifier is invalid or already
    /// registered.
    pub fn register_fn<F>(
        &mut self,
        sample_id: impl Into<SampleId>,
        description: impl Into<String>,
        spec: ParameterSpec,
        handler: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&InvocationRequest) -> SampleResult + Send + Sync + 'static,
    {
        self.register(sample_id, FnSample::new(description, spec, handler))
    }

    /// Returns the sample registered under `sample_id` when policy allows it.
    #[must_use]
    pub fn get(&self, sample_id: &str) -> Option<&dyn Sample> {
        if !self.policy.is_allowed(sample_id) {
            return None;
        }
        self.samples.get(sample_id).map(Box::as_ref)
    }

    /// Iterates over allowed samples in identifier order.
    pub fn entries(&self) -> impl Iterator<Item = (&SampleId, &dyn Sample)> {
        self.samples
            .iter()
            .filter(|(sample_id, _)| self.policy.is_allowed(sample_id.as_str()))
            .map(|(sample_id, sample)| (sample_id, sample.as_ref()))
    }

    /// Returns allowed sample identifiers in order.
    #[must_use]
    pub fn ids(&self) -> Vec<&SampleId> {
        self.entries().map(|(sample_id, _)| sample_id).collect()
    }

    /// Returns the number of allowed samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// Returns true when no allowed samples are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured policy.
    #[must_use]
    pub const fn policy(&self) -> &SampleAccessPolicy {
        &self.policy
    }

    /// Replaces the access policy.
    pub fn set_policy(&mut self, policy: SampleAccessPolicy) {
        self.policy = policy;
    }
}

impl Default for SampleRegistry {
    fn default() -> Self {
        Self::new(SampleAccessPolicy::allow_all())
    }
}
