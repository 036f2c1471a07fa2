// crates/sample-harness-core/src/runtime/resolver.rs
// ============================================================================
// Module: Parameter Resolver
// Description: Binds positional values and flags to declared parameters.
// Purpose: Produce a complete InvocationRequest or name the missing input.
// Dependencies: crate::core, crate::runtime::error
// ============================================================================

//! ## Overview
//! Resolution is deterministic and side-effect free.
//!
//! With `n` positional values and `k` required parameters, every required
//! parameter is a slot and the first `n - k` defaulted parameters (in
//! declaration order) are also slots. Positional values fill slots left to
//! right. Flags then override the binding for the parameter they name, and
//! defaults fill whatever is left.
//!
//! Surplus positional values and flags that match no declaration are ignored
//! and reported through [`Resolution`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::InvocationRequest;
use crate::core::ParameterDecl;
use crate::core::ParameterSpec;
use crate::core::normalize_parameter_name;
use crate::runtime::error::HarnessError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Resolved request plus the inputs that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Complete request in declaration order.
    pub request: InvocationRequest,
    /// Positional values beyond the last slot.
    pub ignored_positional: Vec<String>,
    /// Flag names (normalized) with no matching declaration.
    pub ignored_flags: Vec<String>,
}

impl Resolution {
    /// Returns the number of ignored positional values and flags.
    #[must_use]
    pub const fn ignored_count(&self) -> usize {
        self.ignored_positional.len() + self.ignored_flags.len()
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves arguments against `spec`.
///
/// # Errors
///
/// Returns [`HarnessError::MissingParameter`] naming the first required
/// parameter that received no value.
pub fn resolve(
    spec: &ParameterSpec,
    args: &[String],
    flags: &BTreeMap<String, String>,
) -> Result<InvocationRequest, HarnessError> {
    resolve_detailed(spec, args, flags).map(|resolution| resolution.request)
}

/// Resolves arguments against `spec`, reporting ignored inputs.
///
/// # Errors
///
/// Returns [`HarnessError::MissingParameter`] naming the first required
/// parameter that received no value.
pub fn resolve_detailed(
    spec: &ParameterSpec,
    args: &[String],
    flags: &BTreeMap<String, String>,
) -> Result<Resolution, HarnessError> {
    let flags: BTreeMap<String, &str> = flags
        .iter()
        .map(|(name, value)| (normalize_parameter_name(name), value.as_str()))
        .collect();
    let key = |decl: &ParameterDecl| normalize_parameter_name(decl.name());

    let mut optional_slots = args.len().saturating_sub(spec.required_count());
    let mut positional = args.iter();
    let mut bound: BTreeMap<String, &str> = BTreeMap::new();
    for decl in spec.params() {
        if !decl.is_required() {
            if optional_slots == 0 {
                continue;
            }
            optional_slots -= 1;
        }
        let Some(value) = positional.next() else {
            break;
        };
        bound.insert(key(decl), value.as_str());
    }
    let ignored_positional: Vec<String> = positional.cloned().collect();

    let mut values = Vec::with_capacity(spec.len());
    for decl in spec.params() {
        let name = key(decl);
        let value = flags
            .get(&name)
            .or_else(|| bound.get(&name))
            .copied()
            .or_else(|| decl.default_value());
        let Some(value) = value else {
            return Err(HarnessError::MissingParameter {
                name: decl.name().to_string(),
            });
        };
        values.push((decl.name().to_string(), value.to_string()));
    }

    let ignored_flags: Vec<String> =
        flags.keys().filter(|name| spec.get(name).is_none()).cloned().collect();

    Ok(Resolution {
        request: InvocationRequest::from_pairs(values),
        ignored_positional,
        ignored_flags,
    })
}
