// crates/sample-harness-core/src/runtime/usage.rs
// ============================================================================
// Module: Usage Synopsis
// Description: One-line usage text derived from a parameter spec.
// Purpose: Show callers the positional order and defaults of a sample.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Required parameters render as `<name>` and defaulted ones as
//! `[name=default]`, in binding order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ParameterSpec;

// ============================================================================
// SECTION: Synopsis
// ============================================================================

/// Renders the usage line for `sample_id`.
#[must_use]
pub fn synopsis(sample_id: &str, spec: &ParameterSpec) -> String {
    let mut line = sample_id.to_string();
    for decl in spec.params() {
        line.push(' ');
        match decl.default_value() {
            None => {
                line.push('<');
                line.push_str(decl.name());
                line.push('>');
            }
            Some(default) => {
                line.push('[');
                line.push_str(decl.name());
                line.push('=');
                line.push_str(default);
                line.push(']');
            }
        }
    }
    line
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic_in_result_fn, reason = "Test-only assertions are permitted.")]

    use super::synopsis;
    use crate::core::ParameterSpec;

    #[test]
    fn synopsis_marks_required_and_defaulted_parameters() -> Result<(), crate::SpecError> {
        let spec =
            ParameterSpec::builder().required("project_id").optional("family_id", "cf1").build()?;
        assert_eq!(synopsis("gc", &spec), "gc <project_id> [family_id=cf1]");
        Ok(())
    }

    #[test]
    fn synopsis_of_empty_spec_is_the_id() {
        assert_eq!(synopsis("noop", &ParameterSpec::empty()), "noop");
    }
}
