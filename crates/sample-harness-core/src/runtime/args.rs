// crates/sample-harness-core/src/runtime/args.rs
// ============================================================================
// Module: CLI Argument Splitter
// Description: Splits raw sample tokens into positional values and flags.
// Purpose: Turn `--name value` style input into resolver inputs.
// Dependencies: crate::core, crate::runtime::error
// ============================================================================

//! ## Overview
//! Sample arguments arrive as raw tokens after the sample identifier. Tokens
//! of the form `--name value` or `--name=value` become flags; everything else
//! is positional. A bare `--` ends flag parsing. Flag names are normalized
//! with [`crate::normalize_parameter_name`], and a later flag replaces an
//! earlier one with the same normalized name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::normalize_parameter_name;
use crate::runtime::error::HarnessError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Positional values and flags split from raw CLI tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    /// Positional values in input order.
    pub positional: Vec<String>,
    /// Flag values keyed by normalized name.
    pub flags: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Splitter
// ============================================================================

/// Splits raw tokens into positional values and flags.
///
/// # Errors
///
/// Returns [`HarnessError::MissingParameter`] when a `--name` flag is the last
/// token and therefore has no value.
pub fn split_cli_args<I, S>(tokens: I) -> Result<CliArgs, HarnessError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut split = CliArgs::default();
    let mut tokens = tokens.into_iter().map(Into::into);
    while let Some(token) = tokens.next() {
        if token == "--" {
            split.positional.extend(tokens.by_ref());
            break;
        }
        let Some(flag) = token.strip_prefix("--") else {
            split.positional.push(token);
            continue;
        };
        if let Some((name, value)) = flag.split_once('=') {
            split.flags.insert(normalize_parameter_name(name), value.to_string());
            continue;
        }
        let name = normalize_parameter_name(flag);
        let Some(value) = tokens.next() else {
            return Err(HarnessError::MissingParameter {
                name,
            });
        };
        split.flags.insert(name, value);
    }
    Ok(split)
}
