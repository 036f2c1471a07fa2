// crates/sample-harness-config/src/lib.rs
// ============================================================================
// Module: Sample Harness Config Library
// Description: Canonical config model and validation for the harness.
// Purpose: Single source of truth for sample-harness.toml semantics.
// Dependencies: sample-harness-core, serde, toml
// ============================================================================

//! ## Overview
//! `sample-harness-config` defines the configuration model for the sample
//! harness CLI: invocation logging and the sample access policy. Loading is
//! strict and fails closed on oversized, non-UTF-8, or malformed input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
