// crates/sample-harness-samples/src/bigtable_gc.rs
// ============================================================================
// Module: Bigtable GC Rule Sample
// Description: Builds a Bigtable column-family GC rule modification request.
// Purpose: Preview the Admin API request without contacting Bigtable.
// Dependencies: sample-harness-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The sample assembles a `modifyColumnFamilies` request that creates one
//! column family with a garbage-collection rule, then prints it in the
//! Bigtable Admin JSON shape. The request is also returned as the sample's
//! value. No network call is made.
//!
//! Rule kinds:
//! - `max-age`: drop cells older than `max_age_days`.
//! - `max-versions`: keep at most `max_versions` cells per column.
//! - `union`: drop cells matching either rule.
//! - `intersection`: drop cells matching both rules.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use sample_harness_core::InvocationRequest;
use sample_harness_core::ParameterSpec;
use sample_harness_core::Sample;
use sample_harness_core::SampleError;
use sample_harness_core::SampleResult;
use sample_harness_core::SpecError;
use sample_harness_core::sample_println;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Registry identifier.
pub const SAMPLE_ID: &str = "bigtable-gc-rule";
/// Seconds in one day.
const SECONDS_PER_DAY: u64 = 3600 * 24;

// ============================================================================
// SECTION: Rule Model
// ============================================================================

/// GC rule shape selected by the `rule` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GcRuleKind {
    /// Age limit only.
    MaxAge,
    /// Version limit only.
    MaxVersions,
    /// Either limit triggers collection.
    Union,
    /// Both limits must hold for collection.
    Intersection,
}

impl GcRuleKind {
    /// Returns the parameter spelling of the rule kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxAge => "max-age",
            Self::MaxVersions => "max-versions",
            Self::Union => "union",
            Self::Intersection => "intersection",
        }
    }

    /// Returns the label used in progress messages.
    const fn label(self) -> &'static str {
        match self {
            Self::MaxAge => "MaxAge",
            Self::MaxVersions => "MaxVersions",
            Self::Union => "Union",
            Self::Intersection => "Intersection",
        }
    }
}

impl fmt::Display for GcRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GcRuleKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace('_', "-").as_str() {
            "max-age" => Ok(Self::MaxAge),
            "max-versions" => Ok(Self::MaxVersions),
            "union" => Ok(Self::Union),
            "intersection" => Ok(Self::Intersection),
            _ => Err("expected one of max-age, max-versions, union, intersection".to_string()),
        }
    }
}

/// Bigtable Admin GC rule in its JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
enum GcRule {
    /// Maximum cell age.
    MaxAge(Duration),
    /// Maximum number of versions per column.
    MaxNumVersions(u32),
    /// Collect when any nested rule matches.
    Union(RuleList),
    /// Collect when every nested rule matches.
    Intersection(RuleList),
}

/// Protobuf duration with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct Duration {
    /// Whole seconds.
    seconds: u64,
}

/// Nested rule list for union and intersection rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RuleList {
    /// Member rules.
    rules: Vec<GcRule>,
}

/// `modifyColumnFamilies` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ModifyColumnFamiliesRequest {
    /// Fully qualified table name.
    name: String,
    /// Column-family modifications.
    modifications: Vec<Modification>,
}

/// One column-family modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Modification {
    /// Column-family identifier.
    id: String,
    /// Family to create.
    create: ColumnFamily,
}

/// Column-family definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnFamily {
    /// Garbage-collection rule.
    gc_rule: GcRule,
}

// ============================================================================
// SECTION: Sample
// ============================================================================

/// Previews a column-family creation request with a GC rule.
pub struct BigtableGcRuleSample {
    /// Table coordinates, family, rule kind, and rule limits.
    spec: ParameterSpec,
}

impl BigtableGcRuleSample {
    /// Creates the sample.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the parameter spec is malformed.
    pub fn new() -> Result<Self, SpecError> {
        let spec = ParameterSpec::builder()
            .required("project_id")
            .required("instance_id")
            .required("table_id")
            .optional("family_id", "cf1")
            .optional("rule", GcRuleKind::MaxAge.as_str())
            .optional("max_versions", "2")
            .optional("max_age_days", "5")
            .build()?;
        Ok(Self {
            spec,
        })
    }
}

impl Sample for BigtableGcRuleSample {
    fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    fn description(&self) -> &str {
        "Previews a Bigtable column family creation with a GC rule."
    }

    fn invoke(&self, request: &InvocationRequest) -> SampleResult {
        let project_id = non_empty(request, "project_id")?;
        let instance_id = non_empty(request, "instance_id")?;
        let table_id = non_empty(request, "table_id")?;
        let family_id = non_empty(request, "family_id")?;
        let kind: GcRuleKind = request.parse("rule")?;
        let gc_rule = build_rule(kind, request)?;

        sample_println!(
            "Creating column family {family_id} with {} GC rule on table {table_id}...",
            kind.label()
        )?;
        let body = ModifyColumnFamiliesRequest {
            name: format!("projects/{project_id}/instances/{instance_id}/tables/{table_id}"),
            modifications: vec![Modification {
                id: family_id.to_string(),
                create: ColumnFamily {
                    gc_rule,
                },
            }],
        };
        let value = serde_json::to_value(&body).map_err(external)?;
        let json = serde_json::to_string(&body).map_err(external)?;
        sample_println!("{json}")?;
        Ok(Some(value))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Wraps a serialization failure as an external sample error.
fn external(err: serde_json::Error) -> SampleError {
    SampleError::External(Box::new(err))
}

/// Returns a trimmed, non-empty parameter value.
fn non_empty<'a>(request: &'a InvocationRequest, name: &str) -> Result<&'a str, SampleError> {
    let value = request.require(name)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SampleError::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            reason: "must be non-empty".to_string(),
        });
    }
    Ok(trimmed)
}

/// Parses a strictly positive integer parameter.
fn positive<T>(request: &InvocationRequest, name: &str) -> Result<T, SampleError>
where
    T: FromStr + PartialEq + Default,
    T::Err: fmt::Display,
{
    let value: T = request.parse(name)?;
    if value == T::default() {
        return Err(SampleError::InvalidParameter {
            name: name.to_string(),
            value: request.get(name).unwrap_or_default().to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

/// Builds the max-age rule from `max_age_days`.
fn max_age_rule(request: &InvocationRequest) -> Result<GcRule, SampleError> {
    let days: u64 = positive(request, "max_age_days")?;
    let seconds = days.checked_mul(SECONDS_PER_DAY).ok_or_else(|| SampleError::InvalidParameter {
        name: "max_age_days".to_string(),
        value: days.to_string(),
        reason: "duration overflows".to_string(),
    })?;
    Ok(GcRule::MaxAge(Duration {
        seconds,
    }))
}

/// Builds the max-versions rule from `max_versions`.
fn max_versions_rule(request: &InvocationRequest) -> Result<GcRule, SampleError> {
    Ok(GcRule::MaxNumVersions(positive(request, "max_versions")?))
}

/// Builds the rule selected by `kind`.
fn build_rule(kind: GcRuleKind, request: &InvocationRequest) -> Result<GcRule, SampleError> {
    Ok(match kind {
        GcRuleKind::MaxAge => max_age_rule(request)?,
        GcRuleKind::MaxVersions => max_versions_rule(request)?,
        GcRuleKind::Union => GcRule::Union(RuleList {
            rules: vec![max_versions_rule(request)?, max_age_rule(request)?],
        }),
        GcRuleKind::Intersection => GcRule::Intersection(RuleList {
            rules: vec![max_age_rule(request)?, max_versions_rule(request)?],
        }),
    })
}
