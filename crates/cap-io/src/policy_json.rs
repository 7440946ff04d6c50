//! Helpers for parsing policy and generation JSON with improved diagnostics.
//!
//! Motivation: serde's default "missing field X" error is technically correct
//! but often unhelpful for users generating fixtures or integrating with the
//! engine. These helpers keep strict validation behavior unchanged while
//! providing actionable messages about required top-level fields.

use std::fmt;

use serde::de::Error as _;
use serde_json::Value;

use cap_core::model::Policy;
use cap_normalize::GenerationResult;

const REQUIRED_TOP_LEVEL_FIELDS: &[&str] = &["id", "heading", "sections"];

/// A structured error for parsing a Policy JSON payload.
#[derive(Debug)]
pub enum PolicyJsonError {
    /// The input was not valid JSON.
    InvalidJson(serde_json::Error),
    /// The input JSON was valid, but missing required top-level fields.
    MissingRequiredTopLevelFields {
        missing: Vec<&'static str>,
        required: Vec<&'static str>,
    },
    /// JSON was valid, but did not match the Policy schema/shape.
    InvalidPolicyShape(serde_json::Error),
    /// The tree parsed but violates a structural invariant (duplicate ids,
    /// an empty section).
    InvalidStructure(String),
}

impl fmt::Display for PolicyJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyJsonError::InvalidJson(e) => {
                write!(f, "Invalid JSON: {e}")
            }
            PolicyJsonError::MissingRequiredTopLevelFields { missing, required } => {
                write!(
                    f,
                    "Invalid Policy JSON: missing required top-level field(s): {}. Required top-level fields: {}.",
                    missing.join(", "),
                    required.join(", ")
                )
            }
            PolicyJsonError::InvalidPolicyShape(e) => {
                // Include a stable hint about required fields, but keep the
                // original serde message (often the most specific info).
                write!(
                    f,
                    "Invalid Policy JSON shape: {e}. Required top-level fields: {}.",
                    REQUIRED_TOP_LEVEL_FIELDS.join(", ")
                )
            }
            PolicyJsonError::InvalidStructure(msg) => {
                write!(f, "Invalid Policy structure: {msg}.")
            }
        }
    }
}

impl std::error::Error for PolicyJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PolicyJsonError::InvalidJson(e) => Some(e),
            PolicyJsonError::InvalidPolicyShape(e) => Some(e),
            PolicyJsonError::MissingRequiredTopLevelFields { .. } => None,
            PolicyJsonError::InvalidStructure(_) => None,
        }
    }
}

/// Parse a Policy JSON string with improved diagnostics for missing required
/// top-level fields, then check structural invariants.
pub fn parse_policy_json_str(s: &str) -> Result<Policy, PolicyJsonError> {
    let v: Value = serde_json::from_str(s).map_err(PolicyJsonError::InvalidJson)?;
    let obj = v.as_object().ok_or_else(|| {
        PolicyJsonError::InvalidPolicyShape(serde_json::Error::custom("expected a JSON object"))
    })?;

    let mut missing: Vec<&'static str> = Vec::new();
    for &k in REQUIRED_TOP_LEVEL_FIELDS {
        if !obj.contains_key(k) {
            missing.push(k);
        }
    }
    if !missing.is_empty() {
        return Err(PolicyJsonError::MissingRequiredTopLevelFields {
            missing,
            required: REQUIRED_TOP_LEVEL_FIELDS.to_vec(),
        });
    }

    let policy: Policy =
        serde_json::from_value(v).map_err(PolicyJsonError::InvalidPolicyShape)?;

    policy
        .check_invariants()
        .map_err(PolicyJsonError::InvalidStructure)?;

    Ok(policy)
}

/// A structured error for parsing a generation-result JSON payload.
///
/// Deliberately lenient: every content field is optional and a missing field
/// is not an error (it yields an absent subsection downstream). The two ways
/// to fail are malformed JSON and shape violations, which include an
/// `overallPolicy` value outside the recognized vocabulary.
#[derive(Debug)]
pub enum GenerationJsonError {
    InvalidJson(serde_json::Error),
    InvalidShape(serde_json::Error),
}

impl fmt::Display for GenerationJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationJsonError::InvalidJson(e) => write!(f, "Invalid JSON: {e}"),
            GenerationJsonError::InvalidShape(e) => {
                write!(f, "Invalid generation result shape: {e}")
            }
        }
    }
}

impl std::error::Error for GenerationJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationJsonError::InvalidJson(e) => Some(e),
            GenerationJsonError::InvalidShape(e) => Some(e),
        }
    }
}

/// Parse a generation result, best-effort.
pub fn parse_generation_json_str(s: &str) -> Result<GenerationResult, GenerationJsonError> {
    let v: Value = serde_json::from_str(s).map_err(GenerationJsonError::InvalidJson)?;
    serde_json::from_value(v).map_err(GenerationJsonError::InvalidShape)
}
