use serde::{Deserialize, Serialize};

use cap_codebook::OverallPolicy;

/// One use-case entry as produced by the generation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseEntry {
    pub label: String,
    pub text: String,
}

/// Reasonable / unreasonable use-case lists. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCases {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasonable: Option<Vec<UseCaseEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unreasonable: Option<Vec<UseCaseEntry>>,
}

/// Raw generation output, as received from the upstream AI step.
///
/// Every field is optional: a missing field yields an absent subsection
/// during formatting, never a parse failure. The one strict field is
/// `overallPolicy`: when present it must use the recognized vocabulary
/// (unknown spellings are a construction error, see `cap-codebook`).
///
/// Wire names are the product's camelCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_policy: Option<OverallPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_policy_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cases: Option<UseCases>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_policies_for_assignments: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethical_guidelines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_guidelines: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generative_ai_tool_declarations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_generative_ai_tools_declarations: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_policy_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus_wide_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_wide_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_integrity_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_policies: Option<String>,
}

/// Presence rule for free-text fields: defined and non-empty.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Presence rule for list fields: defined and non-empty.
pub(crate) fn present_list<T>(field: &Option<Vec<T>>) -> Option<&[T]> {
    field.as_deref().filter(|v| !v.is_empty())
}
