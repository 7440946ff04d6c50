//! CAP overall-policy classification semantics.
//!
//! The generation result carries a closed categorical value describing the
//! course's overall stance on generative AI. Everything keyed on that value
//! (badge colors, blurbs, the policy-links gate) goes through the exhaustive
//! mappings here, so an unrecognized spelling is a construction error rather
//! than a silent missing lookup.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Overall generative AI stance for a course.
///
/// Wire spellings are fixed product vocabulary; see [`OverallPolicy::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OverallPolicy {
    StrictlyProhibited,
    AllowedUnderConditions,
    NoRestrictions,
}

/// All recognized values, in display order.
pub const ALL: [OverallPolicy; 3] = [
    OverallPolicy::StrictlyProhibited,
    OverallPolicy::AllowedUnderConditions,
    OverallPolicy::NoRestrictions,
];

impl OverallPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            OverallPolicy::StrictlyProhibited => "Strictly prohibited",
            OverallPolicy::AllowedUnderConditions => "Allowed under conditions",
            OverallPolicy::NoRestrictions => "No restrictions",
        }
    }

    /// Badge background class shown next to the AI-policy introduction.
    pub const fn badge_color(self) -> &'static str {
        match self {
            OverallPolicy::StrictlyProhibited => "bg-red-400",
            OverallPolicy::AllowedUnderConditions => "bg-amber-300",
            OverallPolicy::NoRestrictions => "bg-green-200",
        }
    }

    /// Whether the course places any restriction on generative AI use.
    ///
    /// Gates the "Policy Links" subsection during normalization.
    pub const fn restricted(self) -> bool {
        !matches!(self, OverallPolicy::NoRestrictions)
    }
}

impl fmt::Display for OverallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Error for a categorical value outside the recognized vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicyError(pub String);

impl fmt::Display for UnknownPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized overall policy '{}' (expected one of: Strictly prohibited, Allowed under conditions, No restrictions)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPolicyError {}

impl FromStr for OverallPolicy {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPolicyError(s.to_string()))
    }
}

impl TryFrom<String> for OverallPolicy {
    type Error = UnknownPolicyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OverallPolicy> for String {
    fn from(p: OverallPolicy) -> Self {
        p.as_str().to_string()
    }
}

pub fn description(policy: OverallPolicy) -> &'static str {
    match policy {
        OverallPolicy::StrictlyProhibited => "Generative AI tools may not be used in this course",
        OverallPolicy::AllowedUnderConditions => {
            "Generative AI tools may be used under the stated conditions"
        }
        OverallPolicy::NoRestrictions => "No course-level restrictions on generative AI tools",
    }
}
