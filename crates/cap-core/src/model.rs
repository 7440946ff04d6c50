use serde::{Deserialize, Serialize};

use cap_codebook::OverallPolicy;

/// A stable identifier for a tree node.
pub type NodeId = String;

/// Opaque rich content (an HTML fragment owned by the editing widget).
///
/// The engine never inspects rich text; it only replaces values wholesale.
pub type RichText = String;

/// Which side of a split "Use Cases" body an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCaseSide {
    Reasonable,
    Unreasonable,
}

/// A subsection body.
///
/// Almost every subsection holds a single block. The "Use Cases" subsection
/// holds an ordered pair (reasonable, unreasonable), each side independently
/// editable. On the wire a single body is a string and a split body is a
/// two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Single(RichText),
    Split(RichText, RichText),
}

impl Body {
    pub fn side(&self, side: UseCaseSide) -> Option<&RichText> {
        match (self, side) {
            (Body::Split(reasonable, _), UseCaseSide::Reasonable) => Some(reasonable),
            (Body::Split(_, unreasonable), UseCaseSide::Unreasonable) => Some(unreasonable),
            (Body::Single(_), _) => None,
        }
    }

    /// Replace one side of a split body. No-op for a single body.
    pub fn set_side(&mut self, side: UseCaseSide, value: RichText) {
        if let Body::Split(reasonable, unreasonable) = self {
            match side {
                UseCaseSide::Reasonable => *reasonable = value,
                UseCaseSide::Unreasonable => *unreasonable = value,
            }
        }
    }
}

/// Structured facts surfaced in UI chrome next to a subsection.
///
/// Decoration only; mutation logic never branches on this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsectionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_policy: Option<OverallPolicy>,
}

/// Second-level titled node. Titles are display text, not identifiers;
/// duplicates are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    pub id: NodeId,
    pub title: String,
    pub body: Body,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SubsectionMeta>,
}

/// Top-level titled node owning an ordered subsection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: NodeId,
    pub title: String,
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn subsection_index(&self, id: &str) -> Option<usize> {
        self.subsections.iter().position(|s| s.id == id)
    }
}

/// A course policy document as an ordered two-level tree.
///
/// Index order is the sole ordering signal at both levels; there is no
/// separate rank field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Document identifier, supplied by the caller (not minted here).
    pub id: NodeId,
    pub heading: RichText,
    /// Opaque store-supplied stamps; empty until first persisted.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub sections: Vec<Section>,
}

impl Policy {
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Check the structural invariants that must hold after every mutation:
    ///
    /// - every section and subsection id is unique within the document
    /// - no node id is empty
    /// - every section retains at least one subsection
    ///
    /// A violation here is an engine bug, not a user error. Mutation paths
    /// assert this in debug/test builds.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen: Vec<&str> = Vec::new();
        for section in &self.sections {
            if section.id.is_empty() {
                return Err(format!("section '{}' has an empty id", section.title));
            }
            if seen.contains(&section.id.as_str()) {
                return Err(format!("duplicate node id '{}'", section.id));
            }
            seen.push(&section.id);

            if section.subsections.is_empty() {
                return Err(format!(
                    "section '{}' ({}) retained with zero subsections",
                    section.title, section.id
                ));
            }

            for sub in &section.subsections {
                if sub.id.is_empty() {
                    return Err(format!("subsection '{}' has an empty id", sub.title));
                }
                if seen.contains(&sub.id.as_str()) {
                    return Err(format!("duplicate node id '{}'", sub.id));
                }
                seen.push(&sub.id);
            }
        }
        Ok(())
    }
}
