use serde::{Deserialize, Serialize};

use cap_core::model::{Body, NodeId, UseCaseSide};

/// A batch of edit operations against one policy document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditScriptV1 {
    pub v: u8,
    pub ops: Vec<EditOpV1>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOpType {
    AddSection,
    DeleteSection,
    DeleteSubsection,
    MoveSection,
    MoveSubsection,
    EditHeading,
    EditSectionTitle,
    EditSubsectionTitle,
    EditSubsectionBody,
    EditUseCaseText,
}

/// Edit operation in v1 wire format.
///
/// Field requirements per op type are enforced by `validate::validate_script`;
/// identifier *resolution* is deliberately not validated: an op addressing a
/// node that no longer exists applies as a no-op (stale ids race deletions in
/// normal UI usage and must stay safe).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditOpV1 {
    pub op: EditOpType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<NodeId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection_id: Option<NodeId>,

    /// Move source node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NodeId>,

    /// Move drop-target node id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NodeId>,

    /// Section position scoping a subsection move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_index: Option<usize>,

    /// Which side of a split body a use-case text edit targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<UseCaseSide>,

    /// Replacement text for heading / title / use-case edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Replacement body for a wholesale subsection body edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

impl EditOpV1 {
    /// A bare op of the given type with no operands filled in.
    pub fn new(op: EditOpType) -> Self {
        Self {
            op,
            section_id: None,
            subsection_id: None,
            from: None,
            to: None,
            section_index: None,
            side: None,
            value: None,
            body: None,
        }
    }
}
