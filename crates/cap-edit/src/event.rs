use serde::{Deserialize, Serialize};

use cap_core::model::NodeId;

/// What an edit actually did.
///
/// The engine is a pure data transform; transient UI feedback (toasts,
/// transition animation) belongs to an outer presentation layer that observes
/// these values. `Noop` is a first-class outcome: stale identifiers, cancelled
/// drags, and self-drops all land here instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditEvent {
    SectionAdded {
        section_id: NodeId,
    },
    SectionDeleted {
        section_id: NodeId,
    },
    SubsectionDeleted {
        section_id: NodeId,
        subsection_id: NodeId,
        /// True when removing the last subsection deleted the whole section.
        cascaded: bool,
    },
    SectionMoved {
        section_id: NodeId,
        to_index: usize,
    },
    SubsectionMoved {
        section_id: NodeId,
        subsection_id: NodeId,
        to_index: usize,
    },
    HeadingEdited,
    TitleEdited {
        node_id: NodeId,
    },
    BodyEdited {
        section_id: NodeId,
        subsection_id: NodeId,
    },
    Noop,
}

impl EditEvent {
    /// Whether the edit changed the document.
    pub fn changed(&self) -> bool {
        !matches!(self, EditEvent::Noop)
    }
}
