//! Reorder protocol: drag-completion events -> move operations.
//!
//! A completed drag carries the dragged node's id and the id of the node it
//! was dropped onto (absent when dropped outside any valid target). Each
//! completed drag emits at most one move, scoped to the nesting level the
//! drag started at; the drag surface never offers cross-level or cross-parent
//! targets, and ids that fail to resolve within the scoped sequence apply as
//! no-ops.

use serde::{Deserialize, Serialize};

use cap_core::model::{NodeId, Policy};

use crate::apply::{Applied, move_section, move_subsection};
use crate::event::EditEvent;
use crate::schema::{EditOpType, EditOpV1};

/// Outcome of a drag gesture, as reported by the drag surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub active_id: NodeId,
    /// Absent when the drag was cancelled (dropped outside any target).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over_id: Option<NodeId>,
}

/// The nesting level a drag was initiated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderScope {
    /// Top-level drag: reorders sections.
    Sections,
    /// Drag within one section's subsection list.
    Subsections { section_index: usize },
}

/// Translate a drag completion into a move op.
///
/// Returns `None` for a cancelled drag or a self-drop: no mutation at all,
/// not even a no-op application.
pub fn drag_end_to_op(scope: ReorderScope, drag: &DragEnd) -> Option<EditOpV1> {
    let over_id = drag.over_id.as_ref()?;
    if *over_id == drag.active_id {
        return None;
    }

    let mut op = match scope {
        ReorderScope::Sections => EditOpV1::new(EditOpType::MoveSection),
        ReorderScope::Subsections { section_index } => {
            let mut op = EditOpV1::new(EditOpType::MoveSubsection);
            op.section_index = Some(section_index);
            op
        }
    };
    op.from = Some(drag.active_id.clone());
    op.to = Some(over_id.clone());
    Some(op)
}

/// Resolve and apply a drag completion against the current document.
pub fn apply_drag(policy: &Policy, scope: ReorderScope, drag: &DragEnd) -> Applied {
    match drag_end_to_op(scope, drag) {
        None => Applied {
            policy: policy.clone(),
            event: EditEvent::Noop,
        },
        Some(op) => match scope {
            ReorderScope::Sections => move_section(
                policy,
                op.from.as_deref().unwrap_or_default(),
                op.to.as_deref().unwrap_or_default(),
            ),
            ReorderScope::Subsections { section_index } => move_subsection(
                policy,
                section_index,
                op.from.as_deref().unwrap_or_default(),
                op.to.as_deref().unwrap_or_default(),
            ),
        },
    }
}
