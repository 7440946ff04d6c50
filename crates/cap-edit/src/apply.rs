//! The mutation engine: pure tree transforms over a policy document.
//!
//! Semantics shared by every operation here:
//! - total: well-formed arguments never panic and never error
//! - pure: input document is untouched; a new document is returned
//! - stale-safe: an identifier that does not resolve produces a `Noop`
//! - every returned document satisfies the structural invariants
//!   (asserted in debug/test builds)

use cap_core::ident::new_node_id;
use cap_core::model::{Body, Policy, RichText, Section, Subsection, UseCaseSide};

use crate::event::EditEvent;
use crate::schema::{EditOpType, EditOpV1, EditScriptV1};
use crate::validate::validate_script;

/// Result of one edit: the new document plus what happened.
#[derive(Debug, Clone)]
pub struct Applied {
    pub policy: Policy,
    pub event: EditEvent,
}

/// Result of applying a whole edit script.
#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    pub policy: Policy,
    pub events: Vec<EditEvent>,
}

/// Append a new section with one default subsection, both freshly identified.
///
/// The default title numbers itself as `section count - 2`, counting the
/// section being added, an offset tied to the three fixed leading sections
/// of a freshly formatted document. Documents that have had sections deleted
/// or reordered can produce surprising (even negative) numbers; that is the
/// shipped behavior and is kept literally.
pub fn add_section(policy: &Policy) -> Applied {
    let new_section_number = (policy.sections.len() as i64 + 1) - 2;
    let section = Section {
        id: new_node_id(),
        title: format!("New Section - {new_section_number}"),
        subsections: vec![Subsection {
            id: new_node_id(),
            title: "New Sub Section".to_string(),
            body: Body::Single("<h2>New Section</h2><p>Enter your content here</p>".to_string()),
            metadata: None,
        }],
    };

    let mut next = policy.clone();
    let event = EditEvent::SectionAdded {
        section_id: section.id.clone(),
    };
    next.sections.push(section);
    finish(next, event)
}

/// Remove the section with the given id. Unknown id: no-op.
pub fn delete_section(policy: &Policy, section_id: &str) -> Applied {
    if policy.section_index(section_id).is_none() {
        return noop(policy);
    }

    let mut next = policy.clone();
    next.sections.retain(|s| s.id != section_id);
    finish(
        next,
        EditEvent::SectionDeleted {
            section_id: section_id.to_string(),
        },
    )
}

/// Remove one subsection; removing a section's only subsection removes the
/// whole section (cascade).
///
/// The sole-subsection check happens before any filtering; checking after
/// would see the shortened list and never cascade.
pub fn delete_subsection(policy: &Policy, section_id: &str, subsection_id: &str) -> Applied {
    let Some(section_index) = policy.section_index(section_id) else {
        return noop(policy);
    };
    let section = &policy.sections[section_index];
    if section.subsection_index(subsection_id).is_none() {
        return noop(policy);
    }

    if section.subsections.len() == 1 {
        let mut next = policy.clone();
        next.sections.remove(section_index);
        return finish(
            next,
            EditEvent::SubsectionDeleted {
                section_id: section_id.to_string(),
                subsection_id: subsection_id.to_string(),
                cascaded: true,
            },
        );
    }

    let mut next = policy.clone();
    next.sections[section_index]
        .subsections
        .retain(|s| s.id != subsection_id);
    finish(
        next,
        EditEvent::SubsectionDeleted {
            section_id: section_id.to_string(),
            subsection_id: subsection_id.to_string(),
            cascaded: false,
        },
    )
}

/// Reinsert the section identified by `from` at the position of the section
/// identified by `to`. Self-moves and unresolved ids: no-op.
///
/// Indices are resolved by identity lookup at call time, never cached.
pub fn move_section(policy: &Policy, from: &str, to: &str) -> Applied {
    if from == to {
        return noop(policy);
    }
    let (Some(from_index), Some(to_index)) = (policy.section_index(from), policy.section_index(to))
    else {
        return noop(policy);
    };

    let mut next = policy.clone();
    array_move(&mut next.sections, from_index, to_index);
    finish(
        next,
        EditEvent::SectionMoved {
            section_id: from.to_string(),
            to_index,
        },
    )
}

/// Same semantics as [`move_section`], scoped to the subsection list of the
/// section at `section_index`. An out-of-range section position: no-op.
pub fn move_subsection(policy: &Policy, section_index: usize, from: &str, to: &str) -> Applied {
    if from == to {
        return noop(policy);
    }
    let Some(section) = policy.sections.get(section_index) else {
        return noop(policy);
    };
    let (Some(from_index), Some(to_index)) =
        (section.subsection_index(from), section.subsection_index(to))
    else {
        return noop(policy);
    };

    let mut next = policy.clone();
    let section_id = next.sections[section_index].id.clone();
    array_move(&mut next.sections[section_index].subsections, from_index, to_index);
    finish(
        next,
        EditEvent::SubsectionMoved {
            section_id,
            subsection_id: from.to_string(),
            to_index,
        },
    )
}

/// Replace the document heading wholesale.
pub fn edit_heading(policy: &Policy, heading: RichText) -> Applied {
    let mut next = policy.clone();
    next.heading = heading;
    finish(next, EditEvent::HeadingEdited)
}

/// Replace a section title. Unknown id: no-op.
pub fn edit_section_title(policy: &Policy, section_id: &str, title: String) -> Applied {
    let Some(section_index) = policy.section_index(section_id) else {
        return noop(policy);
    };
    let mut next = policy.clone();
    next.sections[section_index].title = title;
    finish(
        next,
        EditEvent::TitleEdited {
            node_id: section_id.to_string(),
        },
    )
}

/// Replace a subsection title. Unknown ids: no-op.
pub fn edit_subsection_title(
    policy: &Policy,
    section_id: &str,
    subsection_id: &str,
    title: String,
) -> Applied {
    with_subsection(policy, section_id, subsection_id, |sub| sub.title = title).map_or_else(
        || noop(policy),
        |next| {
            finish(
                next,
                EditEvent::TitleEdited {
                    node_id: subsection_id.to_string(),
                },
            )
        },
    )
}

/// Replace a subsection body wholesale. No merging, ever.
pub fn edit_subsection_body(
    policy: &Policy,
    section_id: &str,
    subsection_id: &str,
    body: Body,
) -> Applied {
    with_subsection(policy, section_id, subsection_id, |sub| sub.body = body).map_or_else(
        || noop(policy),
        |next| {
            finish(
                next,
                EditEvent::BodyEdited {
                    section_id: section_id.to_string(),
                    subsection_id: subsection_id.to_string(),
                },
            )
        },
    )
}

/// Replace one side of a split use-cases body. A single body, or unresolved
/// ids: no-op.
pub fn edit_use_case_text(
    policy: &Policy,
    section_id: &str,
    subsection_id: &str,
    side: UseCaseSide,
    text: RichText,
) -> Applied {
    let Some(section_index) = policy.section_index(section_id) else {
        return noop(policy);
    };
    let Some(sub_index) = policy.sections[section_index].subsection_index(subsection_id) else {
        return noop(policy);
    };
    if !matches!(
        policy.sections[section_index].subsections[sub_index].body,
        Body::Split(..)
    ) {
        return noop(policy);
    }

    let mut next = policy.clone();
    next.sections[section_index].subsections[sub_index]
        .body
        .set_side(side, text);
    finish(
        next,
        EditEvent::BodyEdited {
            section_id: section_id.to_string(),
            subsection_id: subsection_id.to_string(),
        },
    )
}

/// Apply one validated wire op.
///
/// Field errors come from the validator with stable messages; resolution
/// failures are no-ops, exactly as with the direct functions.
pub fn apply_op(policy: &Policy, op: &EditOpV1) -> Result<Applied, String> {
    let script = EditScriptV1 {
        v: 1,
        ops: vec![op.clone()],
    };
    validate_script(&script)?;
    Ok(apply_checked(policy, op))
}

/// Validate then apply a whole script, op by op, in order.
pub fn apply_script(policy: &Policy, script: &EditScriptV1) -> Result<ScriptOutcome, String> {
    validate_script(script)?;

    let mut current = policy.clone();
    let mut events = Vec::with_capacity(script.ops.len());
    for op in &script.ops {
        let applied = apply_checked(&current, op);
        current = applied.policy;
        events.push(applied.event);
    }
    Ok(ScriptOutcome {
        policy: current,
        events,
    })
}

/// Dispatch for an op whose fields already passed validation.
fn apply_checked(policy: &Policy, op: &EditOpV1) -> Applied {
    match op.op {
        EditOpType::AddSection => add_section(policy),
        EditOpType::DeleteSection => {
            delete_section(policy, op.section_id.as_deref().unwrap_or_default())
        }
        EditOpType::DeleteSubsection => delete_subsection(
            policy,
            op.section_id.as_deref().unwrap_or_default(),
            op.subsection_id.as_deref().unwrap_or_default(),
        ),
        EditOpType::MoveSection => move_section(
            policy,
            op.from.as_deref().unwrap_or_default(),
            op.to.as_deref().unwrap_or_default(),
        ),
        EditOpType::MoveSubsection => move_subsection(
            policy,
            op.section_index.unwrap_or_default(),
            op.from.as_deref().unwrap_or_default(),
            op.to.as_deref().unwrap_or_default(),
        ),
        EditOpType::EditHeading => edit_heading(policy, op.value.clone().unwrap_or_default()),
        EditOpType::EditSectionTitle => edit_section_title(
            policy,
            op.section_id.as_deref().unwrap_or_default(),
            op.value.clone().unwrap_or_default(),
        ),
        EditOpType::EditSubsectionTitle => edit_subsection_title(
            policy,
            op.section_id.as_deref().unwrap_or_default(),
            op.subsection_id.as_deref().unwrap_or_default(),
            op.value.clone().unwrap_or_default(),
        ),
        EditOpType::EditSubsectionBody => edit_subsection_body(
            policy,
            op.section_id.as_deref().unwrap_or_default(),
            op.subsection_id.as_deref().unwrap_or_default(),
            op.body.clone().unwrap_or_else(|| Body::Single(String::new())),
        ),
        EditOpType::EditUseCaseText => edit_use_case_text(
            policy,
            op.section_id.as_deref().unwrap_or_default(),
            op.subsection_id.as_deref().unwrap_or_default(),
            op.side.unwrap_or(UseCaseSide::Reasonable),
            op.value.clone().unwrap_or_default(),
        ),
    }
}

/// Stable remove-then-reinsert move.
///
/// `to` is the target's index as resolved in the original sequence; insertion
/// happens in the already-shortened sequence. Matches drag-and-drop array-move
/// semantics: moving an item past itself by one position does not oscillate.
fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

fn with_subsection(
    policy: &Policy,
    section_id: &str,
    subsection_id: &str,
    edit: impl FnOnce(&mut Subsection),
) -> Option<Policy> {
    let section_index = policy.section_index(section_id)?;
    let sub_index = policy.sections[section_index].subsection_index(subsection_id)?;

    let mut next = policy.clone();
    edit(&mut next.sections[section_index].subsections[sub_index]);
    Some(next)
}

fn noop(policy: &Policy) -> Applied {
    Applied {
        policy: policy.clone(),
        event: EditEvent::Noop,
    }
}

fn finish(policy: Policy, event: EditEvent) -> Applied {
    debug_assert!(
        policy.check_invariants().is_ok(),
        "invariant violation after edit: {:?}",
        policy.check_invariants().err()
    );
    Applied { policy, event }
}
