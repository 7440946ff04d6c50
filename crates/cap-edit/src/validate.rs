//! Edit-script shape validation. Strict and fail-fast, with stable messages.
//!
//! Rules:
//! - script version must be supported
//! - required fields must be present per op type
//! - replacement values must not mix `value` and `body`
//!
//! Identifier resolution is intentionally *not* checked here: ops carrying
//! stale ids are well-formed and apply as no-ops.

use crate::schema::{EditOpType, EditOpV1, EditScriptV1};

pub const EDIT_SCRIPT_V: u8 = 1;

/// Validate an edit script's version and per-op field shape.
pub fn validate_script(script: &EditScriptV1) -> Result<(), String> {
    if script.v != EDIT_SCRIPT_V {
        return Err(format!("unsupported edit script version {}", script.v));
    }

    for (i, op) in script.ops.iter().enumerate() {
        validate_op(i, op)?;
    }
    Ok(())
}

fn validate_op(i: usize, op: &EditOpV1) -> Result<(), String> {
    let name = op_name(op.op);

    match op.op {
        EditOpType::AddSection => {}

        EditOpType::DeleteSection | EditOpType::EditSectionTitle => {
            require(i, name, "section_id", op.section_id.is_some())?;
        }

        EditOpType::DeleteSubsection
        | EditOpType::EditSubsectionTitle
        | EditOpType::EditSubsectionBody => {
            require(i, name, "section_id", op.section_id.is_some())?;
            require(i, name, "subsection_id", op.subsection_id.is_some())?;
        }

        EditOpType::MoveSection => {
            require(i, name, "from", op.from.is_some())?;
            require(i, name, "to", op.to.is_some())?;
        }

        EditOpType::MoveSubsection => {
            require(i, name, "section_index", op.section_index.is_some())?;
            require(i, name, "from", op.from.is_some())?;
            require(i, name, "to", op.to.is_some())?;
        }

        EditOpType::EditHeading => {}

        EditOpType::EditUseCaseText => {
            require(i, name, "section_id", op.section_id.is_some())?;
            require(i, name, "subsection_id", op.subsection_id.is_some())?;
            require(i, name, "side", op.side.is_some())?;
        }
    }

    match op.op {
        EditOpType::EditHeading
        | EditOpType::EditSectionTitle
        | EditOpType::EditSubsectionTitle
        | EditOpType::EditUseCaseText => {
            require(i, name, "value", op.value.is_some())?;
            if op.body.is_some() {
                return Err(format!("ops[{i}] ({name}) unexpected body (use value)"));
            }
        }
        EditOpType::EditSubsectionBody => {
            require(i, name, "body", op.body.is_some())?;
            if op.value.is_some() {
                return Err(format!("ops[{i}] ({name}) unexpected value (use body)"));
            }
        }
        _ => {
            if op.value.is_some() || op.body.is_some() {
                return Err(format!(
                    "ops[{i}] ({name}) unexpected replacement field (only valid for edits)"
                ));
            }
        }
    }

    Ok(())
}

fn require(i: usize, name: &str, field: &str, present: bool) -> Result<(), String> {
    if present {
        Ok(())
    } else {
        Err(format!("ops[{i}] ({name}) missing {field}"))
    }
}

fn op_name(op: EditOpType) -> &'static str {
    match op {
        EditOpType::AddSection => "add_section",
        EditOpType::DeleteSection => "delete_section",
        EditOpType::DeleteSubsection => "delete_subsection",
        EditOpType::MoveSection => "move_section",
        EditOpType::MoveSubsection => "move_subsection",
        EditOpType::EditHeading => "edit_heading",
        EditOpType::EditSectionTitle => "edit_section_title",
        EditOpType::EditSubsectionTitle => "edit_subsection_title",
        EditOpType::EditSubsectionBody => "edit_subsection_body",
        EditOpType::EditUseCaseText => "edit_use_case_text",
    }
}
