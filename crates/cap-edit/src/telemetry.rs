use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schema::{EditOpType, EditOpV1};

/// Deterministic, machine-readable telemetry for edit-script operations.
///
/// Notes:
/// - Contains *no* wall-clock timestamps (to preserve determinism).
/// - Intended for operational monitoring, CI, and cost/complexity analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditTelemetry {
    /// Operation category, e.g. "validate" or "apply".
    pub op: String,

    /// Whether the operation succeeded.
    pub ok: bool,

    /// Elapsed time (milliseconds).
    pub elapsed_ms: u64,

    /// Edit script version.
    pub script_v: u8,

    /// Script ops total.
    pub script_ops: usize,

    /// Script ops grouped by op type.
    pub ops_by_type: BTreeMap<String, usize>,

    /// Unique section ids targeted by ops.
    pub target_sections: usize,

    /// Unique subsection ids targeted by ops.
    pub target_subsections: usize,

    /// Section count before / after applying (when applicable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections_before: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections_after: Option<usize>,

    /// Validation error message (when failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EditTelemetry {
    pub fn op_counts(ops: &[EditOpV1]) -> (usize, BTreeMap<String, usize>, usize, usize) {
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        let mut sections: BTreeMap<&str, ()> = BTreeMap::new();
        let mut subsections: BTreeMap<&str, ()> = BTreeMap::new();
        for o in ops {
            *by_type.entry(Self::op_type_key(o.op)).or_insert(0) += 1;
            if let Some(id) = o.section_id.as_deref() {
                sections.insert(id, ());
            }
            if let Some(id) = o.subsection_id.as_deref() {
                subsections.insert(id, ());
            }
        }
        (ops.len(), by_type, sections.len(), subsections.len())
    }

    /// Snake-case key matching the op's wire spelling.
    pub fn op_type_key(op: EditOpType) -> String {
        match serde_json::to_value(op) {
            Ok(serde_json::Value::String(s)) => s,
            _ => format!("{op:?}").to_lowercase(),
        }
    }
}
