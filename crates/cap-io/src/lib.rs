//! `cap-io` is the single supported public entrypoint for the CAP policy
//! document engine: the tree model, the normalizer, the mutation/reorder
//! engine, and the persistence bridge.
//!
//! This crate intentionally contains **no** rendering, routing, rich-text
//! widget, or network logic. Those belong in higher layers. `cap-io` focuses
//! on:
//! - stable types
//! - parsing with useful diagnostics
//! - serialization
//! - the store boundary

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `cap_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may
// change without notice.

// Re-export the canonical document model.
#[doc(hidden)]
pub mod core {
    pub use cap_core::ident::new_node_id;
    pub use cap_core::model::{
        Body, NodeId, Policy, RichText, Section, Subsection, SubsectionMeta, UseCaseSide,
    };
}

#[doc(hidden)]
pub mod codebook {
    pub use cap_codebook::{OverallPolicy, UnknownPolicyError, description};
}

// Re-export the normalizer.
#[doc(hidden)]
pub mod normalize {
    pub use cap_normalize::{GenerationResult, UseCaseEntry, UseCases, Variant, format_policy};
}

// Re-export the mutation engine and reorder protocol.
#[doc(hidden)]
pub mod edit {
    pub use cap_edit::{
        Applied, DragEnd, EditEvent, EditOpType, EditOpV1, EditScriptV1, EditTelemetry,
        ReorderScope, ScriptOutcome, apply_drag, apply_op, apply_script, drag_end_to_op,
        validate_script,
    };
    pub use cap_edit::apply::{
        add_section, delete_section, delete_subsection, edit_heading, edit_section_title,
        edit_subsection_body, edit_subsection_title, edit_use_case_text, move_section,
        move_subsection,
    };
}

/// JSON parsing helpers with improved diagnostics.
pub mod policy_json;

/// Serialization helpers for wire payloads.
pub mod serialize;

/// The persistence bridge: payloads, records, and the store boundary.
pub mod store;

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::codebook::OverallPolicy;
    pub use crate::core::{
        Body, NodeId, Policy, RichText, Section, Subsection, SubsectionMeta, UseCaseSide,
    };
    pub use crate::edit::{
        Applied, DragEnd, EditEvent, EditOpType, EditOpV1, EditScriptV1, ReorderScope,
        ScriptOutcome, apply_drag, apply_op, apply_script, drag_end_to_op, validate_script,
    };
    pub use crate::normalize::{GenerationResult, Variant, format_policy};
    pub use crate::policy_json::{
        GenerationJsonError, PolicyJsonError, parse_generation_json_str, parse_policy_json_str,
    };
    pub use crate::store::{
        MemoryStore, PolicyRecord, PolicyStore, SaveError, SavePayload, StoreError, load_policy,
        save_policy,
    };
    pub use crate::serialize;
}
