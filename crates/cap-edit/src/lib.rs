pub mod apply;
pub mod event;
pub mod reorder;
pub mod schema;
pub mod telemetry;
pub mod validate;

pub use apply::{Applied, ScriptOutcome, apply_op, apply_script};
pub use event::EditEvent;
pub use reorder::{DragEnd, ReorderScope, apply_drag, drag_end_to_op};
pub use schema::{EditOpType, EditOpV1, EditScriptV1};
pub use telemetry::EditTelemetry;
pub use validate::validate_script;
