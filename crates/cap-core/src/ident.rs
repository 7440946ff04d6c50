use uuid::Uuid;

use crate::model::NodeId;

/// Mint a fresh node identifier.
///
/// Identifiers are random v4 UUIDs rendered as lowercase hyphenated strings.
/// They are never derived from node content (duplicate titles are legal and
/// must not collide) and are never reused after a deletion.
pub fn new_node_id() -> NodeId {
    Uuid::new_v4().to_string()
}
