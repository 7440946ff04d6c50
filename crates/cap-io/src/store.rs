//! The persistence bridge.
//!
//! The engine treats storage as an opaque read/write capability keyed by a
//! policy identifier. The bridge serializes `{ policy: { heading, sections } }`
//! verbatim (every id, title, and body survives a save/load cycle) and
//! reports success or failure to the caller. It never retries, and it never
//! touches the in-memory document: on failure the caller keeps editing the
//! same tree and may retry explicitly.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use cap_core::model::{Policy, RichText, Section};

/// The `policy` object inside a save payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyBody {
    pub heading: RichText,
    pub sections: Vec<Section>,
}

/// Wire payload for a persistence write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePayload {
    pub policy: PolicyBody,
}

impl SavePayload {
    pub fn from_policy(policy: &Policy) -> Self {
        Self {
            policy: PolicyBody {
                heading: policy.heading.clone(),
                sections: policy.sections.clone(),
            },
        }
    }
}

/// What a persistence read returns. The document id is the lookup key and is
/// not repeated in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    pub heading: RichText,
    pub sections: Vec<Section>,
    pub created_at: String,
    pub updated_at: String,
}

impl PolicyRecord {
    /// Hydrate an editable document from a stored record.
    pub fn into_policy(self, policy_id: &str) -> Policy {
        Policy {
            id: policy_id.to_string(),
            heading: self.heading,
            created_at: self.created_at,
            updated_at: self.updated_at,
            sections: self.sections,
        }
    }
}

/// Failure reported by a store backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(String),
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "policy '{id}' not found"),
            StoreError::Backend(msg) => write!(f, "store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Failure reported by the save bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// The document has no heading or no sections; there is nothing worth
    /// persisting and the save is refused up front.
    NothingToSave,
    Store(StoreError),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::NothingToSave => write!(f, "nothing to save: empty heading or sections"),
            SaveError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::NothingToSave => None,
            SaveError::Store(e) => Some(e),
        }
    }
}

/// Opaque storage capability keyed by policy id. Writes are upserts; partial
/// writes are never exposed.
pub trait PolicyStore {
    fn load(&self, policy_id: &str) -> Result<PolicyRecord, StoreError>;
    fn save(&mut self, policy_id: &str, payload: &SavePayload) -> Result<(), StoreError>;
}

/// Serialize and save a document through a store.
pub fn save_policy(store: &mut dyn PolicyStore, policy: &Policy) -> Result<(), SaveError> {
    if policy.heading.is_empty() || policy.sections.is_empty() {
        return Err(SaveError::NothingToSave);
    }
    let payload = SavePayload::from_policy(policy);
    store.save(&policy.id, &payload).map_err(SaveError::Store)
}

/// Load and hydrate a document from a store.
pub fn load_policy(store: &dyn PolicyStore, policy_id: &str) -> Result<Policy, StoreError> {
    store.load(policy_id).map(|r| r.into_policy(policy_id))
}

/// In-memory store, used by tests and the CLI's local mode.
///
/// Upsert semantics: `createdAt` is preserved across saves; both timestamps
/// are caller-opaque strings, so a fresh record starts with the stamp the
/// store was configured to apply.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, PolicyRecord>,
    /// Stamp applied to `updatedAt` (and `createdAt` for new records) on save.
    pub stamp: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stamp(stamp: &str) -> Self {
        Self {
            records: BTreeMap::new(),
            stamp: stamp.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PolicyStore for MemoryStore {
    fn load(&self, policy_id: &str) -> Result<PolicyRecord, StoreError> {
        self.records
            .get(policy_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(policy_id.to_string()))
    }

    fn save(&mut self, policy_id: &str, payload: &SavePayload) -> Result<(), StoreError> {
        let created_at = self
            .records
            .get(policy_id)
            .map(|r| r.created_at.clone())
            .unwrap_or_else(|| self.stamp.clone());

        self.records.insert(
            policy_id.to_string(),
            PolicyRecord {
                heading: payload.policy.heading.clone(),
                sections: payload.policy.sections.clone(),
                created_at,
                updated_at: self.stamp.clone(),
            },
        );
        Ok(())
    }
}
