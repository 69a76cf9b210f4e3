//! Core trait definitions
//!
//! These traits define the seams between the data model, the storage layer
//! and the controller, so each side can be swapped independently.

use crate::utils::error::AppResult;
use serde::de::DeserializeOwned;

/// Raw key-value persistence
///
/// Values are opaque strings; JSON encoding happens one layer up in
/// [`crate::storage::PersistentStore`].
pub trait StorageBackend {
    /// Fetch the raw value stored under `key`, `None` when absent
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    /// Persist `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
}

/// A list entity identified by a string id within its own list
pub trait Entity: DeserializeOwned {
    /// Partial update merged into an existing entity
    type Patch;

    /// Human readable kind, used in log lines
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Merge the fields present in `patch`; absent fields are left as-is
    fn apply_patch(&mut self, patch: Self::Patch);
}
