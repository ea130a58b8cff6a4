//! Checklist repository contracts and store-backed implementation.
//!
//! # Responsibility
//! - Read one room's checklist rows.
//! - Toggle one item and stamp the owning room.
//!
//! # Invariants
//! - The storage key of an item is rebuilt from the category embedded in
//!   its id; an id that does not start with `<room_id>#` is rejected.
//! - A toggle is two independent single-key writes (item, then room
//!   `lastUpdated`). A failure between them leaves the room timestamp stale;
//!   status stays correct because it is derived from the items.

use crate::model::checklist::{category_from_item_id, ChecklistItem};
use crate::model::room::split_room_id;
use crate::model::timestamp::{format_timestamp, now};
use crate::repo::records::{checklist_key, decode_checklist_item, room_partition, CHECKLIST_PREFIX};
use crate::repo::room_repo::{RoomRepository, StoreRoomRepository};
use crate::repo::{RepoError, RepoResult};
use crate::store::{Attributes, KeyValueStore, StoreError};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Repository interface for checklist rows.
pub trait ChecklistRepository {
    /// All items of one room, grouped by category.
    fn list_items_for_room(&self, room_id: &str) -> RepoResult<Vec<ChecklistItem>>;
    /// Sets `isChecked`/`checkedAt` for one item and stamps the room.
    ///
    /// Returns the timestamp written to the room.
    fn set_checked(&self, item_id: &str, room_id: &str, is_checked: bool)
        -> RepoResult<DateTime<Utc>>;
}

/// Store-backed checklist repository.
pub struct StoreChecklistRepository<'store, S: KeyValueStore> {
    store: &'store S,
}

impl<'store, S: KeyValueStore> StoreChecklistRepository<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> ChecklistRepository for StoreChecklistRepository<'_, S> {
    fn list_items_for_room(&self, room_id: &str) -> RepoResult<Vec<ChecklistItem>> {
        self.store
            .query_partition(&room_partition(room_id), CHECKLIST_PREFIX)?
            .iter()
            .map(decode_checklist_item)
            .collect()
    }

    fn set_checked(
        &self,
        item_id: &str,
        room_id: &str,
        is_checked: bool,
    ) -> RepoResult<DateTime<Utc>> {
        if split_room_id(room_id).is_none() {
            return Err(RepoError::InvalidId {
                entity: "room",
                id: room_id.to_string(),
            });
        }
        let category = item_id
            .strip_prefix(room_id)
            .filter(|rest| rest.starts_with('#'))
            .and_then(|_| category_from_item_id(item_id))
            .ok_or_else(|| RepoError::InvalidId {
                entity: "checklist item",
                id: item_id.to_string(),
            })?;

        let at = now();
        let checked_at = if is_checked {
            Value::String(format_timestamp(&at))
        } else {
            Value::Null
        };
        let mut patch = Attributes::new();
        patch.insert("isChecked".to_string(), Value::Bool(is_checked));
        patch.insert("checkedAt".to_string(), checked_at);

        match self
            .store
            .update(&checklist_key(room_id, category, item_id), patch)
        {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => {
                return Err(RepoError::not_found("checklist item", item_id));
            }
            Err(err) => return Err(err.into()),
        }

        StoreRoomRepository::new(self.store).touch(room_id, at)?;
        Ok(at)
    }
}
