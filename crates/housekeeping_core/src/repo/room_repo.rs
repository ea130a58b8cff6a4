//! Room repository contracts and store-backed implementation.
//!
//! # Responsibility
//! - List rooms per hotel through the grouping index.
//! - Apply notes and occupancy-override edits.
//!
//! # Invariants
//! - Every mutation writes `lastUpdated` in the same single-key update.
//! - Notes are stored verbatim (empty text allowed).

use crate::model::room::{compose_room_id, Room};
use crate::model::timestamp::{format_timestamp, now};
use crate::repo::records::{decode_room, hotel_group, room_key, room_scan_filter, ROOM_PREFIX};
use crate::repo::{RepoError, RepoResult};
use crate::store::{Attributes, KeyValueStore, StoreError};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Repository interface for room rows.
pub trait RoomRepository {
    /// Rooms of one hotel ordered by room number.
    fn list_rooms_for_hotel(&self, hotel_id: &str) -> RepoResult<Vec<Room>>;
    /// Every room of every hotel (full scan).
    fn list_all_rooms(&self) -> RepoResult<Vec<Room>>;
    fn get_room(&self, room_id: &str) -> RepoResult<Option<Room>>;
    fn set_notes(&self, room_id: &str, notes: &str) -> RepoResult<()>;
    fn set_occupied_override(&self, room_id: &str, occupied: bool) -> RepoResult<()>;
    /// Stamps `lastUpdated` without changing anything else.
    fn touch(&self, room_id: &str, at: DateTime<Utc>) -> RepoResult<()>;

    fn get_room_by_number(&self, hotel_id: &str, room_number: u32) -> RepoResult<Option<Room>> {
        self.get_room(&compose_room_id(hotel_id, room_number))
    }
}

/// Store-backed room repository.
pub struct StoreRoomRepository<'store, S: KeyValueStore> {
    store: &'store S,
}

impl<'store, S: KeyValueStore> StoreRoomRepository<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }

    fn update_room(&self, room_id: &str, mut patch: Attributes, at: DateTime<Utc>) -> RepoResult<()> {
        patch.insert(
            "lastUpdated".to_string(),
            Value::String(format_timestamp(&at)),
        );
        match self.store.update(&room_key(room_id), patch) {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(_)) => Err(RepoError::not_found("room", room_id)),
            Err(err) => Err(err.into()),
        }
    }
}

impl<S: KeyValueStore> RoomRepository for StoreRoomRepository<'_, S> {
    fn list_rooms_for_hotel(&self, hotel_id: &str) -> RepoResult<Vec<Room>> {
        self.store
            .query_index(&hotel_group(hotel_id), ROOM_PREFIX)?
            .iter()
            .map(decode_room)
            .collect()
    }

    fn list_all_rooms(&self) -> RepoResult<Vec<Room>> {
        self.store
            .scan(&room_scan_filter())?
            .iter()
            .map(decode_room)
            .collect()
    }

    fn get_room(&self, room_id: &str) -> RepoResult<Option<Room>> {
        self.store
            .get(&room_key(room_id))?
            .map(|item| decode_room(&item))
            .transpose()
    }

    fn set_notes(&self, room_id: &str, notes: &str) -> RepoResult<()> {
        let mut patch = Attributes::new();
        patch.insert("notes".to_string(), Value::String(notes.to_string()));
        self.update_room(room_id, patch, now())
    }

    fn set_occupied_override(&self, room_id: &str, occupied: bool) -> RepoResult<()> {
        let mut patch = Attributes::new();
        patch.insert("occupiedOverride".to_string(), Value::Bool(occupied));
        self.update_room(room_id, patch, now())
    }

    fn touch(&self, room_id: &str, at: DateTime<Utc>) -> RepoResult<()> {
        self.update_room(room_id, Attributes::new(), at)
    }
}
