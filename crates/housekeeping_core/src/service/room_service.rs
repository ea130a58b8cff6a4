//! Room and checklist mutation service.
//!
//! Mutations are single-key writes delegated to the store; concurrent edits
//! of the same key resolve last-writer-wins.

use crate::repo::checklist_repo::{ChecklistRepository, StoreChecklistRepository};
use crate::repo::hotel_repo::{HotelRepository, StoreHotelRepository};
use crate::repo::room_repo::{RoomRepository, StoreRoomRepository};
use crate::repo::RepoResult;
use crate::store::KeyValueStore;
use log::{info, warn};

/// Use-case wrapper for housekeeping edits.
pub struct RoomService<'store, S: KeyValueStore> {
    hotels: StoreHotelRepository<'store, S>,
    rooms: StoreRoomRepository<'store, S>,
    checklist: StoreChecklistRepository<'store, S>,
}

impl<'store, S: KeyValueStore> RoomService<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self {
            hotels: StoreHotelRepository::new(store),
            rooms: StoreRoomRepository::new(store),
            checklist: StoreChecklistRepository::new(store),
        }
    }

    /// Checks or unchecks one checklist item.
    pub fn set_checked(&self, item_id: &str, room_id: &str, is_checked: bool) -> RepoResult<()> {
        let result = self.checklist.set_checked(item_id, room_id, is_checked);
        log_mutation(
            "checklist_toggle",
            "room_id",
            room_id,
            &format!("checked={is_checked}"),
            result.map(|_| ()),
        )
    }

    /// Replaces the room notes. Any text, including empty, is accepted.
    pub fn set_notes(&self, room_id: &str, notes: &str) -> RepoResult<()> {
        log_mutation(
            "room_notes",
            "room_id",
            room_id,
            &format!("notes_len={}", notes.chars().count()),
            self.rooms.set_notes(room_id, notes),
        )
    }

    pub fn set_occupied_override(&self, room_id: &str, occupied: bool) -> RepoResult<()> {
        log_mutation(
            "room_occupancy",
            "room_id",
            room_id,
            &format!("occupied={occupied}"),
            self.rooms.set_occupied_override(room_id, occupied),
        )
    }

    /// Replaces a hotel's display image.
    pub fn set_hotel_image(&self, hotel_id: &str, image_url: &str) -> RepoResult<()> {
        log_mutation(
            "hotel_image",
            "hotel_id",
            hotel_id,
            &format!("url_len={}", image_url.len()),
            self.hotels.set_image_url(hotel_id, image_url),
        )
    }
}

/// Emits one `status=ok|error` event for a finished mutation and passes the
/// result through.
fn log_mutation(
    event: &str,
    id_field: &str,
    id: &str,
    details: &str,
    result: RepoResult<()>,
) -> RepoResult<()> {
    match &result {
        Ok(()) => info!("event={event} module=service status=ok {id_field}={id} {details}"),
        Err(err) => warn!(
            "event={event} module=service status=error {id_field}={id} {details} error={err}"
        ),
    }
    result
}
