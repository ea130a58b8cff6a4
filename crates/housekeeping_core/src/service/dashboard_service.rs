//! Read-side dashboard service.
//!
//! # Responsibility
//! - Build room lists, per-hotel summaries, the cross-property overview,
//!   the "needs attention" list and room detail views.
//!
//! # Invariants
//! - Status is derived per call from the room's checklist rows.
//! - A failed checklist read aborts the whole view; no default status is
//!   substituted.

use crate::model::hotel::Hotel;
use crate::model::room::Room;
use crate::model::status::{derive_status, incomplete_count, RoomStatus};
use crate::repo::checklist_repo::{ChecklistRepository, StoreChecklistRepository};
use crate::repo::hotel_repo::{HotelRepository, StoreHotelRepository};
use crate::repo::room_repo::{RoomRepository, StoreRoomRepository};
use crate::repo::RepoResult;
use crate::service::aggregation::{
    filter_and_sort_attention, group_by_category, AttentionRoom, ChecklistSection,
    DashboardOverview, HotelSummary, RoomView,
};
use crate::store::KeyValueStore;
use log::{debug, info};
use std::collections::HashMap;
use std::time::Instant;

/// Full room page model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub hotel: Hotel,
    pub room: Room,
    pub status: RoomStatus,
    pub incomplete_count: usize,
    pub sections: Vec<ChecklistSection>,
}

/// Dashboard query facade over a borrowed store.
pub struct DashboardService<'store, S: KeyValueStore> {
    hotels: StoreHotelRepository<'store, S>,
    rooms: StoreRoomRepository<'store, S>,
    checklist: StoreChecklistRepository<'store, S>,
}

impl<'store, S: KeyValueStore> DashboardService<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self {
            hotels: StoreHotelRepository::new(store),
            rooms: StoreRoomRepository::new(store),
            checklist: StoreChecklistRepository::new(store),
        }
    }

    pub fn list_hotels(&self) -> RepoResult<Vec<Hotel>> {
        self.hotels.list_hotels()
    }

    pub fn get_hotel(&self, hotel_id: &str) -> RepoResult<Option<Hotel>> {
        self.hotels.get_hotel(hotel_id)
    }

    /// Derives the status of one room from its current checklist.
    pub fn view_room(&self, room: Room) -> RepoResult<RoomView> {
        let items = self.checklist.list_items_for_room(&room.room_id)?;
        Ok(RoomView {
            status: derive_status(&items, room.occupied_override),
            incomplete_count: incomplete_count(&items),
            room,
        })
    }

    /// Rooms of one hotel, by room number, with derived status.
    pub fn room_views_for_hotel(&self, hotel_id: &str) -> RepoResult<Vec<RoomView>> {
        self.rooms
            .list_rooms_for_hotel(hotel_id)?
            .into_iter()
            .map(|room| self.view_room(room))
            .collect()
    }

    pub fn hotel_summaries(&self) -> RepoResult<Vec<HotelSummary>> {
        self.hotels
            .list_hotels()?
            .into_iter()
            .map(|hotel| {
                let rooms = self.room_views_for_hotel(&hotel.hotel_id)?;
                Ok(HotelSummary::new(hotel, &rooms))
            })
            .collect()
    }

    pub fn overview(&self) -> RepoResult<DashboardOverview> {
        let started_at = Instant::now();
        let overview = DashboardOverview::from_hotels(self.hotel_summaries()?);
        debug!(
            "event=dashboard_overview module=service status=ok hotels={} rooms={} duration_ms={}",
            overview.hotels.len(),
            overview.total_rooms,
            started_at.elapsed().as_millis()
        );
        Ok(overview)
    }

    /// Every room whose status is `NeedsAttention` or `InProgress`, ordered
    /// for display.
    pub fn rooms_needing_attention(&self) -> RepoResult<Vec<AttentionRoom>> {
        let started_at = Instant::now();
        let mut hotel_names: HashMap<String, String> = HashMap::new();
        let mut rows = Vec::new();

        for room in self.rooms.list_all_rooms()? {
            let view = self.view_room(room)?;
            if !view.status.needs_attention() {
                continue;
            }

            let hotel_name = match hotel_names.get(&view.room.hotel_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self
                        .hotels
                        .get_hotel(&view.room.hotel_id)?
                        .map(|hotel| hotel.name)
                        .unwrap_or_else(|| view.room.hotel_id.clone());
                    hotel_names.insert(view.room.hotel_id.clone(), name.clone());
                    name
                }
            };

            rows.push(AttentionRoom {
                room: view.room,
                hotel_name,
                status: view.status,
                incomplete_count: view.incomplete_count,
            });
        }

        let rows = filter_and_sort_attention(rows);
        info!(
            "event=attention_list module=service status=ok count={} duration_ms={}",
            rows.len(),
            started_at.elapsed().as_millis()
        );
        Ok(rows)
    }

    /// Room page for `<hotel_id>/<room_number>`; `None` when either is absent.
    pub fn room_detail(&self, hotel_id: &str, room_number: u32) -> RepoResult<Option<RoomDetail>> {
        let Some(hotel) = self.hotels.get_hotel(hotel_id)? else {
            return Ok(None);
        };
        let Some(room) = self.rooms.get_room_by_number(hotel_id, room_number)? else {
            return Ok(None);
        };

        let items = self.checklist.list_items_for_room(&room.room_id)?;
        Ok(Some(RoomDetail {
            status: derive_status(&items, room.occupied_override),
            incomplete_count: incomplete_count(&items),
            sections: group_by_category(items),
            hotel,
            room,
        }))
    }
}
