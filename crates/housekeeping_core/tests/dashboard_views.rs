use housekeeping_core::model::timestamp::now;
use housekeeping_core::repo::records::encode_room;
use housekeeping_core::{
    ChecklistCategory, ChecklistRepository, DashboardService, KeyValueStore, RepoError, Room,
    RoomService, RoomStatus, SeedOptions, Seeder, SqliteStore, StoreChecklistRepository,
};
use rusqlite::params;

fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    Seeder::with_options(&store, SeedOptions::without_delays())
        .seed_if_empty()
        .unwrap();
    store
}

fn check_first(store: &SqliteStore, room_id: &str, count: usize) {
    let checklist = StoreChecklistRepository::new(store);
    for item in checklist
        .list_items_for_room(room_id)
        .unwrap()
        .into_iter()
        .take(count)
    {
        checklist.set_checked(&item.item_id, room_id, true).unwrap();
    }
}

/// palm#1001 ready, palm#1002 in progress (4 of 33), difc#1003 occupied.
fn mixed_store() -> SqliteStore {
    let store = seeded_store();
    check_first(&store, "palm#1001", 33);
    check_first(&store, "palm#1002", 4);
    RoomService::new(&store)
        .set_occupied_override("difc#1003", true)
        .unwrap();
    store
}

#[test]
fn freshly_seeded_rooms_all_need_attention() {
    let store = seeded_store();
    let dashboard = DashboardService::new(&store);

    let overview = dashboard.overview().unwrap();
    assert_eq!(overview.total_rooms, 20);
    assert_eq!(overview.counts.needs_attention, 20);
    assert_eq!(overview.occupancy_rate, 0.0);

    let hotel_ids: Vec<&str> = overview
        .hotels
        .iter()
        .map(|summary| summary.hotel.hotel_id.as_str())
        .collect();
    assert_eq!(hotel_ids, vec!["difc", "palm"]);
    assert!(overview
        .hotels
        .iter()
        .all(|summary| summary.total_rooms == 10 && summary.completion_percentage == 0));
}

#[test]
fn overview_counts_each_status_once() {
    let store = mixed_store();
    let overview = DashboardService::new(&store).overview().unwrap();

    assert_eq!(overview.counts.ready, 1);
    assert_eq!(overview.counts.in_progress, 1);
    assert_eq!(overview.counts.occupied, 1);
    assert_eq!(overview.counts.needs_attention, 17);
    assert_eq!(overview.counts.total(), overview.total_rooms);
    assert_eq!(overview.occupancy_rate, 1.0 / 20.0);
    assert_eq!(overview.occupancy_percentage, 5);

    let palm = overview
        .hotels
        .iter()
        .find(|summary| summary.hotel.hotel_id == "palm")
        .unwrap();
    assert_eq!(palm.completion_percentage, 10);
    assert_eq!(palm.counts.total(), 10);
}

#[test]
fn room_views_follow_room_number_order() {
    let store = mixed_store();
    let views = DashboardService::new(&store)
        .room_views_for_hotel("palm")
        .unwrap();

    assert_eq!(views.len(), 10);
    assert_eq!(views[0].room.room_number, 1001);
    assert_eq!(views[0].status, RoomStatus::Ready);
    assert_eq!(views[1].status, RoomStatus::InProgress);
    assert_eq!(views[1].incomplete_count, 29);
    assert_eq!(views[9].room.room_number, 1010);
}

#[test]
fn attention_list_is_filtered_and_ordered() {
    let store = mixed_store();
    let rows = DashboardService::new(&store)
        .rooms_needing_attention()
        .unwrap();

    assert_eq!(rows.len(), 18);
    assert!(rows.iter().all(|row| row.status.needs_attention()));
    assert!(!rows.iter().any(|row| row.room.room_id == "palm#1001"));
    assert!(!rows.iter().any(|row| row.room.room_id == "difc#1003"));

    assert_eq!(rows[0].hotel_name, "One&Only DIFC");
    assert_eq!(rows[0].room.room_number, 1001);
    assert_eq!(rows[0].incomplete_count, 33);

    let split = rows
        .iter()
        .position(|row| row.status == RoomStatus::InProgress)
        .unwrap();
    assert_eq!(split, 17);
    assert_eq!(rows[17].room.room_id, "palm#1002");
    assert_eq!(rows[17].hotel_name, "One&Only The Palm");
    assert_eq!(rows[17].incomplete_count, 29);

    let first_palm = rows
        .iter()
        .position(|row| row.room.hotel_id == "palm")
        .unwrap();
    assert_eq!(first_palm, 9);
    assert_eq!(rows[first_palm].room.room_number, 1003);
}

#[test]
fn attention_row_falls_back_to_hotel_id_without_hotel_row() {
    let store = seeded_store();
    store
        .put(&encode_room(&Room::new("annex", 1, now())).unwrap())
        .unwrap();

    let rows = DashboardService::new(&store)
        .rooms_needing_attention()
        .unwrap();

    let annex = rows
        .iter()
        .find(|row| row.room.room_id == "annex#1")
        .unwrap();
    assert_eq!(annex.hotel_name, "annex");
    assert_eq!(annex.status, RoomStatus::NeedsAttention);
    assert_eq!(annex.incomplete_count, 0);
}

#[test]
fn room_detail_groups_checklist_by_category() {
    let store = mixed_store();
    let dashboard = DashboardService::new(&store);

    let detail = dashboard.room_detail("palm", 1002).unwrap().unwrap();
    assert_eq!(detail.hotel.name, "One&Only The Palm");
    assert_eq!(detail.status, RoomStatus::InProgress);
    assert_eq!(detail.incomplete_count, 29);

    let shape: Vec<(ChecklistCategory, usize)> = detail
        .sections
        .iter()
        .map(|section| (section.category, section.items.len()))
        .collect();
    assert_eq!(
        shape,
        vec![
            (ChecklistCategory::Bedroom, 10),
            (ChecklistCategory::Bathroom, 10),
            (ChecklistCategory::Amenities, 8),
            (ChecklistCategory::FinalInspection, 5),
        ]
    );
    let checked: usize = detail.sections.iter().map(|s| s.checked_count()).sum();
    assert_eq!(checked, 4);

    assert!(dashboard.room_detail("palm", 2002).unwrap().is_none());
    assert!(dashboard.room_detail("atlantis", 1001).unwrap().is_none());
}

#[test]
fn occupied_override_wins_over_complete_checklist() {
    let store = mixed_store();
    RoomService::new(&store)
        .set_occupied_override("palm#1001", true)
        .unwrap();

    let detail = DashboardService::new(&store)
        .room_detail("palm", 1001)
        .unwrap()
        .unwrap();
    assert_eq!(detail.status, RoomStatus::Occupied);
    assert_eq!(detail.incomplete_count, 0);
}

#[test]
fn corrupt_checklist_row_aborts_the_view() {
    let store = seeded_store();
    store
        .connection()
        .execute(
            "UPDATE items
             SET attributes = json_set(attributes, '$.isChecked', json('true'))
             WHERE pk = ?1 AND sk LIKE 'CHECKLIST#%';",
            params!["ROOM#difc#1004"],
        )
        .unwrap();

    let err = DashboardService::new(&store)
        .rooms_needing_attention()
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
