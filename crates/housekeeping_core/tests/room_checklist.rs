use housekeeping_core::model::timestamp::{format_timestamp, parse_timestamp};
use housekeeping_core::repo::records::checklist_key;
use housekeeping_core::{
    ChecklistRepository, HotelRepository, KeyValueStore, RepoError, RoomRepository, RoomService,
    SeedOptions, Seeder, SqliteStore, StoreChecklistRepository, StoreHotelRepository,
    StoreRoomRepository,
};
use std::thread;

fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    Seeder::with_options(&store, SeedOptions::without_delays())
        .seed_if_empty()
        .unwrap();
    store
}

#[test]
fn checking_an_item_stamps_item_and_room() {
    let store = seeded_store();
    let checklist = StoreChecklistRepository::new(&store);
    let rooms = StoreRoomRepository::new(&store);
    let item = checklist.list_items_for_room("palm#1003").unwrap().remove(5);

    let at = checklist.set_checked(&item.item_id, "palm#1003", true).unwrap();

    let reloaded = checklist
        .list_items_for_room("palm#1003")
        .unwrap()
        .into_iter()
        .find(|row| row.item_id == item.item_id)
        .unwrap();
    assert!(reloaded.is_checked);
    assert_eq!(reloaded.checked_at, Some(at));
    assert_eq!(rooms.get_room("palm#1003").unwrap().unwrap().last_updated, at);

    let raw = store
        .get(&checklist_key("palm#1003", item.category, &item.item_id))
        .unwrap()
        .unwrap();
    let stored = raw.get_str("checkedAt").unwrap();
    assert_eq!(format_timestamp(&parse_timestamp(stored).unwrap()), stored);
}

#[test]
fn unchecking_clears_the_timestamp() {
    let store = seeded_store();
    let checklist = StoreChecklistRepository::new(&store);
    let item = checklist.list_items_for_room("difc#1001").unwrap().remove(0);

    checklist.set_checked(&item.item_id, "difc#1001", true).unwrap();
    checklist.set_checked(&item.item_id, "difc#1001", false).unwrap();

    let reloaded = checklist
        .list_items_for_room("difc#1001")
        .unwrap()
        .into_iter()
        .find(|row| row.item_id == item.item_id)
        .unwrap();
    assert!(!reloaded.is_checked);
    assert!(reloaded.checked_at.is_none());
}

#[test]
fn toggles_on_other_items_are_independent() {
    let store = seeded_store();
    let service = RoomService::new(&store);
    let checklist = StoreChecklistRepository::new(&store);
    let items = checklist.list_items_for_room("palm#1010").unwrap();

    service.set_checked(&items[0].item_id, "palm#1010", true).unwrap();
    service.set_checked(&items[1].item_id, "palm#1010", true).unwrap();
    service.set_checked(&items[0].item_id, "palm#1010", false).unwrap();

    let checked: Vec<String> = checklist
        .list_items_for_room("palm#1010")
        .unwrap()
        .into_iter()
        .filter(|row| row.is_checked)
        .map(|row| row.item_id)
        .collect();
    assert_eq!(checked, vec![items[1].item_id.clone()]);
}

#[test]
fn malformed_item_id_is_rejected_before_any_write() {
    let store = seeded_store();
    let checklist = StoreChecklistRepository::new(&store);
    let before = StoreRoomRepository::new(&store)
        .get_room("palm#1001")
        .unwrap()
        .unwrap();

    let err = checklist.set_checked("palm#1001", "palm#1001", true).unwrap_err();
    assert!(matches!(err, RepoError::InvalidId { .. }));

    let err = checklist
        .set_checked("palm#1001#Bedroom#Unknown_item", "palm#1001", true)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity, .. } if entity == "checklist item"));

    let after = StoreRoomRepository::new(&store)
        .get_room("palm#1001")
        .unwrap()
        .unwrap();
    assert_eq!(after, before);
}

#[test]
fn notes_accept_any_text_and_touch_last_updated() {
    let store = seeded_store();
    let service = RoomService::new(&store);
    let rooms = StoreRoomRepository::new(&store);
    let before = rooms.get_room("difc#1005").unwrap().unwrap();

    service
        .set_notes("difc#1005", "Broken lamp; guest #2 requested\nextra pillows")
        .unwrap();
    let noted = rooms.get_room("difc#1005").unwrap().unwrap();
    assert_eq!(noted.notes, "Broken lamp; guest #2 requested\nextra pillows");
    assert!(noted.last_updated >= before.last_updated);

    service.set_notes("difc#1005", "").unwrap();
    assert_eq!(rooms.get_room("difc#1005").unwrap().unwrap().notes, "");
}

#[test]
fn occupancy_override_round_trips() {
    let store = seeded_store();
    let service = RoomService::new(&store);
    let rooms = StoreRoomRepository::new(&store);

    service.set_occupied_override("palm#1007", true).unwrap();
    assert!(rooms.get_room("palm#1007").unwrap().unwrap().occupied_override);

    service.set_occupied_override("palm#1007", false).unwrap();
    assert!(!rooms.get_room("palm#1007").unwrap().unwrap().occupied_override);
}

#[test]
fn mutating_a_missing_room_is_not_found_and_creates_nothing() {
    let store = seeded_store();
    let service = RoomService::new(&store);
    let count = store.item_count().unwrap();

    let err = service.set_notes("palm#2001", "ghost").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity, ref id } if entity == "room" && id == "palm#2001"));
    let err = service.set_occupied_override("palm#2001", true).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));

    assert_eq!(store.item_count().unwrap(), count);
    assert!(StoreRoomRepository::new(&store)
        .get_room("palm#2001")
        .unwrap()
        .is_none());
}

#[test]
fn room_lookup_by_number_and_missing_room() {
    let store = seeded_store();
    let rooms = StoreRoomRepository::new(&store);

    let room = rooms.get_room_by_number("difc", 1010).unwrap().unwrap();
    assert_eq!(room.room_id, "difc#1010");
    assert_eq!(room.hotel_id, "difc");
    assert!(rooms.get_room_by_number("difc", 1011).unwrap().is_none());
    assert!(rooms.list_rooms_for_hotel("nowhere").unwrap().is_empty());
    assert_eq!(rooms.list_all_rooms().unwrap().len(), 20);
}

#[test]
fn hotel_image_is_the_only_hotel_mutation() {
    let store = seeded_store();
    let service = RoomService::new(&store);
    let hotels = StoreHotelRepository::new(&store);

    service.set_hotel_image("difc", "/oooz-hero-image.jpg").unwrap();

    let hotel = hotels.get_hotel("difc").unwrap().unwrap();
    assert_eq!(hotel.image_url, "/oooz-hero-image.jpg");
    assert_eq!(hotel.name, "One&Only DIFC");
    assert_eq!(hotel.location, "DIFC, Dubai");

    let err = service.set_hotel_image("atlantis", "/x.jpg").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity, .. } if entity == "hotel"));
    assert!(hotels.get_hotel("atlantis").unwrap().is_none());
}

#[test]
fn item_id_from_another_room_is_rejected() {
    let store = seeded_store();
    let checklist = StoreChecklistRepository::new(&store);
    let item = checklist.list_items_for_room("palm#1001").unwrap().remove(0);

    let err = checklist
        .set_checked(&item.item_id, "palm#1002", true)
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidId { entity: "checklist item", .. }));

    let err = checklist.set_checked(&item.item_id, "palm", true).unwrap_err();
    assert!(matches!(err, RepoError::InvalidId { entity: "room", .. }));

    assert!(checklist
        .list_items_for_room("palm#1002")
        .unwrap()
        .iter()
        .all(|row| !row.is_checked));
}

#[test]
fn concurrent_writers_on_one_store_file_do_not_fail() {
    const WRITERS: usize = 8;
    const ROUNDS: usize = 51;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("housekeeping.sqlite3");
    {
        let store = SqliteStore::open(&path).unwrap();
        Seeder::with_options(&store, SeedOptions::without_delays())
            .seed_if_empty()
            .unwrap();
    }
    let items = {
        let store = SqliteStore::open(&path).unwrap();
        StoreChecklistRepository::new(&store)
            .list_items_for_room("palm#1001")
            .unwrap()
    };

    let failures: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let path = &path;
                // The last writer shares an item with the first one.
                let item_id = items[writer % (WRITERS - 1)].item_id.clone();
                scope.spawn(move || {
                    let store = SqliteStore::open(path).unwrap();
                    let service = RoomService::new(&store);
                    (0..ROUNDS)
                        .filter(|round| {
                            service
                                .set_checked(&item_id, "palm#1001", round % 2 == 0)
                                .is_err()
                        })
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).sum()
    });
    assert_eq!(failures, 0);

    let store = SqliteStore::open(&path).unwrap();
    let rows = StoreChecklistRepository::new(&store)
        .list_items_for_room("palm#1001")
        .unwrap();
    let checked = rows.iter().filter(|row| row.is_checked).count();
    assert_eq!(checked, WRITERS - 1);
    assert!(rows.iter().all(|row| row.is_checked == row.checked_at.is_some()));
}
