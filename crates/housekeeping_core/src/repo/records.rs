//! Key layout and record encoding for the single-table store.
//!
//! | row       | pk               | sk                                  | index group      | index sort         |
//! |-----------|------------------|-------------------------------------|------------------|--------------------|
//! | hotel     | `HOTEL#<id>`     | `METADATA`                          | `HOTELS`         | `HOTEL#<id>`       |
//! | room      | `ROOM#<roomId>`  | `METADATA`                          | `HOTEL#<hotelId>`| `ROOM#<number>`    |
//! | checklist | `ROOM#<roomId>`  | `CHECKLIST#<category>#<itemId>`     | -                | -                  |

use crate::model::checklist::{ChecklistCategory, ChecklistItem};
use crate::model::hotel::Hotel;
use crate::model::room::Room;
use crate::model::timestamp::format_timestamp;
use crate::repo::{RepoError, RepoResult};
use crate::store::{Attributes, IndexKey, ItemKey, ScanFilter, StoreItem};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub const METADATA_SK: &str = "METADATA";
pub const HOTELS_GROUP: &str = "HOTELS";
pub const HOTEL_PREFIX: &str = "HOTEL#";
pub const ROOM_PREFIX: &str = "ROOM#";
pub const CHECKLIST_PREFIX: &str = "CHECKLIST#";

pub fn hotel_key(hotel_id: &str) -> ItemKey {
    ItemKey::new(format!("{HOTEL_PREFIX}{hotel_id}"), METADATA_SK)
}

/// Index group holding one hotel's rooms.
pub fn hotel_group(hotel_id: &str) -> String {
    format!("{HOTEL_PREFIX}{hotel_id}")
}

pub fn room_partition(room_id: &str) -> String {
    format!("{ROOM_PREFIX}{room_id}")
}

pub fn room_key(room_id: &str) -> ItemKey {
    ItemKey::new(room_partition(room_id), METADATA_SK)
}

pub fn checklist_key(room_id: &str, category: ChecklistCategory, item_id: &str) -> ItemKey {
    ItemKey::new(
        room_partition(room_id),
        format!("{CHECKLIST_PREFIX}{category}#{item_id}"),
    )
}

/// Scan filter selecting room metadata rows only.
pub fn room_scan_filter() -> ScanFilter {
    ScanFilter {
        sort_key_equals: Some(METADATA_SK.to_string()),
        require_string_attribute: Some("roomId".to_string()),
    }
}

pub fn encode_hotel(hotel: &Hotel, created_at: DateTime<Utc>) -> RepoResult<StoreItem> {
    let mut attributes = to_attributes(hotel)?;
    attributes.insert(
        "createdAt".to_string(),
        Value::String(format_timestamp(&created_at)),
    );
    Ok(StoreItem::new(hotel_key(&hotel.hotel_id), attributes).with_index(IndexKey::new(
        HOTELS_GROUP,
        format!("{HOTEL_PREFIX}{}", hotel.hotel_id),
    )))
}

pub fn encode_room(room: &Room) -> RepoResult<StoreItem> {
    Ok(
        StoreItem::new(room_key(&room.room_id), to_attributes(room)?).with_index(IndexKey::new(
            hotel_group(&room.hotel_id),
            format!("{ROOM_PREFIX}{}", room.room_number),
        )),
    )
}

pub fn encode_checklist_item(item: &ChecklistItem, hotel_id: &str) -> RepoResult<StoreItem> {
    item.validate()?;
    let mut attributes = to_attributes(item)?;
    attributes.insert("hotelId".to_string(), Value::String(hotel_id.to_string()));
    Ok(StoreItem::new(
        checklist_key(&item.room_id, item.category, &item.item_id),
        attributes,
    ))
}

pub fn decode_hotel(item: &StoreItem) -> RepoResult<Hotel> {
    from_attributes(item)
}

pub fn decode_room(item: &StoreItem) -> RepoResult<Room> {
    from_attributes(item)
}

pub fn decode_checklist_item(item: &StoreItem) -> RepoResult<ChecklistItem> {
    let decoded: ChecklistItem = from_attributes(item)?;
    decoded.validate()?;
    Ok(decoded)
}

pub(crate) fn to_attributes<T: Serialize>(value: &T) -> RepoResult<Attributes> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RepoError::InvalidData(format!(
            "record must encode to an object, got `{other}`"
        ))),
        Err(err) => Err(RepoError::InvalidData(err.to_string())),
    }
}

fn from_attributes<T: DeserializeOwned>(item: &StoreItem) -> RepoResult<T> {
    serde_json::from_value(Value::Object(item.attributes.clone()))
        .map_err(|err| RepoError::InvalidData(format!("item {}: {err}", item.key)))
}
