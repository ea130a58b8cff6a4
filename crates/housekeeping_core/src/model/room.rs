//! Room record.
//!
//! # Invariants
//! - `room_id` is `<hotel_id>#<room_number>`.
//! - Status is not a field; see `model::status::derive_status`.

use crate::model::timestamp::serde_millis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted room state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: String,
    pub hotel_id: String,
    pub room_number: u32,
    /// Manual flag forcing the derived status to `Occupied`.
    pub occupied_override: bool,
    #[serde(default)]
    pub notes: String,
    /// Touched by every room mutation and checklist toggle.
    #[serde(with = "serde_millis")]
    pub last_updated: DateTime<Utc>,
}

impl Room {
    /// Creates a vacant room with empty notes.
    pub fn new(hotel_id: impl Into<String>, room_number: u32, last_updated: DateTime<Utc>) -> Self {
        let hotel_id = hotel_id.into();
        Self {
            room_id: compose_room_id(&hotel_id, room_number),
            hotel_id,
            room_number,
            occupied_override: false,
            notes: String::new(),
            last_updated,
        }
    }
}

pub fn compose_room_id(hotel_id: &str, room_number: u32) -> String {
    format!("{hotel_id}#{room_number}")
}

/// Splits `<hotel_id>#<room_number>` back into its parts.
pub fn split_room_id(room_id: &str) -> Option<(&str, u32)> {
    let (hotel_id, number) = room_id.split_once('#')?;
    if hotel_id.is_empty() {
        return None;
    }
    number.parse().ok().map(|number| (hotel_id, number))
}
