//! Checklist item record.
//!
//! # Responsibility
//! - Define the closed set of housekeeping sections.
//! - Compose and decompose item ids.
//! - Guard the checked/timestamp pairing.
//!
//! # Invariants
//! - `item_id` is `<room_id>#<category>#<item name, whitespace runs as '_'>`.
//! - `is_checked == checked_at.is_some()`.

use crate::model::timestamp::serde_millis_option;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Housekeeping section a checklist item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChecklistCategory {
    Bedroom,
    Bathroom,
    Amenities,
    #[serde(rename = "Final Inspection")]
    FinalInspection,
}

impl ChecklistCategory {
    /// All sections in display order.
    pub const ALL: [ChecklistCategory; 4] = [
        Self::Bedroom,
        Self::Bathroom,
        Self::Amenities,
        Self::FinalInspection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bedroom => "Bedroom",
            Self::Bathroom => "Bathroom",
            Self::Amenities => "Amenities",
            Self::FinalInspection => "Final Inspection",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

impl Display for ChecklistCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Violations of checklist item invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistValidationError {
    CheckedWithoutTimestamp(String),
    TimestampWithoutCheck(String),
}

impl Display for ChecklistValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckedWithoutTimestamp(item_id) => {
                write!(f, "checklist item `{item_id}` is checked but has no checkedAt")
            }
            Self::TimestampWithoutCheck(item_id) => {
                write!(f, "checklist item `{item_id}` has checkedAt but is unchecked")
            }
        }
    }
}

impl Error for ChecklistValidationError {}

/// One checkbox of a room checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub item_id: String,
    pub room_id: String,
    pub category: ChecklistCategory,
    pub item_name: String,
    pub is_checked: bool,
    #[serde(default, with = "serde_millis_option")]
    pub checked_at: Option<DateTime<Utc>>,
}

impl ChecklistItem {
    /// Creates an unchecked item with a composed id.
    pub fn unchecked(
        room_id: impl Into<String>,
        category: ChecklistCategory,
        item_name: impl Into<String>,
    ) -> Self {
        let room_id = room_id.into();
        let item_name = item_name.into();
        Self {
            item_id: compose_item_id(&room_id, category, &item_name),
            room_id,
            category,
            item_name,
            is_checked: false,
            checked_at: None,
        }
    }

    /// Sets or clears the check, keeping `checked_at` paired with it.
    pub fn set_checked(&mut self, checked: bool, at: DateTime<Utc>) {
        self.is_checked = checked;
        self.checked_at = checked.then_some(at);
    }

    pub fn validate(&self) -> Result<(), ChecklistValidationError> {
        match (self.is_checked, self.checked_at) {
            (true, None) => Err(ChecklistValidationError::CheckedWithoutTimestamp(
                self.item_id.clone(),
            )),
            (false, Some(_)) => Err(ChecklistValidationError::TimestampWithoutCheck(
                self.item_id.clone(),
            )),
            _ => Ok(()),
        }
    }
}

/// Builds the stable item id used in storage keys.
pub fn compose_item_id(room_id: &str, category: ChecklistCategory, item_name: &str) -> String {
    let slug = WHITESPACE_RE.replace_all(item_name, "_");
    format!("{room_id}#{category}#{slug}")
}

/// Recovers the category from an item id.
///
/// The room id contributes two `#`-segments, so the category is the third.
pub fn category_from_item_id(item_id: &str) -> Option<ChecklistCategory> {
    item_id
        .split('#')
        .nth(2)
        .and_then(ChecklistCategory::parse)
}
