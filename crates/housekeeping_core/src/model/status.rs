//! Derived room status.
//!
//! # Invariants
//! - `derive_status` is total and pure; it never touches storage.
//! - The occupied override wins over any checklist state.

use crate::model::checklist::ChecklistItem;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Readiness of a room as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Every checklist item is checked.
    Ready,
    /// Some but not all items are checked.
    #[serde(rename = "In Progress")]
    InProgress,
    /// No item is checked (or the room has no checklist).
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    /// Manually marked occupied.
    Occupied,
}

impl RoomStatus {
    /// Display order used by status summaries.
    pub const ALL: [RoomStatus; 4] = [
        Self::Ready,
        Self::InProgress,
        Self::NeedsAttention,
        Self::Occupied,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::InProgress => "In Progress",
            Self::NeedsAttention => "Needs Attention",
            Self::Occupied => "Occupied",
        }
    }

    /// Whether housekeeping still has work to do on the room.
    pub fn needs_attention(self) -> bool {
        matches!(self, Self::NeedsAttention | Self::InProgress)
    }
}

impl Display for RoomStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Computes a room status from its checklist and occupancy override.
pub fn derive_status(items: &[ChecklistItem], occupied_override: bool) -> RoomStatus {
    if occupied_override {
        return RoomStatus::Occupied;
    }

    let checked = items.iter().filter(|item| item.is_checked).count();
    if checked == 0 {
        RoomStatus::NeedsAttention
    } else if checked == items.len() {
        RoomStatus::Ready
    } else {
        RoomStatus::InProgress
    }
}

/// Number of items still unchecked.
pub fn incomplete_count(items: &[ChecklistItem]) -> usize {
    items.iter().filter(|item| !item.is_checked).count()
}
