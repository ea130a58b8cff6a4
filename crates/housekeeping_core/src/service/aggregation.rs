//! Pure aggregation over derived room statuses.
//!
//! # Invariants
//! - `StatusCounts::total()` equals the number of recorded statuses.
//! - Rates and percentages are 0 for an empty room set.

use crate::model::checklist::{ChecklistCategory, ChecklistItem};
use crate::model::hotel::Hotel;
use crate::model::room::Room;
use crate::model::status::RoomStatus;
use serde::Serialize;
use std::cmp::Ordering;

/// Occurrences of each status in a room collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub ready: usize,
    pub in_progress: usize,
    pub needs_attention: usize,
    pub occupied: usize,
}

impl StatusCounts {
    pub fn from_statuses(statuses: impl IntoIterator<Item = RoomStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.record(status);
        }
        counts
    }

    pub fn record(&mut self, status: RoomStatus) {
        *self.slot_mut(status) += 1;
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        for status in RoomStatus::ALL {
            *self.slot_mut(status) += other.get(status);
        }
    }

    pub fn get(&self, status: RoomStatus) -> usize {
        match status {
            RoomStatus::Ready => self.ready,
            RoomStatus::InProgress => self.in_progress,
            RoomStatus::NeedsAttention => self.needs_attention,
            RoomStatus::Occupied => self.occupied,
        }
    }

    pub fn total(&self) -> usize {
        self.ready + self.in_progress + self.needs_attention + self.occupied
    }

    /// `occupied / total`, or 0 for no rooms.
    pub fn occupancy_rate(&self) -> f64 {
        ratio(self.occupied, self.total())
    }

    /// Occupancy rate as a rounded whole percentage.
    pub fn occupancy_percentage(&self) -> u32 {
        percentage(self.occupied, self.total())
    }

    /// Share of ready rooms as a rounded whole percentage.
    pub fn completion_percentage(&self) -> u32 {
        percentage(self.ready, self.total())
    }

    fn slot_mut(&mut self, status: RoomStatus) -> &mut usize {
        match status {
            RoomStatus::Ready => &mut self.ready,
            RoomStatus::InProgress => &mut self.in_progress,
            RoomStatus::NeedsAttention => &mut self.needs_attention,
            RoomStatus::Occupied => &mut self.occupied,
        }
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

fn percentage(part: usize, total: usize) -> u32 {
    (ratio(part, total) * 100.0).round() as u32
}

/// A room with its derived status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub room: Room,
    pub status: RoomStatus,
    pub incomplete_count: usize,
}

/// A row of the "needs attention" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttentionRoom {
    pub room: Room,
    /// Owning hotel's display name, or its id when the hotel row is missing.
    pub hotel_name: String,
    pub status: RoomStatus,
    pub incomplete_count: usize,
}

/// Per-hotel readiness summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelSummary {
    pub hotel: Hotel,
    pub counts: StatusCounts,
    pub total_rooms: usize,
    pub completion_percentage: u32,
}

impl HotelSummary {
    pub fn new(hotel: Hotel, rooms: &[RoomView]) -> Self {
        let counts = StatusCounts::from_statuses(rooms.iter().map(|view| view.status));
        Self {
            hotel,
            counts,
            total_rooms: rooms.len(),
            completion_percentage: counts.completion_percentage(),
        }
    }
}

/// Cross-property dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOverview {
    pub counts: StatusCounts,
    pub total_rooms: usize,
    pub occupancy_rate: f64,
    pub occupancy_percentage: u32,
    pub hotels: Vec<HotelSummary>,
}

impl DashboardOverview {
    pub fn from_hotels(hotels: Vec<HotelSummary>) -> Self {
        let mut counts = StatusCounts::default();
        for summary in &hotels {
            counts.merge(&summary.counts);
        }
        Self {
            counts,
            total_rooms: counts.total(),
            occupancy_rate: counts.occupancy_rate(),
            occupancy_percentage: counts.occupancy_percentage(),
            hotels,
        }
    }
}

/// Items of one checklist section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistSection {
    pub category: ChecklistCategory,
    pub items: Vec<ChecklistItem>,
}

impl ChecklistSection {
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_checked).count()
    }
}

/// Groups items by category in display order, omitting empty sections.
pub fn group_by_category(items: Vec<ChecklistItem>) -> Vec<ChecklistSection> {
    let mut sections: Vec<ChecklistSection> = ChecklistCategory::ALL
        .into_iter()
        .map(|category| ChecklistSection {
            category,
            items: Vec::new(),
        })
        .collect();
    for item in items {
        if let Some(section) = sections
            .iter_mut()
            .find(|section| section.category == item.category)
        {
            section.items.push(item);
        }
    }
    sections.retain(|section| !section.items.is_empty());
    sections
}

/// Keeps rows needing work, `NeedsAttention` first, then by hotel name
/// (ignoring case) and room number.
pub fn filter_and_sort_attention(rows: Vec<AttentionRoom>) -> Vec<AttentionRoom> {
    let mut rows: Vec<AttentionRoom> = rows
        .into_iter()
        .filter(|row| row.status.needs_attention())
        .collect();
    rows.sort_by(compare_attention_rows);
    rows
}

fn compare_attention_rows(a: &AttentionRoom, b: &AttentionRoom) -> Ordering {
    let rank = |status: RoomStatus| u8::from(status != RoomStatus::NeedsAttention);
    rank(a.status)
        .cmp(&rank(b.status))
        .then_with(|| compare_display_names(&a.hotel_name, &b.hotel_name))
        .then_with(|| a.room.room_number.cmp(&b.room.room_number))
}

/// Case-insensitive ordering for display names; exact bytes break ties.
fn compare_display_names(a: &str, b: &str) -> Ordering {
    let folded = |name: &str| name.chars().flat_map(char::to_lowercase).collect::<String>();
    folded(a).cmp(&folded(b)).then_with(|| a.cmp(b))
}
