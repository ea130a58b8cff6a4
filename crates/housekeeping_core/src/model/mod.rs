//! Housekeeping domain model.
//!
//! # Responsibility
//! - Define hotels, rooms and checklist items as stored records.
//! - Define the derived room status and the rule computing it.
//!
//! # Invariants
//! - Room status is derived at read time and never persisted.
//! - `ChecklistItem::is_checked` is true exactly when `checked_at` is set.

pub mod checklist;
pub mod hotel;
pub mod room;
pub mod status;
pub mod timestamp;
