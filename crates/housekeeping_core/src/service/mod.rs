//! Housekeeping use-case services.
//!
//! # Responsibility
//! - Compose repository reads into dashboard views and aggregates.
//! - Orchestrate room/checklist mutations and one-time seeding.
//!
//! # Invariants
//! - Every view recomputes room status from freshly read checklist rows.
//! - Services keep no state between calls beyond a borrowed store.

pub mod aggregation;
pub mod dashboard_service;
pub mod room_service;
pub mod seed_service;
