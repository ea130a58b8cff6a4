//! Core logic for the hotel housekeeping dashboard.
//! This crate is the single source of truth for room readiness rules.

pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, DashboardConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::checklist::{ChecklistCategory, ChecklistItem};
pub use model::hotel::Hotel;
pub use model::room::Room;
pub use model::status::{derive_status, RoomStatus};
pub use repo::checklist_repo::{ChecklistRepository, StoreChecklistRepository};
pub use repo::hotel_repo::{HotelRepository, StoreHotelRepository};
pub use repo::room_repo::{RoomRepository, StoreRoomRepository};
pub use repo::{RepoError, RepoResult};
pub use service::aggregation::{
    AttentionRoom, ChecklistSection, DashboardOverview, HotelSummary, RoomView, StatusCounts,
};
pub use service::dashboard_service::{DashboardService, RoomDetail};
pub use service::room_service::RoomService;
pub use service::seed_service::{SeedError, SeedOptions, SeedOutcome, Seeder};
pub use store::{KeyValueStore, SqliteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
