use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Hotel housekeeping dashboard")]
pub struct Cli {
    /// SQLite database file (overrides HOUSEKEEPING_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the hotel catalog and checklists unless already present
    Seed(SeedArgs),
    /// Cross-property status counts and per-hotel summaries
    Overview,
    /// List hotels
    Hotels,
    /// List rooms of one hotel with derived status
    Rooms { hotel_id: String },
    /// Rooms needing attention or in progress
    Attention,
    /// Checklist detail for one room
    Room { hotel_id: String, room_number: u32 },
    /// Check (or uncheck) one checklist item
    Check(CheckArgs),
    /// Replace a room's notes
    Notes { room_id: String, notes: String },
    /// Set or clear the occupancy override
    Occupied(OccupiedArgs),
    /// Replace a hotel's image URL
    SetImage { hotel_id: String, image_url: String },
}

#[derive(Args, Clone)]
pub struct SeedArgs {
    /// Items per batch write (max 25)
    #[arg(long)]
    pub batch_size: Option<usize>,
    /// Skip inter-batch and backoff sleeps
    #[arg(long)]
    pub no_delay: bool,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    pub item_id: String,
    pub room_id: String,
    /// Clear the item instead of checking it
    #[arg(long)]
    pub uncheck: bool,
}

#[derive(Args, Clone)]
pub struct OccupiedArgs {
    pub room_id: String,
    /// Clear the override
    #[arg(long)]
    pub clear: bool,
}
