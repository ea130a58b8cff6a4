//! Command-line front end over `housekeeping_core`.
//!
//! # Responsibility
//! - Resolve configuration from `.env`, the environment and flags.
//! - Print dashboard views and apply room mutations.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, SeedArgs};
use housekeeping_core::{
    init_logging, DashboardConfig, DashboardService, RoomService, SeedOptions, SeedOutcome,
    Seeder, SqliteStore,
};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = DashboardConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(dir) = &config.log_dir {
        let dir = absolute(dir)?;
        init_logging(config.log_level, &dir)
            .with_context(|| format!("cannot start logging in {}", dir.display()))?;
    }

    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("cannot open {}", config.db_path.display()))?;
    log::info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    match cli.command {
        Commands::Seed(args) => seed(&store, &args),
        Commands::Overview => overview(&store),
        Commands::Hotels => hotels(&store),
        Commands::Rooms { hotel_id } => rooms(&store, &hotel_id),
        Commands::Attention => attention(&store),
        Commands::Room {
            hotel_id,
            room_number,
        } => room(&store, &hotel_id, room_number),
        Commands::Check(args) => {
            RoomService::new(&store).set_checked(&args.item_id, &args.room_id, !args.uncheck)?;
            println!(
                "{} {}",
                args.item_id,
                if args.uncheck { "unchecked" } else { "checked" }
            );
            Ok(())
        }
        Commands::Notes { room_id, notes } => {
            RoomService::new(&store).set_notes(&room_id, &notes)?;
            println!("{room_id} notes updated");
            Ok(())
        }
        Commands::Occupied(args) => {
            RoomService::new(&store).set_occupied_override(&args.room_id, !args.clear)?;
            println!("{} occupied={}", args.room_id, !args.clear);
            Ok(())
        }
        Commands::SetImage {
            hotel_id,
            image_url,
        } => {
            RoomService::new(&store).set_hotel_image(&hotel_id, &image_url)?;
            println!("{hotel_id} image updated");
            Ok(())
        }
    }
}

fn absolute(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("cannot resolve working directory")?
        .join(dir))
}

fn seed(store: &SqliteStore, args: &SeedArgs) -> Result<()> {
    let mut options = if args.no_delay {
        SeedOptions::without_delays()
    } else {
        SeedOptions::default()
    };
    if let Some(batch_size) = args.batch_size {
        options.batch_size = batch_size;
    }

    match Seeder::with_options(store, options).seed_if_empty()? {
        SeedOutcome::AlreadySeeded { hotel_count } => {
            println!("already seeded ({hotel_count} hotels)");
        }
        SeedOutcome::Seeded {
            records_written,
            batches,
        } => println!("seeded {records_written} records in {batches} batches"),
    }
    Ok(())
}

fn overview(store: &SqliteStore) -> Result<()> {
    let overview = DashboardService::new(store).overview()?;
    println!(
        "rooms={} ready={} in_progress={} needs_attention={} occupied={} occupancy={}%",
        overview.total_rooms,
        overview.counts.ready,
        overview.counts.in_progress,
        overview.counts.needs_attention,
        overview.counts.occupied,
        overview.occupancy_percentage
    );
    for summary in &overview.hotels {
        println!(
            "{:<24} rooms={:<3} ready={:<3} completion={}%",
            summary.hotel.name,
            summary.total_rooms,
            summary.counts.ready,
            summary.completion_percentage
        );
    }
    Ok(())
}

fn hotels(store: &SqliteStore) -> Result<()> {
    for hotel in DashboardService::new(store).list_hotels()? {
        println!("{:<8} {:<24} {}", hotel.hotel_id, hotel.name, hotel.location);
    }
    Ok(())
}

fn rooms(store: &SqliteStore, hotel_id: &str) -> Result<()> {
    for view in DashboardService::new(store).room_views_for_hotel(hotel_id)? {
        println!(
            "{:<6} {:<16} incomplete={}",
            view.room.room_number, view.status, view.incomplete_count
        );
    }
    Ok(())
}

fn attention(store: &SqliteStore) -> Result<()> {
    for row in DashboardService::new(store).rooms_needing_attention()? {
        println!(
            "{:<24} {:<6} {:<16} incomplete={}",
            row.hotel_name, row.room.room_number, row.status, row.incomplete_count
        );
    }
    Ok(())
}

fn room(store: &SqliteStore, hotel_id: &str, room_number: u32) -> Result<()> {
    let Some(detail) = DashboardService::new(store).room_detail(hotel_id, room_number)? else {
        anyhow::bail!("room {hotel_id}/{room_number} not found");
    };

    println!(
        "{} room {} - {} ({} incomplete)",
        detail.hotel.name, detail.room.room_number, detail.status, detail.incomplete_count
    );
    if !detail.room.notes.is_empty() {
        println!("notes: {}", detail.room.notes);
    }
    for section in &detail.sections {
        println!(
            "\n{} ({}/{})",
            section.category,
            section.checked_count(),
            section.items.len()
        );
        for item in &section.items {
            let mark = if item.is_checked { "x" } else { " " };
            println!("  [{mark}] {:<40} {}", item.item_name, item.item_id);
        }
    }
    Ok(())
}
