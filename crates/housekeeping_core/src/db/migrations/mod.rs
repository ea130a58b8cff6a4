//! Versioned schema scripts for the `items` table.
//!
//! # Invariants
//! - Versions start at 1 and grow by exactly one per entry.
//! - Each run executes every pending script and the `user_version` bump in
//!   one transaction.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

struct Migration {
    version: u32,
    name: &'static str,
    script: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "items",
    script: include_str!("0001_items.sql"),
}];

/// Highest schema version this build can open.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Runs every migration newer than the recorded version.
///
/// Returns the number of scripts applied (0 when already current).
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let db_version = schema_version(conn)?;
    let latest_supported = latest_version();
    if db_version > latest_supported {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > db_version)
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        tx.execute_batch(migration.script)
            .map_err(|source| DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })?;
        tx.pragma_update(None, "user_version", migration.version)?;
        debug!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    Ok(pending.len())
}
