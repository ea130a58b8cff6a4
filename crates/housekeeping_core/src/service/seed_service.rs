//! One-time store seeding.
//!
//! # Responsibility
//! - Build the fixed hotel/room/checklist dataset.
//! - Write it in bounded batches with throttling backoff.
//!
//! # Invariants
//! - A store that already holds the expected hotel rows is left untouched.
//! - Batches never exceed `MAX_BATCH_WRITE_ITEMS`.
//! - A batch is retried at most `max_retries` times, only on throughput
//!   exhaustion; any other failure or an exhausted budget aborts the run.
//!   Rows written by earlier batches stay in place.

use crate::catalog::{CHECKLIST_CATALOG, EXPECTED_HOTEL_COUNT, HOTEL_CATALOG, ROOM_NUMBERS};
use crate::model::checklist::ChecklistItem;
use crate::model::room::Room;
use crate::model::timestamp::now;
use crate::repo::records::{
    encode_checklist_item, encode_hotel, encode_room, HOTELS_GROUP, HOTEL_PREFIX,
};
use crate::repo::RepoError;
use crate::store::{KeyValueStore, StoreError, StoreItem, MAX_BATCH_WRITE_ITEMS};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::{Duration, Instant};

/// Batching and backoff knobs for a seed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// Items per batch; clamped to `1..=MAX_BATCH_WRITE_ITEMS`.
    pub batch_size: usize,
    /// Pause after every successful batch.
    pub inter_batch_delay: Duration,
    /// Retry `n` waits `base_backoff * n`.
    pub base_backoff: Duration,
    pub max_retries: u32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_WRITE_ITEMS,
            inter_batch_delay: Duration::from_millis(200),
            base_backoff: Duration::from_millis(500),
            max_retries: 5,
        }
    }
}

impl SeedOptions {
    /// Options with every delay set to zero.
    pub fn without_delays() -> Self {
        Self {
            inter_batch_delay: Duration::ZERO,
            base_backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_WRITE_ITEMS)
    }
}

/// What a seed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held `hotel_count` hotels; nothing was written.
    AlreadySeeded { hotel_count: usize },
    Seeded { records_written: usize, batches: usize },
}

/// Fatal seed failures.
#[derive(Debug)]
pub enum SeedError {
    Store(StoreError),
    Encode(RepoError),
    /// Throughput stayed exhausted after the retry budget.
    RetriesExhausted {
        batch: usize,
        attempts: u32,
        source: StoreError,
    },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "seed aborted: {err}"),
            Self::Encode(err) => write!(f, "seed record encoding failed: {err}"),
            Self::RetriesExhausted {
                batch,
                attempts,
                source,
            } => write!(
                f,
                "seed batch {batch} failed after {attempts} attempts: {source}"
            ),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::RetriesExhausted { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for SeedError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Encode(value)
    }
}

/// Builds every seed row: per hotel one hotel row, then each room row
/// followed by its checklist rows, all unchecked.
pub fn build_seed_records(created_at: DateTime<Utc>) -> Result<Vec<StoreItem>, RepoError> {
    let mut records = Vec::new();
    for seed in &HOTEL_CATALOG {
        let hotel = seed.to_hotel();
        records.push(encode_hotel(&hotel, created_at)?);

        for room_number in ROOM_NUMBERS {
            let room = Room::new(hotel.hotel_id.as_str(), room_number, created_at);
            records.push(encode_room(&room)?);

            for (category, item_name) in CHECKLIST_CATALOG {
                let item = ChecklistItem::unchecked(room.room_id.as_str(), category, item_name);
                records.push(encode_checklist_item(&item, &hotel.hotel_id)?);
            }
        }
    }
    Ok(records)
}

/// Idempotent bulk initializer.
pub struct Seeder<'store, S: KeyValueStore> {
    store: &'store S,
    options: SeedOptions,
}

impl<'store, S: KeyValueStore> Seeder<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self::with_options(store, SeedOptions::default())
    }

    pub fn with_options(store: &'store S, options: SeedOptions) -> Self {
        Self { store, options }
    }

    /// Seeds the store unless the expected hotels already exist.
    pub fn seed_if_empty(&self) -> Result<SeedOutcome, SeedError> {
        let started_at = Instant::now();
        let hotel_count = self.store.query_index(HOTELS_GROUP, HOTEL_PREFIX)?.len();
        if hotel_count >= EXPECTED_HOTEL_COUNT {
            info!("event=seed module=seed status=skipped hotels={hotel_count}");
            return Ok(SeedOutcome::AlreadySeeded { hotel_count });
        }

        let records = build_seed_records(now())?;
        let batch_size = self.options.effective_batch_size();
        info!(
            "event=seed module=seed status=start records={} batch_size={batch_size}",
            records.len()
        );

        let mut batches = 0;
        for (index, batch) in records.chunks(batch_size).enumerate() {
            if let Err(err) = self.write_batch(index, batch) {
                error!(
                    "event=seed module=seed status=error batch={index} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err);
            }
            batches += 1;
        }

        info!(
            "event=seed module=seed status=ok records={} batches={batches} duration_ms={}",
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(SeedOutcome::Seeded {
            records_written: records.len(),
            batches,
        })
    }

    fn write_batch(&self, index: usize, batch: &[StoreItem]) -> Result<(), SeedError> {
        let mut pending = batch.to_vec();
        let mut retries: u32 = 0;

        loop {
            let throttled = match self.store.batch_put(&pending) {
                Ok(outcome) if outcome.is_complete() => {
                    debug!(
                        "event=seed_batch module=seed status=ok batch={index} items={} retries={retries}",
                        batch.len()
                    );
                    thread::sleep(self.options.inter_batch_delay);
                    return Ok(());
                }
                Ok(outcome) => {
                    let left = outcome.unprocessed.len();
                    pending = outcome.unprocessed;
                    StoreError::ThroughputExceeded(format!("{left} items left unprocessed"))
                }
                Err(err) if err.is_throughput_exceeded() => err,
                Err(err) => return Err(SeedError::Store(err)),
            };

            if retries >= self.options.max_retries {
                return Err(SeedError::RetriesExhausted {
                    batch: index,
                    attempts: retries + 1,
                    source: throttled,
                });
            }

            retries += 1;
            let backoff = self.options.base_backoff * retries;
            warn!(
                "event=seed_batch module=seed status=retry batch={index} retry={retries} backoff_ms={} pending={} error={throttled}",
                backoff.as_millis(),
                pending.len()
            );
            thread::sleep(backoff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_seed_records, SeedOptions};
    use crate::model::timestamp::now;
    use crate::store::MAX_BATCH_WRITE_ITEMS;
    use std::collections::HashSet;

    #[test]
    fn seed_records_have_expected_shape() {
        let records = build_seed_records(now()).unwrap();
        assert_eq!(records.len(), 682);

        let keys: HashSet<_> = records.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys.len(), records.len());

        let hotels = records.iter().filter(|r| r.key.pk.starts_with("HOTEL#")).count();
        let rooms = records
            .iter()
            .filter(|r| r.key.pk.starts_with("ROOM#") && r.key.sk == "METADATA")
            .count();
        let checklist = records
            .iter()
            .filter(|r| r.key.sk.starts_with("CHECKLIST#"))
            .count();
        assert_eq!((hotels, rooms, checklist), (2, 20, 660));
    }

    #[test]
    fn batch_size_is_clamped_to_store_limit() {
        let mut options = SeedOptions::without_delays();
        options.batch_size = 500;
        assert_eq!(options.effective_batch_size(), MAX_BATCH_WRITE_ITEMS);
        options.batch_size = 0;
        assert_eq!(options.effective_batch_size(), 1);
    }
}
