//! Key-value store seam consumed by the housekeeping core.
//!
//! # Responsibility
//! - Define the composite-key item shape shared by hotels, rooms and
//!   checklist rows.
//! - Define the read/write surface repositories and the seeder rely on.
//! - Classify store failures into semantic errors (`NotFound`,
//!   `ThroughputExceeded`, `Connectivity`).
//!
//! # Invariants
//! - `(pk, sk)` identifies exactly one item.
//! - An item is visible through the grouping index only when `index` is set.
//! - `update` never creates an item; it is a single-key atomic merge.
//! - `batch_put` never accepts more than `MAX_BATCH_WRITE_ITEMS` items.

use crate::db::DbError;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteStore;

/// Upper bound on items accepted by one `batch_put` call.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// Free-form attribute object stored next to the keys.
pub type Attributes = Map<String, Value>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Primary key of one stored item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey {
    /// Partition key, entity-type prefixed (`HOTEL#..`, `ROOM#..`).
    pub pk: String,
    /// Sort key distinguishing metadata and checklist rows.
    pub sk: String,
}

impl ItemKey {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            sk: sk.into(),
        }
    }
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.pk, self.sk)
    }
}

/// Secondary index key (grouping attribute plus its sort key).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexKey {
    pub group: String,
    pub sort: String,
}

impl IndexKey {
    pub fn new(group: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            sort: sort.into(),
        }
    }
}

/// One row of the single-table layout.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreItem {
    pub key: ItemKey,
    pub index: Option<IndexKey>,
    pub attributes: Attributes,
}

impl StoreItem {
    pub fn new(key: ItemKey, attributes: Attributes) -> Self {
        Self {
            key,
            index: None,
            attributes,
        }
    }

    /// Returns this item registered under the grouping index.
    pub fn with_index(mut self, index: IndexKey) -> Self {
        self.index = Some(index);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_u64)
    }
}

/// Filter applied by `KeyValueStore::scan`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFilter {
    /// Only items whose sort key equals this value.
    pub sort_key_equals: Option<String>,
    /// Only items carrying a string attribute with this name.
    pub require_string_attribute: Option<String>,
}

impl ScanFilter {
    pub fn matches(&self, item: &StoreItem) -> bool {
        if let Some(sk) = &self.sort_key_equals {
            if &item.key.sk != sk {
                return false;
            }
        }
        match &self.require_string_attribute {
            Some(name) => item.get_str(name).is_some(),
            None => true,
        }
    }
}

/// Result of one batch write call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchWriteOutcome {
    /// Items the store accepted the request for but did not write.
    pub unprocessed: Vec<StoreItem>,
}

impl BatchWriteOutcome {
    pub fn is_complete(&self) -> bool {
        self.unprocessed.is_empty()
    }
}

/// Store error taxonomy.
#[derive(Debug)]
pub enum StoreError {
    /// The store could not be reached or opened. Fatal, never retried.
    Connectivity(DbError),
    /// Transient overload; callers may retry with backoff.
    ThroughputExceeded(String),
    /// Batch size exceeds `MAX_BATCH_WRITE_ITEMS`.
    BatchTooLarge { size: usize, max: usize },
    /// Single-key update targeted a key that does not exist.
    NotFound(ItemKey),
    /// Persisted row cannot be decoded.
    InvalidData(String),
    /// Any other backend failure.
    Db(DbError),
}

impl StoreError {
    /// Returns whether the failure is the transient overload signal.
    pub fn is_throughput_exceeded(&self) -> bool {
        matches!(self, Self::ThroughputExceeded(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connectivity(err) => write!(f, "store connectivity failure: {err}"),
            Self::ThroughputExceeded(details) => {
                write!(f, "store throughput exceeded: {details}")
            }
            Self::BatchTooLarge { size, max } => {
                write!(f, "batch of {size} items exceeds store maximum of {max}")
            }
            Self::NotFound(key) => write!(f, "store item not found: {key}"),
            Self::InvalidData(message) => write!(f, "invalid stored item: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connectivity(err) | Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        match value.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
                Self::ThroughputExceeded(value.to_string())
            }
            _ => Self::Db(DbError::Sqlite(value)),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Sorted key-value store with one grouping index.
///
/// Every method is a single request against the backend; callers compose
/// them without holding shared in-memory state.
pub trait KeyValueStore {
    /// Point lookup by primary key.
    fn get(&self, key: &ItemKey) -> StoreResult<Option<StoreItem>>;
    /// Items of one partition whose sort key starts with `sk_prefix`,
    /// ordered by sort key.
    fn query_partition(&self, pk: &str, sk_prefix: &str) -> StoreResult<Vec<StoreItem>>;
    /// Items of one index group whose index sort key starts with
    /// `sort_prefix`, ordered by index sort key.
    fn query_index(&self, group: &str, sort_prefix: &str) -> StoreResult<Vec<StoreItem>>;
    /// Full scan keeping items that match `filter`.
    fn scan(&self, filter: &ScanFilter) -> StoreResult<Vec<StoreItem>>;
    /// Unconditional insert-or-replace of one item.
    fn put(&self, item: &StoreItem) -> StoreResult<()>;
    /// Merges `patch` into the attributes of an existing item.
    fn update(&self, key: &ItemKey, patch: Attributes) -> StoreResult<()>;
    /// Writes up to `MAX_BATCH_WRITE_ITEMS` items.
    fn batch_put(&self, items: &[StoreItem]) -> StoreResult<BatchWriteOutcome>;
}
