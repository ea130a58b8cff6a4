//! SQLite-backed single-table store.
//!
//! # Responsibility
//! - Map the key-value surface onto the `items` table.
//! - Keep SQL details behind `KeyValueStore`.
//!
//! # Invariants
//! - Prefix matching compares leading substrings; `LIKE` is never used
//!   because item ids contain `_`.
//! - `update` and `batch_put` each run in one `BEGIN IMMEDIATE` transaction,
//!   so the write lock is taken (waiting out the busy timeout) before the
//!   current row is read.

use super::{
    Attributes, BatchWriteOutcome, IndexKey, ItemKey, KeyValueStore, ScanFilter, StoreError,
    StoreItem, StoreResult, MAX_BATCH_WRITE_ITEMS,
};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use serde_json::Value;
use std::path::Path;

const ITEM_SELECT_SQL: &str = "SELECT pk, sk, gsi1pk, gsi1sk, attributes FROM items";

const ITEM_UPSERT_SQL: &str = "INSERT INTO items (pk, sk, gsi1pk, gsi1sk, attributes)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT (pk, sk) DO UPDATE SET
        gsi1pk = excluded.gsi1pk,
        gsi1sk = excluded.gsi1sk,
        attributes = excluded.attributes;";

/// `KeyValueStore` over one migrated SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens the store file. Failure is a connectivity error.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        open_db(path)
            .map(Self::new)
            .map_err(StoreError::Connectivity)
    }

    /// Opens an empty in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        open_db_in_memory()
            .map(Self::new)
            .map_err(StoreError::Connectivity)
    }

    /// Raw connection access for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns the number of stored rows.
    pub fn item_count(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    fn write_transaction(&self) -> StoreResult<Transaction<'_>> {
        Ok(Transaction::new_unchecked(
            &self.conn,
            TransactionBehavior::Immediate,
        )?)
    }

    fn collect(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> StoreResult<Vec<StoreItem>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }
        Ok(items)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &ItemKey) -> StoreResult<Option<StoreItem>> {
        let mut items = self.collect(
            &format!("{ITEM_SELECT_SQL} WHERE pk = ?1 AND sk = ?2;"),
            &[&key.pk, &key.sk],
        )?;
        Ok(items.pop())
    }

    fn query_partition(&self, pk: &str, sk_prefix: &str) -> StoreResult<Vec<StoreItem>> {
        self.collect(
            &format!(
                "{ITEM_SELECT_SQL}
                 WHERE pk = ?1
                   AND substr(sk, 1, length(?2)) = ?2
                 ORDER BY sk ASC;"
            ),
            &[&pk, &sk_prefix],
        )
    }

    fn query_index(&self, group: &str, sort_prefix: &str) -> StoreResult<Vec<StoreItem>> {
        self.collect(
            &format!(
                "{ITEM_SELECT_SQL}
                 WHERE gsi1pk = ?1
                   AND substr(gsi1sk, 1, length(?2)) = ?2
                 ORDER BY gsi1sk ASC, pk ASC;"
            ),
            &[&group, &sort_prefix],
        )
    }

    fn scan(&self, filter: &ScanFilter) -> StoreResult<Vec<StoreItem>> {
        let items = self.collect(
            &format!(
                "{ITEM_SELECT_SQL}
                 WHERE (?1 IS NULL OR sk = ?1)
                 ORDER BY pk ASC, sk ASC;"
            ),
            &[&filter.sort_key_equals],
        )?;
        Ok(items.into_iter().filter(|item| filter.matches(item)).collect())
    }

    fn put(&self, item: &StoreItem) -> StoreResult<()> {
        upsert(&self.conn, item)
    }

    fn update(&self, key: &ItemKey, patch: Attributes) -> StoreResult<()> {
        let tx = self.write_transaction()?;

        let current: Option<String> = tx
            .query_row(
                "SELECT attributes FROM items WHERE pk = ?1 AND sk = ?2;",
                params![key.pk, key.sk],
                |row| row.get(0),
            )
            .optional()?;
        let Some(current) = current else {
            return Err(StoreError::NotFound(key.clone()));
        };

        let mut attributes = parse_attributes(&current)?;
        attributes.extend(patch);

        tx.execute(
            "UPDATE items SET attributes = ?3 WHERE pk = ?1 AND sk = ?2;",
            params![key.pk, key.sk, Value::Object(attributes).to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn batch_put(&self, items: &[StoreItem]) -> StoreResult<BatchWriteOutcome> {
        if items.len() > MAX_BATCH_WRITE_ITEMS {
            return Err(StoreError::BatchTooLarge {
                size: items.len(),
                max: MAX_BATCH_WRITE_ITEMS,
            });
        }

        let tx = self.write_transaction()?;
        for item in items {
            upsert(&tx, item)?;
        }
        tx.commit()?;

        Ok(BatchWriteOutcome::default())
    }
}

fn upsert(conn: &Connection, item: &StoreItem) -> StoreResult<()> {
    let (group, sort) = match &item.index {
        Some(index) => (Some(index.group.as_str()), Some(index.sort.as_str())),
        None => (None, None),
    };
    conn.execute(
        ITEM_UPSERT_SQL,
        params![
            item.key.pk,
            item.key.sk,
            group,
            sort,
            Value::Object(item.attributes.clone()).to_string(),
        ],
    )?;
    Ok(())
}

fn parse_item_row(row: &Row<'_>) -> StoreResult<StoreItem> {
    let key = ItemKey::new(row.get::<_, String>("pk")?, row.get::<_, String>("sk")?);
    let index = match (
        row.get::<_, Option<String>>("gsi1pk")?,
        row.get::<_, Option<String>>("gsi1sk")?,
    ) {
        (Some(group), Some(sort)) => Some(IndexKey::new(group, sort)),
        (None, None) => None,
        _ => {
            return Err(StoreError::InvalidData(format!(
                "half-populated index key on item {key}"
            )));
        }
    };
    let raw: String = row.get("attributes")?;
    let attributes = parse_attributes(&raw)?;

    Ok(StoreItem {
        key,
        index,
        attributes,
    })
}

fn parse_attributes(raw: &str) -> StoreResult<Attributes> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidData(format!(
            "attributes must be a JSON object, got `{other}`"
        ))),
    }
}
