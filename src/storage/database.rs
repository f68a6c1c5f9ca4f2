// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded key-value store backed by redb (pure Rust, ACID).
//!
//! Every logical table maps to one redb table with `&str` keys and JSON
//! values. Composite keys are joined with `|` so that all rows sharing a
//! leading component can be read with a single range scan. Components are
//! escaped first, so a separator only ever appears between components.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("table registry lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Key Helpers
// =============================================================================

/// Escape a key component: `\` becomes `\\` and `|` becomes `\p`.
///
/// The result never contains `|` and the mapping is injective.
fn escape_component(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\p"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Build a composite key `a|b|...` from escaped components.
pub(crate) fn composite_key(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| escape_component(part))
        .collect::<Vec<_>>()
        .join("|")
}

/// Range covering every composite key whose first component is `leading`.
///
/// `}` sorts directly after `|`, so `leading}` is the exclusive upper bound.
pub(crate) fn leading_range(leading: &str) -> (String, String) {
    let leading = escape_component(leading);
    (format!("{leading}|"), format!("{leading}}}"))
}

// =============================================================================
// KvStore
// =============================================================================

/// Shared handle to the embedded database.
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Database>,
}

impl KvStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Create a table if it does not exist yet, so later reads never fail
    /// with a missing-table error.
    pub fn ensure_table(&self, table: &str) -> StoreResult<()> {
        let definition: TableDefinition<&str, &[u8]> = TableDefinition::new(table);
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(definition)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Cheap liveness probe: a read transaction can be started.
    pub fn health_check(&self) -> StoreResult<()> {
        let _ = self.db.begin_read()?;
        Ok(())
    }

    /// Insert or overwrite a single item.
    pub fn put_json<T: Serialize>(&self, table: &str, key: &str, value: &T) -> StoreResult<()> {
        let definition: TableDefinition<&str, &[u8]> = TableDefinition::new(table);
        let json = serde_json::to_vec(value)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(definition)?;
            table.insert(key, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Point lookup.
    pub fn get_json<T: DeserializeOwned>(&self, table: &str, key: &str) -> StoreResult<Option<T>> {
        let definition: TableDefinition<&str, &[u8]> = TableDefinition::new(table);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition)?;
        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Fetch several keys in one read transaction. Missing keys are skipped.
    pub fn get_many_json<T: DeserializeOwned>(
        &self,
        table: &str,
        keys: &[String],
    ) -> StoreResult<Vec<(String, T)>> {
        let definition: TableDefinition<&str, &[u8]> = TableDefinition::new(table);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition)?;

        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = table.get(key.as_str())? {
                found.push((key.clone(), serde_json::from_slice(value.value())?));
            }
        }
        Ok(found)
    }

    /// Scan a table (or a key range of it), keeping items accepted by
    /// `filter`. Stops early once `limit` items were kept.
    pub fn scan_json<T, F>(
        &self,
        table: &str,
        range: Option<(&str, &str)>,
        mut filter: F,
        limit: Option<usize>,
    ) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned,
        F: FnMut(&T) -> bool,
    {
        let definition: TableDefinition<&str, &[u8]> = TableDefinition::new(table);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(definition)?;

        let entries = match range {
            Some((start, end)) => table.range(start..end)?,
            None => table.iter()?,
        };

        let mut items = Vec::new();
        for entry in entries {
            if limit.is_some_and(|max| items.len() >= max) {
                break;
            }
            let (_, value) = entry?;
            let item: T = serde_json::from_slice(value.value())?;
            if filter(&item) {
                items.push(item);
            }
        }
        Ok(items)
    }
}

// =============================================================================
// Tests
// =============================================================================
