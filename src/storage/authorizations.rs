// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-network authorization tables.
//!
//! Each chain network gets its own table, `{prefix}_{networkID}`, holding one
//! [`AuthorizationRecord`] per `(userAddress, platformName)` pair. Table
//! handles are created lazily by the [`TableRegistry`] and cached for the
//! lifetime of the process.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::database::{composite_key, leading_range, KvStore, StoreError, StoreResult};
use crate::models::PlatformName;
use crate::network::NetworkId;

/// Proof that a chain address controls a social platform account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizationRecord {
    #[serde(rename = "userAddress")]
    pub user_address: String,
    #[serde(rename = "platformName")]
    pub platform_name: PlatformName,
    pub username: String,
    #[serde(rename = "proofURL")]
    pub proof_url: String,
    pub verified: bool,
    pub verified_at: DateTime<Utc>,
}

impl AuthorizationRecord {
    fn key(&self) -> String {
        composite_key(&[self.user_address.as_str(), self.platform_name.as_str()])
    }
}

/// Authorization table of a single network.
pub struct AuthorizationTable {
    store: KvStore,
    name: String,
    network: NetworkId,
}

impl AuthorizationTable {
    fn open(store: KvStore, prefix: &str, network: NetworkId) -> StoreResult<Self> {
        let name = format!("{prefix}_{network}");
        store.ensure_table(&name)?;
        Ok(Self {
            store,
            name,
            network,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Insert or overwrite the record for `(user_address, platform_name)`.
    pub fn put(&self, record: &AuthorizationRecord) -> StoreResult<()> {
        self.store.put_json(&self.name, &record.key(), record)
    }

    pub fn get(
        &self,
        user_address: &str,
        platform: PlatformName,
    ) -> StoreResult<Option<AuthorizationRecord>> {
        let key = composite_key(&[user_address, platform.as_str()]);
        self.store.get_json(&self.name, &key)
    }

    /// All records owned by an address, one per platform.
    pub fn by_user_address(&self, user_address: &str) -> StoreResult<Vec<AuthorizationRecord>> {
        let (start, end) = leading_range(user_address);
        self.store.scan_json(
            &self.name,
            Some((start.as_str(), end.as_str())),
            |_: &AuthorizationRecord| true,
            None,
        )
    }

    /// Full scan for an exact username match.
    pub fn scan_username(&self, username: &str) -> StoreResult<Vec<AuthorizationRecord>> {
        self.store.scan_json(
            &self.name,
            None,
            |record: &AuthorizationRecord| record.username == username,
            None,
        )
    }

    /// Full scan for usernames starting with `prefix`, keeping at most
    /// `limit` records.
    pub fn scan_username_prefix(
        &self,
        prefix: &str,
        limit: usize,
    ) -> StoreResult<Vec<AuthorizationRecord>> {
        self.store.scan_json(
            &self.name,
            None,
            |record: &AuthorizationRecord| record.username.starts_with(prefix),
            Some(limit),
        )
    }
}

/// Lazily populated cache of per-network table handles.
///
/// Handles are created on first use and never evicted.
pub struct TableRegistry {
    store: KvStore,
    prefix: String,
    tables: RwLock<HashMap<NetworkId, Arc<AuthorizationTable>>>,
}

impl TableRegistry {
    pub fn new(store: KvStore, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Get the table for a network, creating it on first access.
    pub fn table(&self, network: NetworkId) -> StoreResult<Arc<AuthorizationTable>> {
        {
            let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
            if let Some(table) = tables.get(&network) {
                return Ok(Arc::clone(table));
            }
        }

        let created = Arc::new(AuthorizationTable::open(
            self.store.clone(),
            &self.prefix,
            network,
        )?);

        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let table = tables.entry(network).or_insert_with(|| {
            info!(network = %network, table = %created.name, "Opened authorization table");
            Arc::clone(&created)
        });
        Ok(Arc::clone(table))
    }

    /// Number of networks with an open table handle.
    pub fn cached_networks(&self) -> usize {
        self.tables.read().map(|tables| tables.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_registry() -> (TableRegistry, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(&dir.path().join("kv.redb")).unwrap();
        (TableRegistry::new(store, "authorizations"), dir)
    }

    fn record(address: &str, platform: PlatformName, username: &str) -> AuthorizationRecord {
        AuthorizationRecord {
            user_address: address.to_string(),
            platform_name: platform,
            username: username.to_string(),
            proof_url: format!("https://twitter.com/{username}/status/1"),
            verified: true,
            verified_at: Utc::now(),
        }
    }

    #[test]
    fn registry_reuses_handles_per_network() {
        let (registry, _dir) = temp_registry();

        let first = registry.table(NetworkId(1)).unwrap();
        let again = registry.table(NetworkId(1)).unwrap();
        let other = registry.table(NetworkId(1337)).unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.name(), "authorizations_1");
        assert_eq!(other.name(), "authorizations_1337");
        assert_eq!(registry.cached_networks(), 2);
    }

    #[test]
    fn networks_are_partitioned() {
        let (registry, _dir) = temp_registry();
        let mainnet = registry.table(NetworkId(1)).unwrap();
        let private = registry.table(NetworkId(1337)).unwrap();

        mainnet
            .put(&record("0xabc", PlatformName::Twitter, "alice"))
            .unwrap();

        assert_eq!(mainnet.by_user_address("0xabc").unwrap().len(), 1);
        assert!(private.by_user_address("0xabc").unwrap().is_empty());
    }

    #[test]
    fn put_overwrites_same_address_and_platform() {
        let (registry, _dir) = temp_registry();
        let table = registry.table(NetworkId(1)).unwrap();

        table
            .put(&record("0xabc", PlatformName::Twitter, "alice"))
            .unwrap();
        table
            .put(&record("0xabc", PlatformName::Twitter, "alice2"))
            .unwrap();
        table
            .put(&record("0xabc", PlatformName::Github, "alice-gh"))
            .unwrap();

        let records = table.by_user_address("0xabc").unwrap();
        assert_eq!(records.len(), 2);
        let twitter = table
            .get("0xabc", PlatformName::Twitter)
            .unwrap()
            .unwrap();
        assert_eq!(twitter.username, "alice2");
    }

    #[test]
    fn username_scans() {
        let (registry, _dir) = temp_registry();
        let table = registry.table(NetworkId(1)).unwrap();
        for (address, username) in [
            ("0x1", "alice"),
            ("0x2", "alfred"),
            ("0x3", "albert"),
            ("0x4", "bob"),
        ] {
            table
                .put(&record(address, PlatformName::Twitter, username))
                .unwrap();
        }

        let exact = table.scan_username("bob").unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].user_address, "0x4");

        let prefixed = table.scan_username_prefix("al", 10).unwrap();
        assert_eq!(prefixed.len(), 3);
        assert!(prefixed.iter().all(|r| r.username.starts_with("al")));

        let limited = table.scan_username_prefix("al", 2).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn address_lookup_ignores_addresses_with_embedded_separator() {
        let (registry, _dir) = temp_registry();
        let table = registry.table(NetworkId(1337)).unwrap();

        table
            .put(&record("0xab", PlatformName::Twitter, "alice"))
            .unwrap();
        table
            .put(&record("0xab|evil", PlatformName::Twitter, "mallory"))
            .unwrap();

        let owners: Vec<String> = table
            .by_user_address("0xab")
            .unwrap()
            .into_iter()
            .map(|r| r.user_address)
            .collect();
        assert_eq!(owners, vec!["0xab"]);
    }
}
