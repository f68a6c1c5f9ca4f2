// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account info table, keyed by `(email, userAddress)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::database::{composite_key, KvStore, StoreResult};

/// Contact details submitted by a wallet owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AccountInfo {
    #[serde(rename = "userAddress")]
    pub user_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
    /// Whether `sig` recovered to `userAddress`. Recorded, never enforced.
    #[serde(rename = "validSig")]
    pub valid_sig: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub struct AccountTable {
    store: KvStore,
    name: String,
}

impl AccountTable {
    pub fn open(store: KvStore, name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        store.ensure_table(&name)?;
        Ok(Self { store, name })
    }

    pub fn put(&self, info: &AccountInfo) -> StoreResult<()> {
        let key = composite_key(&[info.email.as_str(), info.user_address.as_str()]);
        self.store.put_json(&self.name, &key, info)
    }

    pub fn get(&self, email: &str, user_address: &str) -> StoreResult<Option<AccountInfo>> {
        self.store
            .get_json(&self.name, &composite_key(&[email, user_address]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_by_email_and_address() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(&dir.path().join("kv.redb")).unwrap();
        let accounts = AccountTable::open(store, "account_info").unwrap();

        let info = AccountInfo {
            user_address: "0xabc".into(),
            name: Some("Alice".into()),
            email: "alice@example.com".into(),
            msg: None,
            sig: None,
            valid_sig: false,
            created_at: Utc::now(),
        };
        accounts.put(&info).unwrap();

        assert_eq!(
            accounts.get("alice@example.com", "0xabc").unwrap(),
            Some(info)
        );
        assert!(accounts.get("alice@example.com", "0xdef").unwrap().is_none());
    }

    #[test]
    fn separator_in_email_or_address_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(&dir.path().join("kv.redb")).unwrap();
        let accounts = AccountTable::open(store, "account_info").unwrap();

        let account = |email: &str, address: &str| AccountInfo {
            user_address: address.into(),
            name: None,
            email: email.into(),
            msg: None,
            sig: None,
            valid_sig: false,
            created_at: Utc::now(),
        };
        let first = account("a|b", "c");
        let second = account("a", "b|c");
        accounts.put(&first).unwrap();
        accounts.put(&second).unwrap();

        assert_eq!(accounts.get("a|b", "c").unwrap(), Some(first));
        assert_eq!(accounts.get("a", "b|c").unwrap(), Some(second));
    }
}
