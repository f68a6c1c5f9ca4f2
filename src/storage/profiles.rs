// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Twitter OAuth profile table, keyed by `screen_name`.
//!
//! Profiles are written when an OAuth callback completes and read during
//! verification and user aggregation. The full profile returned by Twitter is
//! stored; projection to public fields happens at the API boundary.

use std::collections::HashMap;

use super::database::{KvStore, StoreResult};
use crate::providers::twitter::TwitterUser;

pub struct ProfileTable {
    store: KvStore,
    name: String,
}

impl ProfileTable {
    pub fn open(store: KvStore, name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        store.ensure_table(&name)?;
        Ok(Self { store, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, screen_name: &str) -> StoreResult<Option<TwitterUser>> {
        self.store.get_json(&self.name, screen_name)
    }

    /// Insert or overwrite the profile stored under its screen name.
    pub fn put(&self, user: &TwitterUser) -> StoreResult<()> {
        self.store.put_json(&self.name, &user.screen_name, user)
    }

    /// Fetch several profiles at once, keyed by screen name.
    /// Screen names without a stored profile are absent from the map.
    pub fn batch_get(&self, screen_names: &[String]) -> StoreResult<HashMap<String, TwitterUser>> {
        if screen_names.is_empty() {
            return Ok(HashMap::new());
        }
        let found = self.store.get_many_json(&self.name, screen_names)?;
        Ok(found.into_iter().collect())
    }
}
