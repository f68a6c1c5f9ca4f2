// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::providers::{
    HttpProofLookup, LookupError, OAuthError, OAuthHandshake, SocialProofLookup,
    TwitterOAuthClient,
};
use crate::storage::{
    AccountTable, BlobError, BlobStore, KvStore, ProfileTable, StoreError, TableRegistry,
};

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to create data directory: {0}")]
    DataDir(#[from] std::io::Error),

    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to open blob bucket: {0}")]
    Blob(#[from] BlobError),

    #[error("failed to build Twitter client: {0}")]
    OAuth(#[from] OAuthError),

    #[error("failed to build lookup client: {0}")]
    Lookup(#[from] LookupError),
}

#[derive(Clone)]
pub struct AppState {
    pub store: KvStore,
    pub authorizations: Arc<TableRegistry>,
    pub profiles: Arc<ProfileTable>,
    pub accounts: Arc<AccountTable>,
    pub prekeys: Arc<BlobStore>,
    pub oauth: Arc<dyn OAuthHandshake>,
    pub lookup: Arc<dyn SocialProofLookup>,
}

/// Table and bucket names the state is opened with.
#[derive(Debug, Clone)]
pub struct StorageNames<'a> {
    pub authorization_prefix: &'a str,
    pub twitter_oauth_table: &'a str,
    pub account_table: &'a str,
    pub prekeys_bucket: &'a str,
}

impl AppState {
    /// Open storage under `data_dir` and wire in the outbound clients.
    pub fn new(
        data_dir: &std::path::Path,
        store: KvStore,
        names: StorageNames<'_>,
        oauth: Arc<dyn OAuthHandshake>,
        lookup: Arc<dyn SocialProofLookup>,
    ) -> Result<Self, InitError> {
        let profiles = ProfileTable::open(store.clone(), names.twitter_oauth_table)?;
        let accounts = AccountTable::open(store.clone(), names.account_table)?;
        let prekeys = BlobStore::open(data_dir, names.prekeys_bucket)?;

        Ok(Self {
            authorizations: Arc::new(TableRegistry::new(
                store.clone(),
                names.authorization_prefix,
            )),
            store,
            profiles: Arc::new(profiles),
            accounts: Arc::new(accounts),
            prekeys: Arc::new(prekeys),
            oauth,
            lookup,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, InitError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let store = KvStore::open(&config.store_path())?;
        info!(path = %config.store_path().display(), "Opened key-value store");

        let oauth = TwitterOAuthClient::new(
            config.twitter.consumer_key.clone(),
            config.twitter.consumer_secret.clone(),
            config.twitter.callback_url.clone(),
            config.twitter.api_base_url.clone(),
        )?;
        let lookup = HttpProofLookup::new(config.proof_lookup_url.clone())?;

        Self::new(
            &config.data_dir,
            store,
            StorageNames {
                authorization_prefix: &config.authorization_table_prefix,
                twitter_oauth_table: &config.twitter_oauth_table,
                account_table: &config.account_table,
                prekeys_bucket: &config.prekeys_bucket,
            },
            Arc::new(oauth),
            Arc::new(lookup),
        )
    }
}
