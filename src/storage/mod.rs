// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistence for the proxy: an embedded redb key-value store for
//! authorizations, OAuth profiles and account info, and a directory-backed
//! blob store for prekey uploads.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   proxy.redb                    # key-value store
//!     {AUTHORIZATION_TABLE}_{id}  # (userAddress|platform) -> AuthorizationRecord
//!     {TWITTER_OAUTH_TABLE}       # screen_name -> Twitter profile
//!     {ACCOUNT_TABLE}             # (email|userAddress) -> AccountInfo
//!   {PREKEYS_BUCKET}/
//!     {networkID}/{publicKeyHex}  # raw signed prekey upload
//! ```

pub mod accounts;
pub mod authorizations;
pub mod blob;
pub mod database;
pub mod profiles;

pub use accounts::{AccountInfo, AccountTable};
pub use authorizations::{AuthorizationRecord, AuthorizationTable, TableRegistry};
pub use blob::{BlobError, BlobResult, BlobStore};
pub use database::{KvStore, StoreError, StoreResult};
pub use profiles::ProfileTable;
