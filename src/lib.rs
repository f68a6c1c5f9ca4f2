// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Keymesh OAuth Proxy - Social-proof verification service
//!
//! Issues Twitter OAuth1 login URLs, stores the resulting profiles, and links
//! chain addresses to verified social identities, partitioned by chain
//! network. Also accepts signed prekey uploads and account contact details.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `services` - Verification, user aggregation, prekeys and account info
//! - `providers` - Twitter OAuth1 client and social-proof lookup client
//! - `storage` - redb key-value store and directory-backed blob store
//! - `network` - Chain network IDs and public/private classification

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod providers;
pub mod services;
pub mod state;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
