// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Proxy operations, independent of the HTTP layer.
//!
//! Handlers in `api` parse requests and delegate here; every operation
//! returns [`crate::error::ProxyError`] on failure.

pub mod account_info;
pub mod oauth;
pub mod prekeys;
pub mod users;
pub mod verify;

pub use users::{list_users, UserFilter, DEFAULT_SEARCH_LIMIT};
pub use verify::{verify, VerifyRequest};
