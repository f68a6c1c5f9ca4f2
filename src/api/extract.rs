// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Extractor for the `networkID` query parameter.
//!
//! ```rust,ignore
//! async fn handler(Network(network): Network) -> impl IntoResponse {
//!     // network is a NetworkId
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;
use crate::network::NetworkId;

pub const NETWORK_ID_PARAM: &str = "networkID";

/// Required, numeric `networkID` query parameter.
///
/// Missing or non-numeric values are rejected with 400 before the handler
/// runs.
#[derive(Debug, Clone, Copy)]
pub struct Network(pub NetworkId);

impl<S> FromRequestParts<S> for Network
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let raw = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == NETWORK_ID_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request(format!("{NETWORK_ID_PARAM} is required")))?;

        raw.parse::<NetworkId>()
            .map(Network)
            .map_err(|_| ApiError::bad_request(format!("{NETWORK_ID_PARAM} must be numeric")))
    }
}
