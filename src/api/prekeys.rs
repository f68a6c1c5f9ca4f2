// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::extract::Network;
use crate::{error::ApiError, models::PutPrekeysRequest, services, state::AppState};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PrekeysQuery {
    /// Hex-encoded Ed25519 public key (32 bytes).
    #[serde(rename = "publicKey", default)]
    pub public_key: String,
}

/// Store a signed prekey bundle.
///
/// The raw body is kept as uploaded so clients can re-verify it later.
#[utoipa::path(
    put,
    path = "/prekeys",
    params(
        PrekeysQuery,
        ("networkID" = u64, Query, description = "Chain network ID")
    ),
    request_body = PutPrekeysRequest,
    tag = "Prekeys",
    responses(
        (status = 201, description = "Prekeys stored"),
        (status = 400, description = "Malformed body, key or signature")
    )
)]
pub async fn put_prekeys(
    State(state): State<AppState>,
    Network(network): Network,
    Query(params): Query<PrekeysQuery>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    services::prekeys::put_prekeys(&state, &params.public_key, network, &body)?;
    Ok(StatusCode::CREATED)
}
