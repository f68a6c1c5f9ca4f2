// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::extract::Network;
use crate::{
    error::ApiError,
    models::TwitterProfileView,
    services::{self, VerifyRequest},
    state::AppState,
};

/// Body returned by a successful verification.
pub const VERIFIED_BODY: &str = "verified";

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    pub oauth_token: Option<String>,
    pub oauth_verifier: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyQuery {
    /// Chain address being linked.
    #[serde(rename = "userAddress", default)]
    pub user_address: String,
    pub username: Option<String>,
    #[serde(rename = "proofURL")]
    pub proof_url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/oauth/twitter/authorize_url",
    tag = "OAuth",
    responses(
        (status = 200, description = "Twitter login URL", body = String),
        (status = 401, description = "Request token refused")
    )
)]
pub async fn authorize_url(State(state): State<AppState>) -> Result<String, ApiError> {
    Ok(services::oauth::login_url(&state).await?)
}

#[utoipa::path(
    get,
    path = "/oauth/twitter/callback",
    params(CallbackQuery),
    tag = "OAuth",
    responses(
        (status = 200, body = TwitterProfileView),
        (status = 400, description = "Missing oauth_token or oauth_verifier"),
        (status = 401, description = "Token exchange failed")
    )
)]
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackQuery>,
) -> Result<Json<TwitterProfileView>, ApiError> {
    let profile = services::oauth::handle_callback(
        &state,
        params.oauth_token.as_deref(),
        params.oauth_verifier.as_deref(),
    )
    .await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/oauth/twitter/verify",
    params(
        VerifyQuery,
        ("networkID" = u64, Query, description = "Chain network ID; private networks accept username/proofURL")
    ),
    tag = "OAuth",
    responses(
        (status = 200, description = "Address linked", body = String),
        (status = 400, description = "Missing userAddress or networkID"),
        (status = 502, description = "Proof lookup failed")
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    Network(network): Network,
    Query(params): Query<VerifyQuery>,
) -> Result<&'static str, ApiError> {
    services::verify(
        &state,
        VerifyRequest {
            user_address: params.user_address,
            network,
            username: params.username,
            proof_url: params.proof_url,
        },
    )
    .await?;
    Ok(VERIFIED_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkId;
    use crate::test_support::{test_state, FAKE_LOGIN_URL};
    use axum::http::StatusCode;

    fn verify_query(address: &str, username: Option<&str>, proof_url: Option<&str>) -> VerifyQuery {
        VerifyQuery {
            user_address: address.into(),
            username: username.map(str::to_string),
            proof_url: proof_url.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn authorize_url_returns_login_url() {
        let (state, _dir) = test_state();
        assert_eq!(authorize_url(State(state)).await.unwrap(), FAKE_LOGIN_URL);
    }

    #[tokio::test]
    async fn callback_returns_public_profile() {
        let (state, _dir) = test_state();
        let Json(profile) = callback(
            State(state),
            Query(CallbackQuery {
                oauth_token: Some("t".into()),
                oauth_verifier: Some("v".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(profile.screen_name, "alice");
    }

    #[tokio::test]
    async fn verify_private_network_returns_verified() {
        let (state, _dir) = test_state();
        let body = verify(
            State(state),
            Network(NetworkId(1337)),
            Query(verify_query("0xABC", Some("alice"), Some("http://x"))),
        )
        .await
        .unwrap();
        assert_eq!(body, "verified");
    }

    #[tokio::test]
    async fn verify_surfaces_lookup_failure_as_bad_gateway() {
        let (state, _dir) = test_state();
        let err = verify(
            State(state),
            Network(NetworkId(1)),
            Query(verify_query("0xABC", None, None)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn verify_without_address_is_bad_request() {
        let (state, _dir) = test_state();
        let err = verify(
            State(state),
            Network(NetworkId(1337)),
            Query(verify_query("", None, None)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
