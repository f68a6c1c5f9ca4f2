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
    models::UserInfo,
    services::{self, UserFilter, DEFAULT_SEARCH_LIMIT},
    state::AppState,
};

/// Query parameters for `/users`. `username` takes precedence.
#[derive(Debug, Deserialize, IntoParams)]
pub struct UsersQuery {
    pub username: Option<String>,
    #[serde(rename = "userAddress")]
    pub user_address: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    #[serde(rename = "usernamePrefix")]
    pub username_prefix: Option<String>,
    /// Maximum number of results (default 10).
    #[param(value_type = Option<usize>)]
    pub limit: Option<String>,
}

fn parse_limit(raw: Option<String>) -> Result<usize, ApiError> {
    match non_blank(raw) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ApiError::bad_request("limit must be a non-negative integer")),
        None => Ok(DEFAULT_SEARCH_LIMIT),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[utoipa::path(
    get,
    path = "/users",
    params(
        UsersQuery,
        ("networkID" = u64, Query, description = "Chain network ID")
    ),
    tag = "Users",
    responses(
        (status = 200, body = [UserInfo]),
        (status = 400, description = "Neither username nor userAddress given")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Network(network): Network,
    Query(params): Query<UsersQuery>,
) -> Result<Json<Vec<UserInfo>>, ApiError> {
    let filter = match (non_blank(params.username), non_blank(params.user_address)) {
        (Some(username), _) => UserFilter::ByUsername(username),
        (None, Some(address)) => UserFilter::ByAddress(address),
        (None, None) => {
            return Err(ApiError::bad_request(
                "username or userAddress is required",
            ))
        }
    };
    Ok(Json(services::list_users(&state, network, filter).await?))
}

#[utoipa::path(
    get,
    path = "/users/search",
    params(
        SearchQuery,
        ("networkID" = u64, Query, description = "Chain network ID")
    ),
    tag = "Users",
    responses(
        (status = 200, body = [UserInfo]),
        (status = 400, description = "usernamePrefix missing")
    )
)]
pub async fn search_users(
    State(state): State<AppState>,
    Network(network): Network,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<UserInfo>>, ApiError> {
    let prefix = non_blank(params.username_prefix)
        .ok_or_else(|| ApiError::bad_request("usernamePrefix is required"))?;
    let filter = UserFilter::ByUsernamePrefix {
        prefix,
        limit: parse_limit(params.limit)?,
    };
    Ok(Json(services::list_users(&state, network, filter).await?))
}
