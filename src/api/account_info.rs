// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::ApiError,
    models::AccountInfoRequest,
    services,
    state::AppState,
    storage::AccountInfo,
};

#[utoipa::path(
    put,
    path = "/account-info",
    request_body = AccountInfoRequest,
    tag = "Accounts",
    responses(
        (status = 201, body = AccountInfo),
        (status = 400, description = "Email missing")
    )
)]
pub async fn put_account_info(
    State(state): State<AppState>,
    Json(request): Json<AccountInfoRequest>,
) -> Result<(StatusCode, Json<AccountInfo>), ApiError> {
    let account = services::account_info::put_account_info(&state, request)?;
    Ok((StatusCode::CREATED, Json(account)))
}
