// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AccountInfoRequest, PlatformName, PutPrekeysRequest, TwitterProfileView, UserInfo,
    },
    state::AppState,
    storage::AccountInfo,
};

pub mod account_info;
pub mod extract;
pub mod health;
pub mod oauth;
pub mod prekeys;
pub mod users;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/oauth/twitter/authorize_url", get(oauth::authorize_url))
        .route("/oauth/twitter/callback", get(oauth::callback))
        .route(
            "/oauth/twitter/verify",
            get(oauth::verify).put(oauth::verify),
        )
        .route("/users", get(users::list_users))
        .route("/users/search", get(users::search_users))
        .route("/prekeys", put(prekeys::put_prekeys))
        .route("/account-info", put(account_info::put_account_info))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        oauth::authorize_url,
        oauth::callback,
        oauth::verify,
        users::list_users,
        users::search_users,
        prekeys::put_prekeys,
        account_info::put_account_info,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            UserInfo,
            TwitterProfileView,
            PlatformName,
            PutPrekeysRequest,
            AccountInfoRequest,
            AccountInfo,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "OAuth", description = "Twitter login and address verification"),
        (name = "Users", description = "Verified user lookup"),
        (name = "Prekeys", description = "Signed prekey uploads"),
        (name = "Accounts", description = "Account contact details"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
