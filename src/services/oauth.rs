// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Twitter login entry points.

use tracing::info;

use crate::error::ProxyError;
use crate::models::TwitterProfileView;
use crate::state::AppState;

pub async fn login_url(state: &AppState) -> Result<String, ProxyError> {
    Ok(state.oauth.login_url().await?)
}

/// Complete the handshake and persist the caller's profile.
pub async fn handle_callback(
    state: &AppState,
    oauth_token: Option<&str>,
    oauth_verifier: Option<&str>,
) -> Result<TwitterProfileView, ProxyError> {
    let oauth_token = required(oauth_token, "oauth_token")?;
    let oauth_verifier = required(oauth_verifier, "oauth_verifier")?;

    let user = state
        .oauth
        .exchange_callback(oauth_token, oauth_verifier)
        .await?;
    state.profiles.put(&user)?;

    info!(screen_name = %user.screen_name, "Stored Twitter profile");
    Ok(TwitterProfileView::from(&user))
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ProxyError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ProxyError::validation(format!("{name} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        test_state, test_state_with, FakeLookup, FakeOAuth, LookupReply, FAKE_LOGIN_URL,
    };

    #[tokio::test]
    async fn login_url_comes_from_handshake() {
        let (state, _dir) = test_state();
        assert_eq!(login_url(&state).await.unwrap(), FAKE_LOGIN_URL);
    }

    #[tokio::test]
    async fn callback_persists_full_profile() {
        let (state, _dir) = test_state();

        let view = handle_callback(&state, Some("token"), Some("verifier"))
            .await
            .unwrap();
        assert_eq!(view.screen_name, "alice");

        let stored = state.profiles.get("alice").unwrap().unwrap();
        assert_eq!(stored.email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn callback_requires_both_parameters() {
        let (state, _dir) = test_state();

        let err = handle_callback(&state, None, Some("verifier")).await.unwrap_err();
        assert!(matches!(err, ProxyError::Validation(ref m) if m == "oauth_token is required"));

        let err = handle_callback(&state, Some("token"), Some(" ")).await.unwrap_err();
        assert!(matches!(err, ProxyError::Validation(_)));
    }

    #[tokio::test]
    async fn rejected_exchange_is_an_oauth_error() {
        let (state, _dir) = test_state_with(
            FakeOAuth::rejecting(),
            FakeLookup::new(LookupReply::Unavailable),
        );

        let err = handle_callback(&state, Some("token"), Some("verifier"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::OAuth(_)));
        assert!(state.profiles.get("alice").unwrap().is_none());
    }
}
