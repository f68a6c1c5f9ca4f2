// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outbound integrations: the Twitter OAuth 1.0a handshake and the
//! social-proof lookup service.
//!
//! Both sit behind traits so the services can be exercised with in-process
//! fakes.

pub mod lookup;
pub mod oauth1;
pub mod twitter;

use async_trait::async_trait;

use crate::models::{PlatformName, SocialProofClaim};
use twitter::TwitterUser;

pub use lookup::HttpProofLookup;
pub use twitter::TwitterOAuthClient;

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("OAuth signing failed: {0}")]
    Signing(String),

    #[error("OAuth request failed: {0}")]
    Request(String),

    #[error("OAuth provider rejected the request: {0}")]
    Rejected(String),

    #[error("OAuth response was invalid: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("proof lookup unavailable: {0}")]
    Unavailable(String),

    #[error("proof lookup timed out")]
    Timeout,
}

/// Three-legged OAuth 1.0a login against Twitter.
#[async_trait]
pub trait OAuthHandshake: Send + Sync {
    /// Obtain a request token and return the URL the user should visit.
    async fn login_url(&self) -> Result<String, OAuthError>;

    /// Exchange the callback's token and verifier for an access token and
    /// fetch the authenticated user's profile.
    async fn exchange_callback(
        &self,
        oauth_token: &str,
        oauth_verifier: &str,
    ) -> Result<TwitterUser, OAuthError>;
}

/// Resolves the most recent social-proof claim published by a wallet owner.
#[async_trait]
pub trait SocialProofLookup: Send + Sync {
    async fn last_proof(
        &self,
        owner_address: &str,
        platform: PlatformName,
    ) -> Result<SocialProofClaim, LookupError>;
}
