// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process fakes and a throwaway [`AppState`] for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{PlatformName, SocialProofClaim};
use crate::providers::twitter::TwitterUser;
use crate::providers::{LookupError, OAuthError, OAuthHandshake, SocialProofLookup};
use crate::state::{AppState, StorageNames};
use crate::storage::KvStore;

pub const FAKE_LOGIN_URL: &str = "https://api.twitter.com/oauth/authorize?oauth_token=fake";

/// Scripted lookup reply.
#[derive(Debug, Clone)]
pub enum LookupReply {
    Claim(SocialProofClaim),
    Unavailable,
    Timeout,
}

pub struct FakeLookup {
    reply: LookupReply,
    calls: AtomicUsize,
}

impl FakeLookup {
    pub fn new(reply: LookupReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn claim(username: &str, proof_url: &str) -> Arc<Self> {
        Self::new(LookupReply::Claim(SocialProofClaim {
            username: username.to_string(),
            proof_url: proof_url.to_string(),
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SocialProofLookup for FakeLookup {
    async fn last_proof(
        &self,
        _owner_address: &str,
        _platform: PlatformName,
    ) -> Result<SocialProofClaim, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            LookupReply::Claim(claim) => Ok(claim.clone()),
            LookupReply::Unavailable => Err(LookupError::Unavailable("fake outage".into())),
            LookupReply::Timeout => Err(LookupError::Timeout),
        }
    }
}

/// Handshake that always yields `user`, or rejects when `user` is `None`.
pub struct FakeOAuth {
    user: Option<TwitterUser>,
}

impl FakeOAuth {
    pub fn returning(user: TwitterUser) -> Arc<Self> {
        Arc::new(Self { user: Some(user) })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self { user: None })
    }
}

#[async_trait]
impl OAuthHandshake for FakeOAuth {
    async fn login_url(&self) -> Result<String, OAuthError> {
        match self.user {
            Some(_) => Ok(FAKE_LOGIN_URL.to_string()),
            None => Err(OAuthError::Rejected("request token refused".into())),
        }
    }

    async fn exchange_callback(
        &self,
        _oauth_token: &str,
        _oauth_verifier: &str,
    ) -> Result<TwitterUser, OAuthError> {
        self.user
            .clone()
            .ok_or_else(|| OAuthError::Rejected("invalid verifier".into()))
    }
}

pub fn twitter_user(screen_name: &str, email: Option<&str>) -> TwitterUser {
    let mut value = serde_json::json!({
        "id": 1001,
        "id_str": "1001",
        "screen_name": screen_name,
        "name": screen_name.to_uppercase(),
        "followers_count": 12,
        "protected": false
    });
    if let Some(email) = email {
        value["email"] = serde_json::Value::String(email.to_string());
    }
    serde_json::from_value(value).unwrap()
}

/// State backed by a fresh temp directory. Keep the `TempDir` alive for the
/// duration of the test.
pub fn test_state_with(
    oauth: Arc<dyn OAuthHandshake>,
    lookup: Arc<dyn SocialProofLookup>,
) -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = KvStore::open(&dir.path().join("proxy.redb")).unwrap();
    let state = AppState::new(
        dir.path(),
        store,
        StorageNames {
            authorization_prefix: "authorizations",
            twitter_oauth_table: "twitter_oauth",
            account_table: "account_info",
            prekeys_bucket: "prekeys",
        },
        oauth,
        lookup,
    )
    .unwrap();
    (state, dir)
}

pub fn test_state() -> (AppState, tempfile::TempDir) {
    test_state_with(
        FakeOAuth::returning(twitter_user("alice", Some("alice@example.com"))),
        FakeLookup::new(LookupReply::Unavailable),
    )
}
