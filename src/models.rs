// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures used by the REST API, plus the small
//! domain types shared between the HTTP layer, the services and storage.
//!
//! JSON field names follow the wire format existing clients already use
//! (`userAddress`, `proofURL`, `platformName`, ...), so most fields carry an
//! explicit `serde(rename)`.
//!
//! ## Model Categories
//!
//! - **Platforms & claims**: which social platform a proof refers to
//! - **Users**: aggregated user records returned by `/users`
//! - **Prekeys**: signed prekey uploads
//! - **Account info**: contact details submitted by wallet owners

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::providers::twitter::TwitterUser;
use crate::storage::AuthorizationRecord;

// =============================================================================
// Platforms & Claims
// =============================================================================

/// Social platform a chain address can be linked to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlatformName {
    Twitter,
    Facebook,
    Github,
}

impl PlatformName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformName::Twitter => "twitter",
            PlatformName::Facebook => "facebook",
            PlatformName::Github => "github",
        }
    }
}

impl fmt::Display for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(username, proofURL)` pair asserting ownership of a social account.
///
/// Either supplied by the client (private networks) or returned by the
/// social-proof lookup function. Never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SocialProofClaim {
    #[serde(default)]
    pub username: String,
    #[serde(rename = "proofURL", default)]
    pub proof_url: String,
}

// =============================================================================
// User Models
// =============================================================================

/// Public projection of a stored Twitter profile.
///
/// Only the fields listed here are ever serialized back to API clients;
/// email, numeric IDs, entities and the latest status stay server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TwitterProfileView {
    pub screen_name: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url_https: Option<String>,
    pub followers_count: u64,
    pub friends_count: u64,
    pub statuses_count: u64,
    pub verified: bool,
}

impl From<&TwitterUser> for TwitterProfileView {
    fn from(user: &TwitterUser) -> Self {
        Self {
            screen_name: user.screen_name.clone(),
            name: user.name.clone(),
            description: user.description.clone(),
            location: user.location.clone(),
            url: user.url.clone(),
            profile_image_url_https: user.profile_image_url_https.clone(),
            followers_count: user.followers_count,
            friends_count: user.friends_count,
            statuses_count: user.statuses_count,
            verified: user.verified,
        }
    }
}

/// Verified user record enriched with platform profile data.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserInfo {
    /// Chain address that owns the social identity.
    #[serde(rename = "userAddress")]
    pub user_address: String,
    /// Username on the linked platform.
    pub username: String,
    #[serde(rename = "platformName")]
    pub platform_name: PlatformName,
    /// Twitter profile, `null` when no OAuth profile is stored.
    #[serde(rename = "twitterOAuthInfo")]
    pub twitter_oauth_info: Option<TwitterProfileView>,
    /// MD5 of the profile email, for Gravatar lookups.
    #[serde(rename = "gravatarHash")]
    pub gravatar_hash: String,
    #[serde(rename = "proofURL")]
    pub proof_url: String,
    pub verified: bool,
    pub verified_at: DateTime<Utc>,
}

impl From<AuthorizationRecord> for UserInfo {
    fn from(record: AuthorizationRecord) -> Self {
        Self {
            user_address: record.user_address,
            username: record.username,
            platform_name: record.platform_name,
            twitter_oauth_info: None,
            gravatar_hash: String::new(),
            proof_url: record.proof_url,
            verified: record.verified,
            verified_at: record.verified_at,
        }
    }
}

// =============================================================================
// Prekey Models
// =============================================================================

/// Body of `PUT /prekeys`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PutPrekeysRequest {
    /// Standard base64 Ed25519 signature over `prekeys`.
    pub signature: String,
    /// Opaque prekey bundle, signed as UTF-8 bytes.
    pub prekeys: String,
}

// =============================================================================
// Account Info Models
// =============================================================================

/// Body of `PUT /account-info`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountInfoRequest {
    #[serde(rename = "userAddress", default)]
    pub user_address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    /// Message the owner signed with `personal_sign`.
    #[serde(default)]
    pub msg: Option<String>,
    /// Hex `personal_sign` signature of `msg`.
    #[serde(default)]
    pub sig: Option<String>,
}
