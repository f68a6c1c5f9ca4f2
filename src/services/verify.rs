// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Links a chain address to a Twitter identity.
//!
//! The claim comes from the caller on private networks and from the
//! social-proof lookup everywhere else. The claimed username is checked
//! against the stored OAuth profiles before the authorization record is
//! written.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::ProxyError;
use crate::models::{PlatformName, SocialProofClaim};
use crate::network::NetworkId;
use crate::state::AppState;
use crate::storage::AuthorizationRecord;

#[derive(Debug, Clone)]
pub struct VerifyRequest {
    pub user_address: String,
    pub network: NetworkId,
    pub username: Option<String>,
    pub proof_url: Option<String>,
}

impl VerifyRequest {
    /// Caller-asserted claim, present only when both fields are non-blank.
    fn supplied_claim(&self) -> Option<SocialProofClaim> {
        let username = self.username.as_deref().map(str::trim).unwrap_or_default();
        let proof_url = self.proof_url.as_deref().map(str::trim).unwrap_or_default();
        if username.is_empty() || proof_url.is_empty() {
            return None;
        }
        Some(SocialProofClaim {
            username: username.to_string(),
            proof_url: proof_url.to_string(),
        })
    }
}

pub async fn verify(
    state: &AppState,
    request: VerifyRequest,
) -> Result<AuthorizationRecord, ProxyError> {
    let user_address = request.user_address.trim();
    if user_address.is_empty() {
        return Err(ProxyError::validation("userAddress is required"));
    }
    let network = request.network;

    let claim = match request.supplied_claim() {
        Some(claim) if network.is_private() => {
            debug!(network = %network, username = %claim.username, "Using client-supplied proof");
            claim
        }
        supplied => {
            if supplied.is_some() {
                warn!(
                    network = %network,
                    user_address = %user_address,
                    "Ignoring client-supplied proof on public network"
                );
            }
            state
                .lookup
                .last_proof(user_address, PlatformName::Twitter)
                .await?
        }
    };

    let table = state.authorizations.table(network)?;

    if state.profiles.get(&claim.username)?.is_none() {
        warn!(
            username = %claim.username,
            user_address = %user_address,
            "No stored OAuth profile for claimed username"
        );
    }

    // verified_at never moves backwards across repeated verifications.
    let now = Utc::now();
    let verified_at = match table.get(user_address, PlatformName::Twitter)? {
        Some(previous) => previous.verified_at.max(now),
        None => now,
    };

    let record = AuthorizationRecord {
        user_address: user_address.to_string(),
        platform_name: PlatformName::Twitter,
        username: claim.username,
        proof_url: claim.proof_url,
        verified: true,
        verified_at,
    };
    table.put(&record)?;

    info!(
        network = %network,
        user_address = %record.user_address,
        username = %record.username,
        "Authorization verified"
    );
    Ok(record)
}
