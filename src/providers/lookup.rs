// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the social-proof lookup function.
//!
//! The function receives `{"userAddress": ..., "platform": ...}` and answers
//! with the owner's most recent `{"username": ..., "proofURL": ...}` claim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{LookupError, SocialProofLookup};
use crate::models::{PlatformName, SocialProofClaim};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct LastProofRequest<'a> {
    #[serde(rename = "userAddress")]
    user_address: &'a str,
    platform: PlatformName,
}

#[derive(Debug, Clone)]
pub struct HttpProofLookup {
    endpoint: String,
    http: Client,
}

impl HttpProofLookup {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .map_err(|e| LookupError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn map_transport_error(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl SocialProofLookup for HttpProofLookup {
    async fn last_proof(
        &self,
        owner_address: &str,
        platform: PlatformName,
    ) -> Result<SocialProofClaim, LookupError> {
        let payload = LastProofRequest {
            user_address: owner_address,
            platform,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Unavailable(format!(
                "lookup returned {status}: {body}"
            )));
        }

        let claim: SocialProofClaim = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout
            } else {
                LookupError::Unavailable(format!("invalid lookup response: {e}"))
            }
        })?;

        if claim.username.trim().is_empty() {
            return Err(LookupError::Unavailable(format!(
                "no {platform} proof on record for {owner_address}"
            )));
        }

        debug!(
            owner_address = %owner_address,
            platform = %platform,
            username = %claim.username,
            "Resolved social proof"
        );
        Ok(claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_wire_names() {
        let body = serde_json::to_value(LastProofRequest {
            user_address: "0xabc",
            platform: PlatformName::Twitter,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"userAddress": "0xabc", "platform": "twitter"})
        );
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        // Port 9 on loopback refuses connections on any sane host.
        let lookup = HttpProofLookup::new("http://127.0.0.1:9/lookup").unwrap();
        let result = lookup.last_proof("0xabc", PlatformName::Twitter).await;
        assert!(matches!(result, Err(LookupError::Unavailable(_))));
    }
}
