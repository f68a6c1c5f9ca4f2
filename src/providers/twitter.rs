// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Twitter OAuth 1.0a client.
//!
//! Implements the three-legged flow:
//!
//! 1. `POST /oauth/request_token` with `oauth_callback` → request token
//! 2. user visits `/oauth/authorize?oauth_token=...` and is redirected back
//! 3. `POST /oauth/access_token` with the token and `oauth_verifier`
//! 4. `GET /1.1/account/verify_credentials.json` signed with the access token

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

use super::oauth1::{self, Credentials};
use super::{OAuthError, OAuthHandshake};

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const REQUEST_TOKEN_PATH: &str = "/oauth/request_token";
const AUTHORIZE_PATH: &str = "/oauth/authorize";
const ACCESS_TOKEN_PATH: &str = "/oauth/access_token";
const VERIFY_CREDENTIALS_PATH: &str = "/1.1/account/verify_credentials.json";

/// Profile returned by `account/verify_credentials`.
///
/// Fields the proxy reads are typed; everything else Twitter sends is kept in
/// `extra` so the stored profile is complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TwitterUser {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub id_str: String,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url_https: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub friends_count: u64,
    #[serde(default)]
    pub statuses_count: u64,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TwitterUser {
    /// Twitter answers some failures with 200 and an empty user object.
    fn is_complete(&self) -> bool {
        self.id != 0 && !self.id_str.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct TwitterOAuthClient {
    consumer_key: String,
    consumer_secret: String,
    callback_url: String,
    api_base_url: String,
    http: Client,
}

impl TwitterOAuthClient {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        callback_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Result<Self, OAuthError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OAuthError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            callback_url: callback_url.into(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    fn authorize_url(&self, request_token: &str) -> String {
        format!(
            "{}?oauth_token={}",
            self.endpoint(AUTHORIZE_PATH),
            oauth1::percent_encode(request_token)
        )
    }

    fn sign(
        &self,
        method: &str,
        url: &str,
        request_params: &[(String, String)],
        extra_oauth: &[(&str, &str)],
        token: Option<&str>,
        token_secret: &str,
    ) -> Result<String, OAuthError> {
        oauth1::authorization_header(
            method,
            url,
            request_params,
            extra_oauth,
            Credentials {
                consumer_key: &self.consumer_key,
                consumer_secret: &self.consumer_secret,
                token,
                token_secret,
            },
            &Uuid::new_v4().simple().to_string(),
            Utc::now().timestamp(),
        )
    }

    /// POST to a token endpoint and parse the form-encoded answer.
    async fn token_request(
        &self,
        path: &str,
        authorization: String,
    ) -> Result<Vec<(String, String)>, OAuthError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .header("Authorization", authorization)
            .send()
            .await
            .map_err(|e| OAuthError::Request(format!("POST {path} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OAuthError::InvalidResponse(format!("POST {path} unreadable: {e}")))?;

        if !status.is_success() {
            return Err(OAuthError::Rejected(format!(
                "POST {path} returned {status}: {body}"
            )));
        }
        Ok(parse_form(&body))
    }

    async fn request_token(&self) -> Result<String, OAuthError> {
        let url = self.endpoint(REQUEST_TOKEN_PATH);
        let authorization = self.sign(
            "POST",
            &url,
            &[],
            &[("oauth_callback", &self.callback_url)],
            None,
            "",
        )?;

        let fields = self.token_request(REQUEST_TOKEN_PATH, authorization).await?;
        if form_value(&fields, "oauth_callback_confirmed") != Some("true") {
            return Err(OAuthError::InvalidResponse(
                "callback was not confirmed".to_string(),
            ));
        }
        form_value(&fields, "oauth_token")
            .map(str::to_string)
            .ok_or_else(|| OAuthError::InvalidResponse("missing oauth_token".to_string()))
    }

    async fn access_token(
        &self,
        request_token: &str,
        verifier: &str,
    ) -> Result<(String, String), OAuthError> {
        let url = self.endpoint(ACCESS_TOKEN_PATH);
        // The request-token secret is not retained between the two legs, so
        // the exchange is signed with an empty token secret.
        let authorization = self.sign(
            "POST",
            &url,
            &[],
            &[("oauth_verifier", verifier)],
            Some(request_token),
            "",
        )?;

        let fields = self.token_request(ACCESS_TOKEN_PATH, authorization).await?;
        match (
            form_value(&fields, "oauth_token"),
            form_value(&fields, "oauth_token_secret"),
        ) {
            (Some(token), Some(secret)) => Ok((token.to_string(), secret.to_string())),
            _ => Err(OAuthError::InvalidResponse(
                "missing access token or secret".to_string(),
            )),
        }
    }

    async fn verify_credentials(
        &self,
        access_token: &str,
        access_secret: &str,
    ) -> Result<TwitterUser, OAuthError> {
        let url = self.endpoint(VERIFY_CREDENTIALS_PATH);
        let query: Vec<(String, String)> = vec![
            ("include_entities".into(), "false".into()),
            ("skip_status".into(), "true".into()),
            ("include_email".into(), "true".into()),
        ];
        let authorization = self.sign(
            "GET",
            &url,
            &query,
            &[],
            Some(access_token),
            access_secret,
        )?;

        let response = self
            .http
            .get(&url)
            .query(&query)
            .header("Authorization", authorization)
            .send()
            .await
            .map_err(|e| OAuthError::Request(format!("GET {VERIFY_CREDENTIALS_PATH} failed: {e}")))?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::Rejected(format!(
                "GET {VERIFY_CREDENTIALS_PATH} returned {status}: {body}"
            )));
        }

        let user: TwitterUser = response.json().await.map_err(|e| {
            OAuthError::InvalidResponse(format!("GET {VERIFY_CREDENTIALS_PATH} invalid JSON: {e}"))
        })?;

        if !user.is_complete() {
            return Err(OAuthError::InvalidResponse(
                "unable to get Twitter user".to_string(),
            ));
        }
        Ok(user)
    }
}

#[async_trait]
impl OAuthHandshake for TwitterOAuthClient {
    async fn login_url(&self) -> Result<String, OAuthError> {
        let token = self.request_token().await?;
        debug!("Obtained Twitter request token");
        Ok(self.authorize_url(&token))
    }

    async fn exchange_callback(
        &self,
        oauth_token: &str,
        oauth_verifier: &str,
    ) -> Result<TwitterUser, OAuthError> {
        let (access_token, access_secret) = self.access_token(oauth_token, oauth_verifier).await?;
        let user = self.verify_credentials(&access_token, &access_secret).await?;
        info!(screen_name = %user.screen_name, "Twitter OAuth handshake completed");
        Ok(user)
    }
}

fn parse_form(body: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

fn form_value<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}
