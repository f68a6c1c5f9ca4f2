// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).

use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::OAuthError;

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Consumer and (optional) token credentials used to sign one request.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: Option<&'a str>,
    pub token_secret: &'a str,
}

/// RFC 3986 percent-encoding: everything but `A-Z a-z 0-9 - . _ ~`.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the signature base string `METHOD&url&params`.
///
/// `params` holds every query/body parameter plus all `oauth_*` protocol
/// parameters except `oauth_signature`.
pub fn signature_base_string(method: &str, base_url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(base_url),
        percent_encode(&normalized)
    )
}

/// HMAC-SHA1 over the base string, base64 encoded.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> Result<String, OAuthError> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| OAuthError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(Base64::encode_string(&mac.finalize().into_bytes()))
}

/// Build the `Authorization: OAuth ...` header value for a request.
///
/// `request_params` are the query or form parameters sent with the request;
/// `extra_oauth` carries flow-specific protocol parameters such as
/// `oauth_callback` or `oauth_verifier`.
pub fn authorization_header(
    method: &str,
    base_url: &str,
    request_params: &[(String, String)],
    extra_oauth: &[(&str, &str)],
    credentials: Credentials<'_>,
    nonce: &str,
    timestamp: i64,
) -> Result<String, OAuthError> {
    let timestamp = timestamp.to_string();
    let mut oauth_params: Vec<(String, String)> = vec![
        ("oauth_consumer_key".into(), credentials.consumer_key.into()),
        ("oauth_nonce".into(), nonce.into()),
        ("oauth_signature_method".into(), SIGNATURE_METHOD.into()),
        ("oauth_timestamp".into(), timestamp),
        ("oauth_version".into(), OAUTH_VERSION.into()),
    ];
    if let Some(token) = credentials.token {
        oauth_params.push(("oauth_token".into(), token.into()));
    }
    for (k, v) in extra_oauth {
        oauth_params.push(((*k).into(), (*v).into()));
    }

    let mut all_params = oauth_params.clone();
    all_params.extend(request_params.iter().cloned());

    let base_string = signature_base_string(method, base_url, &all_params);
    let signature = sign(
        &base_string,
        credentials.consumer_secret,
        credentials.token_secret,
    )?;
    oauth_params.push(("oauth_signature".into(), signature));
    oauth_params.sort();

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {fields}"))
}
