// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed prekey uploads.
//!
//! The body is `{"signature": base64, "prekeys": string}`. The signature is
//! an Ed25519 signature over the UTF-8 bytes of `prekeys`, made with the key
//! named in the request. Only verified uploads are stored.

use base64ct::{Base64, Encoding};
use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH};
use tracing::info;

use crate::error::ProxyError;
use crate::models::PutPrekeysRequest;
use crate::network::NetworkId;
use crate::state::AppState;

/// Object key of a prekey upload inside the bucket.
pub fn prekey_object_key(network: NetworkId, public_key_hex: &str) -> String {
    format!("{network}/{public_key_hex}")
}

/// Bare hex only: a `0x` prefix would name a second object for the same key.
fn parse_public_key(public_key_hex: &str) -> Result<VerifyingKey, ProxyError> {
    if public_key_hex.starts_with("0x") || public_key_hex.starts_with("0X") {
        return Err(ProxyError::InvalidKeyEncoding(
            "public key must be bare hex without a 0x prefix".to_string(),
        ));
    }
    let bytes = alloy::hex::decode(public_key_hex)
        .map_err(|e| ProxyError::InvalidKeyEncoding(e.to_string()))?;
    let bytes: [u8; PUBLIC_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
        ProxyError::InvalidKeyEncoding(format!(
            "expected {PUBLIC_KEY_LENGTH} bytes, got {}",
            bytes.len()
        ))
    })?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| ProxyError::InvalidKeyEncoding(e.to_string()))
}

fn verify_upload(key: &VerifyingKey, upload: &PutPrekeysRequest) -> Result<(), ProxyError> {
    let signature_bytes = Base64::decode_vec(&upload.signature)
        .map_err(|e| ProxyError::InvalidSignature(format!("signature is not base64: {e}")))?;
    let signature = Signature::from_slice(&signature_bytes)
        .map_err(|e| ProxyError::InvalidSignature(e.to_string()))?;
    key.verify_strict(upload.prekeys.as_bytes(), &signature)
        .map_err(|_| ProxyError::InvalidSignature("verification failed".to_string()))
}

/// Verify and store a prekey upload. `body` is stored verbatim.
pub fn put_prekeys(
    state: &AppState,
    public_key_hex: &str,
    network: NetworkId,
    body: &[u8],
) -> Result<(), ProxyError> {
    let upload: PutPrekeysRequest = serde_json::from_slice(body)
        .map_err(|e| ProxyError::validation(format!("invalid prekeys body: {e}")))?;

    let public_key_hex = public_key_hex.trim();
    let key = parse_public_key(public_key_hex)?;
    verify_upload(&key, &upload)?;

    let object_key = prekey_object_key(network, public_key_hex);
    state.prekeys.put(&object_key, body)?;

    info!(network = %network, object_key = %object_key, "Stored prekeys");
    Ok(())
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;
    use crate::test_support::test_state;

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    fn public_hex(key: &SigningKey) -> String {
        alloy::hex::encode(key.verifying_key().as_bytes())
    }

    fn signed_body(key: &SigningKey, prekeys: &str) -> Vec<u8> {
        let signature = key.sign(prekeys.as_bytes());
        serde_json::to_vec(&serde_json::json!({
            "signature": Base64::encode_string(&signature.to_bytes()),
            "prekeys": prekeys,
        }))
        .unwrap()
    }

    #[test]
    fn valid_upload_is_stored_verbatim() {
        let (state, _dir) = test_state();
        let key = signing_key();
        let body = signed_body(&key, "bundle-v1");

        put_prekeys(&state, &public_hex(&key), NetworkId(1), &body).unwrap();

        let stored = state
            .prekeys
            .get(&format!("1/{}", public_hex(&key)))
            .unwrap();
        assert_eq!(stored, Some(body));
    }

    #[test]
    fn later_upload_replaces_earlier() {
        let (state, _dir) = test_state();
        let key = signing_key();
        let first = signed_body(&key, "bundle-v1");
        let second = signed_body(&key, "bundle-v2");

        put_prekeys(&state, &public_hex(&key), NetworkId(3), &first).unwrap();
        put_prekeys(&state, &public_hex(&key), NetworkId(3), &second).unwrap();

        let stored = state
            .prekeys
            .get(&prekey_object_key(NetworkId(3), &public_hex(&key)))
            .unwrap();
        assert_eq!(stored, Some(second));
    }

    #[test]
    fn malformed_body_is_a_validation_error() {
        let (state, _dir) = test_state();
        let err = put_prekeys(&state, &public_hex(&signing_key()), NetworkId(1), b"{not json")
            .unwrap_err();
        assert!(matches!(err, ProxyError::Validation(_)));
    }

    #[test]
    fn bad_public_key_is_rejected() {
        let (state, _dir) = test_state();
        let body = signed_body(&signing_key(), "bundle");

        for key in ["zz", "abcd", ""] {
            let err = put_prekeys(&state, key, NetworkId(1), &body).unwrap_err();
            assert!(
                matches!(err, ProxyError::InvalidKeyEncoding(_)),
                "key {key:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn prefixed_public_key_is_rejected() {
        let (state, _dir) = test_state();
        let key = signing_key();
        let body = signed_body(&key, "bundle");
        let prefixed = format!("0x{}", public_hex(&key));

        let err = put_prekeys(&state, &prefixed, NetworkId(1), &body).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidKeyEncoding(_)));
        assert!(state
            .prekeys
            .get(&prekey_object_key(NetworkId(1), &prefixed))
            .unwrap()
            .is_none());
    }

    #[test]
    fn any_single_byte_change_in_signature_is_rejected() {
        let (state, _dir) = test_state();
        let key = signing_key();
        let signature = key.sign(b"bundle").to_bytes();

        for index in 0..signature.len() {
            let mut altered = signature;
            altered[index] ^= 0x01;
            let body = serde_json::to_vec(&serde_json::json!({
                "signature": Base64::encode_string(&altered),
                "prekeys": "bundle",
            }))
            .unwrap();

            let err = put_prekeys(&state, &public_hex(&key), NetworkId(1), &body).unwrap_err();
            assert!(
                matches!(err, ProxyError::InvalidSignature(_)),
                "byte {index} gave {err:?}"
            );
        }
        assert!(state
            .prekeys
            .get(&prekey_object_key(NetworkId(1), &public_hex(&key)))
            .unwrap()
            .is_none());
    }

    #[test]
    fn wrong_signer_is_rejected_and_nothing_stored() {
        let (state, _dir) = test_state();
        let other = SigningKey::from_bytes(&[9u8; 32]);
        let claimed = signing_key();
        let body = signed_body(&other, "bundle");

        let err = put_prekeys(&state, &public_hex(&claimed), NetworkId(1), &body).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidSignature(_)));
        assert!(state
            .prekeys
            .get(&prekey_object_key(NetworkId(1), &public_hex(&claimed)))
            .unwrap()
            .is_none());
    }

    #[test]
    fn tampered_payload_and_bad_encoding_are_rejected() {
        let (state, _dir) = test_state();
        let key = signing_key();
        let signature = Base64::encode_string(&key.sign(b"original").to_bytes());

        let tampered = serde_json::to_vec(&serde_json::json!({
            "signature": signature,
            "prekeys": "tampered",
        }))
        .unwrap();
        assert!(matches!(
            put_prekeys(&state, &public_hex(&key), NetworkId(1), &tampered),
            Err(ProxyError::InvalidSignature(_))
        ));

        let not_base64 = br#"{"signature":"***","prekeys":"x"}"#;
        assert!(matches!(
            put_prekeys(&state, &public_hex(&key), NetworkId(1), not_base64),
            Err(ProxyError::InvalidSignature(_))
        ));

        let short = serde_json::to_vec(&serde_json::json!({
            "signature": Base64::encode_string(&[1u8; 10]),
            "prekeys": "x",
        }))
        .unwrap();
        assert!(matches!(
            put_prekeys(&state, &public_hex(&key), NetworkId(1), &short),
            Err(ProxyError::InvalidSignature(_))
        ));
    }
}
