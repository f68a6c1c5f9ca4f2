// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Contact details submitted by wallet owners.
//!
//! An optional `personal_sign` signature over `msg` is checked against
//! `userAddress`. The outcome is recorded in `validSig`; a bad signature
//! never blocks the write.

use alloy::primitives::{Address, Signature};
use chrono::Utc;
use tracing::{info, warn};

use crate::error::ProxyError;
use crate::models::AccountInfoRequest;
use crate::state::AppState;
use crate::storage::AccountInfo;

/// Stored in place of a missing `userAddress`.
pub const ANONYMOUS_ADDRESS: &str = "-";

/// Whether `sig_hex` is a `personal_sign` signature of `msg` by `address`.
pub fn personal_sign_matches(address: &str, sig_hex: &str, msg: &[u8]) -> bool {
    let Ok(expected) = address.trim().parse::<Address>() else {
        return false;
    };
    let Ok(bytes) = alloy::hex::decode(sig_hex.trim()) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(bytes.as_slice()) else {
        return false;
    };
    signature
        .recover_address_from_msg(msg)
        .map(|recovered| recovered == expected)
        .unwrap_or(false)
}

pub fn put_account_info(
    state: &AppState,
    request: AccountInfoRequest,
) -> Result<AccountInfo, ProxyError> {
    if request.email.trim().is_empty() {
        return Err(ProxyError::validation("email could not be empty"));
    }

    let sig = request.sig.filter(|s| !s.trim().is_empty());
    let valid_sig = match sig.as_deref() {
        Some(sig) => {
            let msg = request.msg.as_deref().unwrap_or_default();
            let valid = personal_sign_matches(&request.user_address, sig, msg.as_bytes());
            if !valid {
                warn!(
                    user_address = %request.user_address,
                    "Account info signature did not match address"
                );
            }
            valid
        }
        None => false,
    };

    let user_address = if request.user_address.trim().is_empty() {
        ANONYMOUS_ADDRESS.to_string()
    } else {
        request.user_address
    };

    let account = AccountInfo {
        user_address,
        name: request.name,
        email: request.email,
        msg: request.msg,
        sig,
        valid_sig,
        created_at: Utc::now(),
    };
    state.accounts.put(&account)?;

    info!(
        user_address = %account.user_address,
        valid_sig = account.valid_sig,
        "Stored account info"
    );
    Ok(account)
}
