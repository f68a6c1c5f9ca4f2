// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User aggregation: authorization records enriched with platform profiles.
//!
//! Records are queried from the network's authorization table, then one task
//! per platform fetches that platform's profiles in a single batch and merges
//! them back. Only Twitter profiles are stored today.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use md5::{Digest, Md5};
use tokio::task::JoinSet;
use tracing::debug;

use crate::error::ProxyError;
use crate::models::{PlatformName, TwitterProfileView, UserInfo};
use crate::network::NetworkId;
use crate::providers::twitter::TwitterUser;
use crate::state::AppState;
use crate::storage::{AuthorizationRecord, AuthorizationTable};

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    ByAddress(String),
    ByUsername(String),
    ByUsernamePrefix { prefix: String, limit: usize },
}

impl UserFilter {
    fn validate(&self) -> Result<(), ProxyError> {
        let (field, value) = match self {
            UserFilter::ByAddress(address) => ("userAddress", address),
            UserFilter::ByUsername(username) => ("username", username),
            UserFilter::ByUsernamePrefix { prefix, .. } => ("usernamePrefix", prefix),
        };
        if value.trim().is_empty() {
            return Err(ProxyError::validation(format!("{field} is required")));
        }
        Ok(())
    }

    fn query(&self, table: &AuthorizationTable) -> Result<Vec<AuthorizationRecord>, ProxyError> {
        let records = match self {
            UserFilter::ByAddress(address) => table.by_user_address(address)?,
            UserFilter::ByUsername(username) => table.scan_username(username)?,
            UserFilter::ByUsernamePrefix { prefix, limit } => {
                table.scan_username_prefix(prefix, *limit)?
            }
        };
        Ok(records)
    }
}

/// Profiles fetched by one platform task, keyed by username.
enum PlatformProfiles {
    Twitter(HashMap<String, TwitterUser>),
}

pub async fn list_users(
    state: &AppState,
    network: NetworkId,
    filter: UserFilter,
) -> Result<Vec<UserInfo>, ProxyError> {
    filter.validate()?;

    let table = state.authorizations.table(network)?;
    let records = filter.query(&table)?;
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut users: Vec<UserInfo> = records.into_iter().map(UserInfo::from).collect();

    let mut tasks: JoinSet<Result<PlatformProfiles, ProxyError>> = JoinSet::new();
    let twitter_names = unique_usernames(&users, PlatformName::Twitter);
    if !twitter_names.is_empty() {
        let profiles = Arc::clone(&state.profiles);
        tasks.spawn_blocking(move || {
            Ok(PlatformProfiles::Twitter(profiles.batch_get(&twitter_names)?))
        });
    }

    // Every task is joined even after a failure; the first error wins.
    let mut first_error: Option<ProxyError> = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(PlatformProfiles::Twitter(profiles))) => merge_twitter(&mut users, &profiles),
            Ok(Err(err)) => {
                first_error.get_or_insert(err);
            }
            Err(join_err) => {
                first_error.get_or_insert(ProxyError::FanOut(join_err.to_string()));
            }
        }
    }
    if let Some(err) = first_error {
        return Err(err);
    }

    debug!(network = %network, count = users.len(), "Aggregated users");
    Ok(users)
}

/// Usernames of `platform` records, first-seen order, no duplicates.
fn unique_usernames(users: &[UserInfo], platform: PlatformName) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for user in users.iter().filter(|user| user.platform_name == platform) {
        if seen.insert(user.username.as_str()) {
            names.push(user.username.clone());
        }
    }
    names
}

fn merge_twitter(users: &mut [UserInfo], profiles: &HashMap<String, TwitterUser>) {
    for user in users
        .iter_mut()
        .filter(|user| user.platform_name == PlatformName::Twitter)
    {
        if let Some(profile) = profiles.get(&user.username) {
            user.twitter_oauth_info = Some(TwitterProfileView::from(profile));
            user.gravatar_hash = gravatar_hash(profile.email.as_deref().unwrap_or_default());
        }
    }
}

/// Lowercase hex MD5 of an email address, as Gravatar expects.
pub fn gravatar_hash(email: &str) -> String {
    alloy::hex::encode(Md5::digest(email.as_bytes()))
}
