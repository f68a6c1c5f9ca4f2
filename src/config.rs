// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults and the [`Config`] loaded once at
//! startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Root directory for the key-value store and blob buckets | `./data` |
//! | `AUTHORIZATION_TABLE_NAME` | Prefix of the per-network authorization tables | `authorizations` |
//! | `TWITTER_OAUTH_TABLE_NAME` | Twitter profile table | `twitter_oauth` |
//! | `ACCOUNT_TABLE_NAME` | Account info table | `account_info` |
//! | `PREKEYS_BUCKET_NAME` | Blob bucket for prekey uploads | `prekeys` |
//! | `TWITTER_CONSUMER_KEY` | Twitter app consumer key | Required |
//! | `TWITTER_CONSUMER_SECRET` | Twitter app consumer secret | Required |
//! | `TWITTER_CALLBACK_URL` | OAuth callback registered with Twitter | Required |
//! | `TWITTER_API_BASE_URL` | Twitter API origin | `https://api.twitter.com` |
//! | `PROOF_LOOKUP_URL` | Endpoint of the social-proof lookup function | Required |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::providers::twitter::DEFAULT_API_BASE_URL;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the data directory path.
///
/// Holds `proxy.redb` and one subdirectory per blob bucket.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

pub const AUTHORIZATION_TABLE_ENV: &str = "AUTHORIZATION_TABLE_NAME";
pub const TWITTER_OAUTH_TABLE_ENV: &str = "TWITTER_OAUTH_TABLE_NAME";
pub const ACCOUNT_TABLE_ENV: &str = "ACCOUNT_TABLE_NAME";
pub const PREKEYS_BUCKET_ENV: &str = "PREKEYS_BUCKET_NAME";

pub const TWITTER_CONSUMER_KEY_ENV: &str = "TWITTER_CONSUMER_KEY";
pub const TWITTER_CONSUMER_SECRET_ENV: &str = "TWITTER_CONSUMER_SECRET";
pub const TWITTER_CALLBACK_URL_ENV: &str = "TWITTER_CALLBACK_URL";
pub const TWITTER_API_BASE_URL_ENV: &str = "TWITTER_API_BASE_URL";
pub const PROOF_LOOKUP_URL_ENV: &str = "PROOF_LOOKUP_URL";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_AUTHORIZATION_TABLE: &str = "authorizations";
pub const DEFAULT_TWITTER_OAUTH_TABLE: &str = "twitter_oauth";
pub const DEFAULT_ACCOUNT_TABLE: &str = "account_info";
pub const DEFAULT_PREKEYS_BUCKET: &str = "prekeys";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// File name of the key-value store inside `DATA_DIR`.
pub const STORE_FILE_NAME: &str = "proxy.redb";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything but `json` selects the pretty format.
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub callback_url: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub authorization_table_prefix: String,
    pub twitter_oauth_table: String,
    pub account_table: String,
    pub prekeys_bucket: String,
    pub twitter: TwitterConfig,
    pub proof_lookup_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvSource { lookup };

        let host = env.or_default(HOST_ENV, DEFAULT_HOST);
        let port = match env.optional(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    name: HOST_ENV,
                    value: host.clone(),
                })?;

        Ok(Self {
            bind_addr,
            data_dir: PathBuf::from(env.or_default(DATA_DIR_ENV, DEFAULT_DATA_DIR)),
            authorization_table_prefix: env
                .or_default(AUTHORIZATION_TABLE_ENV, DEFAULT_AUTHORIZATION_TABLE),
            twitter_oauth_table: env.or_default(TWITTER_OAUTH_TABLE_ENV, DEFAULT_TWITTER_OAUTH_TABLE),
            account_table: env.or_default(ACCOUNT_TABLE_ENV, DEFAULT_ACCOUNT_TABLE),
            prekeys_bucket: env.or_default(PREKEYS_BUCKET_ENV, DEFAULT_PREKEYS_BUCKET),
            twitter: TwitterConfig {
                consumer_key: env.required(TWITTER_CONSUMER_KEY_ENV)?,
                consumer_secret: env.required(TWITTER_CONSUMER_SECRET_ENV)?,
                callback_url: env.required(TWITTER_CALLBACK_URL_ENV)?,
                api_base_url: env.or_default(TWITTER_API_BASE_URL_ENV, DEFAULT_API_BASE_URL),
            },
            proof_lookup_url: env.required(PROOF_LOOKUP_URL_ENV)?,
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

struct EnvSource<F> {
    lookup: F,
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value, `None` when unset or blank.
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.optional(name).ok_or(ConfigError::Missing(name))
    }

    fn or_default(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }
}
