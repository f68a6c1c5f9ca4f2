// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain network identifiers and their public/private classification.
//!
//! Public networks are the well-known chain IDs (mainnet and the classic
//! testnets). Anything else is treated as a private deployment, where social
//! proofs are accepted straight from the client instead of being fetched from
//! the lookup function.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Well-known public network IDs.
const PUBLIC_NETWORK_IDS: [u64; 10] = [0, 1, 2, 3, 4, 8, 42, 77, 99, 7_762_959];

/// Numeric chain network ID, used to partition authorization tables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct NetworkId(pub u64);

/// Whether a network trusts client-supplied proofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkClass {
    Public,
    Private,
}

impl NetworkId {
    pub fn class(self) -> NetworkClass {
        if PUBLIC_NETWORK_IDS.contains(&self.0) {
            NetworkClass::Public
        } else {
            NetworkClass::Private
        }
    }

    pub fn is_private(self) -> bool {
        self.class() == NetworkClass::Private
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NetworkId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NetworkId)
    }
}

impl From<u64> for NetworkId {
    fn from(value: u64) -> Self {
        NetworkId(value)
    }
}
