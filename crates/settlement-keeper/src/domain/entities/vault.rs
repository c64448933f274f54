//! # Vaults
//!
//! Custody accounts controlled by a threshold-signature key group.
//!
//! ## Kinds
//!
//! - **Asgard**: rotating multi-party vault, re-keyed among the active set.
//!   Indexed separately so it can be listed without a full scan.
//! - **Yggdrasil**: single-purpose vault assigned to one node for outbound
//!   dispatch. Not indexed.
//!
//! ## Status
//!
//! ```text
//! Active ──→ Retiring ──→ Inactive
//! ```

use crate::domain::entities::network::ChainContract;
use serde::{Deserialize, Serialize};
use shared_types::{Chain, Coin, Coins, PubKey};
use std::fmt;

/// Vault kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VaultKind {
    #[default]
    Asgard,
    Yggdrasil,
}

/// Vault lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VaultStatus {
    #[default]
    Active,
    Retiring,
    Inactive,
}

impl VaultStatus {
    /// Status only moves forward.
    pub fn can_transition_to(&self, next: VaultStatus) -> bool {
        matches!(
            (self, next),
            (VaultStatus::Active, VaultStatus::Retiring)
                | (VaultStatus::Retiring, VaultStatus::Inactive)
                | (VaultStatus::Active, VaultStatus::Inactive)
        )
    }
}

impl fmt::Display for VaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultKind::Asgard => f.write_str("AsgardVault"),
            VaultKind::Yggdrasil => f.write_str("YggdrasilVault"),
        }
    }
}

impl fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultStatus::Active => f.write_str("ActiveVault"),
            VaultStatus::Retiring => f.write_str("RetiringVault"),
            VaultStatus::Inactive => f.write_str("InactiveVault"),
        }
    }
}

/// A custody vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub pub_key: PubKey,
    pub kind: VaultKind,
    pub status: VaultStatus,
    /// Height the vault was created.
    pub block_height: i64,
    pub status_since: i64,
    pub coins: Coins,
    pub membership: Vec<PubKey>,
    pub chains: Vec<Chain>,
    pub routers: Vec<ChainContract>,
    pub inbound_tx_count: i64,
    pub outbound_tx_count: i64,
}

impl Vault {
    pub fn new(
        height: i64,
        status: VaultStatus,
        kind: VaultKind,
        pub_key: PubKey,
        chains: Vec<Chain>,
    ) -> Self {
        Self {
            pub_key,
            kind,
            status,
            block_height: height,
            status_since: height,
            chains,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pub_key.is_empty()
    }

    pub fn is_asgard(&self) -> bool {
        self.kind == VaultKind::Asgard
    }

    pub fn is_yggdrasil(&self) -> bool {
        self.kind == VaultKind::Yggdrasil
    }

    /// True when any coin carries a nonzero amount.
    pub fn has_funds(&self) -> bool {
        !self.coins.is_empty()
    }

    pub fn has_funds_for_chain(&self, chain: &Chain) -> bool {
        self.coins
            .iter()
            .any(|c| &c.asset.chain == chain && !c.amount.is_zero())
    }

    pub fn add_funds(&mut self, coins: impl IntoIterator<Item = Coin>) {
        for coin in coins {
            self.coins.add(coin);
        }
    }

    pub fn sub_funds<'a>(&mut self, coins: impl IntoIterator<Item = &'a Coin>) {
        for coin in coins {
            self.coins.safe_sub(coin);
        }
    }

    /// Move to `next` if the transition is legal. Returns whether it moved.
    pub fn update_status(&mut self, next: VaultStatus, height: i64) -> bool {
        if !self.status.can_transition_to(next) {
            return false;
        }
        self.status = next;
        self.status_since = height;
        true
    }

    pub fn contains(&self, member: &PubKey) -> bool {
        self.membership.contains(member)
    }
}
