//! Validator node accounts.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Address, PubKey, SoftwareVersion};

/// Node lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeStatus {
    #[default]
    Unknown,
    Whitelisted,
    Standby,
    Ready,
    Active,
    Disabled,
}

/// Keys a node signs with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePubKeySet {
    pub secp256k1: PubKey,
    pub ed25519: PubKey,
}

impl NodePubKeySet {
    pub fn is_empty(&self) -> bool {
        self.secp256k1.is_empty() || self.ed25519.is_empty()
    }

    pub fn contains(&self, pub_key: &PubKey) -> bool {
        &self.secp256k1 == pub_key || &self.ed25519 == pub_key
    }
}

/// A validator operator's account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAccount {
    pub node_address: Address,
    pub status: NodeStatus,
    pub pub_key_set: NodePubKeySet,
    pub validator_cons_pub_key: String,
    pub bond: U256,
    pub bond_address: Address,
    /// Height the node became active, zero until then.
    pub active_block_height: i64,
    pub status_since: i64,
    pub signer_membership: Vec<PubKey>,
    pub requested_to_leave: bool,
    pub forced_to_leave: bool,
    pub leave_score: u64,
    pub ip_address: String,
    pub version: SoftwareVersion,
}

impl NodeAccount {
    pub fn new(
        node_address: Address,
        status: NodeStatus,
        pub_key_set: NodePubKeySet,
        validator_cons_pub_key: String,
        bond: U256,
        bond_address: Address,
        height: i64,
    ) -> Self {
        Self {
            node_address,
            status,
            pub_key_set,
            validator_cons_pub_key,
            bond,
            bond_address,
            status_since: height,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node_address.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.status == NodeStatus::Active
    }

    /// Change status, stamping `status_since` only when it actually changes.
    pub fn update_status(&mut self, status: NodeStatus, height: i64) {
        if self.status != status {
            self.status = status;
            self.status_since = height;
        }
    }
}

/// A node barred from signing until `release_height`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jail {
    pub node_address: Address,
    pub release_height: i64,
    pub reason: String,
}

impl Jail {
    pub fn new(node_address: Address) -> Self {
        Self {
            node_address,
            ..Self::default()
        }
    }

    pub fn is_jailed(&self, height: i64) -> bool {
        self.release_height > height
    }
}
