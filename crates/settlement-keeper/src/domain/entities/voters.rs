//! # Voters
//!
//! Records that collect node signatures until a supermajority of the active
//! set agrees. Every voter embeds a [`VoteTally`].
//!
//! - Re-votes are idempotent: a signer counts once.
//! - Once resolved, the consensus height never changes.

use crate::domain::majority::has_super_majority;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Chain, PubKey, TxId};

/// Signers in first-vote order plus the height consensus was reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub signers: Vec<Address>,
    /// Zero until resolved.
    pub consensus_height: i64,
}

impl VoteTally {
    /// Record a vote. Returns false if the signer already voted.
    pub fn sign(&mut self, signer: Address) -> bool {
        if signer.is_empty() || self.has_signed(&signer) {
            return false;
        }
        self.signers.push(signer);
        true
    }

    pub fn has_signed(&self, signer: &Address) -> bool {
        self.signers.contains(signer)
    }

    /// Supermajority over `active`, counting only active signers.
    pub fn has_consensus(&self, active: &[Address]) -> bool {
        let count = self.signers.iter().filter(|s| active.contains(s)).count();
        has_super_majority(count, active.len())
    }

    pub fn is_resolved(&self) -> bool {
        self.consensus_height > 0
    }

    /// Mark resolved at `height`. Later calls keep the first height, and a
    /// non-positive height resolves nothing.
    pub fn resolve(&mut self, height: i64) -> bool {
        if height <= 0 || self.is_resolved() {
            return false;
        }
        self.consensus_height = height;
        true
    }
}

/// Votes to ban a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanVoter {
    pub node_address: Address,
    pub tally: VoteTally,
}

impl BanVoter {
    pub fn new(node_address: Address) -> Self {
        Self {
            node_address,
            tally: VoteTally::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node_address.is_empty()
    }
}

/// Votes that an observed transaction was reorged out of its chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrataTxVoter {
    pub tx_id: TxId,
    pub chain: Chain,
    pub tally: VoteTally,
}

impl ErrataTxVoter {
    pub fn new(tx_id: TxId, chain: Chain) -> Self {
        Self {
            tx_id,
            chain,
            tally: VoteTally::default(),
        }
    }

    /// Storage key suffix, `{chain}-{txid}`.
    pub fn key(&self) -> String {
        Self::key_for(&self.tx_id, &self.chain)
    }

    pub fn key_for(tx_id: &TxId, chain: &Chain) -> String {
        format!("{}-{}", chain, tx_id)
    }
}

/// Votes on the outcome of a key generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TssVoter {
    pub id: String,
    pub pool_pub_key: PubKey,
    pub pub_keys: Vec<PubKey>,
    pub tally: VoteTally,
}

impl TssVoter {
    pub fn new(id: impl Into<String>, pub_keys: Vec<PubKey>, pool_pub_key: PubKey) -> Self {
        Self {
            id: id.into(),
            pool_pub_key,
            pub_keys,
            tally: VoteTally::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Votes that a transaction was observed on its chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedTxVoter {
    pub tx_id: TxId,
    pub tally: VoteTally,
    /// Height the observation first reached consensus, zero until then.
    pub height: i64,
    pub finalised_height: i64,
    pub outbound_height: i64,
}

impl ObservedTxVoter {
    pub fn new(tx_id: TxId) -> Self {
        Self {
            tx_id,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tx_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> Vec<Address> {
        ["a", "b", "c"].iter().map(|n| Address::new(n)).collect()
    }

    #[test]
    fn test_revote_is_idempotent() {
        let mut tally = VoteTally::default();
        assert!(tally.sign("a".into()));
        assert!(!tally.sign("a".into()));
        assert!(!tally.sign(Address::default()));
        assert_eq!(tally.signers.len(), 1);
        assert!(!tally.has_consensus(&active()));

        assert!(tally.sign("b".into()));
        assert!(tally.has_consensus(&active()));
    }

    #[test]
    fn test_outsiders_do_not_count() {
        let mut tally = VoteTally::default();
        tally.sign("a".into());
        tally.sign("z".into());
        assert!(!tally.has_consensus(&active()));
    }

    #[test]
    fn test_resolve_keeps_first_height() {
        let mut tally = VoteTally::default();
        assert!(tally.resolve(10));
        assert!(!tally.resolve(12));
        assert_eq!(tally.consensus_height, 10);
        assert!(tally.is_resolved());
    }

    #[test]
    fn test_non_positive_height_does_not_resolve() {
        let mut tally = VoteTally::default();
        assert!(!tally.resolve(0));
        assert!(!tally.resolve(-3));
        assert!(!tally.is_resolved());
        assert_eq!(tally.consensus_height, 0);
        assert!(tally.resolve(4));
    }

    #[test]
    fn test_errata_key() {
        let voter = ErrataTxVoter::new(TxId::new("abc"), Chain::new("BTC").unwrap());
        assert_eq!(voter.key(), "BTC-ABC");
    }
}
