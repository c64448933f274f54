//! Network-wide aggregates and per-chain records.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Chain};

/// Network singleton.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Bond rewards accrued but not yet paid to nodes.
    pub bond_reward_rune: U256,
    pub total_bond_units: U256,
    pub outbound_gas_spent_rune: U256,
    pub outbound_gas_withheld_rune: U256,
}

/// Vault aggregate singleton.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultData {
    pub bond_reward_rune: U256,
    pub total_bond_units: U256,
    pub total_reserve: U256,
}

/// Observed outbound fee parameters of one chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFee {
    pub chain: Chain,
    pub transaction_size: u64,
    pub transaction_fee_rate: u64,
}

impl NetworkFee {
    pub fn new(chain: Chain, transaction_size: u64, transaction_fee_rate: u64) -> Self {
        Self {
            chain,
            transaction_size,
            transaction_fee_rate,
        }
    }

    /// Reason the fee is unusable, if any.
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if self.chain.is_empty() {
            Some("chain cannot be empty")
        } else if self.transaction_size == 0 {
            Some("transaction size cannot be zero")
        } else if self.transaction_fee_rate == 0 {
            Some("transaction fee rate cannot be zero")
        } else {
            None
        }
    }
}

/// Router contract used for outbounds on one chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainContract {
    pub chain: Chain,
    pub router: Address,
}

impl ChainContract {
    pub fn new(chain: Chain, router: Address) -> Self {
        Self { chain, router }
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty() || self.router.is_empty()
    }
}

/// Affiliate fees collected on behalf of an owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateFeeCollector {
    pub owner_address: Address,
    pub rune_amount: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_fee_validation() {
        let btc = Chain::new("BTC").unwrap();
        assert!(NetworkFee::new(btc.clone(), 250, 10).invalid_reason().is_none());
        assert!(NetworkFee::new(Chain::empty(), 250, 10).invalid_reason().is_some());
        assert!(NetworkFee::new(btc.clone(), 0, 10).invalid_reason().is_some());
        assert!(NetworkFee::new(btc, 250, 0).invalid_reason().is_some());
    }
}
