//! # Trading Halt Model
//!
//! Messages that can be stopped by a trading halt form a closed set. Each
//! kind states which chains it touches; the keeper then checks the halt
//! values of exactly those chains (see `service::halt`).

use crate::domain::entities::MsgSwap;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Asset, Chain};

/// Request to add liquidity to a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddLiquidity {
    pub asset: Asset,
    pub rune_address: Address,
    pub asset_address: Address,
    pub signer: Address,
}

/// Request to withdraw liquidity from a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgWithdrawLiquidity {
    pub asset: Asset,
    pub withdraw_address: Address,
    pub basis_points: u64,
    pub signer: Address,
}

/// A message subject to trading halts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaltableMsg {
    Swap(MsgSwap),
    AddLiquidity(MsgAddLiquidity),
    WithdrawLiquidity(MsgWithdrawLiquidity),
}

/// Chains whose halt values gate a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaltScope {
    /// Only the global trading halt applies.
    Global,
    /// The global halt plus each listed chain's halts.
    Chains(Vec<Chain>),
}

impl HaltableMsg {
    pub fn halt_scope(&self) -> HaltScope {
        match self {
            HaltableMsg::Swap(msg) => {
                let source = msg
                    .tx
                    .coins
                    .iter()
                    .next()
                    .map(|c| c.asset.layer1_asset().chain)
                    .unwrap_or_else(Chain::empty);
                let target = msg.target_asset.layer1_asset().chain;
                HaltScope::Chains(vec![source, target])
            }
            HaltableMsg::AddLiquidity(msg) => HaltScope::Chains(vec![msg.asset.chain.clone()]),
            HaltableMsg::WithdrawLiquidity(_) => HaltScope::Global,
        }
    }

    /// Sender eligible for the arbitrage allow-list bypass. Only swaps have one.
    pub fn bypass_candidate(&self) -> Option<&Address> {
        match self {
            HaltableMsg::Swap(msg) => Some(&msg.tx.from_address),
            HaltableMsg::AddLiquidity(_) | HaltableMsg::WithdrawLiquidity(_) => None,
        }
    }
}

/// Versioned set of treasury arbitrage addresses exempt from trading halts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbAllowList {
    pub version: u32,
    pub addresses: Vec<String>,
}

/// Treasury addresses in effect since version 1.
pub const ARB_ALLOW_LIST_V1: &[&str] = &[
    "thor1egxvam70a86jafa8gcg3kqfmfax3s0m2g3m754",
    "bc1qq2z2f4gs4nd7t0a9jjp90y9l9zzjtegu4nczha",
    "qz7262r7uufxk89ematxrf6yquk7zfwrjqm97vskzw",
    "0x04c5998ded94f89263370444ce64a99b7dbc9f46",
    "bnb1pa6hpjs7qv0vkd5ks5tqa2xtt2gk5n08yw7v7f",
    "ltc1qaa064vvv4d6stgywnf777j6dl8rd3tt93fp6jx",
];

impl ArbAllowList {
    pub fn new(version: u32, addresses: &[&str]) -> Self {
        Self {
            version,
            addresses: addresses.iter().map(|a| a.trim().to_string()).collect(),
        }
    }

    pub fn contains(&self, address: &Address) -> bool {
        !address.is_empty() && self.addresses.iter().any(|a| a == address.as_str())
    }
}

impl Default for ArbAllowList {
    fn default() -> Self {
        Self::new(1, ARB_ALLOW_LIST_V1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Tx;
    use shared_types::Coin;

    #[test]
    fn test_swap_scope_uses_layer1_chains() {
        let synth: Asset = "ETH/ETH".parse().unwrap();
        let msg = MsgSwap {
            tx: Tx {
                coins: vec![Coin::new(synth, 1u64)].into(),
                ..Tx::default()
            },
            target_asset: "BTC.BTC".parse().unwrap(),
            ..MsgSwap::default()
        };
        assert_eq!(
            HaltableMsg::Swap(msg).halt_scope(),
            HaltScope::Chains(vec![Chain::new("ETH").unwrap(), Chain::new("BTC").unwrap()])
        );
    }

    #[test]
    fn test_withdraw_is_global_only() {
        let msg = HaltableMsg::WithdrawLiquidity(MsgWithdrawLiquidity::default());
        assert_eq!(msg.halt_scope(), HaltScope::Global);
        assert!(msg.bypass_candidate().is_none());
    }

    #[test]
    fn test_allow_list() {
        let list = ArbAllowList::default();
        assert_eq!(list.version, 1);
        assert!(list.contains(&"thor1egxvam70a86jafa8gcg3kqfmfax3s0m2g3m754".into()));
        assert!(!list.contains(&"thor1someoneelse".into()));
        assert!(!list.contains(&Address::default()));
    }
}
