//! Outbound batches, one per block height.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Chain, Coin, Coins, PubKey, TxId};

/// One outbound transaction scheduled for dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutItem {
    pub chain: Chain,
    pub to_address: Address,
    pub vault_pub_key: PubKey,
    pub coin: Coin,
    pub memo: String,
    pub max_gas: Coins,
    pub gas_rate: i64,
    pub in_hash: TxId,
    /// Set once the outbound has been observed on its chain.
    pub out_hash: TxId,
}

/// Outbound items scheduled at `height`, in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub height: i64,
    pub tx_array: Vec<TxOutItem>,
}

impl TxOut {
    pub fn new(height: i64) -> Self {
        Self {
            height,
            tx_array: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tx_array.is_empty()
    }

    /// True when every item has been observed outbound.
    pub fn is_dispatched(&self) -> bool {
        self.tx_array.iter().all(|item| !item.out_hash.is_empty())
    }
}
