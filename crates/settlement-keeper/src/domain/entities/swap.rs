//! Observed transactions and the swap requests queued from them.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Asset, Chain, Coins, TxId};

/// A transaction observed on some chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub id: TxId,
    pub chain: Chain,
    pub from_address: Address,
    pub to_address: Address,
    pub coins: Coins,
    pub gas: Coins,
    pub memo: String,
}

impl Tx {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Swap request waiting in the queue until it settles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSwap {
    pub tx: Tx,
    pub target_asset: Asset,
    pub destination: Address,
    pub trade_target: U256,
    pub affiliate_address: Address,
    pub affiliate_basis_points: u64,
    pub signer: Address,
}

impl MsgSwap {
    /// Queue key suffix, `{txid}-{index}`.
    pub fn queue_key(tx_id: &TxId, index: usize) -> String {
        format!("{}-{}", tx_id, index)
    }
}
