//! Liquidity provider positions.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Asset, TxId};

/// One provider's position in one pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityProvider {
    pub asset: Asset,
    pub rune_address: Address,
    pub asset_address: Address,
    pub last_add_height: i64,
    pub last_withdraw_height: i64,
    pub units: U256,
    pub pending_rune: U256,
    pub pending_asset: U256,
    pub pending_tx_id: TxId,
    pub rune_deposit_value: U256,
    pub asset_deposit_value: U256,
}

impl LiquidityProvider {
    pub fn new(asset: Asset, rune_address: Address, asset_address: Address) -> Self {
        Self {
            asset,
            rune_address,
            asset_address,
            ..Self::default()
        }
    }

    /// Address identifying the position: the native address when present.
    pub fn address(&self) -> &Address {
        if self.rune_address.is_empty() {
            &self.asset_address
        } else {
            &self.rune_address
        }
    }

    pub fn is_empty(&self) -> bool {
        self.asset.is_empty() || self.address().is_empty()
    }

    /// Storage key suffix, `{asset}/{address}`.
    pub fn key(&self) -> String {
        Self::key_for(&self.asset, self.address())
    }

    pub fn key_for(asset: &Asset, address: &Address) -> String {
        format!("{}/{}", asset, address)
    }

    /// Suffix shared by every provider of `asset`.
    pub fn pool_key(asset: &Asset) -> String {
        format!("{}/", asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefers_native_address() {
        let btc: Asset = "BTC.BTC".parse().unwrap();
        let lp = LiquidityProvider::new(btc.clone(), "thor1lp".into(), "bc1lp".into());
        assert_eq!(lp.key(), "BTC.BTC/thor1lp");

        let asym = LiquidityProvider::new(btc, Address::default(), "bc1lp".into());
        assert_eq!(asym.key(), "BTC.BTC/bc1lp");
        assert!(!asym.is_empty());
    }
}
