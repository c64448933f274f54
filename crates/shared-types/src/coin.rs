//! Amounts of assets.

use crate::asset::Asset;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of a single asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub asset: Asset,
    pub amount: U256,
}

impl Coin {
    pub fn new(asset: Asset, amount: impl Into<U256>) -> Self {
        Self {
            asset,
            amount: amount.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.asset.is_empty() || self.amount.is_zero()
    }

    pub fn is_native(&self) -> bool {
        self.asset.is_native()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.asset)
    }
}

/// A list of coins with at most one entry per asset, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the existing entry for the asset, or append a new one.
    pub fn add(&mut self, coin: Coin) {
        match self.0.iter_mut().find(|c| c.asset == coin.asset) {
            Some(existing) => existing.amount = existing.amount.saturating_add(coin.amount),
            None => self.0.push(coin),
        }
    }

    /// Subtract from the entry for the asset, flooring at zero.
    pub fn safe_sub(&mut self, coin: &Coin) {
        if let Some(existing) = self.0.iter_mut().find(|c| c.asset == coin.asset) {
            existing.amount = existing.amount.saturating_sub(coin.amount);
        }
    }

    /// Amount held of `asset`, zero when absent.
    pub fn amount_of(&self, asset: &Asset) -> U256 {
        self.0
            .iter()
            .find(|c| &c.asset == asset)
            .map(|c| c.amount)
            .unwrap_or_default()
    }

    /// True when every entry carries a zero amount.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| c.amount.is_zero())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        let mut merged = Coins::new();
        for coin in coins {
            merged.add(coin);
        }
        merged
    }
}

impl FromIterator<Coin> for Coins {
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc() -> Asset {
        "BTC.BTC".parse().unwrap()
    }

    #[test]
    fn test_add_merges_same_asset() {
        let mut coins = Coins::new();
        coins.add(Coin::new(btc(), 5u64));
        coins.add(Coin::new(Asset::rune(), 7u64));
        coins.add(Coin::new(btc(), 3u64));
        assert_eq!(coins.len(), 2);
        assert_eq!(coins.amount_of(&btc()), U256::from(8u64));
    }

    #[test]
    fn test_safe_sub_floors_at_zero() {
        let mut coins: Coins = vec![Coin::new(btc(), 5u64)].into();
        coins.safe_sub(&Coin::new(btc(), 9u64));
        assert!(coins.is_empty());
        assert_eq!(coins.amount_of(&Asset::rune()), U256::zero());
    }
}
