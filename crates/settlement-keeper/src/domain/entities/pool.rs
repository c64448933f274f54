//! Liquidity pools.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::Asset;
use std::fmt;

/// Pool lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolStatus {
    #[default]
    Available,
    Staged,
    Suspended,
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoolStatus::Available => "Available",
            PoolStatus::Staged => "Staged",
            PoolStatus::Suspended => "Suspended",
        };
        f.write_str(name)
    }
}

/// A pool pairing the native token with one external asset.
///
/// `pending_inbound_*` hold contributions that arrived on one side only and
/// are not yet matched. They are custodied but not part of the pool depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub asset: Asset,
    pub balance_rune: U256,
    pub balance_asset: U256,
    pub lp_units: U256,
    pub synth_units: U256,
    pub pending_inbound_rune: U256,
    pub pending_inbound_asset: U256,
    pub status: PoolStatus,
    pub status_since: i64,
    pub decimals: i64,
}

impl Pool {
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            ..Self::default()
        }
    }

    /// The zero-value pool returned for unknown assets has no asset.
    pub fn is_empty(&self) -> bool {
        self.asset.is_empty()
    }

    pub fn is_available(&self) -> bool {
        self.status == PoolStatus::Available
    }

    /// Pool units including those backing synths.
    pub fn total_units(&self) -> U256 {
        self.lp_units.saturating_add(self.synth_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_is_empty() {
        let pool = Pool::default();
        assert!(pool.is_empty());
        assert!(pool.is_available());
        assert!(!Pool::new(Asset::rune()).is_empty());
    }
}
