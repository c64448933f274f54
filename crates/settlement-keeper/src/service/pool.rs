//! Pools, liquidity providers and per-height liquidity fees.

use super::{Keeper, RecordIter};
use crate::domain::entities::{LiquidityProvider, Pool};
use crate::domain::errors::KeeperError;
use crate::domain::prefixes::DbPrefix;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use primitive_types::U256;
use shared_types::{Address, Asset};

const POOL: &str = "pool";
const LIQUIDITY_PROVIDER: &str = "liquidity provider";
const LIQUIDITY_FEE: &str = "liquidity fee";

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    // =========================================================================
    // POOLS
    // =========================================================================

    pub fn pool_iter(&self) -> RecordIter<'_, Pool, C> {
        self.iter_records(POOL, DbPrefix::Pool.iter_prefix())
    }

    /// Every pool, ordered by asset.
    pub fn get_pools(&self) -> Result<Vec<Pool>, KeeperError> {
        self.pool_iter().collect()
    }

    /// The pool for `asset`, or an empty pool.
    pub fn get_pool(&self, asset: &Asset) -> Result<Pool, KeeperError> {
        let key = DbPrefix::Pool.key(&asset.to_string());
        Ok(self.get_record(POOL, &key)?.unwrap_or_default())
    }

    pub fn pool_exists(&self, asset: &Asset) -> Result<bool, KeeperError> {
        self.has_key(&DbPrefix::Pool.key(&asset.to_string()))
    }

    pub fn set_pool(&mut self, pool: &Pool) -> Result<(), KeeperError> {
        if pool.asset.is_empty() {
            return Err(KeeperError::Validation {
                entity: POOL,
                reason: "asset cannot be empty".into(),
            });
        }
        let key = DbPrefix::Pool.key(&pool.asset.to_string());
        self.set_record(POOL, &key, pool)
    }

    pub fn remove_pool(&mut self, asset: &Asset) -> Result<(), KeeperError> {
        self.delete_key(&DbPrefix::Pool.key(&asset.to_string()))
    }

    // =========================================================================
    // LIQUIDITY PROVIDERS
    // =========================================================================

    /// Providers of one pool, ordered by address.
    pub fn liquidity_provider_iter(&self, asset: &Asset) -> RecordIter<'_, LiquidityProvider, C> {
        let prefix = DbPrefix::LiquidityProvider.key(&LiquidityProvider::pool_key(asset));
        self.iter_records(LIQUIDITY_PROVIDER, prefix.as_bytes())
    }

    pub fn get_liquidity_providers(
        &self,
        asset: &Asset,
    ) -> Result<Vec<LiquidityProvider>, KeeperError> {
        self.liquidity_provider_iter(asset).collect()
    }

    /// The position of `address` in `asset`'s pool, or an empty position.
    pub fn get_liquidity_provider(
        &self,
        asset: &Asset,
        address: &Address,
    ) -> Result<LiquidityProvider, KeeperError> {
        let key = DbPrefix::LiquidityProvider.key(&LiquidityProvider::key_for(asset, address));
        Ok(self
            .get_record(LIQUIDITY_PROVIDER, &key)?
            .unwrap_or_else(|| {
                LiquidityProvider::new(asset.clone(), address.clone(), Address::default())
            }))
    }

    pub fn set_liquidity_provider(&mut self, lp: &LiquidityProvider) -> Result<(), KeeperError> {
        if lp.is_empty() {
            return Err(KeeperError::Validation {
                entity: LIQUIDITY_PROVIDER,
                reason: "asset and address are required".into(),
            });
        }
        let key = DbPrefix::LiquidityProvider.key(&lp.key());
        self.set_record(LIQUIDITY_PROVIDER, &key, lp)
    }

    pub fn remove_liquidity_provider(&mut self, lp: &LiquidityProvider) -> Result<(), KeeperError> {
        self.delete_key(&DbPrefix::LiquidityProvider.key(&lp.key()))
    }

    // =========================================================================
    // LIQUIDITY FEES
    // =========================================================================

    /// Add `fee` to both the height total and the pool's share at `height`.
    pub fn add_to_liquidity_fees(
        &mut self,
        height: i64,
        asset: &Asset,
        fee: U256,
    ) -> Result<(), KeeperError> {
        let total = self.get_total_liquidity_fees(height)?.saturating_add(fee);
        let pool = self.get_pool_liquidity_fees(height, asset)?.saturating_add(fee);
        self.set_record(
            LIQUIDITY_FEE,
            &DbPrefix::TotalLiquidityFee.key(&height.to_string()),
            &total,
        )?;
        self.set_record(
            LIQUIDITY_FEE,
            &DbPrefix::PoolLiquidityFee.key(&pool_fee_suffix(height, asset)),
            &pool,
        )
    }

    pub fn get_total_liquidity_fees(&self, height: i64) -> Result<U256, KeeperError> {
        let key = DbPrefix::TotalLiquidityFee.key(&height.to_string());
        Ok(self.get_record(LIQUIDITY_FEE, &key)?.unwrap_or_default())
    }

    pub fn get_pool_liquidity_fees(&self, height: i64, asset: &Asset) -> Result<U256, KeeperError> {
        let key = DbPrefix::PoolLiquidityFee.key(&pool_fee_suffix(height, asset));
        Ok(self.get_record(LIQUIDITY_FEE, &key)?.unwrap_or_default())
    }
}

fn pool_fee_suffix(height: i64, asset: &Asset) -> String {
    format!("{}-{}", height, asset)
}
