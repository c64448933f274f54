//! Coin movements between modules and accounts.
//!
//! Only native coins (the settlement token, synths and derived assets) live
//! in bank modules. Anything else is rejected before the bank is touched.

use super::Keeper;
use crate::domain::errors::KeeperError;
use crate::ports::inbound::MimirStore;
use crate::ports::outbound::{BankKeeper, BlockContext, KeyValueStore, RecordCodec};
use primitive_types::U256;
use shared_types::{Address, Asset, Coin};

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    /// Bank denomination of a native asset.
    pub fn denom_of(&self, asset: &Asset) -> Result<String, KeeperError> {
        if !asset.is_native() {
            return Err(KeeperError::NonNativeCoin {
                asset: asset.to_string(),
            });
        }
        if asset.is_rune() {
            return Ok(self.config.native_denom.clone());
        }
        Ok(asset.native_denom())
    }

    pub fn get_module_balance(&self, module: &str, asset: &Asset) -> Result<U256, KeeperError> {
        let denom = self.denom_of(asset)?;
        Ok(self.bank.module_balance(module, &denom))
    }

    pub fn send_from_module_to_module(
        &mut self,
        from: &str,
        to: &str,
        coin: &Coin,
    ) -> Result<(), KeeperError> {
        let denom = self.denom_of(&coin.asset)?;
        self.bank
            .send_module_to_module(from, to, &denom, coin.amount)?;
        tracing::debug!(from, to, amount = %coin.amount, denom = %denom, "[keeper] module transfer");
        Ok(())
    }

    pub fn send_from_module_to_account(
        &mut self,
        from: &str,
        to: &Address,
        coin: &Coin,
    ) -> Result<(), KeeperError> {
        let denom = self.denom_of(&coin.asset)?;
        self.bank
            .send_module_to_account(from, to, &denom, coin.amount)?;
        Ok(())
    }

    pub fn send_from_account_to_module(
        &mut self,
        from: &Address,
        to: &str,
        coin: &Coin,
    ) -> Result<(), KeeperError> {
        let denom = self.denom_of(&coin.asset)?;
        self.bank
            .send_account_to_module(from, to, &denom, coin.amount)?;
        Ok(())
    }

    /// Mint into `module`. If the minted supply passes the configured
    /// maximum, trading and every chain are halted from this height.
    pub fn mint_to_module(
        &mut self,
        ctx: &dyn BlockContext,
        module: &str,
        coin: &Coin,
    ) -> Result<(), KeeperError> {
        let denom = self.denom_of(&coin.asset)?;
        self.bank.mint_to_module(module, &denom, coin.amount)?;

        if !coin.asset.is_rune() {
            return Ok(());
        }
        let max_key = self.config.max_supply_key.clone();
        let max_supply = self.get_mimir(&max_key)?;
        if max_supply <= 0 {
            return Ok(());
        }
        let supply = self.bank.supply(&denom);
        if supply > U256::from(max_supply as u64) {
            let height = ctx.block_height();
            tracing::error!(
                supply = %supply,
                max_supply,
                height,
                "[keeper] supply above maximum, halting trading and chains"
            );
            self.set_mimir("HaltTrading", height)?;
            self.set_mimir("HaltChainGlobal", height)?;
        }
        Ok(())
    }

    pub fn burn_from_module(&mut self, module: &str, coin: &Coin) -> Result<(), KeeperError> {
        let denom = self.denom_of(&coin.asset)?;
        self.bank.burn_from_module(module, &denom, coin.amount)?;
        tracing::debug!(module, amount = %coin.amount, denom = %denom, "[keeper] burned");
        Ok(())
    }
}
