//! Trading and chain halt checks driven by governance values.
//!
//! A halt value `h` is in force at height `H` when `0 < h < H`, except
//! `NodePauseChainGlobal`, which pauses until `h > H` stops holding.

use super::Keeper;
use crate::domain::errors::KeeperError;
use crate::domain::halt::{HaltScope, HaltableMsg};
use crate::ports::inbound::MimirStore;
use crate::ports::outbound::{BankKeeper, BlockContext, KeyValueStore, RecordCodec};
use shared_types::Chain;

fn in_force(value: i64, height: i64) -> bool {
    value > 0 && value < height
}

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    fn mimir_in_force(&self, key: &str, height: i64) -> Result<bool, KeeperError> {
        Ok(in_force(self.get_mimir(key)?, height))
    }

    /// Whether `msg` must be rejected because trading is halted.
    pub fn is_trading_halt(
        &self,
        ctx: &dyn BlockContext,
        msg: &HaltableMsg,
    ) -> Result<bool, KeeperError> {
        if let Some(sender) = msg.bypass_candidate() {
            if self.config.arb_allow_list.contains(sender) {
                tracing::debug!(sender = %sender, "[keeper] allow-listed sender bypasses trading halt");
                return Ok(false);
            }
        }
        if let HaltScope::Chains(chains) = msg.halt_scope() {
            for chain in chains.iter().filter(|c| !c.is_empty()) {
                if self.is_chain_trading_halted(ctx, chain)? {
                    return Ok(true);
                }
            }
        }
        self.is_global_trading_halted(ctx)
    }

    pub fn is_global_trading_halted(&self, ctx: &dyn BlockContext) -> Result<bool, KeeperError> {
        let height = ctx.block_height();
        if self.mimir_in_force("HaltTrading", height)? {
            tracing::info!("[keeper] global trading halt in force");
            return Ok(true);
        }
        self.ragnarok_in_progress()
    }

    pub fn is_chain_trading_halted(
        &self,
        ctx: &dyn BlockContext,
        chain: &Chain,
    ) -> Result<bool, KeeperError> {
        if self.mimir_in_force(&format!("Halt{}Trading", chain), ctx.block_height())? {
            tracing::info!(chain = %chain, "[keeper] trading is halted");
            return Ok(true);
        }
        self.is_chain_halted(ctx, chain)
    }

    pub fn is_chain_halted(&self, ctx: &dyn BlockContext, chain: &Chain) -> Result<bool, KeeperError> {
        let height = ctx.block_height();
        if self.mimir_in_force("HaltChainGlobal", height)? {
            tracing::info!("[keeper] all chains halted");
            return Ok(true);
        }
        if self.get_mimir("NodePauseChainGlobal")? > height {
            tracing::info!("[keeper] all chains paused by node operators");
            return Ok(true);
        }
        if self.mimir_in_force(&format!("Halt{}Chain", chain), height)? {
            tracing::info!(chain = %chain, "[keeper] chain halted by admin or double-spend check");
            return Ok(true);
        }
        if self.mimir_in_force(&format!("SolvencyHalt{}Chain", chain), height)? {
            tracing::info!(chain = %chain, "[keeper] chain halted by solvency check");
            return Ok(true);
        }
        Ok(false)
    }

    pub fn is_lp_paused(&self, ctx: &dyn BlockContext, chain: &Chain) -> Result<bool, KeeperError> {
        let height = ctx.block_height();
        if self.mimir_in_force("PauseLP", height)? {
            return Ok(true);
        }
        if self.mimir_in_force(&format!("PauseLP{}", chain), height)? {
            tracing::info!(chain = %chain, "[keeper] chain has paused LP actions");
            return Ok(true);
        }
        Ok(false)
    }
}
