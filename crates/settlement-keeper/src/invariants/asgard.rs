//! The asgard module backs pool rune, synth pool balances and native coins
//! carried by queued swaps.

use super::InvariantReport;
use crate::domain::errors::KeeperError;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use crate::service::Keeper;
use primitive_types::U256;
use shared_types::Asset;
use std::collections::BTreeMap;

pub(super) fn check<KV, C, B>(keeper: &Keeper<KV, C, B>) -> InvariantReport
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    let expected = match expected_balances(keeper) {
        Ok(expected) => expected,
        Err(e) => return InvariantReport::failed(e),
    };
    let actual = keeper.bank().module_balances(&keeper.config().asgard_module);

    let mut report = InvariantReport::ok();
    report.compare_all(&expected, &actual);
    report
}

fn expected_balances<KV, C, B>(
    keeper: &Keeper<KV, C, B>,
) -> Result<BTreeMap<String, U256>, KeeperError>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    let mut expected: BTreeMap<String, U256> = BTreeMap::new();
    let mut add = |denom: String, amount: U256| {
        if amount.is_zero() {
            return;
        }
        let entry = expected.entry(denom).or_default();
        *entry = entry.saturating_add(amount);
    };

    let rune_denom = keeper.denom_of(&Asset::rune())?;
    for pool in keeper.pool_iter() {
        let pool = pool?;
        if pool.asset.is_synthetic() {
            add(keeper.denom_of(&pool.asset)?, pool.balance_asset);
        } else if !pool.asset.is_derived() {
            add(
                rune_denom.clone(),
                pool.balance_rune.saturating_add(pool.pending_inbound_rune),
            );
        }
    }

    for msg in keeper.swap_queue_iter() {
        let msg = msg?;
        for coin in msg.tx.coins.iter().filter(|c| c.is_native()) {
            add(keeper.denom_of(&coin.asset)?, coin.amount);
        }
    }
    Ok(expected)
}
