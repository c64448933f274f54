//! Pool units and pending amounts match the sum over the pool's providers.
//!
//! Only layer-1 pools are checked. A pool recording more than its providers
//! back is insolvent; one recording less is oversolvent.

use super::InvariantReport;
use crate::domain::entities::Pool;
use crate::domain::errors::KeeperError;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use crate::service::Keeper;
use primitive_types::U256;

#[derive(Default)]
struct ProviderTotals {
    units: U256,
    pending_rune: U256,
    pending_asset: U256,
}

pub(super) fn check<KV, C, B>(keeper: &Keeper<KV, C, B>) -> InvariantReport
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    let mut report = InvariantReport::ok();
    for pool in keeper.pool_iter() {
        let pool = match pool {
            Ok(pool) => pool,
            Err(e) => {
                report.push(e.to_string());
                continue;
            }
        };
        if pool.asset.is_native() {
            continue;
        }
        match provider_totals(keeper, &pool) {
            Ok(totals) => compare_pool(&mut report, &pool, &totals),
            Err(e) => report.push(format!("{}: {}", pool.asset, e)),
        }
    }
    report
}

fn provider_totals<KV, C, B>(
    keeper: &Keeper<KV, C, B>,
    pool: &Pool,
) -> Result<ProviderTotals, KeeperError>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    let mut totals = ProviderTotals::default();
    for lp in keeper.liquidity_provider_iter(&pool.asset) {
        let lp = lp?;
        totals.units = totals.units.saturating_add(lp.units);
        totals.pending_rune = totals.pending_rune.saturating_add(lp.pending_rune);
        totals.pending_asset = totals.pending_asset.saturating_add(lp.pending_asset);
    }
    Ok(totals)
}

fn compare_pool(report: &mut InvariantReport, pool: &Pool, totals: &ProviderTotals) {
    let checks = [
        (pool.lp_units, totals.units, "units"),
        (pool.pending_inbound_rune, totals.pending_rune, "pending rune"),
        (pool.pending_inbound_asset, totals.pending_asset, "pending asset"),
    ];
    for (recorded, backed, kind) in checks {
        if recorded > backed {
            report.push(format!("{} insolvent: {} {}", pool.asset, recorded - backed, kind));
        } else if recorded < backed {
            report.push(format!("{} oversolvent: {} {}", pool.asset, backed - recorded, kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::{LiquidityProvider, Pool};
    use crate::test_utils::{asset, make_test_keeper};
    use primitive_types::U256;
    use shared_types::Address;

    fn provider(pool: &str, address: &str, units: u64) -> LiquidityProvider {
        let mut lp = LiquidityProvider::new(asset(pool), Address::new(address), Address::default());
        lp.units = U256::from(units);
        lp
    }

    #[test]
    fn test_pool_units_above_providers_is_insolvent() {
        let mut keeper = make_test_keeper();
        let mut pool = Pool::new(asset("BTC.BTC"));
        pool.lp_units = U256::from(100);
        keeper.set_pool(&pool).unwrap();
        keeper
            .set_liquidity_provider(&provider("BTC.BTC", "thor1lp", 90))
            .unwrap();

        let report = keeper.run_invariant("pools").unwrap();
        assert!(report.broken);
        assert_eq!(report.messages, vec!["BTC.BTC insolvent: 10 units"]);
    }

    #[test]
    fn test_pending_amounts_are_compared() {
        let mut keeper = make_test_keeper();
        let mut pool = Pool::new(asset("ETH.ETH"));
        pool.lp_units = U256::from(10);
        pool.pending_inbound_asset = U256::from(3);
        keeper.set_pool(&pool).unwrap();
        let mut lp = provider("ETH.ETH", "thor1lp", 10);
        lp.pending_rune = U256::from(4);
        lp.pending_asset = U256::from(3);
        keeper.set_liquidity_provider(&lp).unwrap();

        let report = keeper.run_invariant("pools").unwrap();
        assert_eq!(report.messages, vec!["ETH.ETH oversolvent: 4 pending rune"]);
    }

    #[test]
    fn test_similar_pool_names_do_not_mix() {
        let mut keeper = make_test_keeper();
        for name in ["BSC.BNB", "BSC.BNBX"] {
            let mut pool = Pool::new(asset(name));
            pool.lp_units = U256::from(5);
            keeper.set_pool(&pool).unwrap();
            keeper.set_liquidity_provider(&provider(name, "thor1lp", 5)).unwrap();
        }
        assert!(!keeper.run_invariant("pools").unwrap().broken);
    }

    #[test]
    fn test_native_pools_are_skipped() {
        let mut keeper = make_test_keeper();
        let mut pool = Pool::new(asset("BTC/BTC"));
        pool.lp_units = U256::from(100);
        keeper.set_pool(&pool).unwrap();
        assert!(!keeper.run_invariant("pools").unwrap().broken);
    }
}
