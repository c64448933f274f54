//! The affiliate collector module backs accrued affiliate fees.

use super::InvariantReport;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use crate::service::Keeper;
use primitive_types::U256;

pub(super) fn check<KV, C, B>(keeper: &Keeper<KV, C, B>) -> InvariantReport
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    let denom = &keeper.config().native_denom;
    let actual = keeper
        .bank()
        .module_balance(&keeper.config().affiliate_collector_module, denom);

    let collectors = match keeper.get_affiliate_collectors() {
        Ok(collectors) => collectors,
        // Unreadable records only matter if the module holds something.
        Err(_) if actual.is_zero() => return InvariantReport::ok(),
        Err(e) => return InvariantReport::failed(e),
    };
    let expected = collectors
        .iter()
        .fold(U256::zero(), |sum, c| sum.saturating_add(c.rune_amount));

    let mut report = InvariantReport::ok();
    report.compare(denom, expected, actual);
    report
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::AffiliateFeeCollector;
    use crate::domain::prefixes::DbPrefix;
    use crate::test_utils::make_test_keeper;
    use primitive_types::U256;
    use shared_types::Address;

    fn collector(owner: &str, amount: u64) -> AffiliateFeeCollector {
        AffiliateFeeCollector {
            owner_address: Address::new(owner),
            rune_amount: U256::from(amount),
        }
    }

    #[test]
    fn test_collectors_match_module() {
        let mut keeper = make_test_keeper();
        keeper.set_affiliate_collector(&collector("thor1a", 10)).unwrap();
        keeper.set_affiliate_collector(&collector("thor1b", 15)).unwrap();
        keeper
            .bank_mut()
            .set_module_balance("affiliate_collector", "rune", U256::from(25));
        assert!(!keeper.run_invariant("affiliate_collector").unwrap().broken);

        keeper
            .bank_mut()
            .set_module_balance("affiliate_collector", "rune", U256::from(30));
        let report = keeper.run_invariant("affiliate_collector").unwrap();
        assert_eq!(report.messages, vec!["oversolvent: 5rune"]);
    }

    #[test]
    fn test_unreadable_collectors_tolerated_only_when_module_empty() {
        let mut keeper = make_test_keeper();
        keeper
            .set_raw(DbPrefix::AffiliateCollector, "thor1bad", b"\xff")
            .unwrap();
        assert!(!keeper.run_invariant("affiliate_collector").unwrap().broken);

        keeper
            .bank_mut()
            .set_module_balance("affiliate_collector", "rune", U256::from(1));
        let report = keeper.run_invariant("affiliate_collector").unwrap();
        assert!(report.broken);
        assert_eq!(report.messages.len(), 1);
    }
}
