//! The protocol module never holds a balance.

use super::InvariantReport;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use crate::service::Keeper;

pub(super) fn check<KV, C, B>(keeper: &Keeper<KV, C, B>) -> InvariantReport
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    let mut report = InvariantReport::ok();
    let balances = keeper
        .bank()
        .module_balances(&keeper.config().protocol_module);
    for (denom, amount) in balances.iter().filter(|(_, a)| !a.is_zero()) {
        report.push(format!("oversolvent: {}{}", amount, denom));
    }
    report
}

#[cfg(test)]
mod tests {
    use crate::test_utils::make_test_keeper;
    use primitive_types::U256;

    #[test]
    fn test_any_protocol_balance_is_oversolvent() {
        let mut keeper = make_test_keeper();
        assert!(!keeper.run_invariant("thorchain").unwrap().broken);

        keeper
            .bank_mut()
            .set_module_balance("thorchain", "rune", U256::from(3));
        let report = keeper.run_invariant("thorchain").unwrap();
        assert!(report.broken);
        assert_eq!(report.messages, vec!["oversolvent: 3rune"]);
    }
}
