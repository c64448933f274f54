//! The bond module backs node bonds and pending bond rewards.

use super::InvariantReport;
use crate::domain::errors::KeeperError;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use crate::service::Keeper;
use primitive_types::U256;

pub(super) fn check<KV, C, B>(keeper: &Keeper<KV, C, B>) -> InvariantReport
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    let expected = match expected_bond(keeper) {
        Ok(expected) => expected,
        Err(e) => return InvariantReport::failed(e),
    };
    let denom = &keeper.config().native_denom;
    let actual = keeper
        .bank()
        .module_balance(&keeper.config().bond_module, denom);

    let mut report = InvariantReport::ok();
    report.compare(denom, expected, actual);
    report
}

fn expected_bond<KV, C, B>(keeper: &Keeper<KV, C, B>) -> Result<U256, KeeperError>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    let mut bonded = U256::zero();
    for na in keeper.node_account_iter() {
        bonded = bonded.saturating_add(na?.bond);
    }
    Ok(bonded.saturating_add(keeper.get_network()?.bond_reward_rune))
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::{Network, NodeAccount, NodeStatus};
    use crate::test_utils::{make_test_keeper, node, TEST_HEIGHT};
    use primitive_types::U256;

    #[test]
    fn test_bonds_plus_rewards_match_module() {
        let mut keeper = make_test_keeper();
        for (name, bond) in [("node1", 100u64), ("node2", 250)] {
            let mut na: NodeAccount = node(name, NodeStatus::Active);
            na.bond = U256::from(bond);
            keeper.set_node_account(&TEST_HEIGHT, na).unwrap();
        }
        keeper
            .set_network(&Network {
                bond_reward_rune: U256::from(50),
                ..Network::default()
            })
            .unwrap();
        keeper
            .bank_mut()
            .set_module_balance("bond", "rune", U256::from(400));

        assert!(!keeper.run_invariant("bond").unwrap().broken);

        keeper
            .bank_mut()
            .set_module_balance("bond", "rune", U256::from(390));
        let report = keeper.run_invariant("bond").unwrap();
        assert_eq!(report.messages, vec!["insolvent: 10rune"]);
    }
}
