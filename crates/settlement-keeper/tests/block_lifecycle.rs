//! # Block Lifecycle Tests
//!
//! Drive a keeper through the writes one block makes and check that the
//! solvency routes stay clean when the bank moves in step with the records.

mod common;

use common::{asset, init_logging, make_keeper, make_node, rune, TestKeeper, HEIGHT};
use primitive_types::U256;
use settlement_keeper::{
    InvariantRoutes, LiquidityProvider, MimirStore, MsgSwap, Pool, SwapQueue, Tx, TxOutItem,
    TxOutQueue, Vault, VaultKind, VaultRegistry, VaultStatus,
};
use shared_types::{Address, Chain, Coin, PubKey, TxId};

// =============================================================================
// TEST HELPERS
// =============================================================================

fn assert_solvent(keeper: &TestKeeper) {
    for (name, report) in keeper.run_invariants() {
        assert!(!report.broken, "{name}: {:?}", report.messages);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[test]
fn test_full_block_stays_solvent() {
    init_logging();
    let mut keeper = make_keeper();

    // Nodes bond into the bond module.
    for (name, bond) in [("node1", 1_000u64), ("node2", 2_000), ("node3", 3_000)] {
        keeper.set_node_account(&HEIGHT, make_node(name, bond)).unwrap();
        keeper.mint_to_module(&HEIGHT, "bond", &rune(bond)).unwrap();
    }

    // A pool funded with rune in asgard.
    let btc = asset("BTC.BTC");
    let mut pool = Pool::new(btc.clone());
    pool.balance_rune = U256::from(5_000);
    pool.balance_asset = U256::from(50);
    pool.lp_units = U256::from(5_000);
    keeper.set_pool(&pool).unwrap();
    let mut lp = LiquidityProvider::new(btc.clone(), Address::new("thor1lp"), Address::new("bc1lp"));
    lp.units = U256::from(5_000);
    keeper.set_liquidity_provider(&lp).unwrap();
    keeper.mint_to_module(&HEIGHT, "asgard", &rune(5_000)).unwrap();

    // A swap carrying rune waits in the queue, its coins already in asgard.
    let mut swap_tx = Tx {
        id: TxId::new("a1b2"),
        chain: Chain::thor(),
        from_address: Address::new("thor1user"),
        memo: "=:BTC.BTC:bc1user".into(),
        ..Tx::default()
    };
    swap_tx.coins.add(rune(250));
    keeper.mint_to_module(&HEIGHT, "asgard", &rune(250)).unwrap();
    keeper
        .set_swap_queue_item(
            MsgSwap {
                tx: swap_tx,
                target_asset: btc.clone(),
                destination: Address::new("bc1user"),
                ..MsgSwap::default()
            },
            0,
        )
        .unwrap();

    keeper
        .set_vault(Vault::new(
            1,
            VaultStatus::Active,
            VaultKind::Asgard,
            PubKey::new("asgard-pk"),
            vec![Chain::new("BTC").unwrap()],
        ))
        .unwrap();

    assert_solvent(&keeper);

    // Settling the swap: it leaves the queue and its rune joins the pool.
    keeper.remove_swap_queue_item(&TxId::new("a1b2"), 0).unwrap();
    pool.balance_rune = pool.balance_rune + U256::from(250);
    keeper.set_pool(&pool).unwrap();
    keeper
        .append_tx_out(
            HEIGHT.0,
            TxOutItem {
                chain: Chain::new("BTC").unwrap(),
                to_address: Address::new("bc1user"),
                vault_pub_key: PubKey::new("asgard-pk"),
                coin: Coin::new(btc, 1u64),
                in_hash: TxId::new("a1b2"),
                ..TxOutItem::default()
            },
        )
        .unwrap();

    assert_solvent(&keeper);
    assert_eq!(keeper.get_tx_out(HEIGHT.0).unwrap().tx_array.len(), 1);
    assert_eq!(keeper.get_mimir("HaltTrading").unwrap(), -1);
}

#[test]
fn test_stray_protocol_balance_breaks_only_its_route() {
    init_logging();
    let mut keeper = make_keeper();
    keeper.mint_to_module(&HEIGHT, "thorchain", &rune(7)).unwrap();

    let broken: Vec<&str> = keeper
        .run_invariants()
        .into_iter()
        .filter(|(_, report)| report.broken)
        .map(|(name, _)| name)
        .collect();
    assert_eq!(broken, vec!["thorchain"]);
}

#[test]
fn test_routes_are_listed_in_order() {
    let names: Vec<&str> = TestKeeper::invariant_routes()
        .iter()
        .map(|route| route.name)
        .collect();
    assert_eq!(
        names,
        vec!["asgard", "bond", "thorchain", "affiliate_collector", "pools"]
    );
}
