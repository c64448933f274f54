//! # Governance Tests
//!
//! Outside the crate, governance values can only be written through
//! `MimirStore` and the keeper's typed methods. Once the kill switch is
//! released, none of them can bring it back.

mod common;

use common::{init_logging, make_keeper, make_node, rune, HEIGHT};
use settlement_keeper::{DbPrefix, MimirStore, MIMIR_UNSET};
use shared_types::Address;

#[test]
fn test_released_kill_switch_survives_every_public_write() {
    init_logging();
    let mut keeper = make_keeper();
    keeper.set_node_account(&HEIGHT, make_node("node1", 100)).unwrap();
    keeper.set_mimir("Foo", 4).unwrap();

    keeper.set_mimir("ReleaseTheKraken", 0).unwrap();
    assert!(keeper.kill_switch().unwrap().is_released());

    keeper.delete_mimir("ReleaseTheKraken").unwrap();
    keeper.set_mimir("ReleaseTheKraken", -1).unwrap();
    keeper
        .set_node_mimir("ReleaseTheKraken", -1, Address::new("node1"))
        .unwrap();
    keeper.set_mimir("Foo", 5).unwrap();
    keeper.delete_mimir("Foo").unwrap();
    keeper.mint_to_module(&HEIGHT, "reserve", &rune(10)).unwrap();

    assert!(keeper.kill_switch().unwrap().is_released());
    assert_eq!(keeper.get_mimir("Foo").unwrap(), MIMIR_UNSET);
    assert!(keeper.list_mimirs().unwrap().is_empty());
    assert!(keeper
        .get_raw(DbPrefix::Mimir, "ReleaseTheKraken")
        .unwrap()
        .is_some());
}

#[test]
fn test_armed_switch_allows_admin_writes() {
    let mut keeper = make_keeper();
    keeper.set_mimir("Foo", 4).unwrap();
    assert_eq!(keeper.get_mimir("Foo").unwrap(), 4);
    assert!(!keeper.kill_switch().unwrap().is_released());

    keeper.delete_mimir("Foo").unwrap();
    assert_eq!(keeper.get_mimir("Foo").unwrap(), MIMIR_UNSET);
}
