//! Helpers shared by the integration tests.

#![allow(dead_code)]

use primitive_types::U256;
use settlement_keeper::{
    BincodeCodec, BlockHeight, InMemoryBank, InMemoryKVStore, Keeper, KeeperConfig,
    KeeperDependencies, NodeAccount, NodePubKeySet, NodeStatus,
};
use shared_types::{Address, Asset, Coin, PubKey};

pub type TestKeeper = Keeper<InMemoryKVStore, BincodeCodec, InMemoryBank>;

pub const HEIGHT: BlockHeight = BlockHeight(1_000);

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("settlement_keeper=debug")
        .with_test_writer()
        .try_init();
}

/// Keeper over an empty store, with every configured module registered in
/// the bank.
pub fn make_keeper() -> TestKeeper {
    let config = KeeperConfig::default();
    let modules: Vec<String> = config
        .modules()
        .iter()
        .map(|(_, name)| name.to_string())
        .collect();
    let deps = KeeperDependencies {
        kv_store: InMemoryKVStore::new(),
        codec: BincodeCodec,
        bank: InMemoryBank::with_modules(modules.iter().map(String::as_str)),
    };
    Keeper::new(deps, config).expect("default config is valid")
}

pub fn asset(raw: &str) -> Asset {
    raw.parse().expect("valid asset")
}

pub fn rune(amount: u64) -> Coin {
    Coin::new(Asset::rune(), amount)
}

pub fn make_node(name: &str, bond: u64) -> NodeAccount {
    NodeAccount::new(
        Address::new(name),
        NodeStatus::Active,
        NodePubKeySet {
            secp256k1: PubKey::new(format!("{name}-secp")),
            ed25519: PubKey::new(format!("{name}-ed")),
        },
        format!("{name}-cons"),
        U256::from(bond),
        Address::new(name),
        1,
    )
}
