use crate::adapters::{BincodeCodec, InMemoryBank, InMemoryKVStore};
use crate::config::KeeperConfig;
use crate::domain::entities::{NodeAccount, NodePubKeySet, NodeStatus, Vault, VaultKind, VaultStatus};
use crate::ports::outbound::BlockHeight;
use crate::service::{Keeper, KeeperDependencies};
use shared_types::{Address, Asset, Chain, PubKey, SoftwareVersion};

pub type TestKeeper = Keeper<InMemoryKVStore, BincodeCodec, InMemoryBank>;

pub const TEST_HEIGHT: BlockHeight = BlockHeight(100);

pub fn make_test_keeper() -> TestKeeper {
    make_test_keeper_with(KeeperConfig::default())
}

pub fn make_test_keeper_with(config: KeeperConfig) -> TestKeeper {
    let mut modules: Vec<&str> = config.modules().iter().map(|(_, name)| *name).collect();
    modules.sort_unstable();
    let deps = KeeperDependencies {
        kv_store: InMemoryKVStore::new(),
        codec: BincodeCodec,
        bank: InMemoryBank::with_modules(modules),
    };
    Keeper::new(deps, config).unwrap()
}

pub fn asset(raw: &str) -> Asset {
    raw.parse().unwrap()
}

pub fn chain(raw: &str) -> Chain {
    Chain::new(raw).unwrap()
}

/// A node with distinct keys derived from its name, running 1.0.0.
pub fn node(name: &str, status: NodeStatus) -> NodeAccount {
    let mut na = NodeAccount::new(
        Address::new(name),
        status,
        NodePubKeySet {
            secp256k1: PubKey::new(format!("{}-secp", name)),
            ed25519: PubKey::new(format!("{}-ed", name)),
        },
        format!("{}-cons", name),
        Default::default(),
        Address::new(name),
        1,
    );
    na.version = SoftwareVersion::new(1, 0, 0);
    na
}

pub fn asgard(pub_key: &str, status: VaultStatus) -> Vault {
    Vault::new(1, status, VaultKind::Asgard, PubKey::new(pub_key), vec![chain("BTC")])
}
