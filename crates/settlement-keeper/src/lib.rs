//! # Settlement Keeper
//!
//! Deterministic state storage and solvency checks for a validator that
//! settles cross-chain swaps through shared liquidity vaults. Every node
//! applies the same operations to this store and must reach byte-identical
//! state, so every read path iterates in key order and nothing depends on
//! hash ordering.
//!
//! ## Architecture
//!
//! ```text
//!  message handlers / end-of-block
//!              │
//!              ▼
//!  ┌────────────────────────────────────────────────────┐
//!  │ Keeper                                             │
//!  │  VaultRegistry · MimirStore · SwapQueue · TxOut    │
//!  │  typed accessors · halt checks · InvariantRoutes   │
//!  └───────────────┬──────────────────┬─────────────────┘
//!                  ▼                  ▼
//!        KeyValueStore + Codec    BankKeeper
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Disjoint Keys | Every prefix ends in `/`, none prefixes another |
//! | 2 | Sorted Iteration | Ranges come back in ascending key order |
//! | 3 | Corruption Is Not Absence | Undecodable payloads are errors |
//! | 4 | Height Monotonicity | Chain and signed heights never regress |
//! | 5 | Asgard Index | Every asgard vault appears exactly once, in write order |
//! | 6 | Funded Vaults Persist | A vault holding funds cannot be deleted |
//! | 7 | Kill Switch | Once released, governance reads return unset for good |
//! | 8 | Solvency | Module balances match the records backing them |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Records, key prefixes, majority rules and the halt model
//! - `ports/` - Port traits (inbound API, outbound SPI)
//! - `service/` - `Keeper`, implementing the inbound ports
//! - `invariants/` - Named solvency checks
//! - `adapters/` - In-memory and RocksDB stores, bincode codec, in-memory bank
//!
//! ## Usage
//!
//! ```ignore
//! use settlement_keeper::{
//!     BincodeCodec, InMemoryBank, InMemoryKVStore, Keeper, KeeperConfig, KeeperDependencies,
//!     InvariantRoutes, VaultRegistry,
//! };
//!
//! let deps = KeeperDependencies {
//!     kv_store: InMemoryKVStore::new(),
//!     codec: BincodeCodec,
//!     bank: InMemoryBank::with_modules(["asgard", "bond", "reserve", "thorchain", "affiliate_collector"]),
//! };
//! let mut keeper = Keeper::new(deps, KeeperConfig::default())?;
//!
//! keeper.set_vault(vault)?;
//! for (name, report) in keeper.run_invariants() {
//!     assert!(!report.broken, "{name}: {:?}", report.messages);
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod invariants;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export key types for convenience
pub use adapters::{BincodeCodec, InMemoryBank, InMemoryKVStore};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use config::KeeperConfig;
pub use domain::entities::*;
pub use domain::errors::{BankError, ConfigError, KVStoreError, KeeperError, SerializationError};
pub use domain::halt::{ArbAllowList, HaltScope, HaltableMsg, MsgAddLiquidity, MsgWithdrawLiquidity};
pub use domain::prefixes::DbPrefix;
pub use invariants::{InvariantReport, InvariantRoute};
pub use ports::inbound::{InvariantRoutes, MimirStore, SwapQueue, TxOutQueue, VaultRegistry};
pub use ports::outbound::{
    BankKeeper, BatchOperation, BlockContext, BlockHeight, KeyValueStore, RecordCodec,
};
pub use service::{EntryIter, Keeper, KeeperDependencies, RecordIter, MIMIR_UNSET};
