//! Adapters implementing the outbound ports.

pub mod bank;
pub mod codec;
pub mod storage;

pub use bank::InMemoryBank;
pub use codec::BincodeCodec;
pub use storage::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use storage::{RocksDbConfig, RocksDbStore};
