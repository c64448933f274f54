//! # Outbound Ports (Driven Ports)
//!
//! Capabilities the keeper requires from its host.
//!
//! - [`KeyValueStore`]: sorted byte store. Production: `RocksDbStore`
//!   (feature `rocksdb`). Testing: `InMemoryKVStore`.
//! - [`RecordCodec`]: encode/decode of every record type. `BincodeCodec`.
//! - [`BankKeeper`]: module and account balances. Testing: `InMemoryBank`.
//! - [`BlockContext`]: the executing block.

use crate::domain::errors::{BankError, KVStoreError, SerializationError};
use primitive_types::U256;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Address;
use std::collections::BTreeMap;

/// Lazy, ordered `(key, value)` cursor over one prefix.
///
/// The underlying cursor is released when this is dropped, so every exit path
/// of the consumer (early return and `?` included) releases it.
pub type KvCursor<'a> = Box<dyn Iterator<Item = Result<(Vec<u8>, Vec<u8>), KVStoreError>> + 'a>;

/// Abstract interface for key-value database operations.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    /// Iterate keys starting with `prefix` in ascending byte order.
    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> KvCursor<'a>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Marshal records to bytes and back.
///
/// Decoding malformed input must fail rather than produce a default record.
pub trait RecordCodec: Send + Sync {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, SerializationError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError>;
}

/// Ledger transfers and balance queries by module name and denomination.
pub trait BankKeeper: Send + Sync {
    /// Balance of one denomination held by a module. Zero when absent.
    fn module_balance(&self, module: &str, denom: &str) -> U256;

    /// Every nonzero balance held by a module, sorted by denomination.
    fn module_balances(&self, module: &str) -> BTreeMap<String, U256>;

    /// Total supply of a denomination.
    fn supply(&self, denom: &str) -> U256;

    fn send_module_to_module(
        &mut self,
        from: &str,
        to: &str,
        denom: &str,
        amount: U256,
    ) -> Result<(), BankError>;

    fn send_module_to_account(
        &mut self,
        from: &str,
        to: &Address,
        denom: &str,
        amount: U256,
    ) -> Result<(), BankError>;

    fn send_account_to_module(
        &mut self,
        from: &Address,
        to: &str,
        denom: &str,
        amount: U256,
    ) -> Result<(), BankError>;

    fn mint_to_module(&mut self, module: &str, denom: &str, amount: U256) -> Result<(), BankError>;

    fn burn_from_module(&mut self, module: &str, denom: &str, amount: U256)
        -> Result<(), BankError>;
}

/// The block being executed.
pub trait BlockContext {
    fn block_height(&self) -> i64;
}

/// Context fixed at one height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockHeight(pub i64);

impl BlockContext for BlockHeight {
    fn block_height(&self) -> i64 {
        self.0
    }
}
