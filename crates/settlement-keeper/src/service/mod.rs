//! # Keeper Service
//!
//! `Keeper` owns every record in the store. External code only ever sees
//! copies returned by accessors.
//!
//! ## Architecture
//!
//! This service:
//! 1. Verifies the prefix table on construction
//! 2. Implements the inbound ports (`VaultRegistry`, `MimirStore`,
//!    `SwapQueue`, `TxOutQueue`, `InvariantRoutes`)
//! 3. Exposes typed accessors for every other record
//! 4. Uses dependency injection for the store, the codec and the bank
//!
//! All writes take `&mut self`. Execution within a block is sequential, and
//! the borrow checker enforces that no two writers interleave.

mod bank;
mod halt;
mod mimir;
mod network;
mod node_account;
mod pool;
mod swap_queue;
mod tx_out;
mod vault;
mod voters;

pub use mimir::MIMIR_UNSET;

use crate::config::KeeperConfig;
use crate::domain::errors::KeeperError;
use crate::domain::prefixes::{verify_prefixes, DbPrefix};
use crate::ports::outbound::{BankKeeper, KeyValueStore, KvCursor, RecordCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// The keeper.
pub struct Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    /// Key-value store for persistence.
    pub(crate) kv_store: KV,
    /// Record codec.
    pub(crate) codec: C,
    /// Ledger of module and account balances.
    pub(crate) bank: B,
    /// Service configuration.
    pub(crate) config: KeeperConfig,
}

/// Dependencies for Keeper
pub struct KeeperDependencies<KV, C, B> {
    pub kv_store: KV,
    pub codec: C,
    pub bank: B,
}

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    /// Create a keeper over the given dependencies.
    ///
    /// Fails if the configuration is invalid or the prefix table has a
    /// collision.
    pub fn new(deps: KeeperDependencies<KV, C, B>, config: KeeperConfig) -> Result<Self, KeeperError> {
        verify_prefixes(&DbPrefix::ALL)?;
        config.validate()?;
        tracing::debug!(prefixes = DbPrefix::ALL.len(), "[keeper] prefix table verified");
        Ok(Self {
            kv_store: deps.kv_store,
            codec: deps.codec,
            bank: deps.bank,
            config,
        })
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    pub fn kv_store(&self) -> &KV {
        &self.kv_store
    }

    // =========================================================================
    // RAW KEYED STORE
    // =========================================================================

    /// Raw bytes at `prefix`/`suffix`.
    pub fn get_raw(&self, prefix: DbPrefix, suffix: &str) -> Result<Option<Vec<u8>>, KeeperError> {
        let key = prefix.key(suffix);
        self.kv_store
            .get(key.as_bytes())
            .map_err(|e| db_error("get", &key, e.into()))
    }

    /// Raw write that skips the kill switch and asgard index guards.
    pub(crate) fn set_raw(&mut self, prefix: DbPrefix, suffix: &str, value: &[u8]) -> Result<(), KeeperError> {
        let key = prefix.key(suffix);
        self.kv_store
            .put(key.as_bytes(), value)
            .map_err(|e| db_error("set", &key, e.into()))
    }

    pub(crate) fn delete_raw(&mut self, prefix: DbPrefix, suffix: &str) -> Result<(), KeeperError> {
        let key = prefix.key(suffix);
        self.delete_key(&key)
    }

    /// Ordered raw entries under `prefix`.
    pub fn iter_raw(&self, prefix: DbPrefix) -> KvCursor<'_> {
        self.kv_store.prefix_iter(prefix.iter_prefix())
    }

    // =========================================================================
    // TYPED HELPERS
    // =========================================================================

    pub(crate) fn get_record<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        key: &str,
    ) -> Result<Option<T>, KeeperError> {
        let bytes = self
            .kv_store
            .get(key.as_bytes())
            .map_err(|e| db_error("get", key, e.into()))?;
        match bytes {
            None => Ok(None),
            Some(bytes) => self.decode(entity, key, &bytes).map(Some),
        }
    }

    pub(crate) fn set_record<T: Serialize>(
        &mut self,
        entity: &'static str,
        key: &str,
        record: &T,
    ) -> Result<(), KeeperError> {
        let bytes = self.encode(entity, record)?;
        self.kv_store
            .put(key.as_bytes(), &bytes)
            .map_err(|e| db_error("set", key, e.into()))
    }

    pub(crate) fn delete_key(&mut self, key: &str) -> Result<(), KeeperError> {
        self.kv_store
            .delete(key.as_bytes())
            .map_err(|e| db_error("delete", key, e.into()))
    }

    pub(crate) fn has_key(&self, key: &str) -> Result<bool, KeeperError> {
        self.kv_store
            .exists(key.as_bytes())
            .map_err(|e| db_error("has", key, e.into()))
    }

    pub(crate) fn encode<T: Serialize>(
        &self,
        entity: &'static str,
        record: &T,
    ) -> Result<Vec<u8>, KeeperError> {
        self.codec.encode(record).map_err(|e| KeeperError::Encoding {
            entity,
            message: e.message,
        })
    }

    pub(crate) fn decode<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        key: &str,
        bytes: &[u8],
    ) -> Result<T, KeeperError> {
        decode_with(&self.codec, entity, key, bytes)
    }

    /// Lazy `(key, record)` iteration over raw byte `prefix`.
    pub(crate) fn iter_entries<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        prefix: &[u8],
    ) -> EntryIter<'_, T, C> {
        EntryIter {
            cursor: self.kv_store.prefix_iter(prefix),
            codec: &self.codec,
            entity,
            _record: PhantomData,
        }
    }

    /// Lazy record iteration over raw byte `prefix`.
    pub(crate) fn iter_records<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        prefix: &[u8],
    ) -> RecordIter<'_, T, C> {
        RecordIter(self.iter_entries(entity, prefix))
    }
}

fn decode_with<C: RecordCodec, T: DeserializeOwned>(
    codec: &C,
    entity: &'static str,
    key: &str,
    bytes: &[u8],
) -> Result<T, KeeperError> {
    codec.decode(bytes).map_err(|e| {
        db_error(
            "decode",
            key,
            KeeperError::Corruption {
                entity,
                key: key.to_string(),
                message: e.message,
            },
        )
    })
}

/// Log a store failure once where it is raised.
pub(crate) fn db_error(op: &str, key: &str, err: KeeperError) -> KeeperError {
    tracing::error!(op, key, error = %err, "[keeper] store failure");
    err
}

/// Lazy, ordered iteration yielding each record with its full key.
///
/// Holds the store cursor until dropped.
pub struct EntryIter<'a, T, C> {
    cursor: KvCursor<'a>,
    codec: &'a C,
    entity: &'static str,
    _record: PhantomData<T>,
}

impl<T: DeserializeOwned, C: RecordCodec> Iterator for EntryIter<'_, T, C> {
    type Item = Result<(String, T), KeeperError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.cursor.next()?;
        Some(match item {
            Ok((key, value)) => {
                let key = String::from_utf8_lossy(&key).into_owned();
                decode_with(self.codec, self.entity, &key, &value).map(|record| (key, record))
            }
            Err(e) => Err(db_error("iterate", self.entity, e.into())),
        })
    }
}

/// Lazy, ordered record iteration. Holds the store cursor until dropped.
pub struct RecordIter<'a, T, C>(EntryIter<'a, T, C>);

impl<T: DeserializeOwned, C: RecordCodec> Iterator for RecordIter<'_, T, C> {
    type Item = Result<T, KeeperError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|r| r.map(|(_, record)| record))
    }
}
