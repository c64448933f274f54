//! # RocksDB Storage Adapter
//!
//! Durable implementation of [`KeyValueStore`].
//!
//! ## Features
//!
//! - Atomic batch writes (WriteBatch)
//! - Snappy compression
//! - Bloom filters for point reads
//! - Prefix iteration by seeking to the prefix and walking forward, which
//!   yields keys in the same byte order as the in-memory store

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, KvCursor};
use ::rocksdb::{Direction, IteratorMode, Options, WriteBatch, WriteOptions, DB};
use std::path::Path;

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 256MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 64MB)
    pub write_buffer_size: usize,
    /// Maximum number of write buffers (default: 3)
    pub max_write_buffer_number: i32,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/keeper".to_string(),
            block_cache_size: 256 * 1024 * 1024,
            write_buffer_size: 64 * 1024 * 1024,
            max_write_buffer_number: 3,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            max_write_buffer_number: 2,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key-value store.
pub struct RocksDbStore {
    db: DB,
    config: RocksDbConfig,
}

fn io_error(context: &str, err: ::rocksdb::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: format!("{}: {}", context, err),
    }
}

impl RocksDbStore {
    /// Open or create a database.
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);
        opts.set_compression_type(::rocksdb::DBCompressionType::Snappy);

        let mut block_opts = ::rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&::rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, Path::new(&config.path))
            .map_err(|e| io_error("Failed to open RocksDB", e))?;
        tracing::info!(path = %config.path, "[keeper] opened RocksDB store");
        Ok(Self { db, config })
    }

    pub fn config(&self) -> &RocksDbConfig {
        &self.config
    }

    fn write_options(&self) -> WriteOptions {
        let mut opts = WriteOptions::default();
        opts.set_sync(self.config.sync_writes);
        opts
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.get(key).map_err(|e| io_error("get", e))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .put_opt(key, value, &self.write_options())
            .map_err(|e| io_error("put", e))
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .delete_opt(key, &self.write_options())
            .map_err(|e| io_error("delete", e))
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut batch = WriteBatch::default();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => batch.put(key, value),
                BatchOperation::Delete { key } => batch.delete(key),
            }
        }
        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| io_error("batch write", e))
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.db
            .get_pinned(key)
            .map(|v| v.is_some())
            .map_err(|e| io_error("exists", e))
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> KvCursor<'a> {
        let owned = prefix.to_vec();
        let iter = self
            .db
            .iterator(IteratorMode::From(prefix, Direction::Forward))
            .take_while(move |item| match item {
                Ok((key, _)) => key.starts_with(&owned),
                Err(_) => true,
            })
            .map(|item| {
                item.map(|(k, v)| (k.into_vec(), v.into_vec()))
                    .map_err(|e| KVStoreError::CorruptionError {
                        message: format!("iterator: {}", e),
                    })
            });
        Box::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, RocksDbStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let store = RocksDbStore::open(RocksDbConfig::for_testing(path)).unwrap();
        (dir, store)
    }

    #[test]
    fn test_prefix_iter_matches_memory_order() {
        let (_dir, mut store) = open_temp();
        for key in ["pool//ETH.ETH", "pool//BTC.BTC", "pool_liquidity_fee//1", "lp//X"] {
            store.put(key.as_bytes(), b"v").unwrap();
        }
        let keys: Vec<Vec<u8>> = store
            .prefix_iter(b"pool/")
            .map(|r| r.unwrap().0)
            .collect();
        assert_eq!(
            keys,
            vec![b"pool//BTC.BTC".to_vec(), b"pool//ETH.ETH".to_vec()]
        );
    }

    #[test]
    fn test_batch_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        {
            let mut store = RocksDbStore::open(RocksDbConfig::for_testing(path.clone())).unwrap();
            store
                .atomic_batch_write(vec![
                    BatchOperation::put(b"a".to_vec(), b"1".to_vec()),
                    BatchOperation::put(b"b".to_vec(), b"2".to_vec()),
                    BatchOperation::delete(b"a".to_vec()),
                ])
                .unwrap();
        }
        let store = RocksDbStore::open(RocksDbConfig::for_testing(path)).unwrap();
        assert!(!store.exists(b"a").unwrap());
        assert_eq!(store.get(b"b").unwrap(), Some(b"2".to_vec()));
    }
}
