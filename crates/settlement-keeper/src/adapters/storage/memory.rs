//! In-memory key-value store for unit tests and ephemeral nodes.

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, KvCursor};
use std::collections::BTreeMap;

/// Sorted in-memory store.
///
/// Backed by a `BTreeMap`, so prefix iteration yields keys in ascending byte
/// order exactly as RocksDB does.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> KvCursor<'a> {
        let prefix = prefix.to_vec();
        Box::new(
            self.data
                .range(prefix.clone()..)
                .take_while(move |(k, _)| k.starts_with(&prefix))
                .map(|(k, v)| Ok((k.clone(), v.clone()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let mut store = InMemoryKVStore::new();
        store.put(b"a/1", b"one").unwrap();
        assert_eq!(store.get(b"a/1").unwrap(), Some(b"one".to_vec()));
        assert!(store.exists(b"a/1").unwrap());

        store.delete(b"a/1").unwrap();
        assert_eq!(store.get(b"a/1").unwrap(), None);
        store.delete(b"a/1").unwrap();
    }

    #[test]
    fn test_prefix_iter_is_sorted_and_bounded() {
        let mut store = InMemoryKVStore::new();
        for key in ["b/2", "a/9", "b/1", "c/0", "b/10"] {
            store.put(key.as_bytes(), b"x").unwrap();
        }
        let keys: Vec<String> = store
            .prefix_iter(b"b/")
            .map(|r| String::from_utf8(r.unwrap().0).unwrap())
            .collect();
        assert_eq!(keys, vec!["b/1", "b/10", "b/2"]);
    }

    #[test]
    fn test_batch_write() {
        let mut store = InMemoryKVStore::new();
        store.put(b"gone", b"x").unwrap();
        store
            .atomic_batch_write(vec![
                BatchOperation::put(b"k1".to_vec(), b"v1".to_vec()),
                BatchOperation::delete(b"gone".to_vec()),
            ])
            .unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.exists(b"k1").unwrap());
    }
}
