//! Vault registry and the asgard index.
//!
//! The primary records live under `vault/{pubkey}`. Asgard vault keys are
//! also kept in a single list under `vault_asgard_index/` in the order they
//! were first written, so the rotating set can be listed without a scan.
//! A record and its index entry are always written in one batch.

use super::{db_error, Keeper, RecordIter};
use crate::domain::entities::{Vault, VaultData, VaultKind, VaultStatus};
use crate::domain::errors::KeeperError;
use crate::domain::prefixes::DbPrefix;
use crate::ports::inbound::VaultRegistry;
use crate::ports::outbound::{BankKeeper, BatchOperation, KeyValueStore, RecordCodec};
use shared_types::PubKey;

const VAULT: &str = "vault";
const ASGARD_INDEX: &str = "asgard vault index";
const VAULT_DATA: &str = "vault data";

fn index_key() -> String {
    DbPrefix::VaultAsgardIndex.key("")
}

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    /// Every vault, ordered by public key.
    pub fn vault_iter(&self) -> RecordIter<'_, Vault, C> {
        self.iter_records(VAULT, DbPrefix::Vault.iter_prefix())
    }

    /// Asgard vault keys in first-written order.
    pub fn get_asgard_index(&self) -> Result<Vec<PubKey>, KeeperError> {
        Ok(self.get_record(ASGARD_INDEX, &index_key())?.unwrap_or_default())
    }

    pub fn get_vault_data(&self) -> Result<VaultData, KeeperError> {
        let key = DbPrefix::VaultData.key("");
        Ok(self.get_record(VAULT_DATA, &key)?.unwrap_or_default())
    }

    pub fn set_vault_data(&mut self, data: &VaultData) -> Result<(), KeeperError> {
        let key = DbPrefix::VaultData.key("");
        self.set_record(VAULT_DATA, &key, data)
    }

    fn write_batch(&mut self, ops: Vec<BatchOperation>, key: &str) -> Result<(), KeeperError> {
        self.kv_store
            .atomic_batch_write(ops)
            .map_err(|e| db_error("batch", key, e.into()))
    }
}

impl<KV, C, B> VaultRegistry for Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    fn set_vault(&mut self, vault: Vault) -> Result<(), KeeperError> {
        if vault.is_empty() {
            return Err(KeeperError::Validation {
                entity: VAULT,
                reason: "pub key cannot be empty".into(),
            });
        }
        let key = DbPrefix::Vault.key(vault.pub_key.as_str());
        let mut ops = vec![BatchOperation::put(
            key.clone().into_bytes(),
            self.encode(VAULT, &vault)?,
        )];

        let mut index = self.get_asgard_index()?;
        let position = index.iter().position(|pk| pk == &vault.pub_key);
        let changed = match (vault.is_asgard(), position) {
            (true, None) => {
                index.push(vault.pub_key.clone());
                true
            }
            (false, Some(i)) => {
                index.remove(i);
                true
            }
            _ => false,
        };
        if changed {
            ops.push(BatchOperation::put(
                index_key().into_bytes(),
                self.encode(ASGARD_INDEX, &index)?,
            ));
        }
        self.write_batch(ops, &key)
    }

    fn get_vault(&self, pub_key: &PubKey) -> Result<Vault, KeeperError> {
        let key = DbPrefix::Vault.key(pub_key.as_str());
        self.get_record(VAULT, &key)?
            .ok_or(KeeperError::NotFound { entity: VAULT, key })
    }

    fn vault_exists(&self, pub_key: &PubKey) -> Result<bool, KeeperError> {
        self.has_key(&DbPrefix::Vault.key(pub_key.as_str()))
    }

    fn delete_vault(&mut self, pub_key: &PubKey) -> Result<(), KeeperError> {
        let key = DbPrefix::Vault.key(pub_key.as_str());
        let Some(vault) = self.get_record::<Vault>(VAULT, &key)? else {
            return Ok(());
        };
        if vault.has_funds() {
            tracing::warn!(pub_key = %pub_key, "[keeper] refusing to delete vault with funds");
            return Err(KeeperError::VaultHasFunds {
                pub_key: pub_key.to_string(),
            });
        }

        let mut ops = vec![BatchOperation::delete(key.clone().into_bytes())];
        let mut index = self.get_asgard_index()?;
        if let Some(i) = index.iter().position(|pk| pk == pub_key) {
            index.remove(i);
            ops.push(BatchOperation::put(
                index_key().into_bytes(),
                self.encode(ASGARD_INDEX, &index)?,
            ));
        }
        self.write_batch(ops, &key)?;
        tracing::info!(pub_key = %pub_key, kind = %vault.kind, "[keeper] vault deleted");
        Ok(())
    }

    fn get_asgard_vaults(&self) -> Result<Vec<Vault>, KeeperError> {
        let mut vaults = Vec::new();
        for pub_key in self.get_asgard_index()? {
            let key = DbPrefix::Vault.key(pub_key.as_str());
            match self.get_record::<Vault>(VAULT, &key)? {
                Some(vault) if vault.is_asgard() => vaults.push(vault),
                _ => tracing::warn!(pub_key = %pub_key, "[keeper] stale asgard index entry"),
            }
        }
        Ok(vaults)
    }

    fn get_asgard_vaults_by_status(&self, status: VaultStatus) -> Result<Vec<Vault>, KeeperError> {
        self.get_vaults_by_kind_and_status(VaultKind::Asgard, status)
    }

    fn get_vaults_by_kind(&self, kind: VaultKind) -> Result<Vec<Vault>, KeeperError> {
        if kind == VaultKind::Asgard {
            return self.get_asgard_vaults();
        }
        let mut vaults = Vec::new();
        for vault in self.vault_iter() {
            let vault = vault?;
            if vault.kind == kind {
                vaults.push(vault);
            }
        }
        Ok(vaults)
    }

    fn get_vaults_by_kind_and_status(
        &self,
        kind: VaultKind,
        status: VaultStatus,
    ) -> Result<Vec<Vault>, KeeperError> {
        Ok(self
            .get_vaults_by_kind(kind)?
            .into_iter()
            .filter(|v| v.status == status)
            .collect())
    }

    fn has_valid_vault_pools(&self) -> Result<bool, KeeperError> {
        for vault in self.vault_iter() {
            if vault?.has_funds() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
