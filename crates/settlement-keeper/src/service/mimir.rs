//! Governance values: admin overrides, node votes and the kill switch.
//!
//! Resolution order for `get_mimir(key)`:
//! 1. kill switch released → -1, nothing else is read
//! 2. supermajority of version-matched active nodes → their value
//! 3. admin override → its value
//! 4. -1

use super::Keeper;
use crate::domain::entities::{KillSwitch, NodeMimirs};
use crate::domain::errors::KeeperError;
use crate::domain::prefixes::DbPrefix;
use crate::ports::inbound::MimirStore;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use shared_types::Address;

const MIMIR: &str = "mimir";
const NODE_MIMIR: &str = "node mimir";
const NODE_PAUSE_CHAIN: &str = "node pause chain";

/// Returned for unset values.
pub const MIMIR_UNSET: i64 = -1;

fn vote_key(key: &str) -> String {
    key.to_uppercase()
}

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    fn admin_mimir(&self, key: &str) -> Result<Option<i64>, KeeperError> {
        self.get_record(MIMIR, &DbPrefix::Mimir.key(key))
    }

    /// Height until which `signer` paused all chains, zero if never.
    pub fn get_node_pause_chain(&self, signer: &Address) -> Result<i64, KeeperError> {
        let key = DbPrefix::NodePauseChain.key(signer.as_str());
        Ok(self.get_record(NODE_PAUSE_CHAIN, &key)?.unwrap_or_default())
    }

    pub fn set_node_pause_chain(&mut self, signer: &Address, height: i64) -> Result<(), KeeperError> {
        let key = DbPrefix::NodePauseChain.key(signer.as_str());
        self.set_record(NODE_PAUSE_CHAIN, &key, &height)
    }
}

impl<KV, C, B> MimirStore for Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    fn get_mimir(&self, key: &str) -> Result<i64, KeeperError> {
        if self.kill_switch()?.is_released() {
            return Ok(MIMIR_UNSET);
        }
        let active = self.list_version_matched_active_addresses()?;
        if !active.is_empty() {
            let votes = self.get_node_mimirs(key)?;
            if let Some(value) = votes.super_majority_value(&vote_key(key), &active) {
                return Ok(value);
            }
        }
        Ok(self.admin_mimir(key)?.unwrap_or(MIMIR_UNSET))
    }

    fn set_mimir(&mut self, key: &str, value: i64) -> Result<(), KeeperError> {
        let switch = self.kill_switch()?;
        if switch.is_released() {
            tracing::info!(key, value, "[keeper] mimir write ignored, kill switch released");
            return Ok(());
        }
        self.set_record(MIMIR, &DbPrefix::Mimir.key(key), &value)?;
        tracing::info!(key, value, "[keeper] mimir set");
        if key.eq_ignore_ascii_case(&self.config.kill_switch_key)
            && switch.transition(value).is_released()
        {
            tracing::warn!(key, "[keeper] kill switch released, admin mimir disabled");
        }
        Ok(())
    }

    fn delete_mimir(&mut self, key: &str) -> Result<(), KeeperError> {
        if self.kill_switch()?.is_released() {
            tracing::info!(key, "[keeper] mimir delete ignored, kill switch released");
            return Ok(());
        }
        self.delete_key(&DbPrefix::Mimir.key(key))
    }

    fn kill_switch(&self) -> Result<KillSwitch, KeeperError> {
        let stored = self.admin_mimir(&self.config.kill_switch_key)?;
        Ok(KillSwitch::from_stored(stored))
    }

    fn list_mimirs(&self) -> Result<Vec<(String, i64)>, KeeperError> {
        if self.kill_switch()?.is_released() {
            return Ok(Vec::new());
        }
        let prefix = DbPrefix::Mimir.key("");
        self.iter_entries::<i64>(MIMIR, prefix.as_bytes())
            .map(|entry| {
                entry.map(|(key, value)| (key[prefix.len()..].to_string(), value))
            })
            .collect()
    }

    fn get_node_mimirs(&self, key: &str) -> Result<NodeMimirs, KeeperError> {
        let store_key = DbPrefix::NodeMimir.key(key);
        Ok(self.get_record(NODE_MIMIR, &store_key)?.unwrap_or_default())
    }

    fn set_node_mimir(&mut self, key: &str, value: i64, signer: Address) -> Result<(), KeeperError> {
        let mut votes = self.get_node_mimirs(key)?;
        tracing::debug!(key, value, signer = %signer, "[keeper] node mimir vote");
        votes.set(&vote_key(key), value, signer);
        self.set_record(NODE_MIMIR, &DbPrefix::NodeMimir.key(key), &votes)
    }

    fn delete_node_mimir(&mut self, key: &str, signer: &Address) -> Result<(), KeeperError> {
        let mut votes = self.get_node_mimirs(key)?;
        votes.delete(&vote_key(key), signer);
        let store_key = DbPrefix::NodeMimir.key(key);
        if votes.is_empty() {
            return self.delete_key(&store_key);
        }
        self.set_record(NODE_MIMIR, &store_key, &votes)
    }
}
