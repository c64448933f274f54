//! # Inbound Ports (Driving Ports)
//!
//! The API the keeper exposes to message handlers and end-of-block logic.
//! `Keeper` implements every trait here; the typed accessors for plain
//! records are inherent methods on `Keeper`.

use crate::domain::entities::{
    KillSwitch, MsgSwap, NodeMimirs, TxOut, TxOutItem, Vault, VaultKind, VaultStatus,
};
use crate::domain::errors::KeeperError;
use crate::invariants::{InvariantReport, InvariantRoute};
use shared_types::{Address, PubKey, TxId};

/// Custody vault lifecycle and listing.
pub trait VaultRegistry {
    /// Write a vault. Asgard vaults are added to the asgard index if absent.
    fn set_vault(&mut self, vault: Vault) -> Result<(), KeeperError>;

    /// Read a vault. Absent vaults are `NotFound`.
    fn get_vault(&self, pub_key: &PubKey) -> Result<Vault, KeeperError>;

    fn vault_exists(&self, pub_key: &PubKey) -> Result<bool, KeeperError>;

    /// Remove a vault that holds no funds. Absent vaults are a no-op.
    fn delete_vault(&mut self, pub_key: &PubKey) -> Result<(), KeeperError>;

    /// Asgard vaults in index order.
    fn get_asgard_vaults(&self) -> Result<Vec<Vault>, KeeperError>;

    fn get_asgard_vaults_by_status(&self, status: VaultStatus) -> Result<Vec<Vault>, KeeperError>;

    fn get_vaults_by_kind(&self, kind: VaultKind) -> Result<Vec<Vault>, KeeperError>;

    fn get_vaults_by_kind_and_status(
        &self,
        kind: VaultKind,
        status: VaultStatus,
    ) -> Result<Vec<Vault>, KeeperError>;

    /// True iff at least one vault currently holds funds.
    fn has_valid_vault_pools(&self) -> Result<bool, KeeperError>;
}

/// Governance values.
pub trait MimirStore {
    /// Effective value of `key`, or -1 when unset or when the kill switch
    /// has been released.
    fn get_mimir(&self, key: &str) -> Result<i64, KeeperError>;

    /// Admin override. Ignored once the kill switch is released.
    fn set_mimir(&mut self, key: &str, value: i64) -> Result<(), KeeperError>;

    /// Remove an admin override. Ignored once the kill switch is released.
    fn delete_mimir(&mut self, key: &str) -> Result<(), KeeperError>;

    fn kill_switch(&self) -> Result<KillSwitch, KeeperError>;

    /// Every stored admin value, sorted by key.
    fn list_mimirs(&self) -> Result<Vec<(String, i64)>, KeeperError>;

    fn get_node_mimirs(&self, key: &str) -> Result<NodeMimirs, KeeperError>;

    /// Record or replace `signer`'s vote for `key`.
    fn set_node_mimir(&mut self, key: &str, value: i64, signer: Address)
        -> Result<(), KeeperError>;

    fn delete_node_mimir(&mut self, key: &str, signer: &Address) -> Result<(), KeeperError>;
}

/// Swaps accepted but not yet settled. Presence is the pending state.
pub trait SwapQueue {
    /// Queue a swap under `{txid}-{index}`, overwriting any existing entry.
    fn set_swap_queue_item(&mut self, msg: MsgSwap, index: usize) -> Result<(), KeeperError>;

    /// Read a queued swap. Absent items are `NotFound`.
    fn get_swap_queue_item(&self, tx_id: &TxId, index: usize) -> Result<MsgSwap, KeeperError>;

    fn has_swap_queue_item(&self, tx_id: &TxId, index: usize) -> Result<bool, KeeperError>;

    fn remove_swap_queue_item(&mut self, tx_id: &TxId, index: usize) -> Result<(), KeeperError>;

    /// Every queued swap in key order.
    fn swap_queue_items(&self) -> Result<Vec<MsgSwap>, KeeperError>;
}

/// Outbound batches keyed by height.
///
/// `append_tx_out` is a read-modify-write of the whole record and takes
/// `&mut self`; callers sharing a keeper across threads must hold a lock
/// around it.
pub trait TxOutQueue {
    /// Persist a batch. Empty batches are not written.
    fn set_tx_out(&mut self, tx_out: TxOut) -> Result<(), KeeperError>;

    fn append_tx_out(&mut self, height: i64, item: TxOutItem) -> Result<(), KeeperError>;

    /// The batch at `height`, empty when none was written.
    fn get_tx_out(&self, height: i64) -> Result<TxOut, KeeperError>;

    fn clear_tx_out(&mut self, height: i64) -> Result<(), KeeperError>;
}

/// Named solvency checks.
pub trait InvariantRoutes: Sized {
    fn invariant_routes() -> Vec<InvariantRoute<Self>>;

    /// Evaluate every route, in route order.
    fn run_invariants(&self) -> Vec<(&'static str, InvariantReport)>;
}
