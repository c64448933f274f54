//! Node accounts, observer markers, slash points and jail records.

use super::{Keeper, RecordIter};
use crate::domain::entities::{Jail, NodeAccount, NodePubKeySet, NodeStatus};
use crate::domain::errors::KeeperError;
use crate::domain::majority::has_super_majority;
use crate::domain::prefixes::DbPrefix;
use crate::ports::outbound::{BankKeeper, BlockContext, KeyValueStore, RecordCodec};
use shared_types::{Address, PubKey, SoftwareVersion};

const NODE_ACCOUNT: &str = "node account";
const ACTIVE_OBSERVER: &str = "active observer";
const SLASH_POINTS: &str = "slash points";
const JAIL: &str = "jail";
const OBSERVING_ADDRESSES: &str = "observing addresses";

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    // =========================================================================
    // NODE ACCOUNTS
    // =========================================================================

    pub fn node_account_iter(&self) -> RecordIter<'_, NodeAccount, C> {
        self.iter_records(NODE_ACCOUNT, DbPrefix::NodeAccount.iter_prefix())
    }

    /// Every node account, ordered by address.
    pub fn list_node_accounts(&self) -> Result<Vec<NodeAccount>, KeeperError> {
        self.node_account_iter().collect()
    }

    pub fn list_node_accounts_by_status(
        &self,
        status: NodeStatus,
    ) -> Result<Vec<NodeAccount>, KeeperError> {
        let mut nodes = Vec::new();
        for na in self.node_account_iter() {
            let na = na?;
            if na.status == status {
                nodes.push(na);
            }
        }
        Ok(nodes)
    }

    pub fn list_active_validators(&self) -> Result<Vec<NodeAccount>, KeeperError> {
        self.list_node_accounts_by_status(NodeStatus::Active)
    }

    pub fn total_active_validators(&self) -> Result<usize, KeeperError> {
        Ok(self.list_active_validators()?.len())
    }

    /// The account for `address`, or an `Unknown` account with that address.
    pub fn get_node_account(&self, address: &Address) -> Result<NodeAccount, KeeperError> {
        let key = DbPrefix::NodeAccount.key(address.as_str());
        Ok(self
            .get_record(NODE_ACCOUNT, &key)?
            .unwrap_or_else(|| NodeAccount {
                node_address: address.clone(),
                ..NodeAccount::default()
            }))
    }

    pub fn node_account_exists(&self, address: &Address) -> Result<bool, KeeperError> {
        self.has_key(&DbPrefix::NodeAccount.key(address.as_str()))
    }

    /// The node signing with `pub_key`, or an empty account.
    pub fn get_node_account_by_pub_key(&self, pub_key: &PubKey) -> Result<NodeAccount, KeeperError> {
        for na in self.node_account_iter() {
            let na = na?;
            if na.pub_key_set.contains(pub_key) {
                return Ok(na);
            }
        }
        Ok(NodeAccount::default())
    }

    /// Persist a node account.
    ///
    /// Empty records are skipped. A node entering `Active` for the first time
    /// gets the current height as its activation height and its slash points
    /// reset. Active nodes are marked as active observers.
    pub fn set_node_account(
        &mut self,
        ctx: &dyn BlockContext,
        mut na: NodeAccount,
    ) -> Result<(), KeeperError> {
        if na.is_empty() {
            return Ok(());
        }
        if na.is_active() {
            if na.active_block_height == 0 {
                na.active_block_height = ctx.block_height();
                self.reset_node_slash_points(&na.node_address)?;
                tracing::info!(
                    node = %na.node_address,
                    height = na.active_block_height,
                    "[keeper] node activated"
                );
            }
            self.set_active_observer(&na.node_address)?;
        } else {
            self.remove_active_observer(&na.node_address)?;
        }
        let key = DbPrefix::NodeAccount.key(na.node_address.as_str());
        self.set_record(NODE_ACCOUNT, &key, &na)
    }

    /// Reject keys already held by another node.
    pub fn ensure_node_keys_unique(
        &self,
        consensus_pub_key: &str,
        pub_keys: &NodePubKeySet,
    ) -> Result<(), KeeperError> {
        if consensus_pub_key.trim().is_empty() {
            return Err(KeeperError::Validation {
                entity: NODE_ACCOUNT,
                reason: "consensus pub key cannot be empty".into(),
            });
        }
        if pub_keys.is_empty() {
            return Err(KeeperError::Validation {
                entity: NODE_ACCOUNT,
                reason: "pub key set cannot be empty".into(),
            });
        }
        for na in self.node_account_iter() {
            let na = na?;
            if na.validator_cons_pub_key == consensus_pub_key {
                return Err(KeeperError::Validation {
                    entity: NODE_ACCOUNT,
                    reason: format!("{} already uses consensus key {}", na.node_address, consensus_pub_key),
                });
            }
            if na.pub_key_set.contains(&pub_keys.secp256k1)
                || na.pub_key_set.contains(&pub_keys.ed25519)
            {
                return Err(KeeperError::Validation {
                    entity: NODE_ACCOUNT,
                    reason: format!("{} already uses one of the node keys", na.node_address),
                });
            }
        }
        Ok(())
    }

    /// Highest version that a supermajority of active nodes run or exceed.
    pub fn get_min_join_version(&self) -> Result<SoftwareVersion, KeeperError> {
        let active = self.list_active_validators()?;
        let mut versions: Vec<SoftwareVersion> = active.iter().map(|na| na.version).collect();
        versions.sort_unstable_by(|a, b| b.cmp(a));
        versions.dedup();
        for candidate in versions {
            let count = active.iter().filter(|na| na.version >= candidate).count();
            if has_super_majority(count, active.len()) {
                return Ok(candidate);
            }
        }
        Ok(SoftwareVersion::default())
    }

    /// Addresses of active nodes running at least the min join version.
    pub fn list_version_matched_active_addresses(&self) -> Result<Vec<Address>, KeeperError> {
        let min = self.get_min_join_version()?;
        Ok(self
            .list_active_validators()?
            .into_iter()
            .filter(|na| na.version >= min)
            .map(|na| na.node_address)
            .collect())
    }

    // =========================================================================
    // ACTIVE OBSERVERS
    // =========================================================================

    pub fn set_active_observer(&mut self, address: &Address) -> Result<(), KeeperError> {
        let key = DbPrefix::ActiveObserver.key(address.as_str());
        self.set_record(ACTIVE_OBSERVER, &key, &true)
    }

    pub fn remove_active_observer(&mut self, address: &Address) -> Result<(), KeeperError> {
        self.delete_key(&DbPrefix::ActiveObserver.key(address.as_str()))
    }

    pub fn is_active_observer(&self, address: &Address) -> Result<bool, KeeperError> {
        self.has_key(&DbPrefix::ActiveObserver.key(address.as_str()))
    }

    // =========================================================================
    // OBSERVING ADDRESSES
    // =========================================================================

    pub fn get_observing_addresses(&self) -> Result<Vec<Address>, KeeperError> {
        let key = DbPrefix::ObservingAddresses.key("");
        Ok(self.get_record(OBSERVING_ADDRESSES, &key)?.unwrap_or_default())
    }

    /// Append addresses not already present, keeping first-seen order.
    pub fn add_observing_addresses(&mut self, addresses: &[Address]) -> Result<(), KeeperError> {
        if addresses.is_empty() {
            return Ok(());
        }
        let mut current = self.get_observing_addresses()?;
        for address in addresses {
            if !address.is_empty() && !current.contains(address) {
                current.push(address.clone());
            }
        }
        let key = DbPrefix::ObservingAddresses.key("");
        self.set_record(OBSERVING_ADDRESSES, &key, &current)
    }

    pub fn clear_observing_addresses(&mut self) -> Result<(), KeeperError> {
        self.delete_key(&DbPrefix::ObservingAddresses.key(""))
    }

    // =========================================================================
    // SLASH POINTS
    // =========================================================================

    pub fn get_node_slash_points(&self, address: &Address) -> Result<i64, KeeperError> {
        let key = DbPrefix::NodeSlashPoints.key(address.as_str());
        Ok(self.get_record(SLASH_POINTS, &key)?.unwrap_or_default())
    }

    /// Zero or fewer points clears the record.
    pub fn set_node_slash_points(&mut self, address: &Address, points: i64) -> Result<(), KeeperError> {
        let key = DbPrefix::NodeSlashPoints.key(address.as_str());
        if points <= 0 {
            return self.delete_key(&key);
        }
        self.set_record(SLASH_POINTS, &key, &points)
    }

    pub fn inc_node_slash_points(&mut self, address: &Address, points: i64) -> Result<(), KeeperError> {
        let current = self.get_node_slash_points(address)?;
        self.set_node_slash_points(address, current.saturating_add(points))
    }

    pub fn dec_node_slash_points(&mut self, address: &Address, points: i64) -> Result<(), KeeperError> {
        let current = self.get_node_slash_points(address)?;
        self.set_node_slash_points(address, current.saturating_sub(points).max(0))
    }

    pub fn reset_node_slash_points(&mut self, address: &Address) -> Result<(), KeeperError> {
        self.delete_key(&DbPrefix::NodeSlashPoints.key(address.as_str()))
    }

    // =========================================================================
    // JAIL
    // =========================================================================

    pub fn get_node_jail(&self, address: &Address) -> Result<Jail, KeeperError> {
        let key = DbPrefix::NodeJail.key(address.as_str());
        Ok(self
            .get_record(JAIL, &key)?
            .unwrap_or_else(|| Jail::new(address.clone())))
    }

    /// Jail until `release_height`. An existing longer sentence is kept.
    pub fn set_node_jail(
        &mut self,
        address: &Address,
        release_height: i64,
        reason: &str,
    ) -> Result<(), KeeperError> {
        let mut jail = self.get_node_jail(address)?;
        if jail.release_height >= release_height {
            return Ok(());
        }
        jail.release_height = release_height;
        jail.reason = reason.to_string();
        let key = DbPrefix::NodeJail.key(address.as_str());
        self.set_record(JAIL, &key, &jail)
    }
}
