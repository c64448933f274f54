//! Voter records and keygen blocks.

use super::Keeper;
use crate::domain::entities::{BanVoter, ErrataTxVoter, KeygenBlock, ObservedTxVoter, TssVoter};
use crate::domain::errors::KeeperError;
use crate::domain::prefixes::DbPrefix;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use shared_types::{Address, Chain, PubKey, TxId};

const BAN_VOTER: &str = "ban voter";
const ERRATA_VOTER: &str = "errata voter";
const TSS_VOTER: &str = "tss voter";
const OBSERVED_VOTER: &str = "observed tx voter";
const OBSERVED_LINK: &str = "observed link";
const KEYGEN_BLOCK: &str = "keygen block";

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    pub fn get_ban_voter(&self, node_address: &Address) -> Result<BanVoter, KeeperError> {
        let key = DbPrefix::BanVoter.key(node_address.as_str());
        Ok(self
            .get_record(BAN_VOTER, &key)?
            .unwrap_or_else(|| BanVoter::new(node_address.clone())))
    }

    pub fn set_ban_voter(&mut self, voter: &BanVoter) -> Result<(), KeeperError> {
        if voter.is_empty() {
            return Err(KeeperError::Validation {
                entity: BAN_VOTER,
                reason: "node address cannot be empty".into(),
            });
        }
        let key = DbPrefix::BanVoter.key(voter.node_address.as_str());
        self.set_record(BAN_VOTER, &key, voter)
    }

    pub fn get_errata_tx_voter(&self, tx_id: &TxId, chain: &Chain) -> Result<ErrataTxVoter, KeeperError> {
        let key = DbPrefix::ErrataTx.key(&ErrataTxVoter::key_for(tx_id, chain));
        Ok(self
            .get_record(ERRATA_VOTER, &key)?
            .unwrap_or_else(|| ErrataTxVoter::new(tx_id.clone(), chain.clone())))
    }

    pub fn set_errata_tx_voter(&mut self, voter: &ErrataTxVoter) -> Result<(), KeeperError> {
        let key = DbPrefix::ErrataTx.key(&voter.key());
        self.set_record(ERRATA_VOTER, &key, voter)
    }

    pub fn get_tss_voter(&self, id: &str) -> Result<TssVoter, KeeperError> {
        let key = DbPrefix::Tss.key(id);
        Ok(self
            .get_record(TSS_VOTER, &key)?
            .unwrap_or_else(|| TssVoter::new(id, Vec::new(), PubKey::default())))
    }

    pub fn set_tss_voter(&mut self, voter: &TssVoter) -> Result<(), KeeperError> {
        if voter.is_empty() {
            return Err(KeeperError::Validation {
                entity: TSS_VOTER,
                reason: "voter id cannot be empty".into(),
            });
        }
        self.set_record(TSS_VOTER, &DbPrefix::Tss.key(&voter.id), voter)
    }

    // =========================================================================
    // OBSERVED TRANSACTIONS
    // =========================================================================

    pub fn get_observed_tx_in_voter(&self, tx_id: &TxId) -> Result<ObservedTxVoter, KeeperError> {
        self.get_observed_voter(DbPrefix::ObservedTxIn, tx_id)
    }

    pub fn set_observed_tx_in_voter(&mut self, voter: &ObservedTxVoter) -> Result<(), KeeperError> {
        self.set_observed_voter(DbPrefix::ObservedTxIn, voter)
    }

    pub fn get_observed_tx_out_voter(&self, tx_id: &TxId) -> Result<ObservedTxVoter, KeeperError> {
        self.get_observed_voter(DbPrefix::ObservedTxOut, tx_id)
    }

    pub fn set_observed_tx_out_voter(&mut self, voter: &ObservedTxVoter) -> Result<(), KeeperError> {
        self.set_observed_voter(DbPrefix::ObservedTxOut, voter)
    }

    fn get_observed_voter(&self, prefix: DbPrefix, tx_id: &TxId) -> Result<ObservedTxVoter, KeeperError> {
        let key = prefix.key(tx_id.as_str());
        Ok(self
            .get_record(OBSERVED_VOTER, &key)?
            .unwrap_or_else(|| ObservedTxVoter::new(tx_id.clone())))
    }

    fn set_observed_voter(&mut self, prefix: DbPrefix, voter: &ObservedTxVoter) -> Result<(), KeeperError> {
        if voter.is_empty() {
            return Err(KeeperError::Validation {
                entity: OBSERVED_VOTER,
                reason: "tx id cannot be empty".into(),
            });
        }
        self.set_record(OBSERVED_VOTER, &prefix.key(voter.tx_id.as_str()), voter)
    }

    /// Outbound hashes linked to inbound `in_hash`.
    pub fn get_observed_link(&self, in_hash: &TxId) -> Result<Vec<TxId>, KeeperError> {
        let key = DbPrefix::ObservedLink.key(in_hash.as_str());
        Ok(self.get_record(OBSERVED_LINK, &key)?.unwrap_or_default())
    }

    /// Link `out_hash` to `in_hash`. Existing links are kept once.
    pub fn set_observed_link(&mut self, in_hash: &TxId, out_hash: &TxId) -> Result<(), KeeperError> {
        let mut links = self.get_observed_link(in_hash)?;
        if links.contains(out_hash) {
            return Ok(());
        }
        links.push(out_hash.clone());
        let key = DbPrefix::ObservedLink.key(in_hash.as_str());
        self.set_record(OBSERVED_LINK, &key, &links)
    }

    // =========================================================================
    // KEYGEN
    // =========================================================================

    pub fn get_keygen_block(&self, height: i64) -> Result<KeygenBlock, KeeperError> {
        let key = DbPrefix::Keygen.key(&height.to_string());
        Ok(self
            .get_record(KEYGEN_BLOCK, &key)?
            .unwrap_or_else(|| KeygenBlock::new(height)))
    }

    pub fn set_keygen_block(&mut self, block: &KeygenBlock) -> Result<(), KeeperError> {
        let key = DbPrefix::Keygen.key(&block.height.to_string());
        self.set_record(KEYGEN_BLOCK, &key, block)
    }
}
