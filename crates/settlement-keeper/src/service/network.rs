//! Network singletons, per-chain records, chain heights, ragnarok state,
//! tx markers, the store version and affiliate collectors.

use super::{Keeper, RecordIter};
use crate::domain::entities::{AffiliateFeeCollector, ChainContract, Network, NetworkFee, TxMarker};
use crate::domain::errors::KeeperError;
use crate::domain::prefixes::DbPrefix;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use primitive_types::U256;
use shared_types::{Address, Asset, Chain};
use std::collections::BTreeMap;

const NETWORK: &str = "network";
const NETWORK_FEE: &str = "network fee";
const GAS: &str = "gas";
const CHAIN_CONTRACT: &str = "chain contract";
const LAST_CHAIN_HEIGHT: &str = "last chain height";
const LAST_SIGNED_HEIGHT: &str = "last signed height";
const LAST_OBSERVE_HEIGHT: &str = "last observe height";
const RAGNAROK: &str = "ragnarok";
const TX_MARKER: &str = "tx marker";
const STORE_VERSION: &str = "store version";
const AFFILIATE_COLLECTOR: &str = "affiliate collector";

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    // =========================================================================
    // NETWORK
    // =========================================================================

    pub fn get_network(&self) -> Result<Network, KeeperError> {
        let key = DbPrefix::Network.key("");
        Ok(self.get_record(NETWORK, &key)?.unwrap_or_default())
    }

    pub fn set_network(&mut self, network: &Network) -> Result<(), KeeperError> {
        self.set_record(NETWORK, &DbPrefix::Network.key(""), network)
    }

    // =========================================================================
    // NETWORK FEES AND GAS
    // =========================================================================

    /// The fee record for `chain`, zeroed when none was saved.
    pub fn get_network_fee(&self, chain: &Chain) -> Result<NetworkFee, KeeperError> {
        let key = DbPrefix::NetworkFee.key(chain.as_str());
        Ok(self
            .get_record(NETWORK_FEE, &key)?
            .unwrap_or_else(|| NetworkFee::new(chain.clone(), 0, 0)))
    }

    pub fn save_network_fee(&mut self, fee: &NetworkFee) -> Result<(), KeeperError> {
        if let Some(reason) = fee.invalid_reason() {
            return Err(KeeperError::InvalidNetworkFee {
                chain: fee.chain.to_string(),
                reason,
            });
        }
        let key = DbPrefix::NetworkFee.key(fee.chain.as_str());
        self.set_record(NETWORK_FEE, &key, fee)?;
        tracing::debug!(
            chain = %fee.chain,
            size = fee.transaction_size,
            rate = fee.transaction_fee_rate,
            "[keeper] network fee saved"
        );
        Ok(())
    }

    pub fn get_gas(&self, asset: &Asset) -> Result<Vec<U256>, KeeperError> {
        let key = DbPrefix::Gas.key(&asset.to_string());
        Ok(self.get_record(GAS, &key)?.unwrap_or_default())
    }

    pub fn set_gas(&mut self, asset: &Asset, amounts: &[U256]) -> Result<(), KeeperError> {
        let key = DbPrefix::Gas.key(&asset.to_string());
        self.set_record(GAS, &key, &amounts)
    }

    // =========================================================================
    // CHAIN CONTRACTS
    // =========================================================================

    pub fn set_chain_contract(&mut self, contract: &ChainContract) -> Result<(), KeeperError> {
        if contract.chain.is_empty() {
            return Err(KeeperError::Validation {
                entity: CHAIN_CONTRACT,
                reason: "chain cannot be empty".into(),
            });
        }
        let key = DbPrefix::ChainContract.key(contract.chain.as_str());
        self.set_record(CHAIN_CONTRACT, &key, contract)
    }

    pub fn get_chain_contract(&self, chain: &Chain) -> Result<ChainContract, KeeperError> {
        let key = DbPrefix::ChainContract.key(chain.as_str());
        Ok(self
            .get_record(CHAIN_CONTRACT, &key)?
            .unwrap_or_else(|| ChainContract::new(chain.clone(), Address::default())))
    }

    /// Contracts for `chains` that have a router set, in the given order.
    pub fn get_chain_contracts(&self, chains: &[Chain]) -> Result<Vec<ChainContract>, KeeperError> {
        let mut contracts = Vec::with_capacity(chains.len());
        for chain in chains {
            let contract = self.get_chain_contract(chain)?;
            if !contract.is_empty() {
                contracts.push(contract);
            }
        }
        Ok(contracts)
    }

    // =========================================================================
    // LAST HEIGHTS
    // =========================================================================

    /// Record the last observed height of an external chain. Lower heights
    /// are rejected and the stored value is kept.
    pub fn set_last_chain_height(&mut self, chain: &Chain, height: i64) -> Result<(), KeeperError> {
        let current = self.get_last_chain_height(chain)?;
        if height < current {
            tracing::warn!(chain = %chain, current, height, "[keeper] chain height regression");
            return Err(KeeperError::HeightRegression {
                chain: chain.clone(),
                current,
                requested: height,
            });
        }
        let key = DbPrefix::LastChainHeight.key(chain.as_str());
        self.set_record(LAST_CHAIN_HEIGHT, &key, &height)
    }

    pub fn get_last_chain_height(&self, chain: &Chain) -> Result<i64, KeeperError> {
        let key = DbPrefix::LastChainHeight.key(chain.as_str());
        Ok(self.get_record(LAST_CHAIN_HEIGHT, &key)?.unwrap_or_default())
    }

    /// Every recorded chain height, sorted by chain.
    pub fn get_last_chain_heights(&self) -> Result<BTreeMap<Chain, i64>, KeeperError> {
        let prefix = DbPrefix::LastChainHeight.key("");
        let mut heights = BTreeMap::new();
        for entry in self.iter_entries::<i64>(LAST_CHAIN_HEIGHT, prefix.as_bytes()) {
            let (key, height) = entry?;
            let chain: Chain = key[prefix.len()..].parse()?;
            heights.insert(chain, height);
        }
        Ok(heights)
    }

    pub fn set_last_signed_height(&mut self, height: i64) -> Result<(), KeeperError> {
        let current = self.get_last_signed_height()?;
        if height < current {
            tracing::warn!(current, height, "[keeper] signed height regression");
            return Err(KeeperError::HeightRegression {
                chain: Chain::thor(),
                current,
                requested: height,
            });
        }
        let key = DbPrefix::LastSignedHeight.key("");
        self.set_record(LAST_SIGNED_HEIGHT, &key, &height)
    }

    pub fn get_last_signed_height(&self) -> Result<i64, KeeperError> {
        let key = DbPrefix::LastSignedHeight.key("");
        Ok(self.get_record(LAST_SIGNED_HEIGHT, &key)?.unwrap_or_default())
    }

    /// Heights last observed by `address`, per chain.
    pub fn get_last_observe_height(&self, address: &Address) -> Result<BTreeMap<Chain, i64>, KeeperError> {
        let key = DbPrefix::LastObserveHeight.key(address.as_str());
        Ok(self.get_record(LAST_OBSERVE_HEIGHT, &key)?.unwrap_or_default())
    }

    /// Move `address`'s height for `chain` forward. Lower heights are ignored.
    pub fn set_last_observe_height(
        &mut self,
        chain: &Chain,
        address: &Address,
        height: i64,
    ) -> Result<(), KeeperError> {
        let mut heights = self.get_last_observe_height(address)?;
        let current = heights.entry(chain.clone()).or_insert(0);
        if height <= *current {
            return Ok(());
        }
        *current = height;
        let key = DbPrefix::LastObserveHeight.key(address.as_str());
        self.set_record(LAST_OBSERVE_HEIGHT, &key, &heights)
    }

    // =========================================================================
    // RAGNAROK
    // =========================================================================

    fn get_ragnarok_value(&self, prefix: DbPrefix) -> Result<i64, KeeperError> {
        Ok(self.get_record(RAGNAROK, &prefix.key(""))?.unwrap_or_default())
    }

    fn set_ragnarok_value(&mut self, prefix: DbPrefix, value: i64) -> Result<(), KeeperError> {
        self.set_record(RAGNAROK, &prefix.key(""), &value)
    }

    pub fn ragnarok_in_progress(&self) -> Result<bool, KeeperError> {
        Ok(self.get_ragnarok_block_height()? > 0)
    }

    pub fn get_ragnarok_block_height(&self) -> Result<i64, KeeperError> {
        self.get_ragnarok_value(DbPrefix::RagnarokHeight)
    }

    pub fn set_ragnarok_block_height(&mut self, height: i64) -> Result<(), KeeperError> {
        tracing::warn!(height, "[keeper] ragnarok height set");
        self.set_ragnarok_value(DbPrefix::RagnarokHeight, height)
    }

    pub fn get_ragnarok_nth(&self) -> Result<i64, KeeperError> {
        self.get_ragnarok_value(DbPrefix::RagnarokNth)
    }

    pub fn set_ragnarok_nth(&mut self, nth: i64) -> Result<(), KeeperError> {
        self.set_ragnarok_value(DbPrefix::RagnarokNth, nth)
    }

    pub fn get_ragnarok_pending(&self) -> Result<i64, KeeperError> {
        self.get_ragnarok_value(DbPrefix::RagnarokPending)
    }

    pub fn set_ragnarok_pending(&mut self, pending: i64) -> Result<(), KeeperError> {
        self.set_ragnarok_value(DbPrefix::RagnarokPending, pending)
    }

    // =========================================================================
    // TX MARKERS
    // =========================================================================

    pub fn list_tx_markers(&self, hash: &str) -> Result<Vec<TxMarker>, KeeperError> {
        let key = DbPrefix::TxMarker.key(hash);
        Ok(self.get_record(TX_MARKER, &key)?.unwrap_or_default())
    }

    /// Replace the markers of `hash`. An empty list removes the record.
    pub fn set_tx_markers(&mut self, hash: &str, markers: &[TxMarker]) -> Result<(), KeeperError> {
        let key = DbPrefix::TxMarker.key(hash);
        if markers.is_empty() {
            return self.delete_key(&key);
        }
        self.set_record(TX_MARKER, &key, &markers)
    }

    pub fn append_tx_marker(&mut self, hash: &str, marker: TxMarker) -> Result<(), KeeperError> {
        if marker.is_empty() {
            return Err(KeeperError::EmptyTxMarker {
                hash: hash.to_string(),
            });
        }
        let mut markers = self.list_tx_markers(hash)?;
        markers.push(marker);
        self.set_tx_markers(hash, &markers)
    }

    // =========================================================================
    // STORE VERSION
    // =========================================================================

    /// Stored format version, or the configured genesis version if unset.
    pub fn get_store_version(&self) -> Result<i64, KeeperError> {
        let key = DbPrefix::StoreVersion.key("");
        Ok(self
            .get_record(STORE_VERSION, &key)?
            .unwrap_or(self.config.genesis_store_version))
    }

    pub fn set_store_version(&mut self, version: i64) -> Result<(), KeeperError> {
        tracing::info!(version, "[keeper] store version set");
        self.set_record(STORE_VERSION, &DbPrefix::StoreVersion.key(""), &version)
    }

    // =========================================================================
    // AFFILIATE COLLECTORS
    // =========================================================================

    pub fn affiliate_collector_iter(&self) -> RecordIter<'_, AffiliateFeeCollector, C> {
        self.iter_records(AFFILIATE_COLLECTOR, DbPrefix::AffiliateCollector.iter_prefix())
    }

    pub fn get_affiliate_collectors(&self) -> Result<Vec<AffiliateFeeCollector>, KeeperError> {
        self.affiliate_collector_iter().collect()
    }

    pub fn get_affiliate_collector(&self, owner: &Address) -> Result<AffiliateFeeCollector, KeeperError> {
        let key = DbPrefix::AffiliateCollector.key(owner.as_str());
        Ok(self
            .get_record(AFFILIATE_COLLECTOR, &key)?
            .unwrap_or_else(|| AffiliateFeeCollector {
                owner_address: owner.clone(),
                rune_amount: U256::zero(),
            }))
    }

    pub fn set_affiliate_collector(
        &mut self,
        collector: &AffiliateFeeCollector,
    ) -> Result<(), KeeperError> {
        if collector.owner_address.is_empty() {
            return Err(KeeperError::Validation {
                entity: AFFILIATE_COLLECTOR,
                reason: "owner address cannot be empty".into(),
            });
        }
        let key = DbPrefix::AffiliateCollector.key(collector.owner_address.as_str());
        self.set_record(AFFILIATE_COLLECTOR, &key, collector)
    }
}
