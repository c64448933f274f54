//! # Key Prefixes
//!
//! Every entity owns one prefix of the shared store. A key is
//! `prefix + "/" + UPPERCASE(suffix)`, e.g. `pool//BTC.BTC`.
//!
//! Every prefix ends in `/`, so no prefix can be a string-prefix of another
//! and two entity spaces never merge under iteration. [`verify_prefixes`]
//! enforces this when a keeper is constructed.

use crate::domain::errors::KeeperError;

/// Key separator. Every prefix ends with it and it joins prefix to suffix.
pub const SEPARATOR: char = '/';

/// Reserved key prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DbPrefix {
    /// Store format version: `_ver/` -> i64
    StoreVersion,
    /// Observed inbound tx voters: `observed_tx_in/{txid}`
    ObservedTxIn,
    /// Observed outbound tx voters: `observed_tx_out/{txid}`
    ObservedTxOut,
    /// Links between inbound and outbound observations.
    ObservedLink,
    /// Pools: `pool/{asset}`
    Pool,
    /// Outbound batches: `txout/{height}`
    TxOut,
    /// Per-height liquidity fee totals.
    TotalLiquidityFee,
    /// Per-height per-pool liquidity fees: `pool_liquidity_fee/{height}-{asset}`
    PoolLiquidityFee,
    /// Liquidity providers: `lp/{asset}/{address}`
    LiquidityProvider,
    /// Last observed external chain heights: `last_chain_height/{chain}`
    LastChainHeight,
    /// Last signed settlement height.
    LastSignedHeight,
    /// Per observer, per chain observation heights.
    LastObserveHeight,
    /// Node accounts: `node_account/{address}`
    NodeAccount,
    /// Active observer markers.
    ActiveObserver,
    /// Node slash points.
    NodeSlashPoints,
    /// Node jail records.
    NodeJail,
    /// Vaults: `vault/{pubkey}`
    Vault,
    /// Append-ordered index of asgard vault keys.
    VaultAsgardIndex,
    /// Vault aggregate data.
    VaultData,
    /// Network aggregate data.
    Network,
    /// Addresses currently observing.
    ObservingAddresses,
    /// Ragnarok start height.
    RagnarokHeight,
    /// Ragnarok round counter.
    RagnarokNth,
    /// Ragnarok pending flag.
    RagnarokPending,
    /// TSS voters.
    Tss,
    /// Keygen blocks: `keygen/{height}`
    Keygen,
    /// Admin governance values: `mimir/{key}`
    Mimir,
    /// Node governance votes: `nodemimir/{key}`
    NodeMimir,
    /// Per-node chain pause heights.
    NodePauseChain,
    /// Swap queue: `swapitem/{txid}-{index}`
    SwapQueueItem,
    /// Network fees: `network_fee/{chain}`
    NetworkFee,
    /// Gas amounts per asset.
    Gas,
    /// Tx markers: `marker/{hash}`
    TxMarker,
    /// Ban voters.
    BanVoter,
    /// Errata voters.
    ErrataTx,
    /// Chain router contracts.
    ChainContract,
    /// Affiliate fee collectors.
    AffiliateCollector,
}

impl DbPrefix {
    /// Every reserved prefix.
    pub const ALL: [DbPrefix; 37] = [
        DbPrefix::StoreVersion,
        DbPrefix::ObservedTxIn,
        DbPrefix::ObservedTxOut,
        DbPrefix::ObservedLink,
        DbPrefix::Pool,
        DbPrefix::TxOut,
        DbPrefix::TotalLiquidityFee,
        DbPrefix::PoolLiquidityFee,
        DbPrefix::LiquidityProvider,
        DbPrefix::LastChainHeight,
        DbPrefix::LastSignedHeight,
        DbPrefix::LastObserveHeight,
        DbPrefix::NodeAccount,
        DbPrefix::ActiveObserver,
        DbPrefix::NodeSlashPoints,
        DbPrefix::NodeJail,
        DbPrefix::Vault,
        DbPrefix::VaultAsgardIndex,
        DbPrefix::VaultData,
        DbPrefix::Network,
        DbPrefix::ObservingAddresses,
        DbPrefix::RagnarokHeight,
        DbPrefix::RagnarokNth,
        DbPrefix::RagnarokPending,
        DbPrefix::Tss,
        DbPrefix::Keygen,
        DbPrefix::Mimir,
        DbPrefix::NodeMimir,
        DbPrefix::NodePauseChain,
        DbPrefix::SwapQueueItem,
        DbPrefix::NetworkFee,
        DbPrefix::Gas,
        DbPrefix::TxMarker,
        DbPrefix::BanVoter,
        DbPrefix::ErrataTx,
        DbPrefix::ChainContract,
        DbPrefix::AffiliateCollector,
    ];

    /// The literal prefix.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DbPrefix::StoreVersion => "_ver/",
            DbPrefix::ObservedTxIn => "observed_tx_in/",
            DbPrefix::ObservedTxOut => "observed_tx_out/",
            DbPrefix::ObservedLink => "observed_link/",
            DbPrefix::Pool => "pool/",
            DbPrefix::TxOut => "txout/",
            DbPrefix::TotalLiquidityFee => "total_liquidity_fee/",
            DbPrefix::PoolLiquidityFee => "pool_liquidity_fee/",
            DbPrefix::LiquidityProvider => "lp/",
            DbPrefix::LastChainHeight => "last_chain_height/",
            DbPrefix::LastSignedHeight => "last_signed_height/",
            DbPrefix::LastObserveHeight => "last_observe_height/",
            DbPrefix::NodeAccount => "node_account/",
            DbPrefix::ActiveObserver => "active_observer/",
            DbPrefix::NodeSlashPoints => "slash/",
            DbPrefix::NodeJail => "jail/",
            DbPrefix::Vault => "vault/",
            DbPrefix::VaultAsgardIndex => "vault_asgard_index/",
            DbPrefix::VaultData => "vault_data/",
            DbPrefix::Network => "network/",
            DbPrefix::ObservingAddresses => "observing_addresses/",
            DbPrefix::RagnarokHeight => "ragnarok_height/",
            DbPrefix::RagnarokNth => "ragnarok_nth/",
            DbPrefix::RagnarokPending => "ragnarok_pending/",
            DbPrefix::Tss => "tss/",
            DbPrefix::Keygen => "keygen/",
            DbPrefix::Mimir => "mimir/",
            DbPrefix::NodeMimir => "nodemimir/",
            DbPrefix::NodePauseChain => "node_pause_chain/",
            DbPrefix::SwapQueueItem => "swapitem/",
            DbPrefix::NetworkFee => "network_fee/",
            DbPrefix::Gas => "gas/",
            DbPrefix::TxMarker => "marker/",
            DbPrefix::BanVoter => "ban/",
            DbPrefix::ErrataTx => "errata/",
            DbPrefix::ChainContract => "chain_contract/",
            DbPrefix::AffiliateCollector => "affiliate_collector/",
        }
    }

    /// Build the full key for `suffix`.
    pub fn key(&self, suffix: &str) -> String {
        let prefix = self.as_str();
        let mut key = String::with_capacity(prefix.len() + 1 + suffix.len());
        key.push_str(prefix);
        key.push(SEPARATOR);
        key.push_str(&suffix.to_uppercase());
        key
    }

    /// Iteration prefix covering every key of this entity.
    pub fn iter_prefix(&self) -> &'static [u8] {
        self.as_str().as_bytes()
    }
}

/// Check that every prefix ends in the separator and that none is a
/// string-prefix of another.
pub fn verify_prefixes(prefixes: &[DbPrefix]) -> Result<(), KeeperError> {
    for prefix in prefixes {
        if !prefix.as_str().ends_with(SEPARATOR) {
            return Err(KeeperError::PrefixMissingSeparator {
                prefix: prefix.as_str(),
            });
        }
    }
    for (i, a) in prefixes.iter().enumerate() {
        for b in &prefixes[i + 1..] {
            let (a, b) = (a.as_str(), b.as_str());
            if a.starts_with(b) || b.starts_with(a) {
                return Err(KeeperError::PrefixCollision {
                    prefix: a,
                    other: b,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_prefix_table_is_collision_free() {
        assert!(verify_prefixes(&DbPrefix::ALL).is_ok());
    }

    #[test]
    fn test_duplicate_prefix_is_rejected() {
        let result = verify_prefixes(&[DbPrefix::Pool, DbPrefix::Vault, DbPrefix::Pool]);
        assert!(matches!(
            result,
            Err(KeeperError::PrefixCollision {
                prefix: "pool/",
                other: "pool/"
            })
        ));
    }

    #[test]
    fn test_key_composition() {
        assert_eq!(DbPrefix::Pool.key("btc.btc"), "pool//BTC.BTC");
        assert_eq!(DbPrefix::Mimir.key("HaltTrading"), "mimir//HALTTRADING");
        assert_eq!(DbPrefix::LiquidityProvider.key("BTC.BTC/"), "lp//BTC.BTC/");
    }

    proptest! {
        #[test]
        fn prop_keys_never_enter_another_prefix_space(
            a in 0usize..DbPrefix::ALL.len(),
            b in 0usize..DbPrefix::ALL.len(),
            suffix in "[a-zA-Z0-9./_-]{0,24}",
        ) {
            prop_assume!(a != b);
            let key = DbPrefix::ALL[a].key(&suffix);
            prop_assert!(key.as_bytes().starts_with(DbPrefix::ALL[a].iter_prefix()));
            prop_assert!(!key.as_bytes().starts_with(DbPrefix::ALL[b].iter_prefix()));
        }
    }
}
