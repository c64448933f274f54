//! Domain records. Every record is replaced whole on `set`.

pub mod keygen;
pub mod liquidity_provider;
pub mod marker;
pub mod mimir;
pub mod network;
pub mod node_account;
pub mod pool;
pub mod swap;
pub mod tx_out;
pub mod vault;
pub mod voters;

pub use keygen::{Keygen, KeygenBlock, KeygenType};
pub use liquidity_provider::LiquidityProvider;
pub use marker::TxMarker;
pub use mimir::{KillSwitch, NodeMimir, NodeMimirs};
pub use network::{AffiliateFeeCollector, ChainContract, Network, NetworkFee, VaultData};
pub use node_account::{Jail, NodeAccount, NodePubKeySet, NodeStatus};
pub use pool::{Pool, PoolStatus};
pub use swap::{MsgSwap, Tx};
pub use tx_out::{TxOut, TxOutItem};
pub use vault::{Vault, VaultKind, VaultStatus};
pub use voters::{BanVoter, ErrataTxVoter, ObservedTxVoter, TssVoter, VoteTally};
