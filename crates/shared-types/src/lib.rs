//! # Shared Types Crate
//!
//! Value types shared by the keeper and the subsystems that feed it.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: chains, assets, coins and identifiers are
//!   defined once here.
//! - **Canonical Forms**: constructors normalise case so that the same asset
//!   or transaction id always produces the same storage key.
//! - **Ordered**: identifiers, chains and assets implement `Ord`, so they can
//!   key a `BTreeMap`/`BTreeSet` and iterate identically on every node.

pub mod asset;
pub mod chain;
pub mod coin;
pub mod errors;
pub mod identity;
pub mod version;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

pub use asset::{Asset, RUNE_DENOM, RUNE_SYMBOL};
pub use chain::{Chain, THOR_CHAIN};
pub use coin::{Coin, Coins};
pub use errors::TypesError;
pub use identity::{Address, PubKey, TxId};
pub use version::SoftwareVersion;
