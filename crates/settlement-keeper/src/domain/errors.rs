//! # Domain Errors
//!
//! Error types for the keeper.
//!
//! ## Taxonomy
//!
//! - **Absence**: [`KeeperError::NotFound`], only for strict entities.
//! - **Corruption**: [`KeeperError::Corruption`], a stored payload that fails
//!   to decode. Never treated as absence.
//! - **Validation rejection**: an invalid record or transition, rejected
//!   before any write.
//!
//! Invariant violations are not errors; see [`crate::invariants`].

use primitive_types::U256;
use shared_types::{Chain, TypesError};
use thiserror::Error;

/// Errors raised by the keeper.
#[derive(Debug, Clone, Error)]
pub enum KeeperError {
    /// A strict entity was read at a key that was never written.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A key exists but its payload does not decode.
    #[error("corrupt {entity} at {key}: {message}")]
    Corruption {
        entity: &'static str,
        key: String,
        message: String,
    },

    /// A record could not be encoded.
    #[error("failed to encode {entity}: {message}")]
    Encoding {
        entity: &'static str,
        message: String,
    },

    /// The caller supplied an invalid record.
    #[error("invalid {entity}: {reason}")]
    Validation {
        entity: &'static str,
        reason: String,
    },

    /// Network fee failed its basic checks.
    #[error("invalid network fee for {chain}: {reason}")]
    InvalidNetworkFee { chain: String, reason: &'static str },

    /// A vault with funds cannot be deleted.
    #[error("vault {pub_key} still holds funds")]
    VaultHasFunds { pub_key: String },

    /// A height lower than the stored one was written.
    #[error("height regression for {chain}: stored {current}, requested {requested}")]
    HeightRegression {
        chain: Chain,
        current: i64,
        requested: i64,
    },

    /// Tx markers must carry a memo.
    #[error("tx marker for {hash} has an empty memo")]
    EmptyTxMarker { hash: String },

    /// A prefix does not end in the separator.
    #[error("key prefix {prefix:?} does not end in '/'")]
    PrefixMissingSeparator { prefix: &'static str },

    /// One prefix is a string-prefix of another (or a duplicate).
    #[error("key prefix {prefix:?} collides with {other:?}")]
    PrefixCollision {
        prefix: &'static str,
        other: &'static str,
    },

    /// Only native coins can move through bank modules.
    #[error("coin {asset} is not native to the settlement chain")]
    NonNativeCoin { asset: String },

    /// Rejected configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed shared value.
    #[error(transparent)]
    Types(#[from] TypesError),

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] KVStoreError),

    /// Ledger transfer failure.
    #[error(transparent)]
    Bank(#[from] BankError),
}

impl KeeperError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, KeeperError::NotFound { .. })
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, KeeperError::Corruption { .. })
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Codec errors.
#[derive(Debug, Clone, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

/// Ledger transfer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// Source does not hold enough of the denomination.
    #[error("insufficient funds in {holder}: have {available}{denom}, need {required}{denom}")]
    InsufficientFunds {
        holder: String,
        denom: String,
        available: U256,
        required: U256,
    },

    /// Module name is not registered with the bank.
    #[error("unknown module account: {0}")]
    UnknownModule(String),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required name was empty.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// Two module roles share one account.
    #[error("module name {name:?} is used for both {first} and {second}")]
    DuplicateModule {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    /// Config text did not parse.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KeeperError::HeightRegression {
            chain: Chain::new("BTC").unwrap(),
            current: 100,
            requested: 99,
        };
        assert_eq!(
            err.to_string(),
            "height regression for BTC: stored 100, requested 99"
        );

        let err = KeeperError::Corruption {
            entity: "pool",
            key: "pool//BTC.BTC".into(),
            message: "unexpected end of file".into(),
        };
        assert!(err.is_corruption());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_store_error_converts() {
        let err: KeeperError = KVStoreError::IOError {
            message: "disk gone".into(),
        }
        .into();
        assert!(matches!(err, KeeperError::Store(_)));
    }
}
