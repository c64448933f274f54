//! # Error Types
//!
//! Parse errors for the shared value types.

use thiserror::Error;

/// Errors raised while parsing or constructing shared value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Chain identifier was empty or contained invalid characters.
    #[error("invalid chain: {0:?}")]
    InvalidChain(String),

    /// Asset string could not be split into chain and symbol.
    #[error("invalid asset: {0:?}")]
    InvalidAsset(String),

    /// Software version was not of the form `major.minor.patch`.
    #[error("invalid version: {0:?}")]
    InvalidVersion(String),

    /// Amount was not a base-10 unsigned integer.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}
