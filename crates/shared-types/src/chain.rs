//! Chain identifiers.

use crate::errors::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the settlement chain itself.
pub const THOR_CHAIN: &str = "THOR";

/// An external or native chain, stored upper-case (`BTC`, `ETH`, `THOR`).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Chain(String);

impl Chain {
    /// Build a chain identifier, normalising to upper case.
    pub fn new(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TypesError::InvalidChain(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The settlement chain.
    pub fn thor() -> Self {
        Self(THOR_CHAIN.to_string())
    }

    /// The empty chain, used where a record has no chain yet.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_thor(&self) -> bool {
        self.0 == THOR_CHAIN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Chain {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_normalises_case() {
        let chain: Chain = "btc".parse().unwrap();
        assert_eq!(chain.as_str(), "BTC");
        assert!(!chain.is_thor());
        assert!(Chain::new(" thor ").unwrap().is_thor());
    }

    #[test]
    fn test_chain_rejects_garbage() {
        assert!(matches!(Chain::new(""), Err(TypesError::InvalidChain(_))));
        assert!(matches!(Chain::new("BT.C"), Err(TypesError::InvalidChain(_))));
    }
}
