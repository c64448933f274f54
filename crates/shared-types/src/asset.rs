//! Assets: a chain, a symbol and whether the asset is a synthetic claim held
//! on the settlement chain.

use crate::chain::{Chain, THOR_CHAIN};
use crate::errors::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbol of the native settlement token.
pub const RUNE_SYMBOL: &str = "RUNE";

/// Denomination of the native settlement token inside bank modules.
pub const RUNE_DENOM: &str = "rune";

/// A tradeable asset.
///
/// The textual form is `CHAIN.SYMBOL` for layer-1 assets and `CHAIN/SYMBOL`
/// for synthetic ones, e.g. `BTC.BTC` and `BTC/BTC`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub chain: Chain,
    pub symbol: String,
    pub ticker: String,
    pub synth: bool,
}

impl Asset {
    /// Build a layer-1 asset from its parts.
    pub fn new(chain: Chain, symbol: &str) -> Self {
        let symbol = symbol.trim().to_ascii_uppercase();
        let ticker = symbol.split('-').next().unwrap_or_default().to_string();
        Self {
            chain,
            symbol,
            ticker,
            synth: false,
        }
    }

    /// The native settlement token, `THOR.RUNE`.
    pub fn rune() -> Self {
        Self::new(Chain::thor(), RUNE_SYMBOL)
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty() || self.symbol.is_empty()
    }

    pub fn is_synthetic(&self) -> bool {
        self.synth
    }

    pub fn is_rune(&self) -> bool {
        !self.synth && self.chain.is_thor() && self.symbol == RUNE_SYMBOL
    }

    /// Assets whose custody lives on the settlement chain.
    pub fn is_native(&self) -> bool {
        self.synth || self.chain.is_thor()
    }

    /// Layer-1 mirrors minted on the settlement chain (`THOR.BTC`).
    pub fn is_derived(&self) -> bool {
        self.chain.is_thor() && !self.synth && !self.is_rune()
    }

    /// The synthetic form of this asset.
    pub fn synth_asset(&self) -> Self {
        Self {
            synth: true,
            ..self.clone()
        }
    }

    /// The layer-1 asset this asset ultimately settles on.
    pub fn layer1_asset(&self) -> Self {
        if self.synth {
            return Self {
                synth: false,
                ..self.clone()
            };
        }
        if self.is_derived() {
            if let Ok(chain) = Chain::new(&self.ticker) {
                return Self::new(chain, &self.symbol);
            }
        }
        self.clone()
    }

    /// Bank denomination for native assets: `rune`, `btc/btc`, `thor.btc`.
    pub fn native_denom(&self) -> String {
        if self.is_rune() {
            return RUNE_DENOM.to_string();
        }
        self.to_string().to_ascii_lowercase()
    }
}

impl FromStr for Asset {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case(RUNE_SYMBOL) || raw.eq_ignore_ascii_case(RUNE_DENOM) {
            return Ok(Self::rune());
        }
        let (separator, synth) = if raw.contains('/') {
            ('/', true)
        } else {
            ('.', false)
        };
        let (chain, symbol) = raw
            .split_once(separator)
            .ok_or_else(|| TypesError::InvalidAsset(s.to_string()))?;
        if symbol.is_empty() {
            return Err(TypesError::InvalidAsset(s.to_string()));
        }
        let chain = Chain::new(chain).map_err(|_| TypesError::InvalidAsset(s.to_string()))?;
        let mut asset = Self::new(chain, symbol);
        asset.synth = synth;
        if asset.synth && asset.chain.as_str() == THOR_CHAIN {
            return Err(TypesError::InvalidAsset(s.to_string()));
        }
        Ok(asset)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let separator = if self.synth { '/' } else { '.' };
        write!(f, "{}{}{}", self.chain, separator, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layer1_and_synth() {
        let btc: Asset = "btc.btc".parse().unwrap();
        assert_eq!(btc.to_string(), "BTC.BTC");
        assert!(!btc.is_native());

        let synth: Asset = "BTC/BTC".parse().unwrap();
        assert!(synth.is_synthetic());
        assert!(synth.is_native());
        assert_eq!(synth.layer1_asset(), btc);
        assert_eq!(synth.native_denom(), "btc/btc");
    }

    #[test]
    fn test_ticker_strips_contract_suffix() {
        let usdt: Asset = "ETH.USDT-0XDAC17F958D2EE523A2206206994597C13D831EC7".parse().unwrap();
        assert_eq!(usdt.ticker, "USDT");
    }

    #[test]
    fn test_rune_shorthand() {
        let rune: Asset = "rune".parse().unwrap();
        assert!(rune.is_rune());
        assert!(!rune.is_derived());
        assert_eq!(rune.native_denom(), RUNE_DENOM);
    }

    #[test]
    fn test_derived_asset_maps_to_layer1() {
        let derived: Asset = "THOR.BTC".parse().unwrap();
        assert!(derived.is_derived());
        assert_eq!(derived.layer1_asset().to_string(), "BTC.BTC");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("BTC".parse::<Asset>().is_err());
        assert!("BTC.".parse::<Asset>().is_err());
        assert!("THOR/RUNE".parse::<Asset>().is_err());
        assert!(Asset::default().is_empty());
        assert_eq!(Asset::default().to_string(), "");
    }
}
