//! # Keeper Configuration
//!
//! Immutable settings fixed at construction. Module names and reserved keys
//! must be identical on every validator, so the defaults are the network
//! values and overrides are meant for tests and private networks.

use crate::domain::errors::ConfigError;
use crate::domain::halt::ArbAllowList;
use serde::{Deserialize, Serialize};
use shared_types::RUNE_DENOM;

/// Configuration for the keeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    /// Module holding pool and queued swap custody (default: `asgard`).
    pub asgard_module: String,
    /// Module holding node bonds and bond rewards (default: `bond`).
    pub bond_module: String,
    /// Protocol reserve (default: `reserve`).
    pub reserve_module: String,
    /// Operating module that must never carry a balance (default: `thorchain`).
    pub protocol_module: String,
    /// Module holding collected affiliate fees (default: `affiliate_collector`).
    pub affiliate_collector_module: String,
    /// Bank denomination of the native token (default: `rune`).
    pub native_denom: String,
    /// Governance key of the kill switch (default: `ReleaseTheKraken`).
    pub kill_switch_key: String,
    /// Governance key capping native supply (default: `MaxRuneSupply`).
    pub max_supply_key: String,
    /// Store version reported before one has been written.
    pub genesis_store_version: i64,
    /// Senders exempt from trading halts.
    pub arb_allow_list: ArbAllowList,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            asgard_module: "asgard".to_string(),
            bond_module: "bond".to_string(),
            reserve_module: "reserve".to_string(),
            protocol_module: "thorchain".to_string(),
            affiliate_collector_module: "affiliate_collector".to_string(),
            native_denom: RUNE_DENOM.to_string(),
            kill_switch_key: "ReleaseTheKraken".to_string(),
            max_supply_key: "MaxRuneSupply".to_string(),
            genesis_store_version: 38,
            arb_allow_list: ArbAllowList::default(),
        }
    }
}

impl KeeperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_asgard_module(mut self, name: impl Into<String>) -> Self {
        self.asgard_module = name.into();
        self
    }

    pub fn with_bond_module(mut self, name: impl Into<String>) -> Self {
        self.bond_module = name.into();
        self
    }

    pub fn with_kill_switch_key(mut self, key: impl Into<String>) -> Self {
        self.kill_switch_key = key.into();
        self
    }

    pub fn with_genesis_store_version(mut self, version: i64) -> Self {
        self.genesis_store_version = version;
        self
    }

    pub fn with_arb_allow_list(mut self, list: ArbAllowList) -> Self {
        self.arb_allow_list = list;
        self
    }

    /// Module names as `(role, name)` pairs.
    pub fn modules(&self) -> [(&'static str, &str); 5] {
        [
            ("asgard_module", self.asgard_module.as_str()),
            ("bond_module", self.bond_module.as_str()),
            ("reserve_module", self.reserve_module.as_str()),
            ("protocol_module", self.protocol_module.as_str()),
            (
                "affiliate_collector_module",
                self.affiliate_collector_module.as_str(),
            ),
        ]
    }

    /// Reject empty names and module roles sharing an account.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let modules = self.modules();
        for (field, name) in modules {
            if name.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        for (i, (first, a)) in modules.iter().enumerate() {
            if let Some((second, _)) = modules[i + 1..].iter().find(|(_, b)| a == b) {
                return Err(ConfigError::DuplicateModule {
                    name: a.to_string(),
                    first: *first,
                    second: *second,
                });
            }
        }
        if self.native_denom.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "native_denom",
            });
        }
        if self.kill_switch_key.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "kill_switch_key",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(KeeperConfig::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let config = KeeperConfig::new().with_bond_module("asgard");
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateModule {
                name: "asgard".into(),
                first: "asgard_module",
                second: "bond_module",
            })
        );
    }

    #[test]
    fn test_empty_kill_switch_rejected() {
        let config = KeeperConfig::new().with_kill_switch_key(" ");
        assert_eq!(
            config.validate(),
            Err(ConfigError::Empty {
                field: "kill_switch_key"
            })
        );
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = KeeperConfig::from_json(r#"{"genesis_store_version": 7}"#).unwrap();
        assert_eq!(config.genesis_store_version, 7);
        assert_eq!(config.asgard_module, "asgard");
        assert!(KeeperConfig::from_json("{not json").is_err());
    }
}
