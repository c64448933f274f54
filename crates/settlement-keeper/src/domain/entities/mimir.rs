//! # Governance Values
//!
//! Node votes on governance values and the kill switch that retires the
//! admin override mechanism.
//!
//! ## Kill Switch
//!
//! ```text
//! Armed ──(value >= 0 stored)──→ Released   (terminal)
//! ```
//!
//! There is no transition out of `Released`. A negative value written while
//! `Armed` leaves it `Armed`.

use crate::domain::majority::has_super_majority;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::{BTreeMap, BTreeSet};

/// One node's vote for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMimir {
    pub key: String,
    pub value: i64,
    pub signer: Address,
}

/// All node votes recorded under one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMimirs {
    pub mimirs: Vec<NodeMimir>,
}

impl NodeMimirs {
    pub fn has(&self, signer: &Address) -> bool {
        self.mimirs.iter().any(|m| &m.signer == signer)
    }

    /// The signer's vote for `key`.
    pub fn get(&self, key: &str, signer: &Address) -> Option<i64> {
        self.mimirs
            .iter()
            .find(|m| m.key == key && &m.signer == signer)
            .map(|m| m.value)
    }

    /// Record or replace the signer's vote for `key`.
    pub fn set(&mut self, key: &str, value: i64, signer: Address) {
        match self
            .mimirs
            .iter_mut()
            .find(|m| m.key == key && m.signer == signer)
        {
            Some(existing) => existing.value = value,
            None => self.mimirs.push(NodeMimir {
                key: key.to_string(),
                value,
                signer,
            }),
        }
    }

    /// Drop the signer's vote for `key`.
    pub fn delete(&mut self, key: &str, signer: &Address) {
        self.mimirs.retain(|m| !(m.key == key && &m.signer == signer));
    }

    pub fn is_empty(&self) -> bool {
        self.mimirs.is_empty()
    }

    /// The value held by a supermajority of `active` signers for `key`.
    ///
    /// Each signer counts once, and votes from signers outside `active` are
    /// ignored.
    pub fn super_majority_value(&self, key: &str, active: &[Address]) -> Option<i64> {
        let active: BTreeSet<&Address> = active.iter().collect();
        let mut voted: BTreeSet<&Address> = BTreeSet::new();
        let mut counter: BTreeMap<i64, usize> = BTreeMap::new();
        for mimir in &self.mimirs {
            if mimir.key != key || !active.contains(&mimir.signer) {
                continue;
            }
            if !voted.insert(&mimir.signer) {
                continue;
            }
            *counter.entry(mimir.value).or_default() += 1;
        }
        counter
            .into_iter()
            .find(|(_, count)| has_super_majority(*count, active.len()))
            .map(|(value, _)| value)
    }
}

/// Two-state kill switch for the admin override mechanism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KillSwitch {
    #[default]
    Armed,
    Released,
}

impl KillSwitch {
    /// State implied by the value stored under the kill key.
    pub fn from_stored(value: Option<i64>) -> Self {
        match value {
            Some(v) if v >= 0 => KillSwitch::Released,
            _ => KillSwitch::Armed,
        }
    }

    /// State after writing `value` under the kill key.
    pub fn transition(self, value: i64) -> Self {
        match self {
            KillSwitch::Released => KillSwitch::Released,
            KillSwitch::Armed if value >= 0 => KillSwitch::Released,
            KillSwitch::Armed => KillSwitch::Armed,
        }
    }

    pub fn is_released(&self) -> bool {
        *self == KillSwitch::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(names: &[&str]) -> Vec<Address> {
        names.iter().map(|n| Address::new(n)).collect()
    }

    #[test]
    fn test_set_replaces_existing_vote() {
        let mut m = NodeMimirs::default();
        m.set("HaltTrading", 1, "a".into());
        m.set("HaltTrading", 2, "a".into());
        m.set("PauseLP", 3, "a".into());
        assert_eq!(m.mimirs.len(), 2);
        assert_eq!(m.get("HaltTrading", &"a".into()), Some(2));

        m.delete("HaltTrading", &"a".into());
        assert_eq!(m.get("HaltTrading", &"a".into()), None);
        assert_eq!(m.get("PauseLP", &"a".into()), Some(3));
    }

    #[test]
    fn test_super_majority_value() {
        let active = addrs(&["a", "b", "c"]);
        let mut m = NodeMimirs::default();
        m.set("K", 10, "a".into());
        m.set("K", 20, "b".into());
        m.set("K", 20, "c".into());
        assert_eq!(m.super_majority_value("K", &active), Some(20));

        m.set("K", 30, "c".into());
        assert_eq!(m.super_majority_value("K", &active), None);
    }

    #[test]
    fn test_inactive_signers_do_not_count() {
        let active = addrs(&["a", "b", "c"]);
        let mut m = NodeMimirs::default();
        m.set("K", 5, "a".into());
        m.set("K", 5, "x".into());
        m.set("K", 5, "y".into());
        assert_eq!(m.super_majority_value("K", &active), None);
    }

    #[test]
    fn test_kill_switch_is_one_way() {
        let armed = KillSwitch::from_stored(None);
        assert_eq!(armed, KillSwitch::Armed);
        assert_eq!(armed.transition(-1), KillSwitch::Armed);

        let released = armed.transition(0);
        assert!(released.is_released());
        assert!(released.transition(-1).is_released());
        assert!(KillSwitch::from_stored(Some(5)).is_released());
        assert!(!KillSwitch::from_stored(Some(-3)).is_released());
    }
}
