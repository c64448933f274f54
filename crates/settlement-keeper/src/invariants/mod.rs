//! # Solvency Invariants
//!
//! Each check recomputes what a module should hold from the records that
//! back it and compares that to the bank's actual balance. Checks never
//! mutate state and never return errors: a failed read becomes a message on
//! a broken report, and any halting policy belongs to the caller.
//!
//! | Route | Backed by |
//! |-------|-----------|
//! | `asgard` | pool balances plus native coins in queued swaps |
//! | `bond` | node bonds plus pending bond rewards |
//! | `thorchain` | nothing, the module must stay empty |
//! | `affiliate_collector` | accrued affiliate fees |
//! | `pools` | liquidity provider units and pending amounts |

mod affiliate;
mod asgard;
mod bond;
mod pools;
mod thorchain;

use crate::ports::inbound::InvariantRoutes;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use crate::service::Keeper;
use primitive_types::U256;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of one check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvariantReport {
    pub messages: Vec<String>,
    pub broken: bool,
}

impl InvariantReport {
    pub fn ok() -> Self {
        Self::default()
    }

    /// Report broken by a single message, used for failed reads.
    pub fn failed(message: impl fmt::Display) -> Self {
        let mut report = Self::default();
        report.push(message.to_string());
        report
    }

    /// Record an imbalance. Any message breaks the report.
    pub fn push(&mut self, message: String) {
        self.messages.push(message);
        self.broken = true;
    }

    /// Compare one denomination and record the imbalance, if any.
    pub(crate) fn compare(&mut self, denom: &str, expected: U256, actual: U256) {
        if actual > expected {
            self.push(format!("oversolvent: {}{}", actual - expected, denom));
        } else if actual < expected {
            self.push(format!("insolvent: {}{}", expected - actual, denom));
        }
    }

    /// Compare every denomination present on either side, in denom order.
    pub(crate) fn compare_all(
        &mut self,
        expected: &BTreeMap<String, U256>,
        actual: &BTreeMap<String, U256>,
    ) {
        let mut denoms: Vec<&String> = expected.keys().chain(actual.keys()).collect();
        denoms.sort();
        denoms.dedup();
        for denom in denoms {
            let want = expected.get(denom).copied().unwrap_or_default();
            let have = actual.get(denom).copied().unwrap_or_default();
            self.compare(denom, want, have);
        }
    }
}

/// A named check over a keeper.
pub struct InvariantRoute<K> {
    pub name: &'static str,
    pub check: fn(&K) -> InvariantReport,
}

impl<K> InvariantRoute<K> {
    pub fn new(name: &'static str, check: fn(&K) -> InvariantReport) -> Self {
        Self { name, check }
    }

    pub fn run(&self, keeper: &K) -> InvariantReport {
        (self.check)(keeper)
    }
}

impl<K> fmt::Debug for InvariantRoute<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvariantRoute").field("name", &self.name).finish()
    }
}

impl<KV, C, B> InvariantRoutes for Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    fn invariant_routes() -> Vec<InvariantRoute<Self>> {
        vec![
            InvariantRoute::new("asgard", asgard::check),
            InvariantRoute::new("bond", bond::check),
            InvariantRoute::new("thorchain", thorchain::check),
            InvariantRoute::new("affiliate_collector", affiliate::check),
            InvariantRoute::new("pools", pools::check),
        ]
    }

    fn run_invariants(&self) -> Vec<(&'static str, InvariantReport)> {
        Self::invariant_routes()
            .into_iter()
            .map(|route| {
                let report = route.run(self);
                if report.broken {
                    tracing::warn!(
                        invariant = route.name,
                        messages = ?report.messages,
                        "[keeper] invariant broken"
                    );
                }
                (route.name, report)
            })
            .collect()
    }
}

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    /// Run a single route by name.
    pub fn run_invariant(&self, name: &str) -> Option<InvariantReport> {
        Self::invariant_routes()
            .into_iter()
            .find(|route| route.name == name)
            .map(|route| route.run(self))
    }
}
