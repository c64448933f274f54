//! # Determinism Tests
//!
//! Every validator must end a block with byte-identical state. These tests
//! check that write order never leaks into stored bytes or read order, and
//! that no hash-ordered collection creeps into the sources.

mod common;

use common::{make_keeper, TestKeeper};
use primitive_types::U256;
use proptest::prelude::*;
use settlement_keeper::{KeyValueStore, Pool};
use shared_types::{Asset, Chain};
use std::path::Path;

fn dump(keeper: &TestKeeper) -> Vec<(Vec<u8>, Vec<u8>)> {
    keeper
        .kv_store()
        .prefix_iter(b"")
        .collect::<Result<_, _>>()
        .expect("in-memory iteration cannot fail")
}

fn pool(symbol: &str, depth: u64) -> Pool {
    let mut pool = Pool::new(Asset::new(Chain::new("BTC").unwrap(), symbol));
    pool.balance_rune = U256::from(depth);
    pool
}

proptest! {
    #[test]
    fn prop_write_order_does_not_change_state(
        symbols in prop::collection::btree_set("[A-Z]{1,6}", 1..12),
        seed in any::<u64>(),
    ) {
        let symbols: Vec<String> = symbols.into_iter().collect();
        let mut shuffled = symbols.clone();
        // Deterministic permutation driven by the seed.
        let len = shuffled.len();
        for i in 0..len {
            let j = ((seed.rotate_left(i as u32) as usize) ^ i) % len;
            shuffled.swap(i, j);
        }

        let mut forward = make_keeper();
        let mut permuted = make_keeper();
        for (depth, symbol) in symbols.iter().enumerate() {
            forward.set_pool(&pool(symbol, depth as u64)).unwrap();
        }
        for symbol in &shuffled {
            let depth = symbols.iter().position(|s| s == symbol).unwrap();
            permuted.set_pool(&pool(symbol, depth as u64)).unwrap();
        }

        prop_assert_eq!(dump(&forward), dump(&permuted));
        let order: Vec<String> = permuted
            .get_pools()
            .unwrap()
            .into_iter()
            .map(|p| p.asset.symbol)
            .collect();
        prop_assert_eq!(order, symbols);
    }
}

fn scan(dir: &Path, offenders: &mut Vec<String>) {
    let entries = std::fs::read_dir(dir).expect("source dir is readable");
    for entry in entries {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            scan(&path, offenders);
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        let source = std::fs::read_to_string(&path).expect("source is utf-8");
        for (n, line) in source.lines().enumerate() {
            if line.contains("HashMap") || line.contains("HashSet") {
                offenders.push(format!("{}:{}", path.display(), n + 1));
            }
        }
    }
}

#[test]
fn test_sources_use_ordered_collections_only() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut offenders = Vec::new();
    scan(&root.join("src"), &mut offenders);
    scan(&root.join("../shared-types/src"), &mut offenders);
    assert!(offenders.is_empty(), "hash-ordered collections found: {offenders:?}");
}
