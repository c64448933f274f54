//! Outbound batches keyed by height.

use super::{Keeper, RecordIter};
use crate::domain::entities::{TxOut, TxOutItem};
use crate::domain::errors::KeeperError;
use crate::domain::prefixes::DbPrefix;
use crate::ports::inbound::TxOutQueue;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};

const TX_OUT: &str = "txout";

fn tx_out_key(height: i64) -> String {
    DbPrefix::TxOut.key(&height.to_string())
}

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    /// Stored batches in key order. Keys are decimal strings, so the order
    /// is lexicographic rather than numeric.
    pub fn tx_out_iter(&self) -> RecordIter<'_, TxOut, C> {
        self.iter_records(TX_OUT, DbPrefix::TxOut.iter_prefix())
    }
}

impl<KV, C, B> TxOutQueue for Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    fn set_tx_out(&mut self, tx_out: TxOut) -> Result<(), KeeperError> {
        if tx_out.is_empty() {
            return Ok(());
        }
        self.set_record(TX_OUT, &tx_out_key(tx_out.height), &tx_out)
    }

    fn append_tx_out(&mut self, height: i64, item: TxOutItem) -> Result<(), KeeperError> {
        let mut block = self.get_tx_out(height)?;
        tracing::debug!(
            height,
            chain = %item.chain,
            to = %item.to_address,
            "[keeper] outbound scheduled"
        );
        block.tx_array.push(item);
        self.set_tx_out(block)
    }

    fn get_tx_out(&self, height: i64) -> Result<TxOut, KeeperError> {
        Ok(self
            .get_record(TX_OUT, &tx_out_key(height))?
            .unwrap_or_else(|| TxOut::new(height)))
    }

    fn clear_tx_out(&mut self, height: i64) -> Result<(), KeeperError> {
        self.delete_key(&tx_out_key(height))
    }
}
