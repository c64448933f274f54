//! Pending swaps, keyed `{txid}-{index}`.

use super::{Keeper, RecordIter};
use crate::domain::entities::MsgSwap;
use crate::domain::errors::KeeperError;
use crate::domain::prefixes::DbPrefix;
use crate::ports::inbound::SwapQueue;
use crate::ports::outbound::{BankKeeper, KeyValueStore, RecordCodec};
use shared_types::TxId;

const SWAP_QUEUE_ITEM: &str = "swap queue item";

fn item_key(tx_id: &TxId, index: usize) -> String {
    DbPrefix::SwapQueueItem.key(&MsgSwap::queue_key(tx_id, index))
}

impl<KV, C, B> Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    pub fn swap_queue_iter(&self) -> RecordIter<'_, MsgSwap, C> {
        self.iter_records(SWAP_QUEUE_ITEM, DbPrefix::SwapQueueItem.iter_prefix())
    }
}

impl<KV, C, B> SwapQueue for Keeper<KV, C, B>
where
    KV: KeyValueStore,
    C: RecordCodec,
    B: BankKeeper,
{
    fn set_swap_queue_item(&mut self, msg: MsgSwap, index: usize) -> Result<(), KeeperError> {
        if msg.tx.is_empty() {
            return Err(KeeperError::Validation {
                entity: SWAP_QUEUE_ITEM,
                reason: "tx id cannot be empty".into(),
            });
        }
        let key = item_key(&msg.tx.id, index);
        self.set_record(SWAP_QUEUE_ITEM, &key, &msg)?;
        tracing::debug!(key = %key, target = %msg.target_asset, "[keeper] swap queued");
        Ok(())
    }

    fn get_swap_queue_item(&self, tx_id: &TxId, index: usize) -> Result<MsgSwap, KeeperError> {
        let key = item_key(tx_id, index);
        self.get_record(SWAP_QUEUE_ITEM, &key)?.ok_or(KeeperError::NotFound {
            entity: SWAP_QUEUE_ITEM,
            key,
        })
    }

    fn has_swap_queue_item(&self, tx_id: &TxId, index: usize) -> Result<bool, KeeperError> {
        self.has_key(&item_key(tx_id, index))
    }

    fn remove_swap_queue_item(&mut self, tx_id: &TxId, index: usize) -> Result<(), KeeperError> {
        self.delete_key(&item_key(tx_id, index))
    }

    fn swap_queue_items(&self) -> Result<Vec<MsgSwap>, KeeperError> {
        self.swap_queue_iter().collect()
    }
}
