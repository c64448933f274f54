//! Transaction markers.

use serde::{Deserialize, Serialize};

/// A memo attached to a transaction hash at a height.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxMarker {
    pub height: i64,
    pub memo: String,
}

impl TxMarker {
    pub fn new(height: i64, memo: impl Into<String>) -> Self {
        Self {
            height,
            memo: memo.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
