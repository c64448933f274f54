//! Key-generation attempts scheduled at a height.

use serde::{Deserialize, Serialize};
use shared_types::PubKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeygenType {
    #[default]
    Asgard,
    Yggdrasil,
}

/// One key-generation attempt among `members`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keygen {
    pub id: String,
    pub keygen_type: KeygenType,
    pub members: Vec<PubKey>,
}

/// Every key-generation attempt for one height.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeygenBlock {
    pub height: i64,
    pub keygens: Vec<Keygen>,
}

impl KeygenBlock {
    pub fn new(height: i64) -> Self {
        Self {
            height,
            keygens: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keygens.is_empty()
    }

    /// Add `keygen` unless an attempt with the same id is already present.
    pub fn add(&mut self, keygen: Keygen) -> bool {
        if self.keygens.iter().any(|k| k.id == keygen.id) {
            return false;
        }
        self.keygens.push(keygen);
        true
    }
}
