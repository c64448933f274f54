//! Bincode record codec.

use crate::domain::errors::SerializationError;
use crate::ports::outbound::RecordCodec;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes records with bincode's default (fixed-int, little-endian) format.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeCodec;

impl BincodeCodec {
    pub fn new() -> Self {
        Self
    }
}

impl RecordCodec for BincodeCodec {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, SerializationError> {
        bincode::serialize(record).map_err(|e| SerializationError {
            message: format!("Failed to serialize record: {}", e),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SerializationError> {
        bincode::deserialize(bytes).map_err(|e| SerializationError {
            message: format!("Failed to deserialize record: {}", e),
        })
    }
}
