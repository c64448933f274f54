//! Opaque identifiers: addresses, public keys and transaction ids.
//!
//! Address encodings (bech32 and friends) are owned by the host; these are
//! carried as trimmed strings and compared byte-for-byte.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $normalise:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl AsRef<str>) -> Self {
                let normalise: fn(&str) -> String = $normalise;
                Self(normalise(raw.as_ref().trim()))
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }
    };
}

string_id!(
    /// An account address on any chain.
    Address,
    |s| s.to_string()
);

string_id!(
    /// A public key in its canonical string encoding.
    PubKey,
    |s| s.to_string()
);

string_id!(
    /// A transaction hash, normalised to upper case.
    TxId,
    |s| s.to_ascii_uppercase()
);
