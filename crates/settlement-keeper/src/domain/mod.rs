//! Domain layer: records, key layout, errors and pure rules.

pub mod entities;
pub mod errors;
pub mod halt;
pub mod majority;
pub mod prefixes;
