//! Port traits: the API the keeper offers and the capabilities it needs.

pub mod inbound;
pub mod outbound;
