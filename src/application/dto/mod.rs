//! Data Transfer Objects - For API boundaries
//!
//! The camelCase wire shapes of the HTTP API. Domain types keep their own
//! serde derives only where they are serialized as-is (ids, card types,
//! counters).

pub mod game;

pub use game::*;
