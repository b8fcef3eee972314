//! Aggregates - Cluster of domain objects treated as a single unit

pub mod game_aggregate;

pub use game_aggregate::{build_cards, build_meta, AggregateError, GameBlueprint, ROLE_CARD_COUNT};
