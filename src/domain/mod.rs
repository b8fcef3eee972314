//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Game, Card, Meta
//! - Value Objects: identifiers, card types, soft-delete markers, parsed generator output
//! - Aggregates: the Game + Cards + Meta set built by one generation
//! - Domain Services: card layout and pagination

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
