//! Domain entities - Core business objects with identity

mod card;
mod game;
mod meta;

pub use card::{Card, NewCard};
pub use game::{Game, NewGame, SYSTEM_AUTHOR};
pub use meta::{GameCounters, Meta, MetaCounter};
