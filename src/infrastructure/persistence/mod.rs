//! SQLite persistence adapters
//!
//! Games, cards and meta counters live in one SQLite database; every
//! generation run writes them inside a single transaction.

mod connection;
mod game_repository;

pub use connection::open_game_store;
pub use game_repository::SqliteGameStore;

#[cfg(test)]
pub use connection::connect_in_memory;
