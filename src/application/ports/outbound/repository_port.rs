//! Repository ports - Interfaces for data persistence
//!
//! Reads go through [`GameStore`]. Writes happen only inside a
//! [`GameUnitOfWork`], which wraps one storage transaction: nothing written
//! through it is visible to other readers until `commit` succeeds, and
//! dropping it without committing discards every write.

use async_trait::async_trait;

use crate::domain::entities::{Card, Game, GameCounters, Meta, NewCard, NewGame};
use crate::domain::value_objects::{CardId, GameId};

// =============================================================================
// Game Store Port
// =============================================================================

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Open a write transaction
    async fn begin(&self) -> Result<Box<dyn GameUnitOfWork>, PersistenceError>;

    /// Get a non-deleted game by ID
    async fn get_game(&self, id: GameId) -> Result<Option<Game>, PersistenceError>;

    /// List non-deleted games, newest first
    async fn list_games(&self) -> Result<Vec<Game>, PersistenceError>;

    /// Get a non-deleted card by ID
    async fn get_card(&self, id: CardId) -> Result<Option<Card>, PersistenceError>;

    /// List a game's non-deleted cards in insertion order
    async fn list_cards(&self, game_id: GameId) -> Result<Vec<Card>, PersistenceError>;

    /// Read one meta counter
    async fn get_meta(&self, key: &str) -> Result<Option<i64>, PersistenceError>;

    /// Read both counters of a game
    async fn get_counters(&self, game_id: GameId) -> Result<GameCounters, PersistenceError>;

    /// Soft-delete a game and its cards. Returns false if no live game matched.
    async fn soft_delete_game(&self, id: GameId) -> Result<bool, PersistenceError>;

    /// Soft-delete a single card. Returns false if no live card matched.
    async fn soft_delete_card(&self, id: CardId) -> Result<bool, PersistenceError>;
}

// =============================================================================
// Unit of Work Port
// =============================================================================

#[async_trait]
pub trait GameUnitOfWork: Send {
    async fn create_game(&mut self, game: &NewGame) -> Result<GameId, PersistenceError>;

    async fn create_card(&mut self, card: &NewCard) -> Result<CardId, PersistenceError>;

    async fn create_meta(&mut self, meta: &Meta) -> Result<(), PersistenceError>;

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError>;

    async fn rollback(self: Box<Self>) -> Result<(), PersistenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A stored row could not be mapped back to a domain value
    #[error("corrupt row: {0}")]
    Corrupt(String),
}
