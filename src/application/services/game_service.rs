//! Game Service - Application service for reading and retiring games
//!
//! Generation lives in [`super::generation_service`]; this service covers
//! everything that happens to a game after it has been committed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::GameStore;
use crate::domain::entities::{Card, Game, GameCounters};
use crate::domain::value_objects::{CardId, GameId};

/// A game with its cards and counters
#[derive(Debug, Clone)]
pub struct GameDetail {
    pub game: Game,
    pub cards: Vec<Card>,
    pub counters: GameCounters,
}

#[async_trait]
pub trait GameService: Send + Sync {
    /// List live games, newest first
    async fn list_games(&self) -> Result<Vec<Game>>;

    /// Get a live game with its live cards and counters
    async fn get_game_detail(&self, id: GameId) -> Result<Option<GameDetail>>;

    /// Soft-delete a game and its cards
    async fn delete_game(&self, id: GameId) -> Result<bool>;

    /// Soft-delete one card
    async fn delete_card(&self, id: CardId) -> Result<bool>;
}

pub struct GameServiceImpl<S> {
    store: S,
}

impl<S: GameStore> GameServiceImpl<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: GameStore> GameService for GameServiceImpl<S> {
    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<Game>> {
        let games = self.store.list_games().await.context("Failed to list games")?;
        debug!(count = games.len(), "Listed games");
        Ok(games)
    }

    #[instrument(skip(self), fields(game_id = %id))]
    async fn get_game_detail(&self, id: GameId) -> Result<Option<GameDetail>> {
        let Some(game) = self
            .store
            .get_game(id)
            .await
            .context("Failed to load game")?
        else {
            return Ok(None);
        };
        let cards = self
            .store
            .list_cards(id)
            .await
            .context("Failed to load cards")?;
        let counters = self
            .store
            .get_counters(id)
            .await
            .context("Failed to load counters")?;
        Ok(Some(GameDetail {
            game,
            cards,
            counters,
        }))
    }

    #[instrument(skip(self), fields(game_id = %id))]
    async fn delete_game(&self, id: GameId) -> Result<bool> {
        let deleted = self
            .store
            .soft_delete_game(id)
            .await
            .context("Failed to delete game")?;
        if deleted {
            info!("Soft-deleted game and its cards");
        }
        Ok(deleted)
    }

    #[instrument(skip(self), fields(card_id = %id))]
    async fn delete_card(&self, id: CardId) -> Result<bool> {
        let deleted = self
            .store
            .soft_delete_card(id)
            .await
            .context("Failed to delete card")?;
        if deleted {
            info!("Soft-deleted card");
        }
        Ok(deleted)
    }
}
