//! Shared fixtures for unit tests: a scripted generator, in-memory and
//! file-backed stores and a store that fails on demand.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::application::ports::outbound::{
    ContentGenerator, GameStore, GameUnitOfWork, GeneratorError, PersistenceError,
};
use crate::domain::entities::{Card, Game, GameCounters, Meta, NewCard, NewGame};
use crate::domain::value_objects::{CardId, GameId};
use crate::infrastructure::config::DatabaseConfig;
use crate::infrastructure::persistence::{connect_in_memory, open_game_store, SqliteGameStore};

pub async fn memory_store() -> SqliteGameStore {
    SqliteGameStore::new(connect_in_memory().await).await.unwrap()
}

/// A store on a real database file inside `dir`, shared by every clone
pub async fn file_store(dir: &tempfile::TempDir, busy_timeout_secs: u64) -> SqliteGameStore {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("deckforge.db").display()),
        busy_timeout_secs,
        ..DatabaseConfig::default()
    };
    open_game_store(&config).await.unwrap()
}

pub fn story_json(story: &str) -> String {
    json!({ "story_background": story }).to_string()
}

/// `count` cards named `"{prefix} {n}"`
pub fn card_batch_json(prefix: &str, count: usize, description: &str) -> String {
    let cards: Vec<_> = (1..=count)
        .map(|n| {
            json!({
                "name": format!("{prefix} {n}"),
                "description": description,
                "effect": format!("Effect {n}"),
            })
        })
        .collect();
    serde_json::Value::Array(cards).to_string()
}

/// Replays canned responses in order and records every prompt
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GeneratorError>>>,
    prompts: Mutex<Vec<String>>,
    delay: Duration,
    hang_when_exhausted: bool,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, GeneratorError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            hang_when_exhausted: false,
        }
    }

    /// Sleep this long before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Never answer once the script runs out
    pub fn hanging_when_exhausted(mut self) -> Self {
        self.hang_when_exhausted = true;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None if self.hang_when_exhausted => std::future::pending().await,
            None => Err(GeneratorError::ServiceUnavailable("script exhausted".into())),
        }
    }
}

/// Which write a [`FaultyStore`] should break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    CreateGame,
    /// Fail the card write at this zero-based position
    CreateCard(usize),
    CreateMeta(usize),
    Commit,
    /// Every write succeeds but the commit never completes
    StallCommit,
}

/// Delegates to a real store but fails one write inside the transaction
pub struct FaultyStore {
    inner: SqliteGameStore,
    fault: Fault,
}

impl FaultyStore {
    pub fn new(inner: SqliteGameStore, fault: Fault) -> Self {
        Self { inner, fault }
    }
}

fn injected() -> PersistenceError {
    PersistenceError::Database(sqlx::Error::Protocol("injected failure".into()))
}

#[async_trait]
impl GameStore for FaultyStore {
    async fn begin(&self) -> Result<Box<dyn GameUnitOfWork>, PersistenceError> {
        Ok(Box::new(FaultyUnitOfWork {
            inner: self.inner.begin().await?,
            fault: self.fault,
            cards_written: 0,
            metas_written: 0,
        }))
    }

    async fn get_game(&self, id: GameId) -> Result<Option<Game>, PersistenceError> {
        self.inner.get_game(id).await
    }

    async fn list_games(&self) -> Result<Vec<Game>, PersistenceError> {
        self.inner.list_games().await
    }

    async fn get_card(&self, id: CardId) -> Result<Option<Card>, PersistenceError> {
        self.inner.get_card(id).await
    }

    async fn list_cards(&self, game_id: GameId) -> Result<Vec<Card>, PersistenceError> {
        self.inner.list_cards(game_id).await
    }

    async fn get_meta(&self, key: &str) -> Result<Option<i64>, PersistenceError> {
        self.inner.get_meta(key).await
    }

    async fn get_counters(&self, game_id: GameId) -> Result<GameCounters, PersistenceError> {
        self.inner.get_counters(game_id).await
    }

    async fn soft_delete_game(&self, id: GameId) -> Result<bool, PersistenceError> {
        self.inner.soft_delete_game(id).await
    }

    async fn soft_delete_card(&self, id: CardId) -> Result<bool, PersistenceError> {
        self.inner.soft_delete_card(id).await
    }
}

struct FaultyUnitOfWork {
    inner: Box<dyn GameUnitOfWork>,
    fault: Fault,
    cards_written: usize,
    metas_written: usize,
}

#[async_trait]
impl GameUnitOfWork for FaultyUnitOfWork {
    async fn create_game(&mut self, game: &NewGame) -> Result<GameId, PersistenceError> {
        if self.fault == Fault::CreateGame {
            return Err(injected());
        }
        self.inner.create_game(game).await
    }

    async fn create_card(&mut self, card: &NewCard) -> Result<CardId, PersistenceError> {
        let position = self.cards_written;
        self.cards_written += 1;
        if self.fault == Fault::CreateCard(position) {
            return Err(injected());
        }
        self.inner.create_card(card).await
    }

    async fn create_meta(&mut self, meta: &Meta) -> Result<(), PersistenceError> {
        let position = self.metas_written;
        self.metas_written += 1;
        if self.fault == Fault::CreateMeta(position) {
            return Err(injected());
        }
        self.inner.create_meta(meta).await
    }

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError> {
        if self.fault == Fault::Commit {
            self.inner.rollback().await?;
            return Err(injected());
        }
        if self.fault == Fault::StallCommit {
            return std::future::pending().await;
        }
        self.inner.commit().await
    }

    async fn rollback(self: Box<Self>) -> Result<(), PersistenceError> {
        self.inner.rollback().await
    }
}
