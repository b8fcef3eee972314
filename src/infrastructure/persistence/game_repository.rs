//! SQLite game store
//!
//! Soft-delete columns: `deleted_on` holds unix seconds (0 while live) and
//! `is_del` mirrors it as 0/1. Every read filters `is_del = 0`; every
//! soft delete sets both columns in the same statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

use crate::application::ports::outbound::{GameStore, GameUnitOfWork, PersistenceError};
use crate::domain::entities::{Card, Game, GameCounters, Meta, MetaCounter, NewCard, NewGame};
use crate::domain::value_objects::{CardId, GameId, SoftDelete};

const REQUIRED_TABLES: [&str; 3] = ["games", "cards", "meta"];

#[derive(Clone)]
pub struct SqliteGameStore {
    pool: SqlitePool,
}

impl SqliteGameStore {
    /// Wrap the pool, creating the schema if it does not exist yet
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                theme TEXT NOT NULL,
                card_count INTEGER NOT NULL,
                style TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL,
                created_by TEXT NOT NULL,
                created_on INTEGER NOT NULL,
                modified_on INTEGER NOT NULL,
                deleted_on INTEGER NOT NULL DEFAULT 0,
                is_del INTEGER NOT NULL DEFAULT 0
            )
        "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id INTEGER NOT NULL REFERENCES games(id),
                type TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                effect TEXT NOT NULL,
                created_by TEXT NOT NULL,
                created_on INTEGER NOT NULL,
                modified_on INTEGER NOT NULL,
                deleted_on INTEGER NOT NULL DEFAULT 0,
                is_del INTEGER NOT NULL DEFAULT 0
            )
        "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_cards_game_id ON cards (game_id)")
            .execute(&pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Names of required tables that are missing from the database
    pub async fn missing_tables(&self) -> Result<Vec<&'static str>, sqlx::Error> {
        let present: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&self.pool)
                .await?;
        Ok(REQUIRED_TABLES
            .into_iter()
            .filter(|table| !present.iter().any(|(name,)| name == table))
            .collect())
    }
}

#[derive(FromRow)]
struct GameRow {
    id: i64,
    theme: String,
    card_count: i64,
    style: String,
    description: String,
    created_at: DateTime<Utc>,
    created_by: String,
    deleted_on: i64,
    is_del: i64,
}

impl TryFrom<GameRow> for Game {
    type Error = PersistenceError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        let card_count = u32::try_from(row.card_count).map_err(|_| {
            PersistenceError::Corrupt(format!("game {} has card_count {}", row.id, row.card_count))
        })?;
        Ok(Game {
            id: GameId::new(row.id),
            theme: row.theme,
            card_count,
            style: row.style,
            description: row.description,
            created_at: row.created_at,
            created_by: row.created_by,
            deleted: soft_delete(row.deleted_on, row.is_del, "game", row.id)?,
        })
    }
}

#[derive(FromRow)]
struct CardRow {
    id: i64,
    game_id: i64,
    #[sqlx(rename = "type")]
    card_type: String,
    name: String,
    description: String,
    effect: String,
    deleted_on: i64,
    is_del: i64,
}

impl TryFrom<CardRow> for Card {
    type Error = PersistenceError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        let card_type = row
            .card_type
            .parse()
            .map_err(|e| PersistenceError::Corrupt(format!("card {}: {}", row.id, e)))?;
        Ok(Card {
            id: CardId::new(row.id),
            game_id: GameId::new(row.game_id),
            card_type,
            name: row.name,
            description: row.description,
            effect: row.effect,
            deleted: soft_delete(row.deleted_on, row.is_del, "card", row.id)?,
        })
    }
}

fn soft_delete(
    deleted_on: i64,
    is_del: i64,
    table: &str,
    id: i64,
) -> Result<SoftDelete, PersistenceError> {
    SoftDelete::from_columns(deleted_on, is_del).ok_or_else(|| {
        PersistenceError::Corrupt(format!(
            "{table} {id} has inconsistent soft-delete columns ({deleted_on}, {is_del})"
        ))
    })
}

#[async_trait]
impl GameStore for SqliteGameStore {
    async fn begin(&self) -> Result<Box<dyn GameUnitOfWork>, PersistenceError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }

    async fn get_game(&self, id: GameId) -> Result<Option<Game>, PersistenceError> {
        let row: Option<GameRow> = sqlx::query_as(
            r#"
            SELECT id, theme, card_count, style, description, created_at, created_by,
                   deleted_on, is_del
            FROM games
            WHERE id = ? AND is_del = 0
        "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Game::try_from).transpose()
    }

    async fn list_games(&self) -> Result<Vec<Game>, PersistenceError> {
        let rows: Vec<GameRow> = sqlx::query_as(
            r#"
            SELECT id, theme, card_count, style, description, created_at, created_by,
                   deleted_on, is_del
            FROM games
            WHERE is_del = 0
            ORDER BY id DESC
        "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Game::try_from).collect()
    }

    async fn get_card(&self, id: CardId) -> Result<Option<Card>, PersistenceError> {
        let row: Option<CardRow> = sqlx::query_as(
            r#"
            SELECT id, game_id, type, name, description, effect, deleted_on, is_del
            FROM cards
            WHERE id = ? AND is_del = 0
        "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Card::try_from).transpose()
    }

    async fn list_cards(&self, game_id: GameId) -> Result<Vec<Card>, PersistenceError> {
        let rows: Vec<CardRow> = sqlx::query_as(
            r#"
            SELECT id, game_id, type, name, description, effect, deleted_on, is_del
            FROM cards
            WHERE game_id = ? AND is_del = 0
            ORDER BY id ASC
        "#,
        )
        .bind(game_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Card::try_from).collect()
    }

    async fn get_meta(&self, key: &str) -> Result<Option<i64>, PersistenceError> {
        let value: Option<(i64,)> = sqlx::query_as("SELECT value FROM meta WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value.map(|(v,)| v))
    }

    async fn get_counters(&self, game_id: GameId) -> Result<GameCounters, PersistenceError> {
        let plot_points = self
            .get_meta(&MetaCounter::PlotPoints.key(game_id))
            .await?
            .unwrap_or_default();
        let main_objective_completed = self
            .get_meta(&MetaCounter::MainObjectiveCompleted.key(game_id))
            .await?
            .unwrap_or_default();
        Ok(GameCounters {
            plot_points,
            main_objective_completed,
        })
    }

    async fn soft_delete_game(&self, id: GameId) -> Result<bool, PersistenceError> {
        let (deleted_on, is_del) = SoftDelete::deleted_at(Utc::now()).to_columns();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE games SET deleted_on = ?, is_del = ?, modified_on = ? WHERE id = ? AND is_del = 0",
        )
        .bind(deleted_on)
        .bind(is_del)
        .bind(deleted_on)
        .bind(id.value())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "UPDATE cards SET deleted_on = ?, is_del = ?, modified_on = ? WHERE game_id = ? AND is_del = 0",
        )
        .bind(deleted_on)
        .bind(is_del)
        .bind(deleted_on)
        .bind(id.value())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn soft_delete_card(&self, id: CardId) -> Result<bool, PersistenceError> {
        let (deleted_on, is_del) = SoftDelete::deleted_at(Utc::now()).to_columns();
        let result = sqlx::query(
            "UPDATE cards SET deleted_on = ?, is_del = ?, modified_on = ? WHERE id = ? AND is_del = 0",
        )
        .bind(deleted_on)
        .bind(is_del)
        .bind(deleted_on)
        .bind(id.value())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// One open write transaction
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl GameUnitOfWork for SqliteUnitOfWork {
    async fn create_game(&mut self, game: &NewGame) -> Result<GameId, PersistenceError> {
        let now = Utc::now().timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO games (theme, card_count, style, description, created_at, created_by,
                               created_on, modified_on, deleted_on, is_del)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0)
        "#,
        )
        .bind(&game.theme)
        .bind(i64::from(game.card_count))
        .bind(&game.style)
        .bind(&game.description)
        .bind(game.created_at)
        .bind(&game.created_by)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await?;

        Ok(GameId::new(result.last_insert_rowid()))
    }

    async fn create_card(&mut self, card: &NewCard) -> Result<CardId, PersistenceError> {
        let now = Utc::now().timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO cards (game_id, type, name, description, effect, created_by,
                               created_on, modified_on, deleted_on, is_del)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0)
        "#,
        )
        .bind(card.game_id.value())
        .bind(card.card_type.as_str())
        .bind(&card.name)
        .bind(&card.description)
        .bind(&card.effect)
        .bind(crate::domain::entities::SYSTEM_AUTHOR)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await?;

        Ok(CardId::new(result.last_insert_rowid()))
    }

    async fn create_meta(&mut self, meta: &Meta) -> Result<(), PersistenceError> {
        sqlx::query("INSERT INTO meta (key, value) VALUES (?, ?)")
            .bind(&meta.key)
            .bind(meta.value)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), PersistenceError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), PersistenceError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
