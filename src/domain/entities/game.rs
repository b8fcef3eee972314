//! Game entity - One generated board-game content set
//!
//! A game is immutable once committed; the only later change is the
//! soft-delete marker.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{GameId, SoftDelete};

/// Author recorded on rows written by the generation pipeline
pub const SYSTEM_AUTHOR: &str = "system";

/// A persisted game
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: GameId,
    pub theme: String,
    /// Number of cards the caller asked for
    pub card_count: u32,
    pub style: String,
    /// Story background, or the caller's own description when one was given
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub deleted: SoftDelete,
}

/// A game that has not been written yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub theme: String,
    pub card_count: u32,
    pub style: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl NewGame {
    pub fn new(
        theme: impl Into<String>,
        card_count: u32,
        style: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            theme: theme.into(),
            card_count,
            style: style.into(),
            description: description.into(),
            created_at: Utc::now(),
            created_by: SYSTEM_AUTHOR.to_string(),
        }
    }
}
