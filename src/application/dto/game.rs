use serde::{Deserialize, Serialize};

use crate::application::services::{GameDetail, GenerateGame};
use crate::domain::entities::{Card, Game, GameCounters};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateGameRequestDto {
    pub theme: String,
    pub card_count: i64,
    pub style: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<GenerateGameRequestDto> for GenerateGame {
    fn from(dto: GenerateGameRequestDto) -> Self {
        Self {
            theme: dto.theme,
            card_count: dto.card_count,
            style: dto.style,
            description: dto.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateGameResponseDto {
    pub game_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponseDto {
    pub id: i64,
    pub theme: String,
    pub card_count: u32,
    pub style: String,
    pub description: String,
    pub created_at: String,
    pub created_by: String,
}

impl From<Game> for GameResponseDto {
    fn from(g: Game) -> Self {
        Self {
            id: g.id.value(),
            theme: g.theme,
            card_count: g.card_count,
            style: g.style,
            description: g.description,
            created_at: g.created_at.to_rfc3339(),
            created_by: g.created_by,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponseDto {
    pub id: i64,
    pub game_id: i64,
    #[serde(rename = "type")]
    pub card_type: String,
    pub name: String,
    pub description: String,
    pub effect: String,
}

impl From<Card> for CardResponseDto {
    fn from(c: Card) -> Self {
        Self {
            id: c.id.value(),
            game_id: c.game_id.value(),
            card_type: c.card_type.to_string(),
            name: c.name,
            description: c.description,
            effect: c.effect,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailResponseDto {
    #[serde(flatten)]
    pub game: GameResponseDto,
    pub cards: Vec<CardResponseDto>,
    pub counters: GameCounters,
}

impl From<GameDetail> for GameDetailResponseDto {
    fn from(detail: GameDetail) -> Self {
        Self {
            game: detail.game.into(),
            cards: detail.cards.into_iter().map(CardResponseDto::from).collect(),
            counters: detail.counters,
        }
    }
}
