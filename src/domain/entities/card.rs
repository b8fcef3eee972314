//! Card entity - A single printable card belonging to a game
//!
//! Cards are only ever created inside their game's generation transaction.

use crate::domain::value_objects::{CardDraft, CardId, CardType, GameId, SoftDelete};

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub game_id: GameId,
    pub card_type: CardType,
    pub name: String,
    pub description: String,
    pub effect: String,
    pub deleted: SoftDelete,
}

/// A card waiting to be written in the same transaction as its game
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub game_id: GameId,
    pub card_type: CardType,
    pub name: String,
    pub description: String,
    pub effect: String,
}

impl NewCard {
    pub fn from_draft(game_id: GameId, card_type: CardType, draft: CardDraft) -> Self {
        Self {
            game_id,
            card_type,
            name: draft.name,
            description: draft.description,
            effect: draft.effect,
        }
    }
}
