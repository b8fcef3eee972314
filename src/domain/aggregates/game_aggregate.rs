//! Game Aggregate - Game, Cards and Meta rows produced by one generation
//!
//! The builder functions here are pure: they turn a validated request and
//! parsed generator output into the records the persister writes. Storage
//! assigns the game id, so cards and meta rows are built only after the
//! game insert has returned it.

use std::ops::RangeInclusive;

use crate::domain::entities::{Meta, MetaCounter, NewCard, NewGame};
use crate::domain::value_objects::{CardDraft, CardType, GameId, StoryBackground};

/// Number of role cards requested from the generator for every game
pub const ROLE_CARD_COUNT: usize = 4;

/// Allowed total card count for one game
pub const CARD_COUNT_RANGE: RangeInclusive<u32> = 10..=100;

/// A caller's request after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBlueprint {
    theme: String,
    card_count: u32,
    style: String,
    description_override: Option<String>,
}

impl GameBlueprint {
    /// Validate raw request fields.
    ///
    /// An empty or whitespace-only description counts as "not supplied".
    pub fn new(
        theme: &str,
        card_count: i64,
        style: &str,
        description: Option<&str>,
    ) -> Result<Self, AggregateError> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(AggregateError::EmptyTheme);
        }
        let style = style.trim();
        if style.is_empty() {
            return Err(AggregateError::EmptyStyle);
        }
        let card_count = u32::try_from(card_count)
            .ok()
            .filter(|count| CARD_COUNT_RANGE.contains(count))
            .ok_or(AggregateError::CardCountOutOfRange(card_count))?;

        let description_override = description
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string);

        Ok(Self {
            theme: theme.to_string(),
            card_count,
            style: style.to_string(),
            description_override,
        })
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn card_count(&self) -> u32 {
        self.card_count
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// The game record to insert. A caller-supplied description replaces the
    /// generated story verbatim.
    pub fn build_game(&self, story: &StoryBackground) -> NewGame {
        let description = self
            .description_override
            .clone()
            .unwrap_or_else(|| story.as_str().to_string());
        NewGame::new(&self.theme, self.card_count, &self.style, description)
    }

    /// How many event/item cards to ask for once the role batch is known.
    ///
    /// Rejects rather than clamps when the role batch already exceeds the
    /// requested total.
    pub fn remaining_card_count(&self, role_cards: usize) -> Result<usize, AggregateError> {
        let requested = self.card_count as usize;
        requested
            .checked_sub(role_cards)
            .ok_or(AggregateError::RoleCardsExceedRequest {
                requested: self.card_count,
                role_cards,
            })
    }
}

/// Card records for a game, role batch first, in generator order
pub fn build_cards(game_id: GameId, roles: Vec<CardDraft>, events: Vec<CardDraft>) -> Vec<NewCard> {
    let roles = roles
        .into_iter()
        .map(|draft| NewCard::from_draft(game_id, CardType::Role, draft));
    let events = events.into_iter().map(|draft| {
        let card_type = classify_event_card(&draft);
        NewCard::from_draft(game_id, card_type, draft)
    });
    roles.chain(events).collect()
}

/// The two counters every game starts with
pub fn build_meta(game_id: GameId) -> Vec<Meta> {
    MetaCounter::ALL
        .iter()
        .map(|counter| counter.initial(game_id))
        .collect()
}

/// Event prompts ask for descriptions prefixed with `Combat event:`,
/// `Plot event:` or `Item event:`; item-prefixed cards become items.
fn classify_event_card(draft: &CardDraft) -> CardType {
    let lead = draft.description.trim_start();
    let is_item = lead
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("item"));
    if is_item {
        CardType::Item
    } else {
        CardType::Event
    }
}

/// Errors raised while validating a request or assembling its records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("theme must not be empty")]
    EmptyTheme,
    #[error("style must not be empty")]
    EmptyStyle,
    #[error("card count {0} is outside the allowed range 10..=100")]
    CardCountOutOfRange(i64),
    #[error("generator returned {role_cards} role cards but only {requested} cards were requested")]
    RoleCardsExceedRequest { requested: u32, role_cards: usize },
}
