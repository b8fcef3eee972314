//! Validated generator output
//!
//! These are produced only by the response parser, which guarantees every
//! field is non-empty.

/// The narrative text seeding all card generation for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryBackground(String);

impl StoryBackground {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One card as returned by the generator, before it belongs to a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub name: String,
    pub description: String,
    pub effect: String,
}
