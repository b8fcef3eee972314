//! Card type - what a card represents on the table

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of card in a generated deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// A playable character
    Role,
    /// Something that happens during play (combat, plot twist)
    Event,
    /// An object the players can find or use
    Item,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Event => "event",
            Self::Item => "item",
        }
    }

    /// Label printed on the card face
    pub fn label(&self) -> &'static str {
        match self {
            Self::Role => "Role",
            Self::Event => "Event",
            Self::Item => "Item",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card type: {0}")]
pub struct UnknownCardType(pub String);

impl FromStr for CardType {
    type Err = UnknownCardType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "role" => Ok(Self::Role),
            "event" => Ok(Self::Event),
            "item" => Ok(Self::Item),
            other => Err(UnknownCardType(other.to_string())),
        }
    }
}
