//! Meta counters - namespaced integer key/value rows
//!
//! Keys carry the owning game id by convention (`game_<id>_<counter>`);
//! there is no structural foreign key.

use serde::Serialize;

use crate::domain::value_objects::GameId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub key: String,
    pub value: i64,
}

/// The per-game counters created alongside every game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCounter {
    PlotPoints,
    MainObjectiveCompleted,
}

impl MetaCounter {
    pub const ALL: [MetaCounter; 2] = [MetaCounter::PlotPoints, MetaCounter::MainObjectiveCompleted];

    fn suffix(&self) -> &'static str {
        match self {
            Self::PlotPoints => "plot_points",
            Self::MainObjectiveCompleted => "main_objective_completed",
        }
    }

    pub fn key(&self, game_id: GameId) -> String {
        format!("game_{}_{}", game_id, self.suffix())
    }

    /// Initial row for this counter
    pub fn initial(&self, game_id: GameId) -> Meta {
        Meta {
            key: self.key(game_id),
            value: 0,
        }
    }
}

/// Current counter values for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCounters {
    pub plot_points: i64,
    pub main_objective_completed: i64,
}
