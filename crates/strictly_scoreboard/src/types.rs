//! Value types held by the game store.
//!
//! Every operation here is pure: it takes a value and returns a new one, so
//! the helpers compose directly with [`Store::update`](crate::Store::update).

use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

/// Whether the second seat is a human or the computer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    /// Player versus player on the same device.
    Pvp,
    /// Player versus computer.
    #[default]
    Pvc,
}

impl GameMode {
    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pvp => "Player vs Player",
            Self::Pvc => "Player vs Computer",
        }
    }

    /// Toggles between `Pvp` and `Pvc`.
    pub fn toggle(self) -> Self {
        match self {
            Self::Pvp => Self::Pvc,
            Self::Pvc => Self::Pvp,
        }
    }

    /// True when the second seat is computer-controlled.
    pub fn is_vs_computer(self) -> bool {
        matches!(self, Self::Pvc)
    }
}

/// Strength of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Plays loosely.
    Easy,
    /// The starting level.
    #[default]
    Medium,
    /// Plays without mistakes.
    Hard,
}

impl Difficulty {
    /// Returns the display label for this level.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// All levels, easiest first. Handy for rendering a selector.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Running tally of finished games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, new)]
pub struct Scores {
    /// Games won by X.
    #[serde(rename = "X")]
    pub x: u32,
    /// Games won by O.
    #[serde(rename = "O")]
    pub o: u32,
    /// Drawn games.
    pub ties: u32,
}

impl Scores {
    /// Wins recorded for `player`.
    pub fn for_player(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Total number of finished games.
    pub fn total_games(&self) -> u64 {
        u64::from(self.x) + u64::from(self.o) + u64::from(self.ties)
    }

    /// Returns these scores with one more game counted for `outcome`.
    #[instrument]
    pub fn record(self, outcome: Outcome) -> Self {
        let mut next = self;
        match outcome {
            Outcome::Won(Player::X) => next.x = next.x.saturating_add(1),
            Outcome::Won(Player::O) => next.o = next.o.saturating_add(1),
            Outcome::Draw => next.ties = next.ties.saturating_add(1),
        }
        next
    }
}

/// Complete scoreboard and preference state.
///
/// Serializes as `{"scores":{"X":0,"O":0,"ties":0},"gameMode":"pvc","difficulty":"medium"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Win and tie counters.
    pub scores: Scores,
    /// Selected game mode.
    pub game_mode: GameMode,
    /// Selected computer difficulty.
    pub difficulty: Difficulty,
}

impl GameState {
    /// Creates the initial state: zero scores, player vs computer, medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this state with `outcome` added to the scores.
    #[instrument]
    pub fn record(self, outcome: Outcome) -> Self {
        Self {
            scores: self.scores.record(outcome),
            ..self
        }
    }

    /// Returns this state with all counters zeroed. Preferences are kept.
    #[instrument]
    pub fn reset_scores(self) -> Self {
        Self {
            scores: Scores::default(),
            ..self
        }
    }

    /// Returns this state with a different game mode.
    pub fn with_game_mode(self, game_mode: GameMode) -> Self {
        Self { game_mode, ..self }
    }

    /// Returns this state with a different difficulty.
    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self { difficulty, ..self }
    }
}
