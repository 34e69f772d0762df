//! The scoreboard store UI code talks to.

use tracing::{info, instrument};

use crate::{Difficulty, GameMode, GameState, Outcome, Store, StoreConfig};

/// Reactive store for the scoreboard and preferences.
///
/// `GameStore::default()` starts from [`GameState::new`]. Create one per
/// session and hand clones of it to the components that need it.
pub type GameStore = Store<GameState>;

impl Store<GameState> {
    /// Creates a store whose preferences come from `config`.
    #[instrument]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.initial_state())
    }

    /// Counts a finished game.
    #[instrument(skip(self))]
    pub fn record_outcome(&self, outcome: Outcome) {
        self.update(|state| state.record(outcome));
        info!(scores = ?self.with(|state| state.scores), "Outcome recorded");
    }

    /// Zeroes all counters, keeping mode and difficulty.
    #[instrument(skip(self))]
    pub fn reset_scores(&self) {
        self.update(GameState::reset_scores);
    }

    /// Selects a game mode.
    #[instrument(skip(self))]
    pub fn set_game_mode(&self, game_mode: GameMode) {
        self.update(|state| state.with_game_mode(game_mode));
    }

    /// Switches between player-vs-player and player-vs-computer.
    #[instrument(skip(self))]
    pub fn toggle_game_mode(&self) {
        self.update(|state| state.with_game_mode(state.game_mode.toggle()));
        info!(game_mode = %self.with(|state| state.game_mode), "Toggled game mode");
    }

    /// Selects a difficulty.
    #[instrument(skip(self))]
    pub fn set_difficulty(&self, difficulty: Difficulty) {
        self.update(|state| state.with_difficulty(difficulty));
    }
}
