//! Strictly Scoreboard - reactive score and preference state for tic-tac-toe
//!
//! Front ends keep the running tally (X wins, O wins, ties), the selected
//! game mode and the computer difficulty in a [`GameStore`]. Components read
//! it, write to it from event handlers, and subscribe to re-render on change.
//!
//! # Architecture
//!
//! - **Store**: generic single-value container with synchronous observers
//! - **Types**: the [`GameState`] value and its parts
//! - **Game store**: [`GameStore`] plus scoreboard-specific mutations
//! - **Config**: TOML startup preferences
//!
//! # Example
//!
//! ```
//! use strictly_scoreboard::{GameStore, Outcome, Player};
//!
//! let store = GameStore::default();
//! let _sub = store.subscribe(|state| println!("X has {} wins", state.scores.x));
//!
//! store.record_outcome(Outcome::Won(Player::X));
//! assert_eq!(store.get().scores.x, 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod game_store;
mod store;
mod types;

// Crate-level exports - Reactive container
pub use store::{Store, Subscription};

// Crate-level exports - Game state
pub use game_store::GameStore;
pub use types::{Difficulty, GameMode, GameState, Outcome, Player, Scores};

// Crate-level exports - Configuration
pub use config::{ConfigError, StoreConfig};
