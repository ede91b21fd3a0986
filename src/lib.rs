//! Tic-tac-toe played perfectly by exhaustive minimax search.
//!
//! The core is [`generate_moves`], [`terminal_test`], [`minimax`] and [`play`].
//! [`Game`] and the [`agents`] are the loop-side pieces a front end drives.

pub mod agents;
pub mod board;
pub mod error;
pub mod game;
pub mod minimax;

pub use board::{generate_moves, terminal_test, Board, Cell, Move, Outcome, Player};
pub use error::{Error, Result};
pub use game::{Game, GameState};
pub use minimax::{minimax, play, SearchResult};
