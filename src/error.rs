use thiserror::Error;

use crate::board::Outcome;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: ({row}, {col}) is off the board or already taken")]
    InvalidMove { row: usize, col: usize },

    #[error("game already over: {0}")]
    PrecompletedGame(Outcome),

    #[error("invalid board '{input}': {reason}")]
    InvalidBoard { input: String, reason: String },

    #[error("input closed before a move was entered")]
    EndOfInput,

    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
