use std::fmt;

use crate::{
    board::{Board, Move, Outcome, Player},
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    WonByX,
    WonByO,
    Draw,
}

impl From<Outcome> for GameState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::WinFor(Player::X) => GameState::WonByX,
            Outcome::WinFor(Player::O) => GameState::WonByO,
            Outcome::Draw => GameState::Draw,
            Outcome::Undecided => GameState::Ongoing,
        }
    }
}

/// One game: owns the board, alternates players starting with X, and stops
/// accepting moves once a terminal state is reached.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Player,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            history: Vec::with_capacity(9),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn outcome(&self) -> Outcome {
        self.board.terminal_test()
    }

    pub fn state(&self) -> GameState {
        self.outcome().into()
    }

    pub fn done(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Places the current player's mark and hands the turn over.
    pub fn step(&mut self, mv: Move) -> Result<GameState> {
        let outcome = self.outcome();
        if outcome.is_terminal() {
            return Err(Error::PrecompletedGame(outcome));
        }

        self.board = self.board.apply(mv, self.current_player)?;
        self.history.push(mv);
        self.current_player = self.current_player.opponent();
        Ok(self.state())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
