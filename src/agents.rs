//! Move suppliers for the game loop.

use std::io::{BufRead, Write};

use log::debug;
use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};

use crate::{
    board::{Cell, Move},
    error::{Error, Result},
    game::Game,
    minimax::minimax,
};

pub trait Agent {
    fn name(&self) -> &str;

    /// Picks a legal move for `game.current_player()`.
    fn select_move(&mut self, game: &Game) -> Result<Move>;
}

fn ensure_ongoing(game: &Game) -> Result<()> {
    let outcome = game.outcome();
    if outcome.is_terminal() {
        return Err(Error::PrecompletedGame(outcome));
    }
    Ok(())
}

/// Reads a row and a column from `input`, asking again until they name an empty cell.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_coordinate(&mut self, axis: &str) -> Result<usize> {
        loop {
            write!(self.output, "Enter the {} for your move (0, 1, or 2): ", axis)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::EndOfInput);
            }
            match line.trim().parse::<usize>() {
                Ok(value) if value < 3 => return Ok(value),
                _ => writeln!(self.output, "'{}' is not 0, 1, or 2.", line.trim())?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn select_move(&mut self, game: &Game) -> Result<Move> {
        ensure_ongoing(game)?;
        loop {
            let row = self.read_coordinate("row")?;
            let col = self.read_coordinate("column")?;
            if game.board().get(row, col) == Cell::Empty {
                return Ok(Move::new(row, col));
            }
            writeln!(self.output, "({}, {}) is already taken.", row, col)?;
        }
    }
}

#[derive(Debug, Default)]
pub struct MinimaxAgent;

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select_move(&mut self, game: &Game) -> Result<Move> {
        let result = minimax(game.board(), game.current_player(), 0)?;
        result
            .mv
            .ok_or_else(|| Error::PrecompletedGame(game.outcome()))
    }
}

/// Plays a uniformly random empty cell.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_move(&mut self, game: &Game) -> Result<Move> {
        ensure_ongoing(game)?;
        let mv = game
            .board()
            .generate_moves()
            .into_iter()
            .choose(&mut self.rng)
            .ok_or_else(|| Error::PrecompletedGame(game.outcome()))?;
        debug!("random agent picked {}", mv);
        Ok(mv)
    }
}
