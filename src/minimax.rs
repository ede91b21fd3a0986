use log::debug;

use crate::{
    board::{Board, Move, Outcome, Player},
    error::{Error, Result},
};

/// Score of a win found at depth zero. Each ply of depth costs one point.
const WIN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// `None` only at terminal leaves inside the search.
    pub mv: Option<Move>,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        Self { score, mv: None }
    }
}

/// Exhaustive minimax for `player` to move on `board`.
///
/// Scores are from `player`'s side: `10 - depth` for a win, `0` for a draw,
/// `depth - 10` for a loss, counting depth at the terminal position. Among
/// equally scored moves the first one in row-major order is kept.
pub fn minimax(board: &Board, player: Player, depth: i32) -> Result<SearchResult> {
    let outcome = board.terminal_test();
    if outcome.is_terminal() {
        return Err(Error::PrecompletedGame(outcome));
    }

    let mut visited = 0usize;
    let result = search(board, player, depth, &mut visited)?;
    debug!(
        "minimax for {} from depth {}: score {}, move {:?}, {} positions",
        player, depth, result.score, result.mv, visited
    );
    Ok(result)
}

/// Plays `player`'s best move and returns the resulting board.
pub fn play(board: &Board, player: Player) -> Result<Board> {
    let result = minimax(board, player, 0)?;
    let mv = result
        .mv
        .ok_or_else(|| Error::PrecompletedGame(board.terminal_test()))?;
    board.apply(mv, player)
}

fn search(board: &Board, player: Player, depth: i32, visited: &mut usize) -> Result<SearchResult> {
    *visited += 1;

    match board.terminal_test() {
        Outcome::WinFor(winner) if winner == player => return Ok(SearchResult::leaf(WIN - depth)),
        Outcome::WinFor(_) => return Ok(SearchResult::leaf(-WIN + depth)),
        Outcome::Draw => return Ok(SearchResult::leaf(0)),
        Outcome::Undecided => {}
    }

    let mut best = SearchResult {
        score: i32::MIN,
        mv: None,
    };
    for mv in board.generate_moves() {
        let next = board.apply(mv, player)?;
        // The child is scored for the opponent; what is good for them is bad for us.
        let score = -search(&next, player.opponent(), depth + 1, visited)?.score;
        if score > best.score {
            best = SearchResult {
                score,
                mv: Some(mv),
            };
        }
    }
    Ok(best)
}
