use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Filled(Player),
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(Player::X) => 'X',
            Cell::Filled(Player::O) => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Filled(Player::X)),
            'O' | 'o' => Some(Cell::Filled(Player::O)),
            _ => None,
        }
    }
}

/// A (row, column) coordinate, both in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    WinFor(Player),
    Draw,
    Undecided,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Undecided
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::WinFor(player) => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::WinFor(player) => write!(f, "{} won", player),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Undecided => write!(f, "undecided"),
        }
    }
}

/// Every winning line in scan order: rows, then columns, then the two diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// The 3x3 grid, row-major. `Copy`, so every search branch works on its own board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; 3]; 3],
        }
    }

    pub fn from_rows(cells: [[Cell; 3]; 3]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Panics if `row` or `col` is outside `0..3`.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn marks(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.marks() == 9
    }

    /// The side with one fewer mark, X on equal counts. `None` when the counts
    /// can't come from alternating play that started with X.
    pub fn to_move(&self) -> Option<Player> {
        let count = |player| {
            self.cells
                .iter()
                .flatten()
                .filter(|cell| **cell == Cell::Filled(player))
                .count()
        };
        let (x, o) = (count(Player::X), count(Player::O));
        if x == o {
            Some(Player::X)
        } else if x == o + 1 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Returns a copy of the board with `player`'s mark at `mv`.
    pub fn apply(&self, mv: Move, player: Player) -> Result<Board> {
        if mv.row >= 3 || mv.col >= 3 || self.cells[mv.row][mv.col] != Cell::Empty {
            return Err(Error::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }
        let mut next = *self;
        next.cells[mv.row][mv.col] = Cell::Filled(player);
        Ok(next)
    }

    /// Empty cells, row 0 left to right, then row 1, then row 2.
    pub fn generate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(9);
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if *cell == Cell::Empty {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    /// The first completed line in [`LINES`] order decides the winner, so boards
    /// with several lines (unreachable in play) still get a single answer.
    pub fn terminal_test(&self) -> Outcome {
        for [a, b, c] in LINES {
            if let Cell::Filled(player) = self.cells[a.0][a.1] {
                if self.cells[b.0][b.1] == Cell::Filled(player)
                    && self.cells[c.0][c.1] == Cell::Filled(player)
                {
                    return Outcome::WinFor(player);
                }
            }
        }

        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Undecided
        }
    }
}

pub fn generate_moves(board: &Board) -> Vec<Move> {
    board.generate_moves()
}

pub fn terminal_test(board: &Board) -> Outcome {
    board.terminal_test()
}

impl FromStr for Board {
    type Err = Error;

    /// Reads nine cells row-major; whitespace, `|` and `/` are separators.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidBoard {
            input: s.to_string(),
            reason,
        };

        let mut cells = Vec::with_capacity(9);
        for c in s.chars() {
            if c.is_whitespace() || c == '|' || c == '/' {
                continue;
            }
            let cell =
                Cell::from_char(c).ok_or_else(|| invalid(format!("unknown cell '{}'", c)))?;
            cells.push(cell);
        }
        if cells.len() != 9 {
            return Err(invalid(format!("expected 9 cells, got {}", cells.len())));
        }

        let mut board = Board::new();
        for (i, cell) in cells.into_iter().enumerate() {
            board.cells[i / 3][i % 3] = cell;
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{} ", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const X: Cell = Cell::Filled(Player::X);
    const O: Cell = Cell::Filled(Player::O);
    const E: Cell = Cell::Empty;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new() {
        let board = Board::new();
        assert_eq!(board.rows(), &[[Cell::Empty; 3]; 3]);
        assert_eq!(board.marks(), 0);
        assert_eq!(board.to_move(), Some(Player::X));
        assert_eq!(board.terminal_test(), Outcome::Undecided);
    }

    #[test]
    fn test_apply() {
        let start = Board::new();
        let next = start.apply(Move::new(0, 0), Player::X).unwrap();
        assert_eq!(next.get(0, 0), X);
        assert_eq!(start.get(0, 0), E);
        assert_eq!(next.to_move(), Some(Player::O));

        assert!(matches!(
            next.apply(Move::new(0, 0), Player::O),
            Err(Error::InvalidMove { row: 0, col: 0 })
        ));
        assert!(matches!(
            next.apply(Move::new(3, 1), Player::O),
            Err(Error::InvalidMove { row: 3, col: 1 })
        ));
        assert!(matches!(
            next.apply(Move::new(1, 7), Player::O),
            Err(Error::InvalidMove { row: 1, col: 7 })
        ));
    }

    #[test]
    fn test_generate_moves() {
        assert_eq!(Board::new().generate_moves().len(), 9);
        assert_eq!(Board::new().generate_moves()[0], Move::new(0, 0));

        let moves = board("X.O / .X. / O..").generate_moves();
        assert_eq!(
            moves,
            vec![
                Move::new(0, 1),
                Move::new(1, 0),
                Move::new(1, 2),
                Move::new(2, 1),
                Move::new(2, 2),
            ]
        );

        let full = board("XOX / XOO / OXX");
        assert!(full.generate_moves().is_empty());
        assert!(full.is_full());
        assert!(!board("XOX / XOO / OX.").is_full());
    }

    #[test]
    fn test_terminal_test() {
        assert_eq!(board("XXX / OO. / ...").terminal_test(), Outcome::WinFor(Player::X));
        assert_eq!(board("X.. / XOO / X..").terminal_test(), Outcome::WinFor(Player::X));
        assert_eq!(board("O.X / XO. / X.O").terminal_test(), Outcome::WinFor(Player::O));
        assert_eq!(board("XXO / XO. / O..").terminal_test(), Outcome::WinFor(Player::O));
        assert_eq!(board("XOX / XOO / OXX").terminal_test(), Outcome::Draw);
        assert_eq!(board("XO. / ... / ...").terminal_test(), Outcome::Undecided);
    }

    #[test]
    fn test_terminal_test_on_full_winning_board() {
        // The win must be found before the board is declared full.
        assert_eq!(board("XXX / OOX / XOO").terminal_test(), Outcome::WinFor(Player::X));
    }

    #[test]
    fn test_terminal_test_scan_order() {
        // Row 1 is scanned before column 0.
        assert_eq!(board("X.. / OOO / XXX").terminal_test(), Outcome::WinFor(Player::O));
        assert_eq!(board("OOO / XXX / ...").terminal_test(), Outcome::WinFor(Player::O));
        // Column 2 before the diagonals.
        assert_eq!(board("O.X / .OX / ..X").terminal_test(), Outcome::WinFor(Player::X));
    }

    #[test]
    fn test_to_move() {
        assert_eq!(board("X.. / ... / ...").to_move(), Some(Player::O));
        assert_eq!(board("XO. / ... / ...").to_move(), Some(Player::X));
        assert_eq!(board("XX. / ... / ...").to_move(), None);
        assert_eq!(board("O.. / ... / ...").to_move(), None);
    }

    #[test]
    fn test_parse() {
        let parsed = board("x|o|. \n . x . \n o . .");
        assert_eq!(
            parsed,
            Board::from_rows([[X, O, E], [E, X, E], [O, E, E]])
        );
        assert!(matches!(
            "XO.".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(matches!(
            "XO? ... ...".parse::<Board>(),
            Err(Error::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_display() {
        let shown = board("X.O / .X. / O..").to_string();
        assert_eq!(shown, "X . O \n. X . \nO . . \n");
        assert_eq!(board(&shown), board("X.O / .X. / O.."));
    }

    fn any_cell() -> impl Strategy<Value = Cell> {
        prop_oneof![Just(E), Just(X), Just(O)]
    }

    fn any_mark() -> impl Strategy<Value = Cell> {
        prop_oneof![Just(X), Just(O)]
    }

    fn any_board() -> impl Strategy<Value = Board> {
        prop::array::uniform3(prop::array::uniform3(any_cell())).prop_map(Board::from_rows)
    }

    fn full_board() -> impl Strategy<Value = Board> {
        prop::array::uniform3(prop::array::uniform3(any_mark())).prop_map(Board::from_rows)
    }

    fn completed(board: &Board, line: &[(usize, usize); 3]) -> bool {
        let [first, second, third] = line.map(|(row, col)| board.get(row, col));
        first != E && first == second && second == third
    }

    fn has_line(board: &Board) -> bool {
        LINES.iter().any(|line| completed(board, line))
    }

    proptest! {
        #[test]
        fn moves_are_exactly_the_empty_cells(board in any_board()) {
            let moves = generate_moves(&board);
            prop_assert_eq!(moves.len(), 9 - board.marks());
            for mv in &moves {
                prop_assert_eq!(board.get(mv.row, mv.col), E);
            }
            let mut sorted = moves.clone();
            sorted.sort_by_key(|mv| (mv.row, mv.col));
            prop_assert_eq!(moves, sorted);
        }

        #[test]
        fn full_board_without_line_is_draw(board in full_board()) {
            let outcome = terminal_test(&board);
            if has_line(&board) {
                prop_assert!(outcome.winner().is_some());
            } else {
                prop_assert_eq!(outcome, Outcome::Draw);
            }
        }

        #[test]
        fn completed_line_wins(board in any_board(), line in 0..8usize, mark in any_mark()) {
            let mut rows = *board.rows();
            for (r, c) in LINES[line] {
                rows[r][c] = mark;
            }
            let board = Board::from_rows(rows);
            let outcome = terminal_test(&board);
            prop_assert!(outcome.winner().is_some());

            // With no complete line ahead of it in scan order, the filled line decides.
            let earlier = LINES[..line].iter().any(|earlier| completed(&board, earlier));
            if let (false, Cell::Filled(player)) = (earlier, mark) {
                prop_assert_eq!(outcome, Outcome::WinFor(player));
            }
        }

        #[test]
        fn rules_do_not_mutate(board in any_board()) {
            let before = board;
            let first = terminal_test(&board);
            let _ = generate_moves(&board);
            prop_assert_eq!(terminal_test(&board), first);
            prop_assert_eq!(board, before);
        }
    }
}
