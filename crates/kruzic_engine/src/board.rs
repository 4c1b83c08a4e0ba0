//! The 3x3 board: marking, terminal detection and winning-line geometry.

use crate::types::{Coord, GameStatus, Player, Square};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{instrument, warn};

/// Which line of three completed the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum LineKind {
    /// Column, left to right (0-2).
    #[display("column {_0}")]
    Column(usize),
    /// Row, top to bottom (0-2).
    #[display("row {_0}")]
    Row(usize),
    /// Top-left to bottom-right.
    #[display("descending diagonal")]
    Descending,
    /// Bottom-left to top-right.
    #[display("ascending diagonal")]
    Ascending,
}

impl LineKind {
    /// Lines in the order they are checked; the first completed one wins.
    pub const CHECK_ORDER: [LineKind; 8] = [
        LineKind::Column(0),
        LineKind::Column(1),
        LineKind::Column(2),
        LineKind::Row(0),
        LineKind::Row(1),
        LineKind::Row(2),
        LineKind::Descending,
        LineKind::Ascending,
    ];

    /// The three cells of this line, from the start endpoint to the end endpoint.
    pub fn cells(self) -> [Coord; 3] {
        match self {
            LineKind::Column(c) => [Coord::new(0, c), Coord::new(1, c), Coord::new(2, c)],
            LineKind::Row(r) => [Coord::new(r, 0), Coord::new(r, 1), Coord::new(r, 2)],
            LineKind::Descending => [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)],
            LineKind::Ascending => [Coord::new(2, 0), Coord::new(1, 1), Coord::new(0, 2)],
        }
    }
}

/// A completed line, reported so a renderer can draw the strike-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    /// Player who owns the line.
    pub winner: Player,
    /// Which line was completed.
    pub kind: LineKind,
    /// First endpoint.
    pub start: Coord,
    /// Second endpoint.
    pub end: Coord,
}

impl fmt::Display for WinningLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wins on {} from {} to {}",
            self.winner, self.kind, self.start, self.end
        )
    }
}

/// 3x3 board.
///
/// `Board` is `Copy`: search explores hypothetical moves on independent
/// copies and never rolls a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order.
    cells: [[Square; 3]; 3],
    /// Number of marks applied; equals the non-empty square count.
    marked: u8,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the square at `coord` for `player`.
    ///
    /// The square must be empty; this is not checked. Marking an occupied
    /// square overwrites it and still bumps the mark count, so callers check
    /// [`Board::is_empty_cell`] first.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is off the board.
    pub fn mark(&mut self, coord: Coord, player: Player) {
        let square = &mut self.cells[coord.row][coord.col];
        if *square != Square::Empty {
            warn!(%coord, ?square, %player, "Overwriting marked square");
        }
        *square = Square::Marked(player);
        self.marked += 1;
    }

    /// Returns the square at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is off the board.
    pub fn get(&self, coord: Coord) -> Square {
        self.cells[coord.row][coord.col]
    }

    /// Checks if a square is empty.
    pub fn is_empty_cell(&self, coord: Coord) -> bool {
        self.get(coord) == Square::Empty
    }

    /// Empty squares in row-major order.
    ///
    /// This order is the search's tie-break order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        Coord::ALL
            .into_iter()
            .filter(|&coord| self.is_empty_cell(coord))
            .collect()
    }

    /// Number of marked squares.
    pub fn marked_count(&self) -> u8 {
        self.marked
    }

    /// Whether all nine squares are marked.
    pub fn is_full(&self) -> bool {
        self.marked == 9
    }

    /// Whether no square is marked.
    pub fn is_empty(&self) -> bool {
        self.marked == 0
    }

    /// Returns the squares as rows.
    pub fn rows(&self) -> &[[Square; 3]; 3] {
        &self.cells
    }

    /// Finds the first completed line.
    ///
    /// Columns are checked left to right, then rows top to bottom, then the
    /// descending and ascending diagonals.
    pub fn winning_line(&self) -> Option<WinningLine> {
        LineKind::CHECK_ORDER.into_iter().find_map(|kind| {
            let [a, b, c] = kind.cells();
            let owner = self.get(a).player()?;
            (self.get(b) == Square::Marked(owner) && self.get(c) == Square::Marked(owner)).then(
                || WinningLine {
                    winner: owner,
                    kind,
                    start: a,
                    end: c,
                },
            )
        })
    }

    /// Returns the winner, if any line is complete.
    ///
    /// `None` says nothing about fullness: a full board without a winner is
    /// a draw.
    pub fn terminal_value(&self) -> Option<Player> {
        self.winning_line().map(|line| line.winner)
    }

    /// Returns the board status. A completed line takes precedence over a
    /// full board.
    #[instrument(skip(self), fields(marked = self.marked))]
    pub fn status(&self) -> GameStatus {
        match self.terminal_value() {
            Some(winner) => GameStatus::Won(winner),
            None if self.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// Formats the board as a human-readable grid, numbering empty squares
    /// 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, square) in row.iter().enumerate() {
                let symbol = match square {
                    Square::Empty => char::from(b'1' + (r * 3 + c) as u8),
                    Square::Marked(player) => player.symbol(),
                };
                result.push(symbol);
                if c < 2 {
                    result.push('|');
                }
            }
            if r < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Compact form: rows of `X`, `O` and `.` separated by `/`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                f.write_str("/")?;
            }
            for square in row {
                let symbol = match square {
                    Square::Empty => '.',
                    Square::Marked(player) => player.symbol(),
                };
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseBoardError {
    /// A character that is neither a mark, an empty marker nor a separator.
    #[display("Unexpected symbol '{}' in board", _0)]
    UnexpectedSymbol(char),
    /// The text did not describe exactly nine squares.
    #[display("Expected 9 squares, found {}", _0)]
    WrongSquareCount(usize),
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine squares in row-major order. `X`/`O` (any case) are marks;
    /// `.`, `-`, `_` and digits are empty; whitespace, `/` and `|` are
    /// ignored.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for ch in s.chars() {
            match ch {
                'x' | 'X' => squares.push(Some(Player::X)),
                'o' | 'O' => squares.push(Some(Player::O)),
                '.' | '-' | '_' => squares.push(None),
                ch if ch.is_ascii_digit() => squares.push(None),
                ch if ch.is_whitespace() || ch == '/' || ch == '|' => {}
                other => return Err(ParseBoardError::UnexpectedSymbol(other)),
            }
        }

        if squares.len() != 9 {
            return Err(ParseBoardError::WrongSquareCount(squares.len()));
        }

        let mut board = Board::new();
        for (coord, square) in Coord::ALL.into_iter().zip(squares) {
            if let Some(player) = square {
                board.mark(coord, player);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_full());
        assert_eq!(board.marked_count(), 0);
        assert_eq!(board.empty_cells(), Coord::ALL.to_vec());
    }

    #[test]
    fn test_mark_increments_count() {
        let mut board = Board::new();
        board.mark(Coord::new(1, 1), Player::X);
        assert_eq!(board.marked_count(), 1);
        assert!(!board.is_empty_cell(Coord::new(1, 1)));
        assert_eq!(board.get(Coord::new(1, 1)), Square::Marked(Player::X));
        assert!(!board.is_empty());
    }

    #[test]
    fn test_overwrite_still_counts() {
        let mut board = Board::new();
        board.mark(Coord::new(0, 0), Player::X);
        board.mark(Coord::new(0, 0), Player::O);
        assert_eq!(board.get(Coord::new(0, 0)), Square::Marked(Player::O));
        assert_eq!(board.marked_count(), 2);
    }

    #[test]
    #[should_panic]
    fn test_mark_out_of_range_panics() {
        let mut board = Board::new();
        board.mark(Coord::new(0, 3), Player::X);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = board("X.O/.X./O..");
        assert_eq!(
            board.empty_cells(),
            vec![
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_column_line_endpoints() {
        let line = board("OX./OX./.X.").winning_line().unwrap();
        assert_eq!(line.winner, Player::X);
        assert_eq!(line.kind, LineKind::Column(1));
        assert_eq!(line.start, Coord::new(0, 1));
        assert_eq!(line.end, Coord::new(2, 1));
    }

    #[test]
    fn test_row_line_endpoints() {
        let line = board(".X./OOO/X.X").winning_line().unwrap();
        assert_eq!(line.winner, Player::O);
        assert_eq!(line.kind, LineKind::Row(1));
        assert_eq!(line.start, Coord::new(1, 0));
        assert_eq!(line.end, Coord::new(1, 2));
    }

    #[test]
    fn test_diagonal_line_endpoints() {
        let desc = board("X.O/.XO/..X").winning_line().unwrap();
        assert_eq!(desc.kind, LineKind::Descending);
        assert_eq!((desc.start, desc.end), (Coord::new(0, 0), Coord::new(2, 2)));

        let asc = board("X.O/XO./O..").winning_line().unwrap();
        assert_eq!(asc.winner, Player::O);
        assert_eq!(asc.kind, LineKind::Ascending);
        assert_eq!((asc.start, asc.end), (Coord::new(2, 0), Coord::new(0, 2)));
    }

    #[test]
    fn test_columns_checked_before_rows() {
        // Column 0 and row 0 are both X; the column is reported.
        let line = board("XXX/XO./XOO").winning_line().unwrap();
        assert_eq!(line.kind, LineKind::Column(0));
    }

    #[test]
    fn test_draw_has_no_terminal_value() {
        let board = board("XOX/XOO/OXX");
        assert!(board.is_full());
        assert_eq!(board.terminal_value(), None);
        assert_eq!(board.status(), GameStatus::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_won() {
        let board = board("XXX/OOX/XOO");
        assert!(board.is_full());
        assert_eq!(board.status(), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_parse_counts_marks() {
        let board = board("x o . / 4 5 X / - _ O");
        assert_eq!(board.marked_count(), 4);
        assert_eq!(board.get(Coord::new(1, 2)), Square::Marked(Player::X));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XO?......".parse::<Board>(),
            Err(ParseBoardError::UnexpectedSymbol('?'))
        );
        assert_eq!(
            "XO.".parse::<Board>(),
            Err(ParseBoardError::WrongSquareCount(3))
        );
    }

    #[test]
    fn test_compact_display() {
        let board = board("XO./.X./..O");
        assert_eq!(board.to_string(), "XO./.X./..O");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_grid_display_numbers_empty_squares() {
        let mut board = Board::new();
        board.mark(Coord::new(0, 0), Player::X);
        board.mark(Coord::new(1, 1), Player::O);
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
