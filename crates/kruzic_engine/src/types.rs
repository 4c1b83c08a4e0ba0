//! Core domain types for križić-kružić.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side in the game.
///
/// X is the maximizing side of the search and moves first; O is the
/// minimizing side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (crosses, goes first).
    X,
    /// Player O (circles, goes second).
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

    /// Terminal score of a win by this player: +1 for X, -1 for O.
    pub fn score(self) -> i8 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Board symbol for this player's mark.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square marked by a player.
    Marked(Player),
}

impl Square {
    /// Returns the player who marked this square, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Marked(player) => Some(player),
        }
    }
}

/// Current status of a board or game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No line completed and empty squares remain.
    InProgress,
    /// A player completed a line.
    Won(Player),
    /// Board is full with no completed line.
    Draw,
}

/// A grid location, row and column both in `0..3`.
///
/// Nothing here enforces the range; [`Coord::is_in_bounds`] lets callers
/// validate input before touching a board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row, top to bottom.
    pub row: usize,
    /// Column, left to right.
    pub col: usize,
}

impl Coord {
    /// All nine coordinates in row-major order.
    pub const ALL: [Coord; 9] = [
        Coord::new(0, 0),
        Coord::new(0, 1),
        Coord::new(0, 2),
        Coord::new(1, 0),
        Coord::new(1, 1),
        Coord::new(1, 2),
        Coord::new(2, 0),
        Coord::new(2, 1),
        Coord::new(2, 2),
    ];

    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether both row and column lie on the 3x3 grid.
    pub fn is_in_bounds(self) -> bool {
        self.row < 3 && self.col < 3
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }

    /// Creates a coordinate from a row-major index (0-8).
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates a coordinate from the 1-9 numbering shown on an empty board.
    #[instrument]
    pub fn from_keypad(key: usize) -> Option<Self> {
        key.checked_sub(1).and_then(Self::from_index)
    }
}

/// Error parsing a coordinate from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, derive_more::Error)]
#[display("Invalid coordinate '{}': expected 1-9 or 'row col' with values 0-2", input)]
pub struct ParseCoordError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Accepts a single keypad number (`5`) or a row and column pair
    /// separated by whitespace or a comma (`1 1`, `1,1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect();

        let coord = match parts.as_slice() {
            [key] => key.parse::<usize>().ok().and_then(Coord::from_keypad),
            [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => Some(Coord::new(row, col)),
                _ => None,
            },
            _ => None,
        };

        coord.filter(|c| c.is_in_bounds()).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
    }

    #[test]
    fn test_player_from_str_case_insensitive() {
        assert_eq!("x".parse::<Player>().unwrap(), Player::X);
        assert_eq!("O".parse::<Player>().unwrap(), Player::O);
        assert!("z".parse::<Player>().is_err());
    }

    #[test]
    fn test_coord_index_round_trip() {
        assert_eq!(Coord::new(1, 2).index(), 5);
        assert_eq!(Coord::from_index(5), Some(Coord::new(1, 2)));
        assert_eq!(Coord::from_index(9), None);
    }

    #[test]
    fn test_coord_keypad() {
        assert_eq!(Coord::from_keypad(1), Some(Coord::new(0, 0)));
        assert_eq!(Coord::from_keypad(9), Some(Coord::new(2, 2)));
        assert_eq!(Coord::from_keypad(0), None);
        assert_eq!(Coord::from_keypad(10), None);
    }

    #[test]
    fn test_coord_parse() {
        assert_eq!("5".parse::<Coord>(), Ok(Coord::new(1, 1)));
        assert_eq!("2 0".parse::<Coord>(), Ok(Coord::new(2, 0)));
        assert_eq!(" 0, 2 ".parse::<Coord>(), Ok(Coord::new(0, 2)));
        assert!("3 0".parse::<Coord>().is_err());
        assert!("0".parse::<Coord>().is_err());
        assert!("a b".parse::<Coord>().is_err());
        assert!("1 1 1".parse::<Coord>().is_err());
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(Coord::new(0, 2).to_string(), "(0, 2)");
    }
}
