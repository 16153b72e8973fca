//! Grid coordinates and clue directions.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// The direction a clue's answer is written in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right along a row.
    Across,
    /// Top to bottom along a column.
    Down,
}

impl Direction {
    /// Both directions, across first.
    pub const ALL: [Self; 2] = [Self::Across, Self::Down];

    /// Returns the perpendicular direction.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }

    /// Returns the suffix used in clue keys (`'A'` or `'D'`).
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            Self::Across => 'A',
            Self::Down => 'D',
        }
    }

    /// Parses a clue-key suffix, ignoring case.
    #[must_use]
    pub const fn from_suffix(c: char) -> Option<Self> {
        match c {
            'A' | 'a' => Some(Self::Across),
            'D' | 'd' => Some(Self::Down),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Across => f.write_str("across"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// A zero-indexed `(row, col)` cell coordinate.
///
/// Positions order row-major, which is also the order cells are read and numbered in.
/// The textual form is `row-col` (for example `3-0`), which is also how positions are
/// keyed in serialized progress.
///
/// # Examples
///
/// ```
/// use crossword_core::{Direction, Position};
///
/// let pos = Position::new(1, 2);
/// assert_eq!(pos.step(Direction::Across), Some(Position::new(1, 3)));
/// assert_eq!(pos.step(Direction::Down), Some(Position::new(2, 2)));
/// assert_eq!(pos.to_string(), "1-2");
/// assert_eq!("1-2".parse::<Position>().unwrap(), pos);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns the row (0 is the top row).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0 is the leftmost column).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the next position in `direction`, or `None` on coordinate overflow.
    ///
    /// Grid bounds are not checked here.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Across => match self.col.checked_add(1) {
                Some(col) => Some(Self::new(self.row, col)),
                None => None,
            },
            Direction::Down => match self.row.checked_add(1) {
                Some(row) => Some(Self::new(row, self.col)),
                None => None,
            },
        }
    }

    /// Returns the previous position in `direction`, or `None` at row or column zero.
    #[must_use]
    pub const fn step_back(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Across => match self.col.checked_sub(1) {
                Some(col) => Some(Self::new(self.row, col)),
                None => None,
            },
            Direction::Down => match self.row.checked_sub(1) {
                Some(row) => Some(Self::new(row, self.col)),
                None => None,
            },
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Error returned when parsing a `row-col` position fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid position {text:?}, expected `row-col`")]
pub struct ParsePositionError {
    text: String,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError { text: s.to_owned() };
        let (row, col) = s.split_once('-').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Self::new(row, col))
    }
}

impl TryFrom<String> for Position {
    type Error = ParsePositionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.to_string()
    }
}
