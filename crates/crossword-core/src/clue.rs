//! Clue keys and clue spans.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Direction, Position};

/// Identifies a clue by its number and direction, written `2A` or `14D`.
///
/// Keys order by number first, then across before down, which is the order clue
/// lists are printed in.
///
/// # Examples
///
/// ```
/// use crossword_core::{ClueKey, Direction};
///
/// let key: ClueKey = "2a".parse().unwrap();
/// assert_eq!(key, ClueKey::new(2, Direction::Across));
/// assert_eq!(key.to_string(), "2A");
///
/// assert!("A2".parse::<ClueKey>().is_err());
/// assert!("0D".parse::<ClueKey>().is_err());
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
pub struct ClueKey {
    number: u16,
    direction: Direction,
}

impl ClueKey {
    /// Creates a clue key.
    #[must_use]
    pub const fn new(number: u16, direction: Direction) -> Self {
        Self { number, direction }
    }

    /// Returns the clue number printed in the grid.
    #[must_use]
    pub const fn number(self) -> u16 {
        self.number
    }

    /// Returns the clue direction.
    #[must_use]
    pub const fn direction(self) -> Direction {
        self.direction
    }
}

impl Display for ClueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.direction.suffix())
    }
}

/// Error returned when parsing a clue key fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid clue key {text:?}, expected a number followed by `A` or `D`")]
pub struct ParseClueKeyError {
    text: String,
}

impl FromStr for ClueKey {
    type Err = ParseClueKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClueKeyError { text: s.to_owned() };
        let s = s.trim();
        let suffix = s.chars().next_back().ok_or_else(err)?;
        let direction = Direction::from_suffix(suffix).ok_or_else(err)?;
        let digits = &s[..s.len() - suffix.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let number = digits.parse().map_err(|_| err())?;
        if number == 0 {
            return Err(err());
        }
        Ok(Self::new(number, direction))
    }
}

impl TryFrom<String> for ClueKey {
    type Error = ParseClueKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClueKey> for String {
    fn from(key: ClueKey) -> Self {
        key.to_string()
    }
}

/// A clue: its display text, the positions its answer spans, and the answer itself.
///
/// Positions are stored in entry order. A `Clue` on its own is not validated; the
/// invariants tying it to a grid (span length equals answer length, each answer letter
/// equals the cell's solution) are checked when it is added to a
/// [`Puzzle`](crate::Puzzle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    key: ClueKey,
    text: String,
    positions: Vec<Position>,
    answer: String,
}

impl Clue {
    /// Creates a clue.
    #[must_use]
    pub fn new(
        key: ClueKey,
        text: impl Into<String>,
        positions: Vec<Position>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            key,
            text: text.into(),
            positions,
            answer: answer.into(),
        }
    }

    /// Creates a clue whose span starts at `start` and runs in the key's direction for
    /// as many cells as the answer has characters.
    ///
    /// Returns `None` if the span would overflow the coordinate range.
    #[must_use]
    pub fn starting_at(
        key: ClueKey,
        text: impl Into<String>,
        start: Position,
        answer: impl Into<String>,
    ) -> Option<Self> {
        let answer = answer.into();
        let mut positions = Vec::with_capacity(answer.len());
        let mut pos = Some(start);
        for _ in answer.chars() {
            let current = pos?;
            positions.push(current);
            pos = current.step(key.direction());
        }
        Some(Self::new(key, text, positions, answer))
    }

    /// Returns the clue key.
    #[must_use]
    pub fn key(&self) -> ClueKey {
        self.key
    }

    /// Returns the clue text shown to the player.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the spanned positions in entry order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Returns the answer string.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the number of cells the clue spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the clue spans no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the first position of the span.
    #[must_use]
    pub fn first_position(&self) -> Option<Position> {
        self.positions.first().copied()
    }

    /// Returns the index of `pos` within the span.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.positions.iter().position(|&p| p == pos)
    }

    pub(crate) fn set_answer(&mut self, answer: String) {
        self.answer = answer;
    }
}
