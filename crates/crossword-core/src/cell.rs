//! Grid cells.

use crate::Letter;

/// The contents of one grid square that is part of the puzzle.
///
/// A square always carries its solution letter. Blocked squares are drawn but never
/// accept input and are never part of a clue span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    solution: Letter,
    number: Option<u16>,
    blocked: bool,
}

impl Square {
    /// Creates a playable, unnumbered square.
    #[must_use]
    pub const fn new(solution: Letter) -> Self {
        Self {
            solution,
            number: None,
            blocked: false,
        }
    }

    /// Sets the clue number label drawn in the corner of the square.
    #[must_use]
    pub const fn with_number(mut self, number: u16) -> Self {
        self.number = Some(number);
        self
    }

    /// Marks the square as blocked (visual only, no input).
    #[must_use]
    pub const fn blocked(mut self) -> Self {
        self.blocked = true;
        self
    }

    /// Returns the canonical solution letter.
    #[must_use]
    pub const fn solution(&self) -> Letter {
        self.solution
    }

    /// Returns the clue number label, if any.
    #[must_use]
    pub const fn number(&self) -> Option<u16> {
        self.number
    }

    /// Returns `true` if the square accepts no input.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.blocked
    }
}

/// One grid position: either outside the puzzle or a [`Square`].
///
/// # Examples
///
/// ```
/// use crossword_core::{Cell, Letter, Square};
///
/// let letter = Letter::from_char('E').unwrap();
/// let cell = Cell::Present(Square::new(letter));
/// assert!(cell.is_playable());
/// assert_eq!(cell.solution(), Some(letter));
///
/// let blocked = Cell::Present(Square::new(letter).blocked());
/// assert!(blocked.is_present());
/// assert!(!blocked.is_playable());
///
/// assert_eq!(Cell::Absent.solution(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Not part of the puzzle; nothing is drawn and no interaction is possible.
    #[default]
    Absent,
    /// Part of the puzzle.
    Present(Square),
}

impl Cell {
    /// Returns the square, if the cell is present.
    #[must_use]
    pub const fn square(&self) -> Option<&Square> {
        match self {
            Self::Absent => None,
            Self::Present(square) => Some(square),
        }
    }

    /// Returns `true` if the cell is present and not blocked.
    #[must_use]
    pub const fn is_playable(&self) -> bool {
        matches!(self, Self::Present(square) if !square.blocked)
    }

    /// Returns the solution letter of a present cell (blocked or not).
    #[must_use]
    pub const fn solution(&self) -> Option<Letter> {
        match self {
            Self::Absent => None,
            Self::Present(square) => Some(square.solution),
        }
    }

    /// Returns the clue number label of a present cell.
    #[must_use]
    pub const fn number(&self) -> Option<u16> {
        match self {
            Self::Absent => None,
            Self::Present(square) => square.number,
        }
    }
}
