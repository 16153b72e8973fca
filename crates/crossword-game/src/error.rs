use crossword_core::{InvalidLetterError, Position, PuzzleError};

/// Errors that can occur during game operations.
///
/// Every variant is recoverable: a failed operation leaves the game unchanged.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum GameError {
    /// The position is absent, blocked, or outside the grid.
    #[display("position {pos} does not accept input")]
    InvalidPosition {
        /// The rejected position.
        pos: Position,
    },
    /// The character is not an ASCII letter.
    #[display("{_0}")]
    #[from]
    InvalidLetter(InvalidLetterError),
    /// The operation needs a selected cell and none is selected.
    #[display("no cell selected")]
    NoSelection,
    /// The operation needs an active clue and none is active.
    #[display("no active clue")]
    NoActiveClue,
    /// The puzzle is already complete and accepts no further input.
    #[display("puzzle is already complete")]
    PuzzleCompleted,
    /// The puzzle model rejected a lookup, such as an unknown clue key.
    #[display("{_0}")]
    #[from]
    Puzzle(PuzzleError),
}
