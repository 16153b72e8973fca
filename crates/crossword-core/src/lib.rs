//! Core data structures for crossword applications.
//!
//! This crate describes a single crossword puzzle as an immutable value: the grid
//! layout, the clue text, and the answer key. It is shared by the interactive game
//! core, the storage layer, and the front end.
//!
//! # Overview
//!
//! 1. **Core types**
//!    - [`position`]: zero-indexed `(row, col)` grid coordinates and clue [`Direction`]s
//!    - [`letter`]: type-safe uppercase answer letters
//!    - [`clue`]: clue keys such as `2A` / `14D` and the clue spans they name
//!    - [`cell`]: absent, playable, and blocked grid cells
//!
//! 2. **Containers**
//!    - [`containers`]: the rectangular, row-major [`Grid`] indexed by [`Position`]
//!
//! 3. **Puzzle model**
//!    - [`puzzle`]: the validated [`Puzzle`] aggregate, including the index from each
//!      position to the clues that cross it
//!    - [`fixture`]: the JSON fixture format puzzles are authored in
//!
//! # Examples
//!
//! ```
//! use crossword_core::{ClueKey, Direction, Position, PuzzleFixture};
//!
//! let json = r#"{
//!     "id": 7,
//!     "title": "Warm-up",
//!     "date": "2025-07-10",
//!     "grid": [[{"letter": "T", "number": 2}, {}, {}, {}]],
//!     "clues": {"across": {"2A": "Sound check word"}},
//!     "solutions": {"2A": "TEST"}
//! }"#;
//! let puzzle = PuzzleFixture::from_json(json)?.into_puzzle()?;
//!
//! let key = ClueKey::new(2, Direction::Across);
//! assert_eq!(puzzle.answer(key)?, "TEST");
//! assert_eq!(puzzle.positions_of(key)?[3], Position::new(0, 3));
//! assert_eq!(puzzle.total_letters(), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cell;
pub mod clue;
pub mod containers;
pub mod fixture;
pub mod letter;
pub mod position;
pub mod puzzle;

// Re-export commonly used types
pub use self::{
    cell::{Cell, Square},
    clue::{Clue, ClueKey, ParseClueKeyError},
    containers::{Grid, ShapeError},
    fixture::{FixtureCell, FixtureClues, FixtureError, PuzzleFixture},
    letter::{InvalidLetterError, Letter},
    position::{Direction, ParsePositionError, Position},
    puzzle::{CellClues, ClueSlot, Puzzle, PuzzleError, PuzzleId},
};
