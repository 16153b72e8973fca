use std::sync::Arc;

use chrono::NaiveDate;
use crossword_core::{Puzzle, PuzzleId};

use crate::StoreError;

/// Source of published puzzles.
///
/// Puzzles are immutable once stored and handed out behind an [`Arc`] so every
/// session shares the same value.
pub trait PuzzleRepository {
    /// Returns the puzzle with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PuzzleNotFound`] if no puzzle has that id.
    fn puzzle(&self, id: PuzzleId) -> Result<Arc<Puzzle>, StoreError>;

    /// Returns the puzzle published on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoPuzzleForDate`] if nothing was published that day.
    fn puzzle_for_date(&self, date: NaiveDate) -> Result<Arc<Puzzle>, StoreError>;

    /// Returns the most recent puzzle published on or before `date`.
    fn latest_on_or_before(&self, date: NaiveDate) -> Option<Arc<Puzzle>>;

    /// Returns the puzzle to play on `today`: the one published that day, or the
    /// most recent earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoPuzzleForDate`] if no puzzle has been published yet.
    fn todays_puzzle(&self, today: NaiveDate) -> Result<Arc<Puzzle>, StoreError> {
        self.latest_on_or_before(today)
            .ok_or(StoreError::NoPuzzleForDate { date: today })
    }

    /// Publishes a puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicatePuzzle`] if the id is taken.
    fn insert_puzzle(&mut self, puzzle: Puzzle) -> Result<Arc<Puzzle>, StoreError>;
}
