use chrono::NaiveDate;
use crossword_core::{FixtureError, PuzzleId};

use crate::ProgressId;

/// Errors reported by the storage collaborators.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant)]
pub enum StoreError {
    /// No puzzle has the requested id.
    #[display("puzzle {id} not found")]
    PuzzleNotFound {
        /// The requested id.
        id: PuzzleId,
    },
    /// No puzzle is published for the requested day.
    #[display("no puzzle available for {date}")]
    NoPuzzleForDate {
        /// The requested day.
        date: NaiveDate,
    },
    /// A puzzle with the same id is already stored.
    #[display("puzzle {id} already exists")]
    DuplicatePuzzle {
        /// The conflicting id.
        id: PuzzleId,
    },
    /// No progress record has the requested id.
    #[display("progress record {id} not found")]
    ProgressNotFound {
        /// The requested id.
        id: ProgressId,
    },
    /// A progress record for the puzzle already exists.
    #[display("progress for puzzle {puzzle_id} already exists")]
    DuplicateProgress {
        /// The puzzle the record belongs to.
        puzzle_id: PuzzleId,
    },
    /// The backing store could not be reached.
    #[display("store unavailable: {reason}")]
    Unavailable {
        /// Description of the failure.
        reason: String,
    },
    /// A bundled or loaded puzzle fixture is invalid.
    #[display("{_0}")]
    #[from]
    Fixture(FixtureError),
}

impl StoreError {
    /// Returns `true` for the errors meaning "no such puzzle".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PuzzleNotFound { .. } | Self::NoPuzzleForDate { .. }
        )
    }
}
