use std::{io, path::PathBuf};

use crossword_core::{FixtureError, PuzzleId};
use crossword_game::GameError;
use crossword_store::StoreError;

/// Failure to start a [`Session`](crate::Session).
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    #[display("no puzzle available: {source}")]
    PuzzleNotFound { source: StoreError },
    #[display("saved progress for puzzle {puzzle_id} does not fit the puzzle: {source}")]
    CorruptProgress {
        puzzle_id: PuzzleId,
        source: GameError,
    },
    #[display("{_0}")]
    #[from]
    Store(StoreError),
}

impl SessionError {
    pub(crate) fn from_lookup(err: StoreError) -> Self {
        if err.is_not_found() {
            Self::PuzzleNotFound { source: err }
        } else {
            Self::Store(err)
        }
    }
}

/// Errors surfaced by the command-line front end.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    #[display("failed to read {}: {source}", path.display())]
    ReadFixture { path: PathBuf, source: io::Error },
    #[display("{_0}")]
    #[from]
    Fixture(FixtureError),
    #[display("{_0}")]
    #[from]
    Store(StoreError),
    #[display("{_0}")]
    #[from]
    Session(SessionError),
    #[display("{_0}")]
    #[from]
    Io(io::Error),
}
