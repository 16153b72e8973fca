//! The bundled sample puzzle.

use crossword_core::{FixtureError, Puzzle, PuzzleFixture};

/// JSON fixture of the built-in music puzzle.
pub const MUSIC_FIXTURE: &str = include_str!("../fixtures/music.json");

/// Parses the built-in music puzzle.
///
/// # Errors
///
/// Returns [`FixtureError`] if the bundled fixture is invalid.
pub fn music_puzzle() -> Result<Puzzle, FixtureError> {
    PuzzleFixture::from_json(MUSIC_FIXTURE)?.into_puzzle()
}
