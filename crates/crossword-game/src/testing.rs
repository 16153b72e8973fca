//! Shared puzzles for unit tests.

use std::sync::Arc;

use crossword_core::{ClueKey, Position, Puzzle, PuzzleFixture};

/// One across clue, `2A` = `TEST`, spanning `(0,0)`-`(0,3)`.
pub(crate) const SOUND_CHECK: &str = r#"{
    "id": 1,
    "title": "Sound check",
    "date": "2025-07-10",
    "grid": [[{"number": 2}, {}, {}, {}]],
    "clues": {"across": {"2A": "Word said into a microphone before a show"}},
    "solutions": {"2A": "TEST"}
}"#;

/// ```text
/// B E A T .
/// A . . A .
/// N . . N .
/// D I R G E
/// # . . O .
/// ```
///
/// `1A` BEAT, `1D` BAND, `2D` TANGO, `3A` DIRGE; `(4,0)` is blocked.
pub(crate) const BACKSTAGE: &str = r#"{
    "id": 2,
    "title": "Backstage",
    "date": "2025-07-11",
    "grid": [
        [{"number": 1}, {}, {}, {"number": 2}, null],
        [{}, null, null, {}, null],
        [{}, null, null, {}, null],
        [{"number": 3}, {}, {}, {}, {}],
        [{"letter": "X", "blocked": true}, null, null, {}, null]
    ],
    "clues": {
        "across": {"1A": "Pulse of a song", "3A": "Funeral song"},
        "down": {"1D": "Group of musicians", "2D": "Ballroom dance in 2/4"}
    },
    "solutions": {"1A": "BEAT", "1D": "BAND", "2D": "TANGO", "3A": "DIRGE"}
}"#;

pub(crate) fn puzzle(json: &str) -> Arc<Puzzle> {
    Arc::new(PuzzleFixture::from_json(json).unwrap().into_puzzle().unwrap())
}

pub(crate) fn sound_check() -> Arc<Puzzle> {
    puzzle(SOUND_CHECK)
}

pub(crate) fn backstage() -> Arc<Puzzle> {
    puzzle(BACKSTAGE)
}

pub(crate) fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

pub(crate) fn key(text: &str) -> ClueKey {
    text.parse().unwrap()
}
