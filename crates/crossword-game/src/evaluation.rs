//! Completion checks.

use std::collections::BTreeSet;

use crossword_core::{Clue, ClueKey, Puzzle};

use crate::AnswerStore;

/// How far a player has got with a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    /// Every playable cell holds its solution letter.
    pub is_complete: bool,
    /// Number of playable cells with an entry, right or wrong.
    pub letters_found: usize,
    /// Number of playable cells.
    pub total_letters: usize,
}

impl CompletionSummary {
    /// Returns `true` if every playable cell has an entry.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.letters_found == self.total_letters
    }
}

/// Evaluates the entered letters against the puzzle.
///
/// A puzzle is complete only on an exact match of every playable cell. A puzzle
/// without playable cells is never complete.
///
/// # Examples
///
/// ```
/// use crossword_core::{Position, PuzzleFixture};
/// use crossword_game::{AnswerStore, evaluate};
///
/// let puzzle = PuzzleFixture::from_json(r#"{
///     "id": 1, "title": "Solo", "date": "2025-07-10",
///     "grid": [[{"number": 1}, {}]],
///     "clues": {"across": {"1A": "Musical note"}},
///     "solutions": {"1A": "MI"}
/// }"#)?.into_puzzle()?;
///
/// let mut answers = AnswerStore::new();
/// answers.set_char(&puzzle, Position::new(0, 0), 'M')?;
/// answers.set_char(&puzzle, Position::new(0, 1), 'E')?;
/// let summary = evaluate(&puzzle, &answers);
/// assert_eq!((summary.letters_found, summary.total_letters), (2, 2));
/// assert!(!summary.is_complete);
///
/// answers.set_char(&puzzle, Position::new(0, 1), 'i')?;
/// assert!(evaluate(&puzzle, &answers).is_complete);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn evaluate(puzzle: &Puzzle, answers: &AnswerStore) -> CompletionSummary {
    let mut letters_found = 0;
    let mut letters_correct = 0;
    for &pos in puzzle.playable_positions() {
        if answers.letter(pos).is_some() {
            letters_found += 1;
            if answers.is_correct(puzzle, pos) {
                letters_correct += 1;
            }
        }
    }
    let total_letters = puzzle.total_letters();
    CompletionSummary {
        is_complete: total_letters > 0 && letters_correct == total_letters,
        letters_found,
        total_letters,
    }
}

/// Returns `true` if every cell of `clue` holds its solution letter.
#[must_use]
pub fn is_clue_complete(puzzle: &Puzzle, answers: &AnswerStore, clue: &Clue) -> bool {
    clue.positions()
        .iter()
        .all(|&pos| answers.is_correct(puzzle, pos))
}

/// Returns the keys of every clue whose cells all hold their solution letters.
#[must_use]
pub fn completed_clues(puzzle: &Puzzle, answers: &AnswerStore) -> BTreeSet<ClueKey> {
    puzzle
        .clues()
        .filter(|clue| is_clue_complete(puzzle, answers, clue))
        .map(Clue::key)
        .collect()
}
