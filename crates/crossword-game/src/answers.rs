//! The letters a player has entered.

use std::collections::BTreeMap;

use crossword_core::{Letter, Position, Puzzle};

use crate::{GameError, InputOperation};

/// Sparse map from position to entered letter.
///
/// Writes are checked against the puzzle, so the store never holds an entry for an
/// absent or blocked cell. A missing entry means the cell has not been filled.
///
/// # Examples
///
/// ```
/// use crossword_core::{Letter, Position, PuzzleFixture};
/// use crossword_game::{AnswerStore, InputOperation};
///
/// let puzzle = PuzzleFixture::from_json(r#"{
///     "id": 1, "title": "Solo", "date": "2025-07-10",
///     "grid": [[{"number": 1}, {}, null]],
///     "clues": {"across": {"1A": "Musical note"}},
///     "solutions": {"1A": "LA"}
/// }"#)?.into_puzzle()?;
///
/// let mut answers = AnswerStore::new();
/// let l = Letter::from_char('l').unwrap();
/// assert_eq!(answers.set_letter(&puzzle, Position::new(0, 0), l)?, InputOperation::Set);
/// assert_eq!(answers.set_letter(&puzzle, Position::new(0, 0), l)?, InputOperation::NoOp);
/// assert!(answers.set_letter(&puzzle, Position::new(0, 2), l).is_err());
/// assert_eq!(answers.letter(Position::new(0, 0)), Some(l));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    entries: BTreeMap<Position, Letter>,
}

impl AnswerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously saved entries, checking each against `puzzle`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPosition`] for the first entry that targets an
    /// absent or blocked cell.
    pub fn from_entries(
        puzzle: &Puzzle,
        entries: impl IntoIterator<Item = (Position, Letter)>,
    ) -> Result<Self, GameError> {
        let mut store = Self::new();
        for (pos, letter) in entries {
            store.set_letter(puzzle, pos, letter)?;
        }
        Ok(store)
    }

    /// Writes `letter` at `pos`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPosition`] if `pos` is not a playable cell of
    /// `puzzle`; the store is left unchanged.
    pub fn set_letter(
        &mut self,
        puzzle: &Puzzle,
        pos: Position,
        letter: Letter,
    ) -> Result<InputOperation, GameError> {
        if !puzzle.is_playable(pos) {
            return Err(GameError::InvalidPosition { pos });
        }
        match self.entries.insert(pos, letter) {
            Some(previous) if previous == letter => Ok(InputOperation::NoOp),
            _ => Ok(InputOperation::Set),
        }
    }

    /// Parses `ch` as a letter and writes it at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidLetter`] if `ch` is not an ASCII letter, or
    /// [`GameError::InvalidPosition`] as for [`set_letter`](Self::set_letter).
    pub fn set_char(
        &mut self,
        puzzle: &Puzzle,
        pos: Position,
        ch: char,
    ) -> Result<InputOperation, GameError> {
        let letter = Letter::try_from(ch)?;
        self.set_letter(puzzle, pos, letter)
    }

    /// Removes the entry at `pos`, if any.
    pub fn clear_letter(&mut self, pos: Position) -> InputOperation {
        if self.entries.remove(&pos).is_some() {
            InputOperation::Removed
        } else {
            InputOperation::NoOp
        }
    }

    /// Returns the letter entered at `pos`.
    #[must_use]
    pub fn letter(&self, pos: Position) -> Option<Letter> {
        self.entries.get(&pos).copied()
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Letter)> + '_ {
        self.entries.iter().map(|(&pos, &letter)| (pos, letter))
    }

    /// Returns `true` if the entry at `pos` equals the puzzle's solution letter.
    #[must_use]
    pub fn is_correct(&self, puzzle: &Puzzle, pos: Position) -> bool {
        matches!(
            (self.letter(pos), puzzle.solution_at(pos)),
            (Some(entered), Some(solution)) if entered == solution
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::{backstage, pos};

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn test_set_letter_overwrites_previous_entry() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();

        assert_eq!(
            answers.set_letter(&puzzle, pos(0, 1), letter('A')).unwrap(),
            InputOperation::Set
        );
        assert_eq!(
            answers.set_letter(&puzzle, pos(0, 1), letter('E')).unwrap(),
            InputOperation::Set
        );
        assert_eq!(answers.letter(pos(0, 1)), Some(letter('E')));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn test_set_char_normalizes_and_rejects_non_letters() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();

        answers.set_char(&puzzle, pos(3, 4), 'e').unwrap();
        assert_eq!(answers.letter(pos(3, 4)), Some(letter('E')));

        let err = answers.set_char(&puzzle, pos(3, 3), '4').unwrap_err();
        assert!(err.is_invalid_letter());
        assert_eq!(answers.letter(pos(3, 3)), None);
    }

    #[test]
    fn test_rejects_absent_blocked_and_outside_cells() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();

        for target in [pos(1, 1), pos(4, 0), pos(9, 9)] {
            assert_eq!(
                answers.set_letter(&puzzle, target, letter('Q')),
                Err(GameError::InvalidPosition { pos: target })
            );
        }
        assert!(answers.is_empty());
    }

    #[test]
    fn test_clear_letter_reports_removal() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();
        answers.set_letter(&puzzle, pos(2, 0), letter('N')).unwrap();

        assert_eq!(answers.clear_letter(pos(2, 0)), InputOperation::Removed);
        assert_eq!(answers.clear_letter(pos(2, 0)), InputOperation::NoOp);
        assert_eq!(answers.letter(pos(2, 0)), None);
    }

    #[test]
    fn test_from_entries_validates_every_entry() {
        let puzzle = backstage();
        let ok = AnswerStore::from_entries(&puzzle, [(pos(0, 0), letter('B'))]).unwrap();
        assert!(ok.is_correct(&puzzle, pos(0, 0)));

        let err =
            AnswerStore::from_entries(&puzzle, [(pos(0, 0), letter('B')), (pos(4, 0), letter('X'))])
                .unwrap_err();
        assert_eq!(err, GameError::InvalidPosition { pos: pos(4, 0) });
    }

    #[test]
    fn test_serializes_as_position_keyed_map() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();
        answers.set_letter(&puzzle, pos(3, 2), letter('R')).unwrap();

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"3-2":"R"}"#);
        let parsed: AnswerStore = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, answers);
    }

    proptest! {
        #[test]
        fn prop_writes_outside_playable_cells_leave_store_unchanged(
            row in 0_u8..8,
            col in 0_u8..8,
            ch in proptest::char::range('A', 'Z'),
        ) {
            let puzzle = backstage();
            let target = pos(row, col);
            prop_assume!(!puzzle.is_playable(target));

            let mut answers = AnswerStore::new();
            answers.set_letter(&puzzle, pos(0, 0), letter('B')).unwrap();
            let before = answers.clone();

            prop_assert!(answers.set_char(&puzzle, target, ch).is_err());
            prop_assert_eq!(answers, before);
        }

        #[test]
        fn prop_set_letter_is_idempotent(index in 0_usize..14, ch in proptest::char::range('a', 'z')) {
            let puzzle = backstage();
            let target = puzzle.playable_positions()[index];

            let mut once = AnswerStore::new();
            once.set_char(&puzzle, target, ch).unwrap();
            let mut twice = once.clone();
            prop_assert_eq!(twice.set_char(&puzzle, target, ch).unwrap(), InputOperation::NoOp);
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn prop_set_then_clear_restores_empty_cell(index in 0_usize..14) {
            let puzzle = backstage();
            let target = puzzle.playable_positions()[index];

            let mut answers = AnswerStore::new();
            answers.set_char(&puzzle, target, 'A').unwrap();
            answers.clear_letter(target);
            prop_assert_eq!(answers.letter(target), None);
            prop_assert_eq!(answers, AnswerStore::new());
        }
    }
}
