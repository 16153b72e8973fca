//! Disclosing solution letters.
//!
//! Every reveal reads the solution letter of each target cell straight from the
//! puzzle's grid, so a cell shared by two clues always gets the same letter.

use crossword_core::{ClueKey, Position, Puzzle};

use crate::{AnswerStore, GameError, InputOperation};

/// Cells whose entry a reveal changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reveal {
    /// Positions that were empty or wrong before the reveal, in reveal order.
    pub changed: Vec<Position>,
}

impl Reveal {
    /// Returns [`InputOperation::Set`] if any cell changed.
    #[must_use]
    pub fn operation(&self) -> InputOperation {
        if self.changed.is_empty() {
            InputOperation::NoOp
        } else {
            InputOperation::Set
        }
    }
}

/// Writes the solution letter at `pos`.
///
/// # Errors
///
/// Returns [`GameError::NoSelection`] if `pos` is `None`, or
/// [`GameError::InvalidPosition`] if it is not a playable cell.
pub fn reveal_square(
    puzzle: &Puzzle,
    answers: &mut AnswerStore,
    pos: Option<Position>,
) -> Result<Reveal, GameError> {
    let pos = pos.ok_or(GameError::NoSelection)?;
    let mut reveal = Reveal::default();
    if disclose(puzzle, answers, pos)? {
        reveal.changed.push(pos);
    }
    Ok(reveal)
}

/// Writes the solution letter into every cell of the clue `key`.
///
/// # Errors
///
/// Returns [`GameError::NoActiveClue`] if `key` is `None`, or
/// [`GameError::Puzzle`] if the clue does not exist.
pub fn reveal_word(
    puzzle: &Puzzle,
    answers: &mut AnswerStore,
    key: Option<ClueKey>,
) -> Result<Reveal, GameError> {
    let key = key.ok_or(GameError::NoActiveClue)?;
    let mut reveal = Reveal::default();
    for &pos in puzzle.positions_of(key)? {
        if disclose(puzzle, answers, pos)? {
            reveal.changed.push(pos);
        }
    }
    Ok(reveal)
}

/// Writes the solution letter into every playable cell.
pub fn reveal_puzzle(puzzle: &Puzzle, answers: &mut AnswerStore) -> Reveal {
    let mut reveal = Reveal::default();
    for &pos in puzzle.playable_positions() {
        if let Ok(true) = disclose(puzzle, answers, pos) {
            reveal.changed.push(pos);
        }
    }
    reveal
}

fn disclose(puzzle: &Puzzle, answers: &mut AnswerStore, pos: Position) -> Result<bool, GameError> {
    let solution = puzzle
        .solution_at(pos)
        .ok_or(GameError::InvalidPosition { pos })?;
    Ok(answers.set_letter(puzzle, pos, solution)?.is_set())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        evaluate,
        testing::{backstage, key, pos, sound_check},
    };

    #[test]
    fn test_reveal_square_uses_cell_solution_at_crossing() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();

        let reveal = reveal_square(&puzzle, &mut answers, Some(pos(3, 3))).unwrap();
        assert_eq!(reveal.changed, [pos(3, 3)]);
        assert_eq!(answers.letter(pos(3, 3)).unwrap().as_char(), 'G');
    }

    #[test]
    fn test_reveal_square_without_selection_fails() {
        let puzzle = sound_check();
        let mut answers = AnswerStore::new();

        let err = reveal_square(&puzzle, &mut answers, None).unwrap_err();
        assert_eq!(err, GameError::NoSelection);
        assert!(answers.is_empty());
    }

    #[test]
    fn test_reveal_square_on_blocked_cell_fails() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();

        let err = reveal_square(&puzzle, &mut answers, Some(pos(4, 0))).unwrap_err();
        assert!(err.is_invalid_position());
        assert!(answers.is_empty());
    }

    #[test]
    fn test_reveal_word_skips_correct_cells() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();
        answers.set_char(&puzzle, pos(3, 0), 'D').unwrap();
        answers.set_char(&puzzle, pos(3, 1), 'O').unwrap();

        let reveal = reveal_word(&puzzle, &mut answers, Some(key("3A"))).unwrap();
        assert_eq!(reveal.changed, [pos(3, 1), pos(3, 2), pos(3, 3), pos(3, 4)]);
        assert_eq!(reveal.operation(), InputOperation::Set);

        let again = reveal_word(&puzzle, &mut answers, Some(key("3A"))).unwrap();
        assert_eq!(again.operation(), InputOperation::NoOp);
    }

    #[test]
    fn test_reveal_word_requires_active_clue() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();
        assert_eq!(
            reveal_word(&puzzle, &mut answers, None),
            Err(GameError::NoActiveClue)
        );
        assert!(
            reveal_word(&puzzle, &mut answers, Some(key("8D")))
                .unwrap_err()
                .is_puzzle()
        );
    }

    #[test]
    fn test_reveal_puzzle_fills_every_playable_cell() {
        let puzzle = backstage();
        let mut answers = AnswerStore::new();
        answers.set_char(&puzzle, pos(0, 0), 'B').unwrap();

        let reveal = reveal_puzzle(&puzzle, &mut answers);
        assert_eq!(reveal.changed.len(), 13);

        let summary = evaluate(&puzzle, &answers);
        assert!(summary.is_complete);
        assert_eq!(summary.letters_found, summary.total_letters);
        assert_eq!(answers.letter(pos(4, 0)), None);
    }

    proptest! {
        #[test]
        fn prop_reveal_word_writes_solution_letters(
            clue_index in 0_usize..4,
            noise in proptest::collection::vec((0_usize..14, proptest::char::range('A', 'Z')), 0..10),
        ) {
            let puzzle = backstage();
            let mut answers = AnswerStore::new();
            for (index, ch) in noise {
                answers.set_char(&puzzle, puzzle.playable_positions()[index], ch).unwrap();
            }
            let clue = puzzle.clues().nth(clue_index).unwrap();

            reveal_word(&puzzle, &mut answers, Some(clue.key())).unwrap();
            for &pos in clue.positions() {
                prop_assert_eq!(answers.letter(pos), puzzle.solution_at(pos));
            }
        }
    }
}
