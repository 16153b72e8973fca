use std::{collections::BTreeSet, sync::Arc};

use crossword_core::{ClueKey, Letter, Position, Puzzle};

use crate::{
    AnswerStore, CompletionSummary, GameError, InputLetterOptions, InputOperation, Outcome,
    ProgressSnapshot, Selection, evaluate, evaluation, reveal,
};

/// A crossword game session.
///
/// Holds one player's progress on a shared [`Puzzle`]: the entered letters, the
/// selection, and the reveal and completion bookkeeping. Every mutating operation
/// re-evaluates the grid and reports the one-time completion transition through
/// [`Outcome::completed`]. Once complete, the game accepts no further input.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use crossword_core::{ClueKey, Direction, Position, PuzzleFixture};
/// use crossword_game::{Game, InputLetterOptions};
///
/// let puzzle = PuzzleFixture::from_json(r#"{
///     "id": 1, "title": "Sound check", "date": "2025-07-10",
///     "grid": [[{"number": 2}, {}, {}, {}]],
///     "clues": {"across": {"2A": "Word said into a microphone"}},
///     "solutions": {"2A": "TEST"}
/// }"#)?.into_puzzle()?;
/// let mut game = Game::new(Arc::new(puzzle));
///
/// game.select_clue(ClueKey::new(2, Direction::Across))?;
/// let options = InputLetterOptions::default();
/// for ch in "TES".chars() {
///     assert!(!game.input_letter(ch, &options)?.completed);
/// }
/// assert_eq!(game.selected_position(), Some(Position::new(0, 3)));
/// assert!(game.input_letter('T', &options)?.completed);
/// assert!(game.is_completed());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    puzzle: Arc<Puzzle>,
    answers: AnswerStore,
    selection: Selection,
    completed_clues: BTreeSet<ClueKey>,
    revealed: BTreeSet<Position>,
    reveals_used: u32,
    completed: bool,
}

impl Game {
    /// Creates a game with nothing entered and nothing selected.
    #[must_use]
    pub fn new(puzzle: Arc<Puzzle>) -> Self {
        Self {
            puzzle,
            answers: AnswerStore::new(),
            selection: Selection::default(),
            completed_clues: BTreeSet::new(),
            revealed: BTreeSet::new(),
            reveals_used: 0,
            completed: false,
        }
    }

    /// Rebuilds a game from saved progress.
    ///
    /// Completed clues are recomputed from the entries. If the snapshot has an
    /// active clue, its first cell is selected.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPosition`] if an entry or revealed cell is not a
    /// playable cell of `puzzle`, or [`GameError::Puzzle`] if the active clue does
    /// not exist.
    pub fn restore(puzzle: Arc<Puzzle>, snapshot: &ProgressSnapshot) -> Result<Self, GameError> {
        let answers = AnswerStore::from_entries(
            &puzzle,
            snapshot.entries.iter().map(|(&pos, &letter)| (pos, letter)),
        )?;
        if let Some(&pos) = snapshot
            .revealed
            .iter()
            .find(|&&pos| !puzzle.is_playable(pos))
        {
            return Err(GameError::InvalidPosition { pos });
        }

        let mut selection = Selection::default();
        if let Some(key) = snapshot.active_clue {
            selection.select_clue(&puzzle, key)?;
        }

        let completed_clues = evaluation::completed_clues(&puzzle, &answers);
        let completed = snapshot.is_completed || evaluate(&puzzle, &answers).is_complete;
        Ok(Self {
            puzzle,
            answers,
            selection,
            completed_clues,
            revealed: snapshot.revealed.clone(),
            reveals_used: snapshot.reveals_used,
            completed,
        })
    }

    /// Captures the persistent state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            entries: self.answers.iter().collect(),
            active_clue: self.selection.active_clue(),
            completed_clues: self.completed_clues.clone(),
            revealed: self.revealed.clone(),
            reveals_used: self.reveals_used,
            is_completed: self.completed,
        }
    }

    /// Returns the puzzle being played.
    #[must_use]
    pub fn puzzle(&self) -> &Arc<Puzzle> {
        &self.puzzle
    }

    /// Returns the entered letters.
    #[must_use]
    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Returns the letter entered at `pos`.
    #[must_use]
    pub fn letter(&self, pos: Position) -> Option<Letter> {
        self.answers.letter(pos)
    }

    /// Returns the current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns the highlighted position.
    #[must_use]
    pub fn selected_position(&self) -> Option<Position> {
        self.selection.position()
    }

    /// Returns the active clue.
    #[must_use]
    pub fn active_clue(&self) -> Option<ClueKey> {
        self.selection.active_clue()
    }

    /// Returns the clues whose cells all hold their solution letters.
    #[must_use]
    pub fn completed_clues(&self) -> &BTreeSet<ClueKey> {
        &self.completed_clues
    }

    /// Returns the cells disclosed by reveals.
    #[must_use]
    pub fn revealed(&self) -> &BTreeSet<Position> {
        &self.revealed
    }

    /// Returns `true` if a reveal disclosed the letter at `pos`.
    #[must_use]
    pub fn is_revealed(&self, pos: Position) -> bool {
        self.revealed.contains(&pos)
    }

    /// Returns the number of reveal requests.
    #[must_use]
    pub fn reveals_used(&self) -> u32 {
        self.reveals_used
    }

    /// Returns `true` once the puzzle is solved or fully revealed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Evaluates the current entries.
    #[must_use]
    pub fn summary(&self) -> CompletionSummary {
        evaluate(&self.puzzle, &self.answers)
    }

    /// Highlights `pos`; see [`Selection::select_cell`].
    pub fn select_cell(&mut self, pos: Position) -> bool {
        self.selection.select_cell(&self.puzzle, pos)
    }

    /// Activates a clue; see [`Selection::select_clue`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Puzzle`] if the clue does not exist.
    pub fn select_clue(&mut self, key: ClueKey) -> Result<(), GameError> {
        self.selection.select_clue(&self.puzzle, key)
    }

    /// Switches to the crossing clue; see [`Selection::toggle_direction`].
    pub fn toggle_direction(&mut self) -> bool {
        self.selection.toggle_direction(&self.puzzle)
    }

    /// Writes `ch` at `pos` without touching the selection.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PuzzleCompleted`] after completion,
    /// [`GameError::InvalidLetter`] if `ch` is not a letter, or
    /// [`GameError::InvalidPosition`] if `pos` is not playable.
    pub fn set_letter(&mut self, pos: Position, ch: char) -> Result<Outcome, GameError> {
        self.ensure_in_progress()?;
        let operation = self.answers.set_char(&self.puzzle, pos, ch)?;
        Ok(self.finish(operation))
    }

    /// Removes the entry at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PuzzleCompleted`] after completion.
    pub fn clear_letter(&mut self, pos: Position) -> Result<Outcome, GameError> {
        self.ensure_in_progress()?;
        let operation = self.answers.clear_letter(pos);
        Ok(self.finish(operation))
    }

    /// Types `ch` into the highlighted cell, then moves along the active clue
    /// according to `options`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PuzzleCompleted`] after completion,
    /// [`GameError::NoSelection`] if no cell is highlighted, or
    /// [`GameError::InvalidLetter`] if `ch` is not a letter. Nothing changes on error.
    pub fn input_letter(
        &mut self,
        ch: char,
        options: &InputLetterOptions,
    ) -> Result<Outcome, GameError> {
        self.ensure_in_progress()?;
        let pos = self.selection.position().ok_or(GameError::NoSelection)?;
        let operation = self.answers.set_char(&self.puzzle, pos, ch)?;
        if options.advance_policy.is_next_in_word() {
            self.selection.advance(&self.puzzle);
        }
        Ok(self.finish(operation))
    }

    /// Clears the highlighted cell, then moves back along the active clue according
    /// to `options`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PuzzleCompleted`] after completion, or
    /// [`GameError::NoSelection`] if no cell is highlighted.
    pub fn backspace(&mut self, options: &InputLetterOptions) -> Result<Outcome, GameError> {
        self.ensure_in_progress()?;
        let pos = self.selection.position().ok_or(GameError::NoSelection)?;
        let operation = self.answers.clear_letter(pos);
        if options.backspace_policy.is_previous_in_word() {
            self.selection.retreat(&self.puzzle);
        }
        Ok(self.finish(operation))
    }

    /// Reveals the highlighted cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PuzzleCompleted`] after completion, or
    /// [`GameError::NoSelection`] if no cell is highlighted.
    pub fn reveal_square(&mut self) -> Result<Outcome, GameError> {
        self.ensure_in_progress()?;
        let reveal =
            reveal::reveal_square(&self.puzzle, &mut self.answers, self.selection.position())?;
        Ok(self.record_reveal(reveal))
    }

    /// Reveals every cell of the active clue.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PuzzleCompleted`] after completion, or
    /// [`GameError::NoActiveClue`] if no clue is active.
    pub fn reveal_word(&mut self) -> Result<Outcome, GameError> {
        self.ensure_in_progress()?;
        let reveal =
            reveal::reveal_word(&self.puzzle, &mut self.answers, self.selection.active_clue())?;
        Ok(self.record_reveal(reveal))
    }

    /// Reveals the whole grid and ends the game.
    ///
    /// This cannot be undone; callers confirm with the player first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PuzzleCompleted`] if the game is already complete.
    pub fn reveal_puzzle(&mut self) -> Result<Outcome, GameError> {
        self.ensure_in_progress()?;
        let reveal = reveal::reveal_puzzle(&self.puzzle, &mut self.answers);
        let mut outcome = self.record_reveal(reveal);
        if !self.completed {
            self.completed = true;
            outcome.completed = true;
        }
        Ok(outcome)
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.completed {
            return Err(GameError::PuzzleCompleted);
        }
        Ok(())
    }

    fn record_reveal(&mut self, reveal: reveal::Reveal) -> Outcome {
        self.reveals_used += 1;
        let operation = reveal.operation();
        self.revealed.extend(reveal.changed);
        self.finish(operation)
    }

    fn finish(&mut self, operation: InputOperation) -> Outcome {
        if operation.is_no_op() {
            return Outcome::new(operation, false);
        }
        self.completed_clues = evaluation::completed_clues(&self.puzzle, &self.answers);
        let summary = self.summary();
        let completed = summary.is_complete && !self.completed;
        if completed {
            self.completed = true;
            log::info!(
                "puzzle {} completed with {} reveal(s)",
                self.puzzle.id(),
                self.reveals_used
            );
        }
        Outcome::new(operation, completed)
    }
}
