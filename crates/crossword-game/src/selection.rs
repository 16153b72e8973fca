//! The highlighted cell and the active clue.

use crossword_core::{ClueKey, ClueSlot, Direction, Position, Puzzle};

use crate::GameError;

/// Selection state: the highlighted position and the active clue.
///
/// Both start out empty. Selecting a cell picks one of the clues crossing it:
/// the clue running in the direction of the previously active clue if there is
/// one, otherwise the across clue, otherwise the down clue. Selecting a clue
/// moves the highlight to the clue's first cell.
///
/// # Examples
///
/// ```
/// use crossword_core::{ClueKey, Direction, Position, PuzzleFixture};
/// use crossword_game::Selection;
///
/// let puzzle = PuzzleFixture::from_json(r#"{
///     "id": 1, "title": "Corner", "date": "2025-07-10",
///     "grid": [[{"number": 1}, {}], [{}, null]],
///     "clues": {"across": {"1A": "Note"}, "down": {"1D": "Note"}},
///     "solutions": {"1A": "DO", "1D": "DO"}
/// }"#)?.into_puzzle()?;
///
/// let mut selection = Selection::default();
/// assert!(selection.select_cell(&puzzle, Position::new(0, 0)));
/// assert_eq!(selection.active_clue(), Some(ClueKey::new(1, Direction::Across)));
///
/// assert!(selection.toggle_direction(&puzzle));
/// assert_eq!(selection.active_clue(), Some(ClueKey::new(1, Direction::Down)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    position: Option<Position>,
    active_clue: Option<ClueKey>,
}

impl Selection {
    /// Returns the highlighted position.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns the active clue.
    #[must_use]
    pub const fn active_clue(&self) -> Option<ClueKey> {
        self.active_clue
    }

    /// Highlights `pos` and recomputes the active clue.
    ///
    /// Returns `false`, leaving the selection untouched, if `pos` is not playable.
    pub fn select_cell(&mut self, puzzle: &Puzzle, pos: Position) -> bool {
        if !puzzle.is_playable(pos) {
            log::debug!("ignoring selection of unplayable cell {pos}");
            return false;
        }
        let clues = puzzle.clues_at(pos);
        let preferred = self
            .active_clue
            .map_or(Direction::Across, ClueKey::direction);
        self.active_clue = clues
            .get(preferred)
            .or_else(|| clues.get(preferred.other()))
            .map(ClueSlot::key);
        self.position = Some(pos);
        true
    }

    /// Activates `key` and highlights its first position.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Puzzle`] if the clue does not exist.
    pub fn select_clue(&mut self, puzzle: &Puzzle, key: ClueKey) -> Result<(), GameError> {
        let clue = puzzle.clue(key)?;
        self.position = clue.first_position();
        self.active_clue = Some(key);
        Ok(())
    }

    /// Switches to the other clue crossing the highlighted cell.
    ///
    /// Returns `false` if no cell is highlighted or no clue crosses it in the other
    /// direction.
    pub fn toggle_direction(&mut self, puzzle: &Puzzle) -> bool {
        let Some(pos) = self.position else {
            return false;
        };
        let target = self
            .active_clue
            .map_or(Direction::Across, |key| key.direction().other());
        match puzzle.clues_at(pos).get(target) {
            Some(slot) => {
                self.active_clue = Some(slot.key());
                true
            }
            None => false,
        }
    }

    /// Moves the highlight to the next cell of the active clue.
    ///
    /// Returns `false` at the clue's last cell.
    pub fn advance(&mut self, puzzle: &Puzzle) -> bool {
        self.move_within_word(puzzle, |index| index.checked_add(1))
    }

    /// Moves the highlight to the previous cell of the active clue.
    ///
    /// Returns `false` at the clue's first cell.
    pub fn retreat(&mut self, puzzle: &Puzzle) -> bool {
        self.move_within_word(puzzle, |index| index.checked_sub(1))
    }

    /// Returns the highlighted cell's slot within the active clue.
    #[must_use]
    pub fn active_slot(&self, puzzle: &Puzzle) -> Option<ClueSlot> {
        let pos = self.position?;
        let key = self.active_clue?;
        puzzle
            .clues_at(pos)
            .get(key.direction())
            .filter(|slot| slot.key() == key)
    }

    /// Clears both the highlight and the active clue.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn move_within_word(
        &mut self,
        puzzle: &Puzzle,
        step: impl FnOnce(usize) -> Option<usize>,
    ) -> bool {
        let Some(slot) = self.active_slot(puzzle) else {
            return false;
        };
        let Ok(positions) = puzzle.positions_of(slot.key()) else {
            return false;
        };
        match step(slot.index()).and_then(|index| positions.get(index)) {
            Some(&next) => {
                self.position = Some(next);
                true
            }
            None => false,
        }
    }
}
