//! The validated, immutable puzzle aggregate.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    Cell, Clue, ClueKey, Direction, Grid, Letter, Position, ShapeError,
    letter::InvalidLetterError,
};

/// Numeric puzzle identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PuzzleId(u32);

impl PuzzleId {
    /// Creates a puzzle id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A clue crossing a position, together with the position's index in the clue's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueSlot {
    key: ClueKey,
    index: usize,
}

impl ClueSlot {
    /// Returns the key of the crossing clue.
    #[must_use]
    pub const fn key(self) -> ClueKey {
        self.key
    }

    /// Returns the position's index within the clue's span.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// The (at most two) clues crossing a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellClues {
    across: Option<ClueSlot>,
    down: Option<ClueSlot>,
}

impl CellClues {
    /// Returns the crossing clue running in `direction`.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> Option<ClueSlot> {
        match direction {
            Direction::Across => self.across,
            Direction::Down => self.down,
        }
    }

    /// Returns `true` if no clue crosses the position.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.across.is_none() && self.down.is_none()
    }

    /// Iterates over the crossing clues, across first.
    pub fn iter(&self) -> impl Iterator<Item = ClueSlot> + use<> {
        self.across.into_iter().chain(self.down)
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<ClueSlot> {
        match direction {
            Direction::Across => &mut self.across,
            Direction::Down => &mut self.down,
        }
    }
}

/// Errors raised while building or querying a [`Puzzle`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PuzzleError {
    /// The requested clue key does not exist in the puzzle.
    #[display("clue {key} not found")]
    ClueNotFound {
        /// The unknown key.
        key: ClueKey,
    },
    /// Two clues share a key.
    #[display("clue {key} defined twice")]
    DuplicateClue {
        /// The repeated key.
        key: ClueKey,
    },
    /// A clue's key direction disagrees with its span.
    #[display("clue {key} does not run {direction}")]
    NonContiguousSpan {
        /// The offending clue.
        key: ClueKey,
        /// The direction implied by the key.
        direction: Direction,
    },
    /// A clue spans no cells.
    #[display("clue {key} spans no cells")]
    EmptySpan {
        /// The offending clue.
        key: ClueKey,
    },
    /// A clue's answer length differs from its span length.
    #[display("clue {key} spans {span} cells but its answer has {answer} letters")]
    AnswerLengthMismatch {
        /// The offending clue.
        key: ClueKey,
        /// Number of spanned cells.
        span: usize,
        /// Number of answer letters.
        answer: usize,
    },
    /// A clue's answer contains a character that is not a letter.
    #[display("clue {key} answer: {source}")]
    InvalidAnswerLetter {
        /// The offending clue.
        key: ClueKey,
        /// The rejected character.
        source: InvalidLetterError,
    },
    /// A span position lies outside the grid.
    #[display("clue {key} leaves the grid at {pos}")]
    SpanOutOfGrid {
        /// The offending clue.
        key: ClueKey,
        /// The first position outside the grid.
        pos: Position,
    },
    /// A span position is absent or blocked.
    #[display("clue {key} covers unplayable cell {pos}")]
    SpanOverUnplayableCell {
        /// The offending clue.
        key: ClueKey,
        /// The absent or blocked position.
        pos: Position,
    },
    /// An answer letter differs from the solution letter of the cell it covers.
    #[display("clue {key} puts {found} at {pos}, but the cell's solution is {expected}")]
    AnswerMismatch {
        /// The offending clue.
        key: ClueKey,
        /// The position where the letters differ.
        pos: Position,
        /// The cell's solution letter.
        expected: Letter,
        /// The answer's letter.
        found: Letter,
    },
    /// Two clues in the same direction cover one position.
    #[display("clue {key} overlaps another {direction} clue at {pos}")]
    OverlappingClues {
        /// The second clue to claim the position.
        key: ClueKey,
        /// The shared direction.
        direction: Direction,
        /// The contested position.
        pos: Position,
    },
    /// The cell rows are not rectangular.
    #[display("malformed grid: {_0}")]
    #[from]
    Shape(ShapeError),
}

/// One day's crossword: grid, clues, and answer key.
///
/// A `Puzzle` is validated once on construction and never mutated afterwards; players
/// share it by reference. Construction also builds the index from every position to the
/// clues crossing it, which reveal and completion logic rely on instead of searching
/// clue spans.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use crossword_core::{Cell, Clue, ClueKey, Direction, Grid, Letter, Position, Puzzle, PuzzleId, Square};
///
/// let cells = Grid::from_rows(vec![
///     "TEST".chars().map(|c| Cell::Present(Square::new(Letter::from_char(c).unwrap()))).collect(),
/// ])?;
/// let key = ClueKey::new(2, Direction::Across);
/// let clue = Clue::starting_at(key, "Sound check word", Position::new(0, 0), "TEST").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
/// let puzzle = Puzzle::new(PuzzleId::new(1), "Warm-up", date, cells, [clue])?;
///
/// let slot = puzzle.clues_at(Position::new(0, 2)).get(Direction::Across).unwrap();
/// assert_eq!(slot.key(), key);
/// assert_eq!(slot.index(), 2);
/// assert!(puzzle.clues_at(Position::new(0, 2)).get(Direction::Down).is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    id: PuzzleId,
    title: String,
    date: NaiveDate,
    cells: Grid<Cell>,
    clues: BTreeMap<ClueKey, Clue>,
    answers: BTreeMap<ClueKey, String>,
    owners: Grid<CellClues>,
    playable: Vec<Position>,
}

static ABSENT: Cell = Cell::Absent;

impl Puzzle {
    /// Validates the grid and clues and builds a puzzle.
    ///
    /// Answers are normalized to uppercase.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] describing the first violated invariant: duplicate
    /// keys, empty or non-contiguous spans, spans leaving the grid or covering absent or
    /// blocked cells, answers whose length or letters disagree with the grid, or two
    /// same-direction clues sharing a cell.
    pub fn new(
        id: PuzzleId,
        title: impl Into<String>,
        date: NaiveDate,
        cells: Grid<Cell>,
        clues: impl IntoIterator<Item = Clue>,
    ) -> Result<Self, PuzzleError> {
        let mut owners = cells.map(|_, _| CellClues::default());
        let mut clue_map = BTreeMap::new();
        let mut answers = BTreeMap::new();

        for mut clue in clues {
            let key = clue.key();
            if clue_map.contains_key(&key) {
                return Err(PuzzleError::DuplicateClue { key });
            }
            let answer = Self::validate_clue(&cells, &mut owners, &clue)?;
            clue.set_answer(answer.clone());
            answers.insert(key, answer);
            clue_map.insert(key, clue);
        }

        let playable = cells
            .iter()
            .filter(|(_, cell)| cell.is_playable())
            .map(|(pos, _)| pos)
            .collect();

        Ok(Self {
            id,
            title: title.into(),
            date,
            cells,
            clues: clue_map,
            answers,
            owners,
            playable,
        })
    }

    fn validate_clue(
        cells: &Grid<Cell>,
        owners: &mut Grid<CellClues>,
        clue: &Clue,
    ) -> Result<String, PuzzleError> {
        let key = clue.key();
        let direction = key.direction();
        let positions = clue.positions();
        if positions.is_empty() {
            return Err(PuzzleError::EmptySpan { key });
        }
        let letters = Letter::parse_word(clue.answer())
            .map_err(|source| PuzzleError::InvalidAnswerLetter { key, source })?;
        if letters.len() != positions.len() {
            return Err(PuzzleError::AnswerLengthMismatch {
                key,
                span: positions.len(),
                answer: letters.len(),
            });
        }
        for pair in positions.windows(2) {
            if pair[0].step(direction) != Some(pair[1]) {
                return Err(PuzzleError::NonContiguousSpan { key, direction });
            }
        }

        for (index, (&pos, &found)) in positions.iter().zip(&letters).enumerate() {
            let cell = cells
                .get(pos)
                .ok_or(PuzzleError::SpanOutOfGrid { key, pos })?;
            let Cell::Present(square) = cell else {
                return Err(PuzzleError::SpanOverUnplayableCell { key, pos });
            };
            if square.is_blocked() {
                return Err(PuzzleError::SpanOverUnplayableCell { key, pos });
            }
            if square.solution() != found {
                return Err(PuzzleError::AnswerMismatch {
                    key,
                    pos,
                    expected: square.solution(),
                    found,
                });
            }
            let slot = owners[pos].slot_mut(direction);
            if slot.is_some() {
                return Err(PuzzleError::OverlappingClues {
                    key,
                    direction,
                    pos,
                });
            }
            *slot = Some(ClueSlot { key, index });
        }

        Ok(letters.iter().map(|l| l.as_char()).collect())
    }

    /// Returns the puzzle id.
    #[must_use]
    pub fn id(&self) -> PuzzleId {
        self.id
    }

    /// Returns the puzzle title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the calendar day the puzzle is published for.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> u8 {
        self.cells.width()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> u8 {
        self.cells.height()
    }

    /// Returns the full cell grid.
    #[must_use]
    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    /// Returns the cell at `pos`; positions outside the grid are [`Cell::Absent`].
    #[must_use]
    pub fn cell_at(&self, pos: Position) -> &Cell {
        self.cells.get(pos).unwrap_or(&ABSENT)
    }

    /// Returns `true` if `pos` is a present, non-blocked cell.
    #[must_use]
    pub fn is_playable(&self, pos: Position) -> bool {
        self.cell_at(pos).is_playable()
    }

    /// Returns the solution letter of a playable cell.
    #[must_use]
    pub fn solution_at(&self, pos: Position) -> Option<Letter> {
        let cell = self.cell_at(pos);
        if cell.is_playable() {
            cell.solution()
        } else {
            None
        }
    }

    /// Looks up a clue.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::ClueNotFound`] if the key is unknown.
    pub fn clue(&self, key: ClueKey) -> Result<&Clue, PuzzleError> {
        self.clues.get(&key).ok_or(PuzzleError::ClueNotFound { key })
    }

    /// Looks up a clue's answer.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::ClueNotFound`] if the key is unknown.
    pub fn answer(&self, key: ClueKey) -> Result<&str, PuzzleError> {
        self.answers
            .get(&key)
            .map(String::as_str)
            .ok_or(PuzzleError::ClueNotFound { key })
    }

    /// Returns the positions a clue spans, in entry order.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::ClueNotFound`] if the key is unknown.
    pub fn positions_of(&self, key: ClueKey) -> Result<&[Position], PuzzleError> {
        self.clue(key).map(Clue::positions)
    }

    /// Iterates over all clues ordered by key.
    pub fn clues(&self) -> impl Iterator<Item = &Clue> {
        self.clues.values()
    }

    /// Iterates over the clues running in `direction`, ordered by number.
    pub fn clues_in(&self, direction: Direction) -> impl Iterator<Item = &Clue> {
        self.clues
            .values()
            .filter(move |clue| clue.key().direction() == direction)
    }

    /// Returns the clues crossing `pos`.
    #[must_use]
    pub fn clues_at(&self, pos: Position) -> CellClues {
        self.owners.get(pos).copied().unwrap_or_default()
    }

    /// Returns every playable position in row-major order.
    #[must_use]
    pub fn playable_positions(&self) -> &[Position] {
        &self.playable
    }

    /// Returns the number of playable cells.
    #[must_use]
    pub fn total_letters(&self) -> usize {
        self.playable.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    }

    // B E A T
    // A # . .
    // N . . .
    fn cells() -> Grid<Cell> {
        let row = |text: &str| -> Vec<Cell> {
            text.chars()
                .map(|c| match c {
                    '.' => Cell::Absent,
                    '#' => Cell::Present(Square::new(letter('X')).blocked()),
                    c => Cell::Present(Square::new(letter(c))),
                })
                .collect()
        };
        Grid::from_rows(vec![row("BEAT"), row("A#.."), row("N...")]).unwrap()
    }

    fn across(n: u16) -> ClueKey {
        ClueKey::new(n, Direction::Across)
    }

    fn down(n: u16) -> ClueKey {
        ClueKey::new(n, Direction::Down)
    }

    #[test]
    fn test_new_builds_owner_index() {
        let puzzle = Puzzle::new(
            PuzzleId::new(1),
            "t",
            date(),
            cells(),
            [
                Clue::starting_at(across(1), "Pulse", Position::new(0, 0), "beat").unwrap(),
                Clue::starting_at(down(1), "Group", Position::new(0, 0), "BAN").unwrap(),
            ],
        )
        .unwrap();

        assert_eq!(puzzle.answer(across(1)).unwrap(), "BEAT");
        let origin = puzzle.clues_at(Position::new(0, 0));
        assert_eq!(origin.iter().count(), 2);
        assert_eq!(origin.get(Direction::Down).unwrap().index(), 0);
        let slot = puzzle.clues_at(Position::new(2, 0)).get(Direction::Down).unwrap();
        assert_eq!((slot.key(), slot.index()), (down(1), 2));
        assert!(puzzle.clues_at(Position::new(0, 3)).get(Direction::Down).is_none());
        assert!(puzzle.clues_at(Position::new(9, 9)).is_empty());
    }

    #[test]
    fn test_playable_positions_skip_blocked_and_absent() {
        let puzzle = Puzzle::new(PuzzleId::new(1), "t", date(), cells(), []).unwrap();
        assert_eq!(
            puzzle.playable_positions(),
            [
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(0, 3),
                Position::new(1, 0),
                Position::new(2, 0),
            ]
        );
        assert_eq!(puzzle.total_letters(), 6);
        assert!(puzzle.cell_at(Position::new(1, 1)).is_present());
        assert!(!puzzle.is_playable(Position::new(1, 1)));
        assert_eq!(puzzle.solution_at(Position::new(1, 1)), None);
        assert!(puzzle.cell_at(Position::new(7, 7)).is_absent());
    }

    #[test]
    fn test_shape_error_converts() {
        let shape = ShapeError::TooLarge { rows: 300, cols: 1 };
        assert_eq!(PuzzleError::from(shape), PuzzleError::Shape(shape));
    }

    #[test]
    fn test_unknown_clue_is_not_found() {
        let puzzle = Puzzle::new(PuzzleId::new(1), "t", date(), cells(), []).unwrap();
        assert_eq!(
            puzzle.clue(across(9)).unwrap_err(),
            PuzzleError::ClueNotFound { key: across(9) }
        );
        assert!(puzzle.answer(across(9)).is_err());
        assert!(puzzle.positions_of(across(9)).is_err());
    }

    #[test]
    fn test_new_rejects_invalid_clues() {
        let cases = [
            (
                Clue::starting_at(across(1), "", Position::new(0, 0), "BEAN").unwrap(),
                PuzzleError::AnswerMismatch {
                    key: across(1),
                    pos: Position::new(0, 3),
                    expected: letter('T'),
                    found: letter('N'),
                },
            ),
            (
                Clue::new(across(1), "", vec![Position::new(0, 0)], "BE"),
                PuzzleError::AnswerLengthMismatch {
                    key: across(1),
                    span: 1,
                    answer: 2,
                },
            ),
            (
                Clue::starting_at(across(1), "", Position::new(0, 1), "EATS").unwrap(),
                PuzzleError::SpanOutOfGrid {
                    key: across(1),
                    pos: Position::new(0, 4),
                },
            ),
            (
                Clue::starting_at(down(2), "", Position::new(0, 1), "EX").unwrap(),
                PuzzleError::SpanOverUnplayableCell {
                    key: down(2),
                    pos: Position::new(1, 1),
                },
            ),
            (
                Clue::new(
                    across(1),
                    "",
                    vec![Position::new(0, 0), Position::new(0, 2)],
                    "BA",
                ),
                PuzzleError::NonContiguousSpan {
                    key: across(1),
                    direction: Direction::Across,
                },
            ),
            (
                Clue::new(across(1), "", Vec::new(), ""),
                PuzzleError::EmptySpan { key: across(1) },
            ),
        ];

        for (clue, expected) in cases {
            let err = Puzzle::new(PuzzleId::new(1), "t", date(), cells(), [clue]).unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[test]
    fn test_new_rejects_duplicates_and_overlaps() {
        let err = Puzzle::new(
            PuzzleId::new(1),
            "t",
            date(),
            cells(),
            [
                Clue::starting_at(across(1), "", Position::new(0, 0), "BEA").unwrap(),
                Clue::starting_at(across(2), "", Position::new(0, 2), "AT").unwrap(),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            PuzzleError::OverlappingClues {
                key: across(2),
                direction: Direction::Across,
                pos: Position::new(0, 2),
            }
        );

        let err = Puzzle::new(
            PuzzleId::new(1),
            "t",
            date(),
            cells(),
            [
                Clue::starting_at(across(1), "", Position::new(0, 0), "BE").unwrap(),
                Clue::starting_at(across(1), "", Position::new(0, 2), "AT").unwrap(),
            ],
        )
        .unwrap_err();
        assert_eq!(err, PuzzleError::DuplicateClue { key: across(1) });
    }
}
