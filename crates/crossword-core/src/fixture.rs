//! The JSON format puzzles are authored in.
//!
//! A fixture lists the grid row by row (`null` for cells outside the puzzle), the clue
//! text grouped by direction, and the answer for every clue key:
//!
//! ```json
//! {
//!   "id": 1,
//!   "title": "Music Crossword",
//!   "date": "2025-07-10",
//!   "grid": [[{"letter": "B", "number": 1}, {"letter": "E"}, null]],
//!   "clues": {"across": {"1A": "Pulse of a song"}, "down": {}},
//!   "solutions": {"1A": "BE"}
//! }
//! ```
//!
//! Clue spans are not written out. Each clue starts at the cell carrying its number and
//! runs in its direction for as many cells as its answer has letters. A cell may leave
//! `letter` empty; its solution is then taken from the answers crossing it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::{
    Cell, Clue, ClueKey, Direction, Grid, Letter, Position, Puzzle, PuzzleError, PuzzleId,
    ShapeError, Square, letter::InvalidLetterError,
};

/// One non-null grid entry of a fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FixtureCell {
    /// Solution letter, or empty to derive it from the crossing answers.
    pub letter: String,
    /// Clue number label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u16>,
    /// Drawn but not playable.
    #[serde(alias = "isBlocked", skip_serializing_if = "std::ops::Not::not")]
    pub blocked: bool,
}

/// Clue text grouped by direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FixtureClues {
    /// Across clues by key.
    pub across: BTreeMap<ClueKey, String>,
    /// Down clues by key.
    pub down: BTreeMap<ClueKey, String>,
}

/// A puzzle as stored on disk or seeded into a store.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PuzzleFixture {
    /// Puzzle id.
    pub id: PuzzleId,
    /// Display title.
    pub title: String,
    /// Publication day.
    pub date: NaiveDate,
    /// Rows of cells; `None` marks cells outside the puzzle.
    pub grid: Vec<Vec<Option<FixtureCell>>>,
    /// Clue text.
    pub clues: FixtureClues,
    /// Answer for every clue key.
    pub solutions: BTreeMap<ClueKey, String>,
}

/// Errors raised while turning a [`PuzzleFixture`] into a [`Puzzle`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum FixtureError {
    /// The fixture is not valid JSON for the fixture schema.
    #[display("malformed fixture: {_0}")]
    #[from]
    Json(serde_json::Error),
    /// The grid rows are not rectangular.
    #[display("malformed grid: {_0}")]
    #[from]
    Shape(ShapeError),
    /// A clue key is filed under the other direction.
    #[display("clue {key} listed under {listed}")]
    DirectionMismatch {
        /// The misfiled key.
        key: ClueKey,
        /// The section it was found in.
        listed: Direction,
    },
    /// A clue has text but no answer.
    #[display("clue {key} has no solution")]
    MissingSolution {
        /// The clue without an answer.
        key: ClueKey,
    },
    /// An answer has no clue text.
    #[display("solution {key} has no clue")]
    MissingClue {
        /// The answer without a clue.
        key: ClueKey,
    },
    /// Two cells carry the same number.
    #[display("number {number} appears twice")]
    DuplicateNumber {
        /// The repeated number.
        number: u16,
    },
    /// No cell carries the clue's number.
    #[display("no cell is numbered {}", key.number())]
    NumberNotFound {
        /// The clue whose start is missing.
        key: ClueKey,
    },
    /// A cell's `letter` is not a single ASCII letter.
    #[display("cell {pos} has invalid letter {text:?}")]
    InvalidCellLetter {
        /// The offending cell.
        pos: Position,
        /// The rejected text.
        text: String,
    },
    /// An answer contains a non-letter character.
    #[display("solution {key}: {source}")]
    InvalidAnswer {
        /// The offending clue.
        key: ClueKey,
        /// The rejected character.
        source: InvalidLetterError,
    },
    /// Two answers, or an answer and the grid, disagree on a cell's letter.
    #[display("cell {pos} is both {existing} and {found} ({key})")]
    LetterConflict {
        /// The contested cell.
        pos: Position,
        /// The clue that brought the second letter.
        key: ClueKey,
        /// The letter already assigned.
        existing: Letter,
        /// The conflicting letter.
        found: Letter,
    },
    /// A span runs off the grid or over a null or blocked cell.
    #[display("clue {key} cannot be placed at {pos}")]
    UnplaceableClue {
        /// The clue being placed.
        key: ClueKey,
        /// The first position that cannot hold a letter.
        pos: Position,
    },
    /// A present cell ends up without a solution letter.
    #[display("cell {pos} has no letter and no answer crosses it")]
    MissingLetter {
        /// The empty cell.
        pos: Position,
    },
    /// The derived puzzle failed validation.
    #[display("invalid puzzle: {_0}")]
    #[from]
    Puzzle(PuzzleError),
}

impl PuzzleFixture {
    /// Parses a fixture from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Json`] if the text does not match the fixture schema.
    pub fn from_json(text: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the fixture as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, FixtureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Derives clue spans and solution letters and builds the validated [`Puzzle`].
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the clue text and answers do not pair up, a clue
    /// number is missing, a span cannot be placed, letters conflict, a present cell
    /// is left without a letter, or the resulting puzzle fails validation.
    pub fn into_puzzle(self) -> Result<Puzzle, FixtureError> {
        let Self {
            id,
            title,
            date,
            grid,
            clues,
            solutions,
        } = self;

        let texts = Self::collect_texts(clues, &solutions)?;
        let layout = Grid::from_rows(grid)?;
        let starts = Self::numbered_cells(&layout)?;

        let mut letters = layout.map(|_, cell| cell.as_ref().map(|_| None::<Letter>));
        for (pos, cell) in layout.iter() {
            if let Some(cell) = cell
                && !cell.letter.is_empty()
            {
                let letter = single_letter(&cell.letter).ok_or_else(|| {
                    FixtureError::InvalidCellLetter {
                        pos,
                        text: cell.letter.clone(),
                    }
                })?;
                letters[pos] = Some(Some(letter));
            }
        }

        let mut spans = Vec::with_capacity(texts.len());
        for (key, text) in texts {
            let answer = &solutions[&key];
            let answer_letters = Letter::parse_word(answer)
                .map_err(|source| FixtureError::InvalidAnswer { key, source })?;
            let start = *starts
                .get(&key.number())
                .ok_or(FixtureError::NumberNotFound { key })?;

            let mut positions = Vec::with_capacity(answer_letters.len());
            let mut next = Some(start);
            for &found in &answer_letters {
                let pos = next.ok_or(FixtureError::UnplaceableClue { key, pos: start })?;
                let playable = matches!(layout.get(pos), Some(Some(cell)) if !cell.blocked);
                if !playable {
                    return Err(FixtureError::UnplaceableClue { key, pos });
                }
                if let Some(Some(existing)) = letters[pos]
                    && existing != found
                {
                    return Err(FixtureError::LetterConflict {
                        pos,
                        key,
                        existing,
                        found,
                    });
                }
                letters[pos] = Some(Some(found));
                positions.push(pos);
                next = pos.step(key.direction());
            }
            spans.push(Clue::new(key, text, positions, answer.clone()));
        }

        let mut rows = Vec::with_capacity(usize::from(layout.height()));
        for row in 0..layout.height() {
            let mut cells = Vec::with_capacity(usize::from(layout.width()));
            for col in 0..layout.width() {
                let pos = Position::new(row, col);
                let cell = match &layout[pos] {
                    None => Cell::Absent,
                    Some(fixture_cell) => {
                        let solution = letters[pos]
                            .flatten()
                            .ok_or(FixtureError::MissingLetter { pos })?;
                        let mut square = Square::new(solution);
                        if let Some(number) = fixture_cell.number {
                            square = square.with_number(number);
                        }
                        if fixture_cell.blocked {
                            square = square.blocked();
                        }
                        Cell::Present(square)
                    }
                };
                cells.push(cell);
            }
            rows.push(cells);
        }

        Ok(Puzzle::new(id, title, date, Grid::from_rows(rows)?, spans)?)
    }

    fn collect_texts(
        clues: FixtureClues,
        solutions: &BTreeMap<ClueKey, String>,
    ) -> Result<BTreeMap<ClueKey, String>, FixtureError> {
        let mut texts = BTreeMap::new();
        for (listed, section) in [
            (Direction::Across, clues.across),
            (Direction::Down, clues.down),
        ] {
            for (key, text) in section {
                if key.direction() != listed {
                    return Err(FixtureError::DirectionMismatch { key, listed });
                }
                if !solutions.contains_key(&key) {
                    return Err(FixtureError::MissingSolution { key });
                }
                texts.insert(key, text);
            }
        }
        if let Some(&key) = solutions.keys().find(|key| !texts.contains_key(key)) {
            return Err(FixtureError::MissingClue { key });
        }
        Ok(texts)
    }

    fn numbered_cells(
        layout: &Grid<Option<FixtureCell>>,
    ) -> Result<BTreeMap<u16, Position>, FixtureError> {
        let mut starts = BTreeMap::new();
        let mut seen = BTreeSet::new();
        for (pos, cell) in layout.iter() {
            if let Some(number) = cell.as_ref().and_then(|cell| cell.number) {
                if !seen.insert(number) {
                    return Err(FixtureError::DuplicateNumber { number });
                }
                starts.insert(number, pos);
            }
        }
        Ok(starts)
    }
}

fn single_letter(text: &str) -> Option<Letter> {
    let mut chars = text.trim().chars();
    let letter = Letter::from_char(chars.next()?)?;
    chars.next().is_none().then_some(letter)
}
