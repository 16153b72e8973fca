use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use chrono::{DateTime, NaiveDate, Utc};
use crossword_core::{Puzzle, PuzzleId};

use crate::{
    Achievement, CompletionReport, ProgressId, ProgressRecord, ProgressStore, ProgressUpdate,
    PuzzleRepository, StatsBook, StatsSink, StoreError, UserStats, sample,
};

/// An in-process store implementing every collaborator trait.
///
/// Created explicitly and passed to sessions by reference; nothing is shared
/// through globals. State lives as long as the value.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use crossword_store::{MemoryStore, PuzzleRepository};
///
/// let store = MemoryStore::with_sample_data()?;
/// let later = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// assert_eq!(store.todays_puzzle(later)?.title(), "Music Crossword");
///
/// let earlier = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert!(store.todays_puzzle(earlier).unwrap_err().is_not_found());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    puzzles: BTreeMap<PuzzleId, Arc<Puzzle>>,
    progress: BTreeMap<ProgressId, ProgressRecord>,
    next_progress_id: u32,
    stats: StatsBook,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the built-in music puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Fixture`] if the bundled fixture is invalid.
    pub fn with_sample_data() -> Result<Self, StoreError> {
        let mut store = Self::new();
        let puzzle = store.insert_puzzle(sample::music_puzzle()?)?;
        log::info!("seeded sample puzzle {} ({})", puzzle.id(), puzzle.title());
        Ok(store)
    }

    /// Iterates over the stored puzzles ordered by id.
    pub fn puzzles(&self) -> impl Iterator<Item = &Arc<Puzzle>> {
        self.puzzles.values()
    }
}

impl PuzzleRepository for MemoryStore {
    fn puzzle(&self, id: PuzzleId) -> Result<Arc<Puzzle>, StoreError> {
        self.puzzles
            .get(&id)
            .cloned()
            .ok_or(StoreError::PuzzleNotFound { id })
    }

    fn puzzle_for_date(&self, date: NaiveDate) -> Result<Arc<Puzzle>, StoreError> {
        self.puzzles
            .values()
            .filter(|puzzle| puzzle.date() == date)
            .max_by_key(|puzzle| puzzle.id())
            .cloned()
            .ok_or(StoreError::NoPuzzleForDate { date })
    }

    fn latest_on_or_before(&self, date: NaiveDate) -> Option<Arc<Puzzle>> {
        self.puzzles
            .values()
            .filter(|puzzle| puzzle.date() <= date)
            .max_by_key(|puzzle| (puzzle.date(), puzzle.id()))
            .cloned()
    }

    fn insert_puzzle(&mut self, puzzle: Puzzle) -> Result<Arc<Puzzle>, StoreError> {
        let id = puzzle.id();
        if self.puzzles.contains_key(&id) {
            return Err(StoreError::DuplicatePuzzle { id });
        }
        let puzzle = Arc::new(puzzle);
        self.puzzles.insert(id, Arc::clone(&puzzle));
        Ok(puzzle)
    }
}

impl ProgressStore for MemoryStore {
    fn create_progress(
        &mut self,
        puzzle_id: PuzzleId,
        started_at: DateTime<Utc>,
    ) -> Result<ProgressRecord, StoreError> {
        if !self.puzzles.contains_key(&puzzle_id) {
            return Err(StoreError::PuzzleNotFound { id: puzzle_id });
        }
        if self.progress_for(puzzle_id)?.is_some() {
            return Err(StoreError::DuplicateProgress { puzzle_id });
        }
        self.next_progress_id += 1;
        let id = ProgressId::new(self.next_progress_id);
        let record = ProgressRecord::new(id, puzzle_id, started_at);
        self.progress.insert(id, record.clone());
        log::debug!("created progress {id} for puzzle {puzzle_id}");
        Ok(record)
    }

    fn progress_for(&self, puzzle_id: PuzzleId) -> Result<Option<ProgressRecord>, StoreError> {
        Ok(self
            .progress
            .values()
            .find(|record| record.puzzle_id == puzzle_id)
            .cloned())
    }

    fn update_progress(
        &mut self,
        id: ProgressId,
        update: &ProgressUpdate,
    ) -> Result<ProgressRecord, StoreError> {
        let record = self
            .progress
            .get_mut(&id)
            .ok_or(StoreError::ProgressNotFound { id })?;
        record.apply(update);
        Ok(record.clone())
    }
}

impl StatsSink for MemoryStore {
    fn record_completion(
        &mut self,
        report: &CompletionReport,
    ) -> Result<Vec<Achievement>, StoreError> {
        let unlocked = self.stats.record(report);
        for achievement in &unlocked {
            log::info!("achievement unlocked: {achievement}");
        }
        Ok(unlocked)
    }

    fn user_stats(&self) -> Result<UserStats, StoreError> {
        Ok(*self.stats.stats())
    }

    fn achievements(&self) -> Result<BTreeSet<Achievement>, StoreError> {
        Ok(self.stats.unlocked().clone())
    }
}
