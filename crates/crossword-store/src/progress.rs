//! Player progress records and partial updates.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use crossword_core::{ClueKey, Letter, Position, PuzzleId};
use crossword_game::ProgressSnapshot;

use crate::StoreError;

/// Identifier of a [`ProgressRecord`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::From,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct ProgressId(u32);

impl ProgressId {
    /// Creates an id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// One player's saved progress on one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Record id.
    pub id: ProgressId,
    /// The puzzle being played.
    pub puzzle_id: PuzzleId,
    /// Entries, active clue, reveal and completion state.
    #[serde(flatten)]
    pub snapshot: ProgressSnapshot,
    /// When the player first opened the puzzle.
    pub started_at: DateTime<Utc>,
    /// When the puzzle was completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Seconds between start and completion.
    pub time_taken_secs: Option<u64>,
}

impl ProgressRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new(id: ProgressId, puzzle_id: PuzzleId, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            puzzle_id,
            snapshot: ProgressSnapshot::default(),
            started_at,
            completed_at: None,
            time_taken_secs: None,
        }
    }

    /// Overwrites the fields present in `update`.
    pub fn apply(&mut self, update: &ProgressUpdate) {
        let snapshot = &mut self.snapshot;
        if let Some(entries) = &update.entries {
            snapshot.entries.clone_from(entries);
        }
        if let Some(active_clue) = update.active_clue {
            snapshot.active_clue = active_clue;
        }
        if let Some(completed_clues) = &update.completed_clues {
            snapshot.completed_clues.clone_from(completed_clues);
        }
        if let Some(revealed) = &update.revealed {
            snapshot.revealed.clone_from(revealed);
        }
        if let Some(reveals_used) = update.reveals_used {
            snapshot.reveals_used = reveals_used;
        }
        if let Some(is_completed) = update.is_completed {
            snapshot.is_completed = is_completed;
        }
        if let Some(started_at) = update.started_at {
            self.started_at = started_at;
        }
        if let Some(completed_at) = update.completed_at {
            self.completed_at = Some(completed_at);
        }
        if let Some(time_taken_secs) = update.time_taken_secs {
            self.time_taken_secs = Some(time_taken_secs);
        }
    }
}

/// A partial write to a [`ProgressRecord`]: only `Some` fields are written.
///
/// `active_clue` is doubly optional so that clearing the active clue can be told
/// apart from leaving it alone.
///
/// # Examples
///
/// ```
/// use crossword_game::ProgressSnapshot;
/// use crossword_store::ProgressUpdate;
///
/// let before = ProgressSnapshot::default();
/// let after = ProgressSnapshot { reveals_used: 1, ..before.clone() };
///
/// let update = ProgressUpdate::between(&before, &after);
/// assert_eq!(update.reveals_used, Some(1));
/// assert_eq!(update.entries, None);
/// assert!(ProgressUpdate::between(&after, &after).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Replacement entry map.
    pub entries: Option<BTreeMap<Position, Letter>>,
    /// Replacement active clue.
    pub active_clue: Option<Option<ClueKey>>,
    /// Replacement completed-clue set.
    pub completed_clues: Option<BTreeSet<ClueKey>>,
    /// Replacement revealed-cell set.
    pub revealed: Option<BTreeSet<Position>>,
    /// Replacement reveal count.
    pub reveals_used: Option<u32>,
    /// Replacement completion flag.
    pub is_completed: Option<bool>,
    /// Replacement start time.
    pub started_at: Option<DateTime<Utc>>,
    /// Completion time.
    pub completed_at: Option<DateTime<Utc>>,
    /// Seconds between start and completion.
    pub time_taken_secs: Option<u64>,
}

impl ProgressUpdate {
    /// Collects the fields that differ between two snapshots.
    #[must_use]
    pub fn between(before: &ProgressSnapshot, after: &ProgressSnapshot) -> Self {
        fn changed<T: PartialEq + Clone>(before: &T, after: &T) -> Option<T> {
            (before != after).then(|| after.clone())
        }
        Self {
            entries: changed(&before.entries, &after.entries),
            active_clue: changed(&before.active_clue, &after.active_clue),
            completed_clues: changed(&before.completed_clues, &after.completed_clues),
            revealed: changed(&before.revealed, &after.revealed),
            reveals_used: changed(&before.reveals_used, &after.reveals_used),
            is_completed: changed(&before.is_completed, &after.is_completed),
            ..Self::default()
        }
    }

    /// Adds the completion timestamp and duration.
    #[must_use]
    pub fn with_completion(mut self, completed_at: DateTime<Utc>, time_taken_secs: u64) -> Self {
        self.completed_at = Some(completed_at);
        self.time_taken_secs = Some(time_taken_secs);
        self
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Folds a later update into this one; fields set in `newer` win.
    pub fn merge(&mut self, newer: Self) {
        fn take<T>(slot: &mut Option<T>, newer: Option<T>) {
            if newer.is_some() {
                *slot = newer;
            }
        }
        take(&mut self.entries, newer.entries);
        take(&mut self.active_clue, newer.active_clue);
        take(&mut self.completed_clues, newer.completed_clues);
        take(&mut self.revealed, newer.revealed);
        take(&mut self.reveals_used, newer.reveals_used);
        take(&mut self.is_completed, newer.is_completed);
        take(&mut self.started_at, newer.started_at);
        take(&mut self.completed_at, newer.completed_at);
        take(&mut self.time_taken_secs, newer.time_taken_secs);
    }
}

/// Persistence of [`ProgressRecord`]s.
///
/// One record exists per puzzle; records are never deleted. Writes are
/// last-writer-wins per field, and concurrent sessions on one puzzle are not
/// supported.
pub trait ProgressStore {
    /// Creates the record for `puzzle_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateProgress`] if the puzzle already has a record,
    /// or [`StoreError::Unavailable`] if the store cannot be reached.
    fn create_progress(
        &mut self,
        puzzle_id: PuzzleId,
        started_at: DateTime<Utc>,
    ) -> Result<ProgressRecord, StoreError>;

    /// Returns the record for `puzzle_id`, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    fn progress_for(&self, puzzle_id: PuzzleId) -> Result<Option<ProgressRecord>, StoreError>;

    /// Writes the fields present in `update` and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProgressNotFound`] for an unknown id, or
    /// [`StoreError::Unavailable`] if the store cannot be reached.
    fn update_progress(
        &mut self,
        id: ProgressId,
        update: &ProgressUpdate,
    ) -> Result<ProgressRecord, StoreError>;
}
