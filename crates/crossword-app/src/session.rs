use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use crossword_core::{Puzzle, PuzzleId};
use crossword_game::Game;
use crossword_store::{ProgressId, ProgressStore, ProgressUpdate, PuzzleRepository, UpdateQueue};

use crate::{Clock, SessionError, Settings};

/// Which puzzle a session opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PuzzleChoice {
    /// The puzzle for the clock's current day, or the latest earlier one.
    #[default]
    Today,
    ById(PuzzleId),
    OnDate(NaiveDate),
}

/// One player's visit to one puzzle.
///
/// Owns the in-memory [`Game`] and the queue of progress writes that mirror it.
/// The store is not owned; it is passed to [`Session::open`] and to
/// [`handle`](crate::handle) by the caller.
#[derive(Debug)]
pub struct Session<C> {
    pub(crate) game: Game,
    pub(crate) queue: UpdateQueue,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) completed_at: Option<DateTime<Utc>>,
    pub(crate) settings: Settings,
    pub(crate) clock: C,
}

impl<C: Clock> Session<C> {
    /// Loads the chosen puzzle and the player's progress on it.
    ///
    /// The progress record is created on the first visit; later visits restore the
    /// saved entries, selection, reveals and completion state.
    pub fn open<S>(
        store: &mut S,
        choice: PuzzleChoice,
        clock: C,
        settings: Settings,
    ) -> Result<Self, SessionError>
    where
        S: PuzzleRepository + ProgressStore,
    {
        let puzzle = match choice {
            PuzzleChoice::Today => store.todays_puzzle(clock.today()),
            PuzzleChoice::ById(id) => store.puzzle(id),
            PuzzleChoice::OnDate(date) => store.puzzle_for_date(date),
        }
        .map_err(SessionError::from_lookup)?;
        let puzzle_id = puzzle.id();

        let session = match store.progress_for(puzzle_id)? {
            Some(record) => {
                let game = Game::restore(Arc::clone(&puzzle), &record.snapshot).map_err(
                    |source| SessionError::CorruptProgress { puzzle_id, source },
                )?;
                log::info!(
                    "resumed puzzle {puzzle_id} ({}), {} letters entered",
                    puzzle.title(),
                    game.answers().len()
                );
                Self {
                    game,
                    queue: UpdateQueue::new(record.id),
                    started_at: record.started_at,
                    completed_at: record.completed_at,
                    settings,
                    clock,
                }
            }
            None => {
                let record = store.create_progress(puzzle_id, clock.now())?;
                log::info!("started puzzle {puzzle_id} ({})", puzzle.title());
                Self {
                    game: Game::new(puzzle),
                    queue: UpdateQueue::new(record.id),
                    started_at: record.started_at,
                    completed_at: None,
                    settings,
                    clock,
                }
            }
        };
        Ok(session)
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn puzzle(&self) -> &Arc<Puzzle> {
        self.game.puzzle()
    }

    #[must_use]
    pub fn progress_id(&self) -> ProgressId {
        self.queue.progress_id()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Time spent on the puzzle; stops counting at completion.
    #[must_use]
    pub fn elapsed(&self) -> TimeDelta {
        let end = self.completed_at.unwrap_or_else(|| self.clock.now());
        (end - self.started_at).max(TimeDelta::zero())
    }

    /// Progress changes not yet written to the store.
    #[must_use]
    pub fn pending_update(&self) -> Option<&ProgressUpdate> {
        self.queue.pending()
    }

    /// Retries writing pending progress changes. Returns `true` once nothing is
    /// pending.
    pub fn flush(&mut self, store: &mut impl ProgressStore) -> bool {
        // Failures are logged by the queue and retried on the next change.
        let _ = self.queue.flush(store);
        self.queue.is_idle()
    }
}
