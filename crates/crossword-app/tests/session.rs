use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone as _, Utc};
use crossword_app::{
    Action, Clock as _, ConfirmResult, InputAction, ManualClock, PuzzleChoice, Response,
    RevealAction, SelectionAction, Session, SessionError, Settings, handle,
};
use crossword_core::{ClueKey, Letter, Position, Puzzle, PuzzleId};
use crossword_game::GameError;
use crossword_store::{
    Achievement, CompletionReport, MemoryStore, ProgressId, ProgressRecord, ProgressStore,
    ProgressUpdate, PuzzleRepository, StatsSink, StoreError, UserStats,
};

/// A [`MemoryStore`] whose progress writes and stats reports can be switched off.
struct Unreliable {
    inner: MemoryStore,
    progress_down: bool,
    stats_down: bool,
}

fn unavailable() -> StoreError {
    StoreError::Unavailable {
        reason: "offline".to_owned(),
    }
}

impl PuzzleRepository for Unreliable {
    fn puzzle(&self, id: PuzzleId) -> Result<Arc<Puzzle>, StoreError> {
        self.inner.puzzle(id)
    }

    fn puzzle_for_date(&self, date: NaiveDate) -> Result<Arc<Puzzle>, StoreError> {
        self.inner.puzzle_for_date(date)
    }

    fn latest_on_or_before(&self, date: NaiveDate) -> Option<Arc<Puzzle>> {
        self.inner.latest_on_or_before(date)
    }

    fn insert_puzzle(&mut self, puzzle: Puzzle) -> Result<Arc<Puzzle>, StoreError> {
        self.inner.insert_puzzle(puzzle)
    }
}

impl ProgressStore for Unreliable {
    fn create_progress(
        &mut self,
        puzzle_id: PuzzleId,
        started_at: DateTime<Utc>,
    ) -> Result<ProgressRecord, StoreError> {
        self.inner.create_progress(puzzle_id, started_at)
    }

    fn progress_for(&self, puzzle_id: PuzzleId) -> Result<Option<ProgressRecord>, StoreError> {
        self.inner.progress_for(puzzle_id)
    }

    fn update_progress(
        &mut self,
        id: ProgressId,
        update: &ProgressUpdate,
    ) -> Result<ProgressRecord, StoreError> {
        if self.progress_down {
            return Err(unavailable());
        }
        self.inner.update_progress(id, update)
    }
}

impl StatsSink for Unreliable {
    fn record_completion(
        &mut self,
        report: &CompletionReport,
    ) -> Result<Vec<Achievement>, StoreError> {
        if self.stats_down {
            return Err(unavailable());
        }
        self.inner.record_completion(report)
    }

    fn user_stats(&self) -> Result<UserStats, StoreError> {
        self.inner.user_stats()
    }

    fn achievements(&self) -> Result<BTreeSet<Achievement>, StoreError> {
        self.inner.achievements()
    }
}

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2025, 7, 10, 9, 0, 0).unwrap())
}

fn store() -> MemoryStore {
    MemoryStore::with_sample_data().unwrap()
}

fn open<S: PuzzleRepository + ProgressStore>(
    store: &mut S,
    clock: &ManualClock,
) -> Session<ManualClock> {
    Session::open(store, PuzzleChoice::Today, clock.clone(), Settings::default()).unwrap()
}

fn key(s: &str) -> ClueKey {
    s.parse().unwrap()
}

fn saved(store: &impl ProgressStore) -> ProgressRecord {
    store.progress_for(PuzzleId::new(1)).unwrap().unwrap()
}

/// Types the solution into every playable cell, returning the last response.
fn solve<S: ProgressStore + StatsSink>(
    session: &mut Session<ManualClock>,
    store: &mut S,
) -> Response {
    let puzzle = Arc::clone(session.puzzle());
    let mut last = None;
    for &pos in puzzle.playable_positions() {
        handle(session, store, SelectionAction::SelectCell(pos).into()).unwrap();
        let ch = puzzle.solution_at(pos).unwrap().as_char();
        last = Some(handle(session, store, InputAction::Letter(ch).into()).unwrap());
    }
    last.unwrap()
}

#[test]
fn test_first_visit_creates_progress() {
    let mut store = store();
    let clock = clock();
    let session = open(&mut store, &clock);

    assert_eq!(session.puzzle().title(), "Music Crossword");
    assert!(session.game().answers().is_empty());
    let record = saved(&store);
    assert_eq!(record.id, session.progress_id());
    assert_eq!(record.started_at, clock.now());
}

#[test]
fn test_today_falls_back_to_latest_earlier_puzzle() {
    let mut store = store();
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 8, 30, 12, 0, 0).unwrap());
    let session = open(&mut store, &clock);
    assert_eq!(session.puzzle().id(), PuzzleId::new(1));
}

#[test]
fn test_missing_puzzle_is_reported() {
    let mut store = store();
    let early = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    let err = Session::open(&mut store, PuzzleChoice::Today, early, Settings::default())
        .unwrap_err();
    assert!(matches!(err, SessionError::PuzzleNotFound { .. }));

    let err = Session::open(
        &mut store,
        PuzzleChoice::ById(PuzzleId::new(5)),
        clock(),
        Settings::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SessionError::PuzzleNotFound { .. }));
    assert!(store.progress_for(PuzzleId::new(5)).unwrap().is_none());
}

#[test]
fn test_progress_is_saved_and_restored() {
    let mut store = store();
    let clock = clock();
    let mut session = open(&mut store, &clock);

    handle(&mut session, &mut store, SelectionAction::SelectClue(key("1A")).into()).unwrap();
    for ch in "tempo".chars() {
        handle(&mut session, &mut store, InputAction::Letter(ch).into()).unwrap();
    }
    handle(&mut session, &mut store, SelectionAction::SelectClue(key("4A")).into()).unwrap();
    assert!(session.pending_update().is_none());

    let record = saved(&store);
    assert_eq!(record.snapshot.entries.len(), 5);
    assert_eq!(record.snapshot.active_clue, Some(key("4A")));
    assert_eq!(record.snapshot.completed_clues, BTreeSet::from([key("1A")]));

    clock.advance(TimeDelta::minutes(5));
    let resumed = open(&mut store, &clock);
    assert_eq!(resumed.progress_id(), session.progress_id());
    assert_eq!(resumed.game().letter(Position::new(0, 4)), Letter::from_char('O'));
    assert_eq!(resumed.game().active_clue(), Some(key("4A")));
    assert_eq!(resumed.game().selected_position(), Some(Position::new(2, 0)));
    assert_eq!(resumed.elapsed(), TimeDelta::minutes(5));
}

#[test]
fn test_completion_is_timed_and_reported_once() {
    let mut store = store();
    let clock = clock();
    let mut session = open(&mut store, &clock);

    clock.advance(TimeDelta::seconds(150));
    let response = solve(&mut session, &mut store);
    let completion = response.completion.unwrap();
    assert!(response.outcome.completed);
    assert_eq!(completion.report.time_taken_secs, 150);
    assert_eq!(completion.report.letters_found, 18);
    assert!(!completion.report.gave_up);
    assert_eq!(
        completion.unlocked,
        [
            Achievement::FirstSteps,
            Achievement::SpeedDemon,
            Achievement::PerfectScore
        ]
    );

    let record = saved(&store);
    assert!(record.snapshot.is_completed);
    assert_eq!(record.time_taken_secs, Some(150));
    assert_eq!(record.completed_at, Some(clock.now()));
    assert_eq!(store.user_stats().unwrap().puzzles_completed, 1);

    let err = handle(&mut session, &mut store, InputAction::Backspace.into()).unwrap_err();
    assert_eq!(err, GameError::PuzzleCompleted);
    clock.advance(TimeDelta::hours(1));
    assert_eq!(session.elapsed(), TimeDelta::seconds(150));

    let resumed = open(&mut store, &clock);
    assert!(resumed.game().is_completed());
    assert_eq!(resumed.completed_at(), record.completed_at);
}

#[test]
fn test_reveal_puzzle_requires_confirmation() {
    let mut store = store();
    let clock = clock();
    let mut session = open(&mut store, &clock);

    let cancelled = RevealAction::Puzzle(ConfirmResult::Cancelled);
    let response = handle(&mut session, &mut store, cancelled.into()).unwrap();
    assert_eq!(response, Response::default());
    assert!(session.game().answers().is_empty());
    assert_eq!(saved(&store).snapshot.reveals_used, 0);

    clock.advance(TimeDelta::seconds(30));
    let confirmed = Action::from(RevealAction::Puzzle(ConfirmResult::Confirmed));
    let completion = handle(&mut session, &mut store, confirmed)
        .unwrap()
        .completion
        .unwrap();
    assert_eq!(completion.report.reveals_used, 1);
    assert_eq!(completion.report.letters_revealed, 18);
    assert!(completion.report.gave_up);
    assert_eq!(completion.unlocked, [Achievement::FirstSteps]);
    assert_eq!(saved(&store).snapshot.revealed.len(), 18);
}

#[test]
fn test_reveal_errors_need_a_selection() {
    let mut store = store();
    let mut session = open(&mut store, &clock());

    let err = handle(&mut session, &mut store, RevealAction::Square.into()).unwrap_err();
    assert_eq!(err, GameError::NoSelection);
    let err = handle(&mut session, &mut store, RevealAction::Word.into()).unwrap_err();
    assert_eq!(err, GameError::NoActiveClue);
    let err = handle(&mut session, &mut store, InputAction::Letter('A').into()).unwrap_err();
    assert_eq!(err, GameError::NoSelection);

    handle(&mut session, &mut store, SelectionAction::SelectClue(key("5A")).into()).unwrap();
    handle(&mut session, &mut store, RevealAction::Word.into()).unwrap();
    let record = saved(&store);
    assert_eq!(record.snapshot.reveals_used, 1);
    assert!(record.snapshot.completed_clues.contains(&key("5A")));
}

#[test]
fn test_unplayable_selection_is_ignored() {
    let mut store = store();
    let mut session = open(&mut store, &clock());
    let blocked = SelectionAction::SelectCell(Position::new(1, 1));
    let response = handle(&mut session, &mut store, blocked.into()).unwrap();
    assert_eq!(response, Response::default());
    assert_eq!(session.game().selected_position(), None);
}

#[test]
fn test_store_outage_does_not_interrupt_play() {
    let mut store = Unreliable {
        inner: self::store(),
        progress_down: true,
        stats_down: true,
    };
    let clock = clock();
    let mut session = open(&mut store, &clock);

    clock.advance(TimeDelta::minutes(10));
    let completion = solve(&mut session, &mut store).completion.unwrap();
    assert!(completion.unlocked.is_empty());
    assert!(session.game().is_completed());
    assert!(!session.flush(&mut store));
    assert!(saved(&store).snapshot.entries.is_empty());

    let pending = session.pending_update().unwrap();
    assert_eq!(pending.is_completed, Some(true));
    assert_eq!(pending.time_taken_secs, Some(600));

    store.progress_down = false;
    assert!(session.flush(&mut store));
    let record = saved(&store);
    assert_eq!(record.snapshot.entries.len(), 18);
    assert_eq!(record.time_taken_secs, Some(600));
}

#[test]
fn test_progress_that_does_not_fit_the_puzzle_is_rejected() {
    let mut store = store();
    let clock = clock();
    let id = open(&mut store, &clock).progress_id();

    let mut entries = BTreeMap::new();
    entries.insert(Position::new(1, 1), Letter::from_char('X').unwrap());
    let update = ProgressUpdate {
        entries: Some(entries),
        ..ProgressUpdate::default()
    };
    store.update_progress(id, &update).unwrap();

    let err = Session::open(&mut store, PuzzleChoice::Today, clock, Settings::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::CorruptProgress {
            source: GameError::InvalidPosition { .. },
            ..
        }
    ));
}
