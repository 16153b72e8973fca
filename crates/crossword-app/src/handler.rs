use chrono::{NaiveDate, TimeDelta};
use crossword_game::{GameError, Outcome};
use crossword_store::{Achievement, CompletionReport, ProgressStore, ProgressUpdate, StatsSink};

use crate::{
    Clock, Session,
    action::{Action, ConfirmResult, InputAction, RevealAction, SelectionAction},
};

/// What an action did, for the front end to report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub outcome: Outcome,
    /// Set on the action that completed the puzzle.
    pub completion: Option<Completion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub report: CompletionReport,
    /// Achievements newly unlocked by this completion.
    pub unlocked: Vec<Achievement>,
}

/// Applies `action` to the session's game and mirrors the change to `store`.
///
/// Progress writes and stats reports are best-effort: a failing store is logged,
/// the write is kept for the next change, and the game carries on.
///
/// # Errors
///
/// Returns the game's error when the action cannot be applied, for example typing
/// without a selection or any input after completion. Invalid positions are
/// ignored.
pub fn handle<C, S>(
    session: &mut Session<C>,
    store: &mut S,
    action: Action,
) -> Result<Response, GameError>
where
    C: Clock,
    S: ProgressStore + StatsSink,
{
    let before = session.game.snapshot();
    let options = session.settings.input_letter_options();

    let result = match action {
        Action::Selection(action) => match action {
            SelectionAction::SelectCell(pos) => {
                session.game.select_cell(pos);
                Ok(Outcome::default())
            }
            SelectionAction::SelectClue(key) => {
                session.game.select_clue(key).map(|()| Outcome::default())
            }
            SelectionAction::ToggleDirection => {
                session.game.toggle_direction();
                Ok(Outcome::default())
            }
        },
        Action::Input(action) => match action {
            InputAction::Letter(ch) => session.game.input_letter(ch, &options),
            InputAction::Backspace => session.game.backspace(&options),
        },
        Action::Reveal(action) => match action {
            RevealAction::Square => session.game.reveal_square(),
            RevealAction::Word => session.game.reveal_word(),
            RevealAction::Puzzle(ConfirmResult::Confirmed) => session.game.reveal_puzzle(),
            RevealAction::Puzzle(ConfirmResult::Cancelled) => Ok(Outcome::default()),
        },
    };
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(GameError::InvalidPosition { pos }) => {
            log::debug!("ignoring action on invalid position {pos}");
            Outcome::default()
        }
        Err(err) => return Err(err),
    };

    let mut update = ProgressUpdate::between(&before, &session.game.snapshot());
    let mut completion = None;
    if outcome.completed {
        let now = session.clock.now();
        session.completed_at = Some(now);
        let time_taken_secs = whole_seconds(now - session.started_at);
        update = update.with_completion(now, time_taken_secs);
        let gave_up = action == Action::from(RevealAction::Puzzle(ConfirmResult::Confirmed));
        completion = Some(report_completion(
            session,
            store,
            now.date_naive(),
            time_taken_secs,
            gave_up,
        ));
    }

    session.queue.push(update);
    // Failures are logged by the queue and retried on the next change.
    let _ = session.queue.flush(store);

    Ok(Response {
        outcome,
        completion,
    })
}

fn report_completion<C, S>(
    session: &Session<C>,
    store: &mut S,
    completed_on: NaiveDate,
    time_taken_secs: u64,
    gave_up: bool,
) -> Completion
where
    S: StatsSink,
{
    let game = &session.game;
    let summary = game.summary();
    let report = CompletionReport {
        puzzle_id: game.puzzle().id(),
        completed_on,
        time_taken_secs,
        letters_found: summary.letters_found,
        total_letters: summary.total_letters,
        letters_revealed: game.revealed().len(),
        reveals_used: game.reveals_used(),
        gave_up,
    };
    log::info!(
        "completed puzzle {} in {time_taken_secs}s with {} reveals",
        report.puzzle_id,
        report.reveals_used
    );
    let unlocked = store.record_completion(&report).unwrap_or_else(|err| {
        log::warn!("failed to record completion stats: {err}");
        Vec::new()
    });
    Completion { report, unlocked }
}

fn whole_seconds(delta: TimeDelta) -> u64 {
    u64::try_from(delta.num_seconds()).unwrap_or(0)
}
