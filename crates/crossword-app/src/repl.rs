//! The interactive read-eval-print loop.

use std::io::{self, BufRead, Write};

use crossword_game::GameError;
use crossword_store::{ProgressStore, StatsSink};

use crate::{
    Clock, Command, HELP, ParseCommandError, Response, Session,
    action::{Action, InputAction, RevealAction},
    handle,
    render::{ClueList, Elapsed, GridView, StatsView, StatusLine},
};

/// Reads commands from `input` until `quit` or end of input.
///
/// Game errors such as typing without a selection are printed and the loop goes
/// on; only I/O errors on `input` or `output` end it.
pub fn run<R, W, S, C>(
    input: R,
    output: &mut W,
    store: &mut S,
    session: &mut Session<C>,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    S: ProgressStore + StatsSink,
    C: Clock,
{
    let puzzle = session.puzzle();
    writeln!(output, "{} ({})", puzzle.title(), puzzle.date())?;
    show_board(output, session)?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Show => show_board(output, session)?,
            Command::Stats => show_stats(output, &*store)?,
            Command::Action(action) => {
                if apply(output, store, session, action)? {
                    show_status(output, session)?;
                }
            }
            Command::Type(letters) => {
                for ch in letters {
                    if !apply(output, store, session, InputAction::Letter(ch).into())? {
                        break;
                    }
                }
                show_status(output, session)?;
            }
            Command::RevealPuzzle => {
                write!(output, "Reveal the whole puzzle? This ends the game. [y/N] ")?;
                output.flush()?;
                let answer = lines.next().transpose()?.unwrap_or_default();
                let confirmed = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
                if !confirmed {
                    writeln!(output, "Nothing revealed.")?;
                }
                let action = RevealAction::Puzzle(confirmed.into()).into();
                if apply(output, store, session, action)? && confirmed {
                    show_status(output, session)?;
                }
            }
        }
    }

    if !session.flush(store) {
        writeln!(output, "Some progress could not be saved.")?;
    }
    Ok(())
}

/// Handles one action and prints errors and completion. Returns `false` if the
/// action failed.
fn apply<W, S, C>(
    output: &mut W,
    store: &mut S,
    session: &mut Session<C>,
    action: Action,
) -> io::Result<bool>
where
    W: Write,
    S: ProgressStore + StatsSink,
    C: Clock,
{
    match handle(session, store, action) {
        Ok(response) => {
            announce(output, &response)?;
            Ok(true)
        }
        Err(GameError::PuzzleCompleted) => {
            writeln!(output, "The puzzle is already solved.")?;
            Ok(false)
        }
        Err(err) => {
            writeln!(output, "{err}")?;
            Ok(false)
        }
    }
}

fn announce(output: &mut impl Write, response: &Response) -> io::Result<()> {
    let Some(completion) = &response.completion else {
        return Ok(());
    };
    writeln!(
        output,
        "Solved in {}!",
        Elapsed(completion.report.time_taken_secs)
    )?;
    for achievement in &completion.unlocked {
        writeln!(
            output,
            "Achievement unlocked: {achievement} ({})",
            achievement.description()
        )?;
    }
    Ok(())
}

fn show_board<C: Clock>(output: &mut impl Write, session: &Session<C>) -> io::Result<()> {
    let game = session.game();
    write!(output, "{}", GridView { game })?;
    write!(output, "{}", ClueList { game })?;
    show_status(output, session)
}

fn show_status<C: Clock>(output: &mut impl Write, session: &Session<C>) -> io::Result<()> {
    let game = session.game();
    if let Some(pos) = game.selected_position() {
        let clue = game
            .active_clue()
            .map_or_else(String::new, |key| format!(" on {key}"));
        write!(output, "at {pos}{clue} | ")?;
    }
    writeln!(
        output,
        "{}",
        StatusLine {
            game,
            elapsed: session.elapsed(),
        }
    )
}

fn show_stats(output: &mut impl Write, store: &impl StatsSink) -> io::Result<()> {
    match store.user_stats().and_then(|stats| Ok((stats, store.achievements()?))) {
        Ok((stats, achievements)) => write!(
            output,
            "{}",
            StatsView {
                stats: &stats,
                achievements: &achievements,
            }
        ),
        Err(err) => writeln!(output, "Statistics are unavailable: {err}"),
    }
}
