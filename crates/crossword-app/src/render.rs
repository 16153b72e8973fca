//! Plain-text views of a game for the terminal front end.

use std::{
    collections::BTreeSet,
    fmt::{self, Display, Write as _},
};

use chrono::TimeDelta;
use crossword_core::{Cell, Direction, Position};
use crossword_game::Game;
use crossword_store::{Achievement, UserStats};

/// The grid with the selection and active word marked.
///
/// The selected cell is shown as `[X]`, the rest of the active word as `(X)`, and
/// blocked cells as `###`. Revealed letters are lowercase wherever they appear.
/// Empty playable cells show `_`.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    pub game: &'a Game,
}

impl Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let game = self.game;
        let puzzle = game.puzzle();
        let selected = game.selected_position();
        let active_word = game
            .active_clue()
            .and_then(|key| puzzle.positions_of(key).ok())
            .unwrap_or_default();

        f.write_str("   ")?;
        for col in 0..puzzle.width() {
            write!(f, "{col:^3}")?;
        }
        f.write_char('\n')?;

        for row in 0..puzzle.height() {
            write!(f, "{row:>2} ")?;
            for col in 0..puzzle.width() {
                let pos = Position::new(row, col);
                match puzzle.cell_at(pos) {
                    Cell::Absent => f.write_str("   ")?,
                    Cell::Present(square) if square.is_blocked() => f.write_str("###")?,
                    Cell::Present(_) => {
                        let ch = match game.letter(pos) {
                            Some(letter) if game.is_revealed(pos) => {
                                letter.as_char().to_ascii_lowercase()
                            }
                            Some(letter) => letter.as_char(),
                            None => '_',
                        };
                        let (open, close) = if selected == Some(pos) {
                            ('[', ']')
                        } else if active_word.contains(&pos) {
                            ('(', ')')
                        } else {
                            (' ', ' ')
                        };
                        write!(f, "{open}{ch}{close}")?;
                    }
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// Across and down clue lists. The active clue is marked with `>`, solved clues
/// with `ok`.
#[derive(Debug, Clone, Copy)]
pub struct ClueList<'a> {
    pub game: &'a Game,
}

impl Display for ClueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let game = self.game;
        for direction in Direction::ALL {
            let heading = match direction {
                Direction::Across => "Across",
                Direction::Down => "Down",
            };
            writeln!(f, "{heading}")?;
            for clue in game.puzzle().clues_in(direction) {
                let key = clue.key();
                let cursor = if game.active_clue() == Some(key) { '>' } else { ' ' };
                write!(f, "{cursor}{:>4}  {} ({})", key.to_string(), clue.text(), clue.len())?;
                if game.completed_clues().contains(&key) {
                    f.write_str("  ok")?;
                }
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

/// Letters found, elapsed time and reveal count on one line.
#[derive(Debug, Clone, Copy)]
pub struct StatusLine<'a> {
    pub game: &'a Game,
    pub elapsed: TimeDelta,
}

impl Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.game.summary();
        let secs = u64::try_from(self.elapsed.num_seconds()).unwrap_or(0);
        write!(
            f,
            "{}/{} letters | {} | {} reveals",
            summary.letters_found,
            summary.total_letters,
            Elapsed(secs),
            self.game.reveals_used()
        )?;
        if self.game.is_completed() {
            f.write_str(" | solved")?;
        }
        Ok(())
    }
}

/// Aggregated statistics and the achievement checklist.
#[derive(Debug, Clone, Copy)]
pub struct StatsView<'a> {
    pub stats: &'a UserStats,
    pub achievements: &'a BTreeSet<Achievement>,
}

impl Display for StatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        writeln!(f, "Puzzles completed: {}", stats.puzzles_completed)?;
        writeln!(f, "Average time:      {}", Elapsed(stats.average_completion_secs))?;
        writeln!(
            f,
            "Streak:            {} (longest {})",
            stats.current_streak, stats.longest_streak
        )?;
        writeln!(
            f,
            "Hints used:        {} ({} letters revealed)",
            stats.hints_used, stats.letters_revealed
        )?;
        writeln!(f, "Achievements")?;
        for achievement in Achievement::ALL {
            let mark = if self.achievements.contains(&achievement) { 'x' } else { ' ' };
            writeln!(f, "  [{mark}] {achievement}: {}", achievement.description())?;
        }
        Ok(())
    }
}

/// Seconds shown as `mm:ss`, or `h:mm:ss` from one hour on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed(pub u64);

impl Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds) = (self.0 / 3600, self.0 / 60 % 60, self.0 % 60);
        if hours > 0 {
            write!(f, "{hours}:{minutes:02}:{seconds:02}")
        } else {
            write!(f, "{minutes:02}:{seconds:02}")
        }
    }
}
