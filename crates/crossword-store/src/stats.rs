//! Completion statistics and achievements.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use crossword_core::PuzzleId;

use crate::StoreError;

/// What a session reports when a puzzle is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    /// The completed puzzle.
    pub puzzle_id: PuzzleId,
    /// The day the puzzle was completed.
    pub completed_on: NaiveDate,
    /// Seconds from first visit to completion.
    pub time_taken_secs: u64,
    /// Filled playable cells.
    pub letters_found: usize,
    /// Playable cells.
    pub total_letters: usize,
    /// Cells disclosed by reveals.
    pub letters_revealed: usize,
    /// Reveal requests.
    pub reveals_used: u32,
    /// The puzzle was ended by revealing the whole grid.
    #[serde(default)]
    pub gave_up: bool,
}

/// Aggregated statistics across completed puzzles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Number of completed puzzles.
    pub puzzles_completed: u32,
    /// Sum of completion times.
    pub total_time_secs: u64,
    /// Mean completion time, rounded down.
    pub average_completion_secs: u64,
    /// Consecutive days, ending on the last completion, with a completion.
    pub current_streak: u32,
    /// Longest streak so far.
    pub longest_streak: u32,
    /// Reveal requests across all puzzles.
    pub hints_used: u32,
    /// Cells disclosed by reveals across all puzzles.
    pub letters_revealed: u64,
    /// Day of the most recent completion.
    pub last_completed_on: Option<NaiveDate>,
}

impl UserStats {
    /// Adds one completion.
    ///
    /// Completing again on the same day keeps the streak; completing on the day after
    /// the last completion extends it; anything later restarts it at one. Reports
    /// dated before the last completion do not touch the streak.
    pub fn record(&mut self, report: &CompletionReport) {
        self.puzzles_completed += 1;
        self.total_time_secs += report.time_taken_secs;
        self.average_completion_secs = self.total_time_secs / u64::from(self.puzzles_completed);
        self.hints_used += report.reveals_used;
        self.letters_revealed += u64::try_from(report.letters_revealed).unwrap_or(u64::MAX);

        let day = report.completed_on;
        match self.last_completed_on {
            Some(last) if day < last => return,
            Some(last) if day == last => {}
            Some(last) if last.succ_opt() == Some(day) => self.current_streak += 1,
            _ => self.current_streak = 1,
        }
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_completed_on = Some(day);
    }
}

/// Milestones unlocked by completing puzzles.
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
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    /// Complete a first puzzle.
    #[display("First Steps")]
    FirstSteps,
    /// Complete a puzzle in under three minutes.
    #[display("Speed Demon")]
    SpeedDemon,
    /// Complete a puzzle without reveals.
    #[display("Perfect Score")]
    PerfectScore,
    /// Complete puzzles on seven consecutive days.
    #[display("Streak Master")]
    StreakMaster,
    /// Complete ten puzzles.
    #[display("Music Lover")]
    MusicLover,
}

impl Achievement {
    /// All achievements in display order.
    pub const ALL: [Self; 5] = [
        Self::FirstSteps,
        Self::SpeedDemon,
        Self::PerfectScore,
        Self::StreakMaster,
        Self::MusicLover,
    ];

    /// Returns the description shown next to the name.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstSteps => "Complete your first crossword puzzle",
            Self::SpeedDemon => "Complete a puzzle in under 3 minutes",
            Self::PerfectScore => "Complete a puzzle without using any hints",
            Self::StreakMaster => "Complete puzzles 7 days in a row",
            Self::MusicLover => "Complete 10 music-themed puzzles",
        }
    }

    /// Returns `true` if the completion `report`, with `stats` already updated by it,
    /// earns the achievement.
    #[must_use]
    pub const fn is_earned(self, stats: &UserStats, report: &CompletionReport) -> bool {
        match self {
            Self::FirstSteps => stats.puzzles_completed >= 1,
            Self::SpeedDemon => !report.gave_up && report.time_taken_secs < 180,
            Self::PerfectScore => report.reveals_used == 0,
            Self::StreakMaster => stats.current_streak >= 7,
            Self::MusicLover => stats.puzzles_completed >= 10,
        }
    }
}

/// Best-effort sink for completion reports.
pub trait StatsSink {
    /// Records a completion and returns the achievements it newly unlocked.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the sink cannot be reached. Callers
    /// log the failure and carry on.
    fn record_completion(
        &mut self,
        report: &CompletionReport,
    ) -> Result<Vec<Achievement>, StoreError>;

    /// Returns the aggregated statistics.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the sink cannot be reached.
    fn user_stats(&self) -> Result<UserStats, StoreError>;

    /// Returns every unlocked achievement.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the sink cannot be reached.
    fn achievements(&self) -> Result<BTreeSet<Achievement>, StoreError>;
}

/// Statistics with their unlocked achievements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsBook {
    stats: UserStats,
    unlocked: BTreeSet<Achievement>,
}

impl StatsBook {
    /// Returns the statistics.
    #[must_use]
    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    /// Returns the unlocked achievements.
    #[must_use]
    pub fn unlocked(&self) -> &BTreeSet<Achievement> {
        &self.unlocked
    }

    /// Records a completion and returns the newly unlocked achievements.
    pub fn record(&mut self, report: &CompletionReport) -> Vec<Achievement> {
        self.stats.record(report);
        Achievement::ALL
            .into_iter()
            .filter(|achievement| achievement.is_earned(&self.stats, report))
            .filter(|&achievement| self.unlocked.insert(achievement))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn report(completed_on: NaiveDate, time_taken_secs: u64, reveals_used: u32) -> CompletionReport {
        CompletionReport {
            puzzle_id: PuzzleId::new(1),
            completed_on,
            time_taken_secs,
            letters_found: 18,
            total_letters: 18,
            letters_revealed: if reveals_used > 0 { 3 } else { 0 },
            reveals_used,
            gave_up: false,
        }
    }

    #[test]
    fn test_record_updates_totals_and_average() {
        let mut stats = UserStats::default();
        stats.record(&report(day(1), 100, 0));
        stats.record(&report(day(2), 251, 2));

        assert_eq!(stats.puzzles_completed, 2);
        assert_eq!(stats.total_time_secs, 351);
        assert_eq!(stats.average_completion_secs, 175);
        assert_eq!(stats.hints_used, 2);
        assert_eq!(stats.letters_revealed, 3);
        assert_eq!(stats.last_completed_on, Some(day(2)));
    }

    #[test]
    fn test_streak_extends_on_consecutive_days_and_resets_on_gap() {
        let mut stats = UserStats::default();
        for d in [1, 2, 2, 3] {
            stats.record(&report(day(d), 60, 0));
        }
        assert_eq!(stats.current_streak, 3);

        stats.record(&report(day(5), 60, 0));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 3);

        stats.record(&report(day(4), 60, 0));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.last_completed_on, Some(day(5)));
    }

    #[test]
    fn test_first_completion_unlocks_first_steps_speed_and_perfect() {
        let mut book = StatsBook::default();
        let unlocked = book.record(&report(day(1), 179, 0));
        assert_eq!(
            unlocked,
            [
                Achievement::FirstSteps,
                Achievement::SpeedDemon,
                Achievement::PerfectScore
            ]
        );
        assert!(book.record(&report(day(2), 90, 0)).is_empty());
    }

    #[test]
    fn test_slow_revealed_completion_only_unlocks_first_steps() {
        let mut book = StatsBook::default();
        assert_eq!(
            book.record(&report(day(1), 180, 1)),
            [Achievement::FirstSteps]
        );
    }

    #[test]
    fn test_revealing_the_grid_is_never_fast() {
        let mut book = StatsBook::default();
        let gave_up = CompletionReport {
            letters_revealed: 18,
            gave_up: true,
            ..report(day(1), 20, 1)
        };
        assert_eq!(book.record(&gave_up), [Achievement::FirstSteps]);
        assert_eq!(
            book.record(&report(day(2), 20, 1)),
            [Achievement::SpeedDemon]
        );
    }

    #[test]
    fn test_week_streak_and_ten_puzzles() {
        let mut book = StatsBook::default();
        let mut unlocked = Vec::new();
        for d in 1..=10 {
            unlocked.extend(book.record(&report(day(d), 600, 1)));
        }
        assert_eq!(
            unlocked,
            [
                Achievement::FirstSteps,
                Achievement::StreakMaster,
                Achievement::MusicLover
            ]
        );
        assert_eq!(book.stats().longest_streak, 10);
        assert_eq!(book.unlocked().len(), 3);
    }

    #[test]
    fn test_achievement_text() {
        assert_eq!(Achievement::StreakMaster.to_string(), "Streak Master");
        assert_eq!(
            serde_json::to_string(&Achievement::SpeedDemon).unwrap(),
            r#""speed-demon""#
        );
        assert!(Achievement::ALL.iter().all(|a| !a.description().is_empty()));
    }
}
