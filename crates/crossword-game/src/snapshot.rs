use std::collections::{BTreeMap, BTreeSet};

use crossword_core::{ClueKey, Letter, Position};

/// The persistent part of a [`Game`](crate::Game).
///
/// Selection is ephemeral; only the active clue is kept. Entries are not trusted on
/// load: [`Game::restore`](crate::Game::restore) checks every one against the puzzle.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Entered letters keyed by `r-c` position.
    pub entries: BTreeMap<Position, Letter>,
    /// The clue active when the snapshot was taken.
    pub active_clue: Option<ClueKey>,
    /// Clues whose cells all held their solution letters; recomputed on restore.
    pub completed_clues: BTreeSet<ClueKey>,
    /// Cells disclosed by reveals.
    pub revealed: BTreeSet<Position>,
    /// Number of reveal requests.
    pub reveals_used: u32,
    /// The puzzle was solved or fully revealed.
    pub is_completed: bool,
}
