//! Interactive game core for crossword puzzles.
//!
//! A [`Game`] tracks one player's progress on a shared, immutable
//! [`Puzzle`](crossword_core::Puzzle):
//!
//! - [`answers`]: the sparse map of entered letters, checked against the grid on write
//! - [`selection`]: the highlighted cell and active clue, with a fixed tie-break for
//!   cells crossed by two clues
//! - [`reveal`]: disclosing a square, a word, or the whole grid
//! - [`evaluation`]: the exact-match completion rule and per-clue completion
//!
//! Progress is saved and loaded through [`ProgressSnapshot`].

pub mod answers;
pub mod evaluation;
pub mod reveal;
pub mod selection;

mod error;
mod game;
mod input;
mod snapshot;
#[cfg(test)]
mod testing;

pub use self::{
    answers::AnswerStore,
    error::GameError,
    evaluation::{CompletionSummary, completed_clues, evaluate, is_clue_complete},
    game::Game,
    input::{AdvancePolicy, BackspacePolicy, InputLetterOptions, InputOperation, Outcome},
    reveal::Reveal,
    selection::Selection,
    snapshot::ProgressSnapshot,
};
