//! Storage collaborators for crossword sessions.
//!
//! The game core talks to storage through three traits:
//!
//! - [`PuzzleRepository`]: published puzzles by id and by day
//! - [`ProgressStore`]: one [`ProgressRecord`] per puzzle, written with partial
//!   [`ProgressUpdate`]s
//! - [`StatsSink`]: best-effort completion reports feeding [`UserStats`] and
//!   [`Achievement`]s
//!
//! [`MemoryStore`] implements all of them in process. [`UpdateQueue`] sits between a
//! session and its [`ProgressStore`], keeping unsaved changes across failed writes.

mod error;
mod memory;
pub mod progress;
mod queue;
mod repository;
pub mod sample;
pub mod stats;

pub use self::{
    error::StoreError,
    memory::MemoryStore,
    progress::{ProgressId, ProgressRecord, ProgressStore, ProgressUpdate},
    queue::UpdateQueue,
    repository::PuzzleRepository,
    stats::{Achievement, CompletionReport, StatsBook, StatsSink, UserStats},
};
