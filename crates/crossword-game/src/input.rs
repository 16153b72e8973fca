//! Input results and input policies.

/// The cell-local effect of an input operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum InputOperation {
    /// Nothing changed (same letter written again, or the cell was already empty).
    #[default]
    NoOp,
    /// A letter was written.
    Set,
    /// A letter was removed.
    Removed,
}

/// Result of a mutating [`Game`](crate::Game) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// What happened to the entered letters.
    ///
    /// For reveals this is [`InputOperation::Set`] when at least one cell changed.
    pub operation: InputOperation,
    /// `true` only for the operation that completed the puzzle.
    ///
    /// Callers treat this as a one-time event: stop the timer and surface results.
    pub completed: bool,
}

impl Outcome {
    pub(crate) const fn new(operation: InputOperation, completed: bool) -> Self {
        Self {
            operation,
            completed,
        }
    }
}

/// Where the selection moves after a letter is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum AdvancePolicy {
    /// Move to the next position of the active clue, staying put on its last cell.
    #[default]
    NextInWord,
    /// Keep the selection on the typed cell.
    Stay,
}

/// Where the selection moves after backspace clears a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum BackspacePolicy {
    /// Move to the previous position of the active clue, staying put on its first cell.
    #[default]
    PreviousInWord,
    /// Keep the selection on the cleared cell.
    Stay,
}

/// Options for typing letters through the selection.
///
/// # Examples
///
/// ```
/// use crossword_game::{AdvancePolicy, InputLetterOptions};
///
/// let options = InputLetterOptions::default().advance_policy(AdvancePolicy::Stay);
/// assert!(options.advance_policy.is_stay());
/// assert!(options.backspace_policy.is_previous_in_word());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputLetterOptions {
    /// Selection movement after typing.
    pub advance_policy: AdvancePolicy,
    /// Selection movement after backspace.
    pub backspace_policy: BackspacePolicy,
}

impl InputLetterOptions {
    /// Sets the selection movement after typing.
    #[must_use]
    pub const fn advance_policy(mut self, policy: AdvancePolicy) -> Self {
        self.advance_policy = policy;
        self
    }

    /// Sets the selection movement after backspace.
    #[must_use]
    pub const fn backspace_policy(mut self, policy: BackspacePolicy) -> Self {
        self.backspace_policy = policy;
        self
    }
}
