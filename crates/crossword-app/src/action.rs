use crossword_core::{ClueKey, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub enum Action {
    Selection(SelectionAction),
    Input(InputAction),
    Reveal(RevealAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    SelectCell(Position),
    SelectClue(ClueKey),
    ToggleDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Letter(char),
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    Square,
    Word,
    /// Reveals every cell and ends the game, once the player has confirmed.
    Puzzle(ConfirmResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Cancelled,
}

impl From<bool> for ConfirmResult {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Cancelled
        }
    }
}
