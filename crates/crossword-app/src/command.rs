//! The line-oriented command language of the terminal front end.

use std::str::FromStr;

use crossword_core::{ClueKey, ParseClueKeyError, ParsePositionError, Position};

use crate::action::{Action, InputAction, RevealAction, SelectionAction};

pub const HELP: &str = "\
commands:
  select ROW COL     select a cell (also `select ROW-COL`)
  clue KEY           select a clue, e.g. `clue 4A`
  toggle             switch between across and down
  type LETTERS       type letters into the active word
  back               clear the selected cell and step back
  reveal square      reveal the selected cell
  reveal word        reveal the active word
  reveal puzzle      reveal everything and end the game
  show               print the grid and clues
  stats              print your statistics
  help               print this list
  quit               leave the game";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(Action),
    /// Letters typed one after another.
    Type(Vec<char>),
    /// Needs confirmation before it becomes an [`Action`].
    RevealPuzzle,
    Show,
    Stats,
    Help,
    Quit,
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}

impl From<SelectionAction> for Command {
    fn from(action: SelectionAction) -> Self {
        Self::Action(action.into())
    }
}

impl From<InputAction> for Command {
    fn from(action: InputAction) -> Self {
        Self::Action(action.into())
    }
}

impl From<RevealAction> for Command {
    fn from(action: RevealAction) -> Self {
        Self::Action(action.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseCommandError {
    #[display("empty command")]
    Empty,
    #[display("unknown command `{name}`, try `help`")]
    Unknown { name: String },
    #[display("usage: {usage}")]
    Usage { usage: &'static str },
    #[display("{_0}")]
    #[from]
    Position(ParsePositionError),
    #[display("{_0}")]
    #[from]
    ClueKey(ParseClueKeyError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();
        let usage = |usage| ParseCommandError::Usage { usage };

        let command = match name.as_str() {
            "select" | "s" => {
                let pos: Position = match args.as_slice() {
                    [pos] if pos.contains('-') => pos.parse()?,
                    [row, col] => format!("{row}-{col}").parse()?,
                    _ => return Err(usage("select ROW COL")),
                };
                SelectionAction::SelectCell(pos).into()
            }
            "clue" | "c" => match args.as_slice() {
                [key] => SelectionAction::SelectClue(key.parse::<ClueKey>()?).into(),
                _ => return Err(usage("clue KEY")),
            },
            "toggle" | "t" => no_args(&args, "toggle", SelectionAction::ToggleDirection.into())?,
            "type" => {
                if args.is_empty() {
                    return Err(usage("type LETTERS"));
                }
                Self::Type(args.concat().chars().collect())
            }
            "back" | "b" => no_args(&args, "back", InputAction::Backspace.into())?,
            "reveal" | "r" => match args.as_slice() {
                [scope] => match scope.to_ascii_lowercase().as_str() {
                    "square" => RevealAction::Square.into(),
                    "word" => RevealAction::Word.into(),
                    "puzzle" => Self::RevealPuzzle,
                    _ => return Err(usage("reveal square|word|puzzle")),
                },
                _ => return Err(usage("reveal square|word|puzzle")),
            },
            "show" => no_args(&args, "show", Self::Show)?,
            "stats" => no_args(&args, "stats", Self::Stats)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(ParseCommandError::Unknown { name }),
        };
        Ok(command)
    }
}

fn no_args(
    args: &[&str],
    usage: &'static str,
    command: Command,
) -> Result<Command, ParseCommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ParseCommandError::Usage { usage })
    }
}

#[cfg(test)]
mod tests {
    use crossword_core::Direction;
    use proptest::prelude::*;

    use super::*;

    fn parse(s: &str) -> Result<Command, ParseCommandError> {
        s.parse()
    }

    #[test]
    fn test_parse_selection_commands() {
        let cell = Command::from(SelectionAction::SelectCell(Position::new(2, 3)));
        assert_eq!(parse("select 2 3"), Ok(cell.clone()));
        assert_eq!(parse("  S 2-3 "), Ok(cell));
        assert_eq!(
            parse("clue 4a"),
            Ok(SelectionAction::SelectClue(ClueKey::new(4, Direction::Across)).into())
        );
        assert_eq!(
            parse("toggle"),
            Ok(SelectionAction::ToggleDirection.into())
        );
    }

    #[test]
    fn test_parse_input_and_reveal_commands() {
        assert_eq!(parse("type ban jo"), Ok(Command::Type("banjo".chars().collect())));
        assert_eq!(parse("back"), Ok(InputAction::Backspace.into()));
        assert_eq!(parse("reveal Word"), Ok(RevealAction::Word.into()));
        assert_eq!(parse("r square"), Ok(RevealAction::Square.into()));
        assert_eq!(parse("reveal puzzle"), Ok(Command::RevealPuzzle));
        assert_eq!(parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("   "), Err(ParseCommandError::Empty));
        assert!(matches!(
            parse("dance"),
            Err(ParseCommandError::Unknown { name }) if name == "dance"
        ));
        assert_eq!(
            parse("select 1"),
            Err(ParseCommandError::Usage {
                usage: "select ROW COL"
            })
        );
        assert!(matches!(parse("select a b"), Err(ParseCommandError::Position(_))));
        assert!(matches!(parse("select 1-x"), Err(ParseCommandError::Position(_))));
        assert!(matches!(parse("clue 4X"), Err(ParseCommandError::ClueKey(_))));
        assert!(matches!(parse("reveal all"), Err(ParseCommandError::Usage { .. })));
        assert!(matches!(parse("show grid"), Err(ParseCommandError::Usage { .. })));
        assert!(matches!(parse("type"), Err(ParseCommandError::Usage { .. })));
    }

    proptest! {
        #[test]
        fn prop_select_accepts_both_position_forms(row in 0u8..30, col in 0u8..30) {
            let expected = Command::from(SelectionAction::SelectCell(Position::new(row, col)));
            prop_assert_eq!(parse(&format!("select {row} {col}")), Ok(expected.clone()));
            prop_assert_eq!(parse(&format!("select {row}-{col}")), Ok(expected));
        }
    }
}
