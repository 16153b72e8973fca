//! Terminal front end for the daily music crossword.
//!
//! A [`Session`] ties a [`Game`](crossword_game::Game) to the player's stored
//! progress. Front ends turn input into [`Action`]s and pass them to [`handle`],
//! which applies them to the game and mirrors every change to the store.

#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod action;
mod clock;
pub mod command;
mod error;
mod handler;
pub mod render;
pub mod repl;
mod session;
mod settings;

pub use self::{
    action::{Action, ConfirmResult, InputAction, RevealAction, SelectionAction},
    clock::{Clock, ManualClock, SystemClock},
    command::{Command, HELP, ParseCommandError},
    error::{AppError, SessionError},
    handler::{Completion, Response, handle},
    session::{PuzzleChoice, Session},
    settings::Settings,
};
