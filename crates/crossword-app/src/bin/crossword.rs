//! Terminal crossword game.
//!
//! Plays today's music crossword, or a chosen one, against an in-memory store
//! seeded with the bundled puzzle and any puzzles loaded with `--fixture`.

use std::{fs, io, path::PathBuf, process::ExitCode};

use chrono::NaiveDate;
use clap::Parser;
use crossword_app::{AppError, PuzzleChoice, Session, Settings, SystemClock, repl};
use crossword_core::{PuzzleFixture, PuzzleId};
use crossword_store::{MemoryStore, PuzzleRepository as _};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Load additional puzzles from JSON fixture files.
    #[arg(long, value_name = "PATH")]
    fixture: Vec<PathBuf>,

    /// Play the puzzle with this id.
    #[arg(long, value_name = "ID", conflicts_with = "date")]
    puzzle_id: Option<u32>,

    /// Play the puzzle published on this day (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Keep the cursor on the cell just typed into.
    #[arg(long)]
    no_auto_advance: bool,
}

impl Args {
    fn choice(&self) -> PuzzleChoice {
        match (self.puzzle_id, self.date) {
            (Some(id), _) => PuzzleChoice::ById(PuzzleId::new(id)),
            (None, Some(date)) => PuzzleChoice::OnDate(date),
            (None, None) => PuzzleChoice::Today,
        }
    }

    fn settings(&self) -> Settings {
        Settings {
            auto_advance: !self.no_auto_advance,
            ..Settings::default()
        }
    }
}

fn load_store(fixtures: &[PathBuf]) -> Result<MemoryStore, AppError> {
    let mut store = MemoryStore::with_sample_data()?;
    for path in fixtures {
        let text = fs::read_to_string(path).map_err(|source| AppError::ReadFixture {
            path: path.clone(),
            source,
        })?;
        let puzzle = store.insert_puzzle(PuzzleFixture::from_json(&text)?.into_puzzle()?)?;
        log::info!("loaded puzzle {} from {}", puzzle.id(), path.display());
    }
    Ok(store)
}

fn run(args: &Args) -> Result<(), AppError> {
    let mut store = load_store(&args.fixture)?;
    let mut session = Session::open(&mut store, args.choice(), SystemClock, args.settings())?;
    repl::run(io::stdin().lock(), &mut io::stdout().lock(), &mut store, &mut session)?;
    Ok(())
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
