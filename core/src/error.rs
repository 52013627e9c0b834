use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("({row}, {col}) is outside the mine field")]
    InvalidCoords { row: i32, col: i32 },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T, E = GameError> = core::result::Result<T, E>;

/// Reasons a seed file cannot start a game.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Seed File Not Found Error: {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "Seed File Malformed Error: Cannot create a mine field with {rows} rows and {cols} columns!"
    )]
    MalformedDimensions { rows: i64, cols: i64 },
    #[error("Seed File Malformed Error: Invalid mine count {count}")]
    MalformedMineCount { count: i64 },
    /// `col` is absent when the row was already out of bounds.
    #[error(
        "Seed File Malformed Error: Mine Coordinate Out of Bounds! {}",
        mine_coords(.row, .col)
    )]
    MalformedMinePosition { row: i64, col: Option<i64> },
    #[error("Seed File Malformed Error: Missing Value")]
    MissingValue,
    #[error("Seed File Malformed Error: Incorrect Datatype Detected ({token:?})")]
    WrongType { token: String },
}

impl SeedError {
    /// Process exit status reported for this failure.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 2,
            _ => 3,
        }
    }
}

fn mine_coords(row: &i64, col: &Option<i64>) -> String {
    match col {
        Some(col) => format!("({row}, {col})"),
        None => format!("(row {row})"),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("No command given")]
    Empty,
    #[error("Command not recognized: {0:?}")]
    UnrecognizedCommand(String),
    #[error("Malformed arguments for {command}: {reason}")]
    MalformedArguments {
        command: &'static str,
        reason: &'static str,
    },
}

/// Any recoverable failure while handling one line of input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Game(#[from] GameError),
}
