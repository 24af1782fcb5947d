use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, requested {requested} but only {capacity} fit outside the safe zone")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Malformed share string: {0}")]
    Format(#[from] FormatError),
    #[error("Game has not started yet")]
    NotStarted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Probability inference did not settle after {passes} passes")]
    InferenceDiverged { passes: usize },
}

/// Reasons a share string cannot be decoded.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected 3 dash-separated fields, found {0}")]
    FieldCount(usize),
    #[error("width is not a positive integer")]
    InvalidWidth,
    #[error("elapsed seconds is not an integer")]
    InvalidSeconds,
    #[error("unknown tile symbol {0:?}")]
    InvalidSymbol(char),
    #[error("run length is not followed by a tile symbol")]
    DanglingRunLength,
    #[error("run length is zero or too large")]
    InvalidRunLength,
    #[error("{len} tiles do not fill rows of width {width}")]
    LengthMismatch { len: usize, width: usize },
    #[error("board of {height} rows is too tall")]
    TooTall { height: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
