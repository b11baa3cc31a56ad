use thiserror::Error;

use crate::{CellCount, CellIndex};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell index {index} is outside the board of {total} cells")]
    InvalidIndex { index: CellIndex, total: CellCount },
    #[error("Too many mines: {mines} requested but the board only has {total} cells")]
    TooManyMines { mines: CellCount, total: CellCount },
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;
