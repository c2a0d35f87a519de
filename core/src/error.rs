use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board must have an even number of cells")]
    OddCellCount,
    #[error("Not enough icons, board needs {needed} but only {available} are available")]
    NotEnoughIcons {
        needed: CellCount,
        available: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Every icon must appear exactly twice")]
    UnpairedIcon,
    #[error("Tile size, gap or margins of the layout out of range")]
    InvalidLayout,
    #[error("Reveal state does not agree with the board")]
    InconsistentSession,
}

pub type Result<T> = core::result::Result<T, GameError>;
