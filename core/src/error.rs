use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("mine coordinates outside the grid")]
    InvalidCoords,
    #[error("too many mines for the grid size")]
    TooManyMines,
    #[error("input ended before the game finished")]
    InputClosed,
}

pub type Result<T> = core::result::Result<T, GameError>;
