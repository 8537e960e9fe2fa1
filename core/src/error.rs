use thiserror::Error;

use crate::CellIndex;

/// Rejection of a draw input.
///
/// Every variant is raised before any hashing work starts, so a failed call never
/// does partial computation.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("Client seed must not be empty")]
    EmptyClientSeed,
    #[error("Server seed must not be empty")]
    EmptyServerSeed,
    #[error("Nonce must not be negative")]
    NegativeNonce,
    #[error("Mine count must be between 1 and 24, got {0}")]
    MineCountOutOfRange(i64),
    #[error("Cell index {0} is outside the 5x5 grid")]
    InvalidCell(CellIndex),
    #[error("Cell index {0} appears more than once")]
    DuplicateCell(CellIndex),
}

pub type Result<T> = core::result::Result<T, DrawError>;
