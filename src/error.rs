//! Error type shared by board construction, parsing and the search driver.
//!
//! Running out of states to explore is not an error; see
//! [`SearchOutcome::NoSolution`](crate::solver::SearchOutcome::NoSolution).

use thiserror::Error;

/// Failures caused by malformed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The number of tiles does not describe a supported square board.
    #[error("{len} tiles cannot form a square board with side {side} (supported sides: 1..={max_side})")]
    InvalidSize {
        len: usize,
        side: usize,
        max_side: usize,
    },

    /// The tile values are not `0..side*side` exactly once each.
    #[error("Tile values must be 0..{area} exactly once each: {reason}")]
    InvalidPermutation { area: usize, reason: String },

    /// No cell holds the blank value.
    #[error("Board has no blank cell")]
    MissingBlank,

    /// A token in a textual board could not be read as a tile value.
    #[error("Cannot read tile '{token}' at position {position}")]
    InvalidToken { token: String, position: usize },
}
