//! Error types for engine commands and square parsing.
//!
//! A [`Rejection`] is the normal answer to an illegal command: the command is
//! refused and the engine state is left exactly as it was.

use crate::board::{Color, Square};

/// Why the engine refused a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The square holds no piece
    #[error("no piece on {0}")]
    NoPiece(Square),

    /// The piece belongs to the player not on move
    #[error("piece on {0} belongs to {1}")]
    NotYourPiece(Square, Color),

    /// Another piece has a capture, and captures are mandatory
    #[error("piece on {0} cannot capture while a capture is available")]
    CaptureRequired(Square),

    /// A chained capture is in progress with another piece
    #[error("piece on {0} must continue capturing")]
    MustContinueCapture(Square),

    /// A destination was given with no piece selected
    #[error("no piece selected")]
    NothingSelected,

    /// Light cells never hold or receive pieces
    #[error("{0} is a light square")]
    LightSquare(Square),

    /// The cell is not among the selected piece's destinations
    #[error("{0} is not a legal destination")]
    IllegalDestination(Square),
}

/// A square that could not be read as `row,col`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square `{0}`: expected `row,col` with values 0-7")]
pub struct ParseSquareError(pub String);
