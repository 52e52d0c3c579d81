//! Error type shared by the parsing and command surfaces.

/// Errors that can occur when feeding text or commands into the rules engine.
///
/// Rule queries (attack tests, move generation, termination) never fail;
/// only input that has to be interpreted can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no moves to undo")]
    NothingToUndo,
}

impl ChessError {
    pub(crate) fn fen(reason: impl Into<String>) -> Self {
        ChessError::InvalidFen(reason.into())
    }
}
