//! Error types for the Ultimate Tic-Tac-Toe engine

use thiserror::Error;

use crate::board::Action;

/// The legality rule a rejected move broke.
///
/// Variants are listed in the order the checks run: outer-board rules first,
/// then the targeted sub-board's own rules.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveViolation {
    #[error("sub-board indices are out of bounds")]
    OuterOutOfBounds,

    #[error("move must be played in sub-board ({row}, {col})")]
    NotInRequiredSubBoard { row: usize, col: usize },

    #[error("game is complete and no more moves can be made")]
    GameComplete,

    #[error("cell indices within the sub-board are out of bounds")]
    InnerOutOfBounds,

    #[error("cell is already filled")]
    CellOccupied,

    #[error("sub-board is complete and no more moves can be made on it")]
    SubBoardComplete,
}

/// Main error type for the engine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move {action}: {reason}")]
    InvalidMove {
        action: Action,
        reason: MoveViolation,
    },

    #[error("there are no moves to reverse")]
    EmptyHistory,

    #[error("game is complete, so there are no legal moves to make")]
    NoLegalMoves,
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_message_names_action_and_reason() {
        let err = Error::InvalidMove {
            action: Action::new(2, 2, 0, 2),
            reason: MoveViolation::NotInRequiredSubBoard { row: 1, col: 2 },
        };
        assert_eq!(
            err.to_string(),
            "invalid move (2, 2, 0, 2): move must be played in sub-board (1, 2)"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::EmptyHistory.to_string(), "there are no moves to reverse");
        assert!(Error::NoLegalMoves.to_string().contains("no legal moves"));
    }
}
