//! Scoped move application

use std::ops::Deref;

use super::{Action, SuperBoard};
use crate::error::Result;

/// A move that has been played on a [`SuperBoard`] and is undone when the
/// guard goes out of scope.
///
/// Created by [`SuperBoard::apply`]. Dereferences to the board for read-only
/// inspection; further moves go through [`MoveGuard::apply`], which nests
/// another guard. The board cannot be mutated behind the guard's back:
///
/// ```compile_fail
/// use uttt::{Action, SuperBoard};
///
/// let mut board = SuperBoard::new();
/// let mut guard = board.apply(Action::new(1, 1, 0, 0)).unwrap();
/// guard.reverse_action().unwrap();
/// ```
#[must_use = "the move is reversed as soon as the guard is dropped"]
pub struct MoveGuard<'a> {
    board: &'a mut SuperBoard,
}

impl<'a> MoveGuard<'a> {
    pub(super) fn new(board: &'a mut SuperBoard) -> Self {
        Self { board }
    }

    /// Play a further move, reversed when the returned guard is dropped
    pub fn apply(&mut self, action: Action) -> Result<MoveGuard<'_>> {
        self.board.apply(action)
    }

    /// Board access for the searcher, which only plays and reverses in pairs
    pub(crate) fn board_mut(&mut self) -> &mut SuperBoard {
        self.board
    }
}

impl Deref for MoveGuard<'_> {
    type Target = SuperBoard;

    fn deref(&self) -> &SuperBoard {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        // The guard only exists after a successful play, so history is non-empty
        let reversed = self.board.reverse_action();
        debug_assert!(reversed.is_ok());
    }
}
