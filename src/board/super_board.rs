//! The outer board: nine sub-boards, turn order, the required-sub-board rule
//! and a move history that makes every move exactly reversible

use super::guard::MoveGuard;
use super::{Action, Grid, Player, SubBoard, WinState, BOARD_SIZE};
use crate::error::{Error, MoveViolation, Result};
use crate::rules::grid_winner;

/// One applied move, as stored in the history.
///
/// The required sub-board *after* undoing a move is always the move's own
/// outer coordinates when a constraint existed, so only the flag is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub action: Action,
    /// Whether the mover was restricted to a sub-board when playing this move
    pub required_existed: bool,
}

/// Game board with move history for undo
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuperBoard {
    sub_boards: Grid<SubBoard>,
    current_player: Player,
    /// Sub-board the current player must play in, if restricted
    required: Option<(usize, usize)>,
    history: Vec<MoveRecord>,
}

impl SuperBoard {
    /// Create an empty board with Player One to move and no required sub-board
    pub fn new() -> Self {
        Self {
            sub_boards: [[SubBoard::new(); BOARD_SIZE]; BOARD_SIZE],
            current_player: Player::One,
            required: None,
            history: Vec::with_capacity(BOARD_SIZE.pow(4)),
        }
    }

    /// Read-only view of the sub-boards, indexed `[outer_row][outer_col]`
    #[inline]
    pub fn sub_boards(&self) -> &Grid<SubBoard> {
        &self.sub_boards
    }

    /// Get the sub-board at outer coordinates, or `None` when out of bounds
    #[inline]
    pub fn sub_board(&self, row: usize, col: usize) -> Option<&SubBoard> {
        self.sub_boards.get(row)?.get(col)
    }

    /// Player whose turn it is
    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The sub-board the current player is restricted to, if any
    #[inline]
    pub fn next_required_sub_board(&self) -> Option<(usize, usize)> {
        self.required
    }

    /// True iff the current player is restricted to one sub-board
    #[inline]
    pub fn next_required_sub_board_exists(&self) -> bool {
        self.required.is_some()
    }

    /// Applied moves, oldest first
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Number of moves currently applied
    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Make a move for the current player.
    ///
    /// Invalid moves are rejected without touching the board. On success the
    /// opponent is sent to the sub-board matching the inner coordinates,
    /// unless that sub-board is already complete, in which case they may play
    /// anywhere.
    pub fn play_move(&mut self, action: Action) -> Result<()> {
        self.require_valid_move(action)?;

        self.sub_boards[action.outer_row][action.outer_col]
            .play_move(action, self.current_player)?;
        self.history.push(MoveRecord {
            action,
            required_existed: self.required.is_some(),
        });

        let (next_row, next_col) = action.inner();
        self.required = if self.sub_boards[next_row][next_col].is_complete() {
            None
        } else {
            Some((next_row, next_col))
        };
        self.current_player = self.current_player.opponent();
        Ok(())
    }

    /// Play a move and get a guard that reverses it when dropped
    pub fn apply(&mut self, action: Action) -> Result<MoveGuard<'_>> {
        self.play_move(action)?;
        Ok(MoveGuard::new(self))
    }

    /// Undo the most recent move, restoring the exact previous state.
    ///
    /// Returns the action that was undone.
    pub fn reverse_action(&mut self) -> Result<Action> {
        let record = self.history.pop().ok_or(Error::EmptyHistory)?;
        let action = record.action;

        self.sub_boards[action.outer_row][action.outer_col].clear(action.inner_row, action.inner_col);
        self.required = record.required_existed.then_some(action.outer());
        self.current_player = self.current_player.opponent();
        Ok(action)
    }

    /// True iff [`require_valid_move`](Self::require_valid_move) would succeed
    #[inline]
    pub fn is_valid_move(&self, action: Action) -> bool {
        self.violation(action).is_none()
    }

    /// Reject an illegal move. Checks run in this order:
    ///
    /// 1. The outer coordinates are out of bounds.
    /// 2. A sub-board is required and the move is elsewhere.
    /// 3. The game is already complete.
    /// 4. The targeted sub-board rejects the move (out of bounds, filled
    ///    cell, or completed sub-board).
    pub fn require_valid_move(&self, action: Action) -> Result<()> {
        match self.violation(action) {
            Some(reason) => Err(Error::InvalidMove { action, reason }),
            None => Ok(()),
        }
    }

    fn violation(&self, action: Action) -> Option<MoveViolation> {
        let (row, col) = action.outer();
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Some(MoveViolation::OuterOutOfBounds);
        }
        if let Some((req_row, req_col)) = self.required {
            if (row, col) != (req_row, req_col) {
                return Some(MoveViolation::NotInRequiredSubBoard {
                    row: req_row,
                    col: req_col,
                });
            }
        }
        if self.is_complete() {
            return Some(MoveViolation::GameComplete);
        }
        self.sub_boards[row][col].violation(action)
    }

    /// All legal moves in ascending `(outer_row, outer_col, inner_row, inner_col)` order.
    ///
    /// Empty once the game is complete.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_complete() {
            return Vec::new();
        }

        let outer: Vec<(usize, usize)> = match self.required {
            Some(required) => vec![required],
            None => (0..BOARD_SIZE)
                .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
                .collect(),
        };

        let mut actions = Vec::with_capacity(BOARD_SIZE.pow(4));
        for (outer_row, outer_col) in outer {
            let sub_board = &self.sub_boards[outer_row][outer_col];
            if sub_board.is_complete() {
                continue;
            }
            actions.extend(
                sub_board
                    .empty_cells()
                    .map(|(inner_row, inner_col)| Action::new(outer_row, outer_col, inner_row, inner_col)),
            );
        }
        actions
    }

    /// Win state of the whole game, treating each sub-board's win state as its mark
    #[inline]
    pub fn winner(&self) -> WinState {
        grid_winner(&self.sub_boards)
    }

    /// Won or tied; no more moves may be made
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.winner() != WinState::InProgress
    }
}

impl Default for SuperBoard {
    fn default() -> Self {
        Self::new()
    }
}
