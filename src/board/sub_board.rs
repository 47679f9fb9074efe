//! A single 3x3 sub-board: a standard tic-tac-toe grid
//!
//! The outer board already validates moves before delegating here, but the
//! sub-board re-checks its own rules so it stays correct when used on its own.

use super::{Action, Cell, Grid, Player, WinState, BOARD_SIZE};
use crate::error::{Error, MoveViolation, Result};
use crate::rules::{grid_winner, Completable};

/// One of the nine tic-tac-toe grids inside the outer board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubBoard {
    cells: Grid<Cell>,
}

impl SubBoard {
    /// Create a sub-board with every cell empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the cells, indexed `[inner_row][inner_col]`
    #[inline]
    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    /// Get the cell at a position, or `None` when out of bounds
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Mark the cell addressed by the action's inner coordinates.
    ///
    /// The outer coordinates are ignored.
    pub fn play_move(&mut self, action: Action, player: Player) -> Result<()> {
        self.require_valid_move(action)?;
        self.cells[action.inner_row][action.inner_col] = Cell::Marked(player);
        Ok(())
    }

    /// True iff [`require_valid_move`](Self::require_valid_move) would succeed
    #[inline]
    pub fn is_valid_move(&self, action: Action) -> bool {
        self.violation(action).is_none()
    }

    /// Reject a move that is out of bounds, targets a filled cell, or lands on
    /// a completed sub-board (checked in that order).
    pub fn require_valid_move(&self, action: Action) -> Result<()> {
        match self.violation(action) {
            Some(reason) => Err(Error::InvalidMove { action, reason }),
            None => Ok(()),
        }
    }

    /// The first rule this move breaks, if any
    pub(crate) fn violation(&self, action: Action) -> Option<MoveViolation> {
        let (row, col) = action.inner();
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            Some(MoveViolation::InnerOutOfBounds)
        } else if self.cells[row][col].is_complete() {
            Some(MoveViolation::CellOccupied)
        } else if self.is_complete() {
            Some(MoveViolation::SubBoardComplete)
        } else {
            None
        }
    }

    /// Reset a cell to empty. Only used when reversing a move.
    #[inline]
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.cells[row][col] = Cell::Empty;
    }

    /// Win state of this sub-board
    #[inline]
    pub fn winner(&self) -> WinState {
        grid_winner(&self.cells)
    }

    /// Won or tied; no more moves may be made here
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.winner() != WinState::InProgress
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.cells[row][col] == Cell::Empty)
    }

    /// Number of marked cells
    pub fn mark_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_complete()).count()
    }
}

impl Completable for SubBoard {
    #[inline]
    fn winner(&self) -> WinState {
        SubBoard::winner(self)
    }
}
