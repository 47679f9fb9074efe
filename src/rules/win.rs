//! Win condition checking shared by sub-boards and the outer board
//!
//! Both levels of Ultimate Tic-Tac-Toe are a 3x3 grid of things that can be
//! won: cells inside a sub-board, and sub-boards inside the outer board. The
//! checks here work over any grid whose entries implement [`Completable`].
//!
//! Win conditions:
//! 1. Three entries won by the same player along a row, column or diagonal
//! 2. Otherwise a tie once every entry is complete

use crate::board::{Cell, Grid, Player, WinState, BOARD_SIZE};

/// Something with a win-state projection, so it can sit inside a 3x3 grid
/// that is itself checked for a winner.
pub trait Completable {
    fn winner(&self) -> WinState;

    /// No more moves can be made here
    fn is_complete(&self) -> bool {
        self.winner() != WinState::InProgress
    }
}

impl Completable for Cell {
    #[inline]
    fn winner(&self) -> WinState {
        Cell::winner(*self)
    }

    #[inline]
    fn is_complete(&self) -> bool {
        Cell::is_complete(*self)
    }
}

/// Every winning line of a 3x3 grid as `(row, col)` triples:
/// three rows, three columns, the main diagonal, then the anti-diagonal.
pub const LINES: [[(usize, usize); BOARD_SIZE]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Check if `player` holds all three entries of some line
pub fn has_line<T: Completable>(grid: &Grid<T>, player: Player) -> bool {
    let target = player.win_state();
    LINES
        .iter()
        .any(|line| line.iter().all(|&(r, c)| grid[r][c].winner() == target))
}

/// Winner of a 3x3 grid.
///
/// Player One's lines are checked before Player Two's; a tie requires every
/// entry to be complete with no line for either player.
pub fn grid_winner<T: Completable>(grid: &Grid<T>) -> WinState {
    if has_line(grid, Player::One) {
        WinState::PlayerOneWin
    } else if has_line(grid, Player::Two) {
        WinState::PlayerTwoWin
    } else if grid.iter().flatten().all(|entry| entry.is_complete()) {
        WinState::Tie
    } else {
        WinState::InProgress
    }
}
