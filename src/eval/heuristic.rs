//! Heuristic evaluation function for non-terminal positions
//!
//! Each player's standing is the sum, over the nine sub-boards, of
//! - how close the player is to winning that sub-board (best open line), times
//! - how many outer lines through that sub-board the player could still win.
//!
//! The result is the mover's standing minus the opponent's, squashed into
//! `(-1, 1)` so it stays strictly inside the exact win/loss values.

use crate::board::{Cell, Player, SubBoard, SuperBoard, BOARD_SIZE};
use crate::rules::LINES;

use super::patterns::{line_score, rescale, WinChance};

/// Evaluate the board from the perspective of the player to move.
///
/// Positive values favor the mover. The result lies in `(-1, 1)`; with
/// extreme inputs `tanh` can round to the closed bounds.
#[must_use]
pub fn evaluate(board: &SuperBoard) -> f64 {
    let mover = board.current_player();
    rescale(player_value(board, mover) - player_value(board, mover.opponent()))
}

/// Unscaled standing of `player`: sum of win-chance × open outer line count
#[must_use]
pub fn player_value(board: &SuperBoard, player: Player) -> f64 {
    let mut total = 0.0;
    for (row, sub_boards) in board.sub_boards().iter().enumerate() {
        for (col, sub_board) in sub_boards.iter().enumerate() {
            total += win_chance(sub_board, player) * open_outer_lines(board, row, col, player) as f64;
        }
    }
    total
}

/// Best line score for `player` within one sub-board.
///
/// A line is blocked once the opponent marks any of its cells; otherwise it
/// scores by the number of the player's marks on it.
#[must_use]
pub fn win_chance(sub_board: &SubBoard, player: Player) -> f64 {
    let own = Cell::Marked(player);
    let theirs = Cell::Marked(player.opponent());
    let cells = sub_board.cells();

    LINES
        .iter()
        .map(|line| {
            if line.iter().any(|&(r, c)| cells[r][c] == theirs) {
                WinChance::BLOCKED
            } else {
                line_score(line.iter().filter(|&&(r, c)| cells[r][c] == own).count())
            }
        })
        .fold(WinChance::BLOCKED, f64::max)
}

/// Number of outer lines through sub-board `(row, col)` on which the opponent
/// of `player` has not won any sub-board
#[must_use]
pub fn open_outer_lines(board: &SuperBoard, row: usize, col: usize, player: Player) -> usize {
    debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
    let blocker = player.opponent().win_state();
    let sub_boards = board.sub_boards();

    LINES
        .iter()
        .filter(|line| line.contains(&(row, col)))
        .filter(|line| line.iter().all(|&(r, c)| sub_boards[r][c].winner() != blocker))
        .count()
}
