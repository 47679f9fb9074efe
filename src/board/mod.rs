//! Board representation for Ultimate Tic-Tac-Toe

pub mod guard;
pub mod sub_board;
pub mod super_board;


use std::fmt;
use std::str::FromStr;

// Re-exports
pub use guard::MoveGuard;
pub use sub_board::SubBoard;
pub use super_board::{MoveRecord, SuperBoard};

/// Side length of both the outer board and each sub-board (3x3)
pub const BOARD_SIZE: usize = 3;

/// A 3x3 grid, used for cells within a sub-board and sub-boards within the outer board
pub type Grid<T> = [[T; BOARD_SIZE]; BOARD_SIZE];

/// The two players. Player One always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The win state meaning "this player won"
    #[inline]
    pub fn win_state(self) -> WinState {
        match self {
            Player::One => WinState::PlayerOneWin,
            Player::Two => WinState::PlayerTwoWin,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => f.pad("Player One"),
            Player::Two => f.pad("Player Two"),
        }
    }
}

/// Outcome of a cell, sub-board or the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinState {
    PlayerOneWin,
    PlayerTwoWin,
    Tie,
    InProgress,
}

impl WinState {
    /// The winning player, if any
    #[inline]
    pub fn winner(self) -> Option<Player> {
        match self {
            WinState::PlayerOneWin => Some(Player::One),
            WinState::PlayerTwoWin => Some(Player::Two),
            WinState::Tie | WinState::InProgress => None,
        }
    }
}

/// A single cell of a sub-board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Player),
}

impl Cell {
    /// `PlayerOneWin`/`PlayerTwoWin` for a marked cell, `InProgress` for an empty one.
    ///
    /// Lets a cell stand in for a sub-board in the shared line checks.
    #[inline]
    pub fn winner(self) -> WinState {
        match self {
            Cell::Empty => WinState::InProgress,
            Cell::Marked(player) => player.win_state(),
        }
    }

    /// True iff the cell holds a mark
    #[inline]
    pub fn is_complete(self) -> bool {
        self != Cell::Empty
    }
}

/// A move: which sub-board (outer row/col) and which cell inside it (inner row/col).
///
/// The derived ordering is lexicographic over
/// `(outer_row, outer_col, inner_row, inner_col)`, which is also the order
/// legal moves are generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action {
    pub outer_row: usize,
    pub outer_col: usize,
    pub inner_row: usize,
    pub inner_col: usize,
}

impl Action {
    /// "No actual move", returned by searches that only produce a value
    pub const SENTINEL: Action = Action {
        outer_row: BOARD_SIZE,
        outer_col: BOARD_SIZE,
        inner_row: BOARD_SIZE,
        inner_col: BOARD_SIZE,
    };

    #[inline]
    pub const fn new(outer_row: usize, outer_col: usize, inner_row: usize, inner_col: usize) -> Self {
        Self {
            outer_row,
            outer_col,
            inner_row,
            inner_col,
        }
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    /// Outer board coordinates of the targeted sub-board
    #[inline]
    pub fn outer(self) -> (usize, usize) {
        (self.outer_row, self.outer_col)
    }

    /// Cell coordinates inside the targeted sub-board
    #[inline]
    pub fn inner(self) -> (usize, usize) {
        (self.inner_row, self.inner_col)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.outer_row, self.outer_col, self.inner_row, self.inner_col
        )
    }
}

/// Failure to parse an [`Action`] from `r,c,r,c` text
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("expected four comma-separated coordinates like '1,2,0,2', got '{0}'")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<usize> = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseActionError(s.to_string()))?;

        match fields.as_slice() {
            &[outer_row, outer_col, inner_row, inner_col] => {
                Ok(Action::new(outer_row, outer_col, inner_row, inner_col))
            }
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}
