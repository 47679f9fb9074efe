//! Static evaluation of Ultimate Tic-Tac-Toe positions
//!
//! The evaluation considers:
//! - Progress toward each sub-board (best open line)
//! - Outer lines still winnable through each sub-board

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, open_outer_lines, player_value, win_chance};
pub use patterns::{line_score, rescale, WinChance, RESCALING_FACTOR};
