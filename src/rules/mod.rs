//! Game rules for Ultimate Tic-Tac-Toe
//!
//! The legality checks live on [`SubBoard`](crate::board::SubBoard) and
//! [`SuperBoard`](crate::board::SuperBoard); this module holds the win
//! detection both of them share.

pub mod win;

// Re-exports for convenient access
pub use win::{grid_winner, has_line, Completable, LINES};
