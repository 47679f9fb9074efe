//! Search module for the Ultimate Tic-Tac-Toe AI
//!
//! Contains:
//! - Negamax search with alpha-beta pruning
//! - Root-split parallel search over scoped threads

pub mod alphabeta;

pub use alphabeta::{
    end_of_game_value, search_parallel, SearchResult, SearchStats, Searcher, FULL_WINDOW, LOSS, TIE,
    WIN,
};
