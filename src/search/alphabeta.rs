//! Negamax search with alpha-beta pruning
//!
//! Every node returns a value from the perspective of its own mover, and the
//! caller negates it. Values live in `[-1, 1]`: exact `-1`/`0`/`+1` at
//! finished games and the squashed heuristic at the depth horizon.
//!
//! # Features
//!
//! - Candidates are tried in ascending action order, so the first of several
//!   equally good moves wins ties
//! - Every candidate is played on one board and undone through a
//!   [`MoveGuard`](crate::board::MoveGuard)
//! - **Root split**: the root's candidates can be shared out across scoped
//!   threads, each searching its share on a private copy of the board
//!
//! # Example
//!
//! ```
//! use uttt::board::SuperBoard;
//! use uttt::search::{Searcher, FULL_WINDOW};
//!
//! let mut board = SuperBoard::new();
//! let mut searcher = Searcher::new();
//!
//! let (action, value) = searcher.search(&mut board, FULL_WINDOW.0, FULL_WINDOW.1, 1).unwrap();
//! assert!(!action.is_sentinel());
//! assert!(value > -1.0 && value < 1.0);
//! ```

use std::thread;

use tracing::trace;

use crate::board::{Action, SuperBoard};
use crate::error::{Error, Result};
use crate::eval::evaluate;

/// Value of a finished game the mover has lost
pub const LOSS: f64 = -1.0;
/// Value of a finished game the mover has won
pub const WIN: f64 = 1.0;
/// Value of a tied game
pub const TIE: f64 = 0.0;

/// Loosest `(alpha, beta)` bounds, used at the root
pub const FULL_WINDOW: (f64, f64) = (LOSS, WIN);

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, including the root
    pub nodes: u64,
    /// Non-terminal nodes scored by the heuristic at the depth horizon
    pub leaf_evaluations: u64,
    /// Finished games reached during the search
    pub terminal_nodes: u64,
    /// Candidates whose value reached beta and pruned their siblings
    pub beta_cutoffs: u64,
}

impl SearchStats {
    /// Share of visited nodes that ended in a cutoff, as a percentage
    pub fn cutoff_rate(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.beta_cutoffs as f64 / self.nodes as f64 * 100.0
        }
    }

    /// Merge another stats into this one (for combining worker stats)
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.leaf_evaluations += other.leaf_evaluations;
        self.terminal_nodes += other.terminal_nodes;
        self.beta_cutoffs += other.beta_cutoffs;
    }
}

/// Search result containing the chosen action and associated statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Chosen action; the sentinel when the root was terminal or depth was 0
    pub action: Action,
    /// Value of the root from the mover's perspective
    pub value: f64,
    /// Depth searched
    pub depth: usize,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Exact value of a finished game for the player to move.
///
/// The player who just moved is the only one who can have completed a line,
/// so the mover never holds the win in practice.
pub fn end_of_game_value(board: &SuperBoard) -> f64 {
    match board.winner().winner() {
        Some(winner) if winner == board.current_player() => WIN,
        Some(_) => LOSS,
        None => TIE,
    }
}

/// Negamax alpha-beta searcher.
///
/// Holds only statistics; the board is borrowed for each search and comes
/// back in the state it was passed in.
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics accumulated since creation or the last reset
    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Search `depth` plies below `board` within the `(alpha, beta)` window.
    ///
    /// Returns the chosen action and the node's value:
    /// - finished game: the sentinel and the exact value
    /// - depth 0: the sentinel and the heuristic evaluation
    /// - otherwise: the first action to raise alpha and the final alpha, or
    ///   the first action reaching beta together with its value. When no
    ///   action beats the initial alpha, the first legal action and that
    ///   alpha are returned.
    pub fn search(
        &mut self,
        board: &mut SuperBoard,
        mut alpha: f64,
        beta: f64,
        depth: usize,
    ) -> Result<(Action, f64)> {
        self.stats.nodes += 1;

        if board.is_complete() {
            self.stats.terminal_nodes += 1;
            return Ok((Action::SENTINEL, end_of_game_value(board)));
        }
        if depth == 0 {
            self.stats.leaf_evaluations += 1;
            return Ok((Action::SENTINEL, evaluate(board)));
        }

        let actions = board.legal_actions();
        let Some(&first) = actions.first() else {
            return Err(Error::NoLegalMoves);
        };

        let mut best = first;
        for action in actions {
            let value = {
                let mut child = board.apply(action)?;
                -self.search(child.board_mut(), -beta, -alpha, depth - 1)?.1
            };

            if value > alpha {
                alpha = value;
                best = action;
            }
            if value >= beta {
                self.stats.beta_cutoffs += 1;
                return Ok((action, alpha));
            }
        }
        Ok((best, alpha))
    }

    /// Search from the root with the full window and package the result
    pub fn search_root(&mut self, board: &mut SuperBoard, depth: usize) -> Result<SearchResult> {
        self.reset_stats();
        let (action, value) = self.search(board, FULL_WINDOW.0, FULL_WINDOW.1, depth)?;
        Ok(SearchResult {
            action,
            value,
            depth,
            stats: self.stats,
        })
    }
}

/// Root search with the root's candidates split across `threads` workers.
///
/// Each worker searches its share of candidates on its own copy of the board
/// with the full window. Results are merged in candidate order, keeping the
/// first value that strictly beats the best so far, which picks the same
/// action and value as [`Searcher::search_root`]. Falls back to the
/// sequential search for one thread or when there is nothing to split.
pub fn search_parallel(board: &SuperBoard, depth: usize, threads: usize) -> Result<SearchResult> {
    let actions = board.legal_actions();
    if threads <= 1 || depth == 0 || actions.len() < 2 {
        return Searcher::new().search_root(&mut board.clone(), depth);
    }

    let chunk_size = actions.len().div_ceil(threads);
    let outcomes: Vec<Result<(Vec<(Action, f64)>, SearchStats)>> = thread::scope(|scope| {
        let handles: Vec<_> = actions
            .chunks(chunk_size)
            .enumerate()
            .map(|(worker_id, share)| {
                let mut work_board = board.clone();
                scope.spawn(move || -> Result<(Vec<(Action, f64)>, SearchStats)> {
                    let mut searcher = Searcher::new();
                    let mut values = Vec::with_capacity(share.len());
                    for &action in share {
                        let mut child = work_board.apply(action)?;
                        let (_, value) = searcher.search(
                            child.board_mut(),
                            -FULL_WINDOW.1,
                            -FULL_WINDOW.0,
                            depth - 1,
                        )?;
                        values.push((action, -value));
                    }
                    trace!(
                        worker_id,
                        candidates = share.len(),
                        nodes = searcher.stats.nodes,
                        "root worker finished"
                    );
                    Ok((values, searcher.stats))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut stats = SearchStats {
        nodes: 1,
        ..SearchStats::default()
    };
    let mut best = (actions[0], FULL_WINDOW.0);
    for outcome in outcomes {
        let (values, worker_stats) = outcome?;
        stats.merge(&worker_stats);
        for (action, value) in values {
            if value > best.1 {
                best = (action, value);
            }
        }
    }

    Ok(SearchResult {
        action: best.0,
        value: best.1,
        depth,
        stats,
    })
}
