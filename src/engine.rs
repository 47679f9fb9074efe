//! Main AI engine for Ultimate Tic-Tac-Toe
//!
//! The engine keeps its own copy of the game, updated move by move so that it
//! mirrors the game being displayed or played elsewhere. Searching plays and
//! undoes candidate moves on that private copy only, so callers never see the
//! intermediate positions.
//!
//! # Example
//!
//! ```
//! use uttt::{AIEngine, Action};
//!
//! // Use a shallow depth for a fast example
//! let mut engine = AIEngine::with_config(2, 1);
//! engine.update_state(Action::new(1, 2, 0, 2)).unwrap();
//! engine.update_state(Action::new(0, 2, 1, 2)).unwrap();
//!
//! let result = engine.get_move_with_stats().unwrap();
//! println!("Best move: {}", result.action);
//! println!("Value: {:.3}", result.value);
//! println!("Nodes: {}", result.stats.nodes);
//! ```

use std::time::Instant;

use tracing::{debug, trace};

use crate::board::{Action, SuperBoard};
use crate::error::{Error, Result};
use crate::eval::evaluate;
use crate::search::{search_parallel, SearchResult, SearchStats, Searcher};

/// Search depth used by [`AIEngine::new`], in plies
pub const DEFAULT_SEARCH_DEPTH: usize = 5;

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched below the current position by
    /// [`AIEngine::get_move`]; 0 is treated as 1 so a move is always chosen
    pub search_depth: usize,
    /// Worker threads for the root search; 1 searches on the calling thread
    pub threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            threads: 1,
        }
    }
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Chosen move
    pub action: Action,
    /// Value of the position for the mover, in `[-1, 1]`
    pub value: f64,
    /// Depth searched
    pub depth: usize,
    /// Node counts and cutoffs
    pub stats: SearchStats,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            action: result.action,
            value: result.value,
            depth: result.depth,
            stats: result.stats,
            time_ms,
        }
    }
}

/// Minimax engine with alpha-beta pruning.
///
/// # Example
///
/// ```
/// use uttt::{AIEngine, Action, Error};
///
/// let mut engine = AIEngine::with_config(1, 1);
/// engine.update_state(Action::new(1, 2, 0, 2)).unwrap();
/// engine.update_state(Action::new(0, 2, 1, 2)).unwrap();
/// assert_eq!(engine.get_move().unwrap(), Action::new(1, 2, 0, 0));
///
/// // Moves outside the required sub-board are rejected
/// assert!(matches!(
///     engine.update_state(Action::new(0, 0, 0, 0)),
///     Err(Error::InvalidMove { .. })
/// ));
/// ```
pub struct AIEngine {
    /// Private mirror of the game, also used as the search board
    state: SuperBoard,
    searcher: Searcher,
    search_depth: usize,
    threads: usize,
    last_stats: SearchStats,
}

impl AIEngine {
    /// Create an engine on an empty board with the default configuration
    /// (depth 5, single thread).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `search_depth` - Plies searched by [`get_move`](Self::get_move) (0 is treated as 1)
    /// * `threads` - Worker threads for the root search (0 is treated as 1)
    #[must_use]
    pub fn with_config(search_depth: usize, threads: usize) -> Self {
        Self::from_config(EngineConfig {
            search_depth,
            threads,
        })
    }

    #[must_use]
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            state: SuperBoard::new(),
            searcher: Searcher::new(),
            search_depth: config.search_depth.max(1),
            threads: config.threads.max(1),
            last_stats: SearchStats::default(),
        }
    }

    /// Current settings
    #[must_use]
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            search_depth: self.search_depth,
            threads: self.threads,
        }
    }

    /// Get the best move for the player to move in the engine's state.
    ///
    /// Use [`get_move_with_stats`](Self::get_move_with_stats) for the value
    /// and node counts as well.
    ///
    /// # Errors
    ///
    /// [`Error::NoLegalMoves`] if the game is already complete.
    pub fn get_move(&mut self) -> Result<Action> {
        self.get_move_with_stats().map(|result| result.action)
    }

    /// Get the best move with detailed search statistics.
    ///
    /// Searches `search_depth` plies with the full `(-1, 1)` window. The engine's state is the same
    /// afterwards as before.
    pub fn get_move_with_stats(&mut self) -> Result<MoveResult> {
        if self.state.is_complete() {
            return Err(Error::NoLegalMoves);
        }

        let start = Instant::now();
        let result = if self.threads > 1 {
            search_parallel(&self.state, self.search_depth, self.threads)?
        } else {
            self.searcher.search_root(&mut self.state, self.search_depth)?
        };
        self.last_stats = result.stats;
        let time_ms = start.elapsed().as_millis() as u64;

        debug!(
            player = %self.state.current_player(),
            action = %result.action,
            value = result.value,
            depth = result.depth,
            nodes = result.stats.nodes,
            beta_cutoffs = result.stats.beta_cutoffs,
            time_ms,
            "engine chose move"
        );
        Ok(MoveResult::from_search(result, time_ms))
    }

    /// Apply a move made in the mirrored game
    pub fn update_state(&mut self, action: Action) -> Result<()> {
        self.state.play_move(action)?;
        trace!(%action, moves = self.state.move_count(), "engine state updated");
        Ok(())
    }

    /// Undo the last move applied to the engine's state
    pub fn reverse_state(&mut self) -> Result<Action> {
        let action = self.state.reverse_action()?;
        trace!(%action, moves = self.state.move_count(), "engine state reversed");
        Ok(action)
    }

    /// Return the engine's state to an empty board
    pub fn reset_state(&mut self) {
        self.state = SuperBoard::new();
        trace!("engine state reset");
    }

    /// Read-only view of the engine's state
    #[inline]
    pub fn state(&self) -> &SuperBoard {
        &self.state
    }

    /// Set the plies searched by [`get_move`](Self::get_move) (0 is treated as 1)
    pub fn set_search_depth(&mut self, depth: usize) {
        self.search_depth = depth.max(1);
    }

    #[inline]
    #[must_use]
    pub fn search_depth(&self) -> usize {
        self.search_depth
    }

    /// Set the worker thread count for the root search (0 is treated as 1)
    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads.max(1);
    }

    #[inline]
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Heuristic value of the engine's state for the player to move, in `(-1, 1)`
    #[must_use]
    pub fn evaluate_state(&self) -> f64 {
        evaluate(&self.state)
    }

    /// Run the alpha-beta search on the engine's state with an explicit window.
    ///
    /// Returns the sentinel action for finished games and for depth 0. See
    /// [`Searcher::search`] for the exact contract.
    pub fn evaluate_state_with_search(
        &mut self,
        alpha: f64,
        beta: f64,
        depth: usize,
    ) -> Result<(Action, f64)> {
        self.searcher.reset_stats();
        let outcome = self.searcher.search(&mut self.state, alpha, beta, depth);
        self.last_stats = *self.searcher.stats();
        outcome
    }

    /// Statistics from the most recent search, threaded or not
    #[inline]
    pub fn last_search_stats(&self) -> &SearchStats {
        &self.last_stats
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Player, WinState};
    use crate::search::FULL_WINDOW;

    const EPSILON: f64 = 1e-9;

    /// Ends in a tie; prefixes of it give early, middle and late positions
    const TIE_GAME: [(usize, usize, usize, usize); 52] = [
        (2, 0, 1, 2),
        (1, 2, 0, 2),
        (0, 2, 1, 2),
        (1, 2, 2, 2),
        (2, 2, 1, 2),
        (1, 2, 1, 2),
        (1, 0, 0, 2),
        (0, 2, 2, 2),
        (2, 2, 0, 0),
        (0, 0, 1, 2),
        (1, 1, 2, 2),
        (2, 2, 2, 1),
        (2, 1, 0, 0),
        (0, 0, 0, 0),
        (0, 0, 1, 1),
        (1, 1, 1, 0),
        (1, 0, 1, 2),
        (1, 0, 1, 1),
        (1, 1, 1, 2),
        (0, 1, 1, 1),
        (1, 1, 2, 1),
        (2, 1, 1, 2),
        (0, 2, 1, 0),
        (1, 0, 2, 1),
        (2, 1, 1, 1),
        (1, 1, 0, 2),
        (0, 2, 1, 1),
        (1, 1, 2, 0),
        (2, 0, 0, 1),
        (0, 1, 0, 0),
        (0, 0, 2, 1),
        (2, 1, 0, 2),
        (0, 1, 2, 0),
        (2, 0, 1, 0),
        (1, 0, 2, 2),
        (2, 2, 0, 2),
        (2, 2, 0, 1),
        (0, 1, 2, 1),
        (2, 1, 0, 1),
        (0, 1, 2, 2),
        (2, 2, 1, 0),
        (1, 1, 0, 0),
        (0, 0, 2, 0),
        (2, 0, 2, 1),
        (2, 1, 2, 1),
        (2, 2, 1, 1),
        (2, 2, 2, 2),
        (2, 2, 2, 0),
        (2, 0, 2, 0),
        (2, 0, 0, 0),
        (0, 0, 0, 1),
        (2, 0, 1, 1),
    ];

    fn engine_after(moves: &[(usize, usize, usize, usize)], depth: usize) -> AIEngine {
        let mut engine = AIEngine::with_config(depth, 1);
        for &(a, b, c, d) in moves {
            engine.update_state(Action::new(a, b, c, d)).unwrap();
        }
        engine
    }

    fn squashed(raw: f64) -> f64 {
        (raw * 0.6).tanh()
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.search_depth(), DEFAULT_SEARCH_DEPTH);
        assert_eq!(engine.threads(), 1);
        assert_eq!(engine.state(), &SuperBoard::new());
    }

    #[test]
    fn test_engine_with_config() {
        let engine = AIEngine::with_config(3, 0);
        assert_eq!(
            engine.config(),
            EngineConfig {
                search_depth: 3,
                threads: 1
            }
        );
    }

    #[test]
    fn test_set_search_depth() {
        let mut engine = AIEngine::new();
        engine.set_search_depth(1);
        assert_eq!(engine.search_depth(), 1);
        engine.set_search_depth(0);
        assert_eq!(engine.search_depth(), 1);
        engine.set_threads(4);
        assert_eq!(engine.threads(), 4);
    }

    #[test]
    fn test_get_move_searches_at_least_one_ply() {
        let mut engine = engine_after(&[(1, 2, 0, 2), (0, 2, 1, 2)], 0);
        assert_eq!(engine.config().search_depth, 1);
        let result = engine.get_move_with_stats().unwrap();
        assert_eq!(result.action, Action::new(1, 2, 0, 0));
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_get_move_early_game_player_one() {
        let mut engine = engine_after(&[(1, 2, 0, 2), (0, 2, 1, 2)], 1);
        assert_eq!(engine.get_move().unwrap(), Action::new(1, 2, 0, 0));
    }

    #[test]
    fn test_get_move_early_game_player_two() {
        let mut engine = engine_after(&[(1, 2, 0, 2), (0, 2, 1, 2), (1, 2, 2, 2)], 1);
        assert_eq!(engine.state().current_player(), Player::Two);
        assert_eq!(engine.get_move().unwrap(), Action::new(2, 2, 0, 0));
    }

    #[test]
    fn test_get_move_mid_game() {
        let mut engine = engine_after(&TIE_GAME[..18], 1);
        assert_eq!(engine.get_move().unwrap(), Action::new(1, 1, 0, 0));
    }

    #[test]
    fn test_get_move_late_game() {
        let mut engine = engine_after(&TIE_GAME[..52], 1);
        assert_eq!(engine.get_move().unwrap(), Action::new(2, 0, 0, 2));

        let mut engine = engine_after(&TIE_GAME[..51], 1);
        assert_eq!(engine.state().current_player(), Player::Two);
        assert_eq!(engine.get_move().unwrap(), Action::new(2, 0, 0, 2));
    }

    #[test]
    fn test_get_move_leaves_state_unchanged() {
        let mut engine = engine_after(&TIE_GAME[..18], 3);
        let before = engine.state().clone();
        engine.get_move().unwrap();
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_get_move_on_finished_game() {
        let mut engine = engine_after(
            &[
                (1, 2, 0, 2),
                (0, 2, 1, 2),
                (1, 2, 2, 2),
                (2, 2, 1, 2),
                (1, 2, 1, 2),
                (0, 0, 1, 1),
                (1, 1, 1, 0),
                (1, 0, 1, 1),
                (1, 1, 1, 2),
                (2, 0, 1, 1),
                (1, 1, 1, 1),
                (2, 1, 1, 0),
                (1, 0, 0, 0),
                (0, 0, 1, 0),
                (1, 0, 0, 1),
                (0, 1, 1, 0),
                (1, 0, 0, 2),
            ],
            1,
        );
        assert_eq!(engine.state().winner(), WinState::PlayerOneWin);
        assert_eq!(engine.get_move(), Err(Error::NoLegalMoves));
    }

    #[test]
    fn test_get_move_with_stats() {
        let mut engine = engine_after(&[(1, 2, 0, 2), (0, 2, 1, 2)], 1);
        let result = engine.get_move_with_stats().unwrap();
        assert_eq!(result.action, Action::new(1, 2, 0, 0));
        assert!((result.value - squashed(0.4)).abs() < EPSILON);
        assert_eq!(result.depth, 1);
        assert_eq!(result.stats.nodes, 9);
        assert_eq!(engine.last_search_stats().nodes, 9);
    }

    #[test]
    fn test_threaded_engine_agrees() {
        let mut single = engine_after(&TIE_GAME[..19], 2);
        let mut threaded = engine_after(&TIE_GAME[..19], 2);
        threaded.set_threads(4);

        let a = single.get_move_with_stats().unwrap();
        let b = threaded.get_move_with_stats().unwrap();
        assert_eq!(a.action, b.action);
        assert!((a.value - b.value).abs() < EPSILON);
        assert_eq!(threaded.state(), single.state());
        assert_eq!(single.last_search_stats(), &a.stats);
        assert_eq!(threaded.last_search_stats(), &b.stats);
    }

    #[test]
    fn test_last_search_stats_follow_threaded_search() {
        let mut engine = engine_after(&[(1, 2, 0, 2), (0, 2, 1, 2)], 1);
        engine.get_move().unwrap();
        assert_eq!(engine.last_search_stats().nodes, 9);

        engine.set_search_depth(2);
        engine.set_threads(3);
        let result = engine.get_move_with_stats().unwrap();
        assert!(result.stats.nodes > 9);
        assert_eq!(engine.last_search_stats(), &result.stats);
    }

    #[test]
    fn test_update_state_rejects_invalid_move() {
        let mut engine = engine_after(&[(1, 2, 0, 2)], 1);
        let before = engine.state().clone();
        assert!(matches!(
            engine.update_state(Action::new(1, 2, 0, 0)),
            Err(Error::InvalidMove { .. })
        ));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_reverse_and_reset_state() {
        let mut engine = engine_after(&[(1, 2, 0, 2), (0, 2, 1, 2)], 1);
        assert_eq!(engine.reverse_state(), Ok(Action::new(0, 2, 1, 2)));
        assert_eq!(engine.state().move_count(), 1);

        engine.reset_state();
        assert_eq!(engine.state(), &SuperBoard::new());
        assert_eq!(engine.reverse_state(), Err(Error::EmptyHistory));
    }

    #[test]
    fn test_evaluate_state() {
        assert!(AIEngine::new().evaluate_state().abs() < EPSILON);

        let engine = engine_after(&TIE_GAME[..18], 1);
        assert!((engine.evaluate_state() - squashed(-1.9)).abs() < EPSILON);

        let engine = engine_after(&TIE_GAME[..17], 1);
        assert!((engine.evaluate_state() - squashed(1.5)).abs() < EPSILON);

        let engine = engine_after(&TIE_GAME[..52], 1);
        assert!((engine.evaluate_state() - squashed(2.3)).abs() < EPSILON);
    }

    #[test]
    fn test_evaluate_state_with_search() {
        let mut engine = engine_after(&TIE_GAME[..51], 1);
        let (action, value) = engine
            .evaluate_state_with_search(FULL_WINDOW.0, FULL_WINDOW.1, 1)
            .unwrap();
        assert_eq!(action, Action::new(2, 0, 0, 2));
        assert!((value - squashed(-2.0)).abs() < EPSILON);

        let (action, value) = engine
            .evaluate_state_with_search(FULL_WINDOW.0, FULL_WINDOW.1, 0)
            .unwrap();
        assert_eq!(action, Action::SENTINEL);
        assert!((value - squashed(-2.3)).abs() < EPSILON);
    }
}
