//! Ultimate Tic-Tac-Toe game state and minimax AI engine
//!
//! Nine tic-tac-toe sub-boards sit in an outer 3x3 board:
//! - Winning a sub-board claims that cell of the outer board
//! - Three claimed sub-boards in a line win the game
//! - The cell a player marks decides which sub-board the opponent plays in
//!   next, unless that sub-board is already complete
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Sub-boards, the outer board and reversible move history
//! - [`rules`]: Win detection shared by both board levels
//! - [`eval`]: Heuristic evaluation of unfinished positions
//! - [`search`]: Negamax search with alpha-beta pruning
//! - [`engine`]: AI engine that mirrors a game and picks moves
//!
//! # Quick Start
//!
//! ```
//! use uttt::{AIEngine, Action, SuperBoard};
//!
//! let mut board = SuperBoard::new();
//! let mut engine = AIEngine::with_config(2, 1);
//!
//! // Player One opens; the engine follows along and answers as Player Two
//! let opening = Action::new(1, 1, 0, 2);
//! board.play_move(opening).unwrap();
//! engine.update_state(opening).unwrap();
//!
//! let reply = engine.get_move().unwrap();
//! assert_eq!(reply.outer(), (0, 2));
//! board.play_move(reply).unwrap();
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Action, Cell, MoveGuard, Player, SubBoard, SuperBoard, WinState, BOARD_SIZE};
pub use engine::{AIEngine, EngineConfig, MoveResult, DEFAULT_SEARCH_DEPTH};
pub use error::{Error, MoveViolation, Result};
