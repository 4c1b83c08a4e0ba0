//! Križić-kružić game engine.
//!
//! Pure game logic for 3x3 tic-tac-toe with a computer opponent. Nothing here
//! draws or reads input; front-ends hold a [`Game`] and poll it.
//!
//! # Architecture
//!
//! - **Board**: squares, marking, terminal and draw detection, winning line
//! - **Agent**: random or exhaustive minimax move selection on board copies
//! - **Game**: a live session with turn order, game mode and reset
//! - **Config**: TOML-loadable session defaults
//!
//! # Example
//!
//! ```
//! use kruzic_engine::{Agent, Board, Coord, Player, SearchMode};
//!
//! let board: Board = "XX./OO./...".parse().unwrap();
//! let agent = Agent::new(SearchMode::Minimax, Player::X);
//! let decision = agent.choose_move(&board).unwrap();
//! assert_eq!(decision.coord(), &Coord::new(0, 2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod agent;
mod board;
mod config;
mod game;
mod types;

pub use agent::{Agent, AgentError, Decision, Evaluation, SearchMode};
pub use board::{Board, LineKind, ParseBoardError, WinningLine};
pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameError, GameMode, Turn, play_out};
pub use types::{Coord, GameStatus, ParseCoordError, Player, Square};
