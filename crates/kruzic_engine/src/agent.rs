//! Computer opponent: uniform random choice or exhaustive minimax.

use crate::board::Board;
use crate::types::{Coord, GameStatus, Player};
use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// How the agent picks its move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SearchMode {
    /// Uniformly random empty square.
    #[strum(to_string = "random", serialize = "0")]
    Random,
    /// Full game-tree minimax.
    #[default]
    #[strum(to_string = "minimax", serialize = "1")]
    Minimax,
}

/// How a decision was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    /// Picked at random; no score.
    #[display("random")]
    Random,
    /// Minimax score: +1 X wins, -1 O wins, 0 draw.
    #[display("{_0}")]
    Score(i8),
}

/// A move chosen by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Decision {
    /// Square to mark.
    coord: Coord,
    /// Evaluation of the position after the move.
    evaluation: Evaluation,
    /// Positions visited by the search (zero for random choice).
    nodes: u64,
}

/// Errors raised when asking the agent for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum AgentError {
    /// The board is full or already has a completed line.
    #[display("No moves available on board")]
    NoMovesAvailable,
}

/// Computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Agent {
    /// Move selection strategy.
    mode: SearchMode,
    /// Side the agent plays.
    player: Player,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(SearchMode::Minimax, Player::O)
    }
}

impl Agent {
    /// Creates an agent.
    #[instrument]
    pub fn new(mode: SearchMode, player: Player) -> Self {
        Self { mode, player }
    }

    /// Changes the move selection strategy.
    #[instrument(skip(self), fields(from = %self.mode))]
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Chooses a move using the thread-local RNG.
    pub fn choose_move(&self, board: &Board) -> Result<Decision, AgentError> {
        self.choose_move_with(board, &mut rand::thread_rng())
    }

    /// Chooses a move, drawing random choices from `rng`.
    ///
    /// Never mutates `board`; minimax explores on copies.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoMovesAvailable`] in either mode when the game
    /// on `board` is already over.
    #[instrument(skip(self, board, rng), fields(mode = %self.mode, player = %self.player, board = %board))]
    pub fn choose_move_with<R: Rng>(
        &self,
        board: &Board,
        rng: &mut R,
    ) -> Result<Decision, AgentError> {
        if board.status() != GameStatus::InProgress {
            return Err(AgentError::NoMovesAvailable);
        }

        let decision = match self.mode {
            SearchMode::Random => {
                let empty = board.empty_cells();
                Decision {
                    coord: empty[rng.gen_range(0..empty.len())],
                    evaluation: Evaluation::Random,
                    nodes: 0,
                }
            }
            SearchMode::Minimax => {
                let maximizing = self.player == Player::X;
                let mut search = Search::default();
                let (score, coord) = search.minimax(*board, maximizing);
                debug!(nodes = search.nodes, "Search complete");
                Decision {
                    coord: coord.ok_or(AgentError::NoMovesAvailable)?,
                    evaluation: Evaluation::Score(score),
                    nodes: search.nodes,
                }
            }
        };

        info!(
            coord = %decision.coord,
            evaluation = %decision.evaluation,
            "Agent chose position {} with an evaluation of {}",
            decision.coord,
            decision.evaluation
        );
        Ok(decision)
    }

    /// Evaluates `board` by exhaustive minimax.
    ///
    /// Returns the score with perfect play from here (+1 X wins, -1 O wins,
    /// 0 draw) and the move achieving it, or `None` when the board is
    /// already terminal.
    pub fn minimax(&self, board: &Board, maximizing: bool) -> (i8, Option<Coord>) {
        Search::default().minimax(*board, maximizing)
    }
}

/// Per-call search state.
#[derive(Debug, Default)]
struct Search {
    nodes: u64,
}

impl Search {
    fn minimax(&mut self, board: Board, maximizing: bool) -> (i8, Option<Coord>) {
        self.nodes += 1;

        if let Some(winner) = board.terminal_value() {
            return (winner.score(), None);
        }
        if board.is_full() {
            return (0, None);
        }

        // Scores lie in -1..=1, so these start outside the attainable range.
        let (side, mut best_score) = if maximizing {
            (Player::X, i8::MIN)
        } else {
            (Player::O, i8::MAX)
        };
        let mut best_move = None;

        for coord in board.empty_cells() {
            let mut next = board;
            next.mark(coord, side);
            let (score, _) = self.minimax(next, !maximizing);

            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_score = score;
                best_move = Some(coord);
            }
        }

        (best_score, best_move)
    }
}
