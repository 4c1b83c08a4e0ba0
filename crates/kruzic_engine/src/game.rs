//! Game session: one live board, one agent, turn order and game mode.
//!
//! A front-end owns a [`Game`] and feeds it input events: human clicks go
//! through [`Game::make_move`], and after each event [`Game::agent_turn`]
//! lets the computer reply when it is its side to move. The session never
//! draws anything; front-ends poll [`Game::board`], [`Game::status`] and
//! [`Game::winning_line`] to render.

use crate::agent::{Agent, AgentError, Decision, SearchMode};
use crate::board::{Board, WinningLine};
use crate::config::GameConfig;
use crate::types::{Coord, GameStatus, Player};
use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Who plays against whom.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Two humans take turns.
    #[serde(rename = "pvp")]
    #[strum(to_string = "pvp")]
    PlayerVsPlayer,
    /// A human plays the agent.
    #[serde(rename = "agent", alias = "ai")]
    #[strum(to_string = "agent", serialize = "ai")]
    PlayerVsAgent,
}

impl GameMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            GameMode::PlayerVsPlayer => GameMode::PlayerVsAgent,
            GameMode::PlayerVsAgent => GameMode::PlayerVsPlayer,
        }
    }
}

/// Result of one applied mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Square that was marked.
    pub coord: Coord,
    /// Player who marked it.
    pub player: Player,
    /// Status after the mark.
    pub status: GameStatus,
    /// The completed line, when the mark won the game.
    pub line: Option<WinningLine>,
    /// The agent's reasoning, when the agent made the mark.
    pub decision: Option<Decision>,
}

/// Errors when applying a move to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameError {
    /// Row or column outside 0-2.
    #[display("Position {} is off the board", _0)]
    OutOfBounds(Coord),
    /// Square already marked.
    #[display("Square {} is already occupied", _0)]
    Occupied(Coord),
    /// The game has ended.
    #[display("Game is already over")]
    GameOver,
    /// The agent could not produce a move.
    #[display("Agent error: {}", _0)]
    Agent(AgentError),
}

impl From<AgentError> for GameError {
    fn from(err: AgentError) -> Self {
        GameError::Agent(err)
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Agent(err) => Some(err),
            _ => None,
        }
    }
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    agent: Agent,
    to_move: Player,
    mode: GameMode,
    running: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    /// Creates a game with X to move.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            agent: Agent::new(*config.search(), *config.agent_player()),
            to_move: Player::X,
            mode: *config.mode(),
            running: true,
        }
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the agent.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Returns the configuration the game resets to.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the current game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Whether moves are still accepted.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a line is complete or the board is full.
    pub fn is_over(&self) -> bool {
        self.status() != GameStatus::InProgress
    }

    /// Returns the board status.
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Returns the completed line, if any.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.board.winning_line()
    }

    /// Whether the agent should move next.
    pub fn is_agent_turn(&self) -> bool {
        self.mode == GameMode::PlayerVsAgent
            && self.running
            && self.to_move == *self.agent.player()
    }

    /// Marks `coord` for the player to move and passes the turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is over, `coord` is off the board or the
    /// square is taken. The board is unchanged on error.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn make_move(&mut self, coord: Coord) -> Result<Turn, GameError> {
        if !self.running {
            return Err(GameError::GameOver);
        }
        if !coord.is_in_bounds() {
            return Err(GameError::OutOfBounds(coord));
        }
        if !self.board.is_empty_cell(coord) {
            return Err(GameError::Occupied(coord));
        }

        let player = self.to_move;
        self.board.mark(coord, player);
        self.to_move = player.opponent();

        let status = self.board.status();
        let line = self.board.winning_line();
        if status != GameStatus::InProgress {
            self.running = false;
            match line {
                Some(line) => info!(%line, "Game over"),
                None => info!("Game over: draw"),
            }
        }

        debug!(%coord, ?status, "Move applied");
        Ok(Turn {
            coord,
            player,
            status,
            line,
            decision: None,
        })
    }

    /// Lets the agent move if it is its turn, using the thread-local RNG.
    pub fn agent_turn(&mut self) -> Result<Option<Turn>, GameError> {
        self.agent_turn_with(&mut rand::thread_rng())
    }

    /// Lets the agent move if it is its turn.
    ///
    /// Returns `Ok(None)` in player-vs-player mode, after the game has ended,
    /// or when the human is to move.
    #[instrument(skip(self, rng))]
    pub fn agent_turn_with<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Turn>, GameError> {
        if !self.is_agent_turn() {
            return Ok(None);
        }

        let decision = self.agent.choose_move_with(&self.board, rng)?;
        let mut turn = self.make_move(*decision.coord())?;
        turn.decision = Some(decision);
        Ok(Some(turn))
    }

    /// Switches between player-vs-player and player-vs-agent.
    #[instrument(skip(self), fields(from = %self.mode))]
    pub fn toggle_mode(&mut self) -> GameMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Changes how the agent picks moves.
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.agent.set_mode(mode);
    }

    /// Discards the board and agent and starts over from the configuration.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        *self = Self::new(self.config);
    }
}

/// Plays a game to the end between two agents, starting from `board` with
/// `to_move` to play.
///
/// Marks are placed for the side to move regardless of each agent's
/// configured side; configure `x_agent` as X and `o_agent` as O so their
/// searches pull in the right direction.
#[instrument(skip(x_agent, o_agent, rng), fields(board = %board))]
pub fn play_out<R: Rng>(
    mut board: Board,
    mut to_move: Player,
    x_agent: &Agent,
    o_agent: &Agent,
    rng: &mut R,
) -> Result<Board, AgentError> {
    while board.status() == GameStatus::InProgress {
        let agent = match to_move {
            Player::X => x_agent,
            Player::O => o_agent,
        };
        let decision = agent.choose_move_with(&board, rng)?;
        board.mark(*decision.coord(), to_move);
        to_move = to_move.opponent();
    }
    Ok(board)
}
