//! Križić-kružić - terminal front-end
//!
//! Interactive play, move suggestions and agent self-play on top of
//! `kruzic_engine`.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use kruzic_engine::{
    Agent, Board, Game, GameConfig, GameMode, GameStatus, Player, SearchMode, Square, play_out,
};
use rand::Rng;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            mode,
            search,
            agent,
        } => run_play(config, mode, search, agent),
        Command::Suggest {
            board,
            search,
            agent,
            json,
        } => run_suggest(&board, search, agent, json, &mut std::io::stdout().lock()),
        Command::Selfplay {
            games,
            x_search,
            o_search,
        } => run_selfplay(
            games,
            x_search,
            o_search,
            &mut rand::thread_rng(),
            &mut std::io::stdout().lock(),
        ),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument]
fn run_play(
    config_path: Option<PathBuf>,
    mode: Option<GameMode>,
    search: Option<SearchMode>,
    agent: Option<Player>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => GameConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    if let Some(search) = search {
        config = config.with_search(search);
    }
    if let Some(agent) = agent {
        config = config.with_agent_player(agent);
    }

    info!(?config, "Starting game");
    let mut game = Game::new(config);
    let stdin = std::io::stdin();
    play::run(&mut game, stdin.lock(), std::io::stdout().lock())
}

/// Print the agent's decision for a board
#[instrument(skip(out))]
fn run_suggest<W: Write>(
    board: &str,
    search: SearchMode,
    agent: Option<Player>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let board: Board = board.parse().context("Failed to parse board")?;
    let player = agent.unwrap_or_else(|| side_to_move(&board));

    let decision = Agent::new(search, player)
        .choose_move(&board)
        .with_context(|| format!("No move for {player} on {board}"))?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&decision)?)?;
    } else {
        writeln!(out, "{}\n", board.display())?;
        writeln!(
            out,
            "{player} plays {} (evaluation: {})",
            decision.coord(),
            decision.evaluation()
        )?;
    }
    Ok(())
}

/// X moves when both sides have placed the same number of marks.
fn side_to_move(board: &Board) -> Player {
    let x_marks = board
        .rows()
        .iter()
        .flatten()
        .filter(|&&square| square == Square::Marked(Player::X))
        .count();
    if x_marks * 2 > board.marked_count() as usize {
        Player::O
    } else {
        Player::X
    }
}

/// Play agents against each other and tally the results
#[instrument(skip(rng, out))]
fn run_selfplay<R: Rng, W: Write>(
    games: u32,
    x_search: SearchMode,
    o_search: SearchMode,
    rng: &mut R,
    out: &mut W,
) -> Result<()> {
    let x_agent = Agent::new(x_search, Player::X);
    let o_agent = Agent::new(o_search, Player::O);

    let (mut x_wins, mut o_wins, mut draws) = (0u32, 0u32, 0u32);
    for game in 1..=games {
        let end = play_out(Board::new(), Player::X, &x_agent, &o_agent, rng)?;
        match end.status() {
            GameStatus::Won(Player::X) => x_wins += 1,
            GameStatus::Won(Player::O) => o_wins += 1,
            GameStatus::Draw => draws += 1,
            GameStatus::InProgress => unreachable!("play_out stops at a terminal board"),
        }
        info!(game, board = %end, status = ?end.status(), "Game finished");
    }

    writeln!(out, "X ({x_search}) wins: {x_wins}")?;
    writeln!(out, "O ({o_search}) wins: {o_wins}")?;
    writeln!(out, "Draws: {draws}")?;
    Ok(())
}
