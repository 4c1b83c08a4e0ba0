//! Line-based interactive play over stdin/stdout.

use anyhow::Result;
use kruzic_engine::{Coord, Game, GameMode, GameStatus, SearchMode, Turn};
use std::io::{BufRead, Write};
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

fn help() -> String {
    let modes: Vec<String> = GameMode::iter().map(|mode| mode.to_string()).collect();
    let searches: Vec<String> = SearchMode::iter().map(|mode| mode.to_string()).collect();
    format!(
        "Commands:\n\
         \x20 1-9 or 'row col'   mark a square\n\
         \x20 g                  toggle game mode ({})\n\
         \x20 r                  reset the game\n\
         \x20 s0 | s1            agent search: random | minimax\n\
         \x20 search <mode>      agent search: {}\n\
         \x20 h                  show this help\n\
         \x20 q                  quit",
        modes.join(" / "),
        searches.join(" | ")
    )
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Mark a square.
    Mark(Coord),
    /// Toggle between pvp and agent mode.
    ToggleMode,
    /// Start over.
    Reset,
    /// Change agent search.
    Search(SearchMode),
    /// Show commands.
    Help,
    /// Leave.
    Quit,
}

/// Parses a line of input, or `None` if it is not a command.
///
/// Bare digits are squares, so the search keys carry an `s` prefix
/// (`s0` random, `s1` minimax) or the `search` keyword.
#[instrument]
pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    let lower = line.to_ascii_lowercase();
    match lower.as_str() {
        "q" | "quit" | "exit" => return Some(Input::Quit),
        "g" => return Some(Input::ToggleMode),
        "r" | "reset" => return Some(Input::Reset),
        "h" | "help" | "?" => return Some(Input::Help),
        "random" => return Some(Input::Search(SearchMode::Random)),
        "minimax" => return Some(Input::Search(SearchMode::Minimax)),
        _ => {}
    }

    if let Some(arg) = lower
        .strip_prefix("search")
        .or_else(|| lower.strip_prefix('s'))
    {
        return arg.trim().parse::<SearchMode>().ok().map(Input::Search);
    }

    line.parse::<Coord>().ok().map(Input::Mark)
}

/// Runs the game loop until the user quits or input ends.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(game: &mut Game, input: R, mut out: W) -> Result<()> {
    writeln!(out, "{}\n", help())?;
    agent_moves(game, &mut out)?;
    render(game, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_input(&line) else {
            if !line.trim().is_empty() {
                writeln!(out, "Unrecognized input '{}'. Type h for help.", line.trim())?;
            }
            continue;
        };
        debug!(?command, "Input");

        match command {
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{}", help())?;
                continue;
            }
            Input::ToggleMode => {
                let mode = game.toggle_mode();
                writeln!(out, "Game mode: {mode}")?;
            }
            Input::Reset => {
                game.reset();
                writeln!(out, "New game.")?;
            }
            Input::Search(mode) => {
                game.set_search_mode(mode);
                writeln!(out, "Agent search: {mode}")?;
            }
            Input::Mark(coord) => match game.make_move(coord) {
                Ok(turn) => report(&turn, &mut out)?,
                Err(err) => {
                    warn!(%err, "Move rejected");
                    writeln!(out, "{err}")?;
                    continue;
                }
            },
        }

        agent_moves(game, &mut out)?;
        render(game, &mut out)?;
    }

    Ok(())
}

fn agent_moves<W: Write>(game: &mut Game, out: &mut W) -> Result<()> {
    while let Some(turn) = game.agent_turn()? {
        report(&turn, out)?;
    }
    Ok(())
}

fn report<W: Write>(turn: &Turn, out: &mut W) -> Result<()> {
    match &turn.decision {
        Some(decision) => writeln!(
            out,
            "Agent ({}) marks {} with an evaluation of {}",
            turn.player,
            turn.coord,
            decision.evaluation()
        )?,
        None => writeln!(out, "{} marks {}", turn.player, turn.coord)?,
    }
    Ok(())
}

fn render<W: Write>(game: &Game, out: &mut W) -> Result<()> {
    writeln!(out, "\n{}\n", game.board().display())?;
    match game.status() {
        GameStatus::InProgress => writeln!(out, "{} to move ({})", game.to_move(), game.mode())?,
        GameStatus::Won(_) => {
            if let Some(line) = game.winning_line() {
                writeln!(out, "{line}. Press r to play again.")?;
            }
        }
        GameStatus::Draw => writeln!(out, "Draw. Press r to play again.")?,
    }
    Ok(())
}
