use anyhow::{Context, Result, anyhow, bail};
use std::str::FromStr;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    sync::mpsc::UnboundedSender,
};
use tracing::{debug, instrument, warn};

use common::Cell;

// ============================================================================
// Input Commands
// ============================================================================

// Logical input the game loop understands. Device handling lives outside the core;
// here one line of stdin is one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    // Start holding the mask vision button
    Hold,
    // Let go of it
    Release,
    // Teleport the actor to a cell
    Goto(Cell),
    // Exit trigger fired
    Goal,
    // Throw away the current maze and build a new one
    Regenerate,
    // Log the meter and maze summary
    Status,
    Quit,
}

impl FromStr for InputCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "hold" | "h" => Self::Hold,
            "release" | "r" => Self::Release,
            "goal" | "exit" => Self::Goal,
            "regen" | "regenerate" => Self::Regenerate,
            "status" | "s" => Self::Status,
            "quit" | "q" => Self::Quit,
            "goto" | "g" => {
                let row = parse_coord(words.next(), "row")?;
                let col = parse_coord(words.next(), "col")?;
                Self::Goto(Cell::new(row, col))
            }
            other => bail!("unknown command {other:?}"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(command)
    }
}

fn parse_coord(word: Option<&str>, name: &str) -> Result<usize> {
    let word = word.ok_or_else(|| anyhow!("missing {name}"))?;
    word.parse().with_context(|| format!("invalid {name} {word:?}"))
}

// ============================================================================
// Input Task
// ============================================================================

// Reads one command per line and forwards it to the game loop. Sends Quit on EOF so the
// loop shuts down with its input.
#[instrument(skip_all)]
pub async fn input_task<R: AsyncRead + Unpin>(reader: R, to_game: UnboundedSender<InputCommand>) {
    let mut lines = BufReader::new(reader).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<InputCommand>() {
                    Ok(command) => {
                        debug!(?command, "input command");
                        if to_game.send(command).is_err() {
                            debug!("game loop gone, input task exiting");
                            return;
                        }
                        if command == InputCommand::Quit {
                            return;
                        }
                    }
                    Err(e) => warn!("ignoring input {:?}: {:#}", line, e),
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("error reading input: {}", e);
                break;
            }
        }
    }

    debug!("input closed");
    let _ = to_game.send(InputCommand::Quit);
}
