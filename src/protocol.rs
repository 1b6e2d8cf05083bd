//! Line-oriented text protocol for driving the engine.
//!
//! This is the presentation adapter: it turns text commands into engine
//! commands and prints what the engine reports. It makes no legality
//! decisions of its own. Responses follow the GTP convention: `=` for
//! success, `?` for failure, an optional numeric id echoed back, and a
//! blank line after each response.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `new` - Start a new game
//! - `show` - Print the board, player on move and selection
//! - `turn` - Print the player on move
//! - `captures` - List pieces that are forced to capture
//! - `moves <sq>` - List every destination of the piece on `<sq>`
//! - `select <sq>` - Select a piece
//! - `move <sq>` - Move the selected piece
//! - `click <sq>` - Select or move, like clicking that cell
//!
//! Squares are written `row,col`, e.g. `5,2`.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::board::Square;
use crate::engine::{ClickOutcome, Engine, MoveOutcome, TurnStatus};
use crate::rules::{self, Destination};

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "captures",
    "click",
    "known_command",
    "list_commands",
    "move",
    "moves",
    "name",
    "new",
    "quit",
    "select",
    "show",
    "turn",
    "version",
];

/// Protocol session wrapping one engine.
#[derive(Default)]
pub struct Session {
    engine: Engine,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "protocol command");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "new" => {
                self.engine.reset();
                (true, self.engine.snapshot().to_string())
            }

            "show" => (true, self.engine.snapshot().to_string()),

            "turn" => (true, self.engine.current_player().to_string()),

            "captures" => (true, join_squares(&self.engine.mandatory_captures())),

            "moves" => match parse_square(args) {
                Ok(sq) if self.engine.board().is_empty(sq) => (false, format!("no piece on {sq}")),
                Ok(sq) => (true, join_destinations(&rules::legal_destinations(self.engine.board(), sq))),
                Err(message) => (false, message),
            },

            "select" => match parse_square(args) {
                Ok(sq) => match self.engine.select(sq) {
                    Ok(_) => (true, self.engine.snapshot().to_string()),
                    Err(reason) => (false, reason.to_string()),
                },
                Err(message) => (false, message),
            },

            "move" => match parse_square(args) {
                Ok(sq) => match self.engine.apply_move(sq) {
                    Ok(outcome) => (true, self.report_move(&outcome)),
                    Err(reason) => (false, reason.to_string()),
                },
                Err(message) => (false, message),
            },

            "click" => match parse_square(args) {
                Ok(sq) => match self.engine.click(sq) {
                    Ok(ClickOutcome::Selected(_)) => (true, self.engine.snapshot().to_string()),
                    Ok(ClickOutcome::Moved(outcome)) => (true, self.report_move(&outcome)),
                    Err(reason) => (false, reason.to_string()),
                },
                Err(message) => (false, message),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn report_move(&self, outcome: &MoveOutcome) -> String {
        let mut line = format!("{} -> {}", outcome.from, outcome.to);
        if let Some(captured) = outcome.captured {
            line.push_str(&format!(" captures {captured}"));
        }
        if outcome.promoted {
            line.push_str(" crowned");
        }
        if outcome.status == TurnStatus::Continues {
            line.push_str(" must continue");
        }
        format!("{line}\n{}", self.engine.snapshot())
    }
}

fn parse_square(args: &[&str]) -> Result<Square, String> {
    let arg = args.first().ok_or_else(|| "missing argument".to_string())?;
    arg.parse::<Square>().map_err(|e| e.to_string())
}

fn join_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(Square::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_destinations(dests: &[Destination]) -> String {
    dests
        .iter()
        .map(|d| match d.jumped() {
            Some(jumped) => format!("{}x{}", d.to, jumped),
            None => d.to.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
