//! Line-based front end: parses what the user types and renders views as text.

use std::fmt::Write as _;

use chess::PlayerSide;

use crate::orchestrator::AdvisorView;

/// Width of the text evaluation bar, in cells.
const BAR_WIDTH: usize = 20;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Anything that is not a command is taken as a move (`e4`, `g1f3`).
    Move(String),
    Depth(u32),
    New(Option<String>),
    Undo,
    Stop,
    Restart,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Expected a number after 'depth', got {0:?}")]
    InvalidDepth(String),
}

pub const HELP: &str = "\
Commands:
  <move>        play a move in SAN (Nf3) or coordinates (g1f3)
  depth <n>     set search depth (10-20)
  new [fen]     start a new game, optionally from a FEN
  undo          take back the last move
  stop          stop the current search
  restart       restart the engine
  show          print the current view
  help          show this help
  quit          exit";

/// Parse one input line. Blank lines give `None`.
pub fn parse_input(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "depth" => Input::Depth(
            rest.parse()
                .map_err(|_| InputError::InvalidDepth(rest.to_string()))?,
        ),
        "new" => Input::New((!rest.is_empty()).then(|| rest.to_string())),
        "undo" => Input::Undo,
        "stop" => Input::Stop,
        "restart" => Input::Restart,
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => Input::Move(line.to_string()),
    };
    Ok(Some(input))
}

/// `1. e4 e5 2. Nf3`, or `12... Qd7 13. O-O` when Black moved first.
pub fn format_history(history: &[String], first_number: u16, first_mover: PlayerSide) -> String {
    let mut number = u32::from(first_number);
    let mut parts = Vec::new();
    let mut rest = history;

    if first_mover == PlayerSide::Black {
        if let Some((first, tail)) = history.split_first() {
            parts.push(format!("{}... {}", number, first));
            number += 1;
            rest = tail;
        }
    }

    for pair in rest.chunks(2) {
        parts.push(format!("{}. {}", number, pair.join(" ")));
        number += 1;
    }
    parts.join(" ")
}

/// `[##########          ]` for an even position.
pub fn render_eval_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

pub fn render_view(view: &AdvisorView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Position:   {}", view.fen);

    if !view.history.is_empty() {
        let moves = format_history(&view.history, view.first_move_number, view.first_mover);
        let _ = writeln!(out, "Moves:      {}", moves);
    }
    match &view.opening {
        Some(opening) => {
            let _ = writeln!(out, "Opening:    {} {}", opening.eco, opening.name);
            let _ = writeln!(out, "            {}", opening.description);
        }
        None => {
            let _ = writeln!(out, "Opening:    Unknown position");
        }
    }

    let turn = if view.player_to_move {
        "Your turn"
    } else {
        "Opponent's turn"
    };
    let _ = writeln!(out, "Turn:       {} ({})", turn, view.side_to_move);
    let _ = writeln!(out, "Status:     {:?}", view.status);

    if !view.engine_available {
        let _ = writeln!(out, "Engine:     unavailable");
        return out;
    }

    let _ = writeln!(
        out,
        "Evaluation: {:>6} {}",
        view.evaluation_text(),
        render_eval_bar(view.eval_bar())
    );
    if let Some(mate) = view.mate_in {
        let _ = writeln!(out, "Mate in:    {}", mate);
    }

    let depth = format!("depth {}/{}", view.reached_depth, view.requested_depth);
    match (&view.best_move, &view.best_move_code) {
        (Some(san), Some(code)) => {
            let _ = writeln!(out, "Best move:  {} ({}), {}", san, code, depth);
        }
        _ if view.thinking => {
            let _ = writeln!(out, "Best move:  thinking... {}", depth);
        }
        _ => {
            let _ = writeln!(out, "Best move:  none, {}", depth);
        }
    }
    let _ = writeln!(out, "Note:       {}", view.explanation);
    out
}
