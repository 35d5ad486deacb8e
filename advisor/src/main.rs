use std::path::PathBuf;
use std::sync::Arc;

use advisor::config;
use advisor::terminal::{self, Input, HELP};
use advisor::{
    spawn_advisor, AdvisorConfig, AdvisorEvent, AdvisorHandle, AdvisorView, StandardRules,
};
use chess::PlayerSide;
use clap::{Parser, ValueEnum};
use engine::{EngineOptions, StockfishConfig, StockfishLauncher};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Engine-backed move suggestions for the game you are playing.
///
/// Reads moves and commands from stdin, one per line, and prints the
/// advisor's view after each change.
#[derive(Parser)]
#[command(name = "chess-advisor")]
struct Cli {
    /// Engine executable. Defaults to CHESS_ADVISOR_ENGINE_PATH, then a
    /// Stockfish found on the system.
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Search depth, 10 to 20. Defaults to CHESS_ADVISOR_DEPTH, then 15.
    #[arg(long)]
    depth: Option<u32>,

    /// The side you play.
    #[arg(long, value_enum, default_value = "white")]
    color: Color,

    /// Start from this position instead of the initial one.
    #[arg(long)]
    fen: Option<String>,

    /// Print views as JSON lines instead of text.
    #[arg(long)]
    json: bool,

    /// Engine search threads.
    #[arg(long)]
    threads: Option<u32>,

    /// Engine hash table size in MB.
    #[arg(long)]
    hash: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Color {
    White,
    Black,
}

impl From<Color> for PlayerSide {
    fn from(color: Color) -> Self {
        match color {
            Color::White => PlayerSide::White,
            Color::Black => PlayerSide::Black,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn print(self, view: &AdvisorView) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(view)?);
        } else {
            println!("{}", terminal::render_view(view));
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to a file so stdout stays clean for views
    let log_dir = config::get_log_dir();
    config::prepare_log_dir(&log_dir)?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, config::LOG_FILE_PREFIX);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Chess advisor starting up");

    let launcher = StockfishLauncher::new(StockfishConfig {
        path: cli.engine.clone().or_else(config::get_engine_path),
        label: Some("advisor".to_string()),
    });
    let advisor_config = AdvisorConfig {
        depth: cli.depth.unwrap_or_else(config::get_default_depth),
        player_side: cli.color.into(),
        fen: cli.fen.clone(),
        engine_options: EngineOptions {
            threads: cli.threads,
            hash_mb: cli.hash,
        },
    };

    let handle = spawn_advisor(advisor_config, Arc::new(launcher), Arc::new(StandardRules))?;
    let output = Output { json: cli.json };

    let (initial, events) = handle.subscribe().await?;
    if !initial.engine_available {
        eprintln!("Engine could not be started; continuing without suggestions.");
    }
    output.print(&initial)?;
    let printer = tokio::spawn(print_finished_searches(events, output));

    let result = run_input_loop(&handle, output).await;

    handle.shutdown().await;
    printer.abort();
    tracing::info!("Chess advisor shutting down");
    result
}

/// Print a view whenever a search completes with something new to say.
async fn print_finished_searches(mut events: broadcast::Receiver<AdvisorEvent>, output: Output) {
    let mut last_printed: Option<(String, Option<String>, u32)> = None;

    loop {
        match events.recv().await {
            Ok(AdvisorEvent::StateChanged(view)) => {
                if view.thinking || view.reached_depth == 0 {
                    continue;
                }
                let key = (
                    view.fen.clone(),
                    view.best_move_code.clone(),
                    view.reached_depth,
                );
                if last_printed.as_ref() == Some(&key) {
                    continue;
                }
                if let Err(e) = output.print(&view) {
                    tracing::error!("Failed to print view: {}", e);
                }
                last_printed = Some(key);
            }
            Ok(AdvisorEvent::EngineLost(reason)) => {
                eprintln!("Engine lost ({}). Type 'restart' to try again.", reason);
            }
            Ok(AdvisorEvent::Error(_)) => {}
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::debug!("View printer lagged by {} events", n);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn run_input_loop(handle: &AdvisorHandle, output: Output) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let input = match terminal::parse_input(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let result = match input {
            Input::Quit => break,
            Input::Help => {
                println!("{}", HELP);
                continue;
            }
            Input::Move(text) => handle.make_move(text).await,
            Input::Depth(depth) => handle.set_depth(depth).await,
            Input::New(fen) => handle.new_game(fen).await,
            Input::Undo => handle.undo().await,
            Input::Stop => match handle.stop_analysis().await {
                Ok(()) => handle.view().await,
                Err(e) => Err(e),
            },
            Input::Restart => handle.restart_engine().await,
            Input::Show => handle.view().await,
        };

        match result {
            Ok(view) => output.print(&view)?,
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}
