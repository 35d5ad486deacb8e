//! Scripted in-process engine for tests - only compiled in test mode or with
//! the mock feature.
//!
//! Speaks just enough UCI to drive a session: answers the handshake and
//! readiness checks, and replies to every `go` with the lines configured for
//! the last position it was given.

use crate::worker::{ChannelLink, EngineHandle, EngineLauncher, WorkerError, LINE_CHANNEL_CAPACITY};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// What the scripted engine answers to searches.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    replies: HashMap<String, Vec<String>>,
    default_reply: Option<Vec<String>>,
    silent: bool,
    exit_on_search: bool,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines sent after `go` when the last position was `fen`.
    pub fn with_reply<I, S>(mut self, fen: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies
            .insert(fen.trim().to_string(), lines.into_iter().map(Into::into).collect());
        self
    }

    /// Lines sent after `go` for positions without their own reply.
    ///
    /// Without one, the engine reports `depth N score cp 0` and `bestmove (none)`.
    pub fn with_default_reply<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_reply = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Never answer `go`.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Close the output stream on the first `go`, like a crashing engine.
    pub fn exit_on_search(mut self) -> Self {
        self.exit_on_search = true;
        self
    }

    fn search_reply(&self, position: Option<&str>, depth: u32) -> Vec<String> {
        if self.silent {
            return Vec::new();
        }
        if let Some(lines) = position.and_then(|fen| self.replies.get(fen)) {
            return lines.clone();
        }
        match &self.default_reply {
            Some(lines) => lines.clone(),
            None => vec![
                format!("info depth {} score cp 0", depth),
                "bestmove (none)".to_string(),
            ],
        }
    }
}

/// Launches [`ScriptedEngine`] workers and records what they were sent.
#[derive(Clone)]
pub struct ScriptedLauncher {
    script: ScriptedEngine,
    commands: Arc<Mutex<Vec<String>>>,
    launches: Arc<AtomicUsize>,
    unavailable: bool,
}

impl ScriptedLauncher {
    pub fn new(script: ScriptedEngine) -> Self {
        Self {
            script,
            commands: Arc::new(Mutex::new(Vec::new())),
            launches: Arc::new(AtomicUsize::new(0)),
            unavailable: false,
        }
    }

    /// A launcher whose engine can never be started.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new(ScriptedEngine::new())
        }
    }

    /// Every command received so far, across all launched workers.
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Received commands starting with `prefix`.
    pub fn commands_starting_with(&self, prefix: &str) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .collect()
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

impl EngineLauncher for ScriptedLauncher {
    fn launch(&self) -> Result<EngineHandle, WorkerError> {
        if self.unavailable {
            return Err(WorkerError::NotFound);
        }
        self.launches.fetch_add(1, Ordering::SeqCst);

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (line_tx, line_rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
        tokio::spawn(run_scripted_engine(
            self.script.clone(),
            self.commands.clone(),
            cmd_rx,
            line_tx,
        ));

        Ok(EngineHandle {
            link: Box::new(ChannelLink::new(cmd_tx)),
            lines: line_rx,
        })
    }
}

async fn run_scripted_engine(
    script: ScriptedEngine,
    log: Arc<Mutex<Vec<String>>>,
    mut cmd_rx: mpsc::UnboundedReceiver<String>,
    line_tx: mpsc::Sender<String>,
) {
    let mut position: Option<String> = None;

    while let Some(cmd) = cmd_rx.recv().await {
        if let Ok(mut log) = log.lock() {
            log.push(cmd.clone());
        }

        let replies = match cmd.split_whitespace().next() {
            Some("uci") => vec!["id name Scripted".to_string(), "uciok".to_string()],
            Some("isready") => vec!["readyok".to_string()],
            Some("position") => {
                position = cmd.strip_prefix("position fen ").map(|fen| fen.trim().to_string());
                Vec::new()
            }
            Some("go") => {
                if script.exit_on_search {
                    break;
                }
                let depth = cmd
                    .split_whitespace()
                    .nth(2)
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(1);
                script.search_reply(position.as_deref(), depth)
            }
            Some("quit") => break,
            _ => Vec::new(),
        };

        for line in replies {
            if line_tx.send(line).await.is_err() {
                return;
            }
        }
    }
    tracing::debug!("Scripted engine exiting");
}
