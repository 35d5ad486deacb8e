use crate::worker::{EngineHandle, EngineLauncher, WorkerError, WorkerLink, LINE_CHANNEL_CAPACITY};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;

/// How long a released engine gets to honour `quit` before it is killed.
const QUIT_GRACE: Duration = Duration::from_secs(1);

/// Where to find the engine and how to tag its log lines.
#[derive(Debug, Clone, Default)]
pub struct StockfishConfig {
    /// Explicit executable; searched in common locations when `None`.
    pub path: Option<PathBuf>,
    pub label: Option<String>,
}

/// Starts Stockfish (or any UCI engine binary) as a child process.
#[derive(Debug, Clone, Default)]
pub struct StockfishLauncher {
    config: StockfishConfig,
}

impl StockfishLauncher {
    pub fn new(config: StockfishConfig) -> Self {
        Self { config }
    }
}

impl EngineLauncher for StockfishLauncher {
    /// Spawn the process and its I/O tasks. Must run inside a tokio runtime.
    #[tracing::instrument(level = "info", skip(self), fields(label = ?self.config.label))]
    fn launch(&self) -> Result<EngineHandle, WorkerError> {
        let path = match &self.config.path {
            Some(path) => path.clone(),
            None => find_stockfish_path().ok_or(WorkerError::NotFound)?,
        };
        tracing::info!("Starting engine at {:?}", path);

        let mut process = tokio::process::Command::new(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::error!("Failed to spawn engine: {}", e);
                WorkerError::Spawn(e)
            })?;

        let mut stdin = process.stdin.take().ok_or(WorkerError::NoStdin)?;
        let stdout = process.stdout.take().ok_or(WorkerError::NoStdout)?;

        let (line_tx, line_rx) = mpsc::channel::<String>(LINE_CHANNEL_CAPACITY);
        let (stdin_tx, mut stdin_rx) = mpsc::unbounded_channel::<String>();

        // Output reader task
        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        tracing::warn!("Engine stdout EOF - engine closed");
                        break;
                    }
                    Ok(_) => {
                        let trimmed = line.trim();
                        tracing::trace!("UCI << {}", trimmed);
                        if line_tx.send(trimmed.to_string()).await.is_err() {
                            tracing::debug!("Line receiver dropped");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Error reading from engine stdout: {}", e);
                        break;
                    }
                }
            }
            tracing::info!("Output reader task exiting");
        });

        // Stdin writer task
        tokio::spawn(async move {
            while let Some(cmd) = stdin_rx.recv().await {
                tracing::trace!("UCI >> {}", cmd);
                let bytes = format!("{}\n", cmd);
                if let Err(e) = stdin.write_all(bytes.as_bytes()).await {
                    tracing::error!("Failed to write to stdin: {}", e);
                    break;
                }
                if let Err(e) = stdin.flush().await {
                    tracing::error!("Failed to flush stdin: {}", e);
                    break;
                }
            }
            tracing::info!("Stdin writer task exiting");
        });

        tracing::info!("Engine process started");
        Ok(EngineHandle {
            link: Box::new(ProcessLink {
                process: Some(process),
                stdin: Some(stdin_tx),
            }),
            lines: line_rx,
        })
    }
}

/// Link to a child engine process.
struct ProcessLink {
    process: Option<Child>,
    stdin: Option<mpsc::UnboundedSender<String>>,
}

impl WorkerLink for ProcessLink {
    fn post(&mut self, line: &str) -> Result<(), WorkerError> {
        let stdin = self.stdin.as_ref().ok_or(WorkerError::Disconnected)?;
        stdin
            .send(line.to_string())
            .map_err(|_| WorkerError::Disconnected)
    }

    fn terminate(&mut self) {
        if let Some(stdin) = self.stdin.take() {
            let _ = stdin.send(crate::uci::format_quit());
        }

        let Some(mut process) = self.process.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if tokio::time::timeout(QUIT_GRACE, process.wait()).await.is_err() {
                        tracing::warn!("Engine ignored quit, killing it");
                        let _ = process.kill().await;
                    }
                });
            }
            Err(_) => {
                let _ = process.start_kill();
            }
        }
    }
}

/// Find Stockfish executable in common locations
fn find_stockfish_path() -> Option<PathBuf> {
    let paths = [
        "/usr/local/bin/stockfish",
        "/usr/bin/stockfish",
        "/opt/homebrew/bin/stockfish",
        "/usr/games/stockfish",
    ];

    if let Some(found) = paths.iter().map(Path::new).find(|p| p.exists()) {
        return Some(found.to_path_buf());
    }

    // Fall back to PATH lookup
    std::env::var_os("PATH").and_then(|path| {
        std::env::split_paths(&path)
            .map(|dir| dir.join("stockfish"))
            .find(|candidate| candidate.is_file())
    })
}
