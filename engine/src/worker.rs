//! Transport between a session and its engine worker.
//!
//! A worker is anything that accepts command lines and answers with output
//! lines over channels: a child process (see [`crate::stockfish`]) or an
//! in-process task.

use tokio::sync::mpsc;

/// Capacity of the engine output channel.
pub const LINE_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Engine executable not found")]
    NotFound,
    #[error("Failed to spawn engine: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Engine has no stdin")]
    NoStdin,
    #[error("Engine has no stdout")]
    NoStdout,
    #[error("Engine worker disconnected")]
    Disconnected,
}

/// Outgoing half of a worker connection.
///
/// `post` must not block: lines are queued and written in order by the
/// worker side.
pub trait WorkerLink: Send {
    fn post(&mut self, line: &str) -> Result<(), WorkerError>;

    /// Release the worker. Called at most once by the owning session.
    fn terminate(&mut self);
}

/// Both halves of a freshly started worker.
pub struct EngineHandle {
    pub link: Box<dyn WorkerLink>,
    pub lines: mpsc::Receiver<String>,
}

/// Something that can start a new worker on demand.
pub trait EngineLauncher: Send + Sync {
    fn launch(&self) -> Result<EngineHandle, WorkerError>;
}

/// Link to an in-process worker reachable over an unbounded channel.
pub struct ChannelLink {
    tx: Option<mpsc::UnboundedSender<String>>,
}

impl ChannelLink {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }
}

impl WorkerLink for ChannelLink {
    fn post(&mut self, line: &str) -> Result<(), WorkerError> {
        let tx = self.tx.as_ref().ok_or(WorkerError::Disconnected)?;
        tx.send(line.to_string())
            .map_err(|_| WorkerError::Disconnected)
    }

    fn terminate(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(crate::uci::format_quit());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_link_posts_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut link = ChannelLink::new(tx);
        link.post("uci").unwrap();
        link.post("isready").unwrap();
        assert_eq!(rx.try_recv().unwrap(), "uci");
        assert_eq!(rx.try_recv().unwrap(), "isready");
    }

    #[test]
    fn test_channel_link_terminate_sends_quit_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut link = ChannelLink::new(tx);
        link.terminate();
        link.terminate();
        assert_eq!(rx.try_recv().unwrap(), "quit");
        // Sender dropped after terminate
        assert!(rx.try_recv().is_err());
        assert!(matches!(link.post("stop"), Err(WorkerError::Disconnected)));
    }

    #[test]
    fn test_post_to_dead_worker_fails() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut link = ChannelLink::new(tx);
        assert!(matches!(link.post("uci"), Err(WorkerError::Disconnected)));
    }
}
