use tokio::sync::{broadcast, mpsc, oneshot};

use super::commands::{AdvisorCommand, AdvisorError};
use super::events::AdvisorEvent;
use super::view::AdvisorView;

/// Cheap, cloneable handle to an advisor actor.
#[derive(Clone)]
pub struct AdvisorHandle {
    id: String,
    cmd_tx: mpsc::Sender<AdvisorCommand>,
}

impl AdvisorHandle {
    pub(crate) fn new(id: String, cmd_tx: mpsc::Sender<AdvisorCommand>) -> Self {
        Self { id, cmd_tx }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Play a move given in SAN (`Nf3`) or coordinate notation (`g1f3`).
    pub async fn make_move(&self, text: impl Into<String>) -> Result<AdvisorView, AdvisorError> {
        let (tx, rx) = oneshot::channel();
        self.send(AdvisorCommand::MakeMove {
            text: text.into(),
            reply: tx,
        })
        .await?;
        rx.await
            .map_err(|_| AdvisorError::Internal("Reply dropped".into()))?
    }

    pub async fn set_depth(&self, depth: u32) -> Result<AdvisorView, AdvisorError> {
        let (tx, rx) = oneshot::channel();
        self.send(AdvisorCommand::SetDepth { depth, reply: tx })
            .await?;
        rx.await
            .map_err(|_| AdvisorError::Internal("Reply dropped".into()))?
    }

    pub async fn new_game(&self, fen: Option<String>) -> Result<AdvisorView, AdvisorError> {
        let (tx, rx) = oneshot::channel();
        self.send(AdvisorCommand::NewGame { fen, reply: tx }).await?;
        rx.await
            .map_err(|_| AdvisorError::Internal("Reply dropped".into()))?
    }

    pub async fn undo(&self) -> Result<AdvisorView, AdvisorError> {
        let (tx, rx) = oneshot::channel();
        self.send(AdvisorCommand::Undo { reply: tx }).await?;
        rx.await
            .map_err(|_| AdvisorError::Internal("Reply dropped".into()))?
    }

    pub async fn stop_analysis(&self) -> Result<(), AdvisorError> {
        let (tx, rx) = oneshot::channel();
        self.send(AdvisorCommand::StopAnalysis { reply: tx }).await?;
        rx.await
            .map_err(|_| AdvisorError::Internal("Reply dropped".into()))?
    }

    /// Replace the engine with a freshly launched one.
    pub async fn restart_engine(&self) -> Result<AdvisorView, AdvisorError> {
        let (tx, rx) = oneshot::channel();
        self.send(AdvisorCommand::RestartEngine { reply: tx }).await?;
        rx.await
            .map_err(|_| AdvisorError::Internal("Reply dropped".into()))
    }

    pub async fn view(&self) -> Result<AdvisorView, AdvisorError> {
        let (tx, rx) = oneshot::channel();
        self.send(AdvisorCommand::GetView { reply: tx }).await?;
        rx.await
            .map_err(|_| AdvisorError::Internal("Reply dropped".into()))
    }

    pub async fn subscribe(
        &self,
    ) -> Result<(AdvisorView, broadcast::Receiver<AdvisorEvent>), AdvisorError> {
        let (tx, rx) = oneshot::channel();
        self.send(AdvisorCommand::Subscribe { reply: tx }).await?;
        rx.await
            .map_err(|_| AdvisorError::Internal("Reply dropped".into()))
    }

    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(AdvisorCommand::Shutdown).await;
    }

    async fn send(&self, cmd: AdvisorCommand) -> Result<(), AdvisorError> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| AdvisorError::Internal("Advisor actor closed".into()))
    }
}
