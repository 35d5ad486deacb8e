use tokio::sync::{broadcast, oneshot};

use super::events::AdvisorEvent;
use super::view::AdvisorView;

/// Shallowest search the advisor will run.
pub const MIN_DEPTH: u32 = 10;
/// Deepest search the advisor will run.
pub const MAX_DEPTH: u32 = 20;
pub const DEFAULT_DEPTH: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdvisorError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
    #[error("Depth {0} is outside {min}..={max}", min = MIN_DEPTH, max = MAX_DEPTH)]
    DepthOutOfRange(u32),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Engine unavailable")]
    EngineUnavailable,
    #[error("Internal error: {0}")]
    Internal(String),
}

pub(crate) fn check_depth(depth: u32) -> Result<u32, AdvisorError> {
    if (MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        Ok(depth)
    } else {
        Err(AdvisorError::DepthOutOfRange(depth))
    }
}

/// Commands sent to the advisor actor. Each embeds a oneshot for the reply.
pub enum AdvisorCommand {
    MakeMove {
        text: String,
        reply: oneshot::Sender<Result<AdvisorView, AdvisorError>>,
    },
    SetDepth {
        depth: u32,
        reply: oneshot::Sender<Result<AdvisorView, AdvisorError>>,
    },
    NewGame {
        fen: Option<String>,
        reply: oneshot::Sender<Result<AdvisorView, AdvisorError>>,
    },
    Undo {
        reply: oneshot::Sender<Result<AdvisorView, AdvisorError>>,
    },
    StopAnalysis {
        reply: oneshot::Sender<Result<(), AdvisorError>>,
    },
    RestartEngine {
        reply: oneshot::Sender<AdvisorView>,
    },
    GetView {
        reply: oneshot::Sender<AdvisorView>,
    },
    Subscribe {
        reply: oneshot::Sender<(AdvisorView, broadcast::Receiver<AdvisorEvent>)>,
    },
    Shutdown,
}
