//! One engine, one game: handshake, readiness and keep-latest analysis.
//!
//! The session never queues work. Requests made before the engine is ready
//! overwrite each other and only the last one is dispatched; requests made
//! afterwards interrupt whatever is running (`stop`, `position`, `go`).
//!
//! Replies are attributed by protocol ordering. Every `go` is answered by
//! exactly one `bestmove`, in order, so a `bestmove` belongs to the latest
//! request only when it closes the last outstanding search. Earlier ones are
//! dropped, and so are `info` lines that can only come from a superseded
//! search.

use crate::uci::{
    format_go, format_handshake, format_options, format_position, format_ready_check,
    format_stop, parse_line, EngineOptions,
};
use crate::worker::{WorkerError, WorkerLink};
use crate::{EngineEvent, MoveCode, SearchInfo};

/// Protocol state. Ordered: everything before `Ready` is handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionState {
    Uninitialized,
    AwaitingHandshake,
    ConfiguringOptions,
    AwaitingReady,
    Ready,
    Searching,
}

/// Latest analysis intent not yet sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub position: String,
    pub depth: u32,
}

/// What the session currently knows about the latest search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    pub best_move: Option<MoveCode>,
    pub ponder_move: Option<MoveCode>,
    /// Side-to-move evaluation in pawns; mates are ±100.
    pub evaluation_pawns: Option<f64>,
    /// Signed mate distance when the last score was a mate score.
    pub mate_in: Option<i32>,
    pub reached_depth: u32,
    pub thinking: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Engine worker unavailable: {0}")]
    WorkerUnavailable(#[from] WorkerError),
}

pub struct EngineSession {
    link: Option<Box<dyn WorkerLink>>,
    options: EngineOptions,
    state: SessionState,
    pending: Option<PendingRequest>,
    result: AnalysisResult,
    dispatched: u64,
    completed: u64,
    failed: bool,
}

impl EngineSession {
    pub fn new(link: Box<dyn WorkerLink>, options: EngineOptions) -> Self {
        Self {
            link: Some(link),
            options,
            state: SessionState::Uninitialized,
            pending: None,
            result: AnalysisResult::default(),
            dispatched: 0,
            completed: 0,
            failed: false,
        }
    }

    /// Start the handshake. Does nothing once it has been started.
    pub fn open(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Uninitialized {
            return Ok(());
        }
        tracing::info!("Opening engine session");
        self.send(&format_handshake())?;
        self.state = SessionState::AwaitingHandshake;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    /// Handshake complete and accepting searches.
    pub fn is_ready(&self) -> bool {
        self.state >= SessionState::Ready
    }

    /// False once a send to the worker has failed; the session is frozen.
    pub fn is_available(&self) -> bool {
        !self.failed && self.link.is_some()
    }

    /// Ask for analysis of `position` to `depth`, replacing any earlier intent.
    ///
    /// Identical consecutive requests are sent again; there is no
    /// de-duplication.
    pub fn submit(&mut self, position: impl Into<String>, depth: u32) -> Result<(), SessionError> {
        self.ensure_available()?;
        let request = PendingRequest {
            position: position.into(),
            depth,
        };

        self.result.thinking = true;
        self.result.reached_depth = 0;
        self.result.best_move = None;
        self.result.ponder_move = None;

        if self.state < SessionState::Ready {
            tracing::debug!("Engine not ready yet, holding request (depth {})", depth);
            if let Some(old) = self.pending.replace(request) {
                tracing::debug!("Superseded pending request for {}", old.position);
            }
            return Ok(());
        }

        self.send(&format_stop())?;
        self.dispatch(request)
    }

    /// Abandon the current intent: drop any pending request and stop a running search.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        self.ensure_available()?;
        self.pending = None;
        if self.state == SessionState::Searching {
            self.send(&format_stop())?;
        }
        self.result.thinking = false;
        Ok(())
    }

    /// Feed one raw output line. Returns whether anything observable changed.
    pub fn handle_line(&mut self, raw: &str) -> Result<bool, SessionError> {
        tracing::trace!("UCI << {}", raw);
        self.handle_event(parse_line(raw))
    }

    /// Apply a parsed engine event. Returns whether anything observable changed.
    pub fn handle_event(&mut self, event: EngineEvent) -> Result<bool, SessionError> {
        if self.failed {
            return Ok(false);
        }

        match event {
            EngineEvent::HandshakeAck => self.on_handshake_ack(),
            EngineEvent::ReadyAck => self.on_ready_ack(),
            EngineEvent::SearchInfo(info) => Ok(self.on_search_info(info)),
            EngineEvent::BestMove { best, ponder } => Ok(self.on_best_move(best, ponder)),
            EngineEvent::Unrecognized => Ok(false),
        }
    }

    /// Release the worker.
    pub fn close(mut self) {
        self.release();
    }

    fn on_handshake_ack(&mut self) -> Result<bool, SessionError> {
        if self.state != SessionState::AwaitingHandshake {
            tracing::debug!("Ignoring uciok in state {:?}", self.state);
            return Ok(false);
        }

        self.state = SessionState::ConfiguringOptions;
        for line in format_options(&self.options) {
            self.send(&line)?;
        }

        self.state = SessionState::AwaitingReady;
        self.send(&format_ready_check())?;
        Ok(false)
    }

    fn on_ready_ack(&mut self) -> Result<bool, SessionError> {
        if self.state != SessionState::AwaitingReady {
            tracing::debug!("Ignoring readyok in state {:?}", self.state);
            return Ok(false);
        }

        tracing::info!("Engine ready");
        self.state = SessionState::Ready;
        if let Some(request) = self.pending.take() {
            tracing::debug!("Dispatching pending request");
            self.dispatch(request)?;
        }
        Ok(true)
    }

    fn on_search_info(&mut self, info: SearchInfo) -> bool {
        if self.outstanding() > 1 {
            tracing::trace!("Dropping info from superseded search");
            return false;
        }

        self.result.reached_depth = self.result.reached_depth.max(info.depth);
        self.result.evaluation_pawns = Some(info.score.to_pawns());
        self.result.mate_in = info.score.mate_in();
        true
    }

    fn on_best_move(&mut self, best: Option<MoveCode>, ponder: Option<MoveCode>) -> bool {
        let outstanding = self.outstanding();
        if outstanding == 0 {
            tracing::debug!("Ignoring bestmove with no search outstanding");
            return false;
        }

        self.completed += 1;
        if outstanding > 1 {
            tracing::debug!("Dropping stale bestmove {:?}", best);
            return false;
        }

        tracing::debug!("Search finished: bestmove {:?}", best);
        self.result.best_move = best;
        self.result.ponder_move = ponder;
        self.result.thinking = false;
        self.state = SessionState::Ready;
        true
    }

    fn dispatch(&mut self, request: PendingRequest) -> Result<(), SessionError> {
        self.send(&format_position(&request.position))?;
        self.send(&format_go(request.depth))?;
        self.dispatched += 1;
        self.result.reached_depth = 0;
        self.state = SessionState::Searching;
        Ok(())
    }

    fn outstanding(&self) -> u64 {
        self.dispatched - self.completed
    }

    fn ensure_available(&self) -> Result<(), SessionError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(SessionError::WorkerUnavailable(WorkerError::Disconnected))
        }
    }

    fn send(&mut self, line: &str) -> Result<(), SessionError> {
        let link = self.link.as_mut().ok_or(WorkerError::Disconnected)?;
        tracing::debug!("UCI >> {}", line);
        if let Err(e) = link.post(line) {
            tracing::error!("Engine worker unavailable: {}", e);
            self.failed = true;
            return Err(e.into());
        }
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut link) = self.link.take() {
            tracing::info!("Releasing engine worker (state {:?})", self.state);
            link.terminate();
        }
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        self.release();
    }
}
