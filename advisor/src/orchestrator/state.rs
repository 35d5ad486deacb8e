use std::sync::Arc;

use chess::{match_opening, Game, GameError, PieceKind, PlayerSide};
use engine::{parse_line, EngineEvent, EngineLauncher, EngineOptions, EngineSession, MoveCode};
use tokio::sync::mpsc;

use super::commands::{check_depth, AdvisorError};
use super::view::{explain_move, AdvisorView};
use crate::rules::RulesEngine;

/// A running engine: its protocol session plus the worker's output.
pub(crate) struct EngineConnection {
    pub session: EngineSession,
    pub lines: mpsc::Receiver<String>,
}

/// A best move that passed the rules engine for the current position.
#[derive(Debug, Clone)]
pub(crate) struct Suggestion {
    pub code: MoveCode,
    pub san: String,
    pub piece: PieceKind,
}

/// Internal mutable state, owned entirely by the advisor actor. No locks.
pub(crate) struct AdvisorState {
    pub id: String,
    pub game: Game,
    pub player_side: PlayerSide,
    pub depth: u32,
    pub engine: Option<EngineConnection>,
    pub suggestion: Option<Suggestion>,
    /// Side to move when the displayed evaluation was produced.
    pub evaluation_side: Option<PlayerSide>,
    launcher: Arc<dyn EngineLauncher>,
    rules: Arc<dyn RulesEngine>,
    options: EngineOptions,
}

impl AdvisorState {
    pub fn new(
        id: String,
        game: Game,
        player_side: PlayerSide,
        depth: u32,
        launcher: Arc<dyn EngineLauncher>,
        rules: Arc<dyn RulesEngine>,
        options: EngineOptions,
    ) -> Self {
        Self {
            id,
            game,
            player_side,
            depth,
            engine: None,
            suggestion: None,
            evaluation_side: None,
            launcher,
            rules,
            options,
        }
    }

    /// Launch a fresh engine and ask it about the current position.
    ///
    /// A launch failure leaves the advisor without an engine rather than
    /// failing: the board keeps working and the view says so.
    pub fn start_engine(&mut self) {
        self.release_engine();

        let handle = match self.launcher.launch() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!("Engine unavailable: {}", e);
                return;
            }
        };

        let mut session = EngineSession::new(handle.link, self.options);
        if let Err(e) = session.open() {
            tracing::warn!("Engine handshake could not start: {}", e);
            return;
        }

        self.engine = Some(EngineConnection {
            session,
            lines: handle.lines,
        });
        self.submit_current();
    }

    /// Close the engine session, if any. Releases the worker.
    pub fn release_engine(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.session.close();
        }
        self.suggestion = None;
        self.evaluation_side = None;
    }

    pub fn engine_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Next raw line from the engine. Never resolves while there is no engine;
    /// `None` means the engine's output ended.
    pub async fn next_engine_line(&mut self) -> Option<String> {
        match self.engine.as_mut() {
            Some(engine) => engine.lines.recv().await,
            None => std::future::pending().await,
        }
    }

    /// Feed one engine line to the session. Returns whether the view changed.
    pub fn apply_engine_line(&mut self, line: &str) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };

        tracing::trace!("UCI << {}", line);
        let event = parse_line(line);
        // Mated or stalemated positions are scored at depth 0
        let is_score = matches!(event, EngineEvent::SearchInfo(_));

        match engine.session.handle_event(event) {
            Ok(false) => false,
            Ok(true) => {
                if is_score {
                    self.evaluation_side = Some(self.game.side_to_move());
                }
                self.refresh_suggestion();
                true
            }
            Err(e) => {
                self.engine_lost(&e.to_string());
                true
            }
        }
    }

    /// Drop an engine that stopped answering.
    pub fn engine_lost(&mut self, reason: &str) {
        tracing::warn!("Engine lost: {}", reason);
        self.release_engine();
    }

    /// Send the current position to the engine. No-op without an engine.
    pub fn submit_current(&mut self) {
        self.suggestion = None;
        let fen = self.game.to_fen();
        let depth = self.depth;

        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Err(e) = engine.session.submit(fen, depth) {
            self.engine_lost(&e.to_string());
        }
    }

    /// Re-derive the displayed suggestion from the session's best move.
    fn refresh_suggestion(&mut self) {
        let best = self
            .engine
            .as_ref()
            .and_then(|engine| engine.session.result().best_move.clone());

        // No move: nothing for the rules engine to check
        let Some(code) = best else {
            self.suggestion = None;
            return;
        };

        self.suggestion = self.validate(&code);
    }

    fn validate(&self, code: &MoveCode) -> Option<Suggestion> {
        let raw = code.as_str();
        let (Some(from), Some(to)) = (raw.get(0..2), raw.get(2..4)) else {
            tracing::debug!("Discarding malformed best move {}", raw);
            return None;
        };
        let promotion = raw.get(4..).and_then(|rest| rest.chars().next());

        match self
            .rules
            .apply_move(&self.game.to_fen(), from, to, promotion)
        {
            Ok(applied) => Some(Suggestion {
                code: code.clone(),
                san: applied.san,
                piece: applied.piece,
            }),
            Err(e) => {
                tracing::debug!("Discarding best move {} for this position: {}", raw, e);
                None
            }
        }
    }

    pub fn apply_move(&mut self, text: &str) -> Result<AdvisorView, AdvisorError> {
        let entry = self.game.make_move_text(text).map_err(|e| match e {
            GameError::IllegalMove(_) => AdvisorError::IllegalMove(text.to_string()),
            other => AdvisorError::Internal(other.to_string()),
        })?;
        tracing::info!("Move played: {}", entry.san);
        self.submit_current();
        Ok(self.view())
    }

    pub fn apply_undo(&mut self) -> Result<AdvisorView, AdvisorError> {
        self.game.undo().map_err(|e| match e {
            GameError::NothingToUndo => AdvisorError::NothingToUndo,
            other => AdvisorError::Internal(other.to_string()),
        })?;
        self.submit_current();
        Ok(self.view())
    }

    pub fn apply_new_game(&mut self, fen: Option<String>) -> Result<AdvisorView, AdvisorError> {
        self.game = match fen {
            Some(ref f) => Game::from_fen(f).map_err(|e| AdvisorError::InvalidFen(e.to_string()))?,
            None => Game::new(),
        };
        self.submit_current();
        Ok(self.view())
    }

    /// Change the search depth and re-analyse with the same engine.
    pub fn apply_depth(&mut self, depth: u32) -> Result<AdvisorView, AdvisorError> {
        self.depth = check_depth(depth)?;
        self.submit_current();
        Ok(self.view())
    }

    pub fn stop_analysis(&mut self) -> Result<(), AdvisorError> {
        let engine = self.engine.as_mut().ok_or(AdvisorError::EngineUnavailable)?;
        if let Err(e) = engine.session.stop() {
            self.engine_lost(&e.to_string());
            return Err(AdvisorError::EngineUnavailable);
        }
        Ok(())
    }

    /// Build a full view of the current state.
    pub fn view(&self) -> AdvisorView {
        let history = self.rules.legal_history(&self.game);
        let opening = match_opening(&history).cloned();
        let side_to_move = self.game.side_to_move();
        let player_to_move = side_to_move == self.player_side;
        let (first_move_number, first_mover) = self.game.first_move();
        let result = self.engine.as_ref().map(|engine| engine.session.result());

        let evaluation = result.and_then(|r| r.evaluation_pawns);
        let white_evaluation = match (evaluation, self.evaluation_side) {
            (Some(e), Some(PlayerSide::White)) => Some(e),
            (Some(e), Some(PlayerSide::Black)) => Some(-e),
            _ => None,
        };

        AdvisorView {
            id: self.id.clone(),
            fen: self.game.to_fen(),
            side_to_move,
            player_side: self.player_side,
            player_to_move,
            history,
            first_move_number,
            first_mover,
            best_move: self.suggestion.as_ref().map(|s| s.san.clone()),
            best_move_code: self.suggestion.as_ref().map(|s| s.code.to_string()),
            evaluation,
            white_evaluation,
            mate_in: result.and_then(|r| r.mate_in),
            reached_depth: result.map_or(0, |r| r.reached_depth),
            thinking: result.is_some_and(|r| r.thinking),
            requested_depth: self.depth,
            opening,
            status: self.game.state(),
            engine_available: self.engine_available(),
            explanation: explain_move(
                self.suggestion.as_ref().map(|s| (s.san.as_str(), s.piece)),
                player_to_move,
            ),
        }
    }
}
