use cozy_chess::{Board, GameStatus, Move, Square};
use serde::{Deserialize, Serialize};

use crate::san::{format_san, legal_moves, parse_san};
use crate::types::{PieceKind, PlayerSide};
use crate::uci::{convert_uci_castling_to_cozy, parse_uci_move};

/// Main game state wrapper around cozy-chess Board
#[derive(Debug, Clone)]
pub struct Game {
    position: Board,
    history: Vec<HistoryEntry>,
    start_position: StartPosition,
    first_move: (u16, PlayerSide),
}

/// One played move
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub mv: Move,
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub side: PlayerSide,
    pub san: String,
    pub fen: String, // FEN after this move
}

/// Starting position of the game
#[derive(Debug, Clone)]
pub enum StartPosition {
    Standard,
    Fen(String),
}

/// Result of applying a move to a position without keeping a game around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub fen_after: String,
    pub san: String,
    pub piece: PieceKind,
}

/// Coarse game state for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl Game {
    /// Create a new game from the standard starting position
    pub fn new() -> Self {
        Self {
            position: Board::default(),
            history: Vec::new(),
            start_position: StartPosition::Standard,
            first_move: (1, PlayerSide::White),
        }
    }

    /// Create a game from a FEN string
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let position = crate::fen::parse_fen(fen)?;
        let first_move = (position.fullmove_number(), position.side_to_move().into());
        Ok(Self {
            position,
            history: Vec::new(),
            start_position: StartPosition::Fen(fen.trim().to_string()),
            first_move,
        })
    }

    /// Get the current board position
    pub fn position(&self) -> &Board {
        &self.position
    }

    /// Get the move history
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Move number and side of the first move of the game, from the
    /// starting position's fullmove counter.
    pub fn first_move(&self) -> (u16, PlayerSide) {
        self.first_move
    }

    /// SAN of every move played so far, in order.
    pub fn san_history(&self) -> Vec<String> {
        self.history.iter().map(|e| e.san.clone()).collect()
    }

    /// Make a move on the board
    pub fn make_move(&mut self, mv: Move) -> Result<HistoryEntry, GameError> {
        if !self.position.is_legal(mv) {
            return Err(GameError::IllegalMove(crate::uci::format_uci_move(mv)));
        }

        let piece = self
            .position
            .piece_on(mv.from)
            .ok_or_else(|| GameError::IllegalMove(crate::uci::format_uci_move(mv)))?;
        let side = PlayerSide::from(self.position.side_to_move());

        // SAN has to be computed against the position before the move
        let san = format_san(&self.position, mv);
        self.position.play_unchecked(mv);

        let entry = HistoryEntry {
            mv,
            from: mv.from,
            to: mv.to,
            piece: piece.into(),
            side,
            san,
            fen: self.to_fen(),
        };

        self.history.push(entry.clone());

        Ok(entry)
    }

    /// Make a move given as text: SAN (`Nf3`, `O-O`) or coordinate (`g1f3`, `e1g1`).
    pub fn make_move_text(&mut self, text: &str) -> Result<HistoryEntry, GameError> {
        let mv = self.resolve_move_text(text)?;
        self.make_move(mv)
    }

    fn resolve_move_text(&self, text: &str) -> Result<Move, GameError> {
        let text = text.trim();
        if let Ok(mv) = parse_uci_move(text) {
            let converted = convert_uci_castling_to_cozy(mv, &self.legal_moves());
            if self.position.is_legal(converted) {
                return Ok(converted);
            }
        }

        parse_san(&self.position, text).map_err(|e| GameError::IllegalMove(e.to_string()))
    }

    /// Undo the last move
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.history.pop().is_none() {
            return Err(GameError::NothingToUndo);
        }

        self.rebuild_position()
    }

    /// Get all legal moves for the current position
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position)
    }

    /// Get the current game status
    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    /// Check/mate/stalemate classification of the current position.
    pub fn state(&self) -> GameState {
        let in_check = !self.position.checkers().is_empty();
        match (self.position.status(), in_check) {
            (GameStatus::Won, _) => GameState::Checkmate,
            (GameStatus::Drawn, false) if self.legal_moves().is_empty() => GameState::Stalemate,
            (GameStatus::Drawn, _) => GameState::Draw,
            (GameStatus::Ongoing, true) => GameState::Check,
            (GameStatus::Ongoing, false) => GameState::Ongoing,
        }
    }

    /// Get the side to move
    pub fn side_to_move(&self) -> PlayerSide {
        self.position.side_to_move().into()
    }

    /// Export position to FEN string
    pub fn to_fen(&self) -> String {
        crate::fen::format_fen(&self.position)
    }

    /// Rebuild position from start + history (for undo)
    fn rebuild_position(&mut self) -> Result<(), GameError> {
        let mut board = match &self.start_position {
            StartPosition::Standard => Board::default(),
            StartPosition::Fen(fen) => crate::fen::parse_fen(fen)?,
        };

        for entry in &self.history {
            board
                .try_play(entry.mv)
                .map_err(|_| GameError::IllegalMove(crate::uci::format_uci_move(entry.mv)))?;
        }

        self.position = board;
        Ok(())
    }
}

/// Apply a coordinate move to `fen` and report the resulting position and SAN.
///
/// Engine-style castling (`e1g1`) is accepted. Nothing is kept: this is the
/// stateless "would this move be legal here" check used to vet engine output.
pub fn apply_coordinate_move(fen: &str, mv: Move) -> Result<AppliedMove, GameError> {
    let mut board = crate::fen::parse_fen(fen)?;
    let mv = convert_uci_castling_to_cozy(mv, &legal_moves(&board));
    if !board.is_legal(mv) {
        return Err(GameError::IllegalMove(crate::uci::format_uci_move(mv)));
    }

    let piece = board
        .piece_on(mv.from)
        .ok_or_else(|| GameError::IllegalMove(crate::uci::format_uci_move(mv)))?;
    let san = format_san(&board, mv);
    board.play_unchecked(mv);

    Ok(AppliedMove {
        fen_after: crate::fen::format_fen(&board),
        san,
        piece: piece.into(),
    })
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GameError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("FEN parse error: {0}")]
    FenError(#[from] crate::fen::FenError),
}
