//! The rules-engine seam: legality and display notation for engine moves.

use chess::{apply_coordinate_move, parse_uci_move, AppliedMove, Game, GameError, UciMoveError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Invalid move notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

impl From<UciMoveError> for RulesError {
    fn from(e: UciMoveError) -> Self {
        Self::InvalidNotation(e.to_string())
    }
}

impl From<GameError> for RulesError {
    fn from(e: GameError) -> Self {
        match e {
            GameError::FenError(e) => Self::InvalidPosition(e.to_string()),
            other => Self::IllegalMove(other.to_string()),
        }
    }
}

/// Decides whether a coordinate move is legal in a position and how it reads.
pub trait RulesEngine: Send + Sync {
    /// Apply `from`-`to` (plus optional promotion letter) to `fen`.
    fn apply_move(
        &self,
        fen: &str,
        from: &str,
        to: &str,
        promotion: Option<char>,
    ) -> Result<AppliedMove, RulesError>;

    /// Moves played so far, in display notation.
    fn legal_history(&self, game: &Game) -> Vec<String>;
}

/// Standard chess rules backed by the `chess` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl RulesEngine for StandardRules {
    fn apply_move(
        &self,
        fen: &str,
        from: &str,
        to: &str,
        promotion: Option<char>,
    ) -> Result<AppliedMove, RulesError> {
        let mut code = format!("{}{}", from, to);
        code.extend(promotion);
        let mv = parse_uci_move(&code)?;
        Ok(apply_coordinate_move(fen, mv)?)
    }

    fn legal_history(&self, game: &Game) -> Vec<String> {
        game.san_history()
    }
}
