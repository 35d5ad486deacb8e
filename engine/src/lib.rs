//! Client side of the UCI protocol: line codec, session state machine and
//! the worker transports that carry the lines to an engine.

#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod session;
pub mod stockfish;
pub mod uci;
pub mod worker;

pub use session::{AnalysisResult, EngineSession, PendingRequest, SessionError, SessionState};
pub use stockfish::{StockfishConfig, StockfishLauncher};
pub use uci::{parse_line, EngineOptions};
pub use worker::{ChannelLink, EngineHandle, EngineLauncher, WorkerError, WorkerLink};

/// Evaluation reported for a mate in either direction, in pawns.
pub const MATE_SENTINEL_PAWNS: f64 = 100.0;

/// Coordinate move as sent by the engine (`e2e4`, `e7e8q`).
///
/// Opaque here; only the rules engine decides whether it means anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveCode(String);

impl MoveCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MoveCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Events parsed from engine output
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// `uciok`
    HandshakeAck,
    /// `readyok`
    ReadyAck,
    SearchInfo(SearchInfo),
    /// `best == None` means the engine had no legal move (`bestmove (none)`).
    BestMove {
        best: Option<MoveCode>,
        ponder: Option<MoveCode>,
    },
    Unrecognized,
}

/// Progress of a running search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u32,
    pub score: Score,
}

/// Engine score, from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Centipawns(i32),
    Mate(i32), // Negative for being mated
}

impl Score {
    /// Evaluation in pawns. Mate scores collapse to ±[`MATE_SENTINEL_PAWNS`].
    pub fn to_pawns(self) -> f64 {
        match self {
            Self::Centipawns(cp) => f64::from(cp) / 100.0,
            Self::Mate(m) if m > 0 => MATE_SENTINEL_PAWNS,
            Self::Mate(_) => -MATE_SENTINEL_PAWNS,
        }
    }

    /// Signed mate distance, if this is a mate score.
    pub fn mate_in(self) -> Option<i32> {
        match self {
            Self::Mate(m) => Some(m),
            Self::Centipawns(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_to_pawns() {
        assert_eq!(Score::Centipawns(35).to_pawns(), 0.35);
        assert_eq!(Score::Centipawns(-120).to_pawns(), -1.2);
        assert_eq!(Score::Mate(3).to_pawns(), 100.0);
        assert_eq!(Score::Mate(-1).to_pawns(), -100.0);
        // Already mated: the side to move is the losing side
        assert_eq!(Score::Mate(0).to_pawns(), -100.0);
    }

    #[test]
    fn test_mate_distance_kept_separately() {
        assert_eq!(Score::Mate(-4).mate_in(), Some(-4));
        assert_eq!(Score::Centipawns(10).mate_in(), None);
    }
}
