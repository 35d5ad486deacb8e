use chess::{GameState, OpeningEntry, PieceKind, PlayerSide};
use serde::Serialize;

/// Evaluations beyond this many pawns pin the bar to one end.
const EVAL_BAR_RANGE: f64 = 5.0;

/// Complete, immutable picture of the advisor.
/// Sent to subscribers on every change and on subscribe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisorView {
    pub id: String,
    pub fen: String,
    pub side_to_move: PlayerSide,
    pub player_side: PlayerSide,
    pub player_to_move: bool,
    /// Moves played, in SAN.
    pub history: Vec<String>,
    /// Fullmove number of the first entry in `history`.
    pub first_move_number: u16,
    /// Side that played the first entry in `history`.
    pub first_mover: PlayerSide,
    /// Suggested move in SAN, validated against the current position.
    pub best_move: Option<String>,
    pub best_move_code: Option<String>,
    /// Pawns, from the point of view of the side that was to move when scored.
    pub evaluation: Option<f64>,
    /// Same evaluation from White's point of view.
    pub white_evaluation: Option<f64>,
    pub mate_in: Option<i32>,
    pub reached_depth: u32,
    pub thinking: bool,
    pub requested_depth: u32,
    pub opening: Option<OpeningEntry>,
    pub status: GameState,
    pub engine_available: bool,
    pub explanation: String,
}

impl AdvisorView {
    pub fn evaluation_text(&self) -> String {
        format_evaluation(self.white_evaluation)
    }

    pub fn eval_bar(&self) -> f64 {
        eval_bar_percent(self.white_evaluation)
    }
}

/// `+0.35`, `-1.20`, `M+`/`M-` for mate sentinels, a dash when unknown.
pub fn format_evaluation(evaluation: Option<f64>) -> String {
    match evaluation {
        None => "—".to_string(),
        Some(e) if e >= engine::MATE_SENTINEL_PAWNS => "M+".to_string(),
        Some(e) if e <= -engine::MATE_SENTINEL_PAWNS => "M-".to_string(),
        Some(e) if e > 0.0 => format!("+{:.2}", e),
        Some(e) => format!("{:.2}", e),
    }
}

/// Fill of an evaluation bar, 0-100 with 50 for equal or unknown.
pub fn eval_bar_percent(evaluation: Option<f64>) -> f64 {
    match evaluation {
        None => 50.0,
        Some(e) => {
            let clamped = e.clamp(-EVAL_BAR_RANGE, EVAL_BAR_RANGE);
            50.0 + clamped * (50.0 / EVAL_BAR_RANGE)
        }
    }
}

const CASTLING_NOTES: &[&str] = &[
    "Castling protects the king and activates the rook",
    "Essential for king safety",
    "Connects the rooks",
];

const PAWN_NOTES: &[&str] = &[
    "Controls the center and creates space",
    "Advances pawns for better position",
    "Opens lines for pieces",
    "Gains space in the center",
    "Fights for central control",
];

fn piece_notes(piece: PieceKind) -> &'static [&'static str] {
    match piece {
        PieceKind::Knight => &[
            "Develops the knight to an active square",
            "Knight moves toward the center",
            "Improves piece activity",
        ],
        PieceKind::Bishop => &[
            "Develops the bishop to a strong diagonal",
            "Controls important squares",
            "Prepares for castling",
        ],
        PieceKind::Rook => &[
            "Activates the rook on an open file",
            "Doubles rooks or improves positioning",
            "Controls the open file",
        ],
        PieceKind::Queen => &[
            "Activates the queen strategically",
            "Creates threats while staying safe",
            "Improves queen positioning",
        ],
        PieceKind::King => &[
            "Improves king safety",
            "King moves to a safer square",
            "Activates the king in the endgame",
        ],
        PieceKind::Pawn => PAWN_NOTES,
    }
}

/// One-line note on the suggested move.
///
/// The phrase depends only on the move, so the same suggestion always reads
/// the same.
pub fn explain_move(suggestion: Option<(&str, PieceKind)>, player_to_move: bool) -> String {
    let Some((san, piece)) = suggestion else {
        return if player_to_move {
            "Analyzing position...".to_string()
        } else {
            "Waiting for opponent's move".to_string()
        };
    };

    let notes = if san.starts_with("O-O") {
        CASTLING_NOTES
    } else {
        piece_notes(piece)
    };
    let pick = san.bytes().map(usize::from).sum::<usize>() % notes.len();
    notes[pick].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_evaluation() {
        assert_eq!(format_evaluation(None), "—");
        assert_eq!(format_evaluation(Some(0.35)), "+0.35");
        assert_eq!(format_evaluation(Some(-1.2)), "-1.20");
        assert_eq!(format_evaluation(Some(0.0)), "0.00");
        assert_eq!(format_evaluation(Some(100.0)), "M+");
        assert_eq!(format_evaluation(Some(-100.0)), "M-");
    }

    #[test]
    fn test_eval_bar_percent() {
        assert_eq!(eval_bar_percent(None), 50.0);
        assert_eq!(eval_bar_percent(Some(0.0)), 50.0);
        assert_eq!(eval_bar_percent(Some(2.5)), 75.0);
        assert_eq!(eval_bar_percent(Some(-5.0)), 0.0);
        assert_eq!(eval_bar_percent(Some(100.0)), 100.0);
        assert_eq!(eval_bar_percent(Some(-42.0)), 0.0);
    }

    #[test]
    fn test_explanation_without_move() {
        assert_eq!(explain_move(None, true), "Analyzing position...");
        assert_eq!(explain_move(None, false), "Waiting for opponent's move");
    }

    #[test]
    fn test_explanation_is_deterministic() {
        let first = explain_move(Some(("Nf3", PieceKind::Knight)), true);
        assert_eq!(first, explain_move(Some(("Nf3", PieceKind::Knight)), true));
        assert!(piece_notes(PieceKind::Knight).contains(&first.as_str()));
    }

    #[test]
    fn test_explanation_by_kind() {
        let castle = explain_move(Some(("O-O", PieceKind::King)), true);
        assert!(CASTLING_NOTES.contains(&castle.as_str()));

        let pawn = explain_move(Some(("e4", PieceKind::Pawn)), true);
        assert!(PAWN_NOTES.contains(&pawn.as_str()));
    }
}
