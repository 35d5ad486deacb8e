//! Standard Algebraic Notation.
//!
//! Formatting follows the usual conventions: piece letter, origin
//! disambiguation only when another piece of the same kind can reach the same
//! square, `x` for captures (en passant included), `=Q` for promotions,
//! `O-O`/`O-O-O` for castling and a `+`/`#` suffix.
//!
//! Parsing is done by formatting every legal move and comparing, so the two
//! directions can never disagree.

use cozy_chess::{Board, GameStatus, Move, Piece};

use crate::types::PieceKind;
use crate::uci::{file_to_char, format_square, rank_to_char};

/// All legal moves in `board`, in cozy-chess notation.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    board.generate_moves(|mvs| {
        moves.extend(mvs);
        false
    });
    moves
}

/// Format a legal move as SAN.
///
/// `mv` must be legal in `board` and use cozy-chess castling notation (king
/// onto its own rook).
pub fn format_san(board: &Board, mv: Move) -> String {
    let mut san = body(board, mv);

    let mut after = board.clone();
    after.play_unchecked(mv);
    if !after.checkers().is_empty() {
        san.push(if after.status() == GameStatus::Won { '#' } else { '+' });
    }

    san
}

/// Resolve a SAN string to the legal move it names.
///
/// Check/mate suffixes and annotation glyphs (`!`, `?`) are optional.
pub fn parse_san(board: &Board, san: &str) -> Result<Move, SanError> {
    let wanted = strip_suffixes(san.trim());
    if wanted.is_empty() {
        return Err(SanError::InvalidFormat(san.to_string()));
    }
    // Accept the zero-digit castling spelling too
    let wanted = wanted.replace('0', "O");

    let mut found = legal_moves(board)
        .into_iter()
        .filter(|&mv| body(board, mv) == wanted);

    match (found.next(), found.next()) {
        (Some(mv), None) => Ok(mv),
        (Some(_), Some(_)) => Err(SanError::AmbiguousMove(san.to_string())),
        (None, _) => Err(SanError::NoLegalMove(san.to_string())),
    }
}

fn strip_suffixes(san: &str) -> &str {
    san.trim_end_matches(['+', '#', '!', '?'])
}

/// SAN without the check suffix.
fn body(board: &Board, mv: Move) -> String {
    let Some(piece) = board.piece_on(mv.from) else {
        return format_square(mv.from) + &format_square(mv.to);
    };

    if piece == Piece::King && board.color_on(mv.to) == Some(board.side_to_move()) {
        return if (mv.to.file() as u8) > (mv.from.file() as u8) {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let is_capture = board.color_on(mv.to) == Some(!board.side_to_move())
        || (piece == Piece::Pawn && mv.from.file() != mv.to.file());

    let mut san = String::new();
    if piece == Piece::Pawn {
        if is_capture {
            san.push(file_to_char(mv.from.file()));
        }
    } else {
        san.push(PieceKind::from(piece).to_char_upper());
        san.push_str(&disambiguation(board, mv, piece));
    }

    if is_capture {
        san.push('x');
    }
    san.push_str(&format_square(mv.to));

    if let Some(promo) = mv.promotion {
        san.push('=');
        san.push(PieceKind::from(promo).to_char_upper());
    }

    san
}

fn disambiguation(board: &Board, mv: Move, piece: Piece) -> String {
    let rivals: Vec<Move> = legal_moves(board)
        .into_iter()
        .filter(|other| {
            other.to == mv.to
                && other.from != mv.from
                && board.piece_on(other.from) == Some(piece)
        })
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let shares_file = rivals.iter().any(|o| o.from.file() == mv.from.file());
    let shares_rank = rivals.iter().any(|o| o.from.rank() == mv.from.rank());

    match (shares_file, shares_rank) {
        (false, _) => file_to_char(mv.from.file()).to_string(),
        (true, false) => rank_to_char(mv.from.rank()).to_string(),
        (true, true) => format_square(mv.from),
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SanError {
    #[error("No legal move found for: {0}")]
    NoLegalMove(String),
    #[error("Ambiguous move: {0}")]
    AmbiguousMove(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uci::parse_uci_move;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    fn san_of(fen: &str, uci: &str) -> String {
        let b = board(fen);
        format_san(&b, parse_uci_move(uci).unwrap())
    }

    #[test]
    fn test_simple_moves() {
        let start = crate::fen::STARTING_FEN;
        assert_eq!(san_of(start, "e2e4"), "e4");
        assert_eq!(san_of(start, "g1f3"), "Nf3");
    }

    #[test]
    fn test_pawn_capture() {
        // 1. e4 d5
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        assert_eq!(san_of(fen, "e4d5"), "exd5");
    }

    #[test]
    fn test_en_passant_is_a_capture() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        assert_eq!(san_of(fen, "e5d6"), "exd6");
    }

    #[test]
    fn test_castling() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(san_of(fen, "e1h1"), "O-O");
        assert_eq!(san_of(fen, "e1a1"), "O-O-O");
    }

    #[test]
    fn test_promotion_with_check() {
        let fen = "k7/4P3/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(san_of(fen, "e7e8q"), "e8=Q+");
        assert_eq!(san_of(fen, "e7e8n"), "e8=N");
    }

    #[test]
    fn test_disambiguation_by_file_and_rank() {
        // Knights on b1 and f1 both reach d2
        let fen = "4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1";
        assert_eq!(san_of(fen, "b1d2"), "Nbd2");
        // Rooks on a1 and a5 both reach a3
        let fen = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1";
        assert_eq!(san_of(fen, "a1a3"), "R1a3");
    }

    #[test]
    fn test_checkmate_suffix() {
        // Fool's mate: 1. f3 e5 2. g4 Qh4#
        let fen = "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2";
        assert_eq!(san_of(fen, "d8h4"), "Qh4#");
    }

    #[test]
    fn test_parse_san() {
        let b = Board::default();
        assert_eq!(parse_san(&b, "Nf3").unwrap(), parse_uci_move("g1f3").unwrap());
        assert_eq!(parse_san(&b, "e4!").unwrap(), parse_uci_move("e2e4").unwrap());
        assert!(matches!(parse_san(&b, "Ke2"), Err(SanError::NoLegalMove(_))));
        assert!(matches!(parse_san(&b, ""), Err(SanError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_castling_spellings() {
        let b = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let expected = parse_uci_move("e1h1").unwrap();
        assert_eq!(parse_san(&b, "O-O").unwrap(), expected);
        assert_eq!(parse_san(&b, "0-0").unwrap(), expected);
    }
}
