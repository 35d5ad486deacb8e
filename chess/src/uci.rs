//! Coordinate ("UCI") move notation: `e2e4`, `e7e8q`.

use cozy_chess::{File, Move, Piece, Rank, Square};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UciMoveError {
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    #[error("Invalid square: {0}")]
    InvalidSquare(String),
    #[error("Invalid promotion: {0}")]
    InvalidPromotion(String),
}

/// Parse coordinate move format (e2e4, e7e8q)
pub fn parse_uci_move(s: &str) -> Result<Move, UciMoveError> {
    if !s.is_ascii() || !(4..=5).contains(&s.len()) {
        return Err(UciMoveError::InvalidMove(s.to_string()));
    }

    let from = parse_square(&s[0..2])?;
    let to = parse_square(&s[2..4])?;
    let promotion = match s[4..].chars().next() {
        Some(c) => Some(
            parse_promotion(c).ok_or_else(|| UciMoveError::InvalidPromotion(s.to_string()))?,
        ),
        None => None,
    };

    Ok(Move {
        from,
        to,
        promotion,
    })
}

/// Parse a promotion letter. Only knight, bishop, rook and queen are valid.
pub fn parse_promotion(c: char) -> Option<Piece> {
    match c.to_ascii_lowercase() {
        'q' => Some(Piece::Queen),
        'r' => Some(Piece::Rook),
        'b' => Some(Piece::Bishop),
        'n' => Some(Piece::Knight),
        _ => None,
    }
}

/// Parse an algebraic square name (`e4`).
pub fn parse_square(s: &str) -> Result<Square, UciMoveError> {
    let mut chars = s.chars();
    let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(UciMoveError::InvalidSquare(s.to_string()));
    };
    let file = file_from_char(f).ok_or_else(|| UciMoveError::InvalidSquare(s.to_string()))?;
    let rank = rank_from_char(r).ok_or_else(|| UciMoveError::InvalidSquare(s.to_string()))?;
    Ok(Square::new(file, rank))
}

pub(crate) fn file_from_char(c: char) -> Option<File> {
    match c {
        'a' => Some(File::A),
        'b' => Some(File::B),
        'c' => Some(File::C),
        'd' => Some(File::D),
        'e' => Some(File::E),
        'f' => Some(File::F),
        'g' => Some(File::G),
        'h' => Some(File::H),
        _ => None,
    }
}

pub(crate) fn rank_from_char(c: char) -> Option<Rank> {
    match c {
        '1' => Some(Rank::First),
        '2' => Some(Rank::Second),
        '3' => Some(Rank::Third),
        '4' => Some(Rank::Fourth),
        '5' => Some(Rank::Fifth),
        '6' => Some(Rank::Sixth),
        '7' => Some(Rank::Seventh),
        '8' => Some(Rank::Eighth),
        _ => None,
    }
}

pub(crate) fn file_to_char(file: File) -> char {
    match file {
        File::A => 'a',
        File::B => 'b',
        File::C => 'c',
        File::D => 'd',
        File::E => 'e',
        File::F => 'f',
        File::G => 'g',
        File::H => 'h',
    }
}

pub(crate) fn rank_to_char(rank: Rank) -> char {
    match rank {
        Rank::First => '1',
        Rank::Second => '2',
        Rank::Third => '3',
        Rank::Fourth => '4',
        Rank::Fifth => '5',
        Rank::Sixth => '6',
        Rank::Seventh => '7',
        Rank::Eighth => '8',
    }
}

/// Format a square as `e4`.
pub fn format_square(sq: Square) -> String {
    format!("{}{}", file_to_char(sq.file()), rank_to_char(sq.rank()))
}

/// Convert coordinate castling notation to cozy_chess notation
///
/// Engines use the king-moves-two-squares form: e1g1, e1c1, e8g8, e8c8.
/// cozy_chess uses king-to-rook notation: e1h1, e1a1, e8h8, e8a8.
///
/// The converted move is only returned when it is in `legal_moves`; anything
/// else comes back unchanged.
pub fn convert_uci_castling_to_cozy(mv: Move, legal_moves: &[Move]) -> Move {
    let is_rank_1_or_8 = matches!(mv.from.rank(), Rank::First | Rank::Eighth);
    let is_e_file = matches!(mv.from.file(), File::E);
    let is_g_or_c_file = matches!(mv.to.file(), File::G | File::C);

    let same_rank = mv.from.rank() == mv.to.rank();

    if is_rank_1_or_8 && is_e_file && is_g_or_c_file && same_rank && mv.promotion.is_none() {
        let rook_file = if mv.to.file() == File::G { File::H } else { File::A };
        let converted = Move {
            from: mv.from,
            to: Square::new(rook_file, mv.from.rank()),
            promotion: None,
        };

        if legal_moves.contains(&converted) {
            return converted;
        }
    }

    mv
}

/// Format a move in coordinate notation (e.g., "e2e4", "e7e8q")
pub fn format_uci_move(mv: Move) -> String {
    let mut s = format!("{}{}", format_square(mv.from), format_square(mv.to));
    if let Some(promo) = mv.promotion {
        s.push(crate::types::PieceKind::from(promo).to_char_lower());
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uci_move() {
        let mv = Move {
            from: Square::new(File::E, Rank::Second),
            to: Square::new(File::E, Rank::Fourth),
            promotion: None,
        };
        assert_eq!(format_uci_move(mv), "e2e4");
    }

    #[test]
    fn test_parse_promotion_move() {
        let mv = parse_uci_move("e7e8q").unwrap();
        assert_eq!(mv.from, Square::new(File::E, Rank::Seventh));
        assert_eq!(mv.to, Square::new(File::E, Rank::Eighth));
        assert_eq!(mv.promotion, Some(Piece::Queen));
        assert_eq!(format_uci_move(mv), "e7e8q");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_uci_move("(none)"), Err(UciMoveError::InvalidMove(_))));
        assert!(matches!(parse_uci_move("e2"), Err(UciMoveError::InvalidMove(_))));
        assert!(matches!(parse_uci_move("e7e8k"), Err(UciMoveError::InvalidPromotion(_))));
        assert!(matches!(parse_uci_move("i2e4"), Err(UciMoveError::InvalidSquare(_))));
    }

    #[test]
    fn test_castling_conversion() {
        let board: cozy_chess::Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let mut legal = Vec::new();
        board.generate_moves(|mvs| {
            legal.extend(mvs);
            false
        });

        let kingside = convert_uci_castling_to_cozy(parse_uci_move("e1g1").unwrap(), &legal);
        assert_eq!(format_uci_move(kingside), "e1h1");
        let queenside = convert_uci_castling_to_cozy(parse_uci_move("e1c1").unwrap(), &legal);
        assert_eq!(format_uci_move(queenside), "e1a1");

        // Not a castling move: returned as-is
        let quiet = parse_uci_move("a1a5").unwrap();
        assert_eq!(convert_uci_castling_to_cozy(quiet, &legal), quiet);
    }
}
