//! Chess rules, notation and opening identification.
//!
//! Wraps cozy-chess for legality and move generation, and adds the notation
//! layers the advisor needs: FEN, SAN and coordinate moves.

pub mod fen;
pub mod game;
pub mod openings;
pub mod san;
pub mod types;
pub mod uci;

pub use fen::{FenError, STARTING_FEN};
pub use game::{apply_coordinate_move, AppliedMove, Game, GameError, GameState, HistoryEntry};
pub use openings::{match_opening, OpeningBook, OpeningEntry};
pub use san::SanError;
pub use types::{PieceKind, PlayerSide};
pub use uci::{convert_uci_castling_to_cozy, format_uci_move, parse_uci_move, UciMoveError};
