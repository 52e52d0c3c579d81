//! Move representation
//!
//! A move is a plain value: its kind, the two squares, the piece that ends
//! up on the destination (the mover, or the promotion piece) and the piece
//! it removes. `Board::make_move` fills in `captured` with what was actually
//! taken before logging the move, so a logged move carries everything needed
//! to take it back.

use super::board::{Piece, PieceType, Square};
use std::fmt;

/// Move type flags
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MoveType {
    Normal,
    TwoStep,
    Castling,
    EnPassant,
    Promotion,
}

/// A chess move
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    kind: MoveType,
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
}

impl Move {
    /// Create a normal move (quiet or capture)
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Self {
        Move {
            kind: MoveType::Normal,
            from,
            to,
            piece,
            captured,
        }
    }

    /// Create a pawn double push
    #[inline]
    pub const fn new_two_step(from: Square, to: Square, pawn: Piece) -> Self {
        Move {
            kind: MoveType::TwoStep,
            from,
            to,
            piece: pawn,
            captured: None,
        }
    }

    /// Create a castling move, given as the king's two-square step
    #[inline]
    pub const fn new_castling(from: Square, to: Square, king: Piece) -> Self {
        Move {
            kind: MoveType::Castling,
            from,
            to,
            piece: king,
            captured: None,
        }
    }

    /// Create an en passant move
    #[inline]
    pub const fn new_en_passant(from: Square, to: Square, pawn: Piece, victim: Piece) -> Self {
        Move {
            kind: MoveType::EnPassant,
            from,
            to,
            piece: pawn,
            captured: Some(victim),
        }
    }

    /// Create a promotion move; `promoted` is the piece placed on `to`
    #[inline]
    pub const fn new_promotion(
        from: Square,
        to: Square,
        promoted: Piece,
        captured: Option<Piece>,
    ) -> Self {
        Move {
            kind: MoveType::Promotion,
            from,
            to,
            piece: promoted,
            captured,
        }
    }

    #[inline]
    pub(crate) const fn with_captured(mut self, captured: Option<Piece>) -> Self {
        self.captured = captured;
        self
    }

    /// Get the source square
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Get the destination square
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Get the move type
    #[inline]
    pub const fn move_type(self) -> MoveType {
        self.kind
    }

    /// Piece standing on the destination after the move
    #[inline]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// Piece removed by the move
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveType::Promotion)
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind, MoveType::EnPassant)
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self.kind, MoveType::Castling)
    }

    #[inline]
    pub const fn is_two_step(self) -> bool {
        matches!(self.kind, MoveType::TwoStep)
    }

    /// Get the promotion piece type (if any)
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceType> {
        if self.is_promotion() {
            Some(self.piece.piece_type)
        } else {
            None
        }
    }

    /// Convert to coordinate notation (e.g., "e2e4", "e7e8q")
    pub fn to_uci(self) -> String {
        let from = self.from.to_algebraic();
        let to = self.to.to_algebraic();
        match self.promotion_piece() {
            Some(piece_type) => format!("{}{}{}", from, to, piece_type.to_char()),
            None => format!("{}{}", from, to),
        }
    }
}

/// Split coordinate notation into its squares and optional promotion letter.
///
/// This only checks the shape of the text; whether the move is playable is
/// decided against a board by `MoveGen::parse_move`.
pub fn parse_coordinates(s: &str) -> Option<(Square, Square, Option<PieceType>)> {
    if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
        return None;
    }

    let from = Square::from_algebraic(&s[0..2])?;
    let to = Square::from_algebraic(&s[2..4])?;
    let promo = match s.as_bytes().get(4) {
        None => None,
        Some(&c) => match c.to_ascii_lowercase() {
            b'q' => Some(PieceType::Queen),
            b'r' => Some(PieceType::Rook),
            b'b' => Some(PieceType::Bishop),
            b'n' => Some(PieceType::Knight),
            _ => return None,
        },
    };
    Some((from, to, promo))
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
