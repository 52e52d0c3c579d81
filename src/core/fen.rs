//! FEN encoding and decoding
//!
//! The board keeps no en passant field of its own: the target square is
//! derived from the last logged move, and decoding a FEN with a target
//! square logs a synthetic double push so the history-based en passant
//! generation keeps working after a mid-game load.

use super::board::{Board, CastlingRights, Color, Piece, PieceType, Square};
use super::moves::Move;
use crate::error::ChessError;

/// FEN of the standard initial position
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board from FEN notation.
    ///
    /// The clock fields may be omitted (they default to `0 1`). Castling
    /// rights whose king or rook is not on its home square are dropped.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(ChessError::fen("too few fields"));
        }
        if parts.len() > 6 {
            return Err(ChessError::fen("too many fields"));
        }

        parse_placement(&mut board, parts[0])?;

        // Parse side to move
        board.set_side_to_move(match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::fen(format!("invalid side to move '{}'", other))),
        });

        // Parse castling rights
        let mut castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.insert(CastlingRights::WHITE_KINGSIDE),
                    'Q' => castling.insert(CastlingRights::WHITE_QUEENSIDE),
                    'k' => castling.insert(CastlingRights::BLACK_KINGSIDE),
                    'q' => castling.insert(CastlingRights::BLACK_QUEENSIDE),
                    _ => return Err(ChessError::fen(format!("unknown castling right '{}'", c))),
                }
            }
        }
        board.set_castling(consistent_castling(&board, castling));

        // Parse halfmove clock and fullmove number
        let halfmove_clock = match parts.get(4) {
            Some(s) => s
                .parse()
                .map_err(|_| ChessError::fen(format!("invalid halfmove clock '{}'", s)))?,
            None => 0,
        };
        let fullmove_number = match parts.get(5) {
            Some(s) => s
                .parse()
                .map_err(|_| ChessError::fen(format!("invalid fullmove number '{}'", s)))?,
            None => 1,
        };
        board.set_clocks(halfmove_clock, fullmove_number);

        // Parse en passant
        if parts[3] != "-" {
            let target = Square::from_algebraic(parts[3])
                .ok_or_else(|| ChessError::fen(format!("invalid en passant square '{}'", parts[3])))?;
            let double_push = synthetic_double_push(&board, target)
                .ok_or_else(|| ChessError::fen(format!("impossible en passant square '{}'", parts[3])))?;
            board.push_history(double_push);
        }

        Ok(board)
    }

    /// Target square of an en passant capture available right now
    pub fn en_passant_square(&self) -> Option<Square> {
        let last = self.last_move()?;
        if !last.is_two_step() {
            return None;
        }
        Square::from_coords(last.to().file(), (last.from().row() + last.to().row()) / 2)
    }

    /// Convert the board to FEN notation
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        // Piece placement
        for row in 0..8 {
            let mut empty = 0;
            for file in 0..8 {
                if let Some(piece) = self.piece_at_coords(file, row) {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.to_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        // Side to move
        fen.push(' ');
        fen.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        // Castling rights
        fen.push(' ');
        let castling = self.castling();
        if castling.is_empty() {
            fen.push('-');
        } else {
            if castling.has(CastlingRights::WHITE_KINGSIDE) {
                fen.push('K');
            }
            if castling.has(CastlingRights::WHITE_QUEENSIDE) {
                fen.push('Q');
            }
            if castling.has(CastlingRights::BLACK_KINGSIDE) {
                fen.push('k');
            }
            if castling.has(CastlingRights::BLACK_QUEENSIDE) {
                fen.push('q');
            }
        }

        // En passant
        fen.push(' ');
        match self.en_passant_square() {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        // Halfmove clock and fullmove number
        fen.push(' ');
        fen.push_str(&self.halfmove_clock().to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number().to_string());

        fen
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), ChessError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(ChessError::fen(format!("expected 8 ranks, found {}", rows.len())));
    }

    let mut kings = [0usize; 2];
    for (row, text) in rows.iter().enumerate() {
        let mut file: u8 = 0;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(ChessError::fen(format!("invalid empty-square count '{}'", c)));
                }
                file += skip as u8;
            } else {
                let piece = Piece::from_char(c)
                    .ok_or_else(|| ChessError::fen(format!("unknown piece '{}'", c)))?;
                let sq = Square::from_coords(file, row as u8).ok_or_else(|| {
                    ChessError::fen(format!("rank {} is longer than 8 squares", 8 - row))
                })?;
                if piece.piece_type == PieceType::King {
                    kings[piece.color.index()] += 1;
                }
                board.put_piece(sq, piece);
                file += 1;
            }
            if file > 8 {
                return Err(ChessError::fen(format!("rank {} is longer than 8 squares", 8 - row)));
            }
        }
        if file != 8 {
            return Err(ChessError::fen(format!("rank {} has {} squares", 8 - row, file)));
        }
    }

    for color in Color::BOTH {
        if kings[color.index()] != 1 {
            return Err(ChessError::fen(format!(
                "expected one {} king, found {}",
                color,
                kings[color.index()]
            )));
        }
    }
    Ok(())
}

/// Keep only the rights whose king and rook still stand on their home squares
fn consistent_castling(board: &Board, requested: CastlingRights) -> CastlingRights {
    let mut rights = CastlingRights::NONE;
    for color in Color::BOTH {
        let row = color.back_row();
        let king_home = Square::from_coords(4, row)
            .is_some_and(|sq| board.piece_at(sq) == Some(Piece::new(PieceType::King, color)));
        if !king_home {
            continue;
        }
        let rook_on = |file: u8| {
            Square::from_coords(file, row)
                .is_some_and(|sq| board.piece_at(sq) == Some(Piece::new(PieceType::Rook, color)))
        };
        let kingside = CastlingRights::kingside(color);
        if requested.has(kingside) && rook_on(7) {
            rights.insert(kingside);
        }
        let queenside = CastlingRights::queenside(color);
        if requested.has(queenside) && rook_on(0) {
            rights.insert(queenside);
        }
    }
    rights
}

/// The double push that would have produced `target` as en passant square
fn synthetic_double_push(board: &Board, target: Square) -> Option<Move> {
    let mover = board.side_to_move().opposite();
    let expected_row = mover.pawn_start_row() as i8 + mover.forward();
    if target.row() as i8 != expected_row {
        return None;
    }

    let origin = target.offset(0, -mover.forward())?;
    let landing = target.offset(0, mover.forward())?;
    let pawn = Piece::new(PieceType::Pawn, mover);
    if board.piece_at(landing) != Some(pawn)
        || board.piece_at(target).is_some()
        || board.piece_at(origin).is_some()
    {
        return None;
    }
    Some(Move::new_two_step(origin, landing, pawn))
}
