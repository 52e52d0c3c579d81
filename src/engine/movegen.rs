//! Move generation
//!
//! Pseudo-legal moves come from walking the board square by square:
//! - Knight jumps from a fixed offset table
//! - Sliding pieces (and the king's single step) from the shared ray walker
//! - Pawn pushes, captures, promotions and en passant from the move history
//!
//! Legal moves are the pseudo-legal moves that survive a make / check test /
//! unmake round trip, so every generator call that filters for legality needs
//! exclusive access to the board.

use crate::core::board::{Board, CastlingRights, Color, Piece, PieceType, Square};
use crate::core::moves::{parse_coordinates, Move};
use crate::engine::attacks::{ray, Direction, KNIGHT_OFFSETS};

/// Move generator entry points
pub struct MoveGen;

impl MoveGen {
    /// Geometrically valid moves of the piece on `sq`, ignoring checks
    pub fn pseudo_legal_moves(board: &Board, sq: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        let piece = match board.piece_at(sq) {
            Some(p) => p,
            None => return moves,
        };

        match piece.piece_type {
            PieceType::Pawn => Self::pawn_moves(board, sq, piece, &mut moves),
            PieceType::Knight => Self::knight_moves(board, sq, piece, &mut moves),
            PieceType::King => {
                Self::castling_moves(board, sq, piece, &mut moves);
                Self::sliding_moves(board, sq, piece, &mut moves);
            }
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
                Self::sliding_moves(board, sq, piece, &mut moves)
            }
        }
        moves
    }

    /// Pseudo-legal moves of every piece of `color`
    pub fn all_pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
        board
            .pieces()
            .filter(|(_, p)| p.color == color)
            .flat_map(|(sq, _)| Self::pseudo_legal_moves(board, sq))
            .collect()
    }

    /// Moves of the piece on `sq` that do not leave its own king in check
    pub fn legal_moves(board: &mut Board, sq: Square) -> Vec<Move> {
        let mover = match board.piece_at(sq) {
            Some(p) => p.color,
            None => return Vec::new(),
        };

        Self::pseudo_legal_moves(board, sq)
            .into_iter()
            .filter(|&mv| Self::keeps_king_safe(board, mv, mover))
            .collect()
    }

    /// Legal moves of every piece of `color`
    pub fn all_legal_moves(board: &mut Board, color: Color) -> Vec<Move> {
        let squares: Vec<Square> = board
            .pieces()
            .filter(|(_, p)| p.color == color)
            .map(|(sq, _)| sq)
            .collect();

        squares
            .into_iter()
            .flat_map(|sq| Self::legal_moves(board, sq))
            .collect()
    }

    /// Legal moves for the side to move
    pub fn generate_legal_moves(board: &mut Board) -> Vec<Move> {
        let color = board.side_to_move();
        Self::all_legal_moves(board, color)
    }

    /// Whether `color` has at least one legal move
    pub fn has_legal_move(board: &mut Board, color: Color) -> bool {
        let squares: Vec<Square> = board
            .pieces()
            .filter(|(_, p)| p.color == color)
            .map(|(sq, _)| sq)
            .collect();

        squares.into_iter().any(|sq| {
            Self::pseudo_legal_moves(board, sq)
                .into_iter()
                .any(|mv| Self::keeps_king_safe(board, mv, color))
        })
    }

    /// Resolve coordinate notation ("e2e4", "e7e8q") to a legal move of the
    /// piece on the start square.
    ///
    /// Promotions only match when the promotion letter is given and agrees.
    pub fn parse_move(board: &mut Board, s: &str) -> Option<Move> {
        let (from, to, promo) = parse_coordinates(s)?;
        Self::legal_moves(board, from)
            .into_iter()
            .find(|mv| mv.to() == to && (!mv.is_promotion() || mv.promotion_piece() == promo))
    }

    fn keeps_king_safe(board: &mut Board, mv: Move, mover: Color) -> bool {
        if !board.make_move(mv) {
            return false;
        }
        let safe = !board.is_in_check(mover);
        board.unmake_move();
        safe
    }

    fn pawn_moves(board: &Board, from: Square, pawn: Piece, moves: &mut Vec<Move>) {
        let color = pawn.color;
        let forward = color.forward();
        let is_enemy = |sq: Square| board.piece_at(sq).filter(|p| p.color != color);

        // Pawns about to promote only produce promotions
        if from.row() == color.pre_promotion_row() {
            for df in [1, -1] {
                if let Some(to) = from.offset(df, forward) {
                    if let Some(target) = is_enemy(to) {
                        Self::push_promotions(from, to, color, Some(target), moves);
                    }
                }
            }
            if let Some(to) = from.offset(0, forward) {
                if board.piece_at(to).is_none() {
                    Self::push_promotions(from, to, color, None, moves);
                }
            }
            return;
        }

        if let Some(one) = from.offset(0, forward) {
            if board.piece_at(one).is_none() {
                moves.push(Move::new(from, one, pawn, None));
                if from.row() == color.pawn_start_row() {
                    if let Some(two) = one.offset(0, forward) {
                        if board.piece_at(two).is_none() {
                            moves.push(Move::new_two_step(from, two, pawn));
                        }
                    }
                }
            }
        }

        for df in [1, -1] {
            if let Some(to) = from.offset(df, forward) {
                if let Some(target) = is_enemy(to) {
                    moves.push(Move::new(from, to, pawn, Some(target)));
                }
            }
        }

        // En passant against a double push made on the previous move
        if let Some(last) = board.last_move() {
            let victim_sq = last.to();
            let adjacent = victim_sq.row() == from.row()
                && (victim_sq.file() as i8 - from.file() as i8).abs() == 1;
            if last.is_two_step() && adjacent {
                if let Some(victim) = is_enemy(victim_sq) {
                    if victim.piece_type == PieceType::Pawn {
                        if let Some(to) = victim_sq.offset(0, forward) {
                            moves.push(Move::new_en_passant(from, to, pawn, victim));
                        }
                    }
                }
            }
        }
    }

    fn push_promotions(
        from: Square,
        to: Square,
        color: Color,
        captured: Option<Piece>,
        moves: &mut Vec<Move>,
    ) {
        for piece_type in PieceType::PROMOTIONS {
            moves.push(Move::new_promotion(from, to, Piece::new(piece_type, color), captured));
        }
    }

    fn knight_moves(board: &Board, from: Square, knight: Piece, moves: &mut Vec<Move>) {
        for (df, dr) in KNIGHT_OFFSETS {
            if let Some(to) = from.offset(df, dr) {
                match board.piece_at(to) {
                    None => moves.push(Move::new(from, to, knight, None)),
                    Some(target) if target.color != knight.color => {
                        moves.push(Move::new(from, to, knight, Some(target)))
                    }
                    Some(_) => {}
                }
            }
        }
    }

    /// Rook, bishop and queen rays; the king walks the same rays one step deep
    fn sliding_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        let reach = if piece.piece_type == PieceType::King { 1 } else { 7 };

        for &dir in Direction::for_piece(piece.piece_type) {
            for to in ray(from, dir).take(reach) {
                match board.piece_at(to) {
                    None => moves.push(Move::new(from, to, piece, None)),
                    Some(target) => {
                        if target.color != piece.color {
                            moves.push(Move::new(from, to, piece, Some(target)));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn castling_moves(board: &Board, from: Square, king: Piece, moves: &mut Vec<Move>) {
        let color = king.color;
        let rights = board.castling();
        let rook = Some(Piece::new(PieceType::Rook, color));
        let empty = |sq: Square| board.piece_at(sq).is_none();
        let safe = |sq: Square| !board.is_attacked(sq, color);

        if rights.has(CastlingRights::kingside(color)) {
            if let (Some(f), Some(g), Some(h)) =
                (from.offset(1, 0), from.offset(2, 0), from.offset(3, 0))
            {
                if board.piece_at(h) == rook
                    && empty(f)
                    && empty(g)
                    && safe(from)
                    && safe(f)
                    && safe(g)
                {
                    moves.push(Move::new_castling(from, g, king));
                }
            }
        }

        if rights.has(CastlingRights::queenside(color)) {
            if let (Some(d), Some(c), Some(b), Some(a)) = (
                from.offset(-1, 0),
                from.offset(-2, 0),
                from.offset(-3, 0),
                from.offset(-4, 0),
            ) {
                if board.piece_at(a) == rook
                    && empty(d)
                    && empty(c)
                    && empty(b)
                    && safe(from)
                    && safe(d)
                    && safe(c)
                {
                    moves.push(Move::new_castling(from, c, king));
                }
            }
        }
    }
}
