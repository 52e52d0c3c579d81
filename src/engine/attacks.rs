//! Attack detection
//!
//! Sliding attacks are found by walking rays out of the target square. The
//! same direction table and ray walker drive sliding-piece move generation,
//! so the eight ray directions are written down exactly once.

use crate::core::board::{Board, Color, Piece, PieceType, Square};

/// A ray direction as (file step, row step); rows grow toward rank 1
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Direction {
    pub file: i8,
    pub row: i8,
}

impl Direction {
    pub const NORTH: Direction = Direction { file: 0, row: -1 };
    pub const SOUTH: Direction = Direction { file: 0, row: 1 };
    pub const EAST: Direction = Direction { file: 1, row: 0 };
    pub const WEST: Direction = Direction { file: -1, row: 0 };
    pub const NORTH_EAST: Direction = Direction { file: 1, row: -1 };
    pub const NORTH_WEST: Direction = Direction { file: -1, row: -1 };
    pub const SOUTH_EAST: Direction = Direction { file: 1, row: 1 };
    pub const SOUTH_WEST: Direction = Direction { file: -1, row: 1 };

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NORTH_EAST,
        Direction::NORTH_WEST,
        Direction::SOUTH_EAST,
        Direction::SOUTH_WEST,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
        Direction::NORTH_EAST,
        Direction::NORTH_WEST,
        Direction::SOUTH_EAST,
        Direction::SOUTH_WEST,
    ];

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.file != 0 && self.row != 0
    }

    /// Directions a piece type moves along, empty for knights and pawns
    pub fn for_piece(piece_type: PieceType) -> &'static [Direction] {
        match piece_type {
            PieceType::Rook => &Direction::ORTHOGONAL,
            PieceType::Bishop => &Direction::DIAGONAL,
            PieceType::Queen | PieceType::King => &Direction::ALL,
            PieceType::Knight | PieceType::Pawn => &[],
        }
    }
}

/// Knight jumps as (file step, row step)
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Squares along a ray, nearest first, stopping at the board edge
pub fn ray(from: Square, dir: Direction) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(dir.file, dir.row), move |sq| {
        sq.offset(dir.file, dir.row)
    })
}

/// Whether `piece`, seen `distance` steps away along `dir` from the target,
/// attacks the target.
///
/// `dir` points from the target toward the piece, so a pawn attacks when the
/// ray runs against its own direction of advance.
pub fn attacks_along(piece: Piece, dir: Direction, distance: usize) -> bool {
    match piece.piece_type {
        PieceType::Rook => !dir.is_diagonal(),
        PieceType::Bishop => dir.is_diagonal(),
        PieceType::Queen => true,
        PieceType::King => distance == 1,
        PieceType::Pawn => {
            distance == 1 && dir.is_diagonal() && dir.row == -piece.color.forward()
        }
        PieceType::Knight => false,
    }
}

impl Board {
    /// Check if a square is attacked.
    ///
    /// When the square is occupied the defender is the occupant's color and
    /// `color` is ignored; on an empty square the defender is `color`.
    pub fn is_attacked(&self, sq: Square, color: Color) -> bool {
        let defender = self.piece_at(sq).map_or(color, |p| p.color);

        for dir in Direction::ALL {
            for (step, target) in ray(sq, dir).enumerate() {
                if let Some(piece) = self.piece_at(target) {
                    if piece.color != defender && attacks_along(piece, dir, step + 1) {
                        return true;
                    }
                    break;
                }
            }
        }

        KNIGHT_OFFSETS.iter().any(|&(df, dr)| {
            sq.offset(df, dr)
                .and_then(|target| self.piece_at(target))
                .is_some_and(|p| p.piece_type == PieceType::Knight && p.color != defender)
        })
    }

    /// Check if the king of `color` is attacked
    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), color)
    }
}
