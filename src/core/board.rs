//! Chess board representation
//!
//! This module provides the mailbox board, its value types, and the
//! reversible move application (`make_move` / `unmake_move`).

use super::moves::{Move, MoveType};
use std::fmt;

/// Square representation (0-63, a8=0, h1=63)
///
/// Squares are numbered rank-major starting from black's back rank, so the
/// row of a square is `0` for rank 8 and `7` for rank 1. A `Square` is always
/// on the board; raw indices go through [`Square::new`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Square(u8);

impl Square {
    // Rank 8
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    // Rank 7
    pub const A7: Square = Square(8);
    pub const B7: Square = Square(9);
    pub const C7: Square = Square(10);
    pub const D7: Square = Square(11);
    pub const E7: Square = Square(12);
    pub const F7: Square = Square(13);
    pub const G7: Square = Square(14);
    pub const H7: Square = Square(15);
    // Rank 6
    pub const A6: Square = Square(16);
    pub const B6: Square = Square(17);
    pub const C6: Square = Square(18);
    pub const D6: Square = Square(19);
    pub const E6: Square = Square(20);
    pub const F6: Square = Square(21);
    pub const G6: Square = Square(22);
    pub const H6: Square = Square(23);
    // Rank 5
    pub const A5: Square = Square(24);
    pub const B5: Square = Square(25);
    pub const C5: Square = Square(26);
    pub const D5: Square = Square(27);
    pub const E5: Square = Square(28);
    pub const F5: Square = Square(29);
    pub const G5: Square = Square(30);
    pub const H5: Square = Square(31);
    // Rank 4
    pub const A4: Square = Square(32);
    pub const B4: Square = Square(33);
    pub const C4: Square = Square(34);
    pub const D4: Square = Square(35);
    pub const E4: Square = Square(36);
    pub const F4: Square = Square(37);
    pub const G4: Square = Square(38);
    pub const H4: Square = Square(39);
    // Rank 3
    pub const A3: Square = Square(40);
    pub const B3: Square = Square(41);
    pub const C3: Square = Square(42);
    pub const D3: Square = Square(43);
    pub const E3: Square = Square(44);
    pub const F3: Square = Square(45);
    pub const G3: Square = Square(46);
    pub const H3: Square = Square(47);
    // Rank 2
    pub const A2: Square = Square(48);
    pub const B2: Square = Square(49);
    pub const C2: Square = Square(50);
    pub const D2: Square = Square(51);
    pub const E2: Square = Square(52);
    pub const F2: Square = Square(53);
    pub const G2: Square = Square(54);
    pub const H2: Square = Square(55);
    // Rank 1
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);

    /// Square from a raw index, `None` when the index is off the board
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Square from a file (0 = a) and a row (0 = rank 8)
    #[inline]
    pub const fn from_coords(file: u8, row: u8) -> Option<Self> {
        if file < 8 && row < 8 {
            Some(Square(row * 8 + file))
        } else {
            None
        }
    }

    /// All 64 squares, a8 first
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    /// Chess rank number (1-8)
    #[inline]
    pub const fn rank(self) -> u8 {
        8 - self.row()
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The square `files` to the east and `rows` to the south, if on the board
    #[inline]
    pub const fn offset(self, files: i8, rows: i8) -> Option<Self> {
        let file = self.file() as i8 + files;
        let row = self.row() as i8 + rows;
        if file < 0 || row < 0 {
            return None;
        }
        Square::from_coords(file as u8, row as u8)
    }

    /// Parse a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        if s.len() != 2 {
            return None;
        }
        let bytes = s.as_bytes();
        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Square::from_coords(file, 7 - rank)
        } else {
            None
        }
    }

    /// Convert to algebraic notation
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'0' + self.rank()) as char;
        format!("{}{}", file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// Piece color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row step of a pawn advance (white moves toward row 0)
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the pawns start on
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row from which the next pawn step promotes
    #[inline]
    pub const fn pre_promotion_row(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Row of the back rank (where king and rooks start)
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Piece type
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Pieces a pawn may promote to
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bishop or knight
    #[inline]
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Knight)
    }

    /// Get the character representation of the piece type
    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Parse piece type from character
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// A colored piece
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// Get the character representation (uppercase for white, lowercase for black)
    pub fn to_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a piece from character
    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = PieceType::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(piece_type, color))
    }
}

/// Castling rights
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;
    pub const ALL: CastlingRights = CastlingRights(0xF);

    #[inline]
    pub const fn new(rights: u8) -> Self {
        CastlingRights(rights & 0xF)
    }

    #[inline]
    pub const fn has(self, right: u8) -> bool {
        (self.0 & right) != 0
    }

    #[inline]
    pub fn insert(&mut self, right: u8) {
        self.0 |= right & 0xF;
    }

    #[inline]
    pub fn remove(&mut self, right: u8) {
        self.0 &= !right;
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn kingside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub const fn queenside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    pub fn can_castle_kingside(self, color: Color) -> bool {
        self.has(Self::kingside(color))
    }

    pub fn can_castle_queenside(self, color: Color) -> bool {
        self.has(Self::queenside(color))
    }

    /// Get the castling rights that should be removed when a piece moves from/to a square
    pub fn rights_for_square(sq: Square) -> u8 {
        match sq {
            Square::A8 => Self::BLACK_QUEENSIDE,
            Square::H8 => Self::BLACK_KINGSIDE,
            Square::E8 => Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE,
            Square::A1 => Self::WHITE_QUEENSIDE,
            Square::H1 => Self::WHITE_KINGSIDE,
            Square::E1 => Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE,
            _ => 0,
        }
    }
}

/// Rook relocation `(from, to)` for a castling king move
pub(crate) fn castling_rook_squares(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    if king_to.file() > king_from.file() {
        Some((king_from.offset(3, 0)?, king_from.offset(1, 0)?))
    } else {
        Some((king_from.offset(-4, 0)?, king_from.offset(-1, 0)?))
    }
}

/// Square of the pawn taken by an en passant capture
#[inline]
pub(crate) fn en_passant_victim(from: Square, to: Square) -> Option<Square> {
    Square::from_coords(to.file(), from.row())
}

/// One undo-log entry: the applied move and the state it cannot rebuild
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct UndoRecord {
    mv: Move,
    castling: CastlingRights,
    halfmove_clock: u16,
}

/// The chess board state
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// Piece lookup table (None if empty)
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    /// Cached king squares, indexed by color
    kings: [Square; 2],
    /// Applied moves, oldest first
    history: Vec<UndoRecord>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl Board {
    /// Create a new empty board
    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            kings: [Square::E1, Square::E8],
            history: Vec::new(),
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Create a board from the starting position
    pub fn startpos() -> Self {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::BOTH {
            let pawn_row = color.pawn_start_row();
            for (file, &piece_type) in BACK_RANK.iter().enumerate() {
                let file = file as u8;
                if let Some(sq) = Square::from_coords(file, color.back_row()) {
                    board.put_piece(sq, Piece::new(piece_type, color));
                }
                if let Some(sq) = Square::from_coords(file, pawn_row) {
                    board.put_piece(sq, Piece::new(PieceType::Pawn, color));
                }
            }
        }
        board.castling = CastlingRights::ALL;
        board
    }

    /// Put a piece on the board
    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        if piece.piece_type == PieceType::King {
            self.kings[piece.color.index()] = sq;
        }
        self.squares[sq.index()] = Some(piece);
    }

    /// Remove a piece from the board
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Move a piece from one square to another
    fn move_piece(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.remove_piece(from) {
            self.put_piece(to, piece);
        }
    }

    /// Piece standing on a square
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Piece at a file (0 = a) and row (0 = rank 8); `None` for empty or off-board
    pub fn piece_at_coords(&self, file: u8, row: u8) -> Option<Piece> {
        Square::from_coords(file, row).and_then(|sq| self.piece_at(sq))
    }

    /// Occupied squares with their pieces, a8 first
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Number of pieces of a type and color
    pub fn count(&self, piece_type: PieceType, color: Color) -> usize {
        self.pieces()
            .filter(|(_, p)| *p == Piece::new(piece_type, color))
            .count()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Get the king square for a color
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Number of moves in the undo log
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Most recently applied move
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    /// Applied moves, oldest first
    pub fn move_history(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|record| record.mv)
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling(&mut self, castling: CastlingRights) {
        self.castling = castling;
    }

    pub(crate) fn set_clocks(&mut self, halfmove_clock: u16, fullmove_number: u16) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Log a move without touching the pieces (FEN en passant history)
    pub(crate) fn push_history(&mut self, mv: Move) {
        self.history.push(UndoRecord {
            mv,
            castling: self.castling,
            halfmove_clock: self.halfmove_clock,
        });
    }

    /// Apply a move to the board.
    ///
    /// Returns `false` and leaves the board untouched when the move starts
    /// and ends on the same square or its start square is empty. Legality is
    /// not checked here; see `MoveGen::legal_moves`.
    pub fn make_move(&mut self, mv: Move) -> bool {
        let from = mv.from();
        let to = mv.to();
        if from == to || self.squares[from.index()].is_none() {
            return false;
        }

        let record_castling = self.castling;
        let record_clock = self.halfmove_clock;

        self.castling.remove(CastlingRights::rights_for_square(from));
        self.castling.remove(CastlingRights::rights_for_square(to));

        let captured = match mv.move_type() {
            MoveType::Normal | MoveType::TwoStep => {
                let captured = self.remove_piece(to);
                self.move_piece(from, to);
                captured
            }
            MoveType::Castling => {
                self.move_piece(from, to);
                if let Some((rook_from, rook_to)) = castling_rook_squares(from, to) {
                    self.move_piece(rook_from, rook_to);
                }
                None
            }
            MoveType::EnPassant => {
                self.move_piece(from, to);
                en_passant_victim(from, to).and_then(|sq| self.remove_piece(sq))
            }
            MoveType::Promotion => {
                self.remove_piece(from);
                let captured = self.remove_piece(to);
                self.put_piece(to, mv.piece());
                captured
            }
        };

        self.history.push(UndoRecord {
            mv: mv.with_captured(captured),
            castling: record_castling,
            halfmove_clock: record_clock,
        });

        // A quiet promotion leaves a non-pawn on `to` and keeps counting
        let pawn_landed = self
            .piece_at(to)
            .is_some_and(|p| p.piece_type == PieceType::Pawn);
        if captured.is_some() || pawn_landed {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = !self.side_to_move;

        true
    }

    /// Take back the last applied move, returning it; `None` if nothing was played
    pub fn unmake_move(&mut self) -> Option<Move> {
        let record = self.history.pop()?;
        let mv = record.mv;
        let from = mv.from();
        let to = mv.to();

        match mv.move_type() {
            MoveType::Normal | MoveType::TwoStep => {
                self.move_piece(to, from);
                if let Some(captured) = mv.captured() {
                    self.put_piece(to, captured);
                }
            }
            MoveType::Castling => {
                self.move_piece(to, from);
                if let Some((rook_from, rook_to)) = castling_rook_squares(from, to) {
                    self.move_piece(rook_to, rook_from);
                }
            }
            MoveType::EnPassant => {
                self.move_piece(to, from);
                if let (Some(captured), Some(sq)) = (mv.captured(), en_passant_victim(from, to)) {
                    self.put_piece(sq, captured);
                }
            }
            MoveType::Promotion => {
                self.remove_piece(to);
                self.put_piece(from, Piece::new(PieceType::Pawn, mv.piece().color));
                if let Some(captured) = mv.captured() {
                    self.put_piece(to, captured);
                }
            }
        }

        self.castling = record.castling;
        self.halfmove_clock = record.halfmove_clock;
        self.side_to_move = !self.side_to_move;
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }

        Some(mv)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in 0..8 {
            write!(f, "  {} ", 8 - row)?;
            for file in 0..8 {
                match self.piece_at_coords(file, row) {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f)?;
        writeln!(f, "  FEN: {}", self.to_fen())?;
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
