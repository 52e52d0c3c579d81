//! Game termination
//!
//! Threefold repetition is not tracked. The dead-position table is the
//! fixed list in [`Board::is_dead_position`]; other insufficient-material
//! draws (several bishops all on one color, for example) are not recognised.

use crate::core::board::{Board, Color, PieceType};
use crate::engine::movegen::MoveGen;
use std::fmt;

/// Half-moves without capture or pawn move that end the game
pub const FIFTY_MOVE_LIMIT: u16 = 100;

/// Why a game ended
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Termination {
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    DeadPosition,
}

impl Termination {
    /// Classify the position, `None` while the game goes on.
    ///
    /// Checked in order: no legal moves (checkmate or stalemate), the
    /// fifty-move clock, then dead material. The first match wins.
    pub fn detect(board: &mut Board) -> Option<Self> {
        let side = board.side_to_move();
        if !MoveGen::has_legal_move(board, side) {
            return Some(if board.is_in_check(side) {
                Termination::Checkmate
            } else {
                Termination::Stalemate
            });
        }
        if board.halfmove_clock() >= FIFTY_MOVE_LIMIT {
            return Some(Termination::FiftyMoveRule);
        }
        if board.is_dead_position() {
            return Some(Termination::DeadPosition);
        }
        None
    }

    /// Winner of a game that ended this way with `to_move` on move
    pub fn winner(self, to_move: Color) -> Option<Color> {
        match self {
            Termination::Checkmate => Some(to_move.opposite()),
            _ => None,
        }
    }

    /// PGN-style result string ("1-0", "0-1", "1/2-1/2")
    pub fn result(self, to_move: Color) -> &'static str {
        match self.winner(to_move) {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::FiftyMoveRule => "fifty-move rule",
            Termination::DeadPosition => "dead position",
        };
        write!(f, "{}", name)
    }
}

impl Board {
    /// Material that cannot force mate: each side has a bare king or a king
    /// and one minor piece, or king and two knights face a bare king
    pub fn is_dead_position(&self) -> bool {
        let material = |color: Color| -> Vec<PieceType> {
            self.pieces()
                .filter(|(_, p)| p.color == color && p.piece_type != PieceType::King)
                .map(|(_, p)| p.piece_type)
                .collect()
        };
        let white = material(Color::White);
        let black = material(Color::Black);

        let at_most_one_minor = |side: &[PieceType]| match side {
            [] => true,
            [single] => single.is_minor(),
            _ => false,
        };
        let two_knights = |side: &[PieceType]| {
            matches!(side, [PieceType::Knight, PieceType::Knight])
        };

        (at_most_one_minor(&white) && at_most_one_minor(&black))
            || (two_knights(&white) && black.is_empty())
            || (two_knights(&black) && white.is_empty())
    }

    /// Shorthand for `Termination::detect(board).is_some()`
    pub fn is_game_finished(&mut self) -> bool {
        Termination::detect(self).is_some()
    }
}
