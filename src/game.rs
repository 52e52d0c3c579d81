//! A game session: one board plus the command surface that drives it.
//!
//! Every command that interprets text returns a `Result`, and a rejected
//! command leaves the game exactly as it was.

use crate::core::board::{Board, Color, Piece, Square};
use crate::core::moves::Move;
use crate::engine::movegen::MoveGen;
use crate::engine::termination::Termination;
use crate::error::ChessError;

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    /// Undo log length right after the last reset or FEN load
    base_ply: usize,
}

impl Game {
    /// New game from the initial position
    pub fn new() -> Self {
        Game {
            board: Board::startpos(),
            base_ply: 0,
        }
    }

    /// Start a game from a FEN string
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let board = Board::from_fen(fen)?;
        Ok(Game {
            base_ply: board.ply(),
            board,
        })
    }

    /// Back to the initial position with an empty history
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    /// Replace the position; on error the current game is kept.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), ChessError> {
        *self = Game::from_fen(fen)?;
        Ok(())
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// FEN of the current position, safe to hand to another thread
    pub fn snapshot(&self) -> String {
        self.board.to_fen()
    }

    /// Moves played since the last reset or load
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.board.move_history().skip(self.base_ply)
    }

    /// Legal moves of the piece on `sq`
    pub fn legal_moves(&mut self, sq: Square) -> Vec<Move> {
        MoveGen::legal_moves(&mut self.board, sq)
    }

    /// Legal moves for the side to move
    pub fn all_legal_moves(&mut self) -> Vec<Move> {
        MoveGen::generate_legal_moves(&mut self.board)
    }

    pub fn pseudo_legal_moves(&self, sq: Square) -> Vec<Move> {
        MoveGen::pseudo_legal_moves(&self.board, sq)
    }

    /// Legal moves from a square given in algebraic notation
    pub fn legal_moves_from(&mut self, square: &str) -> Result<Vec<Move>, ChessError> {
        let sq = Square::from_algebraic(square)
            .ok_or_else(|| ChessError::InvalidSquare(square.to_string()))?;
        Ok(self.legal_moves(sq))
    }

    /// Apply a move, which must be legal for the side to move
    pub fn play(&mut self, mv: Move) -> Result<(), ChessError> {
        let legal = mv.piece().color == self.board.side_to_move()
            && self.legal_moves(mv.from()).contains(&mv);
        if !legal || !self.board.make_move(mv) {
            return Err(ChessError::IllegalMove(mv.to_uci()));
        }
        Ok(())
    }

    /// Apply a move given in coordinate notation ("e2e4", "a7a8q")
    pub fn play_uci(&mut self, s: &str) -> Result<Move, ChessError> {
        let side = self.board.side_to_move();
        let mv = MoveGen::parse_move(&mut self.board, s)
            .filter(|mv| mv.piece().color == side)
            .ok_or_else(|| ChessError::IllegalMove(s.to_string()))?;
        self.board.make_move(mv);
        Ok(mv)
    }

    /// Apply a sequence of coordinate moves; stops at the first illegal one.
    ///
    /// Moves before the failing one stay applied.
    pub fn play_all<'a, I>(&mut self, moves: I) -> Result<(), ChessError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for s in moves {
            self.play_uci(s)?;
        }
        Ok(())
    }

    /// Take back the last move played in this game
    pub fn undo(&mut self) -> Result<Move, ChessError> {
        if self.board.ply() <= self.base_ply {
            return Err(ChessError::NothingToUndo);
        }
        self.board.unmake_move().ok_or(ChessError::NothingToUndo)
    }

    /// How the game ended, `None` while it is still going
    pub fn termination(&mut self) -> Option<Termination> {
        Termination::detect(&mut self.board)
    }

    pub fn is_finished(&mut self) -> bool {
        self.termination().is_some()
    }

    /// "1-0", "0-1", "1/2-1/2", or "*" for a game in progress
    pub fn result(&mut self) -> &'static str {
        let to_move = self.board.side_to_move();
        match self.termination() {
            Some(termination) => termination.result(to_move),
            None => "*",
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
