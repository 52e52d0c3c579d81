pub mod console;
pub mod core;
pub mod engine;
pub mod error;
pub mod game;

pub use crate::core::{Board, Color, Move, MoveType, Piece, PieceType, Square};
pub use console::Console;
pub use engine::{MoveGen, Termination};
pub use error::ChessError;
pub use game::Game;
