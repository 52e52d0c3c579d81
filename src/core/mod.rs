//! Core chess types and representations
//!
//! This module contains the fundamental building blocks of the rules engine:
//! - Squares, colors, pieces and castling rights
//! - Board state with reversible move application
//! - Move encoding
//! - FEN serialization

pub mod board;
pub mod fen;
pub mod moves;

pub use board::{Board, CastlingRights, Color, Piece, PieceType, Square};
pub use fen::STARTPOS_FEN;
pub use moves::{Move, MoveType};
