//! Rules engine components
//!
//! This module contains the rule logic that runs on top of the board:
//! - Attack detection
//! - Pseudo-legal and legal move generation
//! - Game termination
//! - Perft node counting

pub mod attacks;
pub mod movegen;
pub mod perft;
pub mod termination;

pub use attacks::{Direction, KNIGHT_OFFSETS};
pub use movegen::MoveGen;
pub use perft::{divide, perft};
pub use termination::{Termination, FIFTY_MOVE_LIMIT};
