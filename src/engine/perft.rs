//! Perft: count the leaf nodes of the legal move tree

use crate::core::board::Board;
use crate::core::moves::Move;
use crate::engine::movegen::MoveGen;

/// Number of legal move paths of length `depth` from the current position
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = MoveGen::generate_legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| {
            board.make_move(mv);
            let nodes = perft(board, depth - 1);
            board.unmake_move();
            nodes
        })
        .sum()
}

/// Perft split by root move, sorted by coordinate notation
pub fn divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut split: Vec<(Move, u64)> = MoveGen::generate_legal_moves(board)
        .into_iter()
        .map(|mv| {
            board.make_move(mv);
            let nodes = perft(board, depth - 1);
            board.unmake_move();
            (mv, nodes)
        })
        .collect();
    split.sort_by_key(|(mv, _)| mv.to_uci());
    split
}
