//! Termination Tests
//!
//! Checkmate, stalemate, the fifty-move rule and dead positions.

use chess_rules::core::board::{Board, Color};
use chess_rules::engine::movegen::MoveGen;
use chess_rules::engine::termination::{Termination, FIFTY_MOVE_LIMIT};

fn detect(fen: &str) -> Option<Termination> {
    let mut board = Board::from_fen(fen).unwrap();
    Termination::detect(&mut board)
}

// ============================================================================
// Checkmate / Stalemate
// ============================================================================

#[test]
fn test_startpos_is_ongoing() {
    let mut board = Board::startpos();
    assert_eq!(Termination::detect(&mut board), None);
    assert!(!board.is_game_finished());
}

#[test]
fn test_back_rank_checkmate() {
    let fen = "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1";
    let mut board = Board::from_fen(fen).unwrap();
    let mv = MoveGen::parse_move(&mut board, "e1e8").unwrap();
    board.make_move(mv);

    assert!(board.is_in_check(Color::Black));
    assert_eq!(Termination::detect(&mut board), Some(Termination::Checkmate));
    assert!(board.is_game_finished());
}

#[test]
fn test_fools_mate() {
    let mut board = Board::startpos();
    for s in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let mv = MoveGen::parse_move(&mut board, s).unwrap();
        board.make_move(mv);
    }
    let result = Termination::detect(&mut board);
    assert_eq!(result, Some(Termination::Checkmate));
    assert_eq!(Termination::Checkmate.winner(board.side_to_move()), Some(Color::Black));
    assert_eq!(Termination::Checkmate.result(board.side_to_move()), "0-1");
}

#[test]
fn test_stalemate() {
    let fen = "k7/8/1QK5/8/8/8/8/8 b - - 0 1";
    assert_eq!(detect(fen), Some(Termination::Stalemate));

    let mut board = Board::from_fen(fen).unwrap();
    assert!(!board.is_in_check(Color::Black));
    assert!(MoveGen::generate_legal_moves(&mut board).is_empty());
}

#[test]
fn test_checkmate_beats_fifty_move_rule() {
    let fen = "R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 120 80";
    assert_eq!(detect(fen), Some(Termination::Checkmate));
}

// ============================================================================
// Fifty-move Rule
// ============================================================================

#[test]
fn test_fifty_move_rule() {
    let fen = format!("4k3/8/8/8/8/8/4P3/R3K3 w - - {} 90", FIFTY_MOVE_LIMIT);
    assert_eq!(detect(&fen), Some(Termination::FiftyMoveRule));

    let fen = format!("4k3/8/8/8/8/8/4P3/R3K3 w - - {} 90", FIFTY_MOVE_LIMIT - 1);
    assert_eq!(detect(&fen), None);
}

#[test]
fn test_fifty_move_rule_reached_by_play() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 99 90").unwrap();
    let mv = MoveGen::parse_move(&mut board, "a1a2").unwrap();
    board.make_move(mv);
    assert_eq!(board.halfmove_clock(), 100);
    assert_eq!(Termination::detect(&mut board), Some(Termination::FiftyMoveRule));

    board.unmake_move();
    let mv = MoveGen::parse_move(&mut board, "e2e3").unwrap();
    board.make_move(mv);
    assert_eq!(board.halfmove_clock(), 0);
    assert_eq!(Termination::detect(&mut board), None);
}

// ============================================================================
// Dead Position
// ============================================================================

#[test]
fn test_dead_positions() {
    let dead = [
        "8/8/8/4k3/8/8/8/4K3 w - - 0 1",
        "8/8/8/4k3/8/8/8/4KB2 w - - 0 1",
        "8/8/8/4k3/8/8/8/4KN2 w - - 0 1",
        "8/8/8/4k3/8/8/8/2N1KN2 w - - 0 1",
        "8/8/8/4kb2/8/8/8/4K3 w - - 0 1",
        "8/8/3nn3/4k3/8/8/8/4K3 w - - 0 1",
        "8/8/8/4kn2/8/8/8/4KB2 w - - 0 1",
        "8/8/8/4kb2/8/8/8/4KB2 w - - 0 1",
        "8/8/8/4kn2/8/8/8/4KN2 b - - 0 1",
    ];
    for fen in dead {
        let board = Board::from_fen(fen).unwrap();
        assert!(board.is_dead_position(), "{} should be dead", fen);
        assert_eq!(detect(fen), Some(Termination::DeadPosition));
    }
}

#[test]
fn test_live_positions() {
    let live = [
        "8/8/8/4k3/8/8/8/4KR2 w - - 0 1",
        "8/8/8/4k3/8/8/4P3/4K3 w - - 0 1",
        "8/8/8/4k3/8/8/8/4KQ2 w - - 0 1",
        "8/8/8/4k3/8/8/8/2B1KB2 w - - 0 1",
        "8/8/8/4k3/8/8/8/2B1KN2 w - - 0 1",
        "8/8/8/4k3/8/8/8/1NN1KN2 w - - 0 1",
        "8/8/8/4kn2/8/8/8/2N1KN2 w - - 0 1",
        "8/8/8/4kr2/8/8/8/4KB2 w - - 0 1",
    ];
    for fen in live {
        let board = Board::from_fen(fen).unwrap();
        assert!(!board.is_dead_position(), "{} should not be dead", fen);
    }
}

// ============================================================================
// Result Strings
// ============================================================================

#[test]
fn test_result_strings() {
    assert_eq!(Termination::Checkmate.result(Color::Black), "1-0");
    assert_eq!(Termination::Checkmate.result(Color::White), "0-1");
    assert_eq!(Termination::Stalemate.result(Color::White), "1/2-1/2");
    assert_eq!(Termination::FiftyMoveRule.result(Color::Black), "1/2-1/2");
    assert_eq!(Termination::DeadPosition.winner(Color::White), None);
    assert_eq!(Termination::FiftyMoveRule.to_string(), "fifty-move rule");
}
