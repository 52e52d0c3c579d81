//! Game and Console Tests
//!
//! Tests for the game session command surface and the console driver.

use chess_rules::console::Console;
use chess_rules::core::board::{Color, PieceType, Square};
use chess_rules::core::fen::STARTPOS_FEN;
use chess_rules::engine::termination::Termination;
use chess_rules::error::ChessError;
use chess_rules::game::Game;

fn run(console: &mut Console, lines: &[&str]) -> String {
    let mut out = Vec::new();
    for line in lines {
        console.handle_line(line, &mut out).unwrap();
    }
    String::from_utf8(out).unwrap()
}

// ============================================================================
// Game Tests
// ============================================================================

#[test]
fn test_new_game() {
    let mut game = Game::new();
    assert_eq!(game.snapshot(), STARTPOS_FEN);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.all_legal_moves().len(), 20);
    assert_eq!(game.result(), "*");
    assert!(!game.is_finished());
}

#[test]
fn test_play_uci() {
    let mut game = Game::new();
    let mv = game.play_uci("e2e4").unwrap();
    assert!(mv.is_two_step());
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(
        game.snapshot(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn test_play_uci_rejects_wrong_side() {
    let mut game = Game::new();
    let err = game.play_uci("e7e5").unwrap_err();
    assert_eq!(err, ChessError::IllegalMove("e7e5".to_string()));
    assert_eq!(game.snapshot(), STARTPOS_FEN);
}

#[test]
fn test_play_uci_rejects_illegal() {
    let mut game = Game::new();
    for s in ["e2e5", "e1e2", "nonsense", ""] {
        assert!(matches!(game.play_uci(s), Err(ChessError::IllegalMove(_))));
    }
    assert_eq!(game.snapshot(), STARTPOS_FEN);
}

#[test]
fn test_play_generated_move() {
    let mut game = Game::new();
    let mv = game.legal_moves(Square::G1)[0];
    game.play(mv).unwrap();
    assert_eq!(game.piece_at(mv.to()).map(|p| p.piece_type), Some(PieceType::Knight));

    // The same move is not legal twice
    assert!(game.play(mv).is_err());
}

#[test]
fn test_undo() {
    let mut game = Game::new();
    assert_eq!(game.undo(), Err(ChessError::NothingToUndo));

    game.play_all(["e2e4", "e7e5", "g1f3"]).unwrap();
    assert_eq!(game.moves_played().count(), 3);
    assert_eq!(game.undo().unwrap().to_uci(), "g1f3");
    assert_eq!(game.undo().unwrap().to_uci(), "e7e5");
    assert_eq!(game.undo().unwrap().to_uci(), "e2e4");
    assert_eq!(game.undo(), Err(ChessError::NothingToUndo));
    assert_eq!(game.snapshot(), STARTPOS_FEN);
}

#[test]
fn test_undo_stops_at_loaded_position() {
    let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
    let mut game = Game::from_fen(fen).unwrap();
    assert_eq!(game.undo(), Err(ChessError::NothingToUndo));
    assert_eq!(game.snapshot(), fen);

    game.play_uci("e5d6").unwrap();
    game.undo().unwrap();
    assert_eq!(game.snapshot(), fen);
}

#[test]
fn test_load_fen_is_atomic() {
    let mut game = Game::new();
    game.play_uci("d2d4").unwrap();
    let before = game.snapshot();

    assert!(matches!(game.load_fen("not a fen"), Err(ChessError::InvalidFen(_))));
    assert_eq!(game.snapshot(), before);

    game.load_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert_eq!(game.snapshot(), "4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    assert_eq!(game.moves_played().count(), 0);
}

#[test]
fn test_reset() {
    let mut game = Game::new();
    game.play_all(["e2e4", "e7e5"]).unwrap();
    game.reset();
    assert_eq!(game.snapshot(), STARTPOS_FEN);
    assert_eq!(game.undo(), Err(ChessError::NothingToUndo));
}

#[test]
fn test_legal_moves_from_square_name() {
    let mut game = Game::new();
    assert_eq!(game.legal_moves_from("b1").unwrap().len(), 2);
    assert!(matches!(
        game.legal_moves_from("z9"),
        Err(ChessError::InvalidSquare(_))
    ));
}

#[test]
fn test_game_result_after_mate() {
    let mut game = Game::new();
    game.play_all(["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"])
        .unwrap();
    assert_eq!(game.termination(), Some(Termination::Checkmate));
    assert_eq!(game.result(), "1-0");
    assert!(game.play_uci("e8f7").is_err());
}

#[test]
fn test_snapshot_is_sendable() {
    let mut game = Game::new();
    game.play_uci("c2c4").unwrap();
    let fen = game.snapshot();
    let handle = std::thread::spawn(move || fen.len());
    assert!(handle.join().unwrap() > 0);
}

// ============================================================================
// Console Tests
// ============================================================================

#[test]
fn test_console_uci_handshake() {
    let mut console = Console::new();
    let out = run(&mut console, &["uci", "isready"]);
    assert!(out.contains("id name chess_rules"));
    assert!(out.contains("option name AutoReset type check default false"));
    assert!(out.contains("uciok"));
    assert!(out.contains("readyok"));
}

#[test]
fn test_console_position_moves() {
    let mut console = Console::new();
    run(&mut console, &["position startpos moves e2e4 e7e5"]);
    assert_eq!(
        console.game().snapshot(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
    );

    let out = run(&mut console, &["fen"]);
    assert!(out.contains("KQkq e6 0 2"));
}

#[test]
fn test_console_position_fen() {
    let mut console = Console::new();
    run(
        &mut console,
        &["position fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1 moves e1g1"],
    );
    assert_eq!(console.game().snapshot(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
}

#[test]
fn test_console_illegal_position_keeps_game() {
    let mut console = Console::new();
    run(&mut console, &["position startpos moves d2d4"]);
    let before = console.game().snapshot();

    let out = run(&mut console, &["position startpos moves e2e4 e2e4"]);
    assert!(out.contains("info string illegal move: e2e4"));
    assert_eq!(console.game().snapshot(), before);
}

#[test]
fn test_console_reports_game_over() {
    let mut console = Console::new();
    let out = run(&mut console, &["position startpos moves f2f3 e7e5 g2g4 d8h4"]);
    assert!(out.contains("info string game over: checkmate 0-1"));
    assert!(console.game().clone().is_finished());
}

#[test]
fn test_console_options() {
    let mut console = Console::new();
    assert!(!console.auto_reset());
    assert!(console.show_status());

    let out = run(
        &mut console,
        &[
            "setoption name AutoReset value true",
            "setoption name ShowStatus value false",
            "position startpos moves f2f3 e7e5 g2g4 d8h4",
        ],
    );
    assert!(console.auto_reset());
    assert!(!console.show_status());
    assert!(!out.contains("game over"));
    assert_eq!(console.game().snapshot(), STARTPOS_FEN);
}

#[test]
fn test_console_play_and_undo() {
    let mut console = Console::new();
    let out = run(&mut console, &["play g1f3", "play a1a5", "undo", "undo"]);
    assert!(out.contains("info string illegal move: a1a5"));
    assert!(out.contains("info string took back g1f3"));
    assert!(out.contains("info string no moves to undo"));
    assert_eq!(console.game().snapshot(), STARTPOS_FEN);
}

#[test]
fn test_console_moves_and_perft() {
    let mut console = Console::new();
    let out = run(&mut console, &["moves b1"]);
    assert!(out.contains("b1a3 b1c3"));

    let out = run(&mut console, &["perft 2"]);
    assert!(out.contains("Nodes: 400"));

    let out = run(&mut console, &["divide 1"]);
    assert!(out.contains("e2e4: 1"));
    assert!(out.contains("Nodes: 20"));
}

#[test]
fn test_console_status_and_go() {
    let mut console = Console::new();
    let out = run(&mut console, &["status"]);
    assert!(out.contains("white to move"));

    let out = run(&mut console, &["go depth 3"]);
    assert!(out.contains("info string"));
    assert_eq!(console.game().snapshot(), STARTPOS_FEN);
}

#[test]
fn test_console_quit() {
    let mut console = Console::new();
    let mut out = Vec::new();
    assert!(console.handle_line("isready", &mut out).unwrap());
    assert!(!console.handle_line("quit", &mut out).unwrap());
}
