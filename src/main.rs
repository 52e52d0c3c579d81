//! chess_rules console

use chess_rules::console::Console;

fn main() -> std::io::Result<()> {
    println!("chess_rules v{} - chess rules console", env!("CARGO_PKG_VERSION"));
    println!("Type 'position startpos moves e2e4', 'd' to display the board, 'quit' to exit");

    let mut console = Console::new();
    console.run()
}
