use crate::engine::perft::{divide, perft};
use crate::error::ChessError;
use crate::game::Game;
use std::io::{self, BufRead, Write};
use vampirc_uci::{UciMessage, parser};

/// Line-oriented driver around a [`Game`].
///
/// Understands the position-handling subset of UCI plus a few commands for
/// poking at the rules by hand. Rejected commands are reported as
/// `info string` lines and never change the game.
pub struct Console {
    game: Game,
    /// Reset to the initial position when a `position` command ends the game.
    auto_reset: bool,
    /// Report the termination after a `position` command that ends the game.
    show_status: bool,
}

impl Console {
    pub fn new() -> Self {
        Console {
            game: Game::new(),
            auto_reset: false,
            show_status: true,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn auto_reset(&self) -> bool {
        self.auto_reset
    }

    pub fn show_status(&self) -> bool {
        self.show_status
    }

    /// Serve stdin until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            if !self.handle_line(&line, &mut out)? {
                break;
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Handle one input line; returns `false` once the driver should stop.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        match parser::parse_one(line) {
            UciMessage::Uci => self.cmd_uci(out)?,
            UciMessage::IsReady => writeln!(out, "readyok")?,
            UciMessage::SetOption { name, value } => {
                self.apply_setoption(name.trim(), value.as_deref());
            }
            UciMessage::UciNewGame => self.game.reset(),
            UciMessage::Position { startpos, fen, moves } => {
                let fen_str = fen.as_ref().map(|f| f.as_str());
                let move_strs: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                let refs: Vec<&str> = move_strs.iter().map(String::as_str).collect();
                self.cmd_position(startpos, fen_str, &refs, out)?;
            }
            UciMessage::Go { .. } => {
                writeln!(out, "info string no search here, hand the position to an engine")?;
                writeln!(out, "info string fen {}", self.game.snapshot())?;
            }
            UciMessage::Quit => return Ok(false),
            UciMessage::Unknown(ref s, _) => {
                let parts: Vec<&str> = s.split_whitespace().collect();
                self.cmd_extra(&parts, out)?;
            }
            _ => {}
        }
        Ok(true)
    }

    fn cmd_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name chess_rules {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author chess_rules developers")?;
        writeln!(out)?;
        writeln!(out, "option name AutoReset type check default false")?;
        writeln!(out, "option name ShowStatus type check default true")?;
        writeln!(out, "uciok")
    }

    /// Apply setoption by name and value; unknown names are ignored.
    fn apply_setoption(&mut self, name: &str, value: Option<&str>) {
        let opt = name.to_lowercase().replace([' ', '_'], "");
        let value = value.unwrap_or("").trim();
        let enabled = value.eq_ignore_ascii_case("true") || value == "1";
        match opt.as_str() {
            "autoreset" => self.auto_reset = enabled,
            "showstatus" => self.show_status = enabled,
            _ => {}
        }
    }

    /// Set up a position and play the listed moves on top of it.
    ///
    /// The new game is built on the side and only swapped in when the FEN
    /// and every move were accepted.
    fn cmd_position<W: Write>(
        &mut self,
        startpos: bool,
        fen: Option<&str>,
        moves: &[&str],
        out: &mut W,
    ) -> io::Result<()> {
        let built = if startpos {
            Ok(Game::new())
        } else {
            match fen {
                Some(fen) => Game::from_fen(fen),
                None => Ok(Game::new()),
            }
        };
        let built = built.and_then(|mut game| {
            game.play_all(moves.iter().copied())?;
            Ok(game)
        });

        match built {
            Ok(game) => self.game = game,
            Err(err) => return report(out, &err),
        }

        if let Some(termination) = self.game.termination() {
            if self.show_status {
                writeln!(
                    out,
                    "info string game over: {} {}",
                    termination,
                    self.game.result()
                )?;
            }
            if self.auto_reset {
                self.game.reset();
            }
        }
        Ok(())
    }

    /// Commands outside UCI
    fn cmd_extra<W: Write>(&mut self, parts: &[&str], out: &mut W) -> io::Result<()> {
        let Some(&first) = parts.first() else {
            return Ok(());
        };
        match first {
            "d" | "display" => writeln!(out, "{}", self.game.board()),
            "fen" => writeln!(out, "{}", self.game.snapshot()),
            "moves" => self.cmd_moves(parts.get(1).copied(), out),
            "play" => match parts.get(1) {
                Some(s) => match self.game.play_uci(s) {
                    Ok(_) => Ok(()),
                    Err(err) => report(out, &err),
                },
                None => writeln!(out, "info string usage: play <move>"),
            },
            "undo" => match self.game.undo() {
                Ok(mv) => writeln!(out, "info string took back {}", mv),
                Err(err) => report(out, &err),
            },
            "status" => self.cmd_status(out),
            "perft" => self.cmd_perft(parts, out),
            "divide" => self.cmd_divide(parts, out),
            other => writeln!(out, "info string unknown command '{}'", other),
        }
    }

    fn cmd_moves<W: Write>(&mut self, square: Option<&str>, out: &mut W) -> io::Result<()> {
        let moves = match square {
            Some(sq) => match self.game.legal_moves_from(sq) {
                Ok(moves) => moves,
                Err(err) => return report(out, &err),
            },
            None => self.game.all_legal_moves(),
        };
        let mut names: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
        names.sort();
        writeln!(out, "{}", names.join(" "))
    }

    fn cmd_status<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let side = self.game.side_to_move();
        match self.game.termination() {
            Some(termination) => {
                writeln!(out, "{} {}", termination, self.game.result())
            }
            None => {
                let board = self.game.board();
                let check = if board.is_in_check(side) { ", in check" } else { "" };
                writeln!(out, "{} to move{}", side, check)
            }
        }
    }

    fn cmd_perft<W: Write>(&mut self, parts: &[&str], out: &mut W) -> io::Result<()> {
        let depth: u32 = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
        let mut board = self.game.board().clone();
        let start = std::time::Instant::now();
        let nodes = perft(&mut board, depth);
        let elapsed = start.elapsed();
        let nps = if elapsed.as_millis() > 0 {
            nodes as u128 * 1000 / elapsed.as_millis()
        } else {
            0
        };
        writeln!(out, "Nodes: {} ({} ms, {} nps)", nodes, elapsed.as_millis(), nps)
    }

    fn cmd_divide<W: Write>(&mut self, parts: &[&str], out: &mut W) -> io::Result<()> {
        let depth: u32 = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
        let mut board = self.game.board().clone();
        let split = divide(&mut board, depth);
        for (mv, nodes) in &split {
            writeln!(out, "{}: {}", mv, nodes)?;
        }
        let total: u64 = split.iter().map(|(_, n)| n).sum();
        writeln!(out)?;
        writeln!(out, "Nodes: {}", total)
    }
}

fn report<W: Write>(out: &mut W, err: &ChessError) -> io::Result<()> {
    writeln!(out, "info string {}", err)
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

