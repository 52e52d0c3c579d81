//! Console driver
//!
//! A stdin/stdout front end speaking the position-handling part of UCI,
//! plus commands for inspecting the rules by hand.

pub mod protocol;

pub use protocol::Console;
