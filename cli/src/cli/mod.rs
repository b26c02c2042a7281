//! CLI surface
//!
//! This module provides:
//! - CLI argument definitions (args)
//! - The interactive-loop command grammar (command)
//! - The interactive loop itself (tui)

pub mod args;
pub mod command;
pub mod tui;

pub use args::{Cli, Commands};
pub use command::LoopCommand;
pub use tui::Tui;
