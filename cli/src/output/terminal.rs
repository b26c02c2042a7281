//! Terminal output with colors and formatting
//!
//! Uses ANSI escape codes for colors and styling.

use std::io::{self, Write};

use super::markdown;
use super::{OutputEvent, OutputWriter};

// ANSI color codes
pub(crate) const RESET: &str = "\x1b[0m";
pub(crate) const BOLD: &str = "\x1b[1m";
pub(crate) const DIM: &str = "\x1b[2m";

pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const YELLOW: &str = "\x1b[33m";
pub(crate) const CYAN: &str = "\x1b[36m";
pub(crate) const GRAY: &str = "\x1b[90m";

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Terminal output writer with colors and formatting
pub struct TerminalOutput {
    /// Whether to use colors (can be disabled)
    use_colors: bool,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    /// Create a new terminal output writer
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create without colors
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Format with color if colors are enabled
    fn color(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Format with multiple styles
    fn styled(&self, codes: &[&str], text: &str) -> String {
        if self.use_colors {
            let prefix: String = codes.iter().copied().collect();
            format!("{}{}{}", prefix, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Print to stderr (for status/diagnostic messages)
    fn eprint(&self, msg: &str) {
        eprintln!("{}", msg);
    }

    /// Print to stdout (for content)
    fn print(&self, msg: &str) {
        println!("{}", msg);
    }
}

impl OutputWriter for TerminalOutput {
    fn write(&self, event: OutputEvent) {
        match event {
            OutputEvent::Text(text) => {
                self.print(&text);
            }

            OutputEvent::Markdown(text) => {
                if self.use_colors {
                    self.print(&markdown::render_ansi(&text));
                } else {
                    self.print(&text);
                }
            }

            OutputEvent::Status(msg) => {
                self.eprint(&self.color(GRAY, &format!("  {}", msg)));
            }

            OutputEvent::Error(msg) => {
                self.eprint(&format!(
                    "{} {}",
                    self.styled(&[BOLD, RED], "Error:"),
                    self.color(RED, &msg)
                ));
            }

            OutputEvent::Warning(msg) => {
                self.eprint(&format!(
                    "{} {}",
                    self.styled(&[BOLD, YELLOW], "Warning:"),
                    self.color(YELLOW, &msg)
                ));
            }

            OutputEvent::System(msg) => {
                self.eprint(&self.color(GRAY, &msg));
            }

            OutputEvent::NewLine => {
                self.print("");
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }

    fn supports_colors(&self) -> bool {
        self.use_colors
    }

    fn clear_screen(&self) {
        if self.use_colors {
            print!("{}", CLEAR_SCREEN);
            let _ = io::stdout().flush();
        }
    }
}
