//! Plain text output for pipes and CI
//!
//! No colors, no screen control; markdown passes through untouched.

use std::io::{self, Write};

use super::{OutputEvent, OutputWriter};

/// Plain output writer
pub struct PlainOutput;

impl Default for PlainOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainOutput {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for PlainOutput {
    fn write(&self, event: OutputEvent) {
        match event {
            OutputEvent::Text(text) | OutputEvent::Markdown(text) => {
                println!("{}", text);
            }
            OutputEvent::Status(msg) | OutputEvent::System(msg) => {
                eprintln!("{}", msg);
            }
            OutputEvent::Error(msg) => {
                eprintln!("Error: {}", msg);
            }
            OutputEvent::Warning(msg) => {
                eprintln!("Warning: {}", msg);
            }
            OutputEvent::NewLine => {
                println!();
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}
