//! Output abstraction for the CLI and the interactive loop
//!
//! This module provides a trait-based output system that decouples event
//! emission from display logic. The terminal writer styles with ANSI
//! escapes (including markdown rendering); the plain writer is for pipes
//! and CI. The dispatch pipeline decides *what* to emit and never renders
//! directly.

mod markdown;
mod plain;
mod terminal;

pub use plain::PlainOutput;
pub use terminal::TerminalOutput;

// ============================================================================
// Output Events
// ============================================================================

/// Events that can be displayed to the operator
#[derive(Debug, Clone)]
pub enum OutputEvent {
    /// Plain text content
    Text(String),

    /// Markdown content; the terminal writer styles it, the plain writer
    /// prints it as-is
    Markdown(String),

    /// Status message (informational)
    Status(String),

    /// Error message
    Error(String),

    /// Warning message
    Warning(String),

    /// System message (dimmed, for internal info)
    System(String),

    /// New line / separator
    NewLine,
}

// ============================================================================
// Output Writer Trait
// ============================================================================

/// Trait for writing output events
pub trait OutputWriter: Send + Sync {
    /// Write an output event
    fn write(&self, event: OutputEvent);

    /// Flush any buffered output
    fn flush(&self);

    /// Whether this writer supports colors/formatting
    fn supports_colors(&self) -> bool {
        false
    }

    /// Clear the screen before redrawing a menu, if the sink supports it
    fn clear_screen(&self) {}
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a writer for the current environment: terminal when stdout is a
/// TTY (or ANSI is forced), plain otherwise.
pub fn default_output(force_ansi: bool) -> Box<dyn OutputWriter> {
    if force_ansi || atty::is(atty::Stream::Stdout) {
        Box::new(TerminalOutput::new())
    } else {
        Box::new(PlainOutput::new())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock output writer for testing
    struct MockOutput {
        events: Arc<Mutex<Vec<OutputEvent>>>,
    }

    impl MockOutput {
        fn new() -> (Self, Arc<Mutex<Vec<OutputEvent>>>) {
            let events = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    events: events.clone(),
                },
                events,
            )
        }
    }

    impl OutputWriter for MockOutput {
        fn write(&self, event: OutputEvent) {
            self.events.lock().unwrap().push(event);
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_mock_output() {
        let (mock, events) = MockOutput::new();

        mock.write(OutputEvent::Text("Hello".to_string()));
        mock.write(OutputEvent::Status("Working...".to_string()));

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 2);

        match &captured[0] {
            OutputEvent::Text(s) => assert_eq!(s, "Hello"),
            _ => panic!("Expected Text event"),
        }
    }

    #[test]
    fn test_output_event_variants() {
        let events = vec![
            OutputEvent::Text("test".into()),
            OutputEvent::Markdown("# test".into()),
            OutputEvent::Status("status".into()),
            OutputEvent::Error("err".into()),
            OutputEvent::Warning("warn".into()),
            OutputEvent::System("sys".into()),
            OutputEvent::NewLine,
        ];

        assert_eq!(events.len(), 7);
    }
}
