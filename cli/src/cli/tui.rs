//! Interactive terminal mode
//!
//! A single-threaded read-eval loop: draw the menu, read one line, parse it
//! against the fixed command grammar, act. Dispatch failures are reported
//! inline and the loop continues; only a quit command or end of input
//! leaves it. No dispatch here ever exits the process.

use std::io::{self, BufRead, Write};

use crate::config::FileConfig;
use crate::handlers::run::render_outcome;
use crate::output::{OutputEvent, OutputWriter};
use crate::state::StateStore;
use crate::workflow::{
    bind_interactive, execute, resolve_render, ParamSpec, RawArgs, Workflow, WorkflowRegistry,
};

use super::command::LoopCommand;

/// Interactive menu loop over the registry
pub struct Tui<'a> {
    registry: &'a WorkflowRegistry,
    state: &'a StateStore,
    config: &'a FileConfig,
    output: &'a dyn OutputWriter,
}

impl<'a> Tui<'a> {
    pub fn new(
        registry: &'a WorkflowRegistry,
        state: &'a StateStore,
        config: &'a FileConfig,
        output: &'a dyn OutputWriter,
    ) -> Self {
        Self {
            registry,
            state,
            config,
            output,
        }
    }

    /// Run the loop until quit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            self.draw_menu();

            print!(": ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // End of input behaves like quit.
                    self.output.write(OutputEvent::System("Exiting.".to_string()));
                    break;
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    self.output.write(OutputEvent::System("Exiting.".to_string()));
                    break;
                }
                Err(e) => return Err(e),
            }

            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            match LoopCommand::parse(input, self.registry) {
                LoopCommand::Quit => break,

                LoopCommand::Invoke {
                    name,
                    args,
                    ignored,
                } => {
                    for token in &ignored {
                        self.output.write(OutputEvent::Warning(format!(
                            "ignoring argument '{}': expected key=value",
                            token
                        )));
                    }
                    let raw: RawArgs = args.into_iter().collect();
                    self.dispatch(&name, &raw);
                    self.pause()?;
                }

                LoopCommand::Select(n) => match self.menu_entry(n) {
                    Some(workflow) => {
                        let name = workflow.name.clone();
                        self.dispatch(&name, &RawArgs::new());
                        self.pause()?;
                    }
                    None => {
                        self.output
                            .write(OutputEvent::Error("Invalid selection".to_string()));
                    }
                },

                LoopCommand::SwitchTo(n) => match self.menu_entry(n) {
                    Some(workflow) => {
                        self.state.set_current(&workflow.name);
                        self.output.write(OutputEvent::Status(format!(
                            "Switched to {}",
                            workflow.name
                        )));
                    }
                    None => {
                        self.output
                            .write(OutputEvent::Error("Invalid switch command".to_string()));
                    }
                },

                LoopCommand::RunNamed(name) => {
                    if self.registry.contains(&name) {
                        self.dispatch(&name, &RawArgs::new());
                        self.pause()?;
                    } else {
                        self.output.write(OutputEvent::Error(format!(
                            "Workflow '{}' not found",
                            name
                        )));
                    }
                }

                LoopCommand::InvalidSelection => {
                    self.output
                        .write(OutputEvent::Error("Invalid selection".to_string()));
                }

                LoopCommand::InvalidSwitch => {
                    self.output
                        .write(OutputEvent::Error("Invalid switch command".to_string()));
                }

                LoopCommand::Unknown => {
                    self.output
                        .write(OutputEvent::Warning("Unknown command".to_string()));
                }
            }
        }

        Ok(())
    }

    /// Resolve a 1-based menu index against the sorted listing.
    fn menu_entry(&self, n: usize) -> Option<&'a Workflow> {
        let sorted = self.registry.sorted();
        n.checked_sub(1).and_then(|i| sorted.get(i).copied())
    }

    /// One interactive dispatch: interactive binding (prompting on stdin
    /// for missing required parameters), execution, rendering per the
    /// workflow's preference. Errors are reported inline, never fatal.
    fn dispatch(&self, name: &str, raw: &RawArgs) {
        let Some(workflow) = self.registry.get(name) else {
            self.output
                .write(OutputEvent::Error(format!("Workflow '{}' not found", name)));
            return;
        };

        let binding = match bind_interactive(workflow, raw, &mut prompt_stdin) {
            Ok(binding) => binding,
            Err(e) => {
                self.output
                    .write(OutputEvent::Error(format!("input error: {}", e)));
                return;
            }
        };

        // Interactive policy for undeclared keys: warn and drop.
        for key in &binding.unknown {
            self.output.write(OutputEvent::Warning(format!(
                "ignoring unknown parameter '{}'",
                key
            )));
        }

        let render = resolve_render(None, workflow.render_markdown, self.config.render.markdown);
        match execute(workflow, binding.values) {
            Ok(outcome) => render_outcome(self.output, outcome, render),
            Err(e) => self.output.write(OutputEvent::Error(e.to_string())),
        }
    }

    /// Wait for explicit operator acknowledgment before redrawing the menu.
    fn pause(&self) -> io::Result<()> {
        self.output
            .write(OutputEvent::System("[enter] to continue...".to_string()));
        let mut buf = String::new();
        io::stdin().lock().read_line(&mut buf)?;
        Ok(())
    }

    fn draw_menu(&self) {
        self.output.clear_screen();
        self.output
            .write(OutputEvent::System(format!("{:═^60}", " flowctl ")));

        let current = self.state.current();
        for (i, workflow) in self.registry.sorted().iter().enumerate() {
            let marker = if current.as_deref() == Some(workflow.name.as_str()) {
                "*"
            } else {
                " "
            };
            self.output.write(OutputEvent::Text(format!(
                "{:>3}{} {} - {}",
                i + 1,
                marker,
                workflow.name,
                workflow.description
            )));
        }

        self.output.write(OutputEvent::System(
            "Commands: [number]=run, s [number]=switch, r [name]=run, q=quit".to_string(),
        ));
    }
}

/// Read one value for a parameter from stdin.
fn prompt_stdin(param: &ParamSpec) -> io::Result<String> {
    print!("{} ({}): ", param.name, param.kind);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        // End of input mid-prompt: abort this dispatch instead of looping.
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
    }
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{Workflow, WorkflowOutput};

    fn registry_with(names: &[&str]) -> WorkflowRegistry {
        let mut registry = WorkflowRegistry::new();
        for name in names {
            registry.register(Workflow::blocking(*name, |_| Ok(WorkflowOutput::text("ok"))));
        }
        registry
    }

    #[test]
    fn test_menu_entry_uses_sorted_order() {
        let registry = registry_with(&["beta", "alpha"]);
        let state = StateStore::open_at("/nonexistent/state.json");
        let config = FileConfig::default();
        let output = crate::output::PlainOutput::new();
        let tui = Tui::new(&registry, &state, &config, &output);

        assert_eq!(tui.menu_entry(1).unwrap().name, "alpha");
        assert_eq!(tui.menu_entry(2).unwrap().name, "beta");
        assert!(tui.menu_entry(0).is_none());
        assert!(tui.menu_entry(3).is_none());
    }
}
