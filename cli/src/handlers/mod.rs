//! Command handlers
//!
//! One handler per CLI command. CommandContext assembles the resources they
//! share: loaded config with CLI overrides applied, a registry populated by
//! discovery, the state store, and an output writer.

use anyhow::Result;

use crate::cli::Cli;
use crate::config::FileConfig;
use crate::output::{self, OutputWriter};
use crate::state::StateStore;
use crate::workflow::{sets, Dispatcher, WorkflowRegistry};

pub mod core;
pub mod run;
pub mod tui;

pub use core::{run_current, run_list, run_switch};
pub use run::run_run;
pub use tui::run_tui;

/// Shared context for command handlers.
pub struct CommandContext {
    pub config: FileConfig,
    pub registry: WorkflowRegistry,
    pub state: StateStore,
    pub output: Box<dyn OutputWriter>,
}

impl CommandContext {
    /// Build the context for a registry-backed command: load config, apply
    /// CLI overrides, run discovery, open the state store.
    ///
    /// Discovery failures are fatal here; nothing can proceed without a
    /// populated registry.
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = FileConfig::load(cli.config.as_deref());

        // Resolve with priority: CLI/env > config file.
        let set = cli
            .module
            .clone()
            .or_else(|| config.workflows.set.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "workflows set is not configured in .flowctl.toml and not provided via --module (available: {})",
                    sets::available().join(", ")
                )
            })?;

        let mut registry = WorkflowRegistry::new();
        sets::install(&set, &mut registry)?;

        let output = output::default_output(cli.force_ansi || config.render.force_ansi);

        Ok(Self {
            config,
            registry,
            state: StateStore::open(),
            output,
        })
    }

    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_module_flag_overrides_config_set() {
        let file = config_file("[workflows]\nset = \"no-such-set\"");

        let cli = Cli::try_parse_from([
            "flowctl",
            "list",
            "--config",
            file.path().to_str().unwrap(),
            "--module",
            "samples",
        ])
        .unwrap();

        let ctx = CommandContext::new(&cli).unwrap();
        assert!(ctx.registry.contains("hello"));
    }

    #[test]
    fn test_config_set_used_when_no_flag() {
        let file = config_file("[workflows]\nset = \"samples\"");

        let cli =
            Cli::try_parse_from(["flowctl", "list", "--config", file.path().to_str().unwrap()])
                .unwrap();

        let ctx = CommandContext::new(&cli).unwrap();
        assert!(ctx.registry.contains("sum"));
    }

    #[test]
    fn test_unconfigured_set_is_fatal() {
        let file = config_file("[render]\nmarkdown = true");

        let cli =
            Cli::try_parse_from(["flowctl", "list", "--config", file.path().to_str().unwrap()])
                .unwrap();

        assert!(CommandContext::new(&cli).is_err());
    }
}
