//! CLI argument definitions
//!
//! Contains the main CLI struct and Commands enum for clap parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flowctl")]
#[command(about = "Discover, select, and run registered workflows")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workflow set to install (overrides [workflows].set in .flowctl.toml)
    #[arg(long, env = "FLOWCTL_MODULE", global = true)]
    pub module: Option<String>,

    /// Path to .flowctl.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Force ANSI output even when stdout is not a terminal
    #[arg(long, global = true)]
    pub force_ansi: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available workflows
    List,
    /// Show the current workflow selection
    Current,
    /// Set the current workflow
    Switch {
        /// Workflow name
        name: String,
    },
    /// Run a workflow with optional parameters
    Run {
        /// Workflow name; if omitted uses current/default
        name: Option<String>,
        /// Pass a parameter as key=value. Repeatable.
        #[arg(long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,
        /// Render string output as markdown
        #[arg(long, conflicts_with = "plain")]
        markdown: bool,
        /// Render string output as plain text
        #[arg(long)]
        plain: bool,
    },
    /// Interactive terminal mode
    Tui,
}

impl Commands {
    /// Per-invocation render override for `run`: --markdown and --plain map
    /// to Some(true)/Some(false), neither means no override.
    pub fn render_override(markdown: bool, plain: bool) -> Option<bool> {
        if markdown {
            Some(true)
        } else if plain {
            Some(false)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_override() {
        assert_eq!(Commands::render_override(true, false), Some(true));
        assert_eq!(Commands::render_override(false, true), Some(false));
        assert_eq!(Commands::render_override(false, false), None);
    }

    #[test]
    fn test_cli_parses_run_args() {
        let cli = Cli::try_parse_from([
            "flowctl", "run", "sum", "--arg", "a=10", "--arg", "b=20", "--plain",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                name,
                args,
                markdown,
                plain,
            } => {
                assert_eq!(name.as_deref(), Some("sum"));
                assert_eq!(args, vec!["a=10".to_string(), "b=20".to_string()]);
                assert!(!markdown);
                assert!(plain);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["flowctl", "list", "--module", "samples", "-vv"]).unwrap();
        assert_eq!(cli.module.as_deref(), Some("samples"));
        assert_eq!(cli.verbose, 2);
    }
}
