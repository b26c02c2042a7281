use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowctl::cli::{Cli, Commands};
use flowctl::handlers::{self, CommandContext};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let ctx = CommandContext::new(&cli)?;

    match &cli.command {
        Commands::List => handlers::run_list(&ctx),
        Commands::Current => handlers::run_current(&ctx),
        Commands::Switch { name } => handlers::run_switch(&ctx, name),
        Commands::Run {
            name,
            args,
            markdown,
            plain,
        } => handlers::run_run(
            &ctx,
            name.as_deref(),
            args,
            Commands::render_override(*markdown, *plain),
        ),
        Commands::Tui => handlers::run_tui(&ctx),
    }
}

/// Map the -v count to a log filter, honoring RUST_LOG when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
