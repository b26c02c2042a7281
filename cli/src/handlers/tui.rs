//! Tui command handler

use anyhow::Result;

use super::CommandContext;
use crate::cli::Tui;

/// Handle the `tui` command: enter the interactive loop.
pub fn run_tui(ctx: &CommandContext) -> Result<()> {
    let mut tui = Tui::new(&ctx.registry, &ctx.state, &ctx.config, ctx.output.as_ref());
    tui.run()?;
    Ok(())
}
