//! Core command handlers: list, current, switch

use anyhow::Result;

use super::CommandContext;
use crate::output::OutputEvent;
use crate::workflow::DispatchError;

/// Handle the `list` command.
pub fn run_list(ctx: &CommandContext) -> Result<()> {
    let current = ctx.state.current();

    ctx.output
        .write(OutputEvent::Text("Available workflows:".to_string()));
    for workflow in ctx.registry.sorted() {
        let marker = if current.as_deref() == Some(workflow.name.as_str()) {
            " (current)"
        } else {
            ""
        };
        ctx.output.write(OutputEvent::Text(format!(
            "  {} - {}{}",
            workflow.name, workflow.description, marker
        )));
    }
    Ok(())
}

/// Handle the `current` command: show the active selection (persisted state
/// falling back to the configured default).
pub fn run_current(ctx: &CommandContext) -> Result<()> {
    match ctx
        .state
        .current()
        .or_else(|| ctx.config.workflows.default.clone())
    {
        Some(name) => {
            ctx.output
                .write(OutputEvent::Text(format!("Current workflow: {}", name)));
        }
        None => {
            ctx.output.write(OutputEvent::Warning(
                "No workflow set. Use 'flowctl switch <name>'".to_string(),
            ));
        }
    }
    Ok(())
}

/// Handle the `switch` command: validate the name against the registry,
/// then persist it (best-effort).
pub fn run_switch(ctx: &CommandContext, name: &str) -> Result<()> {
    if !ctx.registry.contains(name) {
        return Err(DispatchError::WorkflowNotFound(name.to_string()).into());
    }
    ctx.state.set_current(name);
    ctx.output
        .write(OutputEvent::Text(format!("Switched to workflow: {}", name)));
    Ok(())
}
