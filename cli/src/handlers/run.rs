//! Run command handler: resolve, bind, execute, render

use anyhow::Result;

use super::CommandContext;
use crate::output::{OutputEvent, OutputWriter};
use crate::workflow::{
    parse_raw_args, resolve, resolve_render, RunOutcome, WorkflowOutput,
};

/// Handle the `run` command.
///
/// Resolution, lookup, and execution failures all bubble up; for a one-shot
/// command they are fatal with a non-zero exit.
pub fn run_run(
    ctx: &CommandContext,
    name: Option<&str>,
    arg_tokens: &[String],
    render_override: Option<bool>,
) -> Result<()> {
    // Argument syntax is checked up front, before any binding.
    let raw = parse_raw_args(arg_tokens)?;

    let current = ctx.state.current();
    let selected = resolve(
        name,
        current.as_deref(),
        ctx.config.workflows.default.as_deref(),
    )?;

    let outcome = ctx.dispatcher().run_by_name(&selected, &raw)?;

    let workflow_pref = ctx
        .registry
        .get(&selected)
        .and_then(|wf| wf.render_markdown);
    let render = resolve_render(render_override, workflow_pref, ctx.config.render.markdown);
    render_outcome(ctx.output.as_ref(), outcome, render);
    Ok(())
}

/// Route one run outcome to the output writer.
///
/// Only string results participate in the markdown decision; opaque values
/// render plain. A background-scheduled run has no observable result.
pub(crate) fn render_outcome(output: &dyn OutputWriter, outcome: RunOutcome, render_markdown: bool) {
    match outcome {
        RunOutcome::Completed(WorkflowOutput::Text(text)) if render_markdown => {
            output.write(OutputEvent::Markdown(text));
        }
        RunOutcome::Completed(WorkflowOutput::Text(text)) => {
            output.write(OutputEvent::Text(text));
        }
        RunOutcome::Completed(WorkflowOutput::Value(value)) => {
            output.write(OutputEvent::Text(value.to_string()));
        }
        RunOutcome::AlreadyRunning => {
            output.write(OutputEvent::Warning(
                "workflow scheduled in background; result will not be shown".to_string(),
            ));
        }
    }
}
