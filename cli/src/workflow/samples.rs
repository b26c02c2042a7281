//! Built-in sample workflows
//!
//! The `samples` set exercises each registration shape: markdown output,
//! typed coercion, a required parameter (prompted for in the interactive
//! loop), a variadic catch-all returning an opaque value, and a suspending
//! handler.

use std::time::Duration;

use super::registry::{ParamKind, ParamSpec, Workflow, WorkflowOutput, WorkflowRegistry};

/// Install the `samples` set.
pub fn install(registry: &mut WorkflowRegistry) {
    registry.register(hello());
    registry.register(sum());
    registry.register(echo());
    registry.register(pairs());
    registry.register(countdown());
}

fn hello() -> Workflow {
    Workflow::blocking("hello", |args| {
        let name = args.get_or("name", "world");
        Ok(WorkflowOutput::text(format!(
            "# Hello, {name}!\n\n\
             This is **Markdown** with a table.\n\n\
             | Col | Val |\n|-----|-----|\n| A   | 1   |\n| B   | 2   |\n"
        )))
    })
    .with_description("Hello workflow returning markdown")
    .with_param(ParamSpec::optional("name", ParamKind::Str, "world"))
    .with_render_markdown(true)
}

fn sum() -> Workflow {
    Workflow::blocking("sum", |args| {
        let a: i64 = args.parse("a")?;
        let b: i64 = args.parse("b")?;
        Ok(WorkflowOutput::text(format!(
            "Result: {a} + {b} = {}",
            a + b
        )))
    })
    .with_description("Sum two integers")
    .with_param(ParamSpec::optional("a", ParamKind::Int, "1"))
    .with_param(ParamSpec::optional("b", ParamKind::Int, "2"))
}

fn echo() -> Workflow {
    Workflow::blocking("echo", |args| {
        Ok(WorkflowOutput::text(args.require("text")?.to_string()))
    })
    .with_description("Echo the provided text back")
    .with_param(ParamSpec::required("text", ParamKind::Str))
}

fn pairs() -> Workflow {
    Workflow::blocking("pairs", |args| {
        Ok(WorkflowOutput::Value(serde_json::json!(args.bound())))
    })
    .with_description("Echo raw key=value pairs as JSON")
    .with_extra_args()
}

fn countdown() -> Workflow {
    Workflow::suspending("countdown", |args| async move {
        let from: u32 = args.parse("from")?;
        let mut lines = Vec::with_capacity(from as usize + 1);
        for n in (1..=from).rev() {
            tokio::time::sleep(Duration::from_millis(50)).await;
            lines.push(format!("{n}..."));
        }
        lines.push("liftoff".to_string());
        Ok(WorkflowOutput::text(lines.join("\n")))
    })
    .with_description("Count down asynchronously")
    .with_param(ParamSpec::optional("from", ParamKind::Int, "3"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::runner::{execute, RunOutcome};
    use std::collections::HashMap;

    #[test]
    fn test_sum_uses_schema_defaults() {
        let outcome = execute(&sum(), HashMap::new()).unwrap();
        match outcome {
            RunOutcome::Completed(WorkflowOutput::Text(text)) => {
                assert_eq!(text, "Result: 1 + 2 = 3");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_hello_prefers_markdown() {
        assert_eq!(hello().render_markdown, Some(true));
        assert_eq!(sum().render_markdown, None);
    }

    #[test]
    fn test_pairs_returns_opaque_value() {
        let values: HashMap<String, String> =
            [("k".to_string(), "v".to_string())].into_iter().collect();
        let outcome = execute(&pairs(), values).unwrap();
        match outcome {
            RunOutcome::Completed(WorkflowOutput::Value(v)) => assert_eq!(v["k"], "v"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
