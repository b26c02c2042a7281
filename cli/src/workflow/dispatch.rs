//! Workflow resolution and one-shot dispatch

use super::binder::{bind, RawArgs};
use super::error::DispatchError;
use super::registry::WorkflowRegistry;
use super::runner::{execute, RunOutcome};

/// Resolve which workflow to run.
///
/// Precedence is strict: explicit name, then the persisted current
/// selection, then the configured default. Nothing present fails with
/// [`DispatchError::NoWorkflowSelected`].
pub fn resolve(
    explicit: Option<&str>,
    current: Option<&str>,
    default: Option<&str>,
) -> Result<String, DispatchError> {
    explicit
        .or(current)
        .or(default)
        .map(str::to_string)
        .ok_or(DispatchError::NoWorkflowSelected)
}

/// Render-mode precedence: per-invocation override, then the workflow's own
/// preference, then the configured default.
pub fn resolve_render(
    explicit: Option<bool>,
    workflow_pref: Option<bool>,
    config_default: bool,
) -> bool {
    explicit.or(workflow_pref).unwrap_or(config_default)
}

/// Drives registry lookup, binding, and execution for one invocation.
pub struct Dispatcher<'r> {
    registry: &'r WorkflowRegistry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r WorkflowRegistry) -> Self {
        Self { registry }
    }

    /// One-shot dispatch path. Undeclared keys pass through to invocation,
    /// which rejects them for workflows that do not accept extras. Stale
    /// names (for example from persisted state) fail lookup here; they are
    /// never auto-cleared.
    ///
    /// Engine failures propagate to the caller for presentation.
    pub fn run_by_name(&self, name: &str, raw: &RawArgs) -> Result<RunOutcome, DispatchError> {
        let workflow = self
            .registry
            .get(name)
            .ok_or_else(|| DispatchError::WorkflowNotFound(name.to_string()))?;

        let binding = bind(workflow, raw);
        if !binding.unknown.is_empty() {
            tracing::debug!(
                workflow = %name,
                unknown = ?binding.unknown,
                "passing undeclared args through to invocation"
            );
        }
        execute(workflow, binding.pass_through(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::registry::{ParamKind, ParamSpec, Workflow, WorkflowOutput};

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            resolve(Some("A"), Some("B"), Some("C")).unwrap(),
            "A".to_string()
        );
        assert_eq!(resolve(None, Some("B"), Some("C")).unwrap(), "B".to_string());
        assert_eq!(resolve(None, None, Some("C")).unwrap(), "C".to_string());
        assert!(matches!(
            resolve(None, None, None),
            Err(DispatchError::NoWorkflowSelected)
        ));
    }

    #[test]
    fn test_resolve_render_precedence() {
        assert!(!resolve_render(Some(false), Some(true), true));
        assert!(resolve_render(None, Some(true), false));
        assert!(resolve_render(None, None, true));
        assert!(!resolve_render(None, None, false));
    }

    #[test]
    fn test_run_by_name_not_found() {
        let registry = WorkflowRegistry::new();
        let err = Dispatcher::new(&registry)
            .run_by_name("ghost", &RawArgs::new())
            .unwrap_err();
        assert!(matches!(err, DispatchError::WorkflowNotFound(n) if n == "ghost"));
    }

    #[test]
    fn test_run_by_name_binds_and_executes() {
        let mut registry = WorkflowRegistry::new();
        registry.register(
            Workflow::blocking("sum", |args| {
                let a: i64 = args.parse("a")?;
                let b: i64 = args.parse("b")?;
                Ok(WorkflowOutput::text(format!(
                    "Result: {a} + {b} = {}",
                    a + b
                )))
            })
            .with_param(ParamSpec::optional("a", ParamKind::Int, "1"))
            .with_param(ParamSpec::optional("b", ParamKind::Int, "2")),
        );

        let raw: RawArgs = [("a", "10"), ("b", "20")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let outcome = Dispatcher::new(&registry).run_by_name("sum", &raw).unwrap();
        match outcome {
            RunOutcome::Completed(WorkflowOutput::Text(text)) => {
                assert_eq!(text, "Result: 10 + 20 = 30");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
