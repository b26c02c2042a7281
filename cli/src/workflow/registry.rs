//! Workflow descriptors and the per-process registry
//!
//! Workflows declare their parameter schema at registration time; nothing is
//! introspected at call time. The registry is an explicit object constructed
//! once per process and passed by reference into the dispatcher and the
//! interactive loop.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::error::WorkflowError;
use super::runner::WorkflowArgs;

/// Type tag for a declared parameter.
///
/// Values are always bound as raw strings; the tag documents the expected
/// shape and is shown when prompting. Handlers opt into coercion through
/// [`WorkflowArgs::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Str,
    Int,
    Float,
    Bool,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamKind::Str => "str",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Bool => "bool",
        };
        f.write_str(s)
    }
}

/// A declared workflow parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    /// Default value in raw string form. `None` means the parameter is
    /// required.
    pub default: Option<String>,
}

impl ParamSpec {
    /// A parameter with no default: binding must supply a value.
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// A parameter whose schema default applies when unbound.
    pub fn optional(name: impl Into<String>, kind: ParamKind, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            default: Some(default.into()),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Output of a workflow invocation.
///
/// Only `Text` participates in markdown rendering decisions; `Value` is
/// opaque to the dispatcher and always rendered plain.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutput {
    Text(String),
    Value(serde_json::Value),
}

impl WorkflowOutput {
    pub fn text(s: impl Into<String>) -> Self {
        WorkflowOutput::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            WorkflowOutput::Text(s) => Some(s),
            WorkflowOutput::Value(_) => None,
        }
    }
}

/// Boxed future returned by suspending handlers.
pub type WorkflowFuture =
    Pin<Box<dyn Future<Output = Result<WorkflowOutput, WorkflowError>> + Send>>;

type BlockingFn = Arc<dyn Fn(WorkflowArgs) -> Result<WorkflowOutput, WorkflowError> + Send + Sync>;
type SuspendingFn = Arc<dyn Fn(WorkflowArgs) -> WorkflowFuture + Send + Sync>;

/// The two callable shapes a workflow can take.
///
/// Both are driven to completion behind a single blocking call in the
/// runner; the dispatcher never distinguishes them.
#[derive(Clone)]
pub enum WorkflowFn {
    /// Runs to completion on the calling thread.
    Blocking(BlockingFn),
    /// Suspended computation needing a driver to bring it to completion.
    Suspending(SuspendingFn),
}

impl fmt::Debug for WorkflowFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowFn::Blocking(_) => f.write_str("WorkflowFn::Blocking"),
            WorkflowFn::Suspending(_) => f.write_str("WorkflowFn::Suspending"),
        }
    }
}

/// A named, registered unit of work: handler plus metadata.
#[derive(Debug, Clone)]
pub struct Workflow {
    pub name: String,
    pub description: String,
    /// Per-workflow render preference; `None` defers to the configured
    /// default.
    pub render_markdown: Option<bool>,
    pub params: Vec<ParamSpec>,
    /// Accept key=value pairs beyond the declared schema (catch-all).
    pub accepts_extra: bool,
    pub handler: WorkflowFn,
}

impl Workflow {
    /// Create a workflow with a blocking handler.
    pub fn blocking<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(WorkflowArgs) -> Result<WorkflowOutput, WorkflowError> + Send + Sync + 'static,
    {
        Self::with_handler(name, WorkflowFn::Blocking(Arc::new(f)))
    }

    /// Create a workflow with a suspending handler.
    pub fn suspending<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(WorkflowArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<WorkflowOutput, WorkflowError>> + Send + 'static,
    {
        Self::with_handler(
            name,
            WorkflowFn::Suspending(Arc::new(move |args| -> WorkflowFuture {
                Box::pin(f(args))
            })),
        )
    }

    fn with_handler(name: impl Into<String>, handler: WorkflowFn) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            render_markdown: None,
            params: Vec::new(),
            accepts_extra: false,
            handler,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Declare a parameter.
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Set the per-workflow render preference.
    pub fn with_render_markdown(mut self, render: bool) -> Self {
        self.render_markdown = Some(render);
        self
    }

    /// Accept undeclared key=value pairs instead of rejecting them.
    pub fn with_extra_args(mut self) -> Self {
        self.accepts_extra = true;
        self
    }

    /// Look up a declared parameter by name.
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Name-keyed workflow registry.
///
/// Last registration under a name wins; overwrites are logged at debug,
/// never raised as errors.
#[derive(Debug, Default)]
pub struct WorkflowRegistry {
    entries: HashMap<String, Workflow>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, workflow: Workflow) {
        if self.entries.contains_key(&workflow.name) {
            tracing::debug!(name = %workflow.name, "overwriting existing workflow registration");
        }
        self.entries.insert(workflow.name.clone(), workflow);
    }

    pub fn get(&self, name: &str) -> Option<&Workflow> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Defensive copy of all entries. Handlers are Arc-shared, so cloning
    /// duplicates no handles.
    pub fn all(&self) -> HashMap<String, Workflow> {
        self.entries.clone()
    }

    /// Workflows sorted case-insensitively by name, for menu display.
    pub fn sorted(&self) -> Vec<&Workflow> {
        let mut workflows: Vec<&Workflow> = self.entries.values().collect();
        workflows.sort_by_key(|wf| wf.name.to_lowercase());
        workflows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(name: &str, description: &str) -> Workflow {
        Workflow::blocking(name, |_| Ok(WorkflowOutput::text("ok")))
            .with_description(description)
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = WorkflowRegistry::new();
        registry.register(noop("greet", "first"));
        registry.register(noop("greet", "second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("greet").unwrap().description, "second");
    }

    #[test]
    fn test_all_counts_distinct_names() {
        let mut registry = WorkflowRegistry::new();
        registry.register(noop("a", ""));
        registry.register(noop("b", ""));
        registry.register(noop("a", ""));

        assert_eq!(registry.all().len(), 2);
    }

    #[test]
    fn test_reregister_identical_is_observationally_noop() {
        let mut registry = WorkflowRegistry::new();
        registry.register(noop("greet", "same"));
        registry.register(noop("greet", "same"));

        let wf = registry.get("greet").unwrap();
        assert_eq!(wf.name, "greet");
        assert_eq!(wf.description, "same");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sorted_is_case_insensitive() {
        let mut registry = WorkflowRegistry::new();
        registry.register(noop("beta", ""));
        registry.register(noop("Alpha", ""));
        registry.register(noop("gamma", ""));

        let names: Vec<&str> = registry.sorted().iter().map(|wf| wf.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_param_lookup() {
        let wf = noop("greet", "")
            .with_param(ParamSpec::required("who", ParamKind::Str))
            .with_param(ParamSpec::optional("times", ParamKind::Int, "1"));

        assert!(wf.param("who").unwrap().is_required());
        assert!(!wf.param("times").unwrap().is_required());
        assert!(wf.param("nope").is_none());
    }
}
