//! Workflow execution
//!
//! Drives both callable shapes to completion behind one blocking call.
//! Blocking handlers run inline. Suspending handlers get a dedicated
//! single-shot current-thread runtime per invocation; if the caller is
//! already inside an async driver, starting a nested one is invalid, so the
//! work is handed to the active runtime as a background task and the caller
//! gets an explicit [`RunOutcome::AlreadyRunning`] instead of a result.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tokio::runtime;

use super::error::{DispatchError, WorkflowError};
use super::registry::{ParamSpec, Workflow, WorkflowFn, WorkflowOutput};

/// Arguments as seen by a workflow handler.
///
/// Values are the raw strings bound for this invocation; schema defaults
/// apply at access time. [`WorkflowArgs::parse`] is the extension point for
/// typed coercion; binding itself never coerces.
#[derive(Debug, Clone)]
pub struct WorkflowArgs {
    values: HashMap<String, String>,
    params: Vec<ParamSpec>,
}

impl WorkflowArgs {
    pub(crate) fn new(values: HashMap<String, String>, params: Vec<ParamSpec>) -> Self {
        Self { values, params }
    }

    /// Bound value if present, else the schema default.
    pub fn get(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.values.get(name) {
            return Some(value);
        }
        self.params
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.default.as_deref())
    }

    /// Bound value, schema default, or the given fallback.
    pub fn get_or<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        self.get(name).unwrap_or(fallback)
    }

    /// Bound value or schema default; a missing required parameter raises
    /// here, at invocation time.
    pub fn require(&self, name: &str) -> Result<&str, WorkflowError> {
        self.get(name)
            .ok_or_else(|| WorkflowError::MissingParam(name.to_string()))
    }

    /// Parse a value with `FromStr`. Typed-coercion extension point: the
    /// binder always passes raw strings through, handlers opt in here.
    pub fn parse<T>(&self, name: &str) -> Result<T, WorkflowError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.require(name)?;
        raw.parse().map_err(|e: T::Err| WorkflowError::InvalidParam {
            name: name.to_string(),
            message: format!("'{raw}': {e}"),
        })
    }

    /// All explicitly bound values (schema defaults excluded).
    pub fn bound(&self) -> &HashMap<String, String> {
        &self.values
    }
}

/// Outcome of driving a workflow.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(WorkflowOutput),
    /// The calling context was already inside an async driver; the work was
    /// handed to it as a background task and its result will not be
    /// observed by this caller.
    AlreadyRunning,
}

/// Run a workflow with the given bound values, blocking until it finishes
/// (or until the scheduling conflict above is detected).
pub fn execute(
    workflow: &Workflow,
    values: HashMap<String, String>,
) -> Result<RunOutcome, DispatchError> {
    // Non-variadic workflows reject keys outside their schema at invocation
    // time, like a callable rejecting unexpected keyword arguments.
    if !workflow.accepts_extra {
        let mut undeclared: Vec<&String> = values
            .keys()
            .filter(|key| workflow.param(key).is_none())
            .collect();
        undeclared.sort();
        if let Some(key) = undeclared.first() {
            return Err(DispatchError::Execution {
                name: workflow.name.clone(),
                source: WorkflowError::UnknownParam((*key).clone()),
            });
        }
    }

    let args = WorkflowArgs::new(values, workflow.params.clone());

    let result = match &workflow.handler {
        WorkflowFn::Blocking(f) => f(args),
        WorkflowFn::Suspending(f) => match runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!(
                    workflow = %workflow.name,
                    "async driver already active; scheduling as background task"
                );
                let fut = f(args);
                let name = workflow.name.clone();
                handle.spawn(async move {
                    if let Err(e) = fut.await {
                        tracing::error!(workflow = %name, error = %e, "background workflow failed");
                    }
                });
                return Ok(RunOutcome::AlreadyRunning);
            }
            Err(_) => {
                let rt = runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| DispatchError::Execution {
                        name: workflow.name.clone(),
                        source: WorkflowError::Failed(format!("failed to start async driver: {e}")),
                    })?;
                rt.block_on(f(args))
            }
        },
    };

    match result {
        Ok(output) => Ok(RunOutcome::Completed(output)),
        Err(source) => Err(DispatchError::Execution {
            name: workflow.name.clone(),
            source,
        }),
    }
}
