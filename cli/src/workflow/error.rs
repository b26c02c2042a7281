//! Error taxonomy for workflow dispatch

use thiserror::Error;

/// Errors surfaced by the dispatch pipeline.
///
/// One-shot CLI commands treat these as fatal (non-zero exit); the
/// interactive loop reports them inline and continues.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A raw argument token was not in key=value form. Reported before any
    /// binding occurs.
    #[error("Invalid arg '{0}'. Use key=value format.")]
    ArgumentSyntax(String),

    #[error("No workflow selected. Provide a name or set current/default.")]
    NoWorkflowSelected,

    #[error("Workflow '{0}' not found")]
    WorkflowNotFound(String),

    /// Discovery failure: the named workflow set is not compiled in. Nothing
    /// can proceed without a populated registry.
    #[error("Workflow set '{0}' not found")]
    UnknownSet(String),

    #[error("Workflow '{name}' failed: {source}")]
    Execution {
        name: String,
        #[source]
        source: WorkflowError,
    },
}

/// Errors raised by workflow handlers themselves.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("missing required parameter '{0}'")]
    MissingParam(String),

    #[error("unexpected parameter '{0}'")]
    UnknownParam(String),

    #[error("invalid value for parameter '{name}': {message}")]
    InvalidParam { name: String, message: String },

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
