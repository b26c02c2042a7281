//! Workflow registry, binding, and execution
//!
//! This module provides:
//! - A per-process registry of named workflow descriptors with declared
//!   parameter schemas
//! - A binder turning raw key=value strings into bound values
//! - A runner driving blocking and suspending handlers uniformly
//! - A dispatcher composing resolution, lookup, binding, and execution
//! - Discovery of compiled-in workflow sets

pub mod binder;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod runner;
pub mod samples;
pub mod sets;

pub use binder::{bind, bind_interactive, parse_raw_args, Binding, RawArgs};
pub use dispatch::{resolve, resolve_render, Dispatcher};
pub use error::{DispatchError, WorkflowError};
pub use registry::{ParamKind, ParamSpec, Workflow, WorkflowFn, WorkflowOutput, WorkflowRegistry};
pub use runner::{execute, RunOutcome, WorkflowArgs};
