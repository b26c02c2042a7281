//! Parameter binding
//!
//! Turns raw key=value strings into the bound values for one invocation.
//! Binding never coerces: values stay strings, and a parameter's schema
//! default applies later, at access time inside the handler. Unknown keys
//! are collected rather than dropped; the caller decides the policy (the
//! interactive loop warns and drops, the one-shot CLI path passes them
//! through and lets invocation reject them).

use std::collections::HashMap;
use std::io;

use super::error::DispatchError;
use super::registry::{ParamSpec, Workflow};

/// Unparsed key=value pairs collected for one dispatch.
pub type RawArgs = HashMap<String, String>;

/// Result of binding raw arguments against a workflow's schema.
#[derive(Debug, Default, Clone)]
pub struct Binding {
    /// Values to hand to the handler.
    pub values: HashMap<String, String>,
    /// Raw keys that match no declared parameter.
    pub unknown: Vec<String>,
}

impl Binding {
    /// Forward unknown keys into the value map unchanged. Invocation rejects
    /// them for workflows that do not accept extra arguments.
    pub fn pass_through(mut self, raw: &RawArgs) -> HashMap<String, String> {
        for key in self.unknown.drain(..) {
            if let Some(value) = raw.get(&key) {
                self.values.insert(key, value.clone());
            }
        }
        self.values
    }
}

/// Parse `key=value` tokens into [`RawArgs`].
///
/// A token without `=` fails the whole dispatch attempt, before any binding
/// is observed.
pub fn parse_raw_args(tokens: &[String]) -> Result<RawArgs, DispatchError> {
    let mut parsed = RawArgs::new();
    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) => {
                parsed.insert(key.to_string(), value.to_string());
            }
            None => return Err(DispatchError::ArgumentSyntax(token.clone())),
        }
    }
    Ok(parsed)
}

/// Bind raw arguments against the workflow's declared parameters.
///
/// Declared parameters present in `raw` are kept in string form. Absent
/// parameters stay unbound: the schema default applies at access time, and a
/// missing required parameter is deferred to invocation, where the handler
/// raises on it.
pub fn bind(workflow: &Workflow, raw: &RawArgs) -> Binding {
    let mut binding = Binding::default();
    for (key, value) in raw {
        if workflow.param(key).is_some() {
            binding.values.insert(key.clone(), value.clone());
        } else {
            binding.unknown.push(key.clone());
        }
    }
    binding.unknown.sort();
    binding
}

/// Prompt callback for interactive binding: receives the parameter spec and
/// returns one line of operator input (empty means no value).
pub type PromptFn<'a> = dyn FnMut(&ParamSpec) -> io::Result<String> + 'a;

/// Bind for the interactive loop: prompt for each required parameter still
/// missing after [`bind`], looping until a non-empty value arrives.
pub fn bind_interactive(
    workflow: &Workflow,
    raw: &RawArgs,
    prompt: &mut PromptFn<'_>,
) -> io::Result<Binding> {
    let mut binding = bind(workflow, raw);
    for param in workflow.params.iter().filter(|p| p.is_required()) {
        while !binding.values.contains_key(&param.name) {
            let input = prompt(param)?;
            let input = input.trim();
            if !input.is_empty() {
                binding.values.insert(param.name.clone(), input.to_string());
            }
        }
    }
    Ok(binding)
}
