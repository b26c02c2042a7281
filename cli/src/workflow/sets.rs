//! Workflow set discovery
//!
//! Registration is explicit: each compiled-in set exposes an installer that
//! populates the registry during a dedicated discovery phase, before any
//! dispatch. The configured set name (or the --module flag) selects which
//! installer runs.

use super::error::DispatchError;
use super::registry::WorkflowRegistry;
use super::samples;

type Installer = fn(&mut WorkflowRegistry);

const SETS: &[(&str, Installer)] = &[("samples", samples::install)];

/// Install the named workflow set into the registry.
///
/// An unknown name is fatal to the invoking command; nothing can proceed
/// without a populated registry.
pub fn install(set: &str, registry: &mut WorkflowRegistry) -> Result<(), DispatchError> {
    match SETS.iter().find(|(name, _)| *name == set) {
        Some((_, installer)) => {
            installer(registry);
            tracing::debug!(set, count = registry.len(), "installed workflow set");
            Ok(())
        }
        None => Err(DispatchError::UnknownSet(set.to_string())),
    }
}

/// Names of the compiled-in workflow sets.
pub fn available() -> Vec<&'static str> {
    SETS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_samples() {
        let mut registry = WorkflowRegistry::new();
        install("samples", &mut registry).unwrap();
        assert!(!registry.is_empty());
        assert!(registry.contains("hello"));
        assert!(registry.contains("sum"));
    }

    #[test]
    fn test_unknown_set_is_an_error() {
        let mut registry = WorkflowRegistry::new();
        let err = install("nope", &mut registry).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownSet(s) if s == "nope"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_available_lists_samples() {
        assert!(available().contains(&"samples"));
    }
}
