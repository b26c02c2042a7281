//! Configuration loading

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".flowctl.toml";

/// Platform config directory for flowctl state and global config.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flowctl"))
}

/// Find a config file by walking up the directory tree, then checking the
/// global config directory.
///
/// Search order:
/// 1. Current directory and parent directories (walking up to root)
/// 2. Global config at ~/.config/flowctl/
///
/// Returns the path if found, None otherwise.
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let candidate = current.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    if let Some(dir) = config_dir() {
        let global = dir.join(filename);
        if global.exists() {
            return Some(global);
        }
    }

    None
}

/// Top-level configuration (from .flowctl.toml)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub workflows: WorkflowsSectionConfig,
    #[serde(default)]
    pub render: RenderSectionConfig,
}

/// Workflows configuration section
#[derive(Debug, Default, Deserialize)]
pub struct WorkflowsSectionConfig {
    /// Compiled-in workflow set to install at discovery.
    pub set: Option<String>,
    /// Workflow to run when neither an explicit name nor a current
    /// selection is present.
    pub default: Option<String>,
}

/// Render configuration section
#[derive(Debug, Deserialize)]
pub struct RenderSectionConfig {
    /// Render string results as markdown unless overridden per invocation.
    #[serde(default = "default_render_markdown")]
    pub markdown: bool,
    /// Force ANSI output even when stdout is not a terminal.
    #[serde(default)]
    pub force_ansi: bool,
}

fn default_render_markdown() -> bool {
    true
}

impl Default for RenderSectionConfig {
    fn default() -> Self {
        Self {
            markdown: default_render_markdown(),
            force_ansi: false,
        }
    }
}

impl FileConfig {
    /// Load config.
    ///
    /// Search order:
    /// 1. Explicit --config path
    /// 2. Walk up directory tree from cwd looking for .flowctl.toml
    /// 3. ~/.config/flowctl/.flowctl.toml (global fallback)
    /// 4. Defaults
    ///
    /// A malformed file degrades to defaults with a warning rather than
    /// failing the command.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| find_config_file(CONFIG_FILE));

        let Some(path) = path else {
            tracing::debug!("no {CONFIG_FILE} found, using defaults");
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert!(config.workflows.set.is_none());
        assert!(config.workflows.default.is_none());
        assert!(config.render.markdown);
        assert!(!config.render.force_ansi);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[workflows]\nset = \"samples\"\ndefault = \"hello\"\n\n[render]\nmarkdown = false\n"
        )
        .unwrap();

        let config = FileConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.workflows.set.as_deref(), Some("samples"));
        assert_eq!(config.workflows.default.as_deref(), Some("hello"));
        assert!(!config.render.markdown);
        assert!(!config.render.force_ansi);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[workflows]\nset = \"samples\"\n").unwrap();

        let config = FileConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.workflows.set.as_deref(), Some("samples"));
        assert!(config.render.markdown);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [").unwrap();

        assert!(FileConfig::load_from_path(file.path()).is_err());
    }
}
