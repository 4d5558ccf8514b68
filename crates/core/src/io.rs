//! # IO Utilities
//!
//! File system operations for crew outputs and the bundled default
//! configuration.

use crate::config::{AGENTS_FILE, TASKS_FILE};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default `agents.yaml` written by `init`
pub const DEFAULT_AGENTS_YAML: &str = include_str!("defaults/agents.yaml");
/// Default `tasks.yaml` written by `init`
pub const DEFAULT_TASKS_YAML: &str = include_str!("defaults/tasks.yaml");

/// Write a task output, creating parent directories as needed
pub async fn write_output(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {:?}", path))
}

/// Write the default `agents.yaml` / `tasks.yaml` into `config_dir`.
///
/// Existing files are left alone unless `force` is set. Returns the paths
/// that were written.
pub async fn write_default_config(config_dir: impl AsRef<Path>, force: bool) -> Result<Vec<PathBuf>> {
    let config_dir = config_dir.as_ref();
    fs::create_dir_all(config_dir)
        .await
        .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;

    let mut written = Vec::new();
    for (name, content) in [(AGENTS_FILE, DEFAULT_AGENTS_YAML), (TASKS_FILE, DEFAULT_TASKS_YAML)] {
        let path = config_dir.join(name);
        if !force && fs::metadata(&path).await.is_ok() {
            tracing::info!(path = %path.display(), "Keeping existing config file");
            continue;
        }
        write_output(&path, content).await?;
        written.push(path);
    }

    Ok(written)
}
