//! Crew tasks and their outputs.

use super::interpolate::{interpolate, Inputs};
use crate::config::TaskConfig;
use crate::error::CrewError;
use serde::{Deserialize, Serialize};

/// A task as declared by the crew
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Key of the entry in `tasks.yaml`
    pub name: String,
    pub config: TaskConfig,
    /// Where the final answer is written, relative to the crew output directory
    pub output_file: Option<String>,
}

impl Task {
    /// Build a task from its configuration entry, taking `output_file` from it
    pub fn new(name: impl Into<String>, config: TaskConfig) -> Self {
        let output_file = config.output_file.clone();
        Self {
            name: name.into(),
            config,
            output_file,
        }
    }

    /// Set the output file, overriding the configuration entry
    pub fn with_output_file(mut self, path: impl Into<String>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Name of the agent this task is assigned to
    pub fn agent(&self) -> Option<&str> {
        self.config.agent.as_deref()
    }

    /// Copy of this task with `{key}` placeholders replaced from `inputs`
    pub fn interpolated(&self, inputs: &Inputs) -> Result<Task, CrewError> {
        let field = |name: &str| format!("task '{}' {}", self.name, name);
        let mut task = self.clone();
        task.config.description =
            interpolate(&self.config.description, inputs, &field("description"))?;
        task.config.expected_output = interpolate(
            &self.config.expected_output,
            inputs,
            &field("expected_output"),
        )?;
        task.output_file = self
            .output_file
            .as_deref()
            .map(|path| interpolate(path, inputs, &field("output_file")))
            .transpose()?;
        Ok(task)
    }
}

/// Result of one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Task name
    pub name: String,
    /// Role of the agent that performed the task
    pub agent: String,
    /// Interpolated task description
    pub description: String,
    /// The agent's final answer
    pub raw: String,
}
