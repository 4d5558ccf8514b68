//! # Crew Configuration
//!
//! Serde types for `agents.yaml` and `tasks.yaml`, plus the process-level
//! [`CrewSettings`].
//!
//! Both files are maps from a name to an entry. Keys the runtime does not
//! interpret are kept in `extra` so an entry survives loading unchanged.

use crate::models::ModelConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the agent definitions inside the config directory
pub const AGENTS_FILE: &str = "agents.yaml";
/// File name of the task definitions inside the config directory
pub const TASKS_FILE: &str = "tasks.yaml";

/// One entry of `agents.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// `<provider>/<model>` or a bare model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// One entry of `tasks.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskConfig {
    pub description: String,
    pub expected_output: String,
    /// Name of the agent (key in `agents.yaml`) that performs the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Earlier tasks whose output feeds this one; all earlier tasks when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

pub type AgentsConfig = BTreeMap<String, AgentConfig>;
pub type TasksConfig = BTreeMap<String, TaskConfig>;

/// Load and parse one YAML mapping file
pub fn load_yaml<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML config {}", path.display()))
}

/// Load `agents.yaml` from a config directory
pub fn load_agents(config_dir: impl AsRef<Path>) -> Result<AgentsConfig> {
    load_yaml(config_dir.as_ref().join(AGENTS_FILE))
}

/// Load `tasks.yaml` from a config directory
pub fn load_tasks(config_dir: impl AsRef<Path>) -> Result<TasksConfig> {
    load_yaml(config_dir.as_ref().join(TASKS_FILE))
}

/// Process-level settings for a crew run
#[derive(Debug, Clone)]
pub struct CrewSettings {
    /// Directory holding `agents.yaml` and `tasks.yaml`
    pub config_dir: PathBuf,
    /// Relative `output_file` paths resolve against this directory
    pub output_dir: PathBuf,
    /// Crew-wide model; agents can override it with `llm`
    pub model: ModelConfig,
}

impl Default for CrewSettings {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("config"),
            output_dir: PathBuf::from("."),
            model: ModelConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENTS: &str = r#"
code_ingestion_agent:
  role: Code Ingestion Specialist
  goal: Map the codebase for {topic}
  backstory: You read large codebases quickly.
  llm: openai/gpt-4o
  max_iter: 5
"#;

    #[test]
    fn test_agent_entry_keeps_unknown_keys() {
        let agents: AgentsConfig = serde_yaml::from_str(AGENTS).unwrap();
        let agent = &agents["code_ingestion_agent"];
        assert_eq!(agent.role, "Code Ingestion Specialist");
        assert_eq!(agent.llm.as_deref(), Some("openai/gpt-4o"));
        assert_eq!(agent.extra["max_iter"], serde_yaml::Value::from(5_u64));
    }

    #[test]
    fn test_task_entry_optional_fields() {
        let tasks: TasksConfig = serde_yaml::from_str(
            r#"
validation_task:
  description: Validate the findings.
  expected_output: A markdown report.
  agent: validation_agent
  context: [bug_detection_task]
"#,
        )
        .unwrap();
        let task = &tasks["validation_task"];
        assert_eq!(task.agent.as_deref(), Some("validation_agent"));
        assert_eq!(task.context, Some(vec!["bug_detection_task".to_string()]));
        assert!(task.output_file.is_none());
        assert!(task.extra.is_empty());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_agents(dir.path()).unwrap_err();
        assert!(err.to_string().contains("agents.yaml"));
    }

    #[test]
    fn test_load_invalid_yaml_names_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TASKS_FILE), "validation_task: [not, a, task]").unwrap();
        let err = load_tasks(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
        assert!(err.to_string().contains("tasks.yaml"));
    }

    #[test]
    fn test_default_settings() {
        let settings = CrewSettings::default();
        assert_eq!(settings.config_dir, PathBuf::from("config"));
        assert_eq!(settings.output_dir, PathBuf::from("."));
    }
}
