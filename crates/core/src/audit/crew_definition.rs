//! # Audit Crew Definition
//!
//! Declares the three agents and three tasks of the audit crew. Every
//! factory hands the named configuration entry straight to the constructor;
//! the only additions are `verbose` on the agents and the `report.md` output
//! of the validation task.

use crate::config::{load_agents, load_tasks, AgentsConfig, CrewSettings, TasksConfig};
use crate::crew::{Agent, Crew, LlmExecutor, Process, Task, TaskExecutor};
use crate::error::CrewError;
use std::sync::Arc;

pub const CODE_INGESTION_AGENT: &str = "code_ingestion_agent";
pub const BUG_DETECTION_AGENT: &str = "bug_detection_agent";
pub const VALIDATION_AGENT: &str = "validation_agent";

pub const CODE_INGESTION_TASK: &str = "code_ingestion_task";
pub const BUG_DETECTION_TASK: &str = "bug_detection_task";
pub const VALIDATION_TASK: &str = "validation_task";

/// File the validation task writes its report to
pub const REPORT_FILE: &str = "report.md";

/// The audit crew: configuration entries plus the settings to run them with
#[derive(Debug, Clone)]
pub struct AuditCrew {
    agents_config: AgentsConfig,
    tasks_config: TasksConfig,
    settings: CrewSettings,
}

impl AuditCrew {
    /// Build from already parsed configuration
    pub fn new(agents_config: AgentsConfig, tasks_config: TasksConfig, settings: CrewSettings) -> Self {
        Self {
            agents_config,
            tasks_config,
            settings,
        }
    }

    /// Load `agents.yaml` and `tasks.yaml` from `settings.config_dir`
    pub fn load(settings: CrewSettings) -> Result<Self, CrewError> {
        let agents_config = load_agents(&settings.config_dir)?;
        let tasks_config = load_tasks(&settings.config_dir)?;
        tracing::debug!(
            config_dir = %settings.config_dir.display(),
            agents = agents_config.len(),
            tasks = tasks_config.len(),
            "Loaded crew configuration"
        );
        Ok(Self::new(agents_config, tasks_config, settings))
    }

    fn agent(&self, name: &str) -> Result<Agent, CrewError> {
        let config = self
            .agents_config
            .get(name)
            .cloned()
            .ok_or_else(|| CrewError::MissingAgent(name.to_string()))?;
        Ok(Agent::new(name, config, Some(true)))
    }

    fn task(&self, name: &str) -> Result<Task, CrewError> {
        let config = self
            .tasks_config
            .get(name)
            .cloned()
            .ok_or_else(|| CrewError::MissingTask(name.to_string()))?;
        Ok(Task::new(name, config))
    }

    /// Maps the system under review
    pub fn code_ingestion_agent(&self) -> Result<Agent, CrewError> {
        self.agent(CODE_INGESTION_AGENT)
    }

    /// Hunts for defects in the mapped system
    pub fn bug_detection_agent(&self) -> Result<Agent, CrewError> {
        self.agent(BUG_DETECTION_AGENT)
    }

    /// Confirms findings and writes the risk report
    pub fn validation_agent(&self) -> Result<Agent, CrewError> {
        self.agent(VALIDATION_AGENT)
    }

    pub fn code_ingestion_task(&self) -> Result<Task, CrewError> {
        self.task(CODE_INGESTION_TASK)
    }

    pub fn bug_detection_task(&self) -> Result<Task, CrewError> {
        self.task(BUG_DETECTION_TASK)
    }

    pub fn validation_task(&self) -> Result<Task, CrewError> {
        Ok(self.task(VALIDATION_TASK)?.with_output_file(REPORT_FILE))
    }

    /// All agents, in declaration order
    pub fn agents(&self) -> Result<Vec<Agent>, CrewError> {
        Ok(vec![
            self.code_ingestion_agent()?,
            self.bug_detection_agent()?,
            self.validation_agent()?,
        ])
    }

    /// All tasks, in declaration order
    pub fn tasks(&self) -> Result<Vec<Task>, CrewError> {
        Ok(vec![
            self.code_ingestion_task()?,
            self.bug_detection_task()?,
            self.validation_task()?,
        ])
    }

    /// The sequential crew backed by the configured LLM provider
    pub fn crew(&self) -> Result<Crew, CrewError> {
        let executor = Arc::new(LlmExecutor::new(self.settings.model.clone()));
        self.crew_with_executor(executor)
    }

    /// The sequential crew backed by a caller-supplied executor
    pub fn crew_with_executor(&self, executor: Arc<dyn TaskExecutor>) -> Result<Crew, CrewError> {
        Ok(Crew::new(self.agents()?, self.tasks()?, Process::Sequential, executor)
            .with_verbose(true)
            .with_output_dir(&self.settings.output_dir))
    }
}
