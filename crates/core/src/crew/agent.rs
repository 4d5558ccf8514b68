//! Crew agents: a named role configuration plus the model it runs on.

use super::interpolate::{interpolate, Inputs};
use crate::config::AgentConfig;
use crate::error::CrewError;
use crate::models::ModelConfig;

/// An agent as declared by the crew
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Key of the entry in `agents.yaml`
    pub name: String,
    pub config: AgentConfig,
    pub verbose: bool,
}

impl Agent {
    /// Build an agent from its configuration entry.
    ///
    /// An explicit `verbose` wins over the entry's `verbose` key; with
    /// neither the agent is quiet.
    pub fn new(name: impl Into<String>, config: AgentConfig, verbose: Option<bool>) -> Self {
        let verbose = verbose.or(config.verbose).unwrap_or(false);
        Self {
            name: name.into(),
            config,
            verbose,
        }
    }

    /// Role without the trailing newline folded YAML scalars leave behind
    pub fn role(&self) -> &str {
        self.config.role.trim()
    }

    /// Model this agent talks to: the `llm` key if set, else the crew-wide default
    pub fn resolve_model(&self, crew_model: &ModelConfig) -> Result<ModelConfig, CrewError> {
        match &self.config.llm {
            Some(spec) => crew_model.resolve_override(spec),
            None => Ok(crew_model.clone()),
        }
    }

    /// Copy of this agent with `{key}` placeholders in role, goal and
    /// backstory replaced from `inputs`.
    pub fn interpolated(&self, inputs: &Inputs) -> Result<Agent, CrewError> {
        let field = |name: &str| format!("agent '{}' {}", self.name, name);
        let mut agent = self.clone();
        agent.config.role = interpolate(&self.config.role, inputs, &field("role"))?;
        agent.config.goal = interpolate(&self.config.goal, inputs, &field("goal"))?;
        agent.config.backstory =
            interpolate(&self.config.backstory, inputs, &field("backstory"))?;
        Ok(agent)
    }
}
