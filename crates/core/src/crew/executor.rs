//! # Task Execution
//!
//! One agent turn: the agent works a task and returns its final answer.
//! [`LlmExecutor`] does this with radkit's structured-output `LlmFunction`;
//! tests swap in their own [`TaskExecutor`].

use super::agent::Agent;
use super::prompts::{turn_prompt, SYSTEM_PROMPT};
use super::task::Task;
use crate::models::ModelConfig;
use crate::run_llm_function;
use async_trait::async_trait;
use radkit::macros::LLMOutput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Runs a single task for a single agent
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Produce the agent's final answer for `task`.
    ///
    /// `context` is the aggregated output of the earlier tasks this one
    /// depends on, if any.
    async fn execute(
        &self,
        agent: &Agent,
        task: &Task,
        context: Option<&str>,
    ) -> anyhow::Result<String>;
}

/// Structured answer the model is asked to produce
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, LLMOutput)]
pub struct FinalAnswer {
    /// The complete final answer, formatted as the task's expected output asks
    pub answer: String,
}

/// Executor backed by an LLM provider
#[derive(Debug, Clone)]
pub struct LlmExecutor {
    /// Crew-wide model; agents may override it with their `llm` key
    config: ModelConfig,
}

impl LlmExecutor {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl TaskExecutor for LlmExecutor {
    async fn execute(
        &self,
        agent: &Agent,
        task: &Task,
        context: Option<&str>,
    ) -> anyhow::Result<String> {
        let model = agent.resolve_model(&self.config)?;
        let prompt = turn_prompt(agent, task, context);

        tracing::debug!(
            agent = %agent.name,
            task = %task.name,
            provider = %model.provider,
            model = %model.model,
            "Calling LLM"
        );

        let result = run_llm_function!(&model, FinalAnswer, SYSTEM_PROMPT, prompt)?;
        Ok(result.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AgentConfig, TaskConfig};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_unknown_agent_provider_fails_before_any_call() {
        let agent = Agent::new(
            "code_ingestion_agent",
            AgentConfig {
                role: "Ingester".to_string(),
                goal: "Read code".to_string(),
                backstory: "Fast reader.".to_string(),
                llm: Some("mistral/large".to_string()),
                verbose: None,
                extra: BTreeMap::new(),
            },
            Some(true),
        );
        let task = Task::new(
            "code_ingestion_task",
            TaskConfig {
                description: "Read".to_string(),
                expected_output: "Map".to_string(),
                agent: Some("code_ingestion_agent".to_string()),
                context: None,
                output_file: None,
                extra: BTreeMap::new(),
            },
        );

        let executor = LlmExecutor::new(ModelConfig::default());
        let err = executor.execute(&agent, &task, None).await.unwrap_err();
        assert!(err.to_string().contains("unknown LLM provider 'mistral'"));
    }
}
