//! # Errors
//!
//! `CrewError` covers everything that can go wrong while declaring or running
//! a crew. `RunError` is what the entry point hands back to the process: any
//! failure, prefixed with a fixed message.

use std::path::PathBuf;
use thiserror::Error;

/// Prefix attached to every failure surfaced by [`crate::run::run`].
pub const RUN_ERROR_PREFIX: &str = "An error occurred while running the crew";

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("agent '{0}' is not defined in agents.yaml")]
    MissingAgent(String),

    #[error("task '{0}' is not defined in tasks.yaml")]
    MissingTask(String),

    #[error("task '{task}' is assigned to agent '{agent}', which is not part of the crew")]
    UnknownAgent { task: String, agent: String },

    #[error("task '{task}' has no agent assigned")]
    UnassignedTask { task: String },

    #[error("task '{task}' takes context from '{context}', which does not run before it")]
    InvalidContext { task: String, context: String },

    #[error("missing required template variable '{key}' in {field}")]
    MissingInput { key: String, field: String },

    #[error("crew has no tasks to run")]
    EmptyCrew,

    #[error("unknown LLM provider '{0}'")]
    UnknownProvider(String),

    #[error("invalid model specification '{0}', expected <provider>/<model>")]
    InvalidModel(String),

    #[error("task '{task}' failed: {source}")]
    Execution {
        task: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write output to {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

/// Failure of a whole crew run, annotated with [`RUN_ERROR_PREFIX`].
#[derive(Debug, Error)]
#[error("An error occurred while running the crew: {source}")]
pub struct RunError {
    #[source]
    pub source: CrewError,
}

impl From<CrewError> for RunError {
    fn from(source: CrewError) -> Self {
        Self { source }
    }
}
