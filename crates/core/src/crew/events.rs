//! # Crew Events
//!
//! Progress events emitted while a crew runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of crew event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrewEventKind {
    /// Kickoff accepted, tasks about to run
    CrewStarted,
    /// Agent started working on a task
    TaskStarted,
    /// Task produced its final answer
    TaskCompleted,
    /// Task failed, the run stops here
    TaskFailed,
    /// All tasks completed
    CrewCompleted,
    /// Run aborted
    CrewFailed,
}

/// An event in a crew run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewEvent {
    /// Unique event ID
    pub id: String,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Kind of event
    pub kind: CrewEventKind,
    /// Role of the agent involved, empty for crew-level events
    pub agent: String,
    /// Task name if applicable
    #[serde(default)]
    pub task: Option<String>,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CrewEvent {
    /// Create a new event
    pub fn new(kind: CrewEventKind, agent: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            agent: agent.to_string(),
            task: None,
            data: None,
        }
    }

    /// Attach the task name
    pub fn with_task(mut self, task: &str) -> Self {
        self.task = Some(task.to_string());
        self
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
