//! # Crew Runtime
//!
//! Agents, tasks and the sequential process that runs them. LLM transport
//! and structured output come from radkit; this module only decides what
//! each agent is asked and in which order.
//!
//! ## Flow
//!
//! ```text
//! Crew::kickoff(inputs) → [Task 1 → Task 2 → ... → Task N] → CrewOutput
//!                            └── context of earlier tasks flows forward
//! ```

pub mod agent;
pub mod events;
pub mod executor;
pub mod interpolate;
pub mod llm_helpers;
pub mod pipeline;
pub mod prompts;
pub mod runner;
pub mod task;

pub use agent::Agent;
pub use events::{CrewEvent, CrewEventKind};
pub use executor::{FinalAnswer, LlmExecutor, TaskExecutor};
pub use interpolate::{interpolate, Inputs};
pub use pipeline::{Pipeline, PipelineStage};
pub use runner::{Crew, CrewOutput, Kickoff, Process};
pub use task::{Task, TaskOutput};
