//! # AuditCrew Core
//!
//! Declares a three-agent static analysis crew (code ingestion, bug
//! detection, validation) from YAML configuration and runs it sequentially.
//!
//! ## Architecture
//!
//! - `config` - `agents.yaml` / `tasks.yaml` types and process settings
//! - `models` - LLM provider selection
//! - `crew/` - Agent, Task, Crew and the sequential runner
//! - `audit/` - The declared audit crew
//! - `io` - Output files and bundled default configuration
//! - `run` - Entry point: fixed input, annotated errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auditcrew_core::config::CrewSettings;
//! use auditcrew_core::run::{default_inputs, run_audit};
//!
//! let output = run_audit(CrewSettings::default(), default_inputs()).await?;
//! println!("{}", output.raw);
//! ```

pub mod audit;
pub mod config;
pub mod crew;
pub mod error;
pub mod io;
pub mod models;
pub mod run;

pub use error::{CrewError, RunError};
