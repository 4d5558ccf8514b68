//! # Audit Crew
//!
//! The three-role static analysis crew.
//!
//! ```text
//! code_ingestion_task ──► bug_detection_task ──► validation_task ──► report.md
//!  (code_ingestion_agent)  (bug_detection_agent)   (validation_agent)
//! ```

pub mod crew_definition;

pub use crew_definition::{
    AuditCrew, BUG_DETECTION_AGENT, BUG_DETECTION_TASK, CODE_INGESTION_AGENT,
    CODE_INGESTION_TASK, REPORT_FILE, VALIDATION_AGENT, VALIDATION_TASK,
};
