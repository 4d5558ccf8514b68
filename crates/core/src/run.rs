//! # Entry Point
//!
//! Builds the audit crew, kicks it off once with the input record, and
//! reports any failure as a [`RunError`]. No retries and no partial recovery:
//! the first error ends the run.

use crate::audit::AuditCrew;
use crate::config::CrewSettings;
use crate::crew::{CrewOutput, Inputs, Kickoff};
use crate::error::RunError;

/// Topic the crew audits when no other is given
pub const TOPIC: &str = "Perform a comprehensive static analysis on this enterprise backend system and identify critical risks";

/// Input record for a default run: `{ topic: TOPIC }`
pub fn default_inputs() -> Inputs {
    Inputs::from([("topic".to_string(), TOPIC.to_string())])
}

/// Kick `crew` off once with the default input record
pub async fn run<K>(crew: &K) -> Result<CrewOutput, RunError>
where
    K: Kickoff + ?Sized,
{
    run_with_inputs(crew, default_inputs()).await
}

/// Kick `crew` off once with `inputs`
pub async fn run_with_inputs<K>(crew: &K, inputs: Inputs) -> Result<CrewOutput, RunError>
where
    K: Kickoff + ?Sized,
{
    crew.kickoff(inputs).await.map_err(RunError::from)
}

/// Load the audit crew from `settings` and run it with `inputs`.
///
/// Configuration problems are reported the same way as failures during the
/// run itself.
pub async fn run_audit(settings: CrewSettings, inputs: Inputs) -> Result<CrewOutput, RunError> {
    let crew = AuditCrew::load(settings)
        .and_then(|audit| audit.crew())
        .map_err(RunError::from)?;
    run_with_inputs(&crew, inputs).await
}
