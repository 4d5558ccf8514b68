//! Prompt construction for a single agent turn.
//!
//! Every turn shares one system prompt (`defaults/crew_member.md`). The
//! per-turn message opens with who the agent is, then carries the task, what
//! a finished answer looks like, and the output of earlier tasks.

use super::agent::Agent;
use super::task::{Task, TaskOutput};

/// Line placed between outputs of different earlier tasks
pub const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

/// Instructions shared by every crew member
pub const SYSTEM_PROMPT: &str = include_str!("../defaults/crew_member.md");

/// Persona block for `agent`
pub fn persona_prompt(agent: &Agent) -> String {
    format!(
        "You are {role}. {backstory}\nYour personal goal is: {goal}",
        role = agent.config.role.trim(),
        backstory = agent.config.backstory.trim(),
        goal = agent.config.goal.trim(),
    )
}

/// User prompt for `task`, with the aggregated context of earlier tasks
pub fn task_prompt(task: &Task, context: Option<&str>) -> String {
    let mut prompt = format!(
        "Task: {}\n\nA complete answer looks like: {}\n\
         Return the full content of your answer, not a summary of it.",
        task.config.description.trim(),
        task.config.expected_output.trim(),
    );
    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("\n\nOutput of earlier tasks:\n");
        prompt.push_str(context);
    }
    prompt
}

/// Full message for one agent turn
pub fn turn_prompt(agent: &Agent, task: &Task, context: Option<&str>) -> String {
    format!("{}\n\n{}", persona_prompt(agent), task_prompt(task, context))
}

/// Join the raw outputs of earlier tasks into one context block
pub fn aggregate_context<'a>(outputs: impl IntoIterator<Item = &'a TaskOutput>) -> String {
    outputs
        .into_iter()
        .map(|output| output.raw.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
