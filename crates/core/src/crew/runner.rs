//! # Crew Runner
//!
//! Composes agents and tasks and runs them to completion.
//!
//! ```text
//! kickoff(inputs)
//!   ├─ validate wiring (task → agent, context → earlier task)
//!   ├─ interpolate {placeholders} from inputs
//!   └─ for each task, in order:
//!        context = outputs of `context` tasks | all earlier outputs
//!        answer  = executor.execute(agent, task, context)
//!        write answer to output_file, if any
//! ```

use super::agent::Agent;
use super::events::{CrewEvent, CrewEventKind};
use super::executor::TaskExecutor;
use super::interpolate::Inputs;
use super::pipeline::Pipeline;
use super::prompts::aggregate_context;
use super::task::{Task, TaskOutput};
use crate::error::CrewError;
use crate::io::write_output;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// How tasks are scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Process {
    /// One task after another, in declaration order
    #[default]
    Sequential,
}

/// Result of a full run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewOutput {
    /// Final answer of the last task
    pub raw: String,
    /// Every task's output, in run order
    pub tasks_output: Vec<TaskOutput>,
    /// Events emitted during the run
    pub events: Vec<CrewEvent>,
}

/// The run-to-completion operation
#[async_trait]
pub trait Kickoff: Send + Sync {
    async fn kickoff(&self, inputs: Inputs) -> Result<CrewOutput, CrewError>;
}

/// A pipeline of agents and tasks
pub struct Crew {
    pub agents: Vec<Agent>,
    pub tasks: Vec<Task>,
    pub process: Process,
    pub verbose: bool,
    /// Relative output files resolve against this directory
    output_dir: PathBuf,
    executor: Arc<dyn TaskExecutor>,
    event_tx: Option<mpsc::Sender<CrewEvent>>,
}

impl std::fmt::Debug for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crew")
            .field("agents", &self.agents)
            .field("tasks", &self.tasks)
            .field("process", &self.process)
            .field("verbose", &self.verbose)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl Crew {
    pub fn new(
        agents: Vec<Agent>,
        tasks: Vec<Task>,
        process: Process,
        executor: Arc<dyn TaskExecutor>,
    ) -> Self {
        Self {
            agents,
            tasks,
            process,
            verbose: false,
            output_dir: PathBuf::from("."),
            executor,
            event_tx: None,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Forward events to a channel as they happen
    pub fn with_event_channel(mut self, tx: mpsc::Sender<CrewEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    /// Check that every task has a crew agent and only takes context from
    /// tasks that run before it.
    pub fn validate(&self) -> Result<(), CrewError> {
        if self.tasks.is_empty() {
            return Err(CrewError::EmptyCrew);
        }
        for (index, task) in self.tasks.iter().enumerate() {
            let agent = task.agent().ok_or_else(|| CrewError::UnassignedTask {
                task: task.name.clone(),
            })?;
            if self.agent(agent).is_none() {
                return Err(CrewError::UnknownAgent {
                    task: task.name.clone(),
                    agent: agent.to_string(),
                });
            }
            for context in task.config.context.iter().flatten() {
                let earlier = self.tasks[..index].iter().any(|t| &t.name == context);
                if !earlier {
                    return Err(CrewError::InvalidContext {
                        task: task.name.clone(),
                        context: context.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    async fn emit(&self, events: &mut Vec<CrewEvent>, event: CrewEvent) {
        if let Some(tx) = &self.event_tx {
            // A dropped receiver only means nobody is watching
            let _ = tx.send(event.clone()).await;
        }
        events.push(event);
    }

    /// Run every task in order and return the collected output.
    pub async fn kickoff(&self, inputs: Inputs) -> Result<CrewOutput, CrewError> {
        self.validate()?;

        let agents = self
            .agents
            .iter()
            .map(|a| a.interpolated(&inputs))
            .collect::<Result<Vec<_>, _>>()?;
        let tasks = self
            .tasks
            .iter()
            .map(|t| t.interpolated(&inputs))
            .collect::<Result<Vec<_>, _>>()?;

        let mut events = Vec::new();
        self.emit(
            &mut events,
            CrewEvent::new(CrewEventKind::CrewStarted, "")
                .with_data(serde_json::json!({ "inputs": inputs, "tasks": tasks.len() })),
        )
        .await;

        let mut pipeline = Pipeline::new(tasks.len());
        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(tasks.len());
        let mut by_name: HashMap<String, usize> = HashMap::new();

        while let Some(index) = pipeline.current() {
            let task = &tasks[index];
            // validate() guarantees the agent exists
            let agent = agents
                .iter()
                .find(|a| Some(a.name.as_str()) == task.agent())
                .ok_or_else(|| CrewError::UnassignedTask {
                    task: task.name.clone(),
                })?;

            let context = match &task.config.context {
                Some(names) => aggregate_context(
                    names
                        .iter()
                        .filter_map(|name| by_name.get(name))
                        .map(|&i| &outputs[i]),
                ),
                None => aggregate_context(&outputs),
            };

            if self.verbose || agent.verbose {
                tracing::info!(
                    task = %task.name,
                    agent = %agent.role(),
                    step = index + 1,
                    of = tasks.len(),
                    "Task started"
                );
            }
            self.emit(
                &mut events,
                CrewEvent::new(CrewEventKind::TaskStarted, agent.role()).with_task(&task.name),
            )
            .await;

            let context = Some(context.as_str()).filter(|c| !c.is_empty());
            let raw = match self.executor.execute(agent, task, context).await {
                Ok(raw) => raw,
                Err(source) => {
                    pipeline.fail();
                    tracing::warn!(task = %task.name, error = %source, "Task failed");
                    self.emit(
                        &mut events,
                        CrewEvent::new(CrewEventKind::TaskFailed, agent.role())
                            .with_task(&task.name)
                            .with_data(serde_json::json!({ "error": source.to_string() })),
                    )
                    .await;
                    self.emit(&mut events, CrewEvent::new(CrewEventKind::CrewFailed, ""))
                        .await;
                    return Err(CrewError::Execution {
                        task: task.name.clone(),
                        source,
                    });
                }
            };

            if let Some(file) = &task.output_file {
                let path = self.output_dir.join(file);
                if let Err(source) = write_output(&path, &raw).await {
                    pipeline.fail();
                    self.emit(&mut events, CrewEvent::new(CrewEventKind::CrewFailed, ""))
                        .await;
                    return Err(CrewError::Output { path, source });
                }
                tracing::info!(task = %task.name, path = %path.display(), "Output written");
            }

            if self.verbose || agent.verbose {
                tracing::info!(task = %task.name, agent = %agent.role(), "Task completed");
            }
            self.emit(
                &mut events,
                CrewEvent::new(CrewEventKind::TaskCompleted, agent.role())
                    .with_task(&task.name)
                    .with_data(serde_json::json!({ "chars": raw.len() })),
            )
            .await;

            by_name.insert(task.name.clone(), outputs.len());
            outputs.push(TaskOutput {
                name: task.name.clone(),
                agent: agent.role().to_string(),
                description: task.config.description.clone(),
                raw,
            });
            pipeline.advance();
        }

        self.emit(&mut events, CrewEvent::new(CrewEventKind::CrewCompleted, ""))
            .await;

        Ok(CrewOutput {
            raw: outputs.last().map(|o| o.raw.clone()).unwrap_or_default(),
            tasks_output: outputs,
            events,
        })
    }
}

#[async_trait]
impl Kickoff for Crew {
    async fn kickoff(&self, inputs: Inputs) -> Result<CrewOutput, CrewError> {
        Crew::kickoff(self, inputs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AgentConfig, TaskConfig};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Records every call and answers with "<task name> done"
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, String, Option<String>)>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl TaskExecutor for Recorder {
        async fn execute(
            &self,
            agent: &Agent,
            task: &Task,
            context: Option<&str>,
        ) -> anyhow::Result<String> {
            self.calls.lock().unwrap().push((
                agent.role().to_string(),
                task.config.description.clone(),
                context.map(str::to_string),
            ));
            if self.fail_on.as_deref() == Some(task.name.as_str()) {
                anyhow::bail!("model refused");
            }
            Ok(format!("{} done", task.name))
        }
    }

    fn agent(name: &str, role: &str) -> Agent {
        Agent::new(
            name,
            AgentConfig {
                role: role.to_string(),
                goal: "Audit {topic}".to_string(),
                backstory: "Careful.".to_string(),
                llm: None,
                verbose: None,
                extra: BTreeMap::new(),
            },
            None,
        )
    }

    fn task(name: &str, agent: &str, context: Option<Vec<&str>>) -> Task {
        Task::new(
            name,
            TaskConfig {
                description: format!("{} for {{topic}}", name),
                expected_output: "Notes".to_string(),
                agent: Some(agent.to_string()),
                context: context.map(|c| c.into_iter().map(str::to_string).collect()),
                output_file: None,
                extra: BTreeMap::new(),
            },
        )
    }

    fn inputs() -> Inputs {
        Inputs::from([("topic".to_string(), "orders".to_string())])
    }

    fn crew(tasks: Vec<Task>, executor: Arc<Recorder>) -> Crew {
        Crew::new(
            vec![agent("reader", "Reader"), agent("hunter", "Hunter")],
            tasks,
            Process::Sequential,
            executor,
        )
    }

    #[tokio::test]
    async fn test_sequential_context_handoff() {
        let recorder = Arc::new(Recorder::default());
        let crew = crew(
            vec![
                task("ingest", "reader", None),
                task("detect", "hunter", None),
                task("validate", "hunter", None),
            ],
            recorder.clone(),
        );

        let output = crew.kickoff(inputs()).await.unwrap();
        assert_eq!(output.raw, "validate done");
        assert_eq!(output.tasks_output.len(), 3);
        assert_eq!(output.tasks_output[0].description, "ingest for orders");

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls[0], ("Reader".into(), "ingest for orders".into(), None));
        assert_eq!(calls[1].2.as_deref(), Some("ingest done"));
        assert_eq!(
            calls[2].2,
            Some(format!("ingest done{}detect done", super::super::prompts::CONTEXT_SEPARATOR))
        );
    }

    #[tokio::test]
    async fn test_explicit_context_list() {
        let recorder = Arc::new(Recorder::default());
        let crew = crew(
            vec![
                task("ingest", "reader", None),
                task("detect", "hunter", Some(vec![])),
                task("validate", "hunter", Some(vec!["detect"])),
            ],
            recorder.clone(),
        );

        crew.kickoff(inputs()).await.unwrap();
        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls[1].2, None);
        assert_eq!(calls[2].2.as_deref(), Some("detect done"));
    }

    #[tokio::test]
    async fn test_events_in_order() {
        let (tx, mut rx) = mpsc::channel(16);
        let crew = crew(
            vec![task("ingest", "reader", None)],
            Arc::new(Recorder::default()),
        )
        .with_event_channel(tx);

        let output = crew.kickoff(inputs()).await.unwrap();
        let kinds: Vec<_> = output.events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CrewEventKind::CrewStarted,
                CrewEventKind::TaskStarted,
                CrewEventKind::TaskCompleted,
                CrewEventKind::CrewCompleted,
            ]
        );
        assert_eq!(rx.recv().await.unwrap().kind, CrewEventKind::CrewStarted);
    }

    #[tokio::test]
    async fn test_folded_role_is_reported_without_newline() {
        let recorder = Arc::new(Recorder::default());
        let crew = Crew::new(
            vec![agent("reader", "Code Reader\n")],
            vec![task("ingest", "reader", None)],
            Process::Sequential,
            recorder.clone(),
        );

        let output = crew.kickoff(inputs()).await.unwrap();
        assert_eq!(output.tasks_output[0].agent, "Code Reader");
        let started = output
            .events
            .iter()
            .find(|e| e.kind == CrewEventKind::TaskStarted)
            .unwrap();
        assert_eq!(started.agent, "Code Reader");
        assert_eq!(recorder.calls.lock().unwrap()[0].0, "Code Reader");
    }

    #[tokio::test]
    async fn test_failure_stops_the_run() {
        let recorder = Arc::new(Recorder {
            fail_on: Some("detect".to_string()),
            ..Recorder::default()
        });
        let crew = crew(
            vec![
                task("ingest", "reader", None),
                task("detect", "hunter", None),
                task("validate", "hunter", None),
            ],
            recorder.clone(),
        );

        let err = crew.kickoff(inputs()).await.unwrap_err();
        assert!(matches!(&err, CrewError::Execution { task, .. } if task == "detect"));
        assert!(err.to_string().contains("model refused"));
        assert_eq!(recorder.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_output_file_written() {
        let dir = tempfile::tempdir().unwrap();
        let crew = crew(
            vec![
                task("ingest", "reader", None),
                task("validate", "hunter", None).with_output_file("out/report.md"),
            ],
            Arc::new(Recorder::default()),
        )
        .with_output_dir(dir.path());

        crew.kickoff(inputs()).await.unwrap();
        let written = std::fs::read_to_string(dir.path().join("out/report.md")).unwrap();
        assert_eq!(written, "validate done");
    }

    #[test]
    fn test_validate_rejects_bad_wiring() {
        let recorder = Arc::new(Recorder::default());
        let unknown = crew(vec![task("ingest", "ghost", None)], recorder.clone());
        assert!(matches!(
            unknown.validate(),
            Err(CrewError::UnknownAgent { agent, .. }) if agent == "ghost"
        ));

        let forward = crew(
            vec![
                task("ingest", "reader", Some(vec!["detect"])),
                task("detect", "hunter", None),
            ],
            recorder.clone(),
        );
        assert!(matches!(
            forward.validate(),
            Err(CrewError::InvalidContext { context, .. }) if context == "detect"
        ));

        let empty = crew(vec![], recorder);
        assert!(matches!(empty.validate(), Err(CrewError::EmptyCrew)));
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_any_task() {
        let recorder = Arc::new(Recorder::default());
        let crew = crew(vec![task("ingest", "reader", None)], recorder.clone());

        let err = crew.kickoff(Inputs::new()).await.unwrap_err();
        assert!(matches!(err, CrewError::MissingInput { ref key, .. } if key == "topic"));
        assert!(recorder.calls.lock().unwrap().is_empty());
    }
}
