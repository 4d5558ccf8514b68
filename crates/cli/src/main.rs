//! AuditCrew CLI
//!
//! Runs the three-agent static analysis crew from the command line. With no
//! arguments it audits with the built-in topic using `config/agents.yaml` and
//! `config/tasks.yaml`, and writes `report.md` to the current directory.

use anyhow::Context;
use auditcrew_core::config::CrewSettings;
use auditcrew_core::crew::Inputs;
use auditcrew_core::io::write_default_config;
use auditcrew_core::models::{LlmProvider, ModelConfig};
use auditcrew_core::run::{default_inputs, run_audit};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Clone)]
#[command(
    author,
    version,
    about = "AuditCrew - Static analysis agent crew",
    args_conflicts_with_subcommands = true
)]
struct Args {
    #[command(subcommand)]
    command: Option<CliCommand>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Clone)]
enum CliCommand {
    /// Run the crew (default)
    Run(RunArgs),
    /// Write the default agents.yaml and tasks.yaml
    Init {
        /// Directory to write the configuration into
        #[arg(long, default_value = "config")]
        config_dir: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

#[derive(ClapArgs, Clone, Debug)]
struct RunArgs {
    /// Directory holding agents.yaml and tasks.yaml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,
    /// Directory task output files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Audit topic, replaces the built-in one
    #[arg(long)]
    topic: Option<String>,
    /// LLM provider (anthropic, openai, gemini, openrouter, grok, deepseek)
    #[arg(long)]
    provider: Option<LlmProvider>,
    /// Model name; defaults to the provider's default model
    #[arg(long)]
    model: Option<String>,
    /// Base URL for OpenAI-compatible endpoints
    #[arg(long)]
    base_url: Option<String>,
}

impl RunArgs {
    fn settings(&self) -> CrewSettings {
        let provider = self.provider.unwrap_or_default();
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());
        let mut config = ModelConfig::with_provider(provider, model);
        if let Some(url) = &self.base_url {
            if !provider.supports_base_url() {
                tracing::warn!(%provider, "--base-url is only used by the openai provider");
            }
            config = config.with_base_url(url);
        }

        CrewSettings {
            config_dir: self.config_dir.clone(),
            output_dir: self.output_dir.clone(),
            model: config,
        }
    }

    fn inputs(&self) -> Inputs {
        let mut inputs = default_inputs();
        if let Some(topic) = &self.topic {
            inputs.insert("topic".to_string(), topic.clone());
        }
        inputs
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Invalid RUST_LOG filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // API keys usually live in .env next to the config directory
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let args = Args::parse();

    match args.command.unwrap_or(CliCommand::Run(args.run)) {
        CliCommand::Init { config_dir, force } => {
            let written = write_default_config(&config_dir, force).await?;
            if written.is_empty() {
                println!("Configuration already present in {}", config_dir.display());
                println!("   Use --force to overwrite it");
            } else {
                for path in written {
                    println!("   Created: {}", path.display());
                }
            }
        }
        CliCommand::Run(run) => {
            let settings = run.settings();
            tracing::info!(
                provider = %settings.model.provider,
                model = %settings.model.model,
                config_dir = %settings.config_dir.display(),
                "Starting crew"
            );

            let output = run_audit(settings, run.inputs()).await?;

            println!("Crew completed: {} tasks", output.tasks_output.len());
            for task in &output.tasks_output {
                println!("   {} ({})", task.name, task.agent);
            }
        }
    }

    Ok(())
}
