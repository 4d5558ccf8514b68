//! # AuditCrew Models
//!
//! LLM provider selection shared by the crew runtime and the CLI.
//!
//! Agents may override the crew-wide model through the `llm` key of
//! `agents.yaml`, written either as `<provider>/<model>` or as a bare model
//! name that keeps the crew's provider.

use crate::error::CrewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported LLM providers
///
/// Each provider client reads its API key from the environment:
/// - Anthropic (Claude) - `ANTHROPIC_API_KEY`
/// - OpenAI (GPT) - `OPENAI_API_KEY`
/// - Gemini (Google) - `GEMINI_API_KEY`
/// - OpenRouter (Gateway) - `OPENROUTER_API_KEY`
/// - Grok (xAI) - `XAI_API_KEY`
/// - DeepSeek - `DEEPSEEK_API_KEY`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Anthropic,
    #[serde(rename = "openai")]
    OpenAI,
    Gemini,
    OpenRouter,
    Grok,
    DeepSeek,
}

impl LlmProvider {
    /// Get all available providers
    pub fn all() -> Vec<LlmProvider> {
        vec![
            LlmProvider::Anthropic,
            LlmProvider::OpenAI,
            LlmProvider::Gemini,
            LlmProvider::OpenRouter,
            LlmProvider::Grok,
            LlmProvider::DeepSeek,
        ]
    }

    /// Identifier used in config files and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Gemini => "gemini",
            LlmProvider::OpenRouter => "openrouter",
            LlmProvider::Grok => "grok",
            LlmProvider::DeepSeek => "deepseek",
        }
    }

    /// Model used when only the provider is chosen
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "claude-sonnet-4-20250514",
            LlmProvider::OpenAI => "gpt-4o",
            LlmProvider::Gemini => "gemini-2.0-flash",
            LlmProvider::OpenRouter => "anthropic/claude-sonnet-4",
            LlmProvider::Grok => "grok-3",
            LlmProvider::DeepSeek => "deepseek-chat",
        }
    }

    /// Whether this provider supports custom base URL
    pub fn supports_base_url(&self) -> bool {
        matches!(self, LlmProvider::OpenAI)
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for LlmProvider {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        // "xai" is what most gateways call Grok
        if wanted == "xai" {
            return Ok(LlmProvider::Grok);
        }
        LlmProvider::all()
            .into_iter()
            .find(|p| p.slug() == wanted)
            .ok_or_else(|| CrewError::UnknownProvider(s.to_string()))
    }
}

/// Configuration for LLM model selection
///
/// ## Example
/// ```rust,ignore
/// use auditcrew_core::models::{ModelConfig, LlmProvider};
///
/// let config = ModelConfig::with_provider(LlmProvider::OpenAI, "gpt-4o");
/// let agent_model = config.resolve_override("anthropic/claude-3-5-haiku-latest")?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
    /// LLM provider to use
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model name (e.g., "claude-sonnet-4-20250514", "gpt-4o")
    pub model: String,
    /// Optional base URL override for OpenAI-compatible APIs
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Anthropic,
            model: LlmProvider::Anthropic.default_model().to_string(),
            base_url: None,
        }
    }
}

impl ModelConfig {
    /// Create a new model config with default provider (Anthropic)
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            provider: LlmProvider::Anthropic,
            model: model.into(),
            base_url: None,
        }
    }

    /// Create config for a specific provider
    pub fn with_provider(provider: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            base_url: None,
        }
    }

    /// Set base URL (for OpenAI-compatible endpoints)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Resolve an agent-level `llm` value against this (crew-wide) config.
    ///
    /// `openai/gpt-4o` switches provider and model and drops the base URL
    /// unless the provider stays the same. A bare `gpt-4o` only swaps the model.
    pub fn resolve_override(&self, spec: &str) -> Result<ModelConfig, CrewError> {
        let spec = spec.trim();
        match spec.split_once('/') {
            Some((provider, model)) if !model.is_empty() => {
                let provider: LlmProvider = provider.parse()?;
                let base_url = if provider == self.provider {
                    self.base_url.clone()
                } else {
                    None
                };
                Ok(ModelConfig {
                    provider,
                    model: model.to_string(),
                    base_url,
                })
            }
            Some(_) => Err(CrewError::InvalidModel(spec.to_string())),
            None => Ok(ModelConfig {
                model: spec.to_string(),
                ..self.clone()
            }),
        }
    }
}
