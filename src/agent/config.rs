//! Agent configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.

use std::path::PathBuf;
use std::time::Duration;

use super::label::Label;
use crate::error::AgentError;

/// Default provider name.
const DEFAULT_PROVIDER: &str = "groq";
/// Base URL of Groq's `OpenAI`-compatible API.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Default model for every agent.
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Default classifier max tokens. The answer is a single word.
const DEFAULT_CLASSIFIER_MAX_TOKENS: u32 = 16;
/// Default expert max tokens.
const DEFAULT_EXPERT_MAX_TOKENS: u32 = 1024;
/// Default synthesizer max tokens.
const DEFAULT_SYNTHESIZER_MAX_TOKENS: u32 = 1024;
/// Default per-call timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the agent system.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// LLM provider name (`"groq"` or `"openai"`).
    pub provider: String,
    /// API key for the provider.
    pub api_key: String,
    /// Optional base URL override (for proxies or compatible APIs).
    pub base_url: Option<String>,
    /// Model for the classifier agent.
    pub classifier_model: String,
    /// Model for the expert agents.
    pub expert_model: String,
    /// Model for the synthesizer agent.
    pub synthesizer_model: String,
    /// Sampling temperature shared by all agents.
    pub temperature: f32,
    /// Maximum tokens for classifier responses.
    pub classifier_max_tokens: u32,
    /// Maximum tokens for expert responses.
    pub expert_max_tokens: u32,
    /// Maximum tokens for synthesizer responses.
    pub synthesizer_max_tokens: u32,
    /// Upper bound for a single provider call.
    pub timeout: Duration,
    /// Label used when the classifier answers outside the label set.
    pub default_label: Label,
    /// Directory containing prompt template files.
    ///
    /// When set, prompts are loaded from markdown files in this directory,
    /// falling back to compiled-in defaults for any missing files.
    pub prompt_dir: Option<PathBuf>,
}

impl AgentConfig {
    /// Creates a new builder for `AgentConfig`.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key is found.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::builder().from_env().build()
    }

    /// Base URL the provider client should talk to.
    ///
    /// An explicit override wins; otherwise `groq` maps to Groq's endpoint and
    /// `openai` keeps the SDK default.
    pub fn resolved_base_url(&self) -> Option<&str> {
        self.base_url.as_deref().or(match self.provider.as_str() {
            "groq" => Some(GROQ_BASE_URL),
            _ => None,
        })
    }
}

/// Builder for [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfigBuilder {
    provider: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    classifier_model: Option<String>,
    expert_model: Option<String>,
    synthesizer_model: Option<String>,
    temperature: Option<f32>,
    classifier_max_tokens: Option<u32>,
    expert_max_tokens: Option<u32>,
    synthesizer_max_tokens: Option<u32>,
    timeout: Option<Duration>,
    default_label: Option<String>,
    prompt_dir: Option<PathBuf>,
}

impl AgentConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(self) -> Self {
        self.from_lookup(|key| std::env::var(key).ok())
    }

    /// Populates unset fields from `lookup`, which maps a variable name to
    /// its value.
    ///
    /// API keys resolve `GROQ_API_KEY`, then `OPENAI_API_KEY`, then
    /// `SUPPORT_ROUTER_API_KEY`. Unparseable numbers are ignored and the
    /// default applies.
    #[must_use]
    pub fn from_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(*key));

        if self.provider.is_none() {
            self.provider = lookup("SUPPORT_ROUTER_PROVIDER");
        }
        if self.api_key.is_none() {
            self.api_key = first(&["GROQ_API_KEY", "OPENAI_API_KEY", "SUPPORT_ROUTER_API_KEY"]);
        }
        if self.base_url.is_none() {
            self.base_url = first(&["SUPPORT_ROUTER_BASE_URL", "OPENAI_BASE_URL"]);
        }
        if self.model.is_none() {
            self.model = lookup("SUPPORT_ROUTER_MODEL");
        }
        if self.classifier_model.is_none() {
            self.classifier_model = lookup("SUPPORT_ROUTER_CLASSIFIER_MODEL");
        }
        if self.expert_model.is_none() {
            self.expert_model = lookup("SUPPORT_ROUTER_EXPERT_MODEL");
        }
        if self.synthesizer_model.is_none() {
            self.synthesizer_model = lookup("SUPPORT_ROUTER_SYNTHESIZER_MODEL");
        }
        if self.temperature.is_none() {
            self.temperature =
                lookup("SUPPORT_ROUTER_TEMPERATURE").and_then(|v| v.trim().parse().ok());
        }
        if self.timeout.is_none() {
            self.timeout = lookup("SUPPORT_ROUTER_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs);
        }
        if self.default_label.is_none() {
            self.default_label = lookup("SUPPORT_ROUTER_DEFAULT_LABEL");
        }
        if self.prompt_dir.is_none() {
            self.prompt_dir = lookup("SUPPORT_ROUTER_PROMPT_DIR").map(PathBuf::from);
        }
        self
    }

    /// Sets the LLM provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model used by every agent without a per-role override.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the classifier model.
    #[must_use]
    pub fn classifier_model(mut self, model: impl Into<String>) -> Self {
        self.classifier_model = Some(model.into());
        self
    }

    /// Sets the expert model.
    #[must_use]
    pub fn expert_model(mut self, model: impl Into<String>) -> Self {
        self.expert_model = Some(model.into());
        self
    }

    /// Sets the synthesizer model.
    #[must_use]
    pub fn synthesizer_model(mut self, model: impl Into<String>) -> Self {
        self.synthesizer_model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    /// Sets the expert max tokens.
    #[must_use]
    pub const fn expert_max_tokens(mut self, n: u32) -> Self {
        self.expert_max_tokens = Some(n);
        self
    }

    /// Sets the synthesizer max tokens.
    #[must_use]
    pub const fn synthesizer_max_tokens(mut self, n: u32) -> Self {
        self.synthesizer_max_tokens = Some(n);
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the fallback label by name.
    #[must_use]
    pub fn default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = Some(label.into());
        self
    }

    /// Sets the prompt template directory.
    #[must_use]
    pub fn prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = Some(dir.into());
        self
    }

    /// Builds the [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ApiKeyMissing`] if no API key was set, or
    /// [`AgentError::Config`] for an unknown default label or a zero timeout.
    pub fn build(self) -> Result<AgentConfig, AgentError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(AgentError::ApiKeyMissing)?;

        let default_label = match self.default_label.as_deref() {
            Some(name) => name.parse::<Label>()?,
            None => Label::Order,
        };

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        if timeout.is_zero() {
            return Err(AgentError::Config {
                message: "timeout must be greater than zero".to_string(),
            });
        }

        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(AgentConfig {
            provider: self
                .provider
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            api_key,
            base_url: self.base_url,
            classifier_model: self.classifier_model.unwrap_or_else(|| model.clone()),
            expert_model: self.expert_model.unwrap_or_else(|| model.clone()),
            synthesizer_model: self.synthesizer_model.unwrap_or(model),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            classifier_max_tokens: self
                .classifier_max_tokens
                .unwrap_or(DEFAULT_CLASSIFIER_MAX_TOKENS),
            expert_max_tokens: self.expert_max_tokens.unwrap_or(DEFAULT_EXPERT_MAX_TOKENS),
            synthesizer_max_tokens: self
                .synthesizer_max_tokens
                .unwrap_or(DEFAULT_SYNTHESIZER_MAX_TOKENS),
            timeout,
            default_label,
            prompt_dir: self.prompt_dir,
        })
    }
}
