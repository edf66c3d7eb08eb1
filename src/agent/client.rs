//! Provider registry and factory.
//!
//! Maps provider names to concrete [`LlmProvider`] implementations.

use std::sync::Arc;

use crate::agent::config::AgentConfig;
use crate::agent::provider::LlmProvider;
use crate::agent::providers::OpenAiProvider;
use crate::error::AgentError;

/// Creates an [`LlmProvider`] based on the configured provider name.
///
/// The returned handle is created once per process and shared by every
/// workflow run.
///
/// # Supported Providers
///
/// - `"groq"` (default): Groq's `OpenAI`-compatible endpoint via `async-openai`
/// - `"openai"`: `OpenAI`-compatible APIs via `async-openai`
///
/// # Errors
///
/// Returns [`AgentError::UnsupportedProvider`] for unknown provider names.
pub fn create_provider(config: &AgentConfig) -> Result<Arc<dyn LlmProvider>, AgentError> {
    match config.provider.as_str() {
        "groq" => Ok(Arc::new(OpenAiProvider::new(config, "groq"))),
        "openai" => Ok(Arc::new(OpenAiProvider::new(config, "openai"))),
        other => Err(AgentError::UnsupportedProvider {
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(provider: &str) -> AgentConfig {
        AgentConfig::builder()
            .api_key("test")
            .provider(provider)
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_create_known_providers() {
        for name in ["groq", "openai"] {
            let provider = create_provider(&config_for(name));
            assert_eq!(provider.map(|p| p.name()).ok(), Some(name));
        }
    }

    #[test]
    fn test_create_unknown_provider() {
        let result = create_provider(&config_for("unknown"));
        assert!(matches!(
            result,
            Err(AgentError::UnsupportedProvider { ref name }) if name == "unknown"
        ));
    }
}
