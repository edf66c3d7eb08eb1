//! Agent trait definition.
//!
//! The classifier, the experts and the synthesizer all implement this trait,
//! which turns a rendered prompt into generated text through an
//! [`LlmProvider`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use super::message::{ChatRequest, ChatResponse, TokenUsage};
use super::provider::LlmProvider;
use crate::error::AgentError;

/// Response from an agent execution.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// The agent's text output, trimmed.
    pub content: String,
    /// Token usage for this call.
    pub usage: TokenUsage,
    /// Why the model stopped generating (e.g. `"stop"`, `"length"`).
    pub finish_reason: Option<String>,
}

impl AgentResponse {
    /// Rejects a response with no text.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyResponse`] when the trimmed content is empty.
    pub fn require_content(self, agent: &'static str) -> Result<Self, AgentError> {
        if self.content.is_empty() {
            Err(AgentError::EmptyResponse { agent })
        } else {
            Ok(self)
        }
    }
}

/// Trait implemented by all agents in the system.
///
/// Agents encapsulate one role (classification, domain answer, synthesis)
/// with a fixed prompt template and model configuration. The orchestrator
/// renders the template and calls [`Agent::execute`].
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent name for logging and identification.
    fn name(&self) -> &'static str;

    /// Model identifier to use for this agent.
    fn model(&self) -> &str;

    /// Sampling temperature (0.0 = deterministic, higher = more creative).
    fn temperature(&self) -> f32 {
        0.0
    }

    /// Maximum tokens for the response.
    fn max_tokens(&self) -> u32 {
        1024
    }

    /// Upper bound for one provider call.
    fn timeout(&self) -> Duration;

    /// Sends the rendered prompt as a single user message and returns the
    /// trimmed generated text.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Timeout`] when the provider does not answer in
    /// time, and propagates provider failures unchanged.
    async fn execute(
        &self,
        provider: &dyn LlmProvider,
        prompt: &str,
    ) -> Result<AgentResponse, AgentError> {
        let request = ChatRequest {
            model: self.model().to_string(),
            prompt: prompt.to_string(),
            temperature: Some(self.temperature()),
            max_tokens: Some(self.max_tokens()),
        };

        let started = Instant::now();
        let response: ChatResponse = tokio::time::timeout(self.timeout(), provider.chat(&request))
            .await
            .map_err(|_| AgentError::Timeout {
                agent: self.name(),
                timeout: self.timeout(),
            })??;

        debug!(
            agent = self.name(),
            provider = provider.name(),
            model = self.model(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            total_tokens = response.usage.total_tokens,
            finish_reason = response.finish_reason.as_deref(),
            "generation complete"
        );

        Ok(AgentResponse {
            content: response.content.trim().to_string(),
            usage: response.usage,
            finish_reason: response.finish_reason,
        })
    }
}
