//! Synthesizer agent for customer-facing replies.
//!
//! Takes the customer's question and the expert's raw answer and rewrites
//! them into a short, empathetic reply that does not reveal the expert pass.

use std::time::Duration;

use async_trait::async_trait;

use super::config::AgentConfig;
use super::prompt::build_synthesizer_prompt;
use super::provider::LlmProvider;
use super::traits::{Agent, AgentResponse};
use crate::error::AgentError;

/// Agent that turns an expert answer into the final reply.
pub struct SynthesizerAgent {
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    template: String,
}

impl SynthesizerAgent {
    /// Creates a new synthesizer agent with the given configuration and prompt template.
    #[must_use]
    pub fn new(config: &AgentConfig, template: String) -> Self {
        Self {
            model: config.synthesizer_model.clone(),
            max_tokens: config.synthesizer_max_tokens,
            temperature: config.temperature,
            timeout: config.timeout,
            template,
        }
    }

    /// Rewrites `expert_answer` into the reply to `query`.
    ///
    /// # Errors
    ///
    /// Propagates provider failures and timeouts, and returns
    /// [`AgentError::EmptyResponse`] when the model produced no text.
    pub async fn synthesize(
        &self,
        provider: &dyn LlmProvider,
        query: &str,
        expert_answer: &str,
    ) -> Result<AgentResponse, AgentError> {
        let prompt = build_synthesizer_prompt(&self.template, query, expert_answer);
        self.execute(provider, &prompt)
            .await?
            .require_content(self.name())
    }
}

#[async_trait]
impl Agent for SynthesizerAgent {
    fn name(&self) -> &'static str {
        "synthesizer"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
