//! `OpenAI` provider implementation using the `async-openai` crate.
//!
//! Supports any `OpenAI`-compatible API (`OpenAI`, Groq, Azure, local proxies)
//! via the base URL resolved by [`AgentConfig::resolved_base_url`].

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use async_trait::async_trait;

use crate::agent::config::AgentConfig;
use crate::agent::message::{ChatRequest, ChatResponse, TokenUsage};
use crate::agent::provider::LlmProvider;
use crate::error::AgentError;

/// `OpenAI`-compatible LLM provider.
///
/// Wraps the `async-openai` client for chat completions. The client holds a
/// pooled HTTP connection and is cheap to share behind an `Arc`.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    name: &'static str,
}

impl OpenAiProvider {
    /// Creates a new provider from agent configuration.
    #[must_use]
    pub fn new(config: &AgentConfig, name: &'static str) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(&config.api_key);

        if let Some(base_url) = config.resolved_base_url() {
            openai_config = openai_config.with_api_base(base_url);
        }

        Self {
            client: Client::with_config(openai_config),
            name,
        }
    }

    /// Builds an `OpenAI` chat completion request with the prompt as the only
    /// user message.
    fn build_request(request: &ChatRequest) -> CreateChatCompletionRequest {
        let message = ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(request.prompt.clone()),
            name: None,
        });

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages: vec![message],
            temperature: request.temperature,
            max_completion_tokens: request.max_tokens,
            ..Default::default()
        }
    }

    /// Maps an SDK error, keeping the provider's error code.
    ///
    /// API-level failures (bad key, quota, unknown model) carry a `code` or
    /// `type` in the error body; transport failures only have an HTTP status.
    fn map_error(err: OpenAIError) -> AgentError {
        let code = match &err {
            OpenAIError::ApiError(api) => api.code.clone().or_else(|| api.r#type.clone()),
            OpenAIError::Reqwest(e) => e.status().map(|s| s.as_u16().to_string()),
            _ => None,
        };
        AgentError::ApiRequest {
            message: err.to_string(),
            code,
        }
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("name", &self.name)
            .field("client", &"<async-openai::Client>")
            .finish()
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let openai_request = Self::build_request(request);

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(Self::map_error)?;

        let choice = response.choices.first();

        let content = choice
            .and_then(|c| c.message.content.as_ref())
            .cloned()
            .unwrap_or_default();

        let finish_reason = choice.and_then(|c| {
            c.finish_reason
                .as_ref()
                .map(|fr| format!("{fr:?}").to_lowercase())
        });

        let usage = response
            .usage
            .map_or_else(TokenUsage::default, |u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            });

        Ok(ChatResponse {
            content,
            usage,
            finish_reason,
        })
    }
}
