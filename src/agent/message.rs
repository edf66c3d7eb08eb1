//! Provider-agnostic request and response types for LLM communication.
//!
//! These types decouple agent logic from any specific LLM SDK, so the same
//! agents run against Groq, `OpenAI` or a scripted test provider.

use serde::{Deserialize, Serialize};

/// A single-prompt completion request (provider-agnostic).
///
/// Every agent sends its rendered template as one user turn; there is no
/// conversation history.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier (e.g., "llama-3.1-8b-instant").
    pub model: String,
    /// Rendered prompt, sent as the user turn.
    pub prompt: String,
    /// Sampling temperature (0.0–2.0).
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
}

/// Token usage statistics from a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens generated in the completion.
    pub completion_tokens: u32,
    /// Total tokens used.
    pub total_tokens: u32,
}

/// A chat completion response (provider-agnostic).
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Generated text content.
    pub content: String,
    /// Token usage statistics.
    pub usage: TokenUsage,
    /// Finish reason from the model (e.g., `"stop"`, `"length"`).
    pub finish_reason: Option<String>,
}
