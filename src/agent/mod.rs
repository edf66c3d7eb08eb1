//! Agentic support workflow.
//!
//! Routes a customer message through three LLM-backed roles behind a
//! pluggable provider abstraction backed by OpenAI-compatible APIs
//! (Groq by default).
//!
//! # Architecture
//!
//! ```text
//! Customer message → Orchestrator
//!   ├── ClassifierAgent (picks one Label, falls back to the default label)
//!   ├── ExpertPanel → exactly one ExpertAgent for that Label
//!   └── SynthesizerAgent → final customer-facing reply
//! ```

pub mod classifier;
pub mod client;
pub mod config;
pub mod expert;
pub mod label;
pub mod message;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod synthesizer;
pub mod traits;

// Re-export key types
pub use classifier::{Classification, ClassifierAgent};
pub use client::create_provider;
pub use config::AgentConfig;
pub use expert::{ExpertAgent, ExpertPanel};
pub use label::Label;
pub use message::{ChatRequest, ChatResponse, TokenUsage};
pub use orchestrator::{Orchestrator, RunResult, Stage, Step, WorkflowState};
pub use prompt::PromptSet;
pub use provider::LlmProvider;
pub use synthesizer::SynthesizerAgent;
pub use traits::{Agent, AgentResponse};
