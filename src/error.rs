//! Error types for support-router.
//!
//! [`AgentError`] covers the text-generation port and agent configuration,
//! [`WorkflowError`] covers a single routing run, and [`Error`] wraps
//! everything the CLI can report.

use std::time::Duration;

use thiserror::Error;

use crate::agent::orchestrator::{Stage, Step};

/// Result alias used by CLI commands.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for CLI commands.
#[derive(Error, Debug)]
pub enum Error {
    /// Agent configuration or provider failure.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// A routing run failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A command could not be carried out.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// I/O failure (console, prompt files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while executing a CLI command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command failed for the given reason.
    #[error("command failed: {0}")]
    ExecutionFailed(String),

    /// A command argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors from agents and the text-generation provider.
#[derive(Error, Debug)]
pub enum AgentError {
    /// No API key was found in configuration or environment.
    #[error(
        "API key not configured: set GROQ_API_KEY, OPENAI_API_KEY or SUPPORT_ROUTER_API_KEY"
    )]
    ApiKeyMissing,

    /// The configured provider name is unknown.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// Provider name as configured.
        name: String,
    },

    /// A configuration value could not be used.
    #[error("invalid configuration: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },

    /// The provider request failed (transport, auth, quota).
    #[error("API request failed: {message}")]
    ApiRequest {
        /// Provider error description.
        message: String,
        /// Provider error code (e.g. `invalid_api_key`, `rate_limit_exceeded`)
        /// or the HTTP status of a transport failure.
        code: Option<String>,
    },

    /// The provider did not answer within the configured timeout.
    #[error("{agent} call timed out after {}s", .timeout.as_secs_f64())]
    Timeout {
        /// Agent that issued the call.
        agent: &'static str,
        /// Timeout that expired.
        timeout: Duration,
    },

    /// The provider answered with no text where text is required.
    #[error("{agent} returned an empty response")]
    EmptyResponse {
        /// Agent that issued the call.
        agent: &'static str,
    },
}

/// Errors that abort a routing run.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The message was empty or whitespace only. No generation was attempted.
    #[error("Message cannot be empty.")]
    EmptyInput,

    /// Text generation failed at one of the workflow steps.
    #[error("text generation failed while {step}: {source}")]
    GenerationFailure {
        /// Step that was running.
        step: Step,
        /// Underlying provider failure.
        #[source]
        source: AgentError,
    },

    /// A [`WorkflowState`](crate::agent::orchestrator::WorkflowState)
    /// transition was attempted from the wrong stage.
    #[error("workflow step out of order: cannot enter {attempted} from {stage}")]
    OutOfOrder {
        /// Stage the run was in.
        stage: Stage,
        /// Stage that was requested.
        attempted: Stage,
    },
}

impl WorkflowError {
    /// Returns true when the caller sent bad input rather than the run failing.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}
