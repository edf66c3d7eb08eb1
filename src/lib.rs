//! # support-router
//!
//! Customer-support message router.
//!
//! A message is classified into one of four support domains (order,
//! delivery, payment, account), answered by exactly one domain expert and
//! rewritten by a synthesizer into the reply the customer sees. Every step is
//! a call to an OpenAI-compatible text-generation API.
//!
//! ## Surfaces
//!
//! - [`agent::Orchestrator`]: the workflow, usable as a library
//! - `server` feature: `POST /chat` HTTP endpoint (axum)
//! - [`cli`]: `serve`, `chat`, `ask` and `init-prompts` commands
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use support_router::agent::{AgentConfig, Orchestrator, create_provider};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentConfig::from_env()?;
//! let provider = create_provider(&config)?;
//! let orchestrator = Orchestrator::new(provider, &config);
//! let reply = orchestrator.run("Where is my package, order #12345?").await?;
//! # let _ = reply;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod error;
pub mod logging;
#[cfg(feature = "server")]
pub mod server;

pub use agent::{Label, Orchestrator, RunResult};
pub use error::{AgentError, CommandError, Error, Result, WorkflowError};
