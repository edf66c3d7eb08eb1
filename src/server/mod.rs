//! HTTP chat endpoint.
//!
//! Exposes the workflow as `POST /chat` plus a `GET /health` liveness check.
//! Each request runs one independent workflow against the shared
//! [`Orchestrator`](crate::agent::Orchestrator).

mod error;
mod routes;
mod transport;

pub use error::ApiError;
pub use routes::{AppState, ChatBody, ChatReply, router};
pub use transport::{ServerConfig, serve};
