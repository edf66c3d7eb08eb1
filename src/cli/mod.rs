//! CLI layer for support-router.
//!
//! Provides the command-line interface using clap, with commands for serving
//! the chat endpoint, chatting on the terminal, one-shot answers and prompt
//! scaffolding.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::{chat_loop, execute};
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
