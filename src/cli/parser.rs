//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// support-router: customer-support message router.
///
/// Classifies a customer message into order, delivery, payment or account,
/// answers it with the matching domain expert and rewrites the answer into a
/// customer-facing reply.
#[derive(Parser, Debug)]
#[command(name = "support-router")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Log format on stderr (pretty, json).
    #[arg(
        long,
        default_value = "pretty",
        global = true,
        env = "SUPPORT_ROUTER_LOG_FORMAT"
    )]
    pub log_format: String,

    /// Directory containing prompt template files.
    #[arg(long, global = true, env = "SUPPORT_ROUTER_PROMPT_DIR")]
    pub prompt_dir: Option<PathBuf>,

    /// Model used for every agent unless a per-role model is configured.
    #[arg(long, global = true, env = "SUPPORT_ROUTER_MODEL")]
    pub model: Option<String>,

    /// Upper bound in seconds for each model call.
    #[arg(long, global = true, env = "SUPPORT_ROUTER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP chat endpoint.
    ///
    /// Serves `POST /chat` and `GET /health` until Ctrl-C.
    #[cfg(feature = "server")]
    #[command(after_help = r#"Examples:
  support-router serve                          # Listen on 127.0.0.1:8000
  support-router serve --host 0.0.0.0 --port 8080
  support-router serve --static-dir ./frontend  # Also serve a web UI
  curl -s localhost:8000/chat -H 'content-type: application/json' \
       -d '{"message":"Where is my package?"}'
"#)]
    Serve {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1", env = "SUPPORT_ROUTER_HOST")]
        host: String,

        /// Port to bind to.
        #[arg(long, default_value = "8000", env = "SUPPORT_ROUTER_PORT")]
        port: u16,

        /// Directory of static files served for non-API paths.
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Chat interactively on the terminal.
    ///
    /// Type a message and press Enter. `exit`, `quit` or end of input ends
    /// the session.
    Chat,

    /// Answer a single message and exit.
    #[command(after_help = r#"Examples:
  support-router ask "Where is my package, order #12345?"
  support-router --format json ask "I was charged twice" | jq .label
"#)]
    Ask {
        /// The customer message.
        message: String,
    },

    /// Write the default prompt templates for editing.
    ///
    /// Existing files are left untouched.
    #[command(after_help = r#"Examples:
  support-router init-prompts                   # ~/.config/support-router/prompts
  support-router init-prompts --dir ./prompts
"#)]
    InitPrompts {
        /// Target directory (defaults to ~/.config/support-router/prompts).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_with_globals() {
        let cli = Cli::try_parse_from([
            "support-router",
            "--format",
            "json",
            "ask",
            "refund please",
            "--timeout-secs",
            "5",
        ])
        .unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(cli.format, "json");
        assert_eq!(cli.timeout_secs, Some(5));
        assert!(matches!(cli.command, Commands::Ask { ref message } if message == "refund please"));
    }

    #[test]
    fn test_ask_requires_message() {
        assert!(Cli::try_parse_from(["support-router", "ask"]).is_err());
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["support-router", "serve"])
            .unwrap_or_else(|e| unreachable!("{e}"));
        match cli.command {
            Commands::Serve {
                host,
                port,
                static_dir,
            } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8000);
                assert!(static_dir.is_none());
            }
            other => unreachable!("unexpected command {other:?}"),
        }
    }
}
