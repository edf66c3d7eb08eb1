//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use std::fmt::Write as FmtWrite;
use std::io::{self, BufRead, Write as IoWrite};
use std::path::Path;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::agent::client::create_provider;
use crate::agent::config::AgentConfig;
use crate::agent::orchestrator::{Orchestrator, RunResult};
use crate::agent::prompt::PromptSet;
use crate::cli::output::OutputFormat;
use crate::cli::parser::{Cli, Commands};
use crate::error::{CommandError, Result};

/// Words that end an interactive chat session.
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the command fails.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        #[cfg(feature = "server")]
        Commands::Serve {
            host,
            port,
            static_dir,
        } => cmd_serve(cli, host, *port, static_dir.as_deref()),
        Commands::Chat => cmd_chat(cli),
        Commands::Ask { message } => cmd_ask(cli, message, format),
        Commands::InitPrompts { dir } => cmd_init_prompts(dir.as_deref(), format),
    }
}

/// Builds agent configuration from CLI overrides, then the environment.
///
/// # Errors
///
/// Returns an error when the API key is missing or a value is invalid.
pub fn agent_config(cli: &Cli) -> Result<AgentConfig> {
    let mut builder = AgentConfig::builder();
    if let Some(model) = cli.model.as_deref() {
        builder = builder.model(model);
    }
    if let Some(secs) = cli.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(dir) = cli.prompt_dir.as_deref() {
        builder = builder.prompt_dir(dir);
    }
    Ok(builder.from_env().build()?)
}

fn build_orchestrator(cli: &Cli) -> Result<Orchestrator> {
    let config = agent_config(cli)?;
    let provider = create_provider(&config)?;
    tracing::debug!(
        provider = provider.name(),
        model = %config.expert_model,
        timeout_secs = config.timeout.as_secs(),
        default_label = %config.default_label,
        "orchestrator configured"
    );
    Ok(Orchestrator::new(provider, &config))
}

fn runtime() -> Result<Runtime> {
    Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}")).into()
    })
}

fn cmd_ask(cli: &Cli, message: &str, format: OutputFormat) -> Result<String> {
    let orchestrator = build_orchestrator(cli)?;
    let rt = runtime()?;
    let result = rt.block_on(orchestrator.run_detailed(message))?;
    Ok(format_run_result(&result, format, cli.verbose))
}

fn format_run_result(result: &RunResult, format: OutputFormat, verbose: bool) -> String {
    match format {
        OutputFormat::Json => format.to_json(result),
        OutputFormat::Text => {
            let mut output = result.response.clone();
            if verbose {
                let fallback_hint = if result.fallback { " (fallback)" } else { "" };
                let _ = write!(
                    output,
                    "\n\n---\nLabel: {}{fallback_hint} | Tokens: {} | Time: {:.1}s",
                    result.label,
                    result.total_tokens,
                    Duration::from_millis(result.elapsed_ms).as_secs_f64()
                );
            }
            output
        }
    }
}

fn cmd_chat(cli: &Cli) -> Result<String> {
    let orchestrator = build_orchestrator(cli)?;
    let rt = runtime()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    chat_loop(&orchestrator, &rt, stdin.lock(), stdout.lock())?;
    Ok(String::new())
}

/// Runs the interactive chat session over `input` and `output`.
///
/// Prints `You: ` before each read and `Bot: <answer>` after each run. Blank
/// lines are skipped, `exit`/`quit` (any case) or end of input stop the loop,
/// and a failed run is reported without ending the session.
///
/// Returns the number of messages answered.
///
/// # Errors
///
/// Returns an error only when reading input or writing output fails.
pub fn chat_loop<R: BufRead, W: IoWrite>(
    orchestrator: &Orchestrator,
    rt: &Runtime,
    mut input: R,
    mut output: W,
) -> io::Result<usize> {
    writeln!(output, "Support chat. Type 'exit' or 'quit' to leave.")?;
    let mut answered = 0;
    let mut line = String::new();

    loop {
        write!(output, "You: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if EXIT_WORDS.iter().any(|w| message.eq_ignore_ascii_case(w)) {
            break;
        }

        match rt.block_on(orchestrator.run(message)) {
            Ok(answer) => {
                writeln!(output, "Bot: {answer}\n")?;
                answered += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "chat turn failed");
                writeln!(output, "Error: {e}\n")?;
            }
        }
    }

    writeln!(output, "Goodbye!")?;
    Ok(answered)
}

/// Starts the HTTP chat endpoint and blocks until shutdown.
#[cfg(feature = "server")]
fn cmd_serve(cli: &Cli, host: &str, port: u16, static_dir: Option<&Path>) -> Result<String> {
    use crate::server::{AppState, ServerConfig, serve};
    use tokio_util::sync::CancellationToken;

    let orchestrator = build_orchestrator(cli)?;
    let config = ServerConfig {
        host: host.to_string(),
        port,
        static_dir: static_dir.map(Path::to_path_buf),
    };

    let rt = runtime()?;
    rt.block_on(serve(
        &config,
        AppState::new(orchestrator),
        CancellationToken::new(),
    ))
    .map_err(|e| CommandError::ExecutionFailed(format!("HTTP server error: {e}")))?;

    Ok(String::new())
}

fn cmd_init_prompts(dir: Option<&Path>, format: OutputFormat) -> Result<String> {
    let target_dir = dir
        .map(Path::to_path_buf)
        .or_else(PromptSet::default_dir)
        .ok_or_else(|| {
            CommandError::ExecutionFailed(
                "Could not determine home directory for default prompt path".to_string(),
            )
        })?;

    let written = PromptSet::write_defaults(&target_dir).map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to write prompt templates: {e}"))
    })?;

    match format {
        OutputFormat::Text => {
            if written.is_empty() {
                return Ok(format!(
                    "All prompt templates already exist in: {}\n",
                    target_dir.display()
                ));
            }
            let mut output = format!(
                "Wrote {} prompt template(s) to: {}\n",
                written.len(),
                target_dir.display()
            );
            for path in &written {
                let _ = writeln!(
                    output,
                    "  {}",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown")
                );
            }
            output.push_str("\nEdit these files to customize the agent prompts.\n");
            Ok(output)
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "directory": target_dir.to_string_lossy(),
                "written": written.iter().map(|p| p.to_string_lossy().into_owned()).collect::<Vec<_>>(),
                "count": written.len()
            });
            Ok(format.to_json(&json))
        }
    }
}
