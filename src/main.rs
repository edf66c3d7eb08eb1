//! support-router binary entry point.

use clap::Parser;

use support_router::cli::{Cli, Commands, execute};
use support_router::logging::{LogFormat, LoggingConfig, init_logging};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_format: LogFormat = cli.log_format.parse()?;
    let logging = match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve { .. } => LoggingConfig::for_server(cli.verbose, log_format),
        _ => LoggingConfig::for_cli(cli.verbose, log_format),
    };
    init_logging(&logging);

    let output = execute(&cli)?;
    if !output.is_empty() {
        #[allow(clippy::print_stdout)]
        {
            println!("{}", output.trim_end());
        }
    }

    Ok(())
}
