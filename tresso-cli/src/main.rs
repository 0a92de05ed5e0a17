//! Tresso CLI
//!
//! Commands:
//! - `tresso board create|list|show|rename|delete`
//! - `tresso column add|rename|move|delete`
//! - `tresso card add|move|title|content|delete`
//! - `tresso label add|delete|attach|detach`
//! - `tresso activity`
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tresso_cli::logging::configure_logging;
use tresso_cli::{App, Cli, CliError};
use tresso_config::{load_configuration, TressoConfig};

async fn run(cli: Cli, config: &TressoConfig) -> Result<String, CliError> {
    let app = App::open(config, cli.database, cli.format)?;
    app.run(cli.command).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    configure_logging(cli.verbose, cli.debug, cli.quiet, &config.log.level);

    let exit_code = match run(cli, &config).await {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e.display_message());
            1
        }
    };
    std::process::exit(exit_code);
}
