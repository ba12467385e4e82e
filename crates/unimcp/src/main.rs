mod cli;
mod error;
mod mcp;
mod tools;

use std::sync::Arc;

use clap::Parser;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use unimcp_core::Controller;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::mcp::UnifiServer;
use crate::tools::Tools;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Before tracing so RUST_LOG from the dotenv file applies.
    let dotenv = dotenvy::from_path(&cli.env_file);

    init_tracing(cli.verbose);

    match dotenv {
        Ok(()) => tracing::debug!(path = %cli.env_file.display(), "loaded dotenv file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(path = %cli.env_file.display(), error = %e, "ignoring dotenv file"),
    }

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs always go to stderr; stdout carries protocol frames only.
fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Tools => {
            let catalogue = serde_json::to_string_pretty(&UnifiServer::catalogue())
                .map_err(|e| CliError::Render(e.to_string()))?;
            println!("{catalogue}");
            Ok(())
        }

        Command::Config => {
            let settings = unimcp_config::load(cli.config.as_deref())?;
            print!("{}", settings.to_toml()?);
            Ok(())
        }

        Command::Serve => {
            let settings = unimcp_config::load(cli.config.as_deref())?;
            let missing = settings.to_controller_config().missing_fields();
            if !missing.is_empty() {
                tracing::warn!(
                    missing = %missing.join(", "),
                    "controller settings incomplete; tool calls will fail until configured"
                );
            }

            let controller = Arc::new(Controller::new(settings.to_controller_config()));
            tracing::info!(site = controller.site(), "starting MCP server");

            let server = UnifiServer::new(Tools::new(controller, settings.controller_version()))
                .serve(rmcp::transport::stdio())
                .await
                .map_err(|e| CliError::Transport(e.into()))?;
            let reason = server
                .waiting()
                .await
                .map_err(|e| CliError::Transport(e.into()))?;
            tracing::info!(?reason, "MCP session ended");
            Ok(())
        }
    }
}
