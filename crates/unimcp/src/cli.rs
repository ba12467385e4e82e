//! Command-line surface of the `unifi-mcp` binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// MCP tool server for UniFi Network controllers.
///
/// Speaks newline-delimited JSON-RPC 2.0 on stdin/stdout. Logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "unifi-mcp", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir, `unifi-mcp/config.toml`)
    #[arg(long, short = 'c', env = "UNIFI_MCP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Dotenv file loaded before configuration is read
    #[arg(long, default_value = ".env.local", global = true)]
    pub env_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Serve tools over stdio (default)
    Serve,
    /// Print the tool catalogue as JSON and exit
    Tools,
    /// Print the effective configuration as TOML (password masked)
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::parse_from(["unifi-mcp"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["unifi-mcp", "-vv", "tools"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Tools)));
    }
}
