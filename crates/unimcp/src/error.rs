//! Process-level error types with miette diagnostics.
//!
//! Tool failures never reach here; they are reported to the MCP host as
//! tool results. These are the errors that stop the server itself.

use miette::Diagnostic;
use thiserror::Error;

use unimcp_config::ConfigError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 3;
    pub const IO: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Could not load configuration")]
    #[diagnostic(
        code(unifi_mcp::config),
        help(
            "Check the config file and UNIFI_* environment variables.\n\
             Default location: {path}"
        )
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    #[error("MCP stdio transport failed")]
    #[diagnostic(code(unifi_mcp::transport))]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(unifi_mcp::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => exit_code::CONFIG,
            Self::Transport(_) => exit_code::IO,
            Self::Render(_) => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(source: ConfigError) -> Self {
        Self::Config {
            path: unimcp_config::config_path().display().to_string(),
            source,
        }
    }
}
