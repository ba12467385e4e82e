//! Prompt-submit hook: names the terminal tab after the first prompt of a
//! session. Reads the hook payload on stdin and always exits 0; a hook must
//! never block the host.

mod hook;
mod namer;
mod terminal;

use std::io::{self, Read};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use secrecy::SecretString;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::hook::{HookInput, MarkerStore};
use crate::namer::{DEFAULT_BASE_URL, DEFAULT_MODEL, NamerError, TitleNamer};

/// Set the terminal tab title from the first prompt of a session.
#[derive(Debug, Parser)]
#[command(name = "tab-title", version, about, long_about = None)]
struct Cli {
    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used to name the session
    #[arg(long, env = "TAB_TITLE_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Messages API base URL
    #[arg(long, env = "TAB_TITLE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory for per-session marker files (default: $TMPDIR/claude-tab-titles)
    #[arg(long)]
    marker_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum HookError {
    #[error("failed to read hook input: {0}")]
    Stdin(#[source] io::Error),

    #[error(transparent)]
    Namer(#[from] NamerError),

    #[error("failed to write marker in {}: {source}", path.display())]
    Marker {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::warn!(error = %err, "tab title hook failed");
    }
}

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
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), HookError> {
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .map_err(HookError::Stdin)?;

    let Some(input) = HookInput::parse(&raw) else {
        tracing::debug!("hook input unusable, nothing to do");
        return Ok(());
    };

    let store = MarkerStore::new(cli.marker_dir.unwrap_or_else(MarkerStore::default_dir));
    if store.is_marked(&input.session_id) {
        tracing::debug!(session = %input.session_id, "session already titled");
        return Ok(());
    }

    let namer = TitleNamer::new(cli.api_key.map(SecretString::from), cli.base_url, cli.model)?;
    let title = namer.title_for(&input.prompt).await;
    tracing::info!(session = %input.session_id, %title, "setting tab title");

    if let Err(e) = terminal::set_title(&title) {
        tracing::warn!(error = %e, "could not write terminal title");
    }

    store
        .mark(&input.session_id, &title)
        .map_err(|source| HookError::Marker {
            path: store.dir().to_path_buf(),
            source,
        })
}
