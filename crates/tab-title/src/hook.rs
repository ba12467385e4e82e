//! Hook input and per-session markers.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Subdirectory of the temp dir used when no marker dir is given.
pub const MARKER_SUBDIR: &str = "claude-tab-titles";

/// The fields the hook cares about from the host's JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInput {
    pub session_id: String,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
struct RawHookInput {
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    user_prompt: Option<String>,
}

impl HookInput {
    /// Parse the payload. Anything unusable yields `None`: malformed JSON,
    /// a session id with no safe characters, or an empty prompt.
    pub fn parse(raw: &str) -> Option<Self> {
        let input: RawHookInput = serde_json::from_str(raw).ok()?;

        let session_id = sanitize_session_id(input.session_id.as_deref()?)?;
        let prompt = input
            .prompt
            .or(input.user_prompt)
            .filter(|p| !p.trim().is_empty())?;

        Some(Self { session_id, prompt })
    }
}

/// Keep `[A-Za-z0-9_-]` so the id is safe as a file name.
pub fn sanitize_session_id(raw: &str) -> Option<String> {
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    (!clean.is_empty()).then_some(clean)
}

/// One marker file per session that already has a title.
#[derive(Debug, Clone)]
pub struct MarkerStore {
    dir: PathBuf,
}

impl MarkerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join(MARKER_SUBDIR)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, session_id: &str) -> PathBuf {
        self.dir.join(session_id)
    }

    pub fn is_marked(&self, session_id: &str) -> bool {
        self.path_for(session_id).exists()
    }

    /// Record `title` for the session, creating the directory if needed.
    pub fn mark(&self, session_id: &str, title: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(session_id), title)
    }
}
