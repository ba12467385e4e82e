// ── Site ──

use serde::{Deserialize, Serialize};

/// A site record, passed through as the controller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Site(pub serde_json::Map<String, serde_json::Value>);

impl Site {
    /// Short site name used in URLs (`default`).
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(serde_json::Value::as_str)
    }

    /// Human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.0.get("desc").and_then(serde_json::Value::as_str)
    }
}
