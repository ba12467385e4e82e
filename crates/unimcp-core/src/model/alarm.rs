// ── Alarm domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A controller alarm. Order is whatever the controller returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Option<String>,
    /// When the alarm fired. Epoch when the controller gave no usable time.
    pub timestamp: DateTime<Utc>,
    pub key: Option<String>,
    pub message: Option<String>,
    pub subsystem: Option<String>,
    pub site_id: Option<String>,
    pub archived: bool,
}
