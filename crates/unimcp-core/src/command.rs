// ── Command API ──
//
// All write operations flow through a `Command` value. Each variant knows
// which manager endpoint it targets and how its payload looks on the wire;
// the controller only has to send it.

use serde::Serialize;
use serde_json::json;

use crate::model::MacAddress;

/// Guest authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestAuthorization {
    pub mac: MacAddress,
    pub minutes: u32,
    /// Upload limit in kbps.
    pub up_kbps: Option<u32>,
    /// Download limit in kbps.
    pub down_kbps: Option<u32>,
}

/// All write operations against a UniFi controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ── Device operations ────────────────────────────────────────────
    RestartDevice { mac: MacAddress },

    // ── Client operations ────────────────────────────────────────────
    BlockClient { mac: MacAddress },
    UnblockClient { mac: MacAddress },
    KickClient { mac: MacAddress },
    AuthorizeGuest(GuestAuthorization),
}

#[derive(Serialize)]
struct AuthorizeGuestBody<'a> {
    cmd: &'static str,
    mac: &'a MacAddress,
    minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    up: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    down: Option<u32>,
}

impl Command {
    /// Manager endpoint, relative to the site.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::RestartDevice { .. } => "cmd/devmgr",
            Self::BlockClient { .. }
            | Self::UnblockClient { .. }
            | Self::KickClient { .. }
            | Self::AuthorizeGuest(_) => "cmd/stamgr",
        }
    }

    /// Manager command name (`cmd` field of the payload).
    pub fn name(&self) -> &'static str {
        match self {
            Self::RestartDevice { .. } => "restart",
            Self::BlockClient { .. } => "block-sta",
            Self::UnblockClient { .. } => "unblock-sta",
            Self::KickClient { .. } => "kick-sta",
            Self::AuthorizeGuest(_) => "authorize-guest",
        }
    }

    /// Target MAC of the command.
    pub fn mac(&self) -> &MacAddress {
        match self {
            Self::RestartDevice { mac }
            | Self::BlockClient { mac }
            | Self::UnblockClient { mac }
            | Self::KickClient { mac } => mac,
            Self::AuthorizeGuest(auth) => &auth.mac,
        }
    }

    /// JSON payload. Bandwidth limits are omitted entirely when unset.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::AuthorizeGuest(auth) => json!(AuthorizeGuestBody {
                cmd: self.name(),
                mac: &auth.mac,
                minutes: auth.minutes,
                up: auth.up_kbps,
                down: auth.down_kbps,
            }),
            _ => json!({ "cmd": self.name(), "mac": self.mac() }),
        }
    }
}
