//! Typed tool arguments.
//!
//! Doc comments on these structs become the field descriptions in each
//! tool's advertised input schema.

use schemars::JsonSchema;
use serde::Deserialize;

use unimcp_core::{ConnectionType, DeviceType};

const DEFAULT_GUEST_MINUTES: u32 = 480;
const DEFAULT_ALERT_LIMIT: usize = 20;

const DEVICE_TYPE_VALUES: &str =
    "uap, usw, ugw, udm, other, access_point, access-point, switch, gateway";

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListDevices {
    /// Filter by type, case-insensitive: uap, access_point or access-point for
    /// access points; usw or switch for switches; ugw, udm or gateway for
    /// gateways; other for everything else. Omit for all devices.
    #[serde(default)]
    pub device_type: Option<String>,
}

impl ListDevices {
    pub fn device_type(&self) -> Result<Option<DeviceType>, String> {
        self.device_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|raw| {
                raw.parse::<DeviceType>().map_err(|_| {
                    format!("unknown device_type '{raw}' (expected one of {DEVICE_TYPE_VALUES})")
                })
            })
            .transpose()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionFilter {
    Wireless,
    Wired,
}

impl ConnectionFilter {
    pub fn matches(self, connection: ConnectionType) -> bool {
        match self {
            Self::Wireless => connection == ConnectionType::Wireless,
            Self::Wired => connection == ConnectionType::Wired,
        }
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListClients {
    /// Filter by connection type. Omit for all clients.
    #[serde(default)]
    pub connection_type: Option<ConnectionFilter>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeviceMac {
    /// Device MAC address (aa:bb:cc:dd:ee:ff).
    pub device_mac: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ClientMac {
    /// Client MAC address (aa:bb:cc:dd:ee:ff).
    pub client_mac: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AuthorizeGuest {
    /// Guest MAC address (aa:bb:cc:dd:ee:ff).
    pub guest_mac: String,
    /// Authorization duration in minutes.
    #[serde(default = "default_guest_minutes")]
    pub minutes: u32,
    /// Upload limit in kbps. Omit for no limit.
    #[serde(default)]
    pub up_bandwidth_kbps: Option<u32>,
    /// Download limit in kbps. Omit for no limit.
    #[serde(default)]
    pub down_bandwidth_kbps: Option<u32>,
}

fn default_guest_minutes() -> u32 {
    DEFAULT_GUEST_MINUTES
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListAlerts {
    /// Maximum number of alerts to return.
    #[serde(default = "default_alert_limit")]
    pub limit: usize,
}

impl Default for ListAlerts {
    fn default() -> Self {
        Self {
            limit: DEFAULT_ALERT_LIMIT,
        }
    }
}

fn default_alert_limit() -> usize {
    DEFAULT_ALERT_LIMIT
}
