// ── Device domain types ──

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::mac::MacAddress;

/// Canonical device type, inferred from the controller's `type` code and model.
///
/// Parses from both the controller codes (`uap`, `usw`, `ugw`) and the
/// descriptive names, case-insensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum DeviceType {
    #[strum(to_string = "access_point", serialize = "access-point", serialize = "uap")]
    AccessPoint,
    #[strum(to_string = "switch", serialize = "usw")]
    Switch,
    #[strum(to_string = "gateway", serialize = "ugw", serialize = "udm")]
    Gateway,
    #[strum(to_string = "other")]
    Other,
}

/// Device operational state, from the controller's integer state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceState {
    Online,
    Offline,
    PendingAdoption,
    Updating,
    Provisioning,
    Unknown,
}

impl DeviceState {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Connected-station counts reported by an access point or switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCounts {
    pub total: u64,
    pub user: u64,
    pub guest: u64,
}

/// Cumulative traffic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficCounters {
    pub bytes: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

/// An adopted (or pending) UniFi device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub mac: MacAddress,
    pub name: Option<String>,
    pub model: Option<String>,
    pub device_type: DeviceType,
    pub ip: Option<IpAddr>,
    pub state: DeviceState,
    pub adopted: bool,
    pub firmware_version: Option<String>,
    pub uptime_secs: u64,
    pub stations: StationCounts,
    pub satisfaction: Option<i32>,
    pub traffic: TrafficCounters,
    pub uplink: Option<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn device_type_parses_codes_and_names() {
        assert_eq!("uap".parse::<DeviceType>().unwrap(), DeviceType::AccessPoint);
        assert_eq!("access_point".parse::<DeviceType>().unwrap(), DeviceType::AccessPoint);
        assert_eq!("Access-Point".parse::<DeviceType>().unwrap(), DeviceType::AccessPoint);
        assert_eq!("USW".parse::<DeviceType>().unwrap(), DeviceType::Switch);
        assert_eq!("ugw".parse::<DeviceType>().unwrap(), DeviceType::Gateway);
        assert_eq!("gateway".parse::<DeviceType>().unwrap(), DeviceType::Gateway);
        assert_eq!("other".parse::<DeviceType>().unwrap(), DeviceType::Other);
        assert!("router".parse::<DeviceType>().is_err());
    }

    #[test]
    fn device_type_displays_descriptive_name() {
        assert_eq!(DeviceType::AccessPoint.to_string(), "access_point");
        assert_eq!(DeviceType::Gateway.as_ref(), "gateway");
    }

    #[test]
    fn device_state_is_snake_case() {
        assert_eq!(DeviceState::PendingAdoption.to_string(), "pending_adoption");
        assert_eq!(
            serde_json::to_value(DeviceState::Online).unwrap(),
            serde_json::json!("online")
        );
    }
}
