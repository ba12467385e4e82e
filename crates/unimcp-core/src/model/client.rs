// ── Client (station) domain types ──

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::mac::MacAddress;

/// How a client is attached to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionType {
    Wired,
    Wireless,
}

/// Radio details for a wireless client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirelessInfo {
    pub ap_mac: Option<MacAddress>,
    pub essid: Option<String>,
    pub channel: Option<i32>,
    /// Signal strength in dBm.
    pub signal: Option<i32>,
}

/// A currently connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Option<String>,
    pub mac: MacAddress,
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub ip: Option<IpAddr>,
    pub connection: ConnectionType,
    pub wireless: WirelessInfo,
    pub uptime_secs: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

impl Client {
    /// Alias if set, else hostname.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.hostname.as_deref())
    }

    pub fn is_wired(&self) -> bool {
        self.connection == ConnectionType::Wired
    }
}
