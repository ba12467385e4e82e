//! Tool output shapes.
//!
//! Pure mapping functions from domain records to the JSON the host sees.
//! Nothing here performs I/O.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use unimcp_core::{Alarm, Client, Device, MacAddress, Site};

const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_HOUR: f64 = 3_600.0;

/// `secs / unit`, rounded to one decimal.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn ratio_1dp(secs: u64, unit: f64) -> f64 {
    ((secs as f64 / unit) * 10.0).round() / 10.0
}

pub fn uptime_days(secs: u64) -> f64 {
    ratio_1dp(secs, SECS_PER_DAY)
}

pub fn uptime_hours(secs: u64) -> f64 {
    ratio_1dp(secs, SECS_PER_HOUR)
}

/// ISO-8601 in UTC without an offset (`1970-01-01T00:00:00`).
pub fn iso_utc(ts: DateTime<Utc>) -> String {
    ts.naive_utc().format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

// ── Devices ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DeviceSummary {
    pub name: String,
    pub mac: String,
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub device_type: String,
    pub ip: Option<String>,
    pub state: String,
    pub adopted: bool,
    pub uptime: u64,
    pub uptime_days: f64,
    pub version: Option<String>,
}

impl From<&Device> for DeviceSummary {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name.clone().unwrap_or_else(|| "Unnamed".into()),
            mac: d.mac.to_string(),
            model: d.model.clone(),
            device_type: d.device_type.to_string(),
            ip: d.ip.map(|ip| ip.to_string()),
            state: d.state.to_string(),
            adopted: d.adopted,
            uptime: d.uptime_secs,
            uptime_days: uptime_days(d.uptime_secs),
            version: d.firmware_version.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceList {
    pub count: usize,
    pub devices: Vec<DeviceSummary>,
}

impl DeviceList {
    pub fn new<'a>(devices: impl IntoIterator<Item = &'a Device>) -> Self {
        let devices: Vec<DeviceSummary> = devices.into_iter().map(DeviceSummary::from).collect();
        Self {
            count: devices.len(),
            devices,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceStats {
    pub name: Option<String>,
    pub mac: String,
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub device_type: String,
    pub ip: Option<String>,
    pub state: String,
    pub uptime: u64,
    pub uptime_days: f64,
    pub version: Option<String>,
    pub num_sta: u64,
    pub user_num_sta: u64,
    pub guest_num_sta: u64,
    pub satisfaction: Option<i32>,
    pub bytes: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub uplink: Option<Value>,
}

impl From<&Device> for DeviceStats {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name.clone(),
            mac: d.mac.to_string(),
            model: d.model.clone(),
            device_type: d.device_type.to_string(),
            ip: d.ip.map(|ip| ip.to_string()),
            state: d.state.to_string(),
            uptime: d.uptime_secs,
            uptime_days: uptime_days(d.uptime_secs),
            version: d.firmware_version.clone(),
            num_sta: d.stations.total,
            user_num_sta: d.stations.user,
            guest_num_sta: d.stations.guest,
            satisfaction: d.satisfaction,
            bytes: d.traffic.bytes,
            tx_bytes: d.traffic.tx_bytes,
            rx_bytes: d.traffic.rx_bytes,
            uplink: d.uplink.clone(),
        }
    }
}

// ── Clients ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ClientSummary {
    pub name: String,
    pub mac: String,
    pub ip: Option<String>,
    pub is_wired: bool,
    pub ap_mac: Option<String>,
    pub essid: Option<String>,
    pub channel: Option<i32>,
    pub signal: Option<i32>,
    pub uptime: u64,
    pub uptime_hours: f64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
}

impl From<&Client> for ClientSummary {
    fn from(c: &Client) -> Self {
        Self {
            name: c.display_name().unwrap_or("Unknown").to_owned(),
            mac: c.mac.to_string(),
            ip: c.ip.map(|ip| ip.to_string()),
            is_wired: c.is_wired(),
            ap_mac: c.wireless.ap_mac.as_ref().map(MacAddress::to_string),
            essid: c.wireless.essid.clone(),
            channel: c.wireless.channel,
            signal: c.wireless.signal,
            uptime: c.uptime_secs,
            uptime_hours: uptime_hours(c.uptime_secs),
            tx_bytes: c.tx_bytes,
            rx_bytes: c.rx_bytes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientList {
    pub count: usize,
    pub clients: Vec<ClientSummary>,
}

impl ClientList {
    pub fn new<'a>(clients: impl IntoIterator<Item = &'a Client>) -> Self {
        let clients: Vec<ClientSummary> = clients.into_iter().map(ClientSummary::from).collect();
        Self {
            count: clients.len(),
            clients,
        }
    }
}

// ── Alerts ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AlertSummary {
    pub datetime: String,
    pub key: Option<String>,
    pub message: Option<String>,
    pub subsystem: Option<String>,
    pub site_id: Option<String>,
    pub archived: bool,
}

impl From<&Alarm> for AlertSummary {
    fn from(a: &Alarm) -> Self {
        Self {
            datetime: iso_utc(a.timestamp),
            key: a.key.clone(),
            message: a.message.clone(),
            subsystem: a.subsystem.clone(),
            site_id: a.site_id.clone(),
            archived: a.archived,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlertList {
    pub count: usize,
    pub alerts: Vec<AlertSummary>,
}

impl AlertList {
    /// First `limit` alarms, in the order given.
    pub fn new(alarms: &[Alarm], limit: usize) -> Self {
        let alerts: Vec<AlertSummary> = alarms.iter().take(limit).map(AlertSummary::from).collect();
        Self {
            count: alerts.len(),
            alerts,
        }
    }
}

// ── Health ──────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeviceCounts {
    pub total: usize,
    pub adopted: usize,
    pub connected: usize,
    pub disconnected: usize,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClientCounts {
    pub total: usize,
    pub wireless: usize,
    pub wired: usize,
}

#[derive(Debug, Serialize)]
pub struct NetworkHealth {
    pub devices: DeviceCounts,
    pub clients: ClientCounts,
    pub health_info: Vec<Value>,
}

impl NetworkHealth {
    pub fn new(devices: &[Device], clients: &[Client], health_info: Vec<Value>) -> Self {
        let connected = devices.iter().filter(|d| d.state.is_online()).count();
        let wired = clients.iter().filter(|c| c.is_wired()).count();
        Self {
            devices: DeviceCounts {
                total: devices.len(),
                adopted: devices.iter().filter(|d| d.adopted).count(),
                connected,
                disconnected: devices.len() - connected,
            },
            clients: ClientCounts {
                total: clients.len(),
                wireless: clients.len() - wired,
                wired,
            },
            health_info,
        }
    }
}

// ── Sites ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SiteInfo {
    pub sites: Vec<Site>,
    pub controller_version: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use unimcp_core::{
        ConnectionType, DeviceState, DeviceType, StationCounts, TrafficCounters, WirelessInfo,
    };

    fn device(name: Option<&str>, state: DeviceState, adopted: bool) -> Device {
        Device {
            id: None,
            mac: MacAddress::new("aa:bb:cc:00:00:01"),
            name: name.map(str::to_owned),
            model: Some("U6LR".into()),
            device_type: DeviceType::AccessPoint,
            ip: Some("10.0.0.2".parse().unwrap()),
            state,
            adopted,
            firmware_version: Some("6.6.55".into()),
            uptime_secs: 129_600,
            stations: StationCounts::default(),
            satisfaction: None,
            traffic: TrafficCounters::default(),
            uplink: None,
        }
    }

    fn client(name: Option<&str>, hostname: Option<&str>, connection: ConnectionType) -> Client {
        Client {
            id: None,
            mac: MacAddress::new("11:22:33:44:55:66"),
            name: name.map(str::to_owned),
            hostname: hostname.map(str::to_owned),
            ip: None,
            connection,
            wireless: WirelessInfo::default(),
            uptime_secs: 5_400,
            tx_bytes: 1,
            rx_bytes: 2,
        }
    }

    #[test]
    fn uptime_rounds_to_one_decimal() {
        assert_eq!(uptime_days(0), 0.0);
        assert_eq!(uptime_days(129_600), 1.5);
        assert_eq!(uptime_days(90_000), 1.0);
        assert_eq!(uptime_hours(5_400), 1.5);
        assert_eq!(uptime_hours(3_780), 1.1);
    }

    #[test]
    fn epoch_renders_without_offset() {
        assert_eq!(iso_utc(DateTime::UNIX_EPOCH), "1970-01-01T00:00:00");
        let ts = DateTime::from_timestamp_millis(1_700_000_000_250).unwrap();
        assert_eq!(iso_utc(ts), "2023-11-14T22:13:20.250");
    }

    #[test]
    fn device_summary_defaults_name() {
        let view = DeviceSummary::from(&device(None, DeviceState::Online, true));
        let wire = serde_json::to_value(&view).unwrap();
        assert_eq!(wire["name"], "Unnamed");
        assert_eq!(wire["type"], "access_point");
        assert_eq!(wire["state"], "online");
        assert_eq!(wire["uptime_days"], 1.5);
        assert_eq!(wire["ip"], "10.0.0.2");
    }

    #[test]
    fn device_stats_keep_missing_name_null() {
        let view = DeviceStats::from(&device(None, DeviceState::Offline, true));
        let wire = serde_json::to_value(&view).unwrap();
        assert_eq!(wire["name"], Value::Null);
        assert_eq!(wire["num_sta"], 0);
        assert_eq!(wire["uplink"], Value::Null);
    }

    #[test]
    fn client_name_falls_back() {
        let named = ClientSummary::from(&client(Some("Desk"), Some("desk-01"), ConnectionType::Wired));
        assert_eq!(named.name, "Desk");
        assert!(named.is_wired);

        let host = ClientSummary::from(&client(None, Some("phone"), ConnectionType::Wireless));
        assert_eq!(host.name, "phone");

        let anon = ClientSummary::from(&client(None, None, ConnectionType::Wireless));
        assert_eq!(anon.name, "Unknown");
        assert_eq!(anon.uptime_hours, 1.5);
    }

    #[test]
    fn health_counts_partition() {
        let devices = vec![
            device(Some("a"), DeviceState::Online, true),
            device(Some("b"), DeviceState::Offline, true),
            device(Some("c"), DeviceState::PendingAdoption, false),
        ];
        let clients = vec![
            client(None, None, ConnectionType::Wired),
            client(None, None, ConnectionType::Wireless),
            client(None, None, ConnectionType::Wireless),
        ];
        let health = NetworkHealth::new(&devices, &clients, vec![json!({ "subsystem": "wan" })]);
        assert_eq!(
            health.devices,
            DeviceCounts {
                total: 3,
                adopted: 2,
                connected: 1,
                disconnected: 2
            }
        );
        assert_eq!(
            health.clients,
            ClientCounts {
                total: 3,
                wireless: 2,
                wired: 1
            }
        );
    }
}
