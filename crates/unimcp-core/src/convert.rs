// ── API-to-domain type conversions ──
//
// Bridges raw `unimcp_api` response types into `unimcp_core::model` domain
// types. Each `From` impl normalizes MACs, parses strings into strong
// types, and clamps negative counters the controller occasionally emits.

use std::net::IpAddr;

use chrono::{DateTime, Utc};

use unimcp_api::{RawAlarm, RawClient, RawDevice};

use crate::model::{
    Alarm, Client, ConnectionType, Device, DeviceState, DeviceType, MacAddress, StationCounts,
    TrafficCounters, WirelessInfo,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an optional string to an `IpAddr`, silently dropping unparseable values.
fn parse_ip(raw: Option<&str>) -> Option<IpAddr> {
    raw.and_then(|s| s.parse().ok())
}

/// Clamp an optional signed counter to `u64`; absent or negative becomes 0.
fn counter(raw: Option<i64>) -> u64 {
    raw.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

/// Resolve an alarm's timestamp.
///
/// Tried in order: `time` as epoch milliseconds, `datetime` as epoch
/// milliseconds, `datetime` as an RFC 3339 string. Falls back to the epoch.
pub(crate) fn alarm_timestamp(time: Option<i64>, datetime: Option<&serde_json::Value>) -> DateTime<Utc> {
    time.and_then(DateTime::from_timestamp_millis)
        .or_else(|| {
            datetime
                .and_then(serde_json::Value::as_i64)
                .and_then(DateTime::from_timestamp_millis)
        })
        .or_else(|| {
            datetime
                .and_then(serde_json::Value::as_str)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc))
        })
        .unwrap_or(DateTime::UNIX_EPOCH)
}

// ── Device ─────────────────────────────────────────────────────────

/// Infer `DeviceType` from the `type` code, falling back to the model prefix
/// for hardware whose code doesn't match cleanly.
fn infer_device_type(type_code: &str, model: Option<&str>) -> DeviceType {
    match type_code {
        "uap" => DeviceType::AccessPoint,
        "usw" => DeviceType::Switch,
        "ugw" | "udm" | "uxg" => DeviceType::Gateway,
        _ => {
            let Some(model) = model else {
                return DeviceType::Other;
            };
            let upper = model.to_uppercase();
            if upper.starts_with("UAP") || upper.starts_with("U6") || upper.starts_with("U7") {
                DeviceType::AccessPoint
            } else if upper.starts_with("USW") || upper.starts_with("USL") {
                DeviceType::Switch
            } else if ["UGW", "UDM", "UDR", "UXG"]
                .iter()
                .any(|prefix| upper.starts_with(prefix))
            {
                DeviceType::Gateway
            } else {
                DeviceType::Other
            }
        }
    }
}

/// Known codes: 0=offline, 1=online, 2=pending adoption, 4=upgrading, 5=provisioning.
fn map_device_state(code: i32) -> DeviceState {
    match code {
        0 => DeviceState::Offline,
        1 => DeviceState::Online,
        2 => DeviceState::PendingAdoption,
        4 => DeviceState::Updating,
        5 => DeviceState::Provisioning,
        _ => DeviceState::Unknown,
    }
}

impl From<RawDevice> for Device {
    fn from(d: RawDevice) -> Self {
        let device_type = infer_device_type(&d.device_type, d.model.as_deref());
        Device {
            id: d.id,
            mac: MacAddress::new(&d.mac),
            ip: parse_ip(d.ip.as_deref()),
            name: d.name,
            model: d.model,
            device_type,
            state: map_device_state(d.state),
            adopted: d.adopted,
            firmware_version: d.version,
            uptime_secs: counter(d.uptime),
            stations: StationCounts {
                total: counter(d.num_sta),
                user: counter(d.user_num_sta),
                guest: counter(d.guest_num_sta),
            },
            satisfaction: d.satisfaction,
            traffic: TrafficCounters {
                bytes: counter(d.bytes),
                tx_bytes: counter(d.tx_bytes),
                rx_bytes: counter(d.rx_bytes),
            },
            uplink: d.uplink,
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

impl From<RawClient> for Client {
    fn from(c: RawClient) -> Self {
        // No wired flag means the controller saw it on a radio.
        let connection = if c.is_wired.unwrap_or(false) {
            ConnectionType::Wired
        } else {
            ConnectionType::Wireless
        };

        Client {
            id: c.id,
            mac: MacAddress::new(&c.mac),
            name: c.name,
            hostname: c.hostname,
            ip: parse_ip(c.ip.as_deref()),
            connection,
            wireless: WirelessInfo {
                ap_mac: c.ap_mac.as_deref().map(MacAddress::new),
                essid: c.essid,
                channel: c.channel,
                signal: c.signal,
            },
            uptime_secs: counter(c.uptime),
            tx_bytes: counter(c.tx_bytes),
            rx_bytes: counter(c.rx_bytes),
        }
    }
}

// ── Alarm ──────────────────────────────────────────────────────────

impl From<RawAlarm> for Alarm {
    fn from(a: RawAlarm) -> Self {
        Alarm {
            timestamp: alarm_timestamp(a.time, a.datetime.as_ref()),
            id: a.id,
            key: a.key,
            message: a.msg,
            subsystem: a.subsystem,
            site_id: a.site_id,
            archived: a.archived.unwrap_or(false),
        }
    }
}
