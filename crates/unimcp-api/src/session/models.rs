// Controller response types
//
// Models for the Network application's JSON API. Every response is wrapped
// in the `Envelope<T>` shape. Fields use `#[serde(default)]` liberally
// because the API is inconsistent about field presence across firmware
// versions; anything not modelled lands in `extra`.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard response envelope.
///
/// ```json
/// { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
/// ```
///
/// Both keys are optional on the wire: a missing `data` means "no records",
/// a missing `meta` means success.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub meta: Option<Meta>,
    // Plain `default` would demand `T: Default`.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Metadata from the envelope. `rc == "ok"` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device object from `stat/device`.
///
/// The controller can return 100+ fields per device. We model the ones the
/// facade reshapes; everything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDevice {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    pub mac: String,
    #[serde(default, rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub adopted: bool,
    /// 0=offline, 1=online, 2=pending, 4=upgrading, 5=provisioning
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub uptime: Option<i64>,
    #[serde(default)]
    pub num_sta: Option<i64>,
    #[serde(default, rename = "user-num_sta")]
    pub user_num_sta: Option<i64>,
    #[serde(default, rename = "guest-num_sta")]
    pub guest_num_sta: Option<i64>,
    #[serde(default)]
    pub satisfaction: Option<i32>,
    #[serde(default)]
    pub bytes: Option<i64>,
    #[serde(default)]
    pub tx_bytes: Option<i64>,
    #[serde(default)]
    pub rx_bytes: Option<i64>,
    /// Uplink descriptor; shape differs between switches, APs and gateways.
    #[serde(default)]
    pub uplink: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Client (Station) ─────────────────────────────────────────────────

/// Connected client from `stat/sta`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawClient {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    pub mac: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub is_wired: Option<bool>,
    #[serde(default)]
    pub ap_mac: Option<String>,
    #[serde(default)]
    pub essid: Option<String>,
    #[serde(default)]
    pub channel: Option<i32>,
    #[serde(default)]
    pub signal: Option<i32>,
    #[serde(default)]
    pub uptime: Option<i64>,
    #[serde(default)]
    pub tx_bytes: Option<i64>,
    #[serde(default)]
    pub rx_bytes: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Alarm ────────────────────────────────────────────────────────────

/// Alarm object from `list/alarm`.
///
/// Firmware disagrees on the timestamp: most builds send `time` as epoch
/// milliseconds and `datetime` as an ISO string, some send `datetime` as
/// epoch milliseconds. Both are kept raw and resolved in core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAlarm {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub subsystem: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub datetime: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_without_data_is_empty() {
        let env: Envelope<RawDevice> =
            serde_json::from_value(json!({ "meta": { "rc": "ok" } })).unwrap();
        assert!(env.data.is_empty());
        assert_eq!(env.meta.unwrap().rc, "ok");
    }

    #[test]
    fn envelope_without_meta_is_accepted() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_value(json!({ "data": [1, 2] })).unwrap();
        assert!(env.meta.is_none());
        assert_eq!(env.data.len(), 2);
    }

    #[test]
    fn device_keeps_dashed_station_counts_and_extras() {
        let dev: RawDevice = serde_json::from_value(json!({
            "mac": "aa:bb:cc:dd:ee:ff",
            "type": "uap",
            "user-num_sta": 7,
            "guest-num_sta": 2,
            "led_override": "on"
        }))
        .unwrap();
        assert_eq!(dev.user_num_sta, Some(7));
        assert_eq!(dev.guest_num_sta, Some(2));
        assert!(!dev.adopted);
        assert_eq!(dev.state, 0);
        assert_eq!(dev.extra["led_override"], "on");
    }

    #[test]
    fn alarm_accepts_numeric_or_string_datetime() {
        let numeric: RawAlarm =
            serde_json::from_value(json!({ "datetime": 1_700_000_000_000_i64 })).unwrap();
        assert!(numeric.datetime.unwrap().is_i64());

        let text: RawAlarm = serde_json::from_value(json!({
            "time": 1_700_000_000_000_i64,
            "datetime": "2023-11-14T22:13:20Z"
        }))
        .unwrap();
        assert_eq!(text.time, Some(1_700_000_000_000));
        assert!(text.datetime.unwrap().is_string());
    }
}
