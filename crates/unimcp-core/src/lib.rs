// unimcp-core: controller facade and domain model between unimcp-api and the tool server.

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, GuestAuthorization};
pub use config::{ControllerConfig, TlsVerification};
pub use controller::Controller;
pub use error::CoreError;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alarm, Client, ConnectionType, Device, DeviceState, DeviceType, MacAddress, Site,
    StationCounts, TrafficCounters, WirelessInfo,
};
