// ── Domain model ──

pub mod alarm;
pub mod client;
pub mod device;
pub mod mac;
pub mod site;

pub use alarm::Alarm;
pub use client::{Client, ConnectionType, WirelessInfo};
pub use device::{Device, DeviceState, DeviceType, StationCounts, TrafficCounters};
pub use mac::MacAddress;
pub use site::Site;
