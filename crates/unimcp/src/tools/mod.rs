//! Tool handlers.
//!
//! Each tool validates its arguments, makes one or two sequential facade
//! calls, and reshapes the result with the pure functions in [`views`].
//! A missing device is an ordinary result (`{"error": ...}`), not a failure.

pub mod params;
pub mod views;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use unimcp_core::{Controller, CoreError, GuestAuthorization, MacAddress};

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },

    #[error(transparent)]
    Controller(#[from] CoreError),

    #[error("Failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}

impl ToolError {
    /// Machine-readable details for the host.
    pub fn details(&self) -> Value {
        match self {
            Self::InvalidArguments { tool, .. } => json!({
                "error": self.to_string(),
                "kind": "invalid_arguments",
                "tool": tool,
            }),
            Self::Controller(err) => json!({
                "error": err.to_string(),
                "kind": err.kind(),
                "status": err.status(),
            }),
            Self::Render(_) => json!({
                "error": self.to_string(),
                "kind": "render_error",
            }),
        }
    }
}

fn not_found(mac: &str) -> Value {
    json!({ "error": format!("Device with MAC {mac} not found") })
}

fn to_value(view: &impl Serialize) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(view)?)
}

// ── Handlers ────────────────────────────────────────────────────────

/// The ten controller operations, one method per tool.
pub struct Tools {
    controller: Arc<Controller>,
    controller_version: String,
}

impl Tools {
    pub fn new(controller: Arc<Controller>, controller_version: impl Into<String>) -> Self {
        Self {
            controller,
            controller_version: controller_version.into(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────

    pub async fn list_devices(&self, p: params::ListDevices) -> Result<Value, ToolError> {
        let filter = p
            .device_type()
            .map_err(|message| ToolError::InvalidArguments {
                tool: "list_devices",
                message,
            })?;
        let devices = self.controller.list_devices().await?;
        let view = views::DeviceList::new(
            devices
                .iter()
                .filter(|d| filter.is_none_or(|t| d.device_type == t)),
        );
        to_value(&view)
    }

    pub async fn list_clients(&self, p: params::ListClients) -> Result<Value, ToolError> {
        let clients = self.controller.list_clients().await?;
        let view = views::ClientList::new(
            clients
                .iter()
                .filter(|c| p.connection_type.is_none_or(|f| f.matches(c.connection))),
        );
        to_value(&view)
    }

    pub async fn get_device_stats(&self, p: params::DeviceMac) -> Result<Value, ToolError> {
        let mac = MacAddress::new(&p.device_mac);
        match self.controller.find_device(&mac).await? {
            Some(device) => to_value(&views::DeviceStats::from(&device)),
            None => Ok(not_found(&p.device_mac)),
        }
    }

    pub async fn list_alerts(&self, p: params::ListAlerts) -> Result<Value, ToolError> {
        let alarms = self.controller.list_alarms().await?;
        to_value(&views::AlertList::new(&alarms, p.limit))
    }

    pub async fn get_network_health(&self) -> Result<Value, ToolError> {
        let devices = self.controller.list_devices().await?;
        let clients = self.controller.list_clients().await?;
        let health = self.controller.health_info().await?;
        to_value(&views::NetworkHealth::new(&devices, &clients, health))
    }

    pub async fn get_site_info(&self) -> Result<Value, ToolError> {
        let sites = self.controller.list_sites().await?;
        to_value(&views::SiteInfo {
            sites,
            controller_version: self.controller_version.clone(),
        })
    }

    // ── Commands ─────────────────────────────────────────────────

    pub async fn restart_device(&self, p: params::DeviceMac) -> Result<Value, ToolError> {
        let mac = MacAddress::new(&p.device_mac);
        let Some(device) = self.controller.find_device(&mac).await? else {
            return Ok(not_found(&p.device_mac));
        };

        self.controller.restart_device(&device.mac).await?;
        Ok(json!({
            "status": "success",
            "message": format!(
                "Restart command sent to {} ({})",
                device.name.as_deref().unwrap_or("device"),
                device.mac
            ),
            "device_name": device.name,
            "device_mac": device.mac,
        }))
    }

    pub async fn block_client(&self, p: params::ClientMac) -> Result<Value, ToolError> {
        let mac = MacAddress::new(&p.client_mac);
        self.controller.block_client(&mac).await?;
        Ok(json!({
            "status": "success",
            "message": format!("Client {mac} has been blocked"),
            "client_mac": mac,
        }))
    }

    pub async fn unblock_client(&self, p: params::ClientMac) -> Result<Value, ToolError> {
        let mac = MacAddress::new(&p.client_mac);
        self.controller.unblock_client(&mac).await?;
        Ok(json!({
            "status": "success",
            "message": format!("Client {mac} has been unblocked"),
            "client_mac": mac,
        }))
    }

    pub async fn authorize_guest(&self, p: params::AuthorizeGuest) -> Result<Value, ToolError> {
        let mac = MacAddress::new(&p.guest_mac);
        self.controller
            .authorize_guest(GuestAuthorization {
                mac: mac.clone(),
                minutes: p.minutes,
                up_kbps: p.up_bandwidth_kbps,
                down_kbps: p.down_bandwidth_kbps,
            })
            .await?;

        let expires_at = Utc::now().timestamp() + i64::from(p.minutes) * 60;
        Ok(json!({
            "status": "success",
            "message": format!("Guest {mac} authorized for {} minutes", p.minutes),
            "guest_mac": mac,
            "minutes": p.minutes,
            "expires_at": expires_at,
            "up_bandwidth_kbps": p.up_bandwidth_kbps,
            "down_bandwidth_kbps": p.down_bandwidth_kbps,
        }))
    }
}
