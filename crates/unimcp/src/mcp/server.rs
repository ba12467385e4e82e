//! rmcp tool server.
//!
//! Every tool is a thin `#[tool]` wrapper around [`Tools`]. Tool failures
//! come back as `isError` results carrying [`ToolError::details`]; only
//! malformed requests become JSON-RPC errors.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde_json::Value;
use tracing::{debug, warn};

use crate::tools::{ToolError, Tools, params};

const SERVER_NAME: &str = "unifi";

const INSTRUCTIONS: &str = "Tools for one UniFi Network site. Read tools (list_devices, \
list_clients, get_device_stats, list_alerts, get_network_health, get_site_info) never change \
anything. restart_device, block_client, unblock_client and authorize_guest send commands to the \
controller. MAC addresses are accepted in any common notation.";

#[derive(Clone)]
pub struct UnifiServer {
    tools: Arc<Tools>,
    tool_router: ToolRouter<Self>,
}

/// Successful calls carry the view as structured content; failures carry
/// the error details and set `isError`.
fn respond(tool: &str, result: Result<Value, ToolError>) -> CallToolResult {
    match result {
        Ok(value) => {
            debug!(tool, "tool call succeeded");
            CallToolResult::structured(value)
        }
        Err(e) => {
            warn!(tool, error = %e, "tool call failed");
            CallToolResult::structured_error(e.details())
        }
    }
}

#[tool_router]
impl UnifiServer {
    pub fn new(tools: Tools) -> Self {
        Self {
            tools: Arc::new(tools),
            tool_router: Self::tool_router(),
        }
    }

    /// Tool definitions as advertised by `tools/list`.
    pub fn catalogue() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    // ── Reads ────────────────────────────────────────────────────

    #[tool(
        description = "List network devices (access points, switches, gateways) with model, IP, state and uptime."
    )]
    async fn list_devices(
        &self,
        Parameters(p): Parameters<params::ListDevices>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond("list_devices", self.tools.list_devices(p).await))
    }

    #[tool(description = "List connected clients with IP, access point, SSID, signal and traffic.")]
    async fn list_clients(
        &self,
        Parameters(p): Parameters<params::ListClients>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond("list_clients", self.tools.list_clients(p).await))
    }

    #[tool(
        description = "Detailed statistics for one device: station counts, satisfaction, traffic, uplink."
    )]
    async fn get_device_stats(
        &self,
        Parameters(p): Parameters<params::DeviceMac>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond("get_device_stats", self.tools.get_device_stats(p).await))
    }

    #[tool(description = "Recent controller alarms, in controller order.")]
    async fn list_alerts(
        &self,
        Parameters(p): Parameters<params::ListAlerts>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond("list_alerts", self.tools.list_alerts(p).await))
    }

    #[tool(
        description = "Overall health: device and client counts plus per-subsystem health records."
    )]
    async fn get_network_health(&self) -> Result<CallToolResult, McpError> {
        Ok(respond("get_network_health", self.tools.get_network_health().await))
    }

    #[tool(description = "Sites visible to the configured account and the controller version.")]
    async fn get_site_info(&self) -> Result<CallToolResult, McpError> {
        Ok(respond("get_site_info", self.tools.get_site_info().await))
    }

    // ── Commands ─────────────────────────────────────────────────

    #[tool(description = "Restart a device. The device must exist on the site.")]
    async fn restart_device(
        &self,
        Parameters(p): Parameters<params::DeviceMac>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond("restart_device", self.tools.restart_device(p).await))
    }

    #[tool(description = "Block a client from the network.")]
    async fn block_client(
        &self,
        Parameters(p): Parameters<params::ClientMac>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond("block_client", self.tools.block_client(p).await))
    }

    #[tool(description = "Unblock a previously blocked client.")]
    async fn unblock_client(
        &self,
        Parameters(p): Parameters<params::ClientMac>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond("unblock_client", self.tools.unblock_client(p).await))
    }

    #[tool(
        description = "Authorize a guest client on the hotspot for a limited time, optionally rate-limited."
    )]
    async fn authorize_guest(
        &self,
        Parameters(p): Parameters<params::AuthorizeGuest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond("authorize_guest", self.tools.authorize_guest(p).await))
    }
}

#[tool_handler]
impl ServerHandler for UnifiServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_owned()),
        }
    }
}
