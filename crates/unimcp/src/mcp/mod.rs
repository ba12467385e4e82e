//! MCP over stdio, served by rmcp.

pub mod server;

pub use server::UnifiServer;
