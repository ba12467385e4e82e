// Controller session modules
//
// Cookie-authenticated client for the Network application API behind a
// UniFi OS console. Covers login, site/controller-scoped GET and POST, and
// the `{ meta: { rc, msg }, data: [...] }` envelope.

pub mod auth;
pub mod client;
pub mod models;

pub use client::{Scope, Session};
